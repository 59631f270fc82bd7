//! Configuration validation.

use std::collections::HashSet;

use super::{Config, SourceConfig};
use crate::error::{Result, ScaffoldError};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    for (name, source) in &config.connections {
        validate_source(name, source)?;
    }

    if let Some(job) = &config.classes {
        require_connection(config, "classes", &job.connection)?;
        if job.output_dir.as_os_str().is_empty() {
            return Err(ScaffoldError::Config("classes.output_dir is required".into()));
        }

        let mut seen = HashSet::new();
        for (i, table) in job.tables.iter().enumerate() {
            if table.table_name.trim().is_empty() {
                return Err(ScaffoldError::Config(format!(
                    "classes.tables[{}].table_name is required",
                    i
                )));
            }
            if table.class_name.trim().is_empty() {
                return Err(ScaffoldError::Config(format!(
                    "classes.tables[{}].class_name is required",
                    i
                )));
            }
            if !seen.insert(table.class_name.as_str()) {
                return Err(ScaffoldError::Config(format!(
                    "classes.tables: class name '{}' is used more than once",
                    table.class_name
                )));
            }
        }
    }

    if let Some(job) = &config.inserts {
        require_connection(config, "inserts", &job.connection)?;
        if job.output_dir.as_os_str().is_empty() {
            return Err(ScaffoldError::Config("inserts.output_dir is required".into()));
        }

        let mut seen = HashSet::new();
        for (i, table) in job.tables.iter().enumerate() {
            if table.table_name.trim().is_empty() {
                return Err(ScaffoldError::Config(format!(
                    "inserts.tables[{}].table_name is required",
                    i
                )));
            }
            if table.full_table_name.trim().is_empty() {
                return Err(ScaffoldError::Config(format!(
                    "inserts.tables[{}].full_table_name is required",
                    i
                )));
            }
            if !seen.insert(table.full_table_name.as_str()) {
                return Err(ScaffoldError::Config(format!(
                    "inserts.tables: full table name '{}' is used more than once",
                    table.full_table_name
                )));
            }
        }
    }

    Ok(())
}

fn validate_source(name: &str, source: &SourceConfig) -> Result<()> {
    if source.host.is_empty() {
        return Err(ScaffoldError::Config(format!(
            "connections.{}.host is required",
            name
        )));
    }
    if source.database.is_empty() {
        return Err(ScaffoldError::Config(format!(
            "connections.{}.database is required",
            name
        )));
    }
    if source.user.is_empty() {
        return Err(ScaffoldError::Config(format!(
            "connections.{}.user is required",
            name
        )));
    }
    Ok(())
}

fn require_connection(config: &Config, job: &str, connection: &str) -> Result<()> {
    if connection.is_empty() {
        return Err(ScaffoldError::Config(format!("{}.connection is required", job)));
    }
    if config.connection(connection).is_none() {
        return Err(ScaffoldError::Config(format!(
            "{}.connection '{}' is not defined under connections",
            job, connection
        )));
    }
    Ok(())
}
