//! Catalog sources: where raw column rows come from.
//!
//! - [`MssqlCatalog`]: live SQL Server via `INFORMATION_SCHEMA.COLUMNS`
//! - [`JsonCatalog`]: snapshot file, no server needed

mod json;

pub use json::JsonCatalog;

use crate::config::SourceConfig;
use crate::core::{CatalogSource, RawColumn};
use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel, Query};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info};

const COLUMNS_QUERY: &str = r#"
    SELECT
        COLUMN_NAME,
        DATA_TYPE,
        CAST(ISNULL(CHARACTER_MAXIMUM_LENGTH, 0) AS INT),
        CAST(ISNULL(NUMERIC_PRECISION, 0) AS INT),
        CAST(ISNULL(NUMERIC_SCALE, 0) AS INT),
        CASE WHEN IS_NULLABLE = 'YES' THEN 1 ELSE 0 END,
        ISNULL(COLUMNPROPERTY(OBJECT_ID(TABLE_SCHEMA + '.' + TABLE_NAME), COLUMN_NAME, 'IsIdentity'), 0),
        ORDINAL_POSITION
    FROM INFORMATION_SCHEMA.COLUMNS
    WHERE TABLE_SCHEMA = @P1 AND TABLE_NAME = @P2
    ORDER BY ORDINAL_POSITION
"#;

/// Column catalog of a live SQL Server database.
///
/// Holds one connection; tables are read one after another.
pub struct MssqlCatalog {
    client: Mutex<Client<Compat<TcpStream>>>,
    config: SourceConfig,
}

impl MssqlCatalog {
    /// Connect to the server described by `config`.
    pub async fn connect(config: SourceConfig) -> Result<Self> {
        let tds = build_config(&config);
        let tcp = TcpStream::connect(tds.get_addr())
            .await
            .map_err(|e| tiberius::error::Error::Io {
                kind: e.kind(),
                message: e.to_string(),
            })?;

        tcp.set_nodelay(true).ok();

        let client = Client::connect(tds, tcp.compat_write()).await?;

        info!(
            "Connected to MSSQL: {}:{}/{} (schema={})",
            config.host, config.port, config.database, config.schema
        );

        Ok(Self {
            client: Mutex::new(client),
            config,
        })
    }
}

fn build_config(source: &SourceConfig) -> Config {
    let mut config = Config::new();
    config.host(&source.host);
    config.port(source.port);
    config.database(&source.database);
    config.authentication(AuthMethod::sql_server(&source.user, &source.password));

    match source.encrypt.to_lowercase().as_str() {
        "false" | "no" | "0" | "disable" => {
            config.encryption(EncryptionLevel::NotSupported);
        }
        _ => {
            if source.trust_server_cert {
                config.trust_cert();
            }
            config.encryption(EncryptionLevel::Required);
        }
    }

    config
}

/// Catalog integers are non-negative; `max` lengths (-1) and NULLs become 0.
fn non_negative(value: Option<i32>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

#[async_trait]
impl CatalogSource for MssqlCatalog {
    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<RawColumn>> {
        let mut client = self.client.lock().await;

        let mut query = Query::new(COLUMNS_QUERY);
        query.bind(self.config.schema.as_str());
        query.bind(table_name);

        let stream = query.query(&mut *client).await?;
        let rows = stream.into_first_result().await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(RawColumn {
                column_name: row.get::<&str, _>(0).unwrap_or_default().to_string(),
                data_type: row.get::<&str, _>(1).unwrap_or_default().to_string(),
                max_length: non_negative(row.get::<i32, _>(2)),
                numeric_precision: non_negative(row.get::<i32, _>(3)),
                numeric_scale: non_negative(row.get::<i32, _>(4)),
                is_nullable: row.get::<i32, _>(5).unwrap_or(0) == 1,
                is_identity: row.get::<i32, _>(6).unwrap_or(0) == 1,
                ordinal_position: row.get::<i32, _>(7).unwrap_or(0),
            });
        }

        if columns.is_empty() {
            return Err(ScaffoldError::Catalog(format!(
                "table {}.{} not found or has no columns",
                self.config.schema, table_name
            )));
        }

        debug!("Loaded {} columns for {}.{}", columns.len(), self.config.schema, table_name);

        Ok(columns)
    }

    fn source_type(&self) -> &str {
        "mssql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(Some(50)), 50);
        assert_eq!(non_negative(Some(-1)), 0);
        assert_eq!(non_negative(None), 0);
    }
}
