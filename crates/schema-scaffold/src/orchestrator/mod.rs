//! Job runner: catalog → fields → text → artifact, one table at a time.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Local, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::builder::build_fields;
use crate::config::{ClassJob, ClassTable, InsertJob, InsertTable};
use crate::core::{ArtifactSink, CatalogSource, ClassDialect};
use crate::dialect::CSharpDialect;
use crate::error::{Result, ScaffoldError};
use crate::render::{
    render_class, render_insert, ClassOptions, InsertOptions, Parameters, RandomLiterals,
    ValueSource,
};

/// A table that could not be generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFailure {
    pub table: String,
    pub error: String,
}

/// Result of a generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// "classes" or "inserts".
    pub job: String,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// When the job started.
    pub started_at: DateTime<Utc>,

    /// Total tables processed.
    pub tables_total: usize,

    /// Tables whose artifact was written.
    pub tables_success: usize,

    /// Artifacts written, in table order.
    pub artifacts: Vec<PathBuf>,

    /// Tables that failed, with the reason.
    pub failed_tables: Vec<TableFailure>,
}

impl GenerationReport {
    fn start(job: &str, tables_total: usize) -> Self {
        Self {
            job: job.to_string(),
            duration_seconds: 0.0,
            started_at: Utc::now(),
            tables_total,
            tables_success: 0,
            artifacts: Vec::new(),
            failed_tables: Vec::new(),
        }
    }

    fn record_success(&mut self, path: PathBuf) {
        self.tables_success += 1;
        self.artifacts.push(path);
    }

    fn record_failure(&mut self, table: &str, error: &ScaffoldError) {
        self.failed_tables.push(TableFailure {
            table: table.to_string(),
            error: error.to_string(),
        });
    }

    /// Every table produced an artifact.
    pub fn is_success(&self) -> bool {
        self.failed_tables.is_empty()
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs class and insert jobs against a catalog, writing into a sink.
pub struct Generator<C, S> {
    catalog: C,
    sink: S,
    dialect: Box<dyn ClassDialect>,
}

impl<C: CatalogSource, S: ArtifactSink> Generator<C, S> {
    /// Create a generator emitting C# classes.
    pub fn new(catalog: C, sink: S) -> Self {
        Self {
            catalog,
            sink,
            dialect: Box::new(CSharpDialect::new()),
        }
    }

    /// Use a different class dialect.
    pub fn with_dialect(mut self, dialect: impl ClassDialect + 'static) -> Self {
        self.dialect = Box::new(dialect);
        self
    }

    /// Borrow the sink (useful for in-memory sinks in tests).
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Render the class text for one table.
    pub async fn class_text(&self, table: &ClassTable, options: &ClassOptions) -> Result<String> {
        let columns = self.catalog.fetch_columns(&table.table_name).await?;
        let fields = build_fields(&columns, &table.table_name)?;
        Ok(render_class(
            self.dialect.as_ref(),
            &table.table_name,
            &table.class_name,
            &fields,
            options,
        ))
    }

    /// Render the INSERT text for one table.
    pub async fn insert_text(
        &self,
        table: &InsertTable,
        options: &InsertOptions,
        values: &mut dyn ValueSource,
    ) -> Result<String> {
        let columns = self.catalog.fetch_columns(&table.table_name).await?;
        let fields = build_fields(&columns, &table.table_name)?;
        render_insert(&table.table_name, &table.full_table_name, &fields, options, values)
    }

    /// Generate one class file per table.
    ///
    /// A table whose data cannot be generated is recorded in the report and
    /// the job moves on. Catalog and sink failures stop the job.
    pub async fn generate_classes(&self, job: &ClassJob) -> Result<GenerationReport> {
        let start = Instant::now();
        let mut report = GenerationReport::start("classes", job.tables.len());
        let options = ClassOptions {
            emit_imports: job.emit_imports,
            namespace: job.namespace.clone(),
        };

        info!(
            "Generating {} {} classes from {} catalog into {:?}",
            job.tables.len(),
            self.dialect.name(),
            self.catalog.source_type(),
            job.output_dir
        );

        for table in &job.tables {
            debug!("Generating class {} for table {}", table.class_name, table.table_name);

            match self.class_text(table, &options).await {
                Ok(text) => {
                    let path = job
                        .output_dir
                        .join(format!("{}.{}", table.class_name, self.dialect.file_extension()));
                    self.sink.write_artifact(&path, &text)?;
                    info!("{}: wrote {:?}", table.table_name, path);
                    report.record_success(path);
                }
                Err(e) if e.is_table_scoped() => {
                    warn!("{}: skipped, {}", table.table_name, e);
                    report.record_failure(&table.table_name, &e);
                }
                Err(e) => return Err(e),
            }
        }

        report.duration_seconds = start.elapsed().as_secs_f64();
        info!(
            "Class generation finished: {}/{} tables in {:.2}s",
            report.tables_success, report.tables_total, report.duration_seconds
        );
        Ok(report)
    }

    /// Generate one INSERT file per table.
    pub async fn generate_inserts(&self, job: &InsertJob) -> Result<GenerationReport> {
        self.generate_inserts_as_of(job, Local::now().date_naive()).await
    }

    /// Generate inserts with an explicit "today" bounding date-time literals.
    pub async fn generate_inserts_as_of(
        &self,
        job: &InsertJob,
        today: NaiveDate,
    ) -> Result<GenerationReport> {
        let start = Instant::now();
        let mut report = GenerationReport::start("inserts", job.tables.len());
        let options = InsertOptions {
            include_nullable: job.include_nullable,
        };

        info!(
            "Generating {} INSERT statements ({}) from {} catalog into {:?}",
            job.tables.len(),
            if job.use_random_literals { "random literals" } else { "parameters" },
            self.catalog.source_type(),
            job.output_dir
        );

        for (index, table) in job.tables.iter().enumerate() {
            let result = if job.use_random_literals {
                let mut literals = RandomLiterals::new(table_rng(job.seed, index), today);
                self.insert_text(table, &options, &mut literals).await
            } else {
                self.insert_text(table, &options, &mut Parameters).await
            };

            match result {
                Ok(text) => {
                    let path = job
                        .output_dir
                        .join(format!("insert_{}.sql", table.full_table_name));
                    self.sink.write_artifact(&path, &text)?;
                    info!("{}: wrote {:?}", table.table_name, path);
                    report.record_success(path);
                }
                Err(e) if e.is_table_scoped() => {
                    warn!("{}: skipped, {}", table.table_name, e);
                    report.record_failure(&table.table_name, &e);
                }
                Err(e) => return Err(e),
            }
        }

        report.duration_seconds = start.elapsed().as_secs_f64();
        info!(
            "Insert generation finished: {}/{} tables in {:.2}s",
            report.tables_success, report.tables_total, report.duration_seconds
        );
        Ok(report)
    }
}

/// Fresh generator per table; no state carries over between tables.
fn table_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawColumn;
    use crate::source::JsonCatalog;
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySink {
        files: Mutex<BTreeMap<PathBuf, String>>,
    }

    impl MemorySink {
        fn get(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }

        fn len(&self) -> usize {
            self.files.lock().unwrap().len()
        }
    }

    impl ArtifactSink for MemorySink {
        fn write_artifact(&self, path: &Path, text: &str) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), text.to_string());
            Ok(())
        }
    }

    fn catalog() -> JsonCatalog {
        JsonCatalog::default()
            .with_table(
                "tOrder",
                vec![
                    RawColumn::new("dCreated", "datetime", 3),
                    RawColumn::new("kOrder", "int", 1).identity(),
                    RawColumn::new("kCustomer", "int", 2),
                    RawColumn::new("cRowVersion", "timestamp", 4).with_max_length(8),
                ],
            )
            .with_table(
                "tBroken",
                vec![
                    RawColumn::new("kBroken", "int", 1),
                    RawColumn::new("kbad", "int", 2),
                ],
            )
            .with_table(
                "tPlace",
                vec![
                    RawColumn::new("kPlace", "int", 1).identity(),
                    RawColumn::new("cShape", "geography", 2),
                ],
            )
    }

    fn class_job(tables: &[(&str, &str)]) -> ClassJob {
        ClassJob {
            connection: "shop".into(),
            output_dir: PathBuf::from("out"),
            namespace: None,
            emit_imports: false,
            tables: tables
                .iter()
                .map(|(t, c)| ClassTable {
                    table_name: t.to_string(),
                    class_name: c.to_string(),
                })
                .collect(),
        }
    }

    fn insert_job(random: bool, tables: &[(&str, &str)]) -> InsertJob {
        InsertJob {
            connection: "shop".into(),
            output_dir: PathBuf::from("sql"),
            include_nullable: false,
            use_random_literals: random,
            seed: Some(5),
            tables: tables
                .iter()
                .map(|(t, f)| InsertTable {
                    table_name: t.to_string(),
                    full_table_name: f.to_string(),
                })
                .collect(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_classes_written_per_table() {
        let generator = Generator::new(catalog(), MemorySink::default());
        let report = generator
            .generate_classes(&class_job(&[("tOrder", "Order"), ("tPlace", "Place")]))
            .await
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.tables_success, 2);
        let order = generator.sink().get("out/Order.cs").unwrap();
        assert!(order.contains("public int Id { get; set; }"));
        assert!(order.contains("public int CustomerId { get; set; }"));
        assert!(generator.sink().get("out/Place.cs").unwrap().contains("object Shape"));
    }

    #[tokio::test]
    async fn test_format_error_fails_only_that_table() {
        let generator = Generator::new(catalog(), MemorySink::default());
        let report = generator
            .generate_classes(&class_job(&[("tBroken", "Broken"), ("tOrder", "Order")]))
            .await
            .unwrap();

        assert!(!report.is_success());
        assert_eq!(report.tables_success, 1);
        assert_eq!(report.failed_tables.len(), 1);
        assert_eq!(report.failed_tables[0].table, "tBroken");
        assert!(report.failed_tables[0].error.contains("kbad"));
        assert!(generator.sink().get("out/Broken.cs").is_none());
        assert_eq!(generator.sink().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_table_stops_the_job() {
        let generator = Generator::new(catalog(), MemorySink::default());
        let err = generator
            .generate_classes(&class_job(&[("tOrder", "Order"), ("tNope", "Nope"), ("tPlace", "Place")]))
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Catalog(_)));
        assert!(generator.sink().get("out/Order.cs").is_some());
        assert!(generator.sink().get("out/Place.cs").is_none());
    }

    #[tokio::test]
    async fn test_inserts_with_parameters() {
        let generator = Generator::new(catalog(), MemorySink::default());
        let report = generator
            .generate_inserts_as_of(&insert_job(false, &[("tOrder", "dbo.tOrder")]), today())
            .await
            .unwrap();

        assert!(report.is_success());
        let sql = generator.sink().get("sql/insert_dbo.tOrder.sql").unwrap();
        assert_eq!(
            sql,
            "INSERT INTO dbo.tOrder (\nkCustomer\n,dCreated\n) VALUES (\n@kCustomer\n,@dCreated\n)\n"
        );
    }

    #[tokio::test]
    async fn test_random_mode_unsupported_type_fails_table() {
        let generator = Generator::new(catalog(), MemorySink::default());
        let report = generator
            .generate_inserts_as_of(
                &insert_job(true, &[("tPlace", "dbo.tPlace"), ("tOrder", "dbo.tOrder")]),
                today(),
            )
            .await
            .unwrap();

        assert_eq!(report.tables_success, 1);
        assert_eq!(report.failed_tables[0].table, "tPlace");
        assert!(generator.sink().get("sql/insert_dbo.tPlace.sql").is_none());
        assert!(generator.sink().get("sql/insert_dbo.tOrder.sql").is_some());
    }

    #[tokio::test]
    async fn test_seeded_random_inserts_are_reproducible() {
        let job = insert_job(true, &[("tOrder", "dbo.tOrder")]);

        let first = Generator::new(catalog(), MemorySink::default());
        first.generate_inserts_as_of(&job, today()).await.unwrap();
        let second = Generator::new(catalog(), MemorySink::default());
        second.generate_inserts_as_of(&job, today()).await.unwrap();

        assert_eq!(
            first.sink().get("sql/insert_dbo.tOrder.sql"),
            second.sink().get("sql/insert_dbo.tOrder.sql")
        );
    }

    /// Plain-text dialect: one `name: type` line per field.
    struct OutlineDialect;

    static CSHARP: CSharpDialect = CSharpDialect;

    impl ClassDialect for OutlineDialect {
        fn name(&self) -> &str {
            "outline"
        }

        fn file_extension(&self) -> &str {
            "txt"
        }

        fn imports(&self) -> &[&str] {
            &[]
        }

        fn type_name(&self, kind: crate::typemap::ScalarKind) -> &str {
            CSHARP.type_name(kind)
        }

        fn annotation(&self, _annotation: &crate::core::Annotation) -> String {
            "#".to_string()
        }

        fn table_annotation(&self, table_name: &str) -> String {
            format!("table {}", table_name)
        }

        fn initializer(&self, _initializer: crate::core::Initializer) -> &str {
            "empty"
        }

        fn namespace_declaration(&self, namespace: &str) -> String {
            format!("module {}", namespace)
        }

        fn class_declaration(&self, class_name: &str) -> String {
            format!("record {}", class_name)
        }

        fn property_declaration(
            &self,
            type_name: &str,
            nullable: bool,
            property_name: &str,
            _initializer: Option<&str>,
        ) -> String {
            format!("{}: {}{}", property_name, type_name, if nullable { "?" } else { "" })
        }
    }

    #[tokio::test]
    async fn test_custom_dialect_drives_file_name_and_text() {
        let generator = Generator::new(catalog(), MemorySink::default()).with_dialect(OutlineDialect);
        let report = generator
            .generate_classes(&class_job(&[("tOrder", "Order")]))
            .await
            .unwrap();

        assert_eq!(report.artifacts, vec![PathBuf::from("out/Order.txt")]);
        assert!(generator.sink().get("out/Order.cs").is_none());
        let text = generator.sink().get("out/Order.txt").unwrap();
        assert!(text.starts_with("table tOrder\nrecord Order\n{\n"));
        assert!(text.contains("    Id: int\n"));
        assert!(text.contains("    CreatedTime: DateTime\n"));
    }

    #[test]
    fn test_report_json() {
        let mut report = GenerationReport::start("classes", 2);
        report.record_success(PathBuf::from("out/Order.cs"));
        report.record_failure("tBroken", &ScaffoldError::NoInsertableColumns("tBroken".into()));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"tables_success\": 1"));
        assert!(json.contains("tBroken"));
    }
}
