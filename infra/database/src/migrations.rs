use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Schema scripts shipped with the binary, applied in order.
static MIGRATIONS: &[Migration] = &[Migration::new(
    "catalog",
    "0001",
    include_str!("../migrations/0001_songs.surql"),
)];

#[derive(Debug)]
pub(crate) struct Migration {
    pub name: &'static str,
    pub version: &'static str,
    pub script: &'static str,
}

impl Migration {
    #[must_use]
    pub(crate) const fn new(name: &'static str, version: &'static str, script: &'static str) -> Self {
        Self { name, version, script }
    }

    fn key(&self) -> String {
        format!("{}:{}", self.name, self.version)
    }

    pub(crate) fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.script.as_bytes()))
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration {
            name: self.name.to_owned(),
            version: self.version.to_owned(),
            checksum: self.checksum(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub name: String,
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        self.run_all(MIGRATIONS).await
    }

    async fn run_all(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let applied_migrations = self.get_migrations_map().await?;

        for migration in migrations {
            if let Some(applied) = applied_migrations.get(&migration.key()) {
                ensure_checksum_match(migration, &applied.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply_migration(migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply_migration(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{ name: $name, version: $version, checksum: $checksum }} RETURN NONE;
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(&query)
            .bind(("name", migration.name))
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum()))
            .await
            .context(format!("SQL execution failed at {}", migration.key()))?
            .check()
            .map_err(surrealdb::Error::from)
            .context(format!("Migration {} rejected", migration.key()))?;

        Ok(())
    }

    async fn get_migrations_map(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        self.db
            .query("DEFINE TABLE IF NOT EXISTS migration SCHEMALESS;")
            .await
            .context("Preparing migration table")?
            .check()
            .map_err(surrealdb::Error::from)?;

        let entries = self
            .db
            .query("SELECT name, version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing migrations map")?;

        Ok(entries
            .into_iter()
            .map(|entry| (format!("{}:{}", entry.name, entry.version), entry))
            .collect())
    }
}

fn ensure_checksum_match(migration: &Migration, existing: &str) -> Result<(), DatabaseError> {
    let checksum = migration.checksum();
    if existing != checksum {
        return Err(DatabaseError::Migration {
            message: format!(
                "Checksum mismatch for {} (expected {}, got {})",
                migration.key(),
                existing,
                checksum
            )
            .into(),
            context: Some("Migration already applied with different checksum".into()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::any::connect;

    async fn memory() -> Surreal<Any> {
        let db = connect("mem://").await.expect("mem engine");
        db.use_ns("test").use_db("migrations").await.expect("session");
        db
    }

    #[test]
    fn checksum_is_stable_hex_sha256() {
        let migration = Migration::new("t", "0001", "DEFINE TABLE t;");
        assert_eq!(migration.checksum(), migration.checksum());
        assert_eq!(migration.checksum().len(), 64);
    }

    #[tokio::test]
    async fn second_run_skips_applied_migrations() {
        let runner = MigrationRunner::new(memory().await);

        let first = runner.run().await.expect("first run");
        assert_eq!(first.applied.len(), MIGRATIONS.len());
        assert!(first.skipped.is_empty());

        let second = runner.run().await.expect("second run");
        assert!(second.applied.is_empty());
        assert_eq!(second.skipped.len(), MIGRATIONS.len());
    }

    #[tokio::test]
    async fn changed_script_is_rejected() {
        let runner = MigrationRunner::new(memory().await);
        let original = [Migration::new("t", "0001", "DEFINE TABLE IF NOT EXISTS t SCHEMALESS;")];
        runner.run_all(&original).await.expect("apply original");

        let edited = [Migration::new("t", "0001", "DEFINE TABLE IF NOT EXISTS t SCHEMAFULL;")];
        let err = runner.run_all(&edited).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Migration { .. }));
    }
}
