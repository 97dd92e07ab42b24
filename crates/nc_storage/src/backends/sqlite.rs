use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use nc_core::{AnalysisRequest, AnalysisResult, AnalysisStore, Error, RecordId, Result, StoredRecord};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS analyses (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        is_fake INTEGER NOT NULL,
        confidence INTEGER NOT NULL,
        features TEXT NOT NULL,
        explanation TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS analyses_created_at ON analyses (created_at)",
];

/// Fixed-width timestamps so that text order is chronological order.
fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn storage_error(action: &str, e: impl std::fmt::Display) -> Error {
    Error::Storage(format!("Failed to {}: {}", action, e))
}

pub struct SQLiteStorage {
    pool: SqlitePool,
}

impl SQLiteStorage {
    /// Connect using a `sqlite:` URL, creating the database file if needed.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| Error::Config(format!("Invalid SQLite URL '{}': {}", url, e)))?
            .create_if_missing(true);

        // every connection to an in-memory database is a separate database
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| storage_error("connect to database", e))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| storage_error(&format!("run migration {}", i), e))?;
        }

        Ok(Self { pool })
    }

    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::connect(&format!("sqlite:{}", db_path.display())).await
    }

    fn record_from_row(row: &SqliteRow) -> Result<StoredRecord> {
        let features: String = row.get("features");
        let confidence: i64 = row.get("confidence");
        let created_at: String = row.get("created_at");

        Ok(StoredRecord {
            id: row.get("id"),
            title: row.get("title"),
            content: row.get("content"),
            is_fake: row.get("is_fake"),
            confidence: u8::try_from(confidence)
                .map_err(|e| storage_error("read confidence", e))?,
            features: serde_json::from_str(&features)?,
            explanation: row.get("explanation"),
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| storage_error("parse date", e))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl AnalysisStore for SQLiteStorage {
    async fn save(&self, request: &AnalysisRequest, result: &AnalysisResult) -> Result<RecordId> {
        let record = StoredRecord::new(request, result);
        let features = serde_json::to_string(&record.features)?;

        sqlx::query(
            r#"
            INSERT INTO analyses
            (id, title, content, is_fake, confidence, features, explanation, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.title)
        .bind(&record.content)
        .bind(record.is_fake)
        .bind(i64::from(record.confidence))
        .bind(features)
        .bind(&record.explanation)
        .bind(format_timestamp(&record.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("store analysis", e))?;

        Ok(record.id)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<StoredRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM analyses
            ORDER BY created_at DESC, seq DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list analyses", e))?;

        rows.iter().map(Self::record_from_row).collect()
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let outcome = sqlx::query("DELETE FROM analyses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete analysis", e))?;

        Ok(outcome.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn request(title: &str) -> AnalysisRequest {
        AnalysisRequest::new(title, "This is a test article about a local bakery award.")
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            is_fake: true,
            confidence: 81,
            features: vec!["Anonymous sources".to_string(), "Loaded wording".to_string()],
            explanation: "Claims could not be verified".to_string(),
        }
    }

    #[test]
    fn test_timestamps_are_fixed_width() {
        let whole = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z").unwrap().with_timezone(&Utc);
        let fraction = DateTime::parse_from_rfc3339("2024-05-01T10:00:00.5Z").unwrap().with_timezone(&Utc);
        assert_eq!(format_timestamp(&whole).len(), format_timestamp(&fraction).len());
        assert!(format_timestamp(&whole) < format_timestamp(&fraction));
    }

    #[tokio::test]
    async fn test_sqlite_storage() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let storage = SQLiteStorage::new_with_path(&db_path).await.unwrap();
        let id = storage.save(&request("Stored"), &result()).await.unwrap();

        let records = storage.list_recent(10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].title, "Stored");
        assert_eq!(records[0].result(), result());
    }

    #[tokio::test]
    async fn test_sqlite_persists_across_connections() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let id = {
            let storage = SQLiteStorage::new_with_path(&db_path).await.unwrap();
            storage.save(&request("Durable"), &result()).await.unwrap()
        };

        let reopened = SQLiteStorage::new_with_path(&db_path).await.unwrap();
        let records = reopened.list_recent(10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
    }

    #[tokio::test]
    async fn test_sqlite_list_recent_newest_first() {
        let temp_dir = tempdir().unwrap();
        let storage = SQLiteStorage::new_with_path(&temp_dir.path().join("test.db"))
            .await
            .unwrap();

        for i in 0..12 {
            storage.save(&request(&format!("Article {}", i)), &result()).await.unwrap();
        }

        let records = storage.list_recent(10).await.unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[0].title, "Article 11");
        assert_eq!(records[9].title, "Article 2");
    }

    #[tokio::test]
    async fn test_sqlite_delete_by_id() {
        let temp_dir = tempdir().unwrap();
        let storage = SQLiteStorage::new_with_path(&temp_dir.path().join("test.db"))
            .await
            .unwrap();

        let id = storage.save(&request("Doomed"), &result()).await.unwrap();
        assert!(storage.delete_by_id(&id).await.unwrap());
        assert!(!storage.delete_by_id(&id).await.unwrap());
        assert!(storage.list_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_url() {
        let storage = SQLiteStorage::connect("sqlite::memory:").await.unwrap();
        storage.save(&request("Ephemeral"), &result()).await.unwrap();
        assert_eq!(storage.list_recent(10).await.unwrap().len(), 1);
    }
}
