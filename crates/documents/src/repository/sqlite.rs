//! SQLite-backed document repository.

use super::DocumentRepository;
use crate::types::{Document, NewDocument};
use chrono::{DateTime, Utc};
use docqa_core::{AppError, AppResult, DocumentCategory};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SELECT_COLUMNS: &str =
    "SELECT id, name, category, file_name, file_path, uploaded_by, uploaded_at FROM documents";

pub struct SqliteDocumentRepository {
    conn: Mutex<Connection>,
}

impl SqliteDocumentRepository {
    /// Open (or create) the database file and its schema.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!("Failed to create database directory: {}", e))
            })?;
        }

        let conn = Connection::open(db_path)
            .map_err(|e| AppError::Storage(format!("Failed to open SQLite database: {}", e)))?;

        tracing::debug!("Opened document database at {:?}", db_path);
        Self::with_connection(conn)
    }

    /// In-memory database, dropped with the repository.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::Storage(format!("Failed to open SQLite database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                file_name TEXT NOT NULL UNIQUE,
                file_path TEXT NOT NULL,
                uploaded_by TEXT NOT NULL,
                uploaded_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| AppError::Storage(format!("Failed to create tables: {}", e)))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Storage("Database connection lock poisoned".to_string()))
    }
}

fn row_to_document(row: &Row<'_>) -> rusqlite::Result<Document> {
    let category: String = row.get(2)?;
    let category = category
        .parse::<DocumentCategory>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))?;

    let uploaded_at: String = row.get(6)?;
    let uploaded_at = DateTime::parse_from_rfc3339(&uploaded_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Document {
        id: row.get(0)?,
        name: row.get(1)?,
        category,
        file_name: row.get(3)?,
        file_path: row.get(4)?,
        uploaded_by: row.get(5)?,
        uploaded_at,
    })
}

impl DocumentRepository for SqliteDocumentRepository {
    fn find_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        let conn = self.conn()?;

        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            params![id],
            row_to_document,
        )
        .optional()
        .map_err(|e| AppError::Storage(format!("Failed to load document {}: {}", id, e)))
    }

    fn find_all(&self) -> AppResult<Vec<Document>> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .map_err(|e| AppError::Storage(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], row_to_document)
            .map_err(|e| AppError::Storage(format!("Failed to query documents: {}", e)))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| AppError::Storage(format!("Failed to read document row: {}", e)))
    }

    fn exists_by_file_name(&self, file_name: &str) -> AppResult<bool> {
        let conn = self.conn()?;

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE file_name = ?1",
                params![file_name],
                |row| row.get(0),
            )
            .map_err(|e| AppError::Storage(format!("Failed to query documents: {}", e)))?;

        Ok(count > 0)
    }

    fn save(&self, document: NewDocument) -> AppResult<Document> {
        let conn = self.conn()?;

        let inserted = conn.execute(
            "INSERT INTO documents (name, category, file_name, file_path, uploaded_by, uploaded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                document.name,
                document.category.as_str(),
                document.file_name,
                document.file_path,
                document.uploaded_by,
                document.uploaded_at.to_rfc3339(),
            ],
        );

        match inserted {
            Ok(_) => Ok(document.into_document(conn.last_insert_rowid())),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(AppError::DocumentAlreadyExists(document.file_name))
            }
            Err(e) => Err(AppError::Storage(format!("Failed to insert document: {}", e))),
        }
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let conn = self.conn()?;

        let removed = conn
            .execute("DELETE FROM documents WHERE id = ?1", params![id])
            .map_err(|e| AppError::Storage(format!("Failed to delete document {}: {}", id, e)))?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_doc(file_name: &str, category: DocumentCategory) -> NewDocument {
        NewDocument {
            name: file_name.trim_end_matches(".pdf").to_string(),
            category,
            file_name: file_name.to_string(),
            file_path: format!("uploads/{}", file_name),
            uploaded_by: "alice".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_and_find() {
        let repo = SqliteDocumentRepository::open_in_memory().unwrap();

        let saved = repo.save(new_doc("policy.pdf", DocumentCategory::Policy)).unwrap();
        assert!(saved.id > 0);

        let loaded = repo.find_by_id(saved.id).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.category, DocumentCategory::Policy);

        assert!(repo.find_by_id(saved.id + 100).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_file_name() {
        let repo = SqliteDocumentRepository::open_in_memory().unwrap();
        repo.save(new_doc("a.pdf", DocumentCategory::Undefined)).unwrap();

        assert!(repo.exists_by_file_name("a.pdf").unwrap());
        assert!(!repo.exists_by_file_name("b.pdf").unwrap());

        let err = repo
            .save(new_doc("a.pdf", DocumentCategory::Report))
            .unwrap_err();
        assert!(matches!(err, AppError::DocumentAlreadyExists(name) if name == "a.pdf"));
    }

    #[test]
    fn test_find_all_ordered_and_delete() {
        let repo = SqliteDocumentRepository::open_in_memory().unwrap();
        let first = repo.save(new_doc("1.pdf", DocumentCategory::Manual)).unwrap();
        let second = repo.save(new_doc("2.pdf", DocumentCategory::Report)).unwrap();

        let all = repo.find_all().unwrap();
        assert_eq!(
            all.iter().map(|d| d.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        assert!(repo.delete(first.id).unwrap());
        assert!(!repo.delete(first.id).unwrap());
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("documents.sqlite");

        let saved = {
            let repo = SqliteDocumentRepository::open(&path).unwrap();
            repo.save(new_doc("kept.pdf", DocumentCategory::Policy)).unwrap()
        };

        let repo = SqliteDocumentRepository::open(&path).unwrap();
        assert_eq!(repo.find_by_id(saved.id).unwrap(), Some(saved));
    }
}
