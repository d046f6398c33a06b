//! In-process document repository.

use super::DocumentRepository;
use crate::types::{Document, NewDocument};
use docqa_core::{AppError, AppResult};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct State {
    next_id: i64,
    documents: BTreeMap<i64, Document>,
}

/// Repository that keeps records in memory. Ids start at 1.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    state: RwLock<State>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| AppError::Storage("Document store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| AppError::Storage("Document store lock poisoned".to_string()))
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    fn find_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        Ok(self.read()?.documents.get(&id).cloned())
    }

    fn find_all(&self) -> AppResult<Vec<Document>> {
        Ok(self.read()?.documents.values().cloned().collect())
    }

    fn exists_by_file_name(&self, file_name: &str) -> AppResult<bool> {
        Ok(self
            .read()?
            .documents
            .values()
            .any(|d| d.file_name == file_name))
    }

    fn save(&self, document: NewDocument) -> AppResult<Document> {
        let mut state = self.write()?;

        if state
            .documents
            .values()
            .any(|d| d.file_name == document.file_name)
        {
            return Err(AppError::DocumentAlreadyExists(document.file_name));
        }

        state.next_id += 1;
        let saved = document.into_document(state.next_id);
        state.documents.insert(saved.id, saved.clone());

        Ok(saved)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.write()?.documents.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docqa_core::DocumentCategory;

    fn new_doc(file_name: &str) -> NewDocument {
        NewDocument {
            name: "doc".to_string(),
            category: DocumentCategory::Undefined,
            file_name: file_name.to_string(),
            file_path: "uploads/x.txt".to_string(),
            uploaded_by: "bob".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let repo = InMemoryDocumentRepository::new();
        let a = repo.save(new_doc("a.txt")).unwrap();
        let b = repo.save(new_doc("b.txt")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        assert!(repo.delete(b.id).unwrap());
        let c = repo.save(new_doc("c.txt")).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_duplicate_rejected() {
        let repo = InMemoryDocumentRepository::new();
        repo.save(new_doc("a.txt")).unwrap();
        assert!(matches!(
            repo.save(new_doc("a.txt")),
            Err(AppError::DocumentAlreadyExists(_))
        ));
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }
}
