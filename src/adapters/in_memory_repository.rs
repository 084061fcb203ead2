//! In-memory session repository for testing.

use std::{collections::HashMap, path::Path, sync::Arc};

use parking_lot::Mutex;

use crate::{Result, error::Error, ports::SessionRepository, q_learning::SavedSession};

/// In-memory repository keyed by path.
///
/// Sessions are stored as MessagePack bytes so that a round-trip exercises
/// the same serialization as the file repository. All clones share storage.
///
/// # Examples
///
/// ```
/// use gridmind::adapters::InMemoryRepository;
/// use gridmind::game::GameRules;
/// use gridmind::ports::SessionRepository;
/// use gridmind::q_learning::SavedSession;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let session = SavedSession::empty(&GameRules::tic_tac_toe(), 0.2);
/// repo.save(&session, Path::new("ttt"))?;
/// assert_eq!(repo.load(Path::new("ttt"))?, session);
/// # Ok::<(), gridmind::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub fn count(&self) -> usize {
        self.storage.lock().len()
    }

    pub fn clear(&self) {
        self.storage.lock().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage.lock().contains_key(&key(path))
    }

    /// Make every subsequent `save` fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock() = fail;
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl SessionRepository for InMemoryRepository {
    fn save(&self, session: &SavedSession, path: &Path) -> Result<()> {
        if *self.fail_saves.lock() {
            return Err(Error::Io {
                operation: format!("save session to in-memory storage at {path:?}"),
                source: std::io::Error::other("storage unavailable"),
            });
        }

        let bytes = rmp_serde::to_vec(session).map_err(|e| Error::SerializationContext {
            operation: "serialize session for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage.lock().insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedSession> {
        let storage = self.storage.lock();
        let bytes = storage.get(&key(path)).ok_or_else(|| Error::Io {
            operation: format!("load session from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize session from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameRules;

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let session = SavedSession::empty(&GameRules::connect_four(), 0.9);
        let path = Path::new("session");

        assert_eq!(repo.count(), 0);
        assert!(!repo.exists(path));

        repo.save(&session, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.exists(path));
        assert_eq!(repo.load(path).unwrap(), session);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).is_err());
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();
        let session = SavedSession::empty(&GameRules::tic_tac_toe(), 0.2);

        repo1.save(&session, Path::new("shared")).unwrap();
        assert_eq!(repo2.load(Path::new("shared")).unwrap(), session);

        repo2.clear();
        assert_eq!(repo1.count(), 0);
    }

    #[test]
    fn test_failing_saves() {
        let repo = InMemoryRepository::new();
        repo.fail_saves(true);
        let session = SavedSession::empty(&GameRules::tic_tac_toe(), 0.2);
        assert!(repo.save(&session, Path::new("x")).is_err());
        assert_eq!(repo.count(), 0);
    }
}
