//! Repository port for learning session persistence.

use std::path::Path;

use crate::{Result, q_learning::SavedSession};

/// Port for persisting and loading learning sessions.
///
/// The learning agent stores its session after every request, so `save`
/// must replace the previous contents of `path` completely.
///
/// # Examples
///
/// ```no_run
/// use gridmind::ports::SessionRepository;
/// use gridmind::q_learning::SavedSession;
/// use std::path::Path;
///
/// fn checkpoint<R: SessionRepository>(
///     repo: &R,
///     session: &SavedSession,
///     path: &Path,
/// ) -> gridmind::Result<()> {
///     repo.save(session, path)
/// }
/// ```
pub trait SessionRepository {
    /// Save a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, session: &SavedSession, path: &Path) -> Result<()>;

    /// Load a session.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path` or the stored bytes
    /// are not a valid session.
    fn load(&self, path: &Path) -> Result<SavedSession>;

    /// Whether a session is stored at `path`
    fn exists(&self, path: &Path) -> bool;
}
