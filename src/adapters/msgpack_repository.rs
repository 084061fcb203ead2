//! MessagePack implementation of the session repository.
//!
//! Sessions are written to a sibling temporary file first and then renamed
//! over the target, so a failed write leaves the previous session intact. The
//! temporary file is removed when any step fails.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{Result, error::Error, ports::SessionRepository, q_learning::SavedSession};

/// MessagePack-based session repository.
///
/// # Examples
///
/// ```no_run
/// use gridmind::adapters::MsgPackRepository;
/// use gridmind::game::GameRules;
/// use gridmind::ports::SessionRepository;
/// use gridmind::q_learning::SavedSession;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let session = SavedSession::empty(&GameRules::connect_four(), 0.9);
///
/// repo.save(&session, Path::new("state/connect4_session.msgpack"))?;
/// let loaded = repo.load(Path::new("state/connect4_session.msgpack"))?;
/// # Ok::<(), gridmind::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_then_rename(session: &SavedSession, tmp: &Path, path: &Path) -> Result<()> {
    let file = File::create(tmp).map_err(|source| Error::Io {
        operation: format!("create file {tmp:?}"),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    rmp_serde::encode::write(&mut writer, session).map_err(|e| Error::SerializationContext {
        operation: "serialize session to MessagePack".to_string(),
        message: e.to_string(),
    })?;
    writer.flush().map_err(|source| Error::Io {
        operation: format!("write file {tmp:?}"),
        source,
    })?;
    drop(writer);

    fs::rename(tmp, path).map_err(|source| Error::Io {
        operation: format!("rename {tmp:?} to {path:?}"),
        source,
    })
}

impl SessionRepository for MsgPackRepository {
    fn save(&self, session: &SavedSession, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                operation: format!("create directory {parent:?}"),
                source,
            })?;
        }

        let tmp = temp_path(path);
        let result = write_then_rename(session, &tmp, path);
        if result.is_err() {
            // Best effort, the write error is returned
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn load(&self, path: &Path) -> Result<SavedSession> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize session from MessagePack".to_string(),
                message: e.to_string(),
            }
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
