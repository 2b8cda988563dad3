use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::api::Session;
use crate::error::AppError;
use crate::utils::debug_log;

/// Cookie jar on disk (`session.json`)
pub(crate) struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Stored cookies, or `None` when the file is missing, unreadable or empty
    pub(crate) fn load(&self) -> Option<Session> {
        let file = File::open(&self.path).ok()?;
        match serde_json::from_reader::<_, Session>(BufReader::new(file)) {
            Ok(session) if !session.is_empty() => Some(session),
            Ok(_) => None,
            Err(e) => {
                debug_log!("Ignoring unreadable {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub(crate) fn save(&self, session: &Session) -> Result<(), AppError> {
        self.write(session).map_err(|source| AppError::SessionSave {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write(&self, session: &Session) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, session)?;
        writer.flush()
    }
}
