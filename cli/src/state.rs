//! Self-port state kept in a file beside the configuration.
//!
//! Each `portscope port` run is a fresh process, so the chosen port has to
//! live on disk for the next run to find it.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use portscope_core::SelfPortState;
use tracing::warn;

/// File name of the remembered port, in the config directory.
pub const ASSIGNED_PORT_FILE: &str = "assigned-port";

/// [`SelfPortState`] backed by a small text file.
pub struct FilePortState {
    path: PathBuf,
}

impl FilePortState {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// State file in the same directory as `config_path`.
    pub fn beside(config_path: &Path) -> Self {
        Self::new(config_path.with_file_name(ASSIGNED_PORT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelfPortState for FilePortState {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "Failed to read assigned port");
                }
                None
            }
        }
    }

    fn store(&self, port: u16) {
        if let Some(dir) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!(path = %dir.display(), error = %e, "Failed to create state directory");
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, format!("{}\n", port)) {
            warn!(path = %self.path.display(), error = %e, "Failed to remember assigned port");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                warn!(path = %self.path.display(), error = %e, "Failed to forget assigned port");
            }
            _ => {}
        }
    }
}
