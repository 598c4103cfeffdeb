//! Saving the processed image.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SaveResult;

/// "Persist these bytes under this suggested name."
///
/// The browser implementation triggers a download; [`DirectorySink`]
/// writes to disk.
pub trait ImageSink {
    fn save(&self, bytes: &[u8], suggested_name: &str) -> SaveResult<()>;
}

/// Writes saved images into a directory, overwriting same-named files.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path a file saved as `suggested_name` ends up at.
    pub fn path_for(&self, suggested_name: &str) -> PathBuf {
        let name = Path::new(suggested_name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| crate::config::DOWNLOAD_FILENAME.into());
        self.dir.join(name)
    }
}

impl ImageSink for DirectorySink {
    fn save(&self, bytes: &[u8], suggested_name: &str) -> SaveResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(suggested_name);
        fs::write(&path, bytes)?;
        log::info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_saves_under_suggested_name() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("out"));
        sink.save(b"png-bytes", "removed_bg.png").unwrap();
        assert_eq!(fs::read(dir.path().join("out/removed_bg.png")).unwrap(), b"png-bytes");
    }

    #[test]
    fn test_suggested_name_cannot_escape_dir() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        assert_eq!(sink.path_for("../../etc/passwd"), dir.path().join("passwd"));
        assert_eq!(sink.path_for(".."), dir.path().join("removed_bg.png"));
    }
}
