//! Local files and selection validation.

use std::sync::Arc;

use crate::config::{ACCEPTED_EXTENSIONS, ACCEPTED_MIME_PREFIX, MAX_FILE_SIZE};
use crate::error::{ValidationError, ValidationResult};
use crate::state::PreviewRef;

/// A file picked by the user.
///
/// Implemented for `web_sys::File` in the frontend and by [`InMemoryFile`]
/// natively.
pub trait LocalFile {
    /// Filename as reported by the platform (no directory part).
    fn name(&self) -> String;

    /// Size in bytes.
    fn size(&self) -> u64;

    /// MIME type, possibly empty.
    fn mime(&self) -> String;

    /// A locally resolvable reference to the file's bytes, for the original
    /// image panel. `None` when the platform cannot produce one.
    fn preview(&self) -> Option<PreviewRef>;
}

/// An image held in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InMemoryFile {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension.
    pub fn read(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = match extension(&name).as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            _ => "",
        };
        Ok(Self::new(name, mime, bytes))
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }
}

impl LocalFile for InMemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn mime(&self) -> String {
        self.mime.clone()
    }

    fn preview(&self) -> Option<PreviewRef> {
        Some(PreviewRef::new(format!("memory:{}", self.name)))
    }
}

/// Lowercase extension of a filename, if any.
fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() && ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Check a single file against the size and type rules.
///
/// Size is checked first, so an oversized file of the wrong type reports
/// the size problem.
pub fn validate_file<F: LocalFile>(file: &F) -> ValidationResult<()> {
    let size = file.size();
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge { size });
    }

    let name = file.name();
    let mime = file.mime();
    let mime_ok = mime.is_empty() || mime.to_ascii_lowercase().starts_with(ACCEPTED_MIME_PREFIX);
    let ext_ok = extension(&name).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));

    if !(mime_ok && ext_ok) {
        return Err(ValidationError::UnsupportedType { name, mime });
    }
    Ok(())
}

/// Validate a drop/selection and take its only file.
pub fn validate_selection<F: LocalFile>(files: Vec<F>) -> ValidationResult<F> {
    let count = files.len();
    let mut files = files.into_iter();
    match (files.next(), count) {
        (None, _) => Err(ValidationError::NoFile),
        (Some(file), 1) => {
            validate_file(&file)?;
            Ok(file)
        }
        (Some(_), n) => Err(ValidationError::TooManyFiles(n)),
    }
}
