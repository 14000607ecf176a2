//! Filesystem persistence for uploaded photos and documents.
//!
//! Stored names are derived from the client file name: the stem is
//! slugged down to ASCII, a random token guarantees uniqueness, and the
//! original extension is kept. Photos and documents land in separate
//! directories fixed at construction time.

use std::fs;
use std::path::{Path, PathBuf};

use mime::Mime;
use tracing::warn;
use uuid::Uuid;

use crate::config::StorageConfig;

/// Which directory an upload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Photo,
    Document,
}

/// An uploaded file as received from the request layer.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub data: Vec<u8>,
    pub original_name: String,
    pub content_type: Mime,
}

impl FileUpload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Extension of the client file name, without the dot.
    pub fn extension(&self) -> Option<&str> {
        Path::new(&self.original_name)
            .extension()
            .and_then(|ext| ext.to_str())
    }

    fn stem(&self) -> &str {
        Path::new(&self.original_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to store '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Contract the upload flows depend on: persist bytes under a generated
/// name, or remove a previously stored file.
pub trait DocumentStore: Send + Sync {
    fn store(&self, upload: &FileUpload, kind: UploadKind) -> Result<String, StorageError>;

    /// `true` when the file existed and was removed; `false` when absent.
    /// Missing files are a soft outcome, never an error.
    fn delete(&self, stored_name: &str, kind: UploadKind) -> bool;
}

/// [`DocumentStore`] writing to two local directories, one per kind.
pub struct FilesystemDocumentStore {
    photo_dir: PathBuf,
    document_dir: PathBuf,
}

impl FilesystemDocumentStore {
    pub fn new(photo_dir: impl Into<PathBuf>, document_dir: impl Into<PathBuf>) -> Self {
        Self {
            photo_dir: photo_dir.into(),
            document_dir: document_dir.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.photo_dir.clone(), config.document_dir.clone())
    }

    pub fn photo_dir(&self) -> &Path {
        &self.photo_dir
    }

    pub fn document_dir(&self) -> &Path {
        &self.document_dir
    }

    pub fn directory_for(&self, kind: UploadKind) -> &Path {
        match kind {
            UploadKind::Photo => &self.photo_dir,
            UploadKind::Document => &self.document_dir,
        }
    }
}

impl DocumentStore for FilesystemDocumentStore {
    fn store(&self, upload: &FileUpload, kind: UploadKind) -> Result<String, StorageError> {
        let mut slug = slugify(upload.stem());
        if slug.is_empty() {
            slug = "fichier".to_string();
        }

        let token = Uuid::new_v4().simple();
        let stored_name = match upload.extension() {
            Some(ext) => format!("{slug}-{token}.{}", ext.to_ascii_lowercase()),
            None => format!("{slug}-{token}"),
        };

        let directory = self.directory_for(kind);
        fs::create_dir_all(directory).map_err(|source| StorageError::Io {
            name: stored_name.clone(),
            source,
        })?;
        fs::write(directory.join(&stored_name), &upload.data).map_err(|source| {
            StorageError::Io {
                name: stored_name.clone(),
                source,
            }
        })?;

        Ok(stored_name)
    }

    fn delete(&self, stored_name: &str, kind: UploadKind) -> bool {
        // Generated names never contain separators; anything else is not ours.
        if stored_name.contains(['/', '\\']) {
            return false;
        }

        let path = self.directory_for(kind).join(stored_name);
        if !path.exists() {
            return false;
        }

        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(error) => {
                warn!(file = %path.display(), %error, "failed to remove stored file");
                false
            }
        }
    }
}

/// Reduce a file-name stem to ASCII letters, digits, and single dashes.
fn slugify(stem: &str) -> String {
    let mut slug = String::with_capacity(stem.len());
    let mut pending_dash = false;

    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if let Some(mapped) = transliterate(ch) {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push_str(mapped);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Accented Latin characters common in French file names; anything else
/// non-alphanumeric becomes a separator.
fn transliterate(ch: char) -> Option<&'static str> {
    let mapped = match ch {
        'à' | 'â' | 'ä' => "a",
        'À' | 'Â' | 'Ä' => "A",
        'ç' => "c",
        'Ç' => "C",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'É' | 'È' | 'Ê' | 'Ë' => "E",
        'î' | 'ï' => "i",
        'Î' | 'Ï' => "I",
        'ô' | 'ö' => "o",
        'Ô' | 'Ö' => "O",
        'ù' | 'û' | 'ü' => "u",
        'Ù' | 'Û' | 'Ü' => "U",
        'œ' => "oe",
        'Œ' => "OE",
        'æ' => "ae",
        'Æ' => "AE",
        _ => return None,
    };
    Some(mapped)
}
