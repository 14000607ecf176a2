use crate::storage::FileUpload;

/// Upload cap for observation photos.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;
/// Upload cap for PDF documents.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Content types accepted for observation photos.
pub const PHOTO_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Document taxonomy an inspector can tag an upload with.
pub const DOCUMENT_TYPE_TAGS: &[&str] = &[
    "dpe",
    "diagnostic_bruit",
    "diagnostic_amiante",
    "diagnostic_plomb",
    "diagnostic_termites",
    "plan",
    "rapport",
    "autre",
];

/// File-type tag recorded for observation photos.
pub const PHOTO_TYPE_TAG: &str = "photo";

/// Observation submitted from the site-detail view. The photo is
/// optional; inspectors often file text-only notes from the field.
#[derive(Debug, Default)]
pub struct ObservationForm {
    pub title: String,
    pub observation: Option<String>,
    pub photo: Option<FileUpload>,
}

impl ObservationForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Missing { field: "title" });
        }
        if let Some(photo) = &self.photo {
            if photo.len() > MAX_PHOTO_BYTES {
                return Err(ValidationError::TooLarge { limit_mb: 5 });
            }
            let essence = photo.content_type.essence_str();
            if !PHOTO_CONTENT_TYPES.contains(&essence) {
                return Err(ValidationError::UnsupportedType {
                    given: essence.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// PDF document upload (diagnostics, plans, reports).
#[derive(Debug, Default)]
pub struct DocumentForm {
    pub file_type: String,
    pub label: String,
    pub observation: Option<String>,
    pub file: Option<FileUpload>,
}

impl DocumentForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !DOCUMENT_TYPE_TAGS.contains(&self.file_type.as_str()) {
            return Err(ValidationError::UnknownDocumentTag {
                given: self.file_type.clone(),
            });
        }
        if self.label.trim().is_empty() {
            return Err(ValidationError::Missing { field: "label" });
        }
        let file = self
            .file
            .as_ref()
            .ok_or(ValidationError::Missing { field: "file" })?;
        if file.len() > MAX_DOCUMENT_BYTES {
            return Err(ValidationError::TooLarge { limit_mb: 10 });
        }
        if file.content_type.essence_str() != mime::APPLICATION_PDF.essence_str() {
            return Err(ValidationError::UnsupportedType {
                given: file.content_type.essence_str().to_string(),
            });
        }
        Ok(())
    }
}

/// User-correctable form failure; nothing is persisted when raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("file exceeds the {limit_mb} MB limit")]
    TooLarge { limit_mb: u32 },
    #[error("unsupported content type '{given}'")]
    UnsupportedType { given: String },
    #[error("unknown document type '{given}'")]
    UnknownDocumentTag { given: String },
    #[error("malformed upload request: {0}")]
    Multipart(String),
}
