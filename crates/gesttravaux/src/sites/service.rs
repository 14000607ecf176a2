use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    ConstructionSite, DocumentDraft, DocumentRecord, InspectorId, SiteId, SiteStatus,
};
use super::forms::{DocumentForm, ObservationForm, ValidationError, PHOTO_TYPE_TAG};
use super::repository::{RepositoryError, SiteAggregate, SiteRepository};
use super::views::{DashboardStats, DashboardView, SiteSummaryView};
use crate::storage::{DocumentStore, StorageError, UploadKind};

/// Inspector-facing site operations. Every call takes the caller's
/// resolved inspector id; the ownership check runs before anything is
/// read out or written.
pub struct SiteAccessService<R, S> {
    repository: Arc<R>,
    store: Arc<S>,
}

impl<R, S> SiteAccessService<R, S>
where
    R: SiteRepository + 'static,
    S: DocumentStore + 'static,
{
    pub fn new(repository: Arc<R>, store: Arc<S>) -> Self {
        Self { repository, store }
    }

    /// Fetch the fully hydrated aggregate for a site the caller is
    /// assigned to. Unassigned and foreign sites are denied without
    /// exposing any site data.
    pub fn site_for_inspector(
        &self,
        site: SiteId,
        caller: InspectorId,
    ) -> Result<SiteAggregate, SiteAccessError> {
        let aggregate = self
            .repository
            .hydrate_full(site)?
            .ok_or(SiteAccessError::NotFound)?;

        if aggregate.site.inspector_id != Some(caller) {
            warn!(site = site.0, inspector = caller.0, "site access denied");
            return Err(SiteAccessError::Forbidden);
        }

        Ok(aggregate)
    }

    pub fn sites_for_inspector(
        &self,
        caller: InspectorId,
    ) -> Result<Vec<ConstructionSite>, SiteAccessError> {
        Ok(self.repository.list_by_inspector(caller)?)
    }

    pub fn active_sites_for_inspector(
        &self,
        caller: InspectorId,
    ) -> Result<Vec<ConstructionSite>, SiteAccessError> {
        Ok(self.repository.list_active_by_inspector(caller)?)
    }

    /// Site listing plus per-status counts for the dashboard screen.
    pub fn dashboard(&self, caller: InspectorId) -> Result<DashboardView, SiteAccessError> {
        let sites = self.repository.list_by_inspector(caller)?;
        let stats = DashboardStats {
            pending: self
                .repository
                .count_by_inspector_and_status(caller, SiteStatus::Pending)?,
            in_progress: self
                .repository
                .count_by_inspector_and_status(caller, SiteStatus::InProgress)?,
            completed: self
                .repository
                .count_by_inspector_and_status(caller, SiteStatus::Completed)?,
        };

        Ok(DashboardView {
            sites: sites.iter().map(SiteSummaryView::from_site).collect(),
            stats,
        })
    }

    /// File an observation, optionally with a photo. The stored photo
    /// reference is only recorded after the file write succeeds.
    pub fn add_observation(
        &self,
        site: SiteId,
        caller: InspectorId,
        form: ObservationForm,
    ) -> Result<DocumentRecord, SiteAccessError> {
        self.authorize(site, caller)?;
        form.validate()?;

        let file_name = match &form.photo {
            Some(photo) => Some(self.store.store(photo, UploadKind::Photo)?),
            None => None,
        };

        let record = self.repository.attach_document(
            site,
            DocumentDraft {
                label: form.title,
                file_name,
                uploaded_at: Utc::now(),
                file_type: PHOTO_TYPE_TAG.to_string(),
                observation: form.observation,
            },
        )?;

        info!(
            site = site.0,
            document = record.id.0,
            has_photo = record.file_name.is_some(),
            "observation recorded"
        );
        Ok(record)
    }

    /// Upload a PDF document and attach it to the site, overwriting the
    /// previous document reference.
    pub fn upload_document(
        &self,
        site: SiteId,
        caller: InspectorId,
        form: DocumentForm,
    ) -> Result<DocumentRecord, SiteAccessError> {
        self.authorize(site, caller)?;
        form.validate()?;

        let file = form
            .file
            .as_ref()
            .ok_or(ValidationError::Missing { field: "file" })?;
        let stored_name = self.store.store(file, UploadKind::Document)?;

        let record = self.repository.attach_document(
            site,
            DocumentDraft {
                label: form.label,
                file_name: Some(stored_name),
                uploaded_at: Utc::now(),
                file_type: form.file_type,
                observation: form.observation,
            },
        )?;

        info!(site = site.0, document = record.id.0, "document attached");
        Ok(record)
    }

    /// The document currently attached to a site, for download surfaces.
    pub fn site_document(
        &self,
        site: SiteId,
        caller: InspectorId,
    ) -> Result<DocumentRecord, SiteAccessError> {
        let row = self.authorize(site, caller)?;
        let document_id = row.document_id.ok_or(SiteAccessError::NotFound)?;
        let record = self
            .repository
            .document(document_id)?
            .ok_or(SiteAccessError::NotFound)?;
        Ok(record)
    }

    /// Shared ownership check for the mutating flows: the site must exist
    /// and be assigned to the caller.
    fn authorize(
        &self,
        site: SiteId,
        caller: InspectorId,
    ) -> Result<ConstructionSite, SiteAccessError> {
        let row = self
            .repository
            .fetch(site)?
            .ok_or(SiteAccessError::NotFound)?;

        if row.inspector_id != Some(caller) {
            warn!(site = site.0, inspector = caller.0, "site write denied");
            return Err(SiteAccessError::Forbidden);
        }

        Ok(row)
    }
}

/// Error raised by the site access service.
#[derive(Debug, thiserror::Error)]
pub enum SiteAccessError {
    #[error("site not found")]
    NotFound,
    #[error("access denied to this site")]
    Forbidden,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
