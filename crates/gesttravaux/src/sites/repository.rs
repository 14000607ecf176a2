use serde::Serialize;

use super::domain::{
    ConstructionSite, Contractor, DocumentDraft, DocumentId, DocumentRecord, Inspector,
    InspectorId, Owner, Property, Quote, ServiceCategory, ServiceOffering, SiteId, SiteStatus,
};

/// A site with every relation resolved for display: the property and its
/// owner, the assigned inspector, and each quote with its offering,
/// category, and contractor. Produced in a single repository call so
/// callers never trigger follow-up fetches.
#[derive(Debug, Clone, Serialize)]
pub struct SiteAggregate {
    pub site: ConstructionSite,
    pub property: Property,
    pub owner: Owner,
    pub inspector: Option<Inspector>,
    pub quotes: Vec<QuoteDetail>,
}

/// One quote with its full offering→category chain and contractor.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDetail {
    pub quote: Quote,
    pub offering: ServiceOffering,
    pub category: ServiceCategory,
    pub contractor: Contractor,
}

/// Storage abstraction for sites. Read operations know nothing about the
/// caller's identity; "not found" here is distinct from the access
/// decision made one layer up.
pub trait SiteRepository: Send + Sync {
    /// All sites assigned to an inspector, ordered by status code
    /// ascending then id descending (pending first, most recent first
    /// within a status).
    fn list_by_inspector(
        &self,
        inspector: InspectorId,
    ) -> Result<Vec<ConstructionSite>, RepositoryError>;

    /// In-progress sites for an inspector, most recent first.
    fn list_active_by_inspector(
        &self,
        inspector: InspectorId,
    ) -> Result<Vec<ConstructionSite>, RepositoryError>;

    /// Fetch a site with all relations eagerly resolved. `None` when the
    /// id has no row; a dangling foreign key is an error, never a
    /// partially hydrated aggregate.
    fn hydrate_full(&self, site: SiteId) -> Result<Option<SiteAggregate>, RepositoryError>;

    fn count_by_inspector_and_status(
        &self,
        inspector: InspectorId,
        status: SiteStatus,
    ) -> Result<u64, RepositoryError>;

    /// Plain site row, used by the upload flows before mutating.
    fn fetch(&self, site: SiteId) -> Result<Option<ConstructionSite>, RepositoryError>;

    /// A stored document record by id.
    fn document(&self, document: DocumentId) -> Result<Option<DocumentRecord>, RepositoryError>;

    /// Insert a document record and point the site at it, overwriting any
    /// previous reference and the denormalized label copy.
    fn attach_document(
        &self,
        site: SiteId,
        draft: DocumentDraft,
    ) -> Result<DocumentRecord, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("dangling {entity} reference ({id})")]
    MissingRelation { entity: &'static str, id: i64 },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
