//! Construction-site tracking: domain records, the repository contract
//! with its in-memory implementation, upload forms, the inspector-scoped
//! access service, and the HTTP router on top of it.

pub mod domain;
pub mod forms;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryId, ConstructionSite, Contractor, ContractorId, DocumentDraft, DocumentId,
    DocumentRecord, Inspector, InspectorId, OfferingId, Owner, OwnerId, Property, PropertyId,
    Quote, QuoteId, ServiceCategory, ServiceOffering, SiteId, SiteStatus,
};
pub use forms::{DocumentForm, ObservationForm, ValidationError};
pub use memory::InMemorySiteRepository;
pub use repository::{QuoteDetail, RepositoryError, SiteAggregate, SiteRepository};
pub use router::{caller_identity, site_router, INSPECTOR_ID_HEADER};
pub use service::{SiteAccessError, SiteAccessService};
pub use views::{
    DashboardStats, DashboardView, DocumentView, PropertyView, QuoteView, SiteDetailView,
    SiteSummaryView,
};
