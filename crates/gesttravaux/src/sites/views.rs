use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ConstructionSite, DocumentRecord};
use super::repository::{QuoteDetail, SiteAggregate};

/// JSON shape served for a single site: the flattened aggregate the map
/// and detail screens consume.
#[derive(Debug, Clone, Serialize)]
pub struct SiteDetailView {
    pub id: i64,
    pub address: String,
    pub status: &'static str,
    pub info: Option<String>,
    pub property: PropertyView,
    pub quotes: Vec<QuoteView>,
}

impl SiteDetailView {
    pub fn from_aggregate(aggregate: &SiteAggregate) -> Self {
        Self {
            id: aggregate.site.id.0,
            address: aggregate.site.full_address(),
            status: aggregate.site.status.label(),
            info: aggregate.site.info.clone(),
            property: PropertyView {
                id: aggregate.property.id.0,
                address: aggregate.property.full_address(),
                latitude: aggregate.property.latitude,
                longitude: aggregate.property.longitude,
            },
            quotes: aggregate.quotes.iter().map(QuoteView::from_detail).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyView {
    pub id: i64,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteView {
    pub id: i64,
    pub price: i64,
    pub duration: String,
    pub offering: String,
    pub category: String,
    pub contractor: String,
}

impl QuoteView {
    pub fn from_detail(detail: &QuoteDetail) -> Self {
        Self {
            id: detail.quote.id.0,
            price: detail.quote.price,
            duration: detail.quote.duration.clone(),
            offering: detail.offering.label.clone(),
            category: detail.category.kind.clone(),
            contractor: detail.contractor.display_name(),
        }
    }
}

/// One row of the dashboard site listing.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSummaryView {
    pub id: i64,
    pub address: String,
    pub status: &'static str,
    pub badge_class: &'static str,
    pub info: Option<String>,
    pub document_label: Option<String>,
}

impl SiteSummaryView {
    pub fn from_site(site: &ConstructionSite) -> Self {
        Self {
            id: site.id.0,
            address: site.full_address(),
            status: site.status.label(),
            badge_class: site.status.badge_class(),
            info: site.info.clone(),
            document_label: site.document_label.clone(),
        }
    }
}

/// Per-status counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardStats {
    pub pending: u64,
    pub in_progress: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub sites: Vec<SiteSummaryView>,
    pub stats: DashboardStats,
}

/// Response body confirming an upload.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub id: i64,
    pub label: String,
    pub file_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub file_type: String,
    pub observation: Option<String>,
}

impl DocumentView {
    pub fn from_record(record: &DocumentRecord) -> Self {
        Self {
            id: record.id.0,
            label: record.label.clone(),
            file_name: record.file_name.clone(),
            uploaded_at: record.uploaded_at,
            file_type: record.file_type.clone(),
            observation: record.observation.clone(),
        }
    }
}
