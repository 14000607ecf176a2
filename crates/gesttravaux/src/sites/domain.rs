use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for property owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(pub i64);

/// Identifier wrapper for properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub i64);

/// Identifier wrapper for inspectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InspectorId(pub i64);

/// Identifier wrapper for contractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContractorId(pub i64);

/// Identifier wrapper for service categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub i64);

/// Identifier wrapper for service offerings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferingId(pub i64);

/// Identifier wrapper for quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuoteId(pub i64);

/// Identifier wrapper for construction sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(pub i64);

/// Identifier wrapper for uploaded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub i64);

/// Property owner requesting renovation or construction work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
}

/// Real-estate property where the work takes place. Belongs to exactly
/// one owner; coordinates are optional and only used for map display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner_id: OwnerId,
}

impl Property {
    pub fn full_address(&self) -> String {
        format!("{}, {}", self.address, self.city)
    }
}

/// Inspector monitoring assigned construction sites within a sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspector {
    pub id: InspectorId,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub sector: String,
}

impl Inspector {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Contractor bidding on service offerings. The categories it serves are
/// referenced by id; the repository resolves them on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: ContractorId,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub deployment_city: Option<String>,
    pub categories: Vec<CategoryId>,
}

impl Contractor {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Trade category grouping service offerings (e.g. "Plomberie").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: CategoryId,
    pub kind: String,
}

/// A labeled service belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: OfferingId,
    pub label: String,
    pub category_id: CategoryId,
}

/// Contractor quote for one service offering on one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub price: i64,
    pub duration: String,
    pub offering_id: OfferingId,
    pub contractor_id: ContractorId,
    pub site_id: SiteId,
}

impl Quote {
    /// Price rendered for display: space-grouped thousands, comma decimal
    /// separator, trailing euro sign (`1234` becomes `"1 234,00 €"`).
    pub fn formatted_price(&self) -> String {
        let sign = if self.price < 0 { "-" } else { "" };
        format!("{sign}{},00 €", group_thousands(self.price.unsigned_abs()))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        let remaining = digits.len() - index;
        if index > 0 && remaining % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}

/// Uploaded inspection document or photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub label: String,
    pub file_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub file_type: String,
    pub observation: Option<String>,
}

/// Fields of a document before the repository assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDraft {
    pub label: String,
    pub file_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub file_type: String,
    pub observation: Option<String>,
}

/// Lifecycle of a construction site. The numeric codes match the values
/// persisted in the sites table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl SiteStatus {
    pub const fn code(self) -> u8 {
        match self {
            SiteStatus::Pending => 0,
            SiteStatus::InProgress => 1,
            SiteStatus::Completed => 2,
            SiteStatus::Cancelled => 3,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SiteStatus::Pending),
            1 => Some(SiteStatus::InProgress),
            2 => Some(SiteStatus::Completed),
            3 => Some(SiteStatus::Cancelled),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SiteStatus::Pending => "En attente",
            SiteStatus::InProgress => "En cours",
            SiteStatus::Completed => "Terminé",
            SiteStatus::Cancelled => "Annulé",
        }
    }

    /// CSS badge class used by the rendering layer.
    pub const fn badge_class(self) -> &'static str {
        match self {
            SiteStatus::Pending => "badge bg-warning text-dark",
            SiteStatus::InProgress => "badge bg-primary",
            SiteStatus::Completed => "badge bg-success",
            SiteStatus::Cancelled => "badge bg-secondary",
        }
    }
}

impl Default for SiteStatus {
    fn default() -> Self {
        SiteStatus::Pending
    }
}

/// Construction site row. Relations are plain foreign keys; the
/// repository joins them into a [`super::repository::SiteAggregate`].
/// The document reference is single-valued and overwritten on each new
/// upload, together with a denormalized copy of the document label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionSite {
    pub id: SiteId,
    pub city: String,
    pub address: String,
    pub info: Option<String>,
    pub status: SiteStatus,
    pub property_id: PropertyId,
    pub inspector_id: Option<InspectorId>,
    pub document_id: Option<DocumentId>,
    pub document_label: Option<String>,
}

impl ConstructionSite {
    pub fn full_address(&self) -> String {
        format!("{}, {}", self.address, self.city)
    }
}
