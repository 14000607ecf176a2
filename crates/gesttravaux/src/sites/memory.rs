use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Mutex;

use super::domain::{
    CategoryId, ConstructionSite, Contractor, ContractorId, DocumentDraft, DocumentId,
    DocumentRecord, Inspector, InspectorId, OfferingId, Owner, OwnerId, Property, PropertyId,
    Quote, QuoteId, ServiceCategory, ServiceOffering, SiteId, SiteStatus,
};
use super::repository::{QuoteDetail, RepositoryError, SiteAggregate, SiteRepository};

#[derive(Default)]
struct Tables {
    owners: HashMap<OwnerId, Owner>,
    properties: HashMap<PropertyId, Property>,
    inspectors: HashMap<InspectorId, Inspector>,
    contractors: HashMap<ContractorId, Contractor>,
    categories: HashMap<CategoryId, ServiceCategory>,
    offerings: HashMap<OfferingId, ServiceOffering>,
    quotes: HashMap<QuoteId, Quote>,
    sites: HashMap<SiteId, ConstructionSite>,
    documents: HashMap<DocumentId, DocumentRecord>,
    next_document_id: i64,
}

/// In-memory [`SiteRepository`] backing the service in tests, demos, and
/// the development server. Entity rows are inserted up front by seeding;
/// only document ids are generated here.
pub struct InMemorySiteRepository {
    tables: Mutex<Tables>,
}

impl Default for InMemorySiteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySiteRepository {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                next_document_id: 1,
                ..Tables::default()
            }),
        }
    }

    pub fn insert_owner(&self, owner: Owner) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        insert_unique(&mut tables.owners, owner.id, owner)
    }

    pub fn insert_property(&self, property: Property) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        insert_unique(&mut tables.properties, property.id, property)
    }

    pub fn insert_inspector(&self, inspector: Inspector) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        insert_unique(&mut tables.inspectors, inspector.id, inspector)
    }

    pub fn insert_contractor(&self, contractor: Contractor) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        insert_unique(&mut tables.contractors, contractor.id, contractor)
    }

    pub fn insert_category(&self, category: ServiceCategory) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        insert_unique(&mut tables.categories, category.id, category)
    }

    pub fn insert_offering(&self, offering: ServiceOffering) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        insert_unique(&mut tables.offerings, offering.id, offering)
    }

    pub fn insert_quote(&self, quote: Quote) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        insert_unique(&mut tables.quotes, quote.id, quote)
    }

    pub fn insert_site(&self, site: ConstructionSite) -> Result<(), RepositoryError> {
        let mut tables = self.lock();
        insert_unique(&mut tables.sites, site.id, site)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("repository mutex poisoned")
    }
}

fn insert_unique<K: std::hash::Hash + Eq, V>(
    map: &mut HashMap<K, V>,
    key: K,
    value: V,
) -> Result<(), RepositoryError> {
    if map.contains_key(&key) {
        return Err(RepositoryError::Conflict);
    }
    map.insert(key, value);
    Ok(())
}

impl Tables {
    fn hydrate(&self, site: &ConstructionSite) -> Result<SiteAggregate, RepositoryError> {
        let property = self.properties.get(&site.property_id).ok_or(
            RepositoryError::MissingRelation {
                entity: "property",
                id: site.property_id.0,
            },
        )?;
        let owner =
            self.owners
                .get(&property.owner_id)
                .ok_or(RepositoryError::MissingRelation {
                    entity: "owner",
                    id: property.owner_id.0,
                })?;
        let inspector = match site.inspector_id {
            Some(id) => Some(
                self.inspectors
                    .get(&id)
                    .ok_or(RepositoryError::MissingRelation {
                        entity: "inspector",
                        id: id.0,
                    })?
                    .clone(),
            ),
            None => None,
        };

        let mut quotes: Vec<&Quote> = self
            .quotes
            .values()
            .filter(|quote| quote.site_id == site.id)
            .collect();
        quotes.sort_by_key(|quote| quote.id);

        let mut details = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let offering = self.offerings.get(&quote.offering_id).ok_or(
                RepositoryError::MissingRelation {
                    entity: "offering",
                    id: quote.offering_id.0,
                },
            )?;
            let category = self.categories.get(&offering.category_id).ok_or(
                RepositoryError::MissingRelation {
                    entity: "category",
                    id: offering.category_id.0,
                },
            )?;
            let contractor = self.contractors.get(&quote.contractor_id).ok_or(
                RepositoryError::MissingRelation {
                    entity: "contractor",
                    id: quote.contractor_id.0,
                },
            )?;
            details.push(QuoteDetail {
                quote: quote.clone(),
                offering: offering.clone(),
                category: category.clone(),
                contractor: contractor.clone(),
            });
        }

        Ok(SiteAggregate {
            site: site.clone(),
            property: property.clone(),
            owner: owner.clone(),
            inspector,
            quotes: details,
        })
    }
}

impl SiteRepository for InMemorySiteRepository {
    fn list_by_inspector(
        &self,
        inspector: InspectorId,
    ) -> Result<Vec<ConstructionSite>, RepositoryError> {
        let tables = self.lock();
        let mut sites: Vec<ConstructionSite> = tables
            .sites
            .values()
            .filter(|site| site.inspector_id == Some(inspector))
            .cloned()
            .collect();
        sites.sort_by_key(|site| (site.status.code(), Reverse(site.id.0)));
        Ok(sites)
    }

    fn list_active_by_inspector(
        &self,
        inspector: InspectorId,
    ) -> Result<Vec<ConstructionSite>, RepositoryError> {
        let tables = self.lock();
        let mut sites: Vec<ConstructionSite> = tables
            .sites
            .values()
            .filter(|site| {
                site.inspector_id == Some(inspector) && site.status == SiteStatus::InProgress
            })
            .cloned()
            .collect();
        sites.sort_by_key(|site| Reverse(site.id.0));
        Ok(sites)
    }

    fn hydrate_full(&self, site: SiteId) -> Result<Option<SiteAggregate>, RepositoryError> {
        let tables = self.lock();
        match tables.sites.get(&site) {
            Some(row) => tables.hydrate(row).map(Some),
            None => Ok(None),
        }
    }

    fn count_by_inspector_and_status(
        &self,
        inspector: InspectorId,
        status: SiteStatus,
    ) -> Result<u64, RepositoryError> {
        let tables = self.lock();
        Ok(tables
            .sites
            .values()
            .filter(|site| site.inspector_id == Some(inspector) && site.status == status)
            .count() as u64)
    }

    fn fetch(&self, site: SiteId) -> Result<Option<ConstructionSite>, RepositoryError> {
        let tables = self.lock();
        Ok(tables.sites.get(&site).cloned())
    }

    fn document(&self, document: DocumentId) -> Result<Option<DocumentRecord>, RepositoryError> {
        let tables = self.lock();
        Ok(tables.documents.get(&document).cloned())
    }

    fn attach_document(
        &self,
        site: SiteId,
        draft: DocumentDraft,
    ) -> Result<DocumentRecord, RepositoryError> {
        let mut tables = self.lock();
        if !tables.sites.contains_key(&site) {
            return Err(RepositoryError::NotFound);
        }

        let id = DocumentId(tables.next_document_id);
        tables.next_document_id += 1;

        let record = DocumentRecord {
            id,
            label: draft.label,
            file_name: draft.file_name,
            uploaded_at: draft.uploaded_at,
            file_type: draft.file_type,
            observation: draft.observation,
        };
        tables.documents.insert(id, record.clone());

        let row = tables
            .sites
            .get_mut(&site)
            .expect("site present under lock");
        row.document_id = Some(id);
        row.document_label = Some(record.label.clone());

        Ok(record)
    }
}
