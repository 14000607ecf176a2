use std::sync::{Arc, Mutex};

use crate::sites::domain::{
    CategoryId, ConstructionSite, Contractor, ContractorId, Inspector, InspectorId, OfferingId,
    Owner, OwnerId, Property, PropertyId, Quote, QuoteId, ServiceCategory, ServiceOffering, SiteId,
    SiteStatus,
};
use crate::sites::memory::InMemorySiteRepository;
use crate::sites::service::SiteAccessService;
use crate::storage::{DocumentStore, FileUpload, StorageError, UploadKind};

pub(super) const INSPECTOR_PAUL: InspectorId = InspectorId(1);
pub(super) const INSPECTOR_SOPHIE: InspectorId = InspectorId(2);

pub(super) fn owner() -> Owner {
    Owner {
        id: OwnerId(1),
        last_name: "Martin".to_string(),
        first_name: "Claire".to_string(),
        email: "claire.martin@example.fr".to_string(),
        phone: "0612345678".to_string(),
    }
}

pub(super) fn property() -> Property {
    Property {
        id: PropertyId(1),
        address: "12 rue des Lilas".to_string(),
        city: "Lyon".to_string(),
        latitude: Some(45.7640),
        longitude: Some(4.8357),
        owner_id: OwnerId(1),
    }
}

pub(super) fn inspector_paul() -> Inspector {
    Inspector {
        id: INSPECTOR_PAUL,
        last_name: "Durand".to_string(),
        first_name: "Paul".to_string(),
        email: "paul.durand@example.fr".to_string(),
        phone: "0698765432".to_string(),
        sector: "Lyon Est".to_string(),
    }
}

pub(super) fn inspector_sophie() -> Inspector {
    Inspector {
        id: INSPECTOR_SOPHIE,
        last_name: "Bernard".to_string(),
        first_name: "Sophie".to_string(),
        email: "sophie.bernard@example.fr".to_string(),
        phone: "0611223344".to_string(),
        sector: "Lyon Ouest".to_string(),
    }
}

pub(super) fn site(id: i64, inspector: Option<InspectorId>, status: SiteStatus) -> ConstructionSite {
    ConstructionSite {
        id: SiteId(id),
        city: "Lyon".to_string(),
        address: format!("{id} quai de Saône"),
        info: None,
        status,
        property_id: PropertyId(1),
        inspector_id: inspector,
        document_id: None,
        document_label: None,
    }
}

/// Repository with one owner/property, two inspectors, two trade
/// categories with an offering and a contractor each, and site 1
/// (assigned to Paul, in progress) carrying two quotes.
pub(super) fn seeded_repository() -> Arc<InMemorySiteRepository> {
    let repository = Arc::new(InMemorySiteRepository::new());

    repository.insert_owner(owner()).expect("owner");
    repository.insert_property(property()).expect("property");
    repository
        .insert_inspector(inspector_paul())
        .expect("inspector");
    repository
        .insert_inspector(inspector_sophie())
        .expect("inspector");

    repository
        .insert_category(ServiceCategory {
            id: CategoryId(1),
            kind: "Plomberie".to_string(),
        })
        .expect("category");
    repository
        .insert_category(ServiceCategory {
            id: CategoryId(2),
            kind: "Électricité".to_string(),
        })
        .expect("category");

    repository
        .insert_offering(ServiceOffering {
            id: OfferingId(1),
            label: "Remplacement chaudière".to_string(),
            category_id: CategoryId(1),
        })
        .expect("offering");
    repository
        .insert_offering(ServiceOffering {
            id: OfferingId(2),
            label: "Mise aux normes tableau".to_string(),
            category_id: CategoryId(2),
        })
        .expect("offering");

    repository
        .insert_contractor(Contractor {
            id: ContractorId(1),
            last_name: "Dubois".to_string(),
            first_name: "Marc".to_string(),
            email: "marc.dubois@example.fr".to_string(),
            phone: "0655443322".to_string(),
            deployment_city: Some("Lyon".to_string()),
            categories: vec![CategoryId(1)],
        })
        .expect("contractor");
    repository
        .insert_contractor(Contractor {
            id: ContractorId(2),
            last_name: "Petit".to_string(),
            first_name: "Julie".to_string(),
            email: "julie.petit@example.fr".to_string(),
            phone: "0666778899".to_string(),
            deployment_city: Some("Villeurbanne".to_string()),
            categories: vec![CategoryId(2)],
        })
        .expect("contractor");

    let mut main_site = site(1, Some(INSPECTOR_PAUL), SiteStatus::InProgress);
    main_site.info = Some("Accès par la cour intérieure".to_string());
    repository.insert_site(main_site).expect("site");

    repository
        .insert_quote(Quote {
            id: QuoteId(1),
            price: 1234,
            duration: "2 semaines".to_string(),
            offering_id: OfferingId(1),
            contractor_id: ContractorId(1),
            site_id: SiteId(1),
        })
        .expect("quote");
    repository
        .insert_quote(Quote {
            id: QuoteId(2),
            price: 980,
            duration: "3 jours".to_string(),
            offering_id: OfferingId(2),
            contractor_id: ContractorId(2),
            site_id: SiteId(1),
        })
        .expect("quote");

    repository
}

/// Store double recording every write; can be flipped to fail so the
/// no-partial-state path is observable.
#[derive(Default)]
pub(super) struct RecordingDocumentStore {
    stored: Mutex<Vec<(String, UploadKind)>>,
    fail: bool,
}

impl RecordingDocumentStore {
    pub(super) fn failing() -> Self {
        Self {
            stored: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(super) fn stored(&self) -> Vec<(String, UploadKind)> {
        self.stored.lock().expect("store mutex poisoned").clone()
    }
}

impl DocumentStore for RecordingDocumentStore {
    fn store(&self, upload: &FileUpload, kind: UploadKind) -> Result<String, StorageError> {
        if self.fail {
            return Err(StorageError::Io {
                name: upload.original_name.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }

        let mut stored = self.stored.lock().expect("store mutex poisoned");
        let name = format!("stored-{}-{}", stored.len() + 1, upload.original_name);
        stored.push((name.clone(), kind));
        Ok(name)
    }

    fn delete(&self, stored_name: &str, kind: UploadKind) -> bool {
        let mut stored = self.stored.lock().expect("store mutex poisoned");
        let before = stored.len();
        stored.retain(|(name, stored_kind)| !(name == stored_name && *stored_kind == kind));
        stored.len() != before
    }
}

pub(super) fn service_with(
    repository: Arc<InMemorySiteRepository>,
) -> (
    SiteAccessService<InMemorySiteRepository, RecordingDocumentStore>,
    Arc<RecordingDocumentStore>,
) {
    let store = Arc::new(RecordingDocumentStore::default());
    (
        SiteAccessService::new(repository, store.clone()),
        store,
    )
}

pub(super) fn pdf_upload(name: &str, bytes: usize) -> FileUpload {
    FileUpload {
        data: vec![0u8; bytes],
        original_name: name.to_string(),
        content_type: mime::APPLICATION_PDF,
    }
}

pub(super) fn jpeg_upload(name: &str, bytes: usize) -> FileUpload {
    FileUpload {
        data: vec![0u8; bytes],
        original_name: name.to_string(),
        content_type: mime::IMAGE_JPEG,
    }
}
