//! End-to-end scenarios for inspector-scoped site access and uploads,
//! run through the public service facade against the real filesystem
//! document store.

mod common {
    use std::sync::Arc;

    use gesttravaux::sites::{
        CategoryId, ConstructionSite, Contractor, ContractorId, InMemorySiteRepository, Inspector,
        InspectorId, OfferingId, Owner, OwnerId, Property, PropertyId, Quote, QuoteId,
        ServiceCategory, ServiceOffering, SiteAccessService, SiteId, SiteStatus,
    };
    use gesttravaux::storage::FilesystemDocumentStore;

    pub const ASSIGNED: InspectorId = InspectorId(10);
    pub const OTHER: InspectorId = InspectorId(11);

    pub fn seeded_repository() -> Arc<InMemorySiteRepository> {
        let repository = Arc::new(InMemorySiteRepository::new());

        repository
            .insert_owner(Owner {
                id: OwnerId(1),
                last_name: "Moreau".to_string(),
                first_name: "Luc".to_string(),
                email: "luc.moreau@example.fr".to_string(),
                phone: "0455667788".to_string(),
            })
            .expect("owner");
        repository
            .insert_property(Property {
                id: PropertyId(1),
                address: "3 place Bellecour".to_string(),
                city: "Lyon".to_string(),
                latitude: Some(45.7578),
                longitude: Some(4.8320),
                owner_id: OwnerId(1),
            })
            .expect("property");
        repository
            .insert_inspector(Inspector {
                id: ASSIGNED,
                last_name: "Roche".to_string(),
                first_name: "Anne".to_string(),
                email: "anne.roche@example.fr".to_string(),
                phone: "0477885566".to_string(),
                sector: "Presqu'île".to_string(),
            })
            .expect("inspector");
        repository
            .insert_inspector(Inspector {
                id: OTHER,
                last_name: "Blanc".to_string(),
                first_name: "Hugo".to_string(),
                email: "hugo.blanc@example.fr".to_string(),
                phone: "0477885567".to_string(),
                sector: "Croix-Rousse".to_string(),
            })
            .expect("inspector");
        repository
            .insert_category(ServiceCategory {
                id: CategoryId(1),
                kind: "Maçonnerie".to_string(),
            })
            .expect("category");
        repository
            .insert_offering(ServiceOffering {
                id: OfferingId(1),
                label: "Reprise de mur porteur".to_string(),
                category_id: CategoryId(1),
            })
            .expect("offering");
        repository
            .insert_contractor(Contractor {
                id: ContractorId(1),
                last_name: "Garnier".to_string(),
                first_name: "Léa".to_string(),
                email: "lea.garnier@example.fr".to_string(),
                phone: "0622334455".to_string(),
                deployment_city: Some("Lyon".to_string()),
                categories: vec![CategoryId(1)],
            })
            .expect("contractor");
        repository
            .insert_site(ConstructionSite {
                id: SiteId(1),
                city: "Lyon".to_string(),
                address: "3 place Bellecour".to_string(),
                info: None,
                status: SiteStatus::InProgress,
                property_id: PropertyId(1),
                inspector_id: Some(ASSIGNED),
                document_id: None,
                document_label: None,
            })
            .expect("site");
        repository
            .insert_quote(Quote {
                id: QuoteId(1),
                price: 15_400,
                duration: "6 semaines".to_string(),
                offering_id: OfferingId(1),
                contractor_id: ContractorId(1),
                site_id: SiteId(1),
            })
            .expect("quote");

        repository
    }

    pub fn filesystem_fixture() -> (
        tempfile::TempDir,
        Arc<InMemorySiteRepository>,
        SiteAccessService<InMemorySiteRepository, FilesystemDocumentStore>,
    ) {
        let root = tempfile::tempdir().expect("temp dir");
        let store = Arc::new(FilesystemDocumentStore::new(
            root.path().join("photos"),
            root.path().join("documents"),
        ));
        let repository = seeded_repository();
        let service = SiteAccessService::new(repository.clone(), store);
        (root, repository, service)
    }
}

use common::{filesystem_fixture, ASSIGNED, OTHER};
use gesttravaux::sites::{
    DocumentForm, ObservationForm, SiteAccessError, SiteDetailView, SiteId, SiteRepository,
};
use gesttravaux::storage::{DocumentStore, FileUpload, FilesystemDocumentStore, UploadKind};

#[test]
fn assigned_inspector_sees_the_complete_aggregate() {
    let (_root, _repository, service) = filesystem_fixture();

    let aggregate = service
        .site_for_inspector(SiteId(1), ASSIGNED)
        .expect("assigned inspector reads the site");

    assert_eq!(aggregate.owner.first_name, "Luc");
    assert_eq!(aggregate.quotes.len(), 1);
    assert_eq!(aggregate.quotes[0].category.kind, "Maçonnerie");
    assert_eq!(aggregate.quotes[0].quote.formatted_price(), "15 400,00 €");

    let view = SiteDetailView::from_aggregate(&aggregate);
    assert_eq!(view.status, "En cours");
    assert_eq!(view.quotes[0].contractor, "Léa Garnier");
}

#[test]
fn access_is_denied_across_inspectors() {
    let (_root, _repository, service) = filesystem_fixture();

    assert!(matches!(
        service.site_for_inspector(SiteId(1), OTHER),
        Err(SiteAccessError::Forbidden)
    ));
    assert!(matches!(
        service.site_for_inspector(SiteId(77), ASSIGNED),
        Err(SiteAccessError::NotFound)
    ));
}

#[test]
fn document_upload_round_trip_reaches_the_disk() {
    let (root, repository, service) = filesystem_fixture();

    let record = service
        .upload_document(
            SiteId(1),
            ASSIGNED,
            DocumentForm {
                file_type: "rapport".to_string(),
                label: "Rapport d'inspection".to_string(),
                observation: Some("Mur porteur consolidé".to_string()),
                file: Some(FileUpload {
                    data: b"%PDF-1.4 rapport".to_vec(),
                    original_name: "rapport d'inspection.pdf".to_string(),
                    content_type: mime::APPLICATION_PDF,
                }),
            },
        )
        .expect("document attached");

    let stored_name = record.file_name.as_deref().expect("stored name");
    assert!(!stored_name.contains(' '));
    assert!(stored_name.ends_with(".pdf"));

    let path = root.path().join("documents").join(stored_name);
    assert_eq!(std::fs::read(&path).expect("file on disk"), b"%PDF-1.4 rapport");

    let row = repository
        .fetch(SiteId(1))
        .expect("fetch")
        .expect("site exists");
    assert_eq!(row.document_id, Some(record.id));
    assert_eq!(row.document_label.as_deref(), Some("Rapport d'inspection"));
}

#[test]
fn observation_photo_lands_in_the_photo_directory() {
    let (root, _repository, service) = filesystem_fixture();

    let record = service
        .add_observation(
            SiteId(1),
            ASSIGNED,
            ObservationForm {
                title: "Étaiement provisoire".to_string(),
                observation: None,
                photo: Some(FileUpload {
                    data: vec![0xFF, 0xD8, 0xFF],
                    original_name: "étaiement mur.jpg".to_string(),
                    content_type: mime::IMAGE_JPEG,
                }),
            },
        )
        .expect("observation recorded");

    let stored_name = record.file_name.as_deref().expect("stored name");
    assert!(stored_name.starts_with("etaiement-mur-"));
    assert!(root.path().join("photos").join(stored_name).is_file());
}

#[test]
fn delete_is_soft_on_missing_files() {
    let (root, _repository, _service) = filesystem_fixture();
    let store = FilesystemDocumentStore::new(
        root.path().join("photos"),
        root.path().join("documents"),
    );

    assert!(!store.delete("jamais-stocke.pdf", UploadKind::Document));

    let name = store
        .store(
            &FileUpload {
                data: b"%PDF-1.4".to_vec(),
                original_name: "plan.pdf".to_string(),
                content_type: mime::APPLICATION_PDF,
            },
            UploadKind::Document,
        )
        .expect("stored");
    assert!(store.delete(&name, UploadKind::Document));
    assert!(!root.path().join("documents").join(&name).exists());
}
