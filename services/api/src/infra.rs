use gesttravaux::sites::{
    CategoryId, ConstructionSite, Contractor, ContractorId, InMemorySiteRepository, Inspector,
    InspectorId, OfferingId, Owner, OwnerId, Property, PropertyId, Quote, QuoteId, ServiceCategory,
    ServiceOffering, SiteAccessService, SiteId, SiteStatus,
};
use gesttravaux::storage::FilesystemDocumentStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type AppServices = SiteAccessService<InMemorySiteRepository, FilesystemDocumentStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) service: Arc<AppServices>,
    pub(crate) store: Arc<FilesystemDocumentStore>,
}

/// Development and demo data: two inspectors sharing a portfolio of
/// sites across every status, with quotes covering three trades.
pub(crate) fn seed_repository() -> Arc<InMemorySiteRepository> {
    let repository = Arc::new(InMemorySiteRepository::new());
    let seed = "seed rows are unique";

    repository
        .insert_owner(Owner {
            id: OwnerId(1),
            last_name: "Martin".to_string(),
            first_name: "Claire".to_string(),
            email: "claire.martin@example.fr".to_string(),
            phone: "0612345678".to_string(),
        })
        .expect(seed);
    repository
        .insert_owner(Owner {
            id: OwnerId(2),
            last_name: "Moreau".to_string(),
            first_name: "Luc".to_string(),
            email: "luc.moreau@example.fr".to_string(),
            phone: "0455667788".to_string(),
        })
        .expect(seed);

    repository
        .insert_property(Property {
            id: PropertyId(1),
            address: "12 rue des Lilas".to_string(),
            city: "Lyon".to_string(),
            latitude: Some(45.7640),
            longitude: Some(4.8357),
            owner_id: OwnerId(1),
        })
        .expect(seed);
    repository
        .insert_property(Property {
            id: PropertyId(2),
            address: "8 avenue Jean Jaurès".to_string(),
            city: "Villeurbanne".to_string(),
            latitude: Some(45.7719),
            longitude: Some(4.8902),
            owner_id: OwnerId(2),
        })
        .expect(seed);
    repository
        .insert_property(Property {
            id: PropertyId(3),
            address: "3 place Bellecour".to_string(),
            city: "Lyon".to_string(),
            latitude: None,
            longitude: None,
            owner_id: OwnerId(2),
        })
        .expect(seed);

    repository
        .insert_inspector(Inspector {
            id: InspectorId(1),
            last_name: "Durand".to_string(),
            first_name: "Paul".to_string(),
            email: "paul.durand@example.fr".to_string(),
            phone: "0698765432".to_string(),
            sector: "Lyon Est".to_string(),
        })
        .expect(seed);
    repository
        .insert_inspector(Inspector {
            id: InspectorId(2),
            last_name: "Bernard".to_string(),
            first_name: "Sophie".to_string(),
            email: "sophie.bernard@example.fr".to_string(),
            phone: "0611223344".to_string(),
            sector: "Lyon Ouest".to_string(),
        })
        .expect(seed);

    repository
        .insert_category(ServiceCategory {
            id: CategoryId(1),
            kind: "Plomberie".to_string(),
        })
        .expect(seed);
    repository
        .insert_category(ServiceCategory {
            id: CategoryId(2),
            kind: "Électricité".to_string(),
        })
        .expect(seed);
    repository
        .insert_category(ServiceCategory {
            id: CategoryId(3),
            kind: "Maçonnerie".to_string(),
        })
        .expect(seed);

    repository
        .insert_offering(ServiceOffering {
            id: OfferingId(1),
            label: "Remplacement chaudière".to_string(),
            category_id: CategoryId(1),
        })
        .expect(seed);
    repository
        .insert_offering(ServiceOffering {
            id: OfferingId(2),
            label: "Recherche de fuite".to_string(),
            category_id: CategoryId(1),
        })
        .expect(seed);
    repository
        .insert_offering(ServiceOffering {
            id: OfferingId(3),
            label: "Mise aux normes tableau".to_string(),
            category_id: CategoryId(2),
        })
        .expect(seed);
    repository
        .insert_offering(ServiceOffering {
            id: OfferingId(4),
            label: "Reprise de mur porteur".to_string(),
            category_id: CategoryId(3),
        })
        .expect(seed);

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
        .expect(seed);
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
        .expect(seed);
    repository
        .insert_contractor(Contractor {
            id: ContractorId(3),
            last_name: "Garnier".to_string(),
            first_name: "Léa".to_string(),
            email: "lea.garnier@example.fr".to_string(),
            phone: "0622334455".to_string(),
            deployment_city: Some("Lyon".to_string()),
            categories: vec![CategoryId(3)],
        })
        .expect(seed);

    let sites = [
        (1, 1, Some(InspectorId(1)), SiteStatus::InProgress,
         Some("Accès par la cour intérieure".to_string())),
        (2, 2, Some(InspectorId(1)), SiteStatus::Pending, None),
        (3, 3, Some(InspectorId(2)), SiteStatus::InProgress, None),
        (4, 1, Some(InspectorId(1)), SiteStatus::Completed, None),
        (5, 2, None, SiteStatus::Pending, None),
    ];
    for (id, property, inspector, status, info) in sites {
        let row = match property {
            1 => ("12 rue des Lilas", "Lyon"),
            2 => ("8 avenue Jean Jaurès", "Villeurbanne"),
            _ => ("3 place Bellecour", "Lyon"),
        };
        repository
            .insert_site(ConstructionSite {
                id: SiteId(id),
                city: row.1.to_string(),
                address: row.0.to_string(),
                info,
                status,
                property_id: PropertyId(property),
                inspector_id: inspector,
                document_id: None,
                document_label: None,
            })
            .expect(seed);
    }

    let quotes = [
        (1, 1, 1, 1, 4850, "2 semaines"),
        (2, 1, 3, 2, 1290, "3 jours"),
        (3, 3, 4, 3, 15_400, "6 semaines"),
        (4, 2, 2, 1, 380, "1 jour"),
    ];
    for (id, site, offering, contractor, price, duration) in quotes {
        repository
            .insert_quote(Quote {
                id: QuoteId(id),
                price,
                duration: duration.to_string(),
                offering_id: OfferingId(offering),
                contractor_id: ContractorId(contractor),
                site_id: SiteId(site),
            })
            .expect(seed);
    }

    repository
}
