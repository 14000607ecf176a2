use crate::infra::seed_repository;
use clap::Args;
use gesttravaux::error::AppError;
use gesttravaux::sites::{InspectorId, SiteAccessError, SiteAccessService, SiteDetailView, SiteId};
use gesttravaux::storage::FilesystemDocumentStore;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Inspector id to walk through (defaults to 1)
    #[arg(long)]
    pub(crate) inspector: Option<i64>,
}

/// Print a seeded inspector session: dashboard, one site detail, and a
/// denied cross-inspector read.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let inspector = InspectorId(args.inspector.unwrap_or(1));

    let repository = seed_repository();
    let store = Arc::new(FilesystemDocumentStore::new(
        "var/demo/photos",
        "var/demo/documents",
    ));
    let service = SiteAccessService::new(repository, store);

    println!("GestTravaux Pro demo — inspecteur {}", inspector.0);

    let dashboard = service.dashboard(inspector)?;
    println!(
        "\n{} chantiers ({} en attente, {} en cours, {} terminés)",
        dashboard.sites.len(),
        dashboard.stats.pending,
        dashboard.stats.in_progress,
        dashboard.stats.completed
    );
    for site in &dashboard.sites {
        println!("- #{} {} [{}]", site.id, site.address, site.status);
    }

    if let Some(first) = dashboard.sites.first() {
        let aggregate = service.site_for_inspector(SiteId(first.id), inspector)?;
        let view = SiteDetailView::from_aggregate(&aggregate);
        println!("\nDétail du chantier #{} — {}", view.id, view.address);
        println!(
            "Propriétaire : {} {}",
            aggregate.owner.first_name, aggregate.owner.last_name
        );
        for quote in &aggregate.quotes {
            println!(
                "  devis #{} {} ({}) — {} par {}",
                quote.quote.id.0,
                quote.offering.label,
                quote.category.kind,
                quote.quote.formatted_price(),
                quote.contractor.display_name()
            );
        }
    }

    let foreign = InspectorId(inspector.0 + 1);
    match service.site_for_inspector(SiteId(1), foreign) {
        Err(SiteAccessError::Forbidden) => {
            println!("\nLecture du chantier 1 par l'inspecteur {}: refusée", foreign.0);
        }
        Err(err) => println!("\nLecture croisée: {err}"),
        Ok(_) => println!("\nLecture croisée: autorisée (chantier partagé)"),
    }

    Ok(())
}
