//! Care registry maintenance entry point.
//!
//! One-shot commands that keep the registry's document database in shape:
//! loading the care-item catalog, seeding synthetic patients, and
//! reconciling the derived search keywords.

use clap::{Parser, Subcommand};
use tracing::{error, info};

use care_registry::Dependencies;
use care_registry_ops::catalog::CatalogLoader;
use care_registry_ops::reconciler::KeywordReconciler;
use care_registry_ops::seeder::PatientSeeder;
use care_registry_ops::RunSummary;

#[derive(Parser)]
#[command(name = "care-registry")]
#[command(about = "Maintenance scripts for the care registry document database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upsert the fixed care-item reference catalog
    CareItems,
    /// Seed synthetic patient records from the identity source
    Patients,
    /// Recompute the derived search keywords for all patients
    SearchKeywords,
}

#[tokio::main]
async fn main() {
    // Load a local .env first so RUST_LOG set there is honored
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let deps = match Dependencies::new().await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return;
        }
    };

    let summary = match cli.command {
        Commands::CareItems => {
            info!("Starting care item catalog load");
            CatalogLoader::new(deps.store).run().await
        }
        Commands::Patients => {
            info!("Starting patient seeding");
            PatientSeeder::new(deps.store, deps.identity).run().await
        }
        Commands::SearchKeywords => {
            info!("Starting search keyword reconciliation");
            KeywordReconciler::new(deps.store).run().await
        }
    };

    report(&summary);
}

/// Log the final outcome. Per-record failures were already logged where
/// they happened; the process still exits cleanly so scheduled runs do not
/// page anyone for a partial pass.
fn report(summary: &RunSummary) {
    if summary.failed > 0 {
        error!(
            written = summary.written,
            skipped = summary.skipped,
            failed = summary.failed,
            "Run finished with failures"
        );
    } else {
        info!(
            written = summary.written,
            skipped = summary.skipped,
            "Run finished"
        );
    }
}
