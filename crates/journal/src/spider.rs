use crate::cli::Endpoint;
use colored::Colorize;
use journal_spider::api::TemplateClient;
use journal_spider::config::Config;
use journal_spider::investment::ipo::IpoClient;
use journal_spider::store::{MemoryTaskStore, PgTaskStore, TaskStore};
use journal_spider::task::SyncReport;
use journal_spider::tui::SyncProgress;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Run the requested calendars, one fetch and one sync each.
pub(crate) async fn run(endpoints: Vec<Endpoint>, dry_run: bool, tui: bool) -> anyhow::Result<()> {
    let config = Config::from_env();
    trace!("calendar host: {}", config.ipo_host);

    // 1. pick the store
    let store: Arc<dyn TaskStore> = if dry_run {
        debug!("dry run, syncing into memory");
        Arc::new(MemoryTaskStore::new())
    } else {
        let store = PgTaskStore::connect(config.database_url()?)?;
        store.ensure_schema().await?;
        Arc::new(store)
    };

    // 2. fetch & send each calendar
    let time = std::time::Instant::now();
    for endpoint in endpoints {
        match endpoint {
            Endpoint::Ipo => {
                let time = std::time::Instant::now();

                let mut client = TemplateClient::new(IpoClient::from_config(&config)?, store.clone());
                client.fetch_data().await?;

                let len = client.data().map_or(0, |data| data.len());
                let progress = if tui {
                    SyncProgress::new(len)?
                } else {
                    SyncProgress::hidden()
                };
                let report = client.send_data_with(&progress).await?;

                summarize("IPO", &report, tui);
                info!("IPO calendar synced, time elapsed: {:?}", time.elapsed());
            }
        }
    }

    info!(
        "spider finished syncing calendars, time elapsed: {:?}",
        time.elapsed()
    );

    Ok(())
}

/// Create the `journal.sample_tasks` table.
pub(crate) async fn schema(tui: bool) -> anyhow::Result<()> {
    let config = Config::from_env();
    let store = PgTaskStore::connect(config.database_url()?)?;
    store.ensure_schema().await?;

    if tui {
        println!("journal.sample_tasks ... {}", "ready".green());
    }
    Ok(())
}

fn summarize(calendar: &str, report: &SyncReport, tui: bool) {
    for failure in &report.failed {
        warn!("{calendar} [{}] not synced: {}", failure.uid, failure.reason);
    }

    if tui {
        println!(
            "{calendar} ... {} created, {} modified, {} failed",
            report.created.len().to_string().green(),
            report.modified.len().to_string().blue(),
            report.failed.len().to_string().red(),
        );
        for failure in &report.failed {
            println!("  {} {}", failure.uid.red(), failure.reason);
        }
    }
}
