mod cli;
mod spider;

// remote imports
use clap::Parser;
use cli::{Cli, Endpoint, TraceLevel};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

////////////////////////////////////////////////////////////////////////////

// install the subscriber for the requested trace level
fn preprocess(trace_level: Level) -> anyhow::Result<()> {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        })?;
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();

    // read cli inputs
    use cli::Commands::*;
    match cli.command {
        // `journal spider <Option<Vec<Endpoint>>> [--dry-run]`: fetch & sync calendars
        Spider { endpoints, dry_run } => {
            // if no endpoints provided, fetch all
            let endpoints = endpoints.unwrap_or_else(|| Endpoint::ALL.to_vec());
            spider::run(endpoints, dry_run, tui).await?;
        }

        // `journal schema`: create the sample task table
        Schema => spider::schema(tui).await?,
    }

    Ok(())
}
