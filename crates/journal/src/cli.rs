use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch calendars and upsert them as sample tasks in the PostgreSQL database (journal).
    Spider {
        /// Specify the calendars to fetch.
        ///
        /// If no endpoints are provided, spider will collect all.
        #[arg(short, long)]
        endpoints: Option<Vec<Endpoint>>,

        /// Sync into an in-memory store instead of PostgreSQL.
        #[arg(long)]
        dry_run: bool,
    },

    /// Create the `journal.sample_tasks` table.
    Schema,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Upcoming IPOs for the next month.
    Ipo,
}

impl Endpoint {
    pub const ALL: [Endpoint; 1] = [Endpoint::Ipo];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spider_defaults() {
        let cli = Cli::try_parse_from(["journal", "spider"]).unwrap();
        assert!(cli.trace.is_none());
        match cli.command {
            Commands::Spider { endpoints, dry_run } => {
                assert!(endpoints.is_none());
                assert!(!dry_run);
            }
            _ => panic!("expected spider"),
        }
    }

    #[test]
    fn spider_with_flags() {
        let cli = Cli::try_parse_from([
            "journal", "spider", "-e", "ipo", "--dry-run", "--trace", "DEBUG",
        ])
        .unwrap();
        assert_eq!(cli.trace, Some(TraceLevel::DEBUG));
        match cli.command {
            Commands::Spider { endpoints, dry_run } => {
                assert_eq!(endpoints, Some(vec![Endpoint::Ipo]));
                assert!(dry_run);
            }
            _ => panic!("expected spider"),
        }
    }

    #[test]
    fn unknown_endpoint_rejected() {
        assert!(Cli::try_parse_from(["journal", "spider", "-e", "earnings"]).is_err());
    }

    #[test]
    fn schema_command() {
        let cli = Cli::try_parse_from(["journal", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }
}
