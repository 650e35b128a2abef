use crate::http::var;
use crate::SpiderError;

/// Default calendar host.
pub const DEFAULT_IPO_HOST: &str = "www.benzinga.com";

/// Environment backed settings; read after `dotenv::dotenv()` has loaded any `.env` file.
#[derive(Clone, Debug)]
pub struct Config {
    /// `JOURNAL_URL`, the PostgreSQL connection string.
    pub database_url: Option<String>,
    /// `IPO_HOST`
    pub ipo_host: String,
    /// `USER_AGENT`
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: var("JOURNAL_URL").ok(),
            ipo_host: var("IPO_HOST").unwrap_or_else(|_| DEFAULT_IPO_HOST.to_string()),
            user_agent: var("USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        }
    }

    pub fn database_url(&self) -> Result<&str, SpiderError> {
        self.database_url
            .as_deref()
            .ok_or(SpiderError::MissingEnv("JOURNAL_URL"))
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
