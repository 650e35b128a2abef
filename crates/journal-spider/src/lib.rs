pub mod api;
pub mod config;
pub mod error;
pub mod investment;
pub mod store;
pub mod task;
pub mod tui;

mod de;
mod sql;

pub use error::SpiderError;

/// Shortcut for required API elements.
pub mod http {
    pub use dotenv::var;
    pub use reqwest::Client as HttpClient;
}

/// Build the standard HTTP client shared by every calendar.
pub fn std_client_build(user_agent: &str) -> Result<http::HttpClient, SpiderError> {
    reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .build()
        .map_err(SpiderError::Request)
}

/// Human readable elapsed time, for `debug!` lines.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.3}s", time.elapsed().as_secs_f64())
}
