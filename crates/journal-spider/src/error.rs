use thiserror::Error;

/// Errors raised while fetching calendars or writing sample tasks.
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("sending request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unmarshal response failed: {source}; body: {body}")]
    Parse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("empty data, please fetch data first")]
    EmptyData,

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("failed to get a connection from the pool: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("failed to create the connection pool: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}
