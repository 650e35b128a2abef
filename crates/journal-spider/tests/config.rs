use journal_spider::config::{Config, DEFAULT_IPO_HOST};
use journal_spider::SpiderError;

fn config(database_url: Option<&str>) -> Config {
    Config {
        database_url: database_url.map(str::to_string),
        ipo_host: DEFAULT_IPO_HOST.to_string(),
        user_agent: "journal-spider/test".to_string(),
    }
}

#[test]
fn database_url_is_required_for_postgres() {
    assert!(matches!(
        config(None).database_url(),
        Err(SpiderError::MissingEnv("JOURNAL_URL"))
    ));

    let err = config(None).database_url().unwrap_err();
    assert_eq!(err.to_string(), "environment variable JOURNAL_URL is not set");
}

#[test]
fn database_url_when_set() {
    let config = config(Some("postgres://localhost/journal"));
    assert_eq!(
        config.database_url().unwrap(),
        "postgres://localhost/journal"
    );
}
