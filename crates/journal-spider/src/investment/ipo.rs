use crate::api::Template;
use crate::config::Config;
use crate::de::{de_bool, de_int, de_null_vec, de_string, de_strings};
use crate::http::HttpClient;
use crate::task::{truncate, SampleTask, TIME_ZONE};
use crate::SpiderError;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

/// Date layout of the calendar's `date` field and of the request window.
pub const LAYOUT_ISO: &str = "%Y-%m-%d";

/// Metadata tag, and `uid` prefix, of every IPO task.
pub const IPO_METADATA: &str = "INVESTMENT_IPO_RECORD";

// scrape
// ----------------------------------------------------------------------------

/// Client for the IPO calendar: a one month window starting today, one page of 500 rows.
pub struct IpoClient {
    http_client: HttpClient,
    base_url: String,
}

impl IpoClient {
    /// Client for `https://{host}`.
    pub fn new(http_client: HttpClient, host: &str) -> Self {
        Self::with_base_url(http_client, format!("https://{host}"))
    }

    /// Client for an explicit scheme and authority, e.g. `http://127.0.0.1:8080`.
    pub fn with_base_url(http_client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, SpiderError> {
        let http_client = crate::std_client_build(&config.user_agent)?;
        Ok(Self::new(http_client, &config.ipo_host))
    }

    /// Request URL for the window starting on `today`.
    pub fn url(&self, today: NaiveDate) -> String {
        let (date_from, date_to) = calendar_window(today);
        format!(
            "{base_url}/services/webapps/calendar/ipos?tpagesize=500\
            &parameters[date_from]={date_from}\
            &parameters[date_to]={date_to}\
            &parameters[importance]=0",
            base_url = self.base_url
        )
    }

    /// Fetch the window starting on `today`.
    pub async fn fetch_window(&self, today: NaiveDate) -> Result<Vec<Ipo>, SpiderError> {
        let time = std::time::Instant::now();
        let url = self.url(today);

        debug!("fetching IPO calendar from {url}");
        let body = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|err| {
                error!("IPO client sending request failed, error({err})");
                err
            })?
            .text()
            .await
            .map_err(|err| {
                error!("IPO client reading response failed, error({err})");
                err
            })?;

        let ipos = parse_calendar(&body)?;
        debug!(
            "IPO calendar fetched, {} records. {}",
            ipos.len(),
            crate::time_elapsed(time)
        );

        Ok(ipos)
    }
}

#[async_trait]
impl Template for IpoClient {
    type Record = Ipo;

    const METADATA: &'static str = IPO_METADATA;

    async fn fetch_data(&self) -> Result<Vec<Ipo>, SpiderError> {
        self.fetch_window(today()).await
    }

    fn key(record: &Ipo) -> &str {
        &record.ticker
    }

    fn build_task(record: &Ipo, uid: String, raw: String, now: DateTime<Utc>) -> SampleTask {
        let due_date = truncate(&record.date, 10);
        let due_time = truncate(&record.time, 5);
        trace!("building task [{uid}] due {due_date} {due_time}");

        SampleTask {
            created_at: now,
            updated_at: now,
            metadata: IPO_METADATA.to_string(),
            raw,
            name: format!(
                "{} ({}) goes public on {}",
                record.name, record.ticker, due_date
            ),
            uid,
            available_before: available_before(&record.date),
            due_date,
            due_time,
            pending: true,
            refreshable: true,
            time_zone: TIME_ZONE.to_string(),
        }
    }
}

/// Today's calendar date in New York.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&New_York).date_naive()
}

/// `(date_from, date_to)`: `today` through the same day next month.
///
/// A day past the end of next month rolls over into the month after (Jan 31 → Mar 2).
pub fn calendar_window(today: NaiveDate) -> (String, String) {
    let date_to = add_one_month(today);
    (
        today.format(LAYOUT_ISO).to_string(),
        date_to.format(LAYOUT_ISO).to_string(),
    )
}

fn add_one_month(today: NaiveDate) -> NaiveDate {
    let (year, month) = match today.month() {
        12 => (today.year() + 1, 1),
        month => (today.year(), month + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(today.day0()))))
        .unwrap_or(today)
}

/// Midnight of `date` in New York; `None` unless `date` is exactly `yyyy-MM-dd`.
pub fn available_before(date: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, LAYOUT_ISO).ok()?;
    New_York
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Decode a calendar response body; the error keeps the body for diagnostics.
pub fn parse_calendar(body: &str) -> Result<Vec<Ipo>, SpiderError> {
    serde_json::from_str::<IpoCalendar>(body)
        .map(|calendar| calendar.ipos)
        .map_err(|source| {
            error!("unmarshal IPO response failed, error({source})");
            SpiderError::Parse {
                source,
                body: body.to_string(),
            }
        })
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct IpoCalendar {
    #[serde(default, deserialize_with = "de_null_vec")]
    ipos: Vec<Ipo>,
}

/// One calendar row. Unknown fields are ignored; missing or `null` fields take their zero value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Ipo {
    #[serde(deserialize_with = "de_string")]
    pub id: String,
    #[serde(deserialize_with = "de_string")]
    pub date: String,
    #[serde(deserialize_with = "de_string")]
    pub time: String,
    #[serde(deserialize_with = "de_string")]
    pub ticker: String,
    #[serde(deserialize_with = "de_string")]
    pub exchange: String,
    #[serde(deserialize_with = "de_string")]
    pub name: String,
    #[serde(deserialize_with = "de_bool")]
    pub open_date_verified: bool,
    #[serde(deserialize_with = "de_string")]
    pub pricing_date: String,
    #[serde(deserialize_with = "de_string")]
    pub currency: String,
    #[serde(deserialize_with = "de_string")]
    pub price_min: String,
    #[serde(deserialize_with = "de_string")]
    pub price_max: String,
    #[serde(deserialize_with = "de_string")]
    pub deal_status: String,
    #[serde(deserialize_with = "de_string")]
    pub insider_lockup_days: String,
    #[serde(deserialize_with = "de_string")]
    pub insider_lockup_date: String,
    #[serde(deserialize_with = "de_int")]
    pub offering_value: i64,
    #[serde(deserialize_with = "de_int")]
    pub offering_shares: i64,
    #[serde(deserialize_with = "de_strings")]
    pub lead_underwriters: Vec<String>,
    #[serde(deserialize_with = "de_int")]
    pub shares_outstanding: i64,
    #[serde(deserialize_with = "de_string")]
    pub underwriter_quiet_expiration_date: String,
    #[serde(deserialize_with = "de_string")]
    pub notes: String,
    /// Epoch seconds of the row's last change upstream.
    #[serde(deserialize_with = "de_int")]
    pub updated: i64,
}
