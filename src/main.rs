/*

CLI reporting central bank exchange rates over the last days

USAGE:
    cbr-rates

FLAGS:
    -h, --help       Prints help information
    -V, --version    Prints version information

one daily publication is requested for every day before today, a day that
cannot be retrieved or parsed is logged and skipped, the report goes to stdout
*/
use std::io;

use chrono::naive::NaiveDate;
use chrono::Local;
use log::{debug, error, info, warn};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use structopt::StructOpt;

mod aggregate;
mod errors;
mod feed;
mod report;
mod types;
mod utils;

use aggregate::{AggregateState, DaySummary};
use errors::{DayError, FetchError};
use feed::parse_publication;
use report::write_report;
use types::{ExchangeRatePublication, ExchangeValue, FeedBody, Opt};

const WINDOW_DAYS: usize = 90;
const BASE_URL: &str = "https://www.cbr.ru/scripts/XML_daily_eng.asp";
const USER_AGENT: &str = "cbr-rates/0.1";
const REQUEST_DATE_FORMAT: &str = "%d/%m/%Y";

pub fn request_url(base_url: &str, date: &NaiveDate) -> String {
    format!("{}?date_req={}", base_url, date.format(REQUEST_DATE_FORMAT))
}

/*
 * Charset detection is left to the parser so only the content type
 * is kept from the headers
 */
fn feed_body(status: StatusCode, headers: &HeaderMap, bytes: &[u8]) -> Result<FeedBody, FetchError> {
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    if bytes.is_empty() {
        return Err(FetchError::EmptyBody);
    }
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    Ok(FeedBody {
        bytes: bytes.to_vec(),
        content_type,
    })
}

/*
 * Retrieve the raw publication for given date
 */
pub fn get_feed(client: &Client, base_url: &str, date: &NaiveDate) -> Result<FeedBody, FetchError> {
    let url = request_url(base_url, date);
    debug!("GET {}", url);

    let response = client.get(&url).send()?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.bytes()?;
    feed_body(status, &headers, &bytes)
}

fn retrieve_day<F>(fetch: &mut F, date: &NaiveDate) -> Result<ExchangeRatePublication, DayError>
where
    F: FnMut(&NaiveDate) -> Result<FeedBody, FetchError>,
{
    let body = fetch(date)?;
    let publication = parse_publication(&body)?;
    debug!(
        "{} -> {} of {}, {} currencies",
        date,
        publication.title,
        publication.date,
        publication.entries.len()
    );
    Ok(publication)
}

/*
 *  Fold the publications of `window_days` days before `today` (most recent first)
 *  into max/min/mean rates; to make testing easier, feeds are obtained via `fetch`
 * */
pub fn exchange_rate_overview<F>(today: NaiveDate, window_days: usize, mut fetch: F) -> ExchangeValue
where
    F: FnMut(&NaiveDate) -> Result<FeedBody, FetchError>,
{
    let state = (1..=window_days)
        .map(|offset| today - chrono::Duration::days(offset as i64))
        .fold(AggregateState::default(), |state, date| {
            match retrieve_day(&mut fetch, &date) {
                Ok(publication) => state.merge(DaySummary::from_publication(&publication)),
                Err(err) => {
                    warn!("{} -> {}", date, err);
                    state
                }
            }
        });

    info!("retrieved {} of {} daily publications", state.retrieved_days, window_days);

    ExchangeValue {
        window_days,
        retrieved_days: state.retrieved_days,
        mean_rates: state.mean_rates(window_days),
        max_rate: state.max_rate,
        min_rate: state.min_rate,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Opt::from_args();

    let client = match ClientBuilder::new().user_agent(USER_AGENT).build() {
        Ok(client) => client,
        Err(err) => {
            error!("cannot create http client: {}", err);
            std::process::exit(1);
        }
    };

    let today = Local::now().date_naive();
    info!("Fetching {} days of rates before {}", WINDOW_DAYS, today);
    let result = exchange_rate_overview(today, WINDOW_DAYS, |date| get_feed(&client, BASE_URL, date));

    let stdout = io::stdout();
    if let Err(err) = write_report(&mut stdout.lock(), &result) {
        error!("cannot write report: {}", err);
        std::process::exit(1);
    }
}
