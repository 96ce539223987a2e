use std::collections::HashMap;

use chrono::naive::NaiveDate;
use structopt::StructOpt;

/// Takes no arguments, only --help and --version
#[derive(Debug, StructOpt)]
#[structopt(about = "Report max, min and average central bank exchange rates over the last 90 days")]
pub struct Opt {}

/// One day's feed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRatePublication {
    pub date: NaiveDate,
    pub title: String,
    pub entries: Vec<CurrencyEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyEntry {
    pub identifier: Option<String>,
    pub face_value: u32, // always >= 1 once parsed
    pub name: String,
    pub raw_rate: f64,
}

impl CurrencyEntry {
    /// Domestic currency paid for exactly one unit of this currency.
    pub fn normalized_rate(&self) -> f64 {
        self.raw_rate / f64::from(self.face_value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub name: String,
    pub date: NaiveDate,
    pub rate: f64,
}

/// Raw response as handed over by the fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedBody {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>, // charset hint, if the server sent one
}

#[derive(Debug, PartialEq)]
pub struct ExchangeValue {
    pub window_days: usize,
    pub retrieved_days: usize,
    pub max_rate: Option<RateRecord>,
    pub min_rate: Option<RateRecord>,
    pub mean_rates: HashMap<String, f64>, // foreign currency per unit of domestic
}
