use std::collections::HashMap;

use crate::types::{ExchangeRatePublication, RateRecord};

// strict comparison: on equal rates the record seen first stays
fn keep_max(current: Option<RateRecord>, candidate: Option<RateRecord>) -> Option<RateRecord> {
    match (current, candidate) {
        (Some(current), Some(candidate)) => if candidate.rate > current.rate {
            Some(candidate)
        } else {
            Some(current)
        },
        (current, candidate) => current.or(candidate),
    }
}

fn keep_min(current: Option<RateRecord>, candidate: Option<RateRecord>) -> Option<RateRecord> {
    match (current, candidate) {
        (Some(current), Some(candidate)) => if candidate.rate < current.rate {
            Some(candidate)
        } else {
            Some(current)
        },
        (current, candidate) => current.or(candidate),
    }
}

/// What a single publication contributes to the window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DaySummary {
    pub max_rate: Option<RateRecord>,
    pub min_rate: Option<RateRecord>,
    pub reciprocal_sums: HashMap<String, f64>,
}

impl DaySummary {
    pub fn from_publication(publication: &ExchangeRatePublication) -> DaySummary {
        publication
            .entries
            .iter()
            .fold(DaySummary::default(), |mut summary, entry| {
                let rate = entry.normalized_rate();
                let record = RateRecord {
                    name: entry.name.clone(),
                    date: publication.date,
                    rate,
                };
                summary.max_rate = keep_max(summary.max_rate, Some(record.clone()));
                summary.min_rate = keep_min(summary.min_rate, Some(record));
                *summary.reciprocal_sums.entry(entry.name.clone()).or_insert(0f64) += 1f64 / rate;
                summary
            })
    }
}

/// Running max, min and per-currency reciprocal sums over the window
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregateState {
    pub max_rate: Option<RateRecord>,
    pub min_rate: Option<RateRecord>,
    pub reciprocal_sums: HashMap<String, f64>,
    pub retrieved_days: usize,
}

impl AggregateState {
    /*
     * Fold one day into the window, days must be merged in window order
     * for the first-seen tie-break to hold
     */
    pub fn merge(self, day: DaySummary) -> AggregateState {
        let mut reciprocal_sums = self.reciprocal_sums;
        for (name, sum) in day.reciprocal_sums {
            *reciprocal_sums.entry(name).or_insert(0f64) += sum;
        }
        AggregateState {
            max_rate: keep_max(self.max_rate, day.max_rate),
            min_rate: keep_min(self.min_rate, day.min_rate),
            reciprocal_sums,
            retrieved_days: self.retrieved_days + 1,
        }
    }

    /// Mean foreign-per-domestic rate; the divisor is the whole window,
    /// not the number of days a currency was quoted
    pub fn mean_rates(&self, window_days: usize) -> HashMap<String, f64> {
        self.reciprocal_sums
            .iter()
            .map(|(name, sum)| (name.clone(), sum / window_days as f64))
            .collect()
    }
}
