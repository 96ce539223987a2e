use std::io::{self, Write};

use crate::types::{ExchangeValue, RateRecord};

const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

fn write_record<W: Write>(out: &mut W, title: &str, record: &Option<RateRecord>) -> io::Result<()> {
    writeln!(out, "{}:", title)?;
    match record {
        Some(record) => writeln!(
            out,
            "Name: {} Date: {} Value: {}",
            record.name,
            record.date.format(REPORT_DATE_FORMAT),
            record.rate
        ),
        None => writeln!(out, "no rates were retrieved"),
    }
}

pub fn write_report<W: Write>(out: &mut W, result: &ExchangeValue) -> io::Result<()> {
    write_record(out, "Maximum exchange rate", &result.max_rate)?;
    writeln!(out)?;
    write_record(out, "Minimum exchange rate", &result.min_rate)?;
    writeln!(out)?;
    writeln!(
        out,
        "Average rate of the domestic currency per currency over the last {} days:",
        result.window_days
    )?;

    let mut names: Vec<&String> = result.mean_rates.keys().collect();
    names.sort();
    for name in names {
        writeln!(out, "Currency: {} Value: {}", name, result.mean_rates[name])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::naive::NaiveDate;
    use std::collections::HashMap;

    #[test]
    fn test_write_report() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut mean_rates = HashMap::new();
        mean_rates.insert("Yen".to_string(), 0.5);
        mean_rates.insert("Euro".to_string(), 0.25);
        let result = ExchangeValue {
            window_days: 3,
            retrieved_days: 2,
            max_rate: Some(RateRecord { name: "Euro".to_string(), date, rate: 4.0 }),
            min_rate: Some(RateRecord { name: "Yen".to_string(), date, rate: 2.0 }),
            mean_rates,
        };

        let mut out = Vec::new();
        write_report(&mut out, &result).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Maximum exchange rate:\nName: Euro Date: 05/03/2024 Value: 4\n\n\
             Minimum exchange rate:\nName: Yen Date: 05/03/2024 Value: 2\n\n\
             Average rate of the domestic currency per currency over the last 3 days:\n\
             Currency: Euro Value: 0.25\nCurrency: Yen Value: 0.5\n"
        );
    }

    #[test]
    fn test_write_empty_report() {
        let result = ExchangeValue {
            window_days: 90,
            retrieved_days: 0,
            max_rate: None,
            min_rate: None,
            mean_rates: HashMap::new(),
        };

        let mut out = Vec::new();
        write_report(&mut out, &result).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Maximum exchange rate:\nno rates were retrieved\n"));
        assert!(text.ends_with("over the last 90 days:\n"));
    }
}
