use chrono::naive::NaiveDate;

use crate::errors::DecodeError;

const FEED_DATE_FORMAT: &str = "%d.%m.%Y";

/*
 * Parse a number written with a decimal comma, "73,5" -> 73.5
 */
pub fn parse_decimal(src: &str) -> Result<f64, DecodeError> {
    src.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| DecodeError::MalformedNumber(src.to_string()))
}

/*
 * Parse a DD.MM.YYYY date; chrono alone would also take unpadded
 * fields and longer years, so the shape is checked first
 */
pub fn parse_date(src: &str) -> Result<NaiveDate, DecodeError> {
    let malformed = || DecodeError::MalformedDate(src.to_string());
    let shape_ok = src.len() == 10
        && src.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b'.',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(malformed());
    }
    NaiveDate::parse_from_str(src, FEED_DATE_FORMAT).map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("73,5"), Ok(73.5));
        assert_eq!(parse_decimal("0,0123"), Ok("0.0123".parse::<f64>().unwrap()));
        assert_eq!(parse_decimal("100"), Ok(100f64));

        for bad in &["12,34,56", "", "abc", "12,5 RUB"] {
            assert_eq!(
                parse_decimal(bad),
                Err(DecodeError::MalformedNumber(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("31.12.2023"),
            Ok(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
        );

        for bad in &["2023-12-31", "31/12/2023", "1.12.2023", "31.12.23", "32.01.2023", "29.02.2023", ""] {
            assert_eq!(
                parse_date(bad),
                Err(DecodeError::MalformedDate(bad.to_string()))
            );
        }
    }
}
