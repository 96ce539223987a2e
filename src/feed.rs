/*
 * Decoding of the daily rates document:
 *
 * <ValCurs Date="14.03.2024" name="Foreign Currency Market">
 *   <Valute ID="R01235"><Nominal>1</Nominal><Name>US Dollar</Name><Value>91,6139</Value></Valute>
 *   ...
 * </ValCurs>
 *
 * the feed usually declares windows-1251, so the text is transcoded to UTF-8
 * before it reaches the XML decoder
 */
use encoding_rs::{Encoding, UTF_8};
use serde::Deserialize;

use crate::errors::FeedParseError;
use crate::types::{CurrencyEntry, ExchangeRatePublication, FeedBody};
use crate::utils::{parse_date, parse_decimal};

#[derive(Deserialize, Debug)]
struct XmlValCurs {
    #[serde(rename = "Date")]
    date: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "Valute", default)]
    currencies: Vec<XmlValute>,
}

#[derive(Deserialize, Debug)]
struct XmlValute {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(rename = "Nominal")]
    nominal: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: String,
}

fn trim_ascii_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &bytes[skip..]
}

/// `encoding="..."` from the `<?xml ... ?>` declaration, if there is one.
///
/// xml-rs only understands UTF-8, UTF-16 and Latin-1, so the declared charset is
/// resolved here and the declaration is dropped (`strip_declaration`) before the
/// transcoded text is handed to `serde_xml_rs`.
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let bytes = trim_ascii_start(bytes);
    if !bytes.starts_with(b"<?xml") {
        return None;
    }
    let end = bytes.windows(2).position(|w| w == b"?>")?;
    let declaration = &bytes[..end];
    let at = declaration.windows(8).position(|w| w == b"encoding")?;
    let rest = trim_ascii_start(&declaration[at + 8..]);
    let rest = trim_ascii_start(rest.strip_prefix(b"=")?);
    let quote = *rest.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let label_len = rest[1..].iter().position(|&b| b == quote)?;
    Some(&rest[1..1 + label_len])
}

fn header_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

fn unknown_label(label: &[u8]) -> FeedParseError {
    FeedParseError::Charset(format!("unknown encoding {:?}", String::from_utf8_lossy(label)))
}

/*
 * BOM first, then the document's own declaration, then the HTTP header, then UTF-8
 */
pub fn resolve_encoding(body: &FeedBody) -> Result<&'static Encoding, FeedParseError> {
    if let Some((encoding, _)) = Encoding::for_bom(&body.bytes) {
        return Ok(encoding);
    }
    if let Some(label) = declared_encoding(&body.bytes) {
        // an ASCII-readable declaration cannot really be UTF-16
        return Encoding::for_label(label)
            .map(Encoding::output_encoding)
            .ok_or_else(|| unknown_label(label));
    }
    if let Some(label) = body.content_type.as_deref().and_then(header_charset) {
        return Encoding::for_label(label.as_bytes()).ok_or_else(|| unknown_label(label.as_bytes()));
    }
    Ok(UTF_8)
}

// the text is UTF-8 by now, a leftover windows-1251 declaration would be rejected by xml-rs
fn strip_declaration(text: &str) -> &str {
    let trimmed = text.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    text
}

pub fn parse_publication(body: &FeedBody) -> Result<ExchangeRatePublication, FeedParseError> {
    let encoding = resolve_encoding(body)?;
    let (text, had_errors) = encoding.decode_with_bom_removal(&body.bytes);
    if had_errors {
        return Err(FeedParseError::Charset(format!(
            "invalid {} byte sequence",
            encoding.name()
        )));
    }

    let document: XmlValCurs = serde_xml_rs::from_str(strip_declaration(&text))
        .map_err(|e| FeedParseError::Xml(e.to_string()))?;

    let entries = document
        .currencies
        .into_iter()
        .map(|currency| {
            if currency.nominal == 0 {
                return Err(FeedParseError::InvalidNominal {
                    name: currency.name,
                    nominal: currency.nominal,
                });
            }
            Ok(CurrencyEntry {
                raw_rate: parse_decimal(&currency.value)?,
                identifier: currency.id,
                face_value: currency.nominal,
                name: currency.name,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExchangeRatePublication {
        date: parse_date(&document.date)?,
        title: document.name,
        entries,
    })
}
