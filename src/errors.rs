use thiserror::Error;

/// Failures of the locale-aware scalar decoders
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("malformed number: {0:?}")]
    MalformedNumber(String),

    #[error("malformed date: {0:?}")]
    MalformedDate(String),
}

/// A publication that could not be decoded; never partially accepted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedParseError {
    #[error("cannot decode feed text: {0}")]
    Charset(String),

    #[error("malformed feed document: {0}")]
    Xml(String),

    #[error(transparent)]
    Scalar(#[from] DecodeError),

    #[error("invalid nominal {nominal} for currency {name}")]
    InvalidNominal { name: String, nominal: u32 },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status code {0}")]
    Status(u16),

    #[error("empty response body")]
    EmptyBody,
}

/// Anything that makes a single day of the window contribute nothing
#[derive(Error, Debug)]
pub enum DayError {
    #[error("failed to retrieve rates: {0}")]
    Fetch(#[from] FetchError),

    #[error("failed to parse rates: {0}")]
    Parse(#[from] FeedParseError),
}
