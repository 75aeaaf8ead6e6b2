use std::time::Duration;

use thiserror::Error;

/// A failed request against the events API.
///
/// Callers never branch on the variant: every one of them means the request
/// failed and the slot it was meant to fill keeps its previous value.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] http::uri::InvalidUri),

    #[error("could not build request: {0}")]
    Request(#[from] http::Error),

    #[error("request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("could not read response body: {0}")]
    Body(#[from] hyper::Error),

    #[error("server responded with {0}")]
    Status(http::StatusCode),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("no valid system certificates found")]
    NoRootCertificates,
}

/// A date input that is neither `YYYY-MM-DD` nor RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date: {0:?}")]
pub struct InvalidDate(pub String);
