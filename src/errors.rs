//! Declare our error types using `thiserror`.

// Variant fields are described by the variant docs.
#![allow(missing_docs)]

use reqwest::StatusCode;
use std::collections::BTreeMap;
use std::result;
use thiserror::Error;
use url::Url;

/// A custom `Result`, for convenience.
pub type Result<T, E = Error> = result::Result<T, E>;

/// A BigML-related error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// We could not access the specified URL, either because the request
    /// failed or because the connection broke while reading the body.
    ///
    /// **WARNING:** Do not construct this directly, but use
    /// `Error::could_not_access_url` to handle various URL sanitization and
    /// security issues.
    #[non_exhaustive]
    #[error("error accessing '{url}': {source}")]
    CouldNotAccessUrl { url: Url, source: reqwest::Error },

    /// The server answered, but the body did not have the shape we expected.
    ///
    /// **WARNING:** Do not construct this directly, but use
    /// `Error::could_not_decode_response`.
    #[non_exhaustive]
    #[error("could not decode response from '{url}': {source}")]
    CouldNotDecodeResponse {
        url: Url,
        source: serde_json::Error,
    },

    /// We could not parse the specified URL.
    ///
    /// **WARNING:** This takes a domain, not the full URL that we couldn't
    /// parse, because we want to be careful to exclude credentials from error
    /// messages, and we can't remove credentials from a URL we can't parse.
    #[non_exhaustive]
    #[error("could not parse a URL with the domain '{domain}': {source}")]
    CouldNotParseUrlWithDomain {
        domain: String,
        source: url::ParseError,
    },

    /// An empty resource ID was passed where a real one was required.
    #[non_exhaustive]
    #[error("a BigML resource ID may not be empty")]
    EmptyResourceId {},

    /// The base URL can't have path segments appended to it, so it can't be
    /// used to talk to BigML.
    #[non_exhaustive]
    #[error("cannot use '{url}' as a base URL for BigML requests")]
    InvalidBaseUrl { url: Url },

    /// BigML says that payment is required for this request, perhaps because
    /// we have hit plan limits.
    #[non_exhaustive]
    #[error("BigML payment required for {url} ({body})")]
    PaymentRequired { url: Url, body: String },

    /// We received an unexpected HTTP status code.
    #[non_exhaustive]
    #[error("{status} for {url} ({body})")]
    UnexpectedHttpStatus {
        url: Url,
        status: StatusCode,
        body: String,
    },

    /// We found a type mismatch deserializing a BigML resource ID.
    #[non_exhaustive]
    #[error("Expected BigML resource ID starting with '{expected}', found '{found}'")]
    WrongResourceType {
        expected: &'static str,
        found: String,
    },
}

impl Error {
    /// Construct an `Error::CouldNotAccessUrl` value, taking care to
    /// sanitize the URL query.
    pub(crate) fn could_not_access_url(url: &Url, error: reqwest::Error) -> Error {
        Error::CouldNotAccessUrl {
            url: url_without_api_key(url),
            // `reqwest` includes the raw URL, credentials and all.
            source: error.without_url(),
        }
    }

    /// Construct an `Error::CouldNotDecodeResponse` value, taking care to
    /// sanitize the URL query.
    pub(crate) fn could_not_decode_response(
        url: &Url,
        error: serde_json::Error,
    ) -> Error {
        Error::CouldNotDecodeResponse {
            url: url_without_api_key(url),
            source: error,
        }
    }

    /// Construct an `Error::CouldNotParseUrlWithDomain` value.
    pub(crate) fn could_not_parse_url_with_domain<S>(
        domain: S,
        error: url::ParseError,
    ) -> Error
    where
        S: Into<String>,
    {
        Error::CouldNotParseUrlWithDomain {
            domain: domain.into(),
            source: error,
        }
    }

    /// Build the error for a non-2xx response.
    pub(crate) fn from_http_status(url: &Url, status: StatusCode, body: String) -> Error {
        let url = url_without_api_key(url);
        match status {
            StatusCode::PAYMENT_REQUIRED => Error::PaymentRequired { url, body },
            _ => Error::UnexpectedHttpStatus { url, status, body },
        }
    }

    /// Did the request fail at the network level?
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::CouldNotAccessUrl { .. })
    }

    /// Did BigML send us a body we couldn't decode?
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::CouldNotDecodeResponse { .. })
    }

    /// Is this error likely to be temporary?
    pub fn might_be_temporary(&self) -> bool {
        match self {
            Error::CouldNotAccessUrl { .. } => true,
            // This error occurs when all your BigML "slots" are used and
            // they're suggesting you upgrade. Backing off may free up slots.
            Error::PaymentRequired { .. } => true,
            // Some HTTP status codes also tend to correspond to temporary errors.
            Error::UnexpectedHttpStatus { status, .. } => matches!(
                *status,
                StatusCode::INTERNAL_SERVER_ERROR // I'm not so sure about this one.
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT
            ),
            _ => false,
        }
    }
}

/// Given a URL with a possible `api_key` parameter, replace the `api_key` with
/// `*****` to minimize the risk of leaking credentials into logs somewhere.
pub(crate) fn url_without_api_key(url: &Url) -> Url {
    // Extract all our query parameters.
    let mut query = BTreeMap::new();
    for (k, v) in url.query_pairs() {
        query.insert(k.into_owned(), v.into_owned());
    }

    // Build a new URL, setting our query parameters manually, and excluding
    // the problematic one.
    let mut new_url = url.to_owned();
    if query.is_empty() {
        return new_url;
    }
    {
        let mut serializer = new_url.query_pairs_mut();
        serializer.clear();
        for (k, v) in query.iter() {
            if k == "api_key" {
                serializer.append_pair(k, "*****");
            } else {
                serializer.append_pair(k, v);
            }
        }
    }
    new_url
}

#[test]
fn url_without_api_key_is_sanitized() {
    let url = Url::parse("https://www.example.com/foo?a=b&api_key=12345")
        .expect("could not parse URL");
    let cleaned = url_without_api_key(&url);
    assert_eq!(
        cleaned.as_str(),
        "https://www.example.com/foo?a=b&api_key=*****"
    );
}

#[test]
fn url_without_query_is_unchanged() {
    let url = Url::parse("https://www.example.com/foo").expect("could not parse URL");
    assert_eq!(url_without_api_key(&url).as_str(), "https://www.example.com/foo");
}

#[test]
fn http_status_errors_are_classified() {
    let url = Url::parse("https://bigml.io/dev/dataset?api_key=secret&username=me")
        .expect("could not parse URL");

    let err = Error::from_http_status(&url, StatusCode::PAYMENT_REQUIRED, "{}".to_owned());
    assert!(matches!(err, Error::PaymentRequired { .. }));
    assert!(err.might_be_temporary());
    assert!(!format!("{}", err).contains("secret"));

    let err = Error::from_http_status(&url, StatusCode::NOT_FOUND, "{}".to_owned());
    assert!(matches!(err, Error::UnexpectedHttpStatus { .. }));
    assert!(!err.might_be_temporary());
    assert!(!err.is_transport());
    assert!(!err.is_decode());

    let err = Error::from_http_status(&url, StatusCode::SERVICE_UNAVAILABLE, String::new());
    assert!(err.might_be_temporary());
}

#[test]
fn decode_errors_are_sanitized() {
    let url = Url::parse("https://bigml.io/dev/dataset?api_key=secret&username=me")
        .expect("could not parse URL");
    let json_err = serde_json::from_str::<u64>("\"nope\"").unwrap_err();
    let err = Error::could_not_decode_response(&url, json_err);
    assert!(err.is_decode());
    assert!(!err.might_be_temporary());
    assert!(!format!("{}", err).contains("secret"));
}
