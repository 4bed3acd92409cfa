use http::StatusCode;

/// Errors that can occur when using the 3CX client.
///
/// Only failures of the actual business call ever surface here; token
/// acquisition failures are absorbed inside the authentication pipeline
/// and show up indirectly as the PBX rejecting an unauthenticated request.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum Error {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when network requests fail, timeouts occur, or connection
    /// issues arise.
    Reqwest(reqwest::Error),

    /// URL parsing error when constructing request URLs.
    Url(url::ParseError),

    /// Invalid HTTP header value.
    ///
    /// Occurs when a header value contains characters HTTP forbids.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error for a request body.
    JsonValue(serde_json::Error),

    /// JSON response deserialization failure.
    ///
    /// Occurs when the response body cannot be parsed as the expected
    /// payload.
    #[display("Failed to deserialize JSON at '{path}': {error}\n{body}")]
    #[from(skip)]
    Json {
        /// The request path where the error occurred.
        path: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },

    /// The PBX answered with a non-success status.
    #[display("Unexpected status {status} for '{path}': {body}")]
    #[from(skip)]
    UnexpectedStatus {
        /// The non-success status code.
        status: StatusCode,
        /// The request path.
        path: String,
        /// The response body, for diagnostics.
        body: String,
    },

    /// The configured base address is not a usable absolute HTTP(S) URL.
    ///
    /// Raised once at construction; never a runtime condition.
    #[display("Invalid base URL '{url}': {reason}")]
    #[from(skip)]
    InvalidBaseUrl {
        /// The offending URL as provided.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A required credential is missing or empty.
    ///
    /// Raised once at construction; never a runtime condition.
    #[display("Missing credential: {field} must not be empty")]
    #[from(skip)]
    MissingCredential {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required method argument is empty.
    #[display("{name} must not be empty")]
    #[from(skip)]
    EmptyArgument {
        /// The name of the empty argument.
        name: &'static str,
    },
}
