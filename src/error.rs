//! Error types for the Crisp client.
//!
//! Every failure the command-line client can hit is one of these variants:
//! missing configuration, bad arguments, an error envelope returned by the
//! API, a transport failure, or a response body that cannot be decoded.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

use crate::config::REQUIRED_ENV_VARS;

/// The main error type for the Crisp client.
#[derive(Clone, Debug)]
pub enum Error {
    /// Required configuration is missing from the environment.
    Configuration {
        /// Names of the environment variables that were not set.
        missing: Vec<String>,
    },

    /// The command line is missing a required argument.
    Usage {
        /// One-line usage string for the offending command.
        usage: String,
    },

    /// The API answered with an error envelope.
    Api {
        /// The `reason` (or `error`) field of the envelope.
        reason: String,
    },

    /// Connection error.
    Connection {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The transport gave up waiting for the API.
    Timeout {
        /// Human-readable error message.
        message: String,
    },

    /// HTTP client error.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// The response body was not a JSON envelope.
    Decode {
        /// The raw response body.
        body: String,
    },

    /// Error during JSON serialization or deserialization of a payload.
    Serialization {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A URL parsing error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },

    /// I/O error.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },
}

impl Error {
    /// Creates a new configuration error listing the missing variables.
    pub fn configuration<S: Into<String>>(missing: impl IntoIterator<Item = S>) -> Self {
        Error::Configuration {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a new usage error.
    pub fn usage(usage: impl Into<String>) -> Self {
        Error::Usage {
            usage: usage.into(),
        }
    }

    /// Creates a new API error.
    pub fn api(reason: impl Into<String>) -> Self {
        Error::Api {
            reason: reason.into(),
        }
    }

    /// Creates a new connection error.
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Connection {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Error::Timeout {
            message: message.into(),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new decode error carrying the raw body.
    pub fn decode(body: impl Into<String>) -> Self {
        Error::Decode { body: body.into() }
    }

    /// Creates a new serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Serialization {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Returns true if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    /// Returns true if this error is a usage error.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage { .. })
    }

    /// Returns true if the API itself reported the failure.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Returns true if this error happened below the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Connection { .. } | Error::Timeout { .. } | Error::HttpClient { .. }
        )
    }

    /// Returns true if the response could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::Serialization { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration { missing } => {
                write!(
                    f,
                    "Missing environment variables: {}. Required: {}",
                    missing.join(", "),
                    REQUIRED_ENV_VARS.join(", ")
                )
            }
            Error::Usage { usage } => write!(f, "{usage}"),
            Error::Api { reason } => write!(f, "API Error: {reason}"),
            Error::Connection { message, .. } => write!(f, "Connection error: {message}"),
            Error::Timeout { message } => write!(f, "Timeout error: {message}"),
            Error::HttpClient { message, .. } => write!(f, "HTTP client error: {message}"),
            Error::Decode { body } => write!(f, "Parse error: {body}"),
            Error::Serialization { message, .. } => write!(f, "Serialization error: {message}"),
            Error::Url { message, .. } => write!(f, "URL error: {message}"),
            Error::Io { message, .. } => write!(f, "I/O error: {message}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Connection { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {err}"), Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for Crisp client operations.
pub type Result<T> = std::result::Result<T, Error>;
