use thiserror::Error;

/// Boxed error returned by pluggable transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The stage of a call that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Transport,
    Decode,
    Conversion,
}

/// Every failure the DataPoint client can surface.
#[derive(Error, Debug)]
pub enum DataPointError {
    /// The client was built without enough information to make requests.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The target URL could not be built from the base URI and path.
    /// `url` holds the configured base URI, or `???` when there is none.
    #[error("failed to generate {description} url from {url:?}: {source}")]
    Url {
        description: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request never produced a response.
    #[error("failed to query {url} for {description}: {source}")]
    Request {
        description: String,
        url: String,
        #[source]
        source: BoxError,
    },

    /// A response arrived but its body could not be read.
    #[error("failed to read body from response from {url} for {description}: {source}")]
    Body {
        description: String,
        url: String,
        #[source]
        source: BoxError,
    },

    /// The body was not JSON of the expected shape.
    #[error("failed to deserialise body from {url} for {description}: {source}")]
    Decode {
        description: String,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {field} {value:?}: {reason}")]
    InvalidNumber {
        field: String,
        value: String,
        reason: String,
    },

    #[error("failed to parse {field} {value:?}: {source}")]
    InvalidTimestamp {
        field: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A forecast record used a code missing from the `Wx.Param` table.
    #[error("could not find descriptor for parameter {code}")]
    UnknownParameter { code: String },

    #[error("could not find {field}")]
    MissingField { field: String },
}

impl DataPointError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_number(
        field: impl Into<String>,
        value: &str,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_timestamp(
        field: impl Into<String>,
        value: &str,
        source: chrono::ParseError,
    ) -> Self {
        Self::InvalidTimestamp {
            field: field.into(),
            value: value.to_string(),
            source,
        }
    }

    /// Which part of the request pipeline failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Config { .. } => Stage::Config,
            Self::Url { .. } | Self::Request { .. } | Self::Body { .. } => Stage::Transport,
            Self::Decode { .. } => Stage::Decode,
            Self::InvalidNumber { .. }
            | Self::InvalidTimestamp { .. }
            | Self::UnknownParameter { .. }
            | Self::MissingField { .. } => Stage::Conversion,
        }
    }
}

pub type Result<T, E = DataPointError> = std::result::Result<T, E>;
