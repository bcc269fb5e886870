//! Error types.

use crate::record::RecordKind;
use std::num::ParseIntError;
use trust_dns_client::op::ResponseCode;
use trust_dns_proto::error::ProtoError;

/// Error enumerates the possible lookup failures.
///
/// A name that exists but has no records of the requested kind is not an error: lookups report
/// that as `Ok(None)`. Use [`Error::kind`] to branch on the broad failure category.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when the queried name does not exist at all (NXDOMAIN).
    #[error("name not found: \"{0}\"")]
    NotFound(String),

    /// Returned when no configured server answered within the retry budget.
    #[error("no response for \"{name}\" after {attempts} attempts: {last_error}")]
    Communication {
        name: String,
        attempts: u32,
        last_error: String,
    },

    /// Returned when a record value doesn't have the expected text form, e.g. an SOA value
    /// without seven tokens, or a reverse lookup address that isn't dotted decimal.
    #[error("malformed {kind} value \"{text}\"")]
    Format {
        kind: RecordKind,
        text: String,
        #[source]
        source: RecordFormatError,
    },

    /// Returned when every server answered with a response code other than NOERROR or
    /// NXDOMAIN, e.g. SERVFAIL or REFUSED.
    #[error("lookup of \"{name}\" failed: {code}")]
    Naming { name: String, code: ResponseCode },

    /// Returned when only authoritative answers are accepted and no server gave one.
    #[error("no authoritative answer for \"{0}\"")]
    NotAuthoritative(String),

    /// Returned when neither an explicit server nor a system resolver is configured.
    #[error("no DNS servers configured")]
    NoServers,

    /// Returned when the configured DNS server can't be turned into a socket address.
    #[error("invalid DNS server \"{0}\"")]
    InvalidServer(String),

    /// Returned when a queried name isn't a valid domain name.
    #[error("invalid name")]
    InvalidName(#[from] ProtoError),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when loading a [`Config`][crate::config::Config] or an
    /// [`InMemoryDirectory`][crate::directory::InMemoryDirectory] from disk fails due to invalid
    /// JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}

/// The broad categories of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The name does not exist.
    NotFound,
    /// Network failure, timeout or retry exhaustion.
    Communication,
    /// Malformed record text or numeric parse failure.
    Format,
    /// Any other failure, including unreadable config or zone files.
    Naming,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Communication { .. } => ErrorKind::Communication,
            Error::Format { .. } => ErrorKind::Format,
            Error::Naming { .. }
            | Error::NotAuthoritative(_)
            | Error::NoServers
            | Error::InvalidServer(_)
            | Error::InvalidName(_)
            | Error::IO(_)
            | Error::InvalidJSON(_) => ErrorKind::Naming,
        }
    }

    pub(crate) fn format(kind: RecordKind, text: &str, source: RecordFormatError) -> Self {
        Error::Format {
            kind,
            text: text.to_string(),
            source,
        }
    }
}

/// Details of a malformed record value.
#[derive(thiserror::Error, Debug)]
pub enum RecordFormatError {
    #[error("expected {expected} tokens, found {actual}")]
    TokenCount { expected: usize, actual: usize },
    #[error("invalid number \"{token}\": {source}")]
    InvalidNumber {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid address octet \"{0}\"")]
    InvalidOctet(String),
    #[error("unknown record kind \"{0}\"")]
    UnknownKind(String),
}
