//! Record kinds and the text forms their values take.
//!
//! Every [`Directory`][crate::directory::Directory] answers lookups with plain text values. Most
//! are returned to callers untouched (addresses, names, TXT strings). Two kinds carry structure
//! that [`DnsClient`][crate::DnsClient] parses:
//!
//! * `MX`: `"<preference> <exchange>"`, e.g. `"20 mail.example.com."`, see [`mx::parse`].
//! * `SOA`: `"<mname> <rname> <serial> <refresh> <retry> <expire> <minimum>"`, see
//!   [`SoaRecord::parse`].

pub mod mx;
pub mod soa;

use crate::error::RecordFormatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use trust_dns_client::rr::RecordType;

pub use soa::SoaRecord;

/// The closed set of record kinds that can be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    A,
    Aaaa,
    Ns,
    Soa,
    Mx,
    Txt,
    Ptr,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::A,
        RecordKind::Aaaa,
        RecordKind::Ns,
        RecordKind::Soa,
        RecordKind::Mx,
        RecordKind::Txt,
        RecordKind::Ptr,
    ];

    /// The mnemonic used in zone files and queries, e.g. `"AAAA"`.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Ns => "NS",
            RecordKind::Soa => "SOA",
            RecordKind::Mx => "MX",
            RecordKind::Txt => "TXT",
            RecordKind::Ptr => "PTR",
        }
    }
}

impl From<RecordKind> for RecordType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::A => RecordType::A,
            RecordKind::Aaaa => RecordType::AAAA,
            RecordKind::Ns => RecordType::NS,
            RecordKind::Soa => RecordType::SOA,
            RecordKind::Mx => RecordType::MX,
            RecordKind::Txt => RecordType::TXT,
            RecordKind::Ptr => RecordType::PTR,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for RecordKind {
    type Err = RecordFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| RecordFormatError::UnknownKind(s.to_string()))
    }
}

/// Split a record value into exactly `N` whitespace separated tokens.
pub(crate) fn tokens<const N: usize>(text: &str) -> Result<[&str; N], RecordFormatError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let actual = parts.len();
    parts
        .try_into()
        .map_err(|_| RecordFormatError::TokenCount { expected: N, actual })
}

/// Parse an unsigned numeric token, keeping the offending token for the error.
pub(crate) fn number<T>(token: &str) -> Result<T, RecordFormatError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    token
        .parse()
        .map_err(|source| RecordFormatError::InvalidNumber {
            token: token.to_string(),
            source,
        })
}
