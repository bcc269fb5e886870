//! Record lookup backends.
//!
//! A [`Directory`] answers one question: which text values of a [`RecordKind`] exist for a
//! name. [`DnsClient`][crate::DnsClient] builds every typed lookup on top of it.
//!
//! Two implementations are provided, [`network::NetworkDirectory`] and
//! [`memory::InMemoryDirectory`]. The former queries DNS servers over the network using
//! `trust-dns-client`, owning the timeout and retry policy. The latter serves a fixed table of
//! values and never touches the network.
//!
//! Lookups have three outcomes:
//!
//! * `Ok(Some(values))`: the name has records of the kind, in the order received.
//! * `Ok(None)`: the name exists but has no records of the kind.
//! * `Err(_)`: the name doesn't exist ([`Error::NotFound`]) or the lookup failed.

use crate::error::Error;
use crate::record::RecordKind;

pub mod memory;
pub mod network;
pub mod system;

#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryDirectory;
#[allow(clippy::module_name_repetitions)]
pub use network::NetworkDirectory;

/// A blocking source of record values keyed by name and [`RecordKind`].
pub trait Directory {
    /// Look up the values of `kind` records for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `name` does not exist, or another [`Error`] if the lookup
    /// could not be completed.
    fn lookup(&self, name: &str, kind: RecordKind) -> Result<Option<Vec<String>>, Error>;
}

impl<D: Directory + ?Sized> Directory for &D {
    fn lookup(&self, name: &str, kind: RecordKind) -> Result<Option<Vec<String>>, Error> {
        (**self).lookup(name, kind)
    }
}

impl<D: Directory + ?Sized> Directory for Box<D> {
    fn lookup(&self, name: &str, kind: RecordKind) -> Result<Option<Vec<String>>, Error> {
        (**self).lookup(name, kind)
    }
}

/// Normalize a name for comparison: lower case, with a single trailing dot.
pub(crate) fn fqdn(name: &str) -> String {
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    format!("{name}.")
}
