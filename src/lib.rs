//! dnsclient
//!
//! Blocking lookups of A, AAAA, NS, SOA, MX, TXT and PTR records, returning plain Rust values:
//! address and name strings, a host → preference map for mail exchangers, and a parsed
//! [`SoaRecord`].
//!
//! Query encoding, transport and response decoding are done by [trust-dns]. This crate maps
//! each lookup onto a [`Directory`] and parses the text values it returns.
//!
//! [trust-dns]: https://github.com/bluejekyll/trust-dns
//!
#![warn(clippy::pedantic)]

pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod record;

pub use client::DnsClient;
pub use config::Config;
pub use directory::{Directory, InMemoryDirectory, NetworkDirectory};
pub use error::{Error, ErrorKind};
pub use record::{RecordKind, SoaRecord};
