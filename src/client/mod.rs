//! Typed DNS lookups.
//!
//! [`DnsClient`] maps each supported record kind onto a [`Directory`] lookup and converts the
//! returned text values. Every lookup blocks the calling thread and has three outcomes:
//!
//! * `Ok(Some(_))`: the name has records of the requested kind.
//! * `Ok(None)`: the name exists but has no records of that kind. For example, `org` has no
//!   `A` record.
//! * `Err(_)`: the name doesn't exist ([`ErrorKind::NotFound`][crate::error::ErrorKind]), no
//!   server answered, or a value was malformed.
//!
//! ```no_run
//! use dnsclient::DnsClient;
//!
//! # fn main() -> Result<(), dnsclient::error::Error> {
//! let client = DnsClient::with_server("8.8.8.8")?;
//! if let Some(soa) = client.soa("example.com")? {
//!     println!("{soa}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod reverse;

use crate::config::Config;
use crate::directory::{system, Directory, NetworkDirectory};
use crate::error::Error;
use crate::record::{mx, RecordKind, SoaRecord};
use std::collections::HashMap;
use std::net::IpAddr;
use tracing::debug;

pub use reverse::{
    octets_from_dotted, octets_from_signed, reverse_lookup_name, reverse_lookup_name_v6,
};

/// Blocking lookups of A, AAAA, NS, SOA, MX, TXT and PTR records.
///
/// Settings such as the server, timeout and retries belong to the [`Directory`] and are fixed
/// at construction.
#[derive(Debug, Clone)]
pub struct DnsClient<D = NetworkDirectory> {
    directory: D,
}

impl DnsClient<NetworkDirectory> {
    /// A client using the operating system's resolvers, accepting non-authoritative answers,
    /// with a 1 second initial timeout and 4 retries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoServers`] if the system has no resolvers configured.
    pub fn system() -> Result<Self, Error> {
        Self::from_config(&Config::default())
    }

    /// A client querying `server` with the same defaults as [`DnsClient::system`]. The server
    /// must be reachable directly, usually on UDP port 53.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidServer`] if `server` doesn't resolve to an address.
    pub fn with_server(server: &str) -> Result<Self, Error> {
        Self::from_config(&Config::with_server(server))
    }

    /// A client with explicit settings.
    ///
    /// # Errors
    ///
    /// See [`NetworkDirectory::from_config`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self::new(NetworkDirectory::from_config(config)?))
    }

    /// Addresses of the operating system's DNS resolvers, in configuration order. A resolver on
    /// port 53 is reported as its IP, one on another port as `ip:port`; a resolver listed more
    /// than once is reported once. Performs no network I/O and may be empty.
    #[must_use]
    pub fn system_name_servers() -> Vec<String> {
        system::name_servers()
    }
}

impl<D: Directory> DnsClient<D> {
    pub fn new(directory: D) -> Self {
        DnsClient { directory }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Authoritative name servers of `domain`, as received.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `domain` doesn't exist.
    pub fn name_servers(&self, domain: &str) -> Result<Option<Vec<String>>, Error> {
        self.records(domain, RecordKind::Ns)
    }

    /// The start of authority record of `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `domain` doesn't exist and [`Error::Format`] if the SOA
    /// value isn't seven tokens with unsigned 32 bit numbers.
    pub fn soa(&self, domain: &str) -> Result<Option<SoaRecord>, Error> {
        let Some(text) = self.first(domain, RecordKind::Soa)? else {
            return Ok(None);
        };
        SoaRecord::parse(domain, &text)
            .map(Some)
            .map_err(|source| Error::format(RecordKind::Soa, &text, source))
    }

    /// IPv4 addresses of `host_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `host_name` doesn't exist.
    pub fn ipv4_by_host_name(&self, host_name: &str) -> Result<Option<Vec<String>>, Error> {
        self.records(host_name, RecordKind::A)
    }

    /// IPv6 addresses of `host_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `host_name` doesn't exist.
    pub fn ipv6_by_host_name(&self, host_name: &str) -> Result<Option<Vec<String>>, Error> {
        self.records(host_name, RecordKind::Aaaa)
    }

    /// Mail exchangers of `domain`, mapped to their preference. Not sorted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `domain` doesn't exist and [`Error::Format`] if an MX
    /// value isn't `"<preference> <host>"`.
    pub fn mail_exchanger_servers(
        &self,
        domain: &str,
    ) -> Result<Option<HashMap<String, u16>>, Error> {
        let Some(values) = self.records(domain, RecordKind::Mx)? else {
            return Ok(None);
        };
        values
            .iter()
            .map(|text| mx::parse(text).map_err(|source| Error::format(RecordKind::Mx, text, source)))
            .collect::<Result<HashMap<String, u16>, Error>>()
            .map(Some)
    }

    /// Host name of a dotted decimal IPv4 address such as `"140.211.11.130"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `address` isn't dotted decimal, and [`Error::NotFound`] if
    /// the reverse name doesn't exist.
    pub fn host_name_by_ip(&self, address: &str) -> Result<Option<String>, Error> {
        self.host_name_by_octets(&octets_from_dotted(address)?)
    }

    /// Host name of an IPv4 address (or prefix) given as one to four octets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if `octets` is empty or longer than four, and
    /// [`Error::NotFound`] if the reverse name doesn't exist.
    pub fn host_name_by_octets(&self, octets: &[u8]) -> Result<Option<String>, Error> {
        self.first(&reverse_lookup_name(octets)?, RecordKind::Ptr)
    }

    /// Host name of an IPv4 address given as two's complement bytes; `-116` is octet `140`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] unless there are one to four bytes, and [`Error::NotFound`]
    /// if the reverse name doesn't exist.
    pub fn host_name_by_signed_octets(&self, bytes: &[i8]) -> Result<Option<String>, Error> {
        self.host_name_by_octets(&octets_from_signed(bytes))
    }

    /// Host name of an IPv4 or IPv6 address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the reverse name doesn't exist.
    pub fn host_name_by_addr(&self, addr: IpAddr) -> Result<Option<String>, Error> {
        match addr {
            IpAddr::V4(v4) => self.host_name_by_octets(&v4.octets()),
            IpAddr::V6(v6) => self.first(&reverse_lookup_name_v6(v6), RecordKind::Ptr),
        }
    }

    /// The first descriptive text value of `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `domain` doesn't exist.
    pub fn text(&self, domain: &str) -> Result<Option<String>, Error> {
        self.first(domain, RecordKind::Txt)
    }

    fn records(&self, name: &str, kind: RecordKind) -> Result<Option<Vec<String>>, Error> {
        let values = self.directory.lookup(name, kind)?;
        if values.is_none() {
            debug!("no {kind} records for {name}");
        }
        Ok(values)
    }

    fn first(&self, name: &str, kind: RecordKind) -> Result<Option<String>, Error> {
        Ok(self
            .records(name, kind)?
            .and_then(|values| values.into_iter().next()))
    }
}
