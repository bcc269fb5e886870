use crate::directory::system;
use crate::error::Error;
use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

pub const DNS_PORT: u16 = 53;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);
pub const DEFAULT_RETRIES: u32 = 4;

/// Settings for a [`NetworkDirectory`][crate::NetworkDirectory], fixed for the lifetime of a
/// [`DnsClient`][crate::DnsClient].
///
/// Every field is optional in JSON:
///
/// ```json
/// { "server": "8.8.8.8", "only_authoritative": false, "timeout_ms": 1000, "retries": 4 }
/// ```
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// DNS server as an IP address, `ip:port`, host name or `host:port`. When unset, the
    /// operating system's resolvers are used.
    pub server: Option<String>,
    /// Accept only authoritative answers.
    pub only_authoritative: bool,
    /// Wait for the first attempt at each server. Doubled for every retry round.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "timeout_ms")]
    pub timeout: Duration,
    /// Rounds of queries over the servers before giving up.
    pub retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: None,
            only_authoritative: false,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }
}

impl Config {
    /// Default settings against a specific server.
    #[must_use]
    pub fn with_server(server: impl Into<String>) -> Self {
        Config {
            server: Some(server.into()),
            ..Config::default()
        }
    }

    /// Load a [`Config`] from the JSON located at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened or read, and [`Error::InvalidJSON`] if
    /// the content isn't a valid config.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }

    /// The socket addresses to query: the configured server, or the system resolvers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoServers`] if no server is configured and the system has none, and
    /// [`Error::InvalidServer`] if the configured server doesn't resolve to any address.
    pub fn server_addrs(&self) -> Result<Vec<SocketAddr>, Error> {
        match &self.server {
            Some(server) => resolve_server(server),
            None => {
                let addrs = system::name_server_addrs();
                if addrs.is_empty() {
                    return Err(Error::NoServers);
                }
                Ok(addrs)
            }
        }
    }
}

fn resolve_server(server: &str) -> Result<Vec<SocketAddr>, Error> {
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(vec![addr]);
    }
    if let Ok(ip) = server.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, DNS_PORT)]);
    }
    let invalid = |_| Error::InvalidServer(server.to_string());
    let addrs: Vec<SocketAddr> = match server.rsplit_once(':') {
        Some((_, port)) if port.parse::<u16>().is_ok() => {
            server.to_socket_addrs().map_err(invalid)?.collect()
        }
        _ => (server, DNS_PORT).to_socket_addrs().map_err(invalid)?.collect(),
    };
    if addrs.is_empty() {
        return Err(Error::InvalidServer(server.to_string()));
    }
    Ok(addrs)
}
