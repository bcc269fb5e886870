//! A [`Directory`][super::Directory] that queries DNS servers with `trust-dns-client`.

use crate::config::Config;
use crate::directory::Directory;
use crate::error::Error;
use crate::record::RecordKind;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};
use trust_dns_client::client::{Client, SyncClient};
use trust_dns_client::error::ClientError;
use trust_dns_client::op::ResponseCode;
use trust_dns_client::rr::{DNSClass, Name, RData, Record, RecordType};
use trust_dns_client::tcp::TcpClientConnection;
use trust_dns_client::udp::UdpClientConnection;
use trust_dns_proto::rr::rdata::{SOA, TXT};
use trust_dns_proto::xfer::DnsResponse;

/// Queries a list of DNS servers over UDP, falling back to TCP for truncated answers.
///
/// Each lookup makes up to `retries` rounds over the servers, in order. The first round waits
/// `timeout` for each answer and every later round doubles the wait. A server that answers with
/// an error response code is not asked again for the same lookup.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct NetworkDirectory {
    servers: Vec<SocketAddr>,
    only_authoritative: bool,
    timeout: Duration,
    retries: u32,
}

enum Answer {
    Values(Option<Vec<String>>),
    NotFound,
    Failed(Error),
}

impl NetworkDirectory {
    /// Create a directory querying `servers`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoServers`] if `servers` is empty.
    pub fn new(
        servers: Vec<SocketAddr>,
        only_authoritative: bool,
        timeout: Duration,
        retries: u32,
    ) -> Result<Self, Error> {
        if servers.is_empty() {
            return Err(Error::NoServers);
        }
        Ok(NetworkDirectory {
            servers,
            only_authoritative,
            timeout,
            retries,
        })
    }

    /// Create a directory from a [`Config`], resolving its server address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoServers`] if no server is configured and the system has none, or
    /// [`Error::InvalidServer`] if the configured server can't be resolved.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(
            config.server_addrs()?,
            config.only_authoritative,
            config.timeout,
            config.retries,
        )
    }

    #[must_use]
    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    #[must_use]
    pub fn only_authoritative(&self) -> bool {
        self.only_authoritative
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn retries(&self) -> u32 {
        self.retries
    }

    fn query(
        server: SocketAddr,
        name: &Name,
        record_type: RecordType,
        timeout: Duration,
    ) -> Result<DnsResponse, ClientError> {
        let client = SyncClient::new(UdpClientConnection::with_timeout(server, timeout)?);
        let response = client.query(name, DNSClass::IN, record_type)?;
        if !response.header().truncated() {
            return Ok(response);
        }
        debug!("truncated answer from {server} for {name} {record_type}, retrying over TCP");
        let client = SyncClient::new(TcpClientConnection::with_timeout(server, timeout)?);
        client.query(name, DNSClass::IN, record_type)
    }

    fn answer(&self, name: &str, kind: RecordKind, response: &DnsResponse) -> Answer {
        match response.response_code() {
            ResponseCode::NXDomain => Answer::NotFound,
            ResponseCode::NoError
                if self.only_authoritative && !response.header().authoritative() =>
            {
                Answer::Failed(Error::NotAuthoritative(name.to_string()))
            }
            ResponseCode::NoError => Answer::Values(answer_values(response, kind)),
            code => Answer::Failed(Error::Naming {
                name: name.to_string(),
                code,
            }),
        }
    }
}

impl Directory for NetworkDirectory {
    fn lookup(&self, name: &str, kind: RecordKind) -> Result<Option<Vec<String>>, Error> {
        let mut query_name = Name::from_str(name)?;
        query_name.set_fqdn(true);
        let record_type = RecordType::from(kind);

        let mut answered = vec![false; self.servers.len()];
        let mut failure: Option<Error> = None;
        let mut last_error = String::from("no query sent");
        let mut attempts = 0;

        for round in 0..self.retries {
            let timeout = self.timeout.saturating_mul(2_u32.saturating_pow(round));
            for (i, server) in self.servers.iter().enumerate() {
                if answered[i] {
                    continue;
                }
                attempts += 1;
                debug!("querying {server} for {query_name} {record_type} (timeout {timeout:?})");
                let response = match Self::query(*server, &query_name, record_type, timeout) {
                    Ok(response) => response,
                    Err(err) => {
                        warn!("no answer from {server} for {query_name} {record_type}: {err}");
                        last_error = err.to_string();
                        continue;
                    }
                };
                match self.answer(name, kind, &response) {
                    Answer::Values(values) => {
                        debug!("{server} answered {query_name} {record_type}: {values:?}");
                        return Ok(values);
                    }
                    Answer::NotFound => {
                        debug!("{server} answered {query_name} {record_type}: NXDOMAIN");
                        return Err(Error::NotFound(name.to_string()));
                    }
                    Answer::Failed(err) => {
                        debug!("{server} failed {query_name} {record_type}: {err}");
                        answered[i] = true;
                        failure = Some(err);
                    }
                }
            }
            if answered.iter().all(|done| *done) {
                break;
            }
        }

        Err(failure.unwrap_or(Error::Communication {
            name: name.to_string(),
            attempts,
            last_error,
        }))
    }
}

/// The text values of the answers matching `kind`, or `None` if there are none.
fn answer_values(response: &DnsResponse, kind: RecordKind) -> Option<Vec<String>> {
    let record_type = RecordType::from(kind);
    let values: Vec<String> = response
        .answers()
        .iter()
        .filter(|record| record.record_type() == record_type)
        .filter_map(Record::data)
        .filter_map(rdata_text)
        .collect();
    (!values.is_empty()).then_some(values)
}

/// Render record data in the text form [`DnsClient`][crate::DnsClient] parses.
pub(crate) fn rdata_text(rdata: &RData) -> Option<String> {
    match rdata {
        RData::A(ip) => Some(ip.to_string()),
        RData::AAAA(ip) => Some(ip.to_string()),
        RData::NS(name) | RData::PTR(name) => Some(name.to_string()),
        RData::MX(mx) => Some(format!("{} {}", mx.preference(), mx.exchange())),
        RData::SOA(soa) => Some(soa_text(soa)),
        RData::TXT(txt) => Some(txt_text(txt)),
        _ => None,
    }
}

fn soa_text(soa: &SOA) -> String {
    // Intervals are unsigned on the wire.
    let unsigned = |v: i32| u32::from_ne_bytes(v.to_ne_bytes());
    format!(
        "{} {} {} {} {} {} {}",
        soa.mname(),
        soa.rname(),
        soa.serial(),
        unsigned(soa.refresh()),
        unsigned(soa.retry()),
        unsigned(soa.expire()),
        soa.minimum(),
    )
}

/// Character strings separated by a space. Each byte becomes one character (Latin-1), so no
/// byte is lost. A string is quoted when it is empty or contains a space, and quotes and
/// backslashes inside it are escaped.
fn txt_text(txt: &TXT) -> String {
    txt.iter()
        .map(|bytes| {
            let mut quoted = bytes.is_empty();
            let mut s = String::with_capacity(bytes.len() + 2);
            for c in bytes.iter().copied().map(char::from) {
                match c {
                    '"' | '\\' => {
                        quoted = true;
                        s.push('\\');
                    }
                    ' ' => quoted = true,
                    _ => {}
                }
                s.push(c);
            }
            if quoted {
                format!("\"{s}\"")
            } else {
                s
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
