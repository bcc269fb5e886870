//! The operating system's resolver configuration.

use crate::config::DNS_PORT;
use std::fmt::Display;
use std::net::SocketAddr;
use tracing::warn;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::system_conf::read_system_conf;

/// Socket addresses of the DNS resolvers configured for the operating system (e.g. the
/// `nameserver` lines of `/etc/resolv.conf`), in configuration order and without duplicates.
///
/// No network I/O is performed. When the configuration can't be read the list is empty.
#[must_use]
pub fn name_server_addrs() -> Vec<SocketAddr> {
    addrs_from(read_system_conf())
}

/// The resolvers as reported: the IP alone on the standard port, `ip:port` otherwise.
#[must_use]
pub fn name_servers() -> Vec<String> {
    display_addrs(&name_server_addrs())
}

fn addrs_from<E: Display>(conf: Result<(ResolverConfig, ResolverOpts), E>) -> Vec<SocketAddr> {
    match conf {
        Ok((config, _opts)) => {
            let mut addrs: Vec<SocketAddr> = Vec::new();
            // Each resolver is listed once per protocol.
            for ns in config.name_servers() {
                if !addrs.contains(&ns.socket_addr) {
                    addrs.push(ns.socket_addr);
                }
            }
            addrs
        }
        Err(err) => {
            warn!("unable to read system resolver configuration: {err}");
            Vec::new()
        }
    }
}

fn display_addrs(addrs: &[SocketAddr]) -> Vec<String> {
    addrs
        .iter()
        .map(|addr| match addr.port() {
            DNS_PORT => addr.ip().to_string(),
            _ => addr.to_string(),
        })
        .collect()
}
