//! Reverse lookup names.

use crate::error::{Error, RecordFormatError};
use crate::record::RecordKind;
use std::fmt::Write;
use std::net::Ipv6Addr;

const MAX_OCTETS: usize = 4;

/// Convert a dotted decimal address (`"140.211.11.130"`, or a prefix like `"140.211"`) to
/// octets.
///
/// # Errors
///
/// Returns [`Error::Format`] if a part isn't a number between 0 and 255, or if there are more
/// than four parts.
pub fn octets_from_dotted(address: &str) -> Result<Vec<u8>, Error> {
    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() > MAX_OCTETS {
        return Err(Error::format(
            RecordKind::Ptr,
            address,
            RecordFormatError::TokenCount {
                expected: MAX_OCTETS,
                actual: parts.len(),
            },
        ));
    }
    parts
        .into_iter()
        .map(|part| {
            part.parse::<u8>().map_err(|_| {
                Error::format(
                    RecordKind::Ptr,
                    address,
                    RecordFormatError::InvalidOctet(part.to_string()),
                )
            })
        })
        .collect()
}

/// Reinterpret two's complement bytes as unsigned octets, e.g. `-116` becomes `140`.
#[must_use]
pub fn octets_from_signed(bytes: &[i8]) -> Vec<u8> {
    bytes
        .iter()
        .map(|b| u8::from_ne_bytes(b.to_ne_bytes()))
        .collect()
}

/// The `in-addr.arpa` name for an IPv4 address (or prefix): octets in reverse order.
///
/// # Errors
///
/// Returns [`Error::Format`] unless there are between one and four octets.
pub fn reverse_lookup_name(octets: &[u8]) -> Result<String, Error> {
    if octets.is_empty() || octets.len() > MAX_OCTETS {
        let text = octets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        return Err(Error::format(
            RecordKind::Ptr,
            &text,
            RecordFormatError::TokenCount {
                expected: MAX_OCTETS,
                actual: octets.len(),
            },
        ));
    }
    let mut name = String::new();
    for octet in octets.iter().rev() {
        // Writing to a String can't fail.
        let _ = write!(name, "{octet}.");
    }
    name.push_str("in-addr.arpa");
    Ok(name)
}

/// The `ip6.arpa` name for an IPv6 address: nibbles in reverse order.
#[must_use]
pub fn reverse_lookup_name_v6(addr: Ipv6Addr) -> String {
    let mut name = String::with_capacity(72);
    for octet in addr.octets().iter().rev() {
        let _ = write!(name, "{:x}.{:x}.", octet & 0x0f, octet >> 4);
    }
    name.push_str("ip6.arpa");
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn reverses_octets() {
        let octets = octets_from_dotted("140.211.11.130").unwrap();
        assert_eq!(octets, vec![140, 211, 11, 130]);
        assert_eq!(reverse_lookup_name(&octets).unwrap(), "130.11.211.140.in-addr.arpa");
        assert_eq!(reverse_lookup_name(&[1, 2, 3, 4]).unwrap(), "4.3.2.1.in-addr.arpa");
    }

    #[test]
    fn reverses_prefixes() {
        let octets = octets_from_dotted("140.211").unwrap();
        assert_eq!(reverse_lookup_name(&octets).unwrap(), "211.140.in-addr.arpa");
        assert_eq!(reverse_lookup_name(&[10]).unwrap(), "10.in-addr.arpa");
    }

    #[test]
    fn rejects_empty_and_oversized_octets() {
        let cases: [&[u8]; 3] = [&[], &[1, 2, 3, 4, 5], &[0xfe, 0x80, 0, 0, 0, 1]];
        for bad in cases {
            let err = reverse_lookup_name(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{bad:?}");
            assert!(matches!(
                err,
                Error::Format {
                    kind: RecordKind::Ptr,
                    source: RecordFormatError::TokenCount { expected: 4, .. },
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_bad_dotted_addresses() {
        for bad in ["256.1.1.1", "1.2.3.4.5", "a.b.c.d", "", "1..2.3"] {
            let err = octets_from_dotted(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{bad}");
        }
    }

    #[test]
    fn signed_bytes_become_unsigned_octets() {
        assert_eq!(octets_from_signed(&[-116]), vec![140]);
        assert_eq!(octets_from_signed(&[-116, -45, 11, -126]), vec![140, 211, 11, 130]);
        assert_eq!(octets_from_signed(&[0, 127, -128, -1]), vec![0, 127, 128, 255]);
    }

    #[test]
    fn reverses_ipv6_nibbles() {
        let addr: Ipv6Addr = "2001:db8::567:89ab".parse().unwrap();
        assert_eq!(
            reverse_lookup_name_v6(addr),
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
        );
    }
}
