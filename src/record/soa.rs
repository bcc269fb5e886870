//! Start of authority record.

use crate::error::RecordFormatError;
use crate::record::{number, tokens};
use serde::Serialize;
use std::fmt;

/// A parsed start of authority (SOA) record for a zone.
///
/// Values are immutable once constructed. All time intervals are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoaRecord {
    domain: String,
    primary_name_server: String,
    responsible_mail_address: String,
    serial: u32,
    refresh_period: u32,
    retry_period: u32,
    expire_period: u32,
    #[serde(rename = "defaultTTL")]
    default_ttl: u32,
}

impl SoaRecord {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        primary_name_server: impl Into<String>,
        responsible_mail_address: impl Into<String>,
        serial: u32,
        refresh_period: u32,
        retry_period: u32,
        expire_period: u32,
        default_ttl: u32,
    ) -> Self {
        SoaRecord {
            domain: domain.into(),
            primary_name_server: primary_name_server.into(),
            responsible_mail_address: responsible_mail_address.into(),
            serial,
            refresh_period,
            retry_period,
            expire_period,
            default_ttl,
        }
    }

    /// Parse the text value of an SOA answer for `domain`.
    ///
    /// The value must hold exactly seven whitespace separated tokens:
    /// `<mname> <rname> <serial> <refresh> <retry> <expire> <minimum>`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordFormatError::TokenCount`] for any other number of tokens, and
    /// [`RecordFormatError::InvalidNumber`] when a numeric token isn't an unsigned 32 bit integer.
    pub fn parse(domain: impl Into<String>, text: &str) -> Result<Self, RecordFormatError> {
        let [mname, rname, serial, refresh, retry, expire, minimum] = tokens::<7>(text)?;
        Ok(SoaRecord::new(
            domain,
            mname,
            rname,
            number(serial)?,
            number(refresh)?,
            number(retry)?,
            number(expire)?,
            number(minimum)?,
        ))
    }

    /// The zone this record describes.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Name of the server that was the original or primary source of data for the zone.
    #[must_use]
    pub fn primary_name_server(&self) -> &str {
        &self.primary_name_server
    }

    /// Mailbox of the person responsible for the zone, encoded as a domain name.
    #[must_use]
    pub fn responsible_mail_address(&self) -> &str {
        &self.responsible_mail_address
    }

    /// Version number of the zone.
    #[must_use]
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// Interval before the zone should be refreshed.
    #[must_use]
    pub fn refresh_period(&self) -> u32 {
        self.refresh_period
    }

    /// Interval that should elapse before a failed refresh is retried.
    #[must_use]
    pub fn retry_period(&self) -> u32 {
        self.retry_period
    }

    /// Upper limit on the interval that can elapse before the zone is no longer authoritative.
    #[must_use]
    pub fn expire_period(&self) -> u32 {
        self.expire_period
    }

    /// Minimum TTL for records of the zone.
    #[must_use]
    pub fn default_ttl(&self) -> u32 {
        self.default_ttl
    }
}

impl fmt::Display for SoaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Domain={} primaryNameServer={} responsibleMailAddress={} serial={} \
             refreshPeriod={} retryPeriod={} expirePeriod={} defaultTTL={}",
            self.domain,
            self.primary_name_server,
            self.responsible_mail_address,
            self.serial,
            self.refresh_period,
            self.retry_period,
            self.expire_period,
            self.default_ttl,
        )
    }
}
