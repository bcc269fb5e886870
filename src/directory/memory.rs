//! A static, in-memory implementation of the [`Directory`][super::Directory] trait.
//!
//! Useful for embedding fixed answers and for exercising [`DnsClient`][crate::DnsClient]
//! without a network. The table can be loaded from JSON of the form:
//!
//! ```json
//! {
//!   "example.com.": {
//!     "A": ["93.184.216.34"],
//!     "MX": ["10 mail.example.com."],
//!     "SOA": ["ns1.example.com. admin.example.com. 10 3600 900 604800 3600"]
//!   },
//!   "empty.example.com.": {}
//! }
//! ```
use crate::directory::{fqdn, Directory};
use crate::error::Error;
use crate::record::RecordKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

type Table = HashMap<String, HashMap<RecordKind, Vec<String>>>;

/// A fixed table of record values by name. Names are matched case-insensitively, with or
/// without a trailing dot.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Table", into = "Table")]
#[allow(clippy::module_name_repetitions)]
pub struct InMemoryDirectory {
    names: Table,
}

impl InMemoryDirectory {
    /// Load an [`InMemoryDirectory`] from the JSON table located at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened or read, and [`Error::InvalidJSON`] if
    /// the content isn't a valid table.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(p)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Make `name` exist without giving it any records.
    pub fn add_name(&mut self, name: &str) -> &mut Self {
        self.names.entry(fqdn(name)).or_default();
        self
    }

    /// Append a value for `kind` records of `name`, creating the name if needed.
    pub fn insert(&mut self, name: &str, kind: RecordKind, value: impl Into<String>) -> &mut Self {
        self.names
            .entry(fqdn(name))
            .or_default()
            .entry(kind)
            .or_default()
            .push(value.into());
        self
    }
}

impl From<Table> for InMemoryDirectory {
    fn from(table: Table) -> Self {
        let mut directory = InMemoryDirectory::default();
        for (name, records) in table {
            directory.add_name(&name);
            for (kind, values) in records {
                for value in values {
                    directory.insert(&name, kind, value);
                }
            }
        }
        directory
    }
}

impl From<InMemoryDirectory> for Table {
    fn from(directory: InMemoryDirectory) -> Self {
        directory.names
    }
}

impl Directory for InMemoryDirectory {
    fn lookup(&self, name: &str, kind: RecordKind) -> Result<Option<Vec<String>>, Error> {
        let records = self
            .names
            .get(&fqdn(name))
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        Ok(records
            .get(&kind)
            .filter(|values| !values.is_empty())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn three_lookup_outcomes() {
        let mut directory = InMemoryDirectory::default();
        directory
            .insert("Example.com", RecordKind::A, "93.184.216.34")
            .insert("example.com.", RecordKind::A, "93.184.216.35")
            .add_name("org");

        assert_eq!(
            directory.lookup("example.COM.", RecordKind::A).unwrap(),
            Some(vec!["93.184.216.34".to_string(), "93.184.216.35".to_string()])
        );
        assert_eq!(directory.lookup("org", RecordKind::A).unwrap(), None);
        assert_eq!(directory.lookup("example.com", RecordKind::Mx).unwrap(), None);
        let err = directory.lookup("nosuchhost.example.com", RecordKind::A).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn loads_and_normalizes_json() {
        let directory: InMemoryDirectory = serde_json::from_str(
            r#"{
                "Example.com": { "MX": ["10 mail.example.com."], "TXT": [] },
                "empty.example.com.": {}
            }"#,
        )
        .unwrap();

        assert_eq!(
            directory.lookup("example.com.", RecordKind::Mx).unwrap(),
            Some(vec!["10 mail.example.com.".to_string()])
        );
        assert_eq!(directory.lookup("example.com", RecordKind::Txt).unwrap(), None);
        assert_eq!(directory.lookup("empty.example.com", RecordKind::Ns).unwrap(), None);
    }

    #[test]
    fn missing_file_is_not_a_network_error() {
        let err = InMemoryDirectory::try_from_file("/nonexistent/zone.json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Naming);
    }

    #[test]
    fn rejects_unknown_kinds() {
        let result: Result<InMemoryDirectory, _> =
            serde_json::from_str(r#"{ "example.com.": { "CNAME": ["x."] } }"#);
        assert!(result.is_err());
    }
}
