//! Substitution context types

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Values for the reserved placeholders, resolved before any record lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedValues {
    /// Replacement for `{pass}`
    pub pass: String,

    /// Replacement for `{adminUrl}`
    pub admin_url: String,

    /// Replacement for `{fromEmail}`
    pub from_email: String,
}

impl ReservedValues {
    pub fn new(
        pass: impl Into<String>,
        admin_url: impl Into<String>,
        from_email: impl Into<String>,
    ) -> Self {
        Self {
            pass: pass.into(),
            admin_url: admin_url.into(),
            from_email: from_email.into(),
        }
    }

    /// Resolve a reserved identifier, `None` if the identifier is not reserved
    pub fn get(&self, identifier: &str) -> Option<&str> {
        match identifier {
            "pass" => Some(&self.pass),
            "adminUrl" => Some(&self.admin_url),
            "fromEmail" => Some(&self.from_email),
            _ => None,
        }
    }
}

/// Field lookup on the account a message is rendered for
pub trait RecordLookup {
    /// Current value of `field`, `None` when the record has no such field
    fn field(&self, field: &str) -> Option<&str>;
}

/// Field-name to value mapping for a user account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord {
    fields: BTreeMap<String, String>,
}

impl UserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous one
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for UserRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl RecordLookup for UserRecord {
    fn field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

impl RecordLookup for HashMap<String, String> {
    fn field(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl RecordLookup for BTreeMap<String, String> {
    fn field(&self, field: &str) -> Option<&str> {
        self.get(field).map(String::as_str)
    }
}

impl<T: RecordLookup + ?Sized> RecordLookup for &T {
    fn field(&self, field: &str) -> Option<&str> {
        (**self).field(field)
    }
}
