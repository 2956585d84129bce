//! Identity — a uniquely identified participant in the graph.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A graph participant.
///
/// Created invalid. The first successful [`Identity::set_id`] makes it valid
/// and fixes its id for good; profile fields can only be set afterwards.
/// Equality and hashing use the id alone.
///
/// Deserialization goes through the same setters, so an empty id or a
/// profile on an identity without an id is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "IdentityRecord")]
pub struct Identity {
    id: Option<String>,
    first_name: Option<String>,
    middle_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

impl Identity {
    /// An invalid identity with no id.
    pub fn new() -> Self {
        Self::default()
    }

    /// A valid identity with the given id.
    pub fn with_id(id: &str) -> Result<Self> {
        let mut identity = Self::new();
        identity.set_id(id)?;
        Ok(identity)
    }

    /// Assign the id. Returns `Ok(false)` without touching anything if the
    /// identity is already valid. An empty id is rejected in either case.
    pub fn set_id(&mut self, id: &str) -> Result<bool> {
        if id.is_empty() {
            return Err(Error::MissingValue("id"));
        }
        if self.id.is_some() {
            return Ok(false);
        }
        self.id = Some(id.to_string());
        Ok(true)
    }

    pub fn is_valid(&self) -> bool {
        self.id.is_some()
    }

    /// The id, or `None` while invalid.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> { self.first_name.as_deref() }
    pub fn middle_name(&self) -> Option<&str> { self.middle_name.as_deref() }
    pub fn last_name(&self) -> Option<&str> { self.last_name.as_deref() }
    pub fn email(&self) -> Option<&str> { self.email.as_deref() }
    pub fn phone(&self) -> Option<&str> { self.phone.as_deref() }

    pub fn set_first_name(&mut self, value: &str) -> Result<()> {
        let v = self.profile_value("first_name", value)?;
        self.first_name = Some(v);
        Ok(())
    }

    pub fn set_middle_name(&mut self, value: &str) -> Result<()> {
        let v = self.profile_value("middle_name", value)?;
        self.middle_name = Some(v);
        Ok(())
    }

    pub fn set_last_name(&mut self, value: &str) -> Result<()> {
        let v = self.profile_value("last_name", value)?;
        self.last_name = Some(v);
        Ok(())
    }

    pub fn set_email(&mut self, value: &str) -> Result<()> {
        let v = self.profile_value("email", value)?;
        if !v.contains('@') {
            return Err(Error::InvalidValue { field: "email", reason: "must contain '@'" });
        }
        self.email = Some(v);
        Ok(())
    }

    pub fn set_phone(&mut self, value: &str) -> Result<()> {
        let v = self.profile_value("phone", value)?;
        self.phone = Some(v);
        Ok(())
    }

    /// Builder-style variant of [`Identity::set_first_name`] and
    /// [`Identity::set_last_name`].
    pub fn with_name(mut self, first: &str, last: &str) -> Result<Self> {
        self.set_first_name(first)?;
        self.set_last_name(last)?;
        Ok(self)
    }

    fn profile_value(&self, field: &'static str, value: &str) -> Result<String> {
        if !self.is_valid() {
            return Err(Error::Uninitialized("identity"));
        }
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingValue(field));
        }
        Ok(trimmed.to_string())
    }
}

/// Wire shape of an [`Identity`], validated on the way in.
#[derive(Deserialize)]
struct IdentityRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    middle_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

impl TryFrom<IdentityRecord> for Identity {
    type Error = Error;

    fn try_from(record: IdentityRecord) -> Result<Self> {
        let mut identity = Identity::new();
        if let Some(id) = &record.id {
            identity.set_id(id)?;
        }
        let setters: [(Option<String>, fn(&mut Identity, &str) -> Result<()>); 5] = [
            (record.first_name, Identity::set_first_name),
            (record.middle_name, Identity::set_middle_name),
            (record.last_name, Identity::set_last_name),
            (record.email, Identity::set_email),
            (record.phone, Identity::set_phone),
        ];
        for (value, set) in setters {
            if let Some(v) = value {
                set(&mut identity, &v)?;
            }
        }
        Ok(identity)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(id) = &self.id else {
            return f.write_str("Invalid identity");
        };
        write!(f, "Identity {id}")?;
        let name: Vec<&str> = [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        if !name.is_empty() {
            write!(f, " ({})", name.join(" "))?;
        }
        if let Some(email) = &self.email {
            write!(f, " <{email}>")?;
        }
        if let Some(phone) = &self.phone {
            write!(f, " tel:{phone}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_id_once() {
        let mut ada = Identity::new();
        assert!(!ada.is_valid());
        assert!(ada.set_id("ada").unwrap());
        assert!(!ada.set_id("grace").unwrap());
        assert_eq!(ada.id(), Some("ada"));
    }

    #[test]
    fn test_set_id_empty_is_contract_violation() {
        let mut nobody = Identity::new();
        let err = nobody.set_id("").unwrap_err();
        assert!(err.is_contract_violation());
        assert!(!nobody.is_valid());

        let mut ada = Identity::with_id("ada").unwrap();
        assert!(matches!(ada.set_id(""), Err(Error::MissingValue("id"))));
        assert_eq!(ada.id(), Some("ada"));
    }

    #[test]
    fn test_profile_requires_valid_identity() {
        let mut nobody = Identity::new();
        assert!(matches!(
            nobody.set_first_name("Ada"),
            Err(Error::Uninitialized(_))
        ));
        assert_eq!(nobody.first_name(), None);
    }

    #[test]
    fn test_profile_setters_validate() {
        let mut ada = Identity::with_id("ada").unwrap();
        ada.set_first_name("  Ada ").unwrap();
        assert_eq!(ada.first_name(), Some("Ada"));
        assert!(matches!(ada.set_last_name("   "), Err(Error::MissingValue("last_name"))));
        assert!(matches!(
            ada.set_email("not-an-address"),
            Err(Error::InvalidValue { field: "email", .. })
        ));
        ada.set_email("ada@example.org").unwrap();
        assert_eq!(ada.email(), Some("ada@example.org"));
    }

    #[test]
    fn test_equality_by_id_only() {
        let a = Identity::with_id("1").unwrap().with_name("Ada", "Lovelace").unwrap();
        let b = Identity::with_id("1").unwrap();
        let c = Identity::with_id("2").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        assert_eq!(Identity::new().to_string(), "Invalid identity");
        let mut ada = Identity::with_id("1").unwrap().with_name("Ada", "Lovelace").unwrap();
        ada.set_email("ada@example.org").unwrap();
        assert_eq!(ada.to_string(), "Identity 1 (Ada Lovelace) <ada@example.org>");
    }

    #[test]
    fn test_deserialize_valid_identity() {
        let ada: Identity = serde_json::from_str(
            r#"{"id":"ada","first_name":"Ada","last_name":"Lovelace","email":"ada@example.org"}"#,
        )
        .unwrap();
        assert!(ada.is_valid());
        assert_eq!(ada.to_string(), "Identity ada (Ada Lovelace) <ada@example.org>");

        let round: Identity = serde_json::from_str(&serde_json::to_string(&ada).unwrap()).unwrap();
        assert_eq!(round.email(), Some("ada@example.org"));
        assert!(!serde_json::from_str::<Identity>("{}").unwrap().is_valid());
    }

    #[test]
    fn test_deserialize_rejects_broken_identity() {
        for doc in [
            r#"{"id":""}"#,
            r#"{"id":null,"first_name":"Ada"}"#,
            r#"{"first_name":"Ada","email":"x"}"#,
            r#"{"id":"ada","email":"x"}"#,
            r#"{"id":"ada","phone":"   "}"#,
        ] {
            assert!(serde_json::from_str::<Identity>(doc).is_err(), "accepted {doc}");
        }
    }
}
