//! Attribute data of the token resource.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::AttributeValue;
use super::schema::{EXPIRES, REFRESH_TOKEN, TOKEN};
use crate::credential::CredentialRecord;
use crate::credential::secret::{
    deserialize_option_secret, secrets_equal, serialize_option_secret,
};
use crate::{Error, Result};

/// Configuration, plan or state values of one token resource.
#[derive(Clone, Debug, Default)]
pub struct ResourceData {
    pub expires: AttributeValue<i64>,
    pub token: AttributeValue<SecretString>,
    pub refresh_token: AttributeValue<SecretString>,
}

impl ResourceData {
    /// State seeded by import: only the refresh token is known.
    pub fn imported(refresh_token: impl Into<SecretString>) -> Self {
        Self {
            refresh_token: AttributeValue::Known(refresh_token.into()),
            ..Default::default()
        }
    }

    pub fn has_unknown(&self) -> bool {
        self.expires.is_unknown() || self.token.is_unknown() || self.refresh_token.is_unknown()
    }

    /// Attribute-wise equality; secrets are compared without leaving this call.
    pub fn same_as(&self, other: &ResourceData) -> bool {
        self.expires == other.expires
            && secret_values_equal(&self.token, &other.token)
            && secret_values_equal(&self.refresh_token, &other.refresh_token)
    }

    /// The refresh token the next rotation consumes.
    pub fn known_refresh_token(&self) -> Result<&SecretString> {
        self.refresh_token
            .as_known()
            .ok_or_else(|| Error::config(format!("state has no known {}", REFRESH_TOKEN)))
    }

    /// Persistable form. Unknown values only exist in plans and cannot be stored.
    pub fn to_stored(&self) -> Result<StoredState> {
        if self.has_unknown() {
            return Err(Error::config("cannot persist state with unknown values"));
        }
        Ok(StoredState {
            expires: self.expires.as_known().copied(),
            token: self.token.as_known().cloned(),
            refresh_token: self.refresh_token.as_known().cloned(),
        })
    }
}

fn secret_values_equal(
    a: &AttributeValue<SecretString>,
    b: &AttributeValue<SecretString>,
) -> bool {
    match (a, b) {
        (AttributeValue::Known(a), AttributeValue::Known(b)) => secrets_equal(a, b),
        (AttributeValue::Null, AttributeValue::Null) => true,
        (AttributeValue::Unknown, AttributeValue::Unknown) => true,
        _ => false,
    }
}

impl From<CredentialRecord> for ResourceData {
    fn from(record: CredentialRecord) -> Self {
        Self {
            expires: AttributeValue::Known(record.expires_at()),
            token: AttributeValue::Known(record.token().clone()),
            refresh_token: AttributeValue::Known(record.refresh_token().clone()),
        }
    }
}

impl TryFrom<&ResourceData> for CredentialRecord {
    type Error = Error;

    fn try_from(data: &ResourceData) -> Result<Self> {
        let missing = |name: &str| Error::config(format!("{} is not known", name));

        let expires_at = *data.expires.as_known().ok_or_else(|| missing(EXPIRES))?;
        let token = data.token.as_known().ok_or_else(|| missing(TOKEN))?;
        let refresh_token = data
            .refresh_token
            .as_known()
            .ok_or_else(|| missing(REFRESH_TOKEN))?;

        CredentialRecord::new(token.clone(), refresh_token.clone(), expires_at)
            .map_err(|e| Error::config(format!("invalid state: {}", e)))
    }
}

/// Serialized state of one resource instance.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_option_secret",
        deserialize_with = "deserialize_option_secret"
    )]
    pub token: Option<SecretString>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_option_secret",
        deserialize_with = "deserialize_option_secret"
    )]
    pub refresh_token: Option<SecretString>,
}

impl From<StoredState> for ResourceData {
    fn from(stored: StoredState) -> Self {
        Self {
            expires: stored.expires.into(),
            token: stored.token.into(),
            refresh_token: stored.refresh_token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_imported_state() {
        let data = ResourceData::imported("R1");
        assert!(data.expires.is_null());
        assert!(data.token.is_null());
        assert_eq!(data.known_refresh_token().unwrap().expose_secret(), "R1");
        assert!(CredentialRecord::try_from(&data).is_err());
    }

    #[test]
    fn test_record_round_trip() {
        let record = CredentialRecord::new("T", "R", 100).unwrap();
        let data = ResourceData::from(record);
        let back = CredentialRecord::try_from(&data).unwrap();
        assert_eq!(back.expires_at(), 100);
        assert_eq!(back.token().expose_secret(), "T");
    }

    #[test]
    fn test_same_as() {
        let a = ResourceData::from(CredentialRecord::new("T", "R", 100).unwrap());
        let b = ResourceData::from(CredentialRecord::new("T", "R", 100).unwrap());
        let c = ResourceData::from(CredentialRecord::new("T2", "R", 100).unwrap());
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));

        let mut unknown = a.clone();
        unknown.token = AttributeValue::Unknown;
        assert!(!a.same_as(&unknown));
    }

    #[test]
    fn test_unknown_state_is_not_persistable() {
        let mut data = ResourceData::imported("R1");
        assert!(data.to_stored().is_ok());

        data.token = AttributeValue::Unknown;
        assert!(matches!(data.to_stored(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_stored_state_serde() {
        let stored = ResourceData::imported("R1").to_stored().unwrap();
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json, serde_json::json!({"refresh_token": "R1"}));

        let back: StoredState = serde_json::from_value(json).unwrap();
        let data = ResourceData::from(back);
        assert!(data.token.is_null());
        assert_eq!(data.known_refresh_token().unwrap().expose_secret(), "R1");
    }
}
