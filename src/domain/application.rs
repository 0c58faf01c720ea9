use serde::{Deserialize, Serialize};

/// OAuth-style token bundle owned by an [`ApplicationRecord`]
///
/// Immutable once received; all fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCache {
    pub token_type: String,
    pub expires_in: i64,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Registered application payload
///
/// Owns exactly one [`TokenCache`]. The JSON key `type` is a Rust keyword,
/// so the field carries a serde rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub subdomain: String,
    pub client_id: String,
    pub client_secret: String,
    pub account_id: i64,
    pub account_name: String,
    pub token_cache: TokenCache,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "type": "crm",
            "subdomain": "example",
            "client_id": "id-1",
            "client_secret": "secret-1",
            "account_id": 42,
            "account_name": "Example LLC",
            "token_cache": {
                "token_type": "Bearer",
                "expires_in": 86400,
                "access_token": "aaa",
                "refresh_token": "bbb",
                "expires_at": 1800000000
            }
        })
    }

    #[test]
    fn type_key_maps_to_kind() {
        let record: ApplicationRecord = serde_json::from_value(sample()).unwrap();
        assert_eq!(record.kind, "crm");

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["type"], "crm");
        assert!(back.get("kind").is_none());
    }

    #[test]
    fn missing_token_cache_field_fails() {
        let mut value = sample();
        value["token_cache"].as_object_mut().unwrap().remove("expires_at");
        let result: Result<ApplicationRecord, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }

    #[test]
    fn non_integer_account_id_fails() {
        let mut value = sample();
        value["account_id"] = json!("not a number");
        let result: Result<ApplicationRecord, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
