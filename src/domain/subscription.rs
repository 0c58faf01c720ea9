use serde::{Deserialize, Serialize};

/// Subscription payload
///
/// All fields are required; there are no defaults. The structure is
/// received, echoed back, and discarded - nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub enabled: bool,
    pub date_start: i64,
    pub date_end: i64,
    pub generations_count: i64,
    pub generations_limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_required() {
        let result: Result<Subscription, _> =
            serde_json::from_str(r#"{"enabled": true, "date_start": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn full_payload_binds() {
        let subscription: Subscription = serde_json::from_str(
            r#"{
                "enabled": true,
                "date_start": 1700000000,
                "date_end": 1800000000,
                "generations_count": 3,
                "generations_limit": 100
            }"#,
        )
        .unwrap();
        assert!(subscription.enabled);
        assert_eq!(subscription.generations_limit, 100);
    }
}
