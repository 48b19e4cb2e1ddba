//! Job DTOs for the job-service REST surface

use serde::{Deserialize, Serialize};

/// PATCH body for rescheduling a job.
///
/// The repeat fields are left out of the JSON entirely when unset; the job
/// service treats their presence as a request to change them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub expiration_time: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reschedule_body_omits_unset_repeat_fields() {
        let req = RescheduleRequest {
            expiration_time: chrono::Utc::now(),
            repeat_interval: None,
            repeat_limit: None,
        };

        let body = serde_json::to_value(&req).unwrap();
        let obj = body.as_object().unwrap();
        assert!(obj.contains_key("expirationTime"));
        assert!(!obj.contains_key("repeatInterval"));
        assert!(!obj.contains_key("repeatLimit"));
    }

    #[test]
    fn test_reschedule_body_carries_repeat_fields_when_set() {
        let req = RescheduleRequest {
            expiration_time: chrono::Utc::now(),
            repeat_interval: Some(2),
            repeat_limit: Some(1),
        };

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["repeatInterval"], 2);
        assert_eq!(body["repeatLimit"], 1);
    }
}
