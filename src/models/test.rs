use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::region::empty_object;
use crate::utils::validation::validate_json_object;

/// One assessment session performed by a device.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Test {
    pub id: Uuid,
    pub device_id: String,
    pub selected_region_id: Option<Uuid>,
    pub total_score: i32,
    pub breakdown: JsonValue,
    pub summary_line: Option<String>,
    pub reasons: Vec<String>,
    pub next_steps: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewTest {
    #[validate(length(min = 1, max = 128))]
    pub device_id: String,
    pub selected_region_id: Option<Uuid>,
    #[serde(default)]
    pub total_score: i32,
    #[serde(default = "empty_object")]
    #[validate(custom(function = "validate_json_object"))]
    pub breakdown: JsonValue,
    #[validate(length(max = 255))]
    pub summary_line: Option<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

impl NewTest {
    pub fn for_device(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            breakdown: empty_object(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_device_starts_with_an_empty_breakdown() {
        let t = NewTest::for_device("device-1");
        assert!(t.breakdown.as_object().is_some_and(|m| m.is_empty()));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn device_id_and_summary_bounds() {
        let mut t = NewTest::for_device("");
        assert!(t.validate().is_err());

        t.device_id = "d".repeat(129);
        assert!(t.validate().is_err());

        t.device_id = "d".repeat(128);
        t.summary_line = Some("s".repeat(256));
        assert!(t.validate().is_err());

        t.summary_line = Some("s".repeat(255));
        assert!(t.validate().is_ok());
    }
}
