use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_country_code, validate_json_object};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Region {
    pub id: Uuid,
    pub country_code: String,
    pub country_name: String,
    pub region_name: String,
    pub city_type: String,
    pub base_score: i32,
    pub base_breakdown: JsonValue,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Region {
    pub fn city_type(&self) -> Option<CityType> {
        self.city_type.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityType {
    #[default]
    Metro,
    Regional,
}

impl CityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CityType::Metro => "metro",
            CityType::Regional => "regional",
        }
    }
}

impl fmt::Display for CityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metro" => Ok(CityType::Metro),
            "regional" => Ok(CityType::Regional),
            other => Err(format!("unknown city type: {}", other)),
        }
    }
}

/// Values for a Region insert. `id` and `created_at` are assigned on write.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRegion {
    #[validate(custom(function = "validate_country_code"))]
    pub country_code: String,
    #[validate(length(min = 1, max = 64))]
    pub country_name: String,
    #[validate(length(min = 1, max = 64))]
    pub region_name: String,
    #[serde(default)]
    pub city_type: CityType,
    #[serde(default)]
    pub base_score: i32,
    #[serde(default = "empty_object")]
    #[validate(custom(function = "validate_json_object"))]
    pub base_breakdown: JsonValue,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub(crate) fn empty_object() -> JsonValue {
    JsonValue::Object(Default::default())
}
