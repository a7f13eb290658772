use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::region::empty_object;
use crate::utils::validation::validate_json_object;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestAnswer {
    pub id: Uuid,
    pub test_id: Uuid,
    pub question_id: String,
    pub text_answer: Option<String>,
    pub selected_options: Vec<String>,
    pub extra: JsonValue,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTestAnswer {
    #[validate(length(min = 1, max = 64))]
    pub question_id: String,
    pub text_answer: Option<String>,
    #[serde(default)]
    pub selected_options: Vec<String>,
    #[serde(default = "empty_object")]
    #[validate(custom(function = "validate_json_object"))]
    pub extra: JsonValue,
}

impl NewTestAnswer {
    pub fn for_question(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            text_answer: None,
            selected_options: Vec::new(),
            extra: empty_object(),
        }
    }
}
