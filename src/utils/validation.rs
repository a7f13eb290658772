use serde_json::Value as JsonValue;
use validator::ValidationError;

/// Two upper-case ASCII letters (ISO 3166-1 alpha-2 shape).
pub fn validate_country_code(value: &str) -> Result<(), ValidationError> {
    if value.len() == 2 && value.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::new("country_code"))
    }
}

/// Breakdown and extra-data columns hold a string-keyed mapping, nothing else.
pub fn validate_json_object(value: &JsonValue) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("json_object"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn country_codes() {
        assert!(validate_country_code("JP").is_ok());
        assert!(validate_country_code("").is_err());
        assert!(validate_country_code("J1").is_err());
        assert!(validate_country_code("ÄU").is_err());
    }

    #[test]
    fn json_objects() {
        assert!(validate_json_object(&json!({"weather": 3})).is_ok());
        assert!(validate_json_object(&json!(null)).is_err());
        assert!(validate_json_object(&json!("x")).is_err());
    }
}
