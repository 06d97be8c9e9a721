use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::models::domain::{lenient_text, UserMeasurement};

/// Smallest and largest plausible oblique circumference, in centimeters
pub const OBLIQUE_RANGE_CM: (f64, f64) = (20.0, 50.0);

/// Measurements submitted by the user
///
/// Length and width are not checked here; the scorer skips them when they
/// are blank or malformed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SaveMeasurementRequest {
    #[serde(default, alias = "length", deserialize_with = "lenient_string")]
    pub foot_length: String,
    #[serde(default, alias = "width", deserialize_with = "lenient_string")]
    pub foot_width: String,
    #[validate(custom(function = "validate_oblique_circumference"))]
    #[serde(default, deserialize_with = "lenient_string")]
    pub oblique_circumference: String,
    #[validate(custom(function = "validate_foot_type"))]
    #[serde(default, deserialize_with = "lenient_string")]
    pub foot_type: String,
}

impl SaveMeasurementRequest {
    /// Trimmed measurement; blank fields become absent
    pub fn into_measurement(self) -> UserMeasurement {
        let field = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        UserMeasurement {
            foot_length: field(self.foot_length),
            foot_width: field(self.foot_width),
            oblique_circumference: field(self.oblique_circumference),
            foot_type: field(self.foot_type),
        }
    }
}

/// Query for the shoe type lookup
#[derive(Debug, Clone, Deserialize)]
pub struct ShoeTypeQuery {
    #[serde(default)]
    pub model: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn validate_oblique_circumference(value: &str) -> Result<(), ValidationError> {
    let (min, max) = OBLIQUE_RANGE_CM;
    match value.trim().parse::<f64>() {
        Ok(cm) if (min..=max).contains(&cm) => Ok(()),
        Ok(_) => Err(ValidationError::new("oblique_out_of_range")
            .with_message("Oblique circumference must be between 20 and 50 cm".into())),
        Err(_) => Err(ValidationError::new("oblique_invalid")
            .with_message("Oblique circumference is not a valid number".into())),
    }
}

fn validate_foot_type(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("foot_type_required")
            .with_message("Select a foot type".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FLAT_FOOT_LABEL;

    fn request(oblique: &str, foot_type: &str) -> SaveMeasurementRequest {
        SaveMeasurementRequest {
            foot_length: " 27 ".to_string(),
            foot_width: String::new(),
            oblique_circumference: oblique.to_string(),
            foot_type: foot_type.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("32", FLAT_FOOT_LABEL).validate().is_ok());
        assert!(request("20", FLAT_FOOT_LABEL).validate().is_ok());
        assert!(request("50", FLAT_FOOT_LABEL).validate().is_ok());
    }

    #[test]
    fn test_oblique_out_of_range() {
        assert!(request("19.9", FLAT_FOOT_LABEL).validate().is_err());
        assert!(request("60", FLAT_FOOT_LABEL).validate().is_err());
    }

    #[test]
    fn test_oblique_required() {
        let errors = request("", FLAT_FOOT_LABEL).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("oblique_circumference"));
    }

    #[test]
    fn test_foot_type_required() {
        let errors = request("32", "  ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("foot_type"));
    }

    #[test]
    fn test_into_measurement_trims() {
        let measurement = request(" 32 ", FLAT_FOOT_LABEL).into_measurement();

        assert_eq!(measurement.foot_length.as_deref(), Some("27"));
        assert_eq!(measurement.foot_width, None);
        assert_eq!(measurement.oblique_circumference.as_deref(), Some("32"));
        assert_eq!(measurement.foot_type.as_deref(), Some(FLAT_FOOT_LABEL));
    }

    #[test]
    fn test_deserialize_form_names() {
        let request: SaveMeasurementRequest = serde_json::from_str(
            r#"{"length": "27", "width": 10, "oblique_circumference": "32", "foot_type": "Супинация"}"#,
        )
        .unwrap();

        assert_eq!(request.foot_length, "27");
        assert_eq!(request.foot_width, "10");
        assert!(request.validate().is_ok());
    }
}
