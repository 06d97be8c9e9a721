use crate::models::{UserMeasurement, FLAT_FOOT_LABEL, SUPINATION_LABEL};

/// A numeric measurement field after lenient parsing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Missing or blank
    Absent,
    /// Present but not a number
    Invalid,
    Valid(f64),
}

impl Reading {
    /// Trim and parse a raw field. Never fails: bad input becomes `Invalid`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Reading::Absent,
            Some(text) => text
                .parse::<f64>()
                .map(Reading::Valid)
                .unwrap_or(Reading::Invalid),
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Reading::Valid(value) => Some(value),
            Reading::Absent | Reading::Invalid => None,
        }
    }
}

/// Foot type as it affects the fit of a shoe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootType {
    Flat,
    Supination,
    /// Any other non-blank label
    Neutral,
}

impl FootType {
    /// Blank labels mean the user gave no foot type
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.map(str::trim) {
            None | Some("") => None,
            Some(FLAT_FOOT_LABEL) => Some(FootType::Flat),
            Some(SUPINATION_LABEL) => Some(FootType::Supination),
            Some(_) => Some(FootType::Neutral),
        }
    }
}

impl UserMeasurement {
    /// Foot length in centimeters
    pub fn length(&self) -> Reading {
        Reading::parse(self.foot_length.as_deref())
    }

    /// Foot width in centimeters
    pub fn width(&self) -> Reading {
        Reading::parse(self.foot_width.as_deref())
    }

    /// Oblique circumference in centimeters
    pub fn oblique(&self) -> Reading {
        Reading::parse(self.oblique_circumference.as_deref())
    }

    pub fn kind(&self) -> Option<FootType> {
        FootType::parse(self.foot_type.as_deref())
    }

    /// True when no field carries any text at all
    pub fn is_empty(&self) -> bool {
        self.foot_length.is_none()
            && self.foot_width.is_none()
            && self.oblique_circumference.is_none()
            && self.foot_type.is_none()
    }
}
