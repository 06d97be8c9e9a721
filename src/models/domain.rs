use serde::{Deserialize, Deserializer, Serialize};

/// Foot type label for flat feet, as stored by the measurement form
pub const FLAT_FOOT_LABEL: &str = "Плоскостопие";
/// Foot type label for supination
pub const SUPINATION_LABEL: &str = "Супинация";

/// Foot measurements entered by a user
///
/// Lengths are centimeters kept as the raw text the user typed. Every field
/// is optional; the scorer decides per field whether it can be used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMeasurement {
    #[serde(default, deserialize_with = "lenient_text")]
    pub foot_length: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub foot_width: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub oblique_circumference: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub foot_type: Option<String>,
}

/// One size of a shoe model. All dimensions are millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeSizeRecord {
    #[serde(deserialize_with = "size_label")]
    pub eu: String,
    pub length: f64,
    #[serde(rename = "midfootCircumference")]
    pub midfoot_circumference: f64,
    #[serde(rename = "obliqueCircumference")]
    pub oblique_circumference: f64,
    #[serde(rename = "ankleCircumference")]
    pub ankle_circumference: f64,
    #[serde(rename = "toeCircumference")]
    pub toe_circumference: f64,
}

/// A shoe model with its size run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeModel {
    pub model: String,
    #[serde(default = "default_sport_flag", deserialize_with = "sport_flag")]
    pub sport: u8,
    #[serde(default)]
    pub sizes: Vec<ShoeSizeRecord>,
}

impl ShoeModel {
    /// Sizing allowances that apply to every size of this model
    pub fn sizing(&self) -> Sizing {
        Sizing::from_flag(self.sport)
    }
}

fn default_sport_flag() -> u8 { 1 }

/// Catalog of shoe models, in the order they are offered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub sneakers: Vec<ShoeModel>,
}

/// Sizing profile selected by a model's sport flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sizing {
    #[default]
    #[serde(rename = "sport")]
    Athletic,
    #[serde(rename = "casual")]
    Casual,
}

impl Sizing {
    /// Flag 1 selects athletic sizing, anything else casual
    pub fn from_flag(flag: u8) -> Self {
        if flag == 1 { Sizing::Athletic } else { Sizing::Casual }
    }

    /// Room added to the user's measurement before comparing with the shoe
    pub fn allowance_mm(self) -> f64 {
        match self {
            Sizing::Athletic => 10.0,
            Sizing::Casual => 15.0,
        }
    }

    /// Offset added to the shoe length when checking for an exact length match
    pub fn length_match_offset_mm(self) -> f64 {
        match self {
            Sizing::Athletic => 4.0,
            Sizing::Casual => 6.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sizing::Athletic => "sport",
            Sizing::Casual => "casual",
        }
    }
}

/// Best-fitting size of one model for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub model: String,
    pub compatibility: u8,
    pub best_size: ShoeSizeRecord,
    pub all_sizes: Vec<ShoeSizeRecord>,
}

/// A size annotated with its score for the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeFit {
    pub size_data: ShoeSizeRecord,
    pub compatibility: u8,
    pub eu: String,
    pub is_best: bool,
}

/// Per-size breakdown of one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeDetail {
    pub model: String,
    pub shoe_type: Sizing,
    pub best_eu: Option<String>,
    pub best_compatibility: u8,
    pub top_sizes: Vec<SizeFit>,
    pub all_sizes: Vec<SizeFit>,
    pub all_sizes_count: usize,
}

/// Limits applied by the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchLimits {
    /// Models whose best size scores below this are dropped
    pub min_score: u8,
    /// Maximum number of recommendations returned
    pub max_results: usize,
    /// Number of sizes in the detail view's top list
    pub top_sizes: usize,
}

impl Default for MatchLimits {
    fn default() -> Self {
        Self {
            min_score: 30,
            max_results: 8,
            top_sizes: 5,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(f64),
}

impl RawText {
    fn into_text(self) -> String {
        match self {
            RawText::Text(text) => text,
            RawText::Number(number) => number.to_string(),
        }
    }
}

/// Accepts a string, a number or null for a free-form measurement field
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawText>::deserialize(deserializer)?.map(RawText::into_text))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// Only `1`, `1.0` and `true` mark a model athletic; null, strings and other
/// numbers read as casual
fn sport_flag<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let athletic = match Option::<RawFlag>::deserialize(deserializer)? {
        Some(RawFlag::Flag(flag)) => flag,
        Some(RawFlag::Number(number)) => number == 1.0,
        Some(RawFlag::Text(_)) | None => false,
    };
    Ok(u8::from(athletic))
}

/// Catalogs write EU sizes either as `"42"` or `42`
fn size_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawText::deserialize(deserializer).map(RawText::into_text)
}
