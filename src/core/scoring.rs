use crate::core::measurement::FootType;
use crate::models::{ShoeSizeRecord, Sizing, UserMeasurement};

/// Maximum weight of each factor in the aggregate
pub const LENGTH_WEIGHT: u32 = 46;
pub const WIDTH_WEIGHT: u32 = 29;
pub const OBLIQUE_WEIGHT: u32 = 17;
pub const FOOT_TYPE_WEIGHT: u32 = 8;

const AGGREGATE_CAP: u32 = 98;
const SCORE_CAP: u32 = 100;
const LENGTH_MATCH_BONUS: u32 = 5;
const LENGTH_MATCH_TOLERANCE_MM: f64 = 2.0;

/// (max difference in mm, points) bands, checked in order
const LENGTH_BANDS: [(f64, u32); 5] = [(3.0, 45), (7.0, 40), (12.0, 35), (17.0, 25), (22.0, 15)];
const LENGTH_FLOOR: u32 = 5;

const WIDTH_BANDS: [(f64, u32); 5] = [(15.0, 35), (25.0, 30), (35.0, 25), (45.0, 18), (55.0, 10)];
const WIDTH_FLOOR: u32 = 5;

const OBLIQUE_BANDS: [(f64, u32); 4] = [(10.0, 15), (20.0, 12), (30.0, 8), (40.0, 5)];
const OBLIQUE_FLOOR: u32 = 2;

/// Points earned by one factor against the weight it carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorScore {
    pub points: u32,
    pub weight: u32,
}

/// Calculate how well one shoe size fits a user's foot (0-100)
///
/// Scoring formula:
/// score = min(98, earned_points * 100 / weight_of_evaluated_factors)
///         + 5 if the foot length matches the shoe length exactly (max 100)
///
/// Factors:
/// - length             (weight 46, up to 45 points)
/// - width              (weight 29, up to 35 points)
/// - oblique girth      (weight 17, up to 15 points)
/// - foot type          (weight 8, up to 5 points)
///
/// A factor whose field is absent or not a number is left out entirely,
/// contributing neither points nor weight.
pub fn calculate_compatibility(
    measurement: &UserMeasurement,
    size: &ShoeSizeRecord,
    sizing: Sizing,
) -> u8 {
    let length = measurement.length().value();

    let factors = [
        length.map(|cm| length_score(cm, size, sizing)),
        measurement.width().value().map(|cm| width_score(cm, size)),
        measurement.oblique().value().map(|cm| oblique_score(cm, size, sizing)),
        measurement.kind().map(|kind| foot_type_score(kind, size)),
    ];

    let (points, weight) = factors
        .iter()
        .flatten()
        .fold((0, 0), |(points, weight), factor| {
            (points + factor.points, weight + factor.weight)
        });

    let mut score = if weight > 0 {
        (points * 100 / weight).min(AGGREGATE_CAP)
    } else {
        0
    };

    if let Some(cm) = length {
        if is_length_match(cm, size, sizing) {
            score = (score + LENGTH_MATCH_BONUS).min(SCORE_CAP);
        }
    }

    score as u8
}

/// Score with the sport flag as stored in the catalog
pub fn score(measurement: &UserMeasurement, size: &ShoeSizeRecord, sport_flag: u8) -> u8 {
    calculate_compatibility(measurement, size, Sizing::from_flag(sport_flag))
}

/// Length factor: foot length plus allowance against the shoe's inner length
pub fn length_score(length_cm: f64, size: &ShoeSizeRecord, sizing: Sizing) -> FactorScore {
    let user_length = length_cm * 10.0 + sizing.allowance_mm();
    let diff = (user_length - size.length).abs();

    FactorScore {
        points: band_points(diff, &LENGTH_BANDS, LENGTH_FLOOR),
        weight: LENGTH_WEIGHT,
    }
}

/// Width factor: midfoot girth estimated from foot width
///
/// The estimate is taken from the bare width. The sizing allowance never
/// reaches this comparison, so athletic and casual models score alike here.
pub fn width_score(width_cm: f64, size: &ShoeSizeRecord) -> FactorScore {
    let diff = (estimate_midfoot(width_cm * 10.0) - size.midfoot_circumference).abs();

    FactorScore {
        points: band_points(diff, &WIDTH_BANDS, WIDTH_FLOOR),
        weight: WIDTH_WEIGHT,
    }
}

/// Oblique factor: oblique girth plus allowance against the shoe
pub fn oblique_score(oblique_cm: f64, size: &ShoeSizeRecord, sizing: Sizing) -> FactorScore {
    let user_oblique = oblique_cm * 10.0 + sizing.allowance_mm();
    let diff = (user_oblique - size.oblique_circumference).abs();

    FactorScore {
        points: band_points(diff, &OBLIQUE_BANDS, OBLIQUE_FLOOR),
        weight: OBLIQUE_WEIGHT,
    }
}

/// Foot type factor: roomy ankle and midfoot for flat feet, roomy toe box
/// for supination
pub fn foot_type_score(kind: FootType, size: &ShoeSizeRecord) -> FactorScore {
    let points = match kind {
        FootType::Flat => {
            let ankle = size.ankle_circumference;
            let midfoot = size.midfoot_circumference;
            if ankle > 240.0 && midfoot > 220.0 {
                5
            } else if ankle > 230.0 && midfoot > 210.0 {
                3
            } else {
                1
            }
        }
        FootType::Supination => {
            let toe = size.toe_circumference;
            if toe > 240.0 {
                5
            } else if toe > 220.0 {
                3
            } else {
                1
            }
        }
        FootType::Neutral => 4,
    };

    FactorScore {
        points,
        weight: FOOT_TYPE_WEIGHT,
    }
}

/// Midfoot circumference (mm) approximated from foot width (mm)
#[inline]
pub fn estimate_midfoot(width_mm: f64) -> f64 {
    2.0 * (width_mm + 50.0) * 0.9
}

/// Bare foot length within 2mm of the shoe length plus the sizing offset
#[inline]
fn is_length_match(length_cm: f64, size: &ShoeSizeRecord, sizing: Sizing) -> bool {
    let target = size.length + sizing.length_match_offset_mm();
    (length_cm * 10.0 - target).abs() <= LENGTH_MATCH_TOLERANCE_MM
}

/// Points of the first band whose limit covers `diff`.
/// NaN differences fall through to the floor.
#[inline]
fn band_points(diff: f64, bands: &[(f64, u32)], floor: u32) -> u32 {
    bands
        .iter()
        .find(|(limit, _)| diff <= *limit)
        .map(|(_, points)| *points)
        .unwrap_or(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FLAT_FOOT_LABEL, SUPINATION_LABEL};

    fn create_size(length: f64, midfoot: f64, oblique: f64, ankle: f64, toe: f64) -> ShoeSizeRecord {
        ShoeSizeRecord {
            eu: "42".to_string(),
            length,
            midfoot_circumference: midfoot,
            oblique_circumference: oblique,
            ankle_circumference: ankle,
            toe_circumference: toe,
        }
    }

    fn measurement(length: &str, width: &str, oblique: &str, foot_type: &str) -> UserMeasurement {
        let field = |value: &str| (!value.is_empty()).then(|| value.to_string());
        UserMeasurement {
            foot_length: field(length),
            foot_width: field(width),
            oblique_circumference: field(oblique),
            foot_type: field(foot_type),
        }
    }

    #[test]
    fn test_worked_example_sport() {
        let user = measurement("27", "10", "32", FLAT_FOOT_LABEL);
        let size = create_size(280.0, 240.0, 330.0, 245.0, 230.0);

        assert_eq!(calculate_compatibility(&user, &size, Sizing::Athletic), 90);
    }

    #[test]
    fn test_worked_example_casual() {
        let user = measurement("27", "10", "32", FLAT_FOOT_LABEL);
        let size = create_size(280.0, 240.0, 330.0, 245.0, 230.0);

        // length 285 vs 280 -> 40, width 25, oblique 335 vs 330 -> 15, flat 5
        assert_eq!(calculate_compatibility(&user, &size, Sizing::Casual), 85);
    }

    #[test]
    fn test_no_fields_scores_zero() {
        let size = create_size(280.0, 240.0, 330.0, 245.0, 230.0);

        assert_eq!(calculate_compatibility(&UserMeasurement::default(), &size, Sizing::Athletic), 0);
        assert_eq!(calculate_compatibility(&measurement("x", "y", "z", " "), &size, Sizing::Athletic), 0);
    }

    #[test]
    fn test_aggregate_capped_at_98() {
        // Perfect width alone earns 35 of 29
        let size = create_size(280.0, 270.0, 330.0, 245.0, 230.0);
        assert_eq!(calculate_compatibility(&measurement("", "10", "", ""), &size, Sizing::Athletic), 98);
    }

    #[test]
    fn test_length_match_bonus() {
        // 270 + 10 vs 266 -> diff 14 -> 25/46 = 54; 266 + 4 == 270 -> bonus
        let size = create_size(266.0, 240.0, 330.0, 245.0, 230.0);
        assert_eq!(calculate_compatibility(&measurement("27", "", "", ""), &size, Sizing::Athletic), 59);

        // Casual offset is 6: 264 + 6 == 270 -> bonus; 270 + 15 vs 264 -> diff 21 -> 15/46 = 32
        let size = create_size(264.0, 240.0, 330.0, 245.0, 230.0);
        assert_eq!(calculate_compatibility(&measurement("27", "", "", ""), &size, Sizing::Casual), 37);
    }

    #[test]
    fn test_invalid_field_is_skipped() {
        let size = create_size(280.0, 270.0, 330.0, 245.0, 230.0);
        let with_bad_length = measurement("twenty", "10", "", "");
        let without_length = measurement("", "10", "", "");

        assert_eq!(
            calculate_compatibility(&with_bad_length, &size, Sizing::Athletic),
            calculate_compatibility(&without_length, &size, Sizing::Athletic)
        );
    }

    #[test]
    fn test_width_ignores_allowance() {
        let size = create_size(280.0, 250.0, 330.0, 245.0, 230.0);
        let user = measurement("", "10", "", "");

        assert_eq!(width_score(10.0, &size).points, 30);
        assert_eq!(
            calculate_compatibility(&user, &size, Sizing::Athletic),
            calculate_compatibility(&user, &size, Sizing::Casual)
        );
    }

    #[test]
    fn test_oblique_uses_allowance() {
        let size = create_size(280.0, 240.0, 330.0, 245.0, 230.0);

        assert_eq!(oblique_score(32.0, &size, Sizing::Athletic).points, 15);
        assert_eq!(oblique_score(30.5, &size, Sizing::Athletic).points, 12);
        assert_eq!(oblique_score(30.5, &size, Sizing::Casual).points, 15);
        assert_eq!(oblique_score(25.0, &size, Sizing::Athletic).points, 2);
    }

    #[test]
    fn test_foot_type_points() {
        let roomy = create_size(280.0, 225.0, 330.0, 245.0, 250.0);
        let medium = create_size(280.0, 215.0, 330.0, 235.0, 230.0);
        let narrow = create_size(280.0, 200.0, 330.0, 220.0, 210.0);

        assert_eq!(foot_type_score(FootType::Flat, &roomy).points, 5);
        assert_eq!(foot_type_score(FootType::Flat, &medium).points, 3);
        assert_eq!(foot_type_score(FootType::Flat, &narrow).points, 1);
        assert_eq!(foot_type_score(FootType::Supination, &roomy).points, 5);
        assert_eq!(foot_type_score(FootType::Supination, &medium).points, 3);
        assert_eq!(foot_type_score(FootType::Supination, &narrow).points, 1);
        assert_eq!(foot_type_score(FootType::Neutral, &narrow).points, 4);
    }

    #[test]
    fn test_foot_type_only() {
        let size = create_size(280.0, 225.0, 330.0, 245.0, 210.0);

        assert_eq!(calculate_compatibility(&measurement("", "", "", FLAT_FOOT_LABEL), &size, Sizing::Athletic), 62);
        assert_eq!(calculate_compatibility(&measurement("", "", "", SUPINATION_LABEL), &size, Sizing::Athletic), 12);
        assert_eq!(calculate_compatibility(&measurement("", "", "", "Норма"), &size, Sizing::Athletic), 50);
    }

    #[test]
    fn test_score_sport_flag() {
        let user = measurement("27", "10", "32", FLAT_FOOT_LABEL);
        let size = create_size(280.0, 240.0, 330.0, 245.0, 230.0);

        assert_eq!(score(&user, &size, 1), 90);
        assert_eq!(score(&user, &size, 0), 85);
    }

    #[test]
    fn test_band_points_nan() {
        assert_eq!(band_points(f64::NAN, &LENGTH_BANDS, LENGTH_FLOOR), LENGTH_FLOOR);
    }

    #[test]
    fn test_estimate_midfoot() {
        assert!((estimate_midfoot(100.0) - 270.0).abs() < 1e-9);
    }
}
