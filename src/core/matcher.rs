use std::cmp::Ordering;

use crate::core::scoring::calculate_compatibility;
use crate::models::{
    Catalog, MatchLimits, Recommendation, ShoeDetail, ShoeModel, ShoeSizeRecord, SizeFit,
    UserMeasurement,
};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub recommendations: Vec<Recommendation>,
    pub total_models: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Score every size of every model
/// 2. Keep each model's best size
/// 3. Drop models below the minimum score
/// 4. Rank by score and truncate
#[derive(Debug, Clone)]
pub struct Matcher {
    limits: MatchLimits,
}

impl Matcher {
    pub fn new(limits: MatchLimits) -> Self {
        Self { limits }
    }

    pub fn with_default_limits() -> Self {
        Self {
            limits: MatchLimits::default(),
        }
    }

    pub fn limits(&self) -> MatchLimits {
        self.limits
    }

    /// Find the best-fitting models for a user
    ///
    /// # Arguments
    /// * `measurement` - The user's measurements, if any were saved
    /// * `catalog` - Shoe models in catalog order
    ///
    /// # Returns
    /// MatchResult with recommendations sorted by descending compatibility.
    /// Models with equal scores keep their catalog order.
    pub fn find_matches(
        &self,
        measurement: Option<&UserMeasurement>,
        catalog: &Catalog,
    ) -> MatchResult {
        let total_models = catalog.sneakers.len();

        let measurement = match measurement {
            Some(measurement) if !measurement.is_empty() => measurement,
            _ => {
                return MatchResult {
                    recommendations: Vec::new(),
                    total_models,
                }
            }
        };

        let mut recommendations: Vec<Recommendation> = catalog
            .sneakers
            .iter()
            .filter_map(|shoe| {
                let (best_size, compatibility) = best_fit(score_sizes(measurement, shoe))?;

                (compatibility >= self.limits.min_score).then(|| Recommendation {
                    model: shoe.model.clone(),
                    compatibility,
                    best_size: best_size.clone(),
                    all_sizes: shoe.sizes.clone(),
                })
            })
            .collect();

        // sort_by is stable, so ties stay in catalog order
        recommendations.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));
        recommendations.truncate(self.limits.max_results);

        MatchResult {
            recommendations,
            total_models,
        }
    }

    /// Score every size of one model for the detail view
    ///
    /// Without a measurement every size scores 0 and none is marked best.
    /// `is_best` is set on every size sharing the best size's EU label, so a
    /// catalog with duplicate labels gets more than one flagged size.
    pub fn size_detail(
        &self,
        measurement: Option<&UserMeasurement>,
        shoe: &ShoeModel,
    ) -> ShoeDetail {
        let empty = UserMeasurement::default();
        let measurement = measurement.unwrap_or(&empty);

        let scored: Vec<(&ShoeSizeRecord, u8)> = score_sizes(measurement, shoe).collect();
        let best = best_fit(scored.iter().copied());
        let best_eu = best.map(|(size, _)| size.eu.clone());

        let annotated: Vec<SizeFit> = scored
            .into_iter()
            .map(|(size, compatibility)| SizeFit {
                size_data: size.clone(),
                compatibility,
                eu: size.eu.clone(),
                is_best: best_eu.as_deref() == Some(size.eu.as_str()),
            })
            .collect();

        let mut top_sizes = annotated.clone();
        top_sizes.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));
        top_sizes.truncate(self.limits.top_sizes);

        let mut all_sizes = annotated;
        all_sizes.sort_by(|a, b| compare_size_labels(&a.eu, &b.eu));

        ShoeDetail {
            model: shoe.model.clone(),
            shoe_type: shoe.sizing(),
            best_eu,
            best_compatibility: best.map(|(_, score)| score).unwrap_or(0),
            top_sizes,
            all_sizes,
            all_sizes_count: shoe.sizes.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_limits()
    }
}

/// Rank a catalog with the default limits (top 8, minimum score 30)
pub fn rank(measurement: Option<&UserMeasurement>, catalog: &Catalog) -> Vec<Recommendation> {
    Matcher::default().find_matches(measurement, catalog).recommendations
}

/// Detail view of one model with the default limits (top 5 sizes)
pub fn detail_score(measurement: Option<&UserMeasurement>, shoe: &ShoeModel) -> ShoeDetail {
    Matcher::default().size_detail(measurement, shoe)
}

fn score_sizes<'a>(
    measurement: &'a UserMeasurement,
    shoe: &'a ShoeModel,
) -> impl Iterator<Item = (&'a ShoeSizeRecord, u8)> + 'a {
    let sizing = shoe.sizing();
    shoe.sizes
        .iter()
        .map(move |size| (size, calculate_compatibility(measurement, size, sizing)))
}

/// First size with the strictly highest non-zero score
fn best_fit<'a>(
    scored: impl Iterator<Item = (&'a ShoeSizeRecord, u8)>,
) -> Option<(&'a ShoeSizeRecord, u8)> {
    scored.fold(None, |best, (size, score)| match best {
        Some((_, top)) if score <= top => best,
        _ if score == 0 => best,
        _ => Some((size, score)),
    })
}

/// Numeric labels first in numeric order ("39.5" < "40"), then every
/// other label ("10 1/2", "M") in string order
pub fn compare_size_labels(a: &str, b: &str) -> Ordering {
    let (x, a) = size_label_key(a);
    let (y, b) = size_label_key(b);
    x.total_cmp(&y).then_with(|| a.cmp(b))
}

fn size_label_key(label: &str) -> (f64, &str) {
    let number = label
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| !n.is_nan())
        .unwrap_or(f64::INFINITY);
    (number, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_size(eu: &str, length: f64) -> ShoeSizeRecord {
        ShoeSizeRecord {
            eu: eu.to_string(),
            length,
            midfoot_circumference: 240.0,
            oblique_circumference: 330.0,
            ankle_circumference: 245.0,
            toe_circumference: 230.0,
        }
    }

    fn create_model(name: &str, sizes: Vec<ShoeSizeRecord>) -> ShoeModel {
        ShoeModel {
            model: name.to_string(),
            sport: 1,
            sizes,
        }
    }

    /// Only the length is known: 270mm foot, so a 280mm sport shoe is ideal
    fn length_only() -> UserMeasurement {
        UserMeasurement {
            foot_length: Some("27".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::with_default_limits();
        let catalog = Catalog {
            sneakers: vec![
                create_model("A", vec![create_size("41", 300.0), create_size("42", 284.0)]),
                create_model("B", vec![create_size("42", 280.0)]),
                create_model("C", vec![create_size("44", 310.0)]),
            ],
        };

        let result = matcher.find_matches(Some(&length_only()), &catalog);

        assert_eq!(result.total_models, 3);
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.recommendations[0].model, "B");
        assert_eq!(result.recommendations[0].compatibility, 97);
        assert_eq!(result.recommendations[1].model, "A");
        assert_eq!(result.recommendations[1].compatibility, 86);
        assert_eq!(result.recommendations[1].best_size.eu, "42");
        assert_eq!(result.recommendations[1].all_sizes.len(), 2);
    }

    #[test]
    fn test_no_measurement_returns_nothing() {
        let matcher = Matcher::with_default_limits();
        let catalog = Catalog {
            sneakers: vec![create_model("B", vec![create_size("42", 280.0)])],
        };

        assert!(matcher.find_matches(None, &catalog).recommendations.is_empty());
        assert!(matcher
            .find_matches(Some(&UserMeasurement::default()), &catalog)
            .recommendations
            .is_empty());
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::new(MatchLimits {
            max_results: 3,
            ..Default::default()
        });
        let catalog = Catalog {
            sneakers: (0..10)
                .map(|i| create_model(&i.to_string(), vec![create_size("42", 280.0)]))
                .collect(),
        };

        let result = matcher.find_matches(Some(&length_only()), &catalog);

        assert_eq!(result.recommendations.len(), 3);
        let names: Vec<&str> = result.recommendations.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(names, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_best_fit_keeps_first_of_ties() {
        let shoe = create_model("A", vec![create_size("42", 280.0), create_size("43", 280.0)]);
        let measurement = length_only();

        let (size, score) = best_fit(score_sizes(&measurement, &shoe)).unwrap();

        assert_eq!(size.eu, "42");
        assert_eq!(score, 97);
    }

    #[test]
    fn test_best_fit_ignores_zero_scores() {
        let shoe = create_model("A", vec![create_size("42", 280.0)]);
        let empty = UserMeasurement::default();

        assert!(best_fit(score_sizes(&empty, &shoe)).is_none());
    }

    #[test]
    fn test_size_detail() {
        let matcher = Matcher::with_default_limits();
        let shoe = create_model(
            "A",
            vec![
                create_size("42", 280.0),
                create_size("41", 284.0),
                create_size("43", 290.0),
                create_size("40", 300.0),
                create_size("44", 310.0),
                create_size("45", 280.0),
            ],
        );

        let detail = matcher.size_detail(Some(&length_only()), &shoe);

        assert_eq!(detail.best_eu.as_deref(), Some("42"));
        assert_eq!(detail.best_compatibility, 97);
        assert_eq!(detail.all_sizes_count, 6);

        let top: Vec<(&str, u8)> = detail
            .top_sizes
            .iter()
            .map(|s| (s.eu.as_str(), s.compatibility))
            .collect();
        assert_eq!(top, vec![("42", 97), ("45", 97), ("41", 86), ("43", 76), ("40", 32)]);

        let labels: Vec<&str> = detail.all_sizes.iter().map(|s| s.eu.as_str()).collect();
        assert_eq!(labels, vec!["40", "41", "42", "43", "44", "45"]);

        let flagged: Vec<&str> = detail
            .all_sizes
            .iter()
            .filter(|s| s.is_best)
            .map(|s| s.eu.as_str())
            .collect();
        assert_eq!(flagged, vec!["42"]);
    }

    #[test]
    fn test_size_detail_duplicate_labels_all_flagged() {
        let matcher = Matcher::with_default_limits();
        let shoe = create_model("A", vec![create_size("42", 280.0), create_size("42", 300.0)]);

        let detail = matcher.size_detail(Some(&length_only()), &shoe);

        assert!(detail.all_sizes.iter().all(|s| s.is_best));
    }

    #[test]
    fn test_size_detail_without_measurement() {
        let matcher = Matcher::with_default_limits();
        let shoe = create_model("A", vec![create_size("42", 280.0), create_size("43", 290.0)]);

        let detail = matcher.size_detail(None, &shoe);

        assert_eq!(detail.best_eu, None);
        assert_eq!(detail.best_compatibility, 0);
        assert!(detail.all_sizes.iter().all(|s| !s.is_best && s.compatibility == 0));
    }

    #[test]
    fn test_compare_size_labels() {
        assert_eq!(compare_size_labels("39.5", "40"), Ordering::Less);
        assert_eq!(compare_size_labels("9", "10"), Ordering::Less);
        assert_eq!(compare_size_labels("M", "L"), Ordering::Greater);
        assert_eq!(compare_size_labels("42", "42"), Ordering::Equal);
        assert_eq!(compare_size_labels("10", "10 1/2"), Ordering::Less);
        assert_eq!(compare_size_labels("9", "10 1/2"), Ordering::Less);
        assert_eq!(compare_size_labels("10 1/2", "M"), Ordering::Less);
    }

    #[test]
    fn test_size_detail_order_ignores_catalog_order() {
        let matcher = Matcher::with_default_limits();
        let orders = [["10 1/2", "9", "10"], ["10", "10 1/2", "9"], ["9", "10", "10 1/2"]];

        for labels in orders {
            let shoe = create_model("A", labels.iter().map(|eu| create_size(eu, 280.0)).collect());
            let detail = matcher.size_detail(Some(&length_only()), &shoe);
            let sorted: Vec<&str> = detail.all_sizes.iter().map(|s| s.eu.as_str()).collect();
            assert_eq!(sorted, vec!["9", "10", "10 1/2"]);
        }
    }

    #[test]
    fn test_size_detail_many_fractional_labels() {
        let matcher = Matcher::with_default_limits();
        let sizes = (0..60)
            .rev()
            .flat_map(|n| [format!("{} 1/2", n), n.to_string()])
            .map(|eu| create_size(&eu, 280.0))
            .collect();
        let shoe = create_model("A", sizes);

        let detail = matcher.size_detail(Some(&length_only()), &shoe);

        assert_eq!(detail.all_sizes.len(), 120);
        assert_eq!(detail.all_sizes[0].eu, "0");
        assert_eq!(detail.all_sizes[59].eu, "59");
        assert_eq!(detail.all_sizes[60].eu, "0 1/2");
        for pair in detail.all_sizes.windows(2) {
            assert_ne!(compare_size_labels(&pair[0].eu, &pair[1].eu), Ordering::Greater);
        }
    }
}
