//! Pure reductions over a result set: KPIs, insights, comparison series.
//!
//! Every function takes a non-empty slice of candidates and fails with
//! `EmptyResultSet` otherwise. Ties in the "lowest"/"best" reductions keep
//! the first candidate in rank order.

use serde::{Deserialize, Serialize};

use super::types::{MaterialCandidate, Metric};
use crate::error::{EcoPackError, Result};

/// Axis labels shared by every two-material comparison chart.
pub const COMPARISON_CATEGORIES: [&str; 3] = ["CO₂", "Cost", "Eco Score"];

/// Averages of the three metrics, rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Kpis {
    pub avg_eco: f64,
    pub avg_co2: f64,
    pub avg_cost: f64,
}

/// Single-candidate summaries over a result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    pub lowest_co2: MaterialCandidate,
    pub lowest_cost: MaterialCandidate,
    pub best_overall: MaterialCandidate,
}

/// One candidate's values in `COMPARISON_CATEGORIES` order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonSeries {
    pub label: String,
    pub values: [f64; 3],
}

impl ComparisonSeries {
    pub fn of(material: &MaterialCandidate) -> Self {
        Self {
            label: material.material.clone(),
            values: [
                material.predicted_co2,
                material.predicted_cost,
                material.eco_score,
            ],
        }
    }
}

pub fn compute_kpis(materials: &[MaterialCandidate]) -> Result<Kpis> {
    ensure_non_empty(materials)?;
    Ok(Kpis {
        avg_eco: round2(mean(materials, Metric::EcoScore)),
        avg_co2: round2(mean(materials, Metric::Co2)),
        avg_cost: round2(mean(materials, Metric::Cost)),
    })
}

pub fn compute_insights(materials: &[MaterialCandidate]) -> Result<Insights> {
    ensure_non_empty(materials)?;
    Ok(Insights {
        lowest_co2: first_lowest(materials, Metric::Co2).clone(),
        lowest_cost: first_lowest(materials, Metric::Cost).clone(),
        best_overall: first_highest(materials, Metric::EcoScore).clone(),
    })
}

/// Build the two series for a baseline-vs-target comparison chart.
pub fn build_comparison_series(
    baseline: &MaterialCandidate,
    target: &MaterialCandidate,
) -> [ComparisonSeries; 2] {
    [ComparisonSeries::of(baseline), ComparisonSeries::of(target)]
}

/// Smallest value of `metric` across the set.
pub fn min_of(materials: &[MaterialCandidate], metric: Metric) -> Result<f64> {
    ensure_non_empty(materials)?;
    Ok(first_lowest(materials, metric).metric(metric))
}

/// Flags the candidates whose `metric` equals the minimum bit-for-bit.
pub fn flag_minimum(materials: &[MaterialCandidate], metric: Metric) -> Result<Vec<bool>> {
    let min = min_of(materials, metric)?;
    Ok(materials.iter().map(|m| m.metric(metric) == min).collect())
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ensure_non_empty(materials: &[MaterialCandidate]) -> Result<()> {
    if materials.is_empty() {
        return Err(EcoPackError::EmptyResultSet);
    }
    Ok(())
}

fn mean(materials: &[MaterialCandidate], metric: Metric) -> f64 {
    // Summed in ascending order so the mean is independent of rank order.
    let mut values: Vec<f64> = materials.iter().map(|m| m.metric(metric)).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values.iter().sum::<f64>() / values.len() as f64
}

fn first_lowest(materials: &[MaterialCandidate], metric: Metric) -> &MaterialCandidate {
    materials[1..].iter().fold(&materials[0], |min, m| {
        if m.metric(metric) < min.metric(metric) {
            m
        } else {
            min
        }
    })
}

fn first_highest(materials: &[MaterialCandidate], metric: Metric) -> &MaterialCandidate {
    materials[1..].iter().fold(&materials[0], |max, m| {
        if m.metric(metric) > max.metric(metric) {
            m
        } else {
            max
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<MaterialCandidate> {
        vec![
            MaterialCandidate::new("Bagasse", 0.61, 1.2, 4.0),
            MaterialCandidate::new("Kraft Paper", 0.75, 0.9, 4.0),
            MaterialCandidate::new("Mushroom Foam", 0.75, 0.9, 6.5),
            MaterialCandidate::new("PLA", 0.33, 2.4, 5.1),
        ]
    }

    #[test]
    fn test_kpis_are_rounded_means() {
        let kpis = compute_kpis(&sample()).unwrap();
        assert_eq!(kpis.avg_eco, 0.61);
        assert_eq!(kpis.avg_co2, 1.35);
        assert_eq!(kpis.avg_cost, 4.9);
    }

    #[test]
    fn test_kpis_ignore_order() {
        let materials = vec![
            MaterialCandidate::new("a", 0.1, 0.3, 1.0),
            MaterialCandidate::new("b", 0.2, 0.7, 1.0),
            MaterialCandidate::new("c", 0.3, 1.1, 1.0),
            MaterialCandidate::new("d", 1e-3, 2.005, 1.0),
        ];
        let mut reversed = materials.clone();
        reversed.reverse();
        assert_eq!(compute_kpis(&materials).unwrap(), compute_kpis(&reversed).unwrap());
    }

    #[test]
    fn test_empty_set_fails() {
        assert_eq!(compute_kpis(&[]), Err(EcoPackError::EmptyResultSet));
        assert_eq!(compute_insights(&[]), Err(EcoPackError::EmptyResultSet));
        assert_eq!(min_of(&[], Metric::Cost), Err(EcoPackError::EmptyResultSet));
    }

    #[test]
    fn test_insights_keep_first_on_ties() {
        let insights = compute_insights(&sample()).unwrap();
        // Kraft Paper and Mushroom Foam tie on CO2 and eco score
        assert_eq!(insights.lowest_co2.material, "Kraft Paper");
        assert_eq!(insights.best_overall.material, "Kraft Paper");
        // Bagasse and Kraft Paper tie on cost
        assert_eq!(insights.lowest_cost.material, "Bagasse");
    }

    #[test]
    fn test_insights_idempotent() {
        let materials = sample();
        assert_eq!(
            compute_insights(&materials).unwrap(),
            compute_insights(&materials).unwrap()
        );
    }

    #[test]
    fn test_flag_minimum_unique() {
        let flags = flag_minimum(&sample(), Metric::Co2).unwrap();
        assert_eq!(flags, vec![false, true, true, false]);

        let materials = vec![
            MaterialCandidate::new("a", 0.5, 3.0, 2.0),
            MaterialCandidate::new("b", 0.5, 1.0, 3.0),
        ];
        let flags = flag_minimum(&materials, Metric::Cost).unwrap();
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        assert!(flags[0]);
    }

    #[test]
    fn test_flag_minimum_exact_ties_only() {
        let materials = vec![
            MaterialCandidate::new("a", 0.5, 1.0, 2.0),
            MaterialCandidate::new("b", 0.5, 1.0, 2.0),
            MaterialCandidate::new("c", 0.5, 1.0, 2.0 + f64::EPSILON * 4.0),
        ];
        let flags = flag_minimum(&materials, Metric::Cost).unwrap();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_comparison_series_order() {
        let materials = sample();
        let [a, b] = build_comparison_series(&materials[0], &materials[3]);
        assert_eq!(a.label, "Bagasse");
        assert_eq!(a.values, [1.2, 4.0, 0.61]);
        assert_eq!(b.label, "PLA");
        assert_eq!(b.values, [2.4, 5.1, 0.33]);
    }
}
