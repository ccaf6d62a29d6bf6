use indexmap::IndexMap;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::core::record::{Condition, Specimen};

/// Inclusive `[min, max]` range of finite measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    /// Range over the finite values of `values`, or `None` when there are none.
    #[must_use]
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<Self>, value| {
                Some(match acc {
                    None => Self {
                        min: value,
                        max: value,
                    },
                    Some(range) => Self {
                        min: range.min.min(value),
                        max: range.max.max(value),
                    },
                })
            })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Min-max normalization clamped to `[0, 1]`.
    ///
    /// A zero-width range maps every value to `0.5`. Non-finite input yields
    /// `None`.
    #[must_use]
    pub fn normalize(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        if self.max == self.min {
            return Some(0.5);
        }
        Some(((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0))
    }
}

/// Ascending finite size values of one condition group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionDistribution {
    sorted: Vec<NotNan<f64>>,
}

impl ConditionDistribution {
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<NotNan<f64>> = values
            .into_iter()
            .filter(|value| value.is_finite())
            .filter_map(|value| NotNan::new(value).ok())
            .collect();
        sorted.sort_unstable();
        Self { sorted }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.sorted.iter().map(|value| value.into_inner())
    }

    /// Condition-relative percentile of `value`.
    ///
    /// Uses the first ascending index whose value is `>= value`, divided by the
    /// group size. When no such index exists the result is `1.0`. Non-finite
    /// input or an empty group yields `None`.
    #[must_use]
    pub fn percentile(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || self.sorted.is_empty() {
            return None;
        }
        let index = self
            .sorted
            .partition_point(|candidate| candidate.into_inner() < value);
        if index == self.sorted.len() {
            return Some(1.0);
        }
        Some(index as f64 / self.sorted.len() as f64)
    }
}

/// Per-condition size distributions, rebuilt once per record store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionDistributions {
    by_condition: IndexMap<Condition, ConditionDistribution>,
}

impl ConditionDistributions {
    #[must_use]
    pub fn from_specimens<'a, I>(specimens: I) -> Self
    where
        I: IntoIterator<Item = &'a Specimen>,
    {
        let mut grouped: IndexMap<Condition, Vec<f64>> = Condition::ALL
            .iter()
            .map(|condition| (*condition, Vec::new()))
            .collect();
        for specimen in specimens {
            grouped
                .entry(specimen.condition())
                .or_default()
                .push(specimen.centroid_size());
        }

        Self {
            by_condition: grouped
                .into_iter()
                .map(|(condition, values)| {
                    (condition, ConditionDistribution::from_values(values))
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, condition: Condition) -> Option<&ConditionDistribution> {
        self.by_condition.get(&condition)
    }

    #[must_use]
    pub fn percentile(&self, condition: Condition, value: f64) -> Option<f64> {
        self.get(condition)
            .and_then(|distribution| distribution.percentile(value))
    }
}
