//! Size-based visibility filtering.
//!
//! [`FilterConfig`] is the declarative state edited by UI controls through
//! [`FilterEdit`]; [`predicate`] decides visibility for one specimen.

mod predicate;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{Condition, Sex};
use crate::error::{DashboardError, DashboardResult};

pub use predicate::{
    is_visible, normalized_size, passes_size_thresholds, visible_specimen_ids,
};

/// How a centroid size is mapped into `[0, 1]` before thresholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NormalizationMode {
    /// Rank within the specimen's own condition group.
    #[default]
    Percentile,
    /// Min-max over all specimens.
    Absolute,
}

/// Inclusive central window `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WithinRange {
    pub lo: f64,
    pub hi: f64,
}

impl WithinRange {
    #[must_use]
    pub fn contains(self, normalized: f64) -> bool {
        normalized >= self.lo && normalized <= self.hi
    }
}

/// Declarative edit coming from a filter control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FilterEdit {
    ToggleCondition(Condition),
    SetConditionVisible { condition: Condition, visible: bool },
    ToggleSex(Sex),
    SetSexEnabled { sex: Sex, enabled: bool },
    SetBelowThreshold(f64),
    SetAboveThreshold(f64),
    /// Moves the lower within bound; drags the upper bound along if crossed.
    SetWithinLower(f64),
    /// Moves the upper within bound; drags the lower bound along if crossed.
    SetWithinUpper(f64),
    SetNormalizationMode(NormalizationMode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    visible_conditions: BTreeSet<Condition>,
    sex_filters: BTreeSet<Sex>,
    normalization_mode: NormalizationMode,
    below_threshold: f64,
    above_threshold: f64,
    within: WithinRange,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            visible_conditions: Condition::ALL.into_iter().collect(),
            sex_filters: Sex::ALL.into_iter().collect(),
            normalization_mode: NormalizationMode::default(),
            below_threshold: 0.1,
            above_threshold: 0.9,
            within: WithinRange { lo: 0.05, hi: 0.95 },
        }
    }
}

impl FilterConfig {
    /// Configuration that admits every specimen with a finite size.
    #[must_use]
    pub fn admit_all() -> Self {
        Self {
            below_threshold: 0.0,
            above_threshold: 1.0,
            within: WithinRange { lo: 0.0, hi: 1.0 },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_normalization_mode(mut self, mode: NormalizationMode) -> Self {
        self.normalization_mode = mode;
        self
    }

    /// Sets all three size thresholds at once, clamping into `[0, 1]`.
    pub fn with_thresholds(
        mut self,
        below: f64,
        above: f64,
        within_lo: f64,
        within_hi: f64,
    ) -> DashboardResult<Self> {
        self.below_threshold = clamp_unit(below, "below threshold")?;
        self.above_threshold = clamp_unit(above, "above threshold")?;
        let lo = clamp_unit(within_lo, "within lower bound")?;
        let hi = clamp_unit(within_hi, "within upper bound")?;
        self.within = WithinRange {
            lo: lo.min(hi),
            hi: lo.max(hi),
        };
        Ok(self)
    }

    #[must_use]
    pub fn is_condition_visible(&self, condition: Condition) -> bool {
        self.visible_conditions.contains(&condition)
    }

    #[must_use]
    pub fn is_sex_enabled(&self, sex: Sex) -> bool {
        self.sex_filters.contains(&sex)
    }

    #[must_use]
    pub fn visible_conditions(&self) -> &BTreeSet<Condition> {
        &self.visible_conditions
    }

    #[must_use]
    pub fn sex_filters(&self) -> &BTreeSet<Sex> {
        &self.sex_filters
    }

    #[must_use]
    pub fn normalization_mode(&self) -> NormalizationMode {
        self.normalization_mode
    }

    #[must_use]
    pub fn below_threshold(&self) -> f64 {
        self.below_threshold
    }

    #[must_use]
    pub fn above_threshold(&self) -> f64 {
        self.above_threshold
    }

    #[must_use]
    pub fn within(&self) -> WithinRange {
        self.within
    }

    /// `true` when both tails sit at their degenerate positions (`below = 0`,
    /// `above = 1`). The tail clause then admits every size.
    #[must_use]
    pub fn tails_disabled(&self) -> bool {
        self.below_threshold <= 0.0 && self.above_threshold >= 1.0
    }

    /// Applies one edit. Returns whether the configuration changed.
    ///
    /// Out-of-range thresholds are clamped into `[0, 1]`; non-finite values are
    /// rejected without touching the configuration.
    pub fn apply(&mut self, edit: FilterEdit) -> DashboardResult<bool> {
        let before = self.clone();
        match edit {
            FilterEdit::ToggleCondition(condition) => {
                if !self.visible_conditions.remove(&condition) {
                    self.visible_conditions.insert(condition);
                }
            }
            FilterEdit::SetConditionVisible { condition, visible } => {
                if visible {
                    self.visible_conditions.insert(condition);
                } else {
                    self.visible_conditions.remove(&condition);
                }
            }
            FilterEdit::ToggleSex(sex) => {
                if !self.sex_filters.remove(&sex) {
                    self.sex_filters.insert(sex);
                }
            }
            FilterEdit::SetSexEnabled { sex, enabled } => {
                if enabled {
                    self.sex_filters.insert(sex);
                } else {
                    self.sex_filters.remove(&sex);
                }
            }
            FilterEdit::SetBelowThreshold(value) => {
                self.below_threshold = clamp_unit(value, "below threshold")?;
            }
            FilterEdit::SetAboveThreshold(value) => {
                self.above_threshold = clamp_unit(value, "above threshold")?;
            }
            FilterEdit::SetWithinLower(value) => {
                let lo = clamp_unit(value, "within lower bound")?;
                self.within.lo = lo;
                if lo > self.within.hi {
                    self.within.hi = lo;
                }
            }
            FilterEdit::SetWithinUpper(value) => {
                let hi = clamp_unit(value, "within upper bound")?;
                self.within.hi = hi;
                if hi < self.within.lo {
                    self.within.lo = hi;
                }
            }
            FilterEdit::SetNormalizationMode(mode) => {
                self.normalization_mode = mode;
            }
        }
        Ok(*self != before)
    }

    /// Checks invariants of a configuration built outside [`FilterConfig::apply`],
    /// e.g. deserialized from JSON.
    pub fn validate(&self) -> DashboardResult<()> {
        for (name, value) in [
            ("below threshold", self.below_threshold),
            ("above threshold", self.above_threshold),
            ("within lower bound", self.within.lo),
            ("within upper bound", self.within.hi),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DashboardError::InvalidData(format!(
                    "{name} must be finite and in [0, 1]"
                )));
            }
        }
        if self.within.lo > self.within.hi {
            return Err(DashboardError::InvalidData(
                "within lower bound must be <= upper bound".to_owned(),
            ));
        }
        Ok(())
    }
}

fn clamp_unit(value: f64, name: &str) -> DashboardResult<f64> {
    if !value.is_finite() {
        return Err(DashboardError::InvalidData(format!(
            "{name} must be finite"
        )));
    }
    Ok(value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::{FilterConfig, FilterEdit, NormalizationMode};
    use crate::core::Condition;

    #[test]
    fn within_edits_clamp_opposite_bound() {
        let mut config = FilterConfig::default();
        assert!(config.apply(FilterEdit::SetWithinLower(0.97)).expect("edit"));
        assert_eq!(config.within().lo, 0.97);
        assert_eq!(config.within().hi, 0.97);

        assert!(config.apply(FilterEdit::SetWithinUpper(0.2)).expect("edit"));
        assert_eq!(config.within().lo, 0.2);
        assert_eq!(config.within().hi, 0.2);
    }

    #[test]
    fn repeated_edit_reports_no_change() {
        let mut config = FilterConfig::default();
        assert!(
            !config
                .apply(FilterEdit::SetNormalizationMode(NormalizationMode::Percentile))
                .expect("edit")
        );
        assert!(
            config
                .apply(FilterEdit::ToggleCondition(Condition::Cold))
                .expect("edit")
        );
        assert!(!config.is_condition_visible(Condition::Cold));
    }

    #[test]
    fn non_finite_threshold_is_rejected_without_change() {
        let mut config = FilterConfig::default();
        assert!(config.apply(FilterEdit::SetBelowThreshold(f64::NAN)).is_err());
        assert_eq!(config, FilterConfig::default());
        assert!(config.apply(FilterEdit::SetAboveThreshold(3.0)).expect("edit"));
        assert_eq!(config.above_threshold(), 1.0);
    }
}
