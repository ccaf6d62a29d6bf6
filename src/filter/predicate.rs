use std::collections::BTreeSet;

#[cfg(feature = "parallel-filter")]
use rayon::prelude::*;

use crate::core::{ConditionDistributions, RecordStore, SizeRange, Specimen, SpecimenId};

use super::{FilterConfig, NormalizationMode};

/// Maps a specimen's centroid size into `[0, 1]` under `mode`.
///
/// Returns `None` for non-finite sizes or when no reference statistics exist,
/// which callers treat as "never visible".
#[must_use]
pub fn normalized_size(
    specimen: &Specimen,
    mode: NormalizationMode,
    distributions: &ConditionDistributions,
    global_range: Option<SizeRange>,
) -> Option<f64> {
    let size = specimen.centroid_size();
    if !size.is_finite() {
        return None;
    }
    match mode {
        NormalizationMode::Percentile => distributions.percentile(specimen.condition(), size),
        NormalizationMode::Absolute => global_range.and_then(|range| range.normalize(size)),
    }
}

/// Threshold part of the visibility rule:
/// `(n <= below OR n >= above) AND lo <= n <= hi`.
///
/// The tail clause is skipped only when both tails are degenerate at once
/// (`below == 0` and `above == 1`, see [`FilterConfig::tails_disabled`]).
/// A single degenerate tail still applies the literal comparison.
#[must_use]
pub fn passes_size_thresholds(normalized: f64, filter: &FilterConfig) -> bool {
    let below = normalized <= filter.below_threshold();
    let above = normalized >= filter.above_threshold();
    let tails = below || above || filter.tails_disabled();
    tails && filter.within().contains(normalized)
}

/// Full visibility predicate for one specimen.
#[must_use]
pub fn is_visible(
    specimen: &Specimen,
    filter: &FilterConfig,
    distributions: &ConditionDistributions,
    global_range: Option<SizeRange>,
) -> bool {
    if !filter.is_condition_visible(specimen.condition()) {
        return false;
    }
    if !filter.is_sex_enabled(specimen.sex()) {
        return false;
    }
    normalized_size(
        specimen,
        filter.normalization_mode(),
        distributions,
        global_range,
    )
    .is_some_and(|normalized| passes_size_thresholds(normalized, filter))
}

/// IDs of every visible specimen in `store`.
#[must_use]
pub fn visible_specimen_ids(store: &RecordStore, filter: &FilterConfig) -> BTreeSet<SpecimenId> {
    let distributions = store.distributions();
    let global_range = store.size_range();

    #[cfg(feature = "parallel-filter")]
    {
        let specimens: Vec<&Specimen> = store.iter().collect();
        specimens
            .par_iter()
            .filter(|specimen| is_visible(specimen, filter, distributions, global_range))
            .map(|specimen| specimen.id().clone())
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    #[cfg(not(feature = "parallel-filter"))]
    {
        store
            .iter()
            .filter(|specimen| is_visible(specimen, filter, distributions, global_range))
            .map(|specimen| specimen.id().clone())
            .collect()
    }
}
