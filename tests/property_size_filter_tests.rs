use proptest::prelude::*;
use wingscope::core::{Condition, DataPoint, RecordStore, Sex, Specimen};
use wingscope::filter::{FilterConfig, FilterEdit, NormalizationMode, visible_specimen_ids};

fn condition_from(index: u8) -> Condition {
    Condition::ALL[usize::from(index) % Condition::ALL.len()]
}

fn store_from(sizes: &[(f64, u8, bool)]) -> RecordStore {
    RecordStore::new(
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(size, condition, female))| {
                let sex = if female { Sex::Female } else { Sex::Male };
                Specimen::new(
                    format!("w{i}").as_str(),
                    condition_from(condition),
                    sex,
                    size,
                    (0..15).map(|j| DataPoint::new(f64::from(j), size)),
                )
                .expect("valid specimen")
            })
            .collect(),
    )
}

proptest! {
    #[test]
    fn degenerate_thresholds_admit_every_enabled_record(
        sizes in prop::collection::vec((0.1f64..500.0, 0u8..3, any::<bool>()), 1..60)
    ) {
        let store = store_from(&sizes);
        let filter = FilterConfig::default()
            .with_thresholds(0.0, 1.0, 0.0, 1.0)
            .expect("thresholds");

        let visible = visible_specimen_ids(&store, &filter);
        prop_assert_eq!(visible.len(), store.len());
    }

    #[test]
    fn mode_switching_is_deterministic(
        sizes in prop::collection::vec((0.1f64..500.0, 0u8..3, any::<bool>()), 1..60),
        below in 0.0f64..=1.0,
        above in 0.0f64..=1.0,
        lo in 0.0f64..=1.0,
        hi in 0.0f64..=1.0
    ) {
        let store = store_from(&sizes);
        let mut filter = FilterConfig::default()
            .with_thresholds(below, above, lo, hi)
            .expect("thresholds");

        let percentile = visible_specimen_ids(&store, &filter);
        filter
            .apply(FilterEdit::SetNormalizationMode(NormalizationMode::Absolute))
            .expect("edit");
        let absolute = visible_specimen_ids(&store, &filter);
        filter
            .apply(FilterEdit::SetNormalizationMode(NormalizationMode::Percentile))
            .expect("edit");

        prop_assert_eq!(visible_specimen_ids(&store, &filter), percentile);
        filter
            .apply(FilterEdit::SetNormalizationMode(NormalizationMode::Absolute))
            .expect("edit");
        prop_assert_eq!(visible_specimen_ids(&store, &filter), absolute);
    }

    #[test]
    fn disabling_a_sex_never_grows_the_visible_set(
        sizes in prop::collection::vec((0.1f64..500.0, 0u8..3, any::<bool>()), 1..60)
    ) {
        let store = store_from(&sizes);
        let mut filter = FilterConfig::default();
        let before = visible_specimen_ids(&store, &filter);
        filter.apply(FilterEdit::ToggleSex(Sex::Male)).expect("edit");
        let after = visible_specimen_ids(&store, &filter);

        prop_assert!(after.is_subset(&before));
    }
}
