use wingscope::DashboardError;
use wingscope::core::{
    Condition, DataPoint, GradientProfile, LANDMARK_COUNT, RecordStore, Sex, Specimen, SpecimenId,
};

fn landmarks(count: usize) -> Vec<DataPoint> {
    (0..count)
        .map(|i| DataPoint::new(i as f64, (i * 2) as f64))
        .collect()
}

fn wing(id: &str, condition: Condition, size: f64) -> Specimen {
    Specimen::new(id, condition, Sex::Male, size, landmarks(LANDMARK_COUNT)).expect("valid specimen")
}

#[test]
fn specimen_requires_exactly_fifteen_landmarks() {
    for count in [0, 14, 16] {
        let err = Specimen::new("bad", Condition::Standard, Sex::Female, 1.0, landmarks(count))
            .expect_err("must fail");
        assert!(matches!(err, DashboardError::InvalidData(_)));
    }
}

#[test]
fn landmarks_are_lettered_in_index_order() {
    let specimen = wing("w", Condition::Standard, 1.0);
    let letters: String = specimen.landmarks().iter().map(|point| point.letter()).collect();
    assert_eq!(letters, "ABCDEFGHIJKLMNO");
    let eighth = specimen.landmark(8).expect("landmark 8");
    assert_eq!(eighth.letter(), 'H');
    assert_eq!(eighth.position(), DataPoint::new(7.0, 14.0));
    assert!(specimen.landmark(0).is_none());
    assert!(specimen.landmark(16).is_none());
}

#[test]
fn duplicate_ids_keep_first_occurrence() {
    let store = RecordStore::new(vec![
        wing("dup", Condition::Standard, 1.0),
        wing("dup", Condition::Cold, 5.0),
        wing("other", Condition::Hypoxia, 2.0),
    ]);
    assert_eq!(store.len(), 2);
    let kept = store.get(&SpecimenId::from("dup")).expect("kept");
    assert_eq!(kept.condition(), Condition::Standard);
    let order: Vec<&str> = store.iter().map(|specimen| specimen.id().as_str()).collect();
    assert_eq!(order, vec!["dup", "other"]);
}

#[test]
fn non_finite_sizes_are_kept_but_excluded_from_statistics() {
    let store = RecordStore::new(vec![
        wing("a", Condition::Standard, 2.0),
        wing("nan", Condition::Standard, f64::NAN),
        wing("b", Condition::Standard, 6.0),
        wing("inf", Condition::Cold, f64::INFINITY),
    ]);
    assert_eq!(store.len(), 4);
    let range = store.size_range().expect("range");
    assert_eq!((range.min, range.max), (2.0, 6.0));
    assert_eq!(
        store
            .distributions()
            .get(Condition::Standard)
            .expect("standard")
            .len(),
        2
    );
    assert!(
        store
            .distributions()
            .get(Condition::Cold)
            .is_none_or(|distribution| distribution.is_empty())
    );
}

#[test]
fn area_range_uses_profiles_only() {
    let store = RecordStore::new(vec![
        wing("bare", Condition::Standard, 1.0),
        wing("p1", Condition::Standard, 2.0)
            .with_profile(GradientProfile::new(120.0, 0.1, 1.0, 0.0, 3.0)),
        wing("p2", Condition::Hypoxia, 3.0)
            .with_profile(GradientProfile::new(80.0, 0.1, 1.0, 0.0, 3.0)),
    ]);
    let range = store.area_range().expect("area range");
    assert_eq!((range.min, range.max), (80.0, 120.0));
}

#[test]
fn empty_store_has_no_ranges() {
    let store = RecordStore::new(Vec::new());
    assert!(store.is_empty());
    assert!(store.size_range().is_none());
    assert!(store.area_range().is_none());
}

#[test]
fn labels_and_codes_map_onto_closed_sets() {
    assert_eq!(Condition::from_label("HYPOXIA"), Condition::Hypoxia);
    assert_eq!(Condition::from_label("cold_17C"), Condition::Cold);
    assert_eq!(Condition::from_label("control"), Condition::Standard);
    assert_eq!(Sex::from_code("female"), Sex::Female);
    assert_eq!(Sex::from_code("M"), Sex::Male);
}
