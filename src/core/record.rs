use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::distribution::{ConditionDistributions, SizeRange};
use crate::core::types::DataPoint;
use crate::error::{DashboardError, DashboardResult};

/// Number of anatomical landmarks recorded per specimen.
pub const LANDMARK_COUNT: usize = 15;

/// Landmark index pairs drawn as the wing skeleton of a selected specimen.
pub const LANDMARK_CONNECTIONS: [(u8, u8); 20] = [
    (1, 7),
    (2, 6),
    (2, 7),
    (3, 5),
    (3, 9),
    (4, 5),
    (4, 15),
    (5, 11),
    (6, 12),
    (7, 12),
    (8, 6),
    (8, 9),
    (8, 13),
    (9, 10),
    (10, 11),
    (10, 14),
    (11, 15),
    (12, 13),
    (13, 14),
    (14, 15),
];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecimenId(String);

impl SpecimenId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecimenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpecimenId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Rearing condition of a specimen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Condition {
    Standard,
    Hypoxia,
    Cold,
}

impl Condition {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Hypoxia, Self::Cold];

    /// Maps a free-form condition label from ingestion onto the closed set.
    ///
    /// Unknown or empty labels fall back to `Standard`.
    #[must_use]
    pub fn from_label(raw: &str) -> Self {
        let label = raw.to_ascii_lowercase();
        if label.contains("hypo") {
            Self::Hypoxia
        } else if label.contains("cold") || label.contains("17c") || label.contains("low") {
            Self::Cold
        } else {
            Self::Standard
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hypoxia => "hypoxia",
            Self::Cold => "cold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Self; 2] = [Self::Female, Self::Male];

    /// `"F"` / `"female"` (any case) map to `Female`, everything else to `Male`.
    #[must_use]
    pub fn from_code(raw: &str) -> Self {
        let code = raw.trim();
        if code.eq_ignore_ascii_case("f") || code.eq_ignore_ascii_case("female") {
            Self::Female
        } else {
            Self::Male
        }
    }
}

/// One anatomical landmark of a specimen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    index: u8,
    pub x: f64,
    pub y: f64,
}

impl LandmarkPoint {
    /// 1-based landmark index.
    #[must_use]
    pub fn index(self) -> u8 {
        self.index
    }

    /// Letter label: landmark 1 is `'A'`, landmark 15 is `'O'`.
    #[must_use]
    pub fn letter(self) -> char {
        landmark_letter(self.index)
    }

    #[must_use]
    pub fn position(self) -> DataPoint {
        DataPoint::new(self.x, self.y)
    }
}

#[must_use]
pub fn landmark_letter(index: u8) -> char {
    char::from(b'A' + index.saturating_sub(1))
}

/// Gaussian gradient-profile parameters fitted per wing disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientProfile {
    pub area: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl GradientProfile {
    #[must_use]
    pub const fn new(area: f64, a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { area, a, b, c, d }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        [self.area, self.a, self.b, self.c, self.d]
            .iter()
            .all(|value| value.is_finite())
    }
}

/// One measured wing disc with its landmarks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Specimen {
    id: SpecimenId,
    condition: Condition,
    sex: Sex,
    centroid_size: f64,
    log_centroid_size: Option<f64>,
    profile: Option<GradientProfile>,
    landmarks: SmallVec<[LandmarkPoint; LANDMARK_COUNT]>,
}

impl Specimen {
    /// Builds a specimen from its landmark coordinates in index order (1..=15).
    pub fn new(
        id: impl Into<SpecimenId>,
        condition: Condition,
        sex: Sex,
        centroid_size: f64,
        landmarks: impl IntoIterator<Item = DataPoint>,
    ) -> DashboardResult<Self> {
        let id = id.into();
        let points: SmallVec<[DataPoint; LANDMARK_COUNT]> = landmarks.into_iter().collect();
        if points.len() != LANDMARK_COUNT {
            return Err(DashboardError::InvalidData(format!(
                "specimen `{id}` must have exactly {LANDMARK_COUNT} landmarks, got {}",
                points.len()
            )));
        }
        let landmarks = points
            .into_iter()
            .zip(1u8..)
            .map(|(point, index)| LandmarkPoint {
                index,
                x: point.x,
                y: point.y,
            })
            .collect();

        Ok(Self {
            id,
            condition,
            sex,
            centroid_size,
            log_centroid_size: None,
            profile: None,
            landmarks,
        })
    }

    #[must_use]
    pub fn with_log_centroid_size(mut self, value: f64) -> Self {
        self.log_centroid_size = Some(value);
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: GradientProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    #[must_use]
    pub fn id(&self) -> &SpecimenId {
        &self.id
    }

    #[must_use]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        self.sex
    }

    #[must_use]
    pub fn centroid_size(&self) -> f64 {
        self.centroid_size
    }

    #[must_use]
    pub fn log_centroid_size(&self) -> Option<f64> {
        self.log_centroid_size
    }

    #[must_use]
    pub fn profile(&self) -> Option<GradientProfile> {
        self.profile
    }

    #[must_use]
    pub fn landmarks(&self) -> &[LandmarkPoint] {
        &self.landmarks
    }

    /// Landmark by 1-based index.
    #[must_use]
    pub fn landmark(&self, index: u8) -> Option<LandmarkPoint> {
        usize::from(index)
            .checked_sub(1)
            .and_then(|slot| self.landmarks.get(slot))
            .copied()
    }

    #[must_use]
    pub fn has_finite_size(&self) -> bool {
        self.centroid_size.is_finite()
    }
}

/// Immutable set of specimens plus the statistics derived from it at load.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    specimens: IndexMap<SpecimenId, Specimen>,
    distributions: ConditionDistributions,
    size_range: Option<SizeRange>,
    area_range: Option<SizeRange>,
}

impl RecordStore {
    /// Ingests already-typed specimens.
    ///
    /// Duplicate IDs keep the first occurrence. Specimens with a non-finite
    /// centroid size are kept but never contribute to the size statistics.
    #[must_use]
    pub fn new(specimens: Vec<Specimen>) -> Self {
        let original_count = specimens.len();
        let mut by_id = IndexMap::with_capacity(original_count);
        for specimen in specimens {
            if by_id.contains_key(specimen.id()) {
                warn!(id = %specimen.id(), "dropping specimen with duplicate id");
                continue;
            }
            if !specimen.has_finite_size() {
                warn!(
                    id = %specimen.id(),
                    size = specimen.centroid_size(),
                    "non-finite centroid size, specimen excluded from size filtering"
                );
            }
            by_id.insert(specimen.id().clone(), specimen);
        }

        let distributions = ConditionDistributions::from_specimens(by_id.values());
        let size_range = SizeRange::from_values(by_id.values().map(Specimen::centroid_size));
        let area_range = SizeRange::from_values(
            by_id
                .values()
                .filter_map(|specimen| specimen.profile().map(|profile| profile.area)),
        );
        debug!(
            original_count,
            canonical_count = by_id.len(),
            "record store loaded"
        );

        Self {
            specimens: by_id,
            distributions,
            size_range,
            area_range,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specimens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specimens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Specimen> {
        self.specimens.values()
    }

    #[must_use]
    pub fn get(&self, id: &SpecimenId) -> Option<&Specimen> {
        self.specimens.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &SpecimenId) -> bool {
        self.specimens.contains_key(id)
    }

    #[must_use]
    pub fn distributions(&self) -> &ConditionDistributions {
        &self.distributions
    }

    /// Global centroid-size range over all finite sizes.
    #[must_use]
    pub fn size_range(&self) -> Option<SizeRange> {
        self.size_range
    }

    /// Global wing-disc area range over all finite profile areas.
    #[must_use]
    pub fn area_range(&self) -> Option<SizeRange> {
        self.area_range
    }
}

#[cfg(test)]
mod tests {
    use super::{Condition, Sex, landmark_letter};

    #[test]
    fn condition_labels_map_onto_closed_set() {
        assert_eq!(Condition::from_label("Hypoxia_5pct"), Condition::Hypoxia);
        assert_eq!(Condition::from_label("17C"), Condition::Cold);
        assert_eq!(Condition::from_label("LowTemp"), Condition::Cold);
        assert_eq!(Condition::from_label("normoxia"), Condition::Standard);
        assert_eq!(Condition::from_label(""), Condition::Standard);
    }

    #[test]
    fn sex_codes_default_to_male() {
        assert_eq!(Sex::from_code("F"), Sex::Female);
        assert_eq!(Sex::from_code(" female "), Sex::Female);
        assert_eq!(Sex::from_code("M"), Sex::Male);
        assert_eq!(Sex::from_code("?"), Sex::Male);
    }

    #[test]
    fn landmark_letters_follow_index() {
        assert_eq!(landmark_letter(1), 'A');
        assert_eq!(landmark_letter(15), 'O');
    }
}
