pub mod distribution;
pub mod profile;
pub mod record;
pub mod scale;
pub mod types;

pub use distribution::{ConditionDistribution, ConditionDistributions, SizeRange};
pub use profile::{gaussian_intensity, normalize_raw_profile, sample_gaussian_profile};
pub use record::{
    Condition, GradientProfile, LANDMARK_CONNECTIONS, LANDMARK_COUNT, LandmarkPoint,
    RecordStore, Sex, Specimen, SpecimenId, landmark_letter,
};
pub use scale::LinearScale;
pub use types::{DataPoint, DataRect, Margins, PlotArea, ViewKind};
