use crate::core::record::GradientProfile;
use crate::core::types::DataPoint;

/// Number of samples generated for one fitted profile curve.
pub const PROFILE_CURVE_SAMPLES: usize = 200;

/// Half-width of the minimum sampled distance window, in micrometres.
pub const PROFILE_MIN_HALF_WINDOW: f64 = 50.0;

/// Normalized Gaussian gradient: `A + (1 - A) * exp(-(x - C)^2 / (2 D^2))`.
#[must_use]
pub fn gaussian_intensity(x: f64, profile: GradientProfile) -> f64 {
    let offset = x - profile.c;
    profile.a + (1.0 - profile.a) * (-(offset * offset) / (2.0 * profile.d * profile.d)).exp()
}

/// Samples the fitted curve over `C ± 3|D|`, widened to at least `±50`.
///
/// Returns an empty vector when any parameter is non-finite or the spread is
/// zero.
#[must_use]
pub fn sample_gaussian_profile(profile: GradientProfile) -> Vec<DataPoint> {
    if !profile.is_finite() || profile.d == 0.0 {
        return Vec::new();
    }

    let half = 3.0 * profile.d.abs();
    let start = (profile.c - half).min(-PROFILE_MIN_HALF_WINDOW);
    let end = (profile.c + half).max(PROFILE_MIN_HALF_WINDOW);
    let step = (end - start) / (PROFILE_CURVE_SAMPLES - 1) as f64;

    (0..PROFILE_CURVE_SAMPLES)
        .map(|i| {
            let x = start + i as f64 * step;
            DataPoint::new(x, gaussian_intensity(x, profile))
        })
        .collect()
}

/// Scales a raw measured profile by its maximum intensity.
///
/// Non-finite samples are dropped and the result is sorted by distance. An
/// unusable maximum (non-finite or `<= 0`) or fewer than two samples yields an
/// empty curve.
#[must_use]
pub fn normalize_raw_profile(samples: &[DataPoint]) -> Vec<DataPoint> {
    let max_value = samples
        .iter()
        .map(|sample| sample.y)
        .filter(|value| value.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_value.is_finite() || max_value <= 0.0 {
        return Vec::new();
    }

    let mut curve: Vec<DataPoint> = samples
        .iter()
        .filter(|sample| sample.is_finite())
        .map(|sample| DataPoint::new(sample.x, sample.y / max_value))
        .collect();
    curve.sort_by(|left, right| left.x.total_cmp(&right.x));
    if curve.len() < 2 {
        return Vec::new();
    }
    curve
}

#[cfg(test)]
mod tests {
    use super::{normalize_raw_profile, sample_gaussian_profile};
    use crate::core::record::GradientProfile;
    use crate::core::types::DataPoint;

    #[test]
    fn gaussian_curve_peaks_at_center() {
        let curve = sample_gaussian_profile(GradientProfile::new(1.0, 0.2, 1.0, 0.0, 10.0));
        assert_eq!(curve.len(), 200);
        let peak = curve
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, |acc, point| acc.max(point.y));
        assert!(peak <= 1.0 && peak > 0.99);
        assert!(curve.first().expect("first").x <= -50.0);
        assert!(curve.last().expect("last").x >= 49.999);
    }

    #[test]
    fn degenerate_spread_produces_no_curve() {
        assert!(sample_gaussian_profile(GradientProfile::new(1.0, 0.2, 1.0, 0.0, 0.0)).is_empty());
        assert!(
            sample_gaussian_profile(GradientProfile::new(1.0, f64::NAN, 1.0, 0.0, 3.0)).is_empty()
        );
    }

    #[test]
    fn raw_profile_is_scaled_and_sorted() {
        let curve = normalize_raw_profile(&[
            DataPoint::new(2.0, 5.0),
            DataPoint::new(-1.0, 10.0),
            DataPoint::new(f64::NAN, 3.0),
        ]);
        assert_eq!(curve, vec![DataPoint::new(-1.0, 1.0), DataPoint::new(2.0, 0.5)]);
    }
}
