use wingscope::api::{DashboardConfig, DashboardEngine};
use wingscope::core::{
    Condition, DataPoint, GradientProfile, LANDMARK_CONNECTIONS, RecordStore, Sex, Specimen,
    SpecimenId, ViewKind,
};
use wingscope::error::DashboardResult;
use wingscope::filter::{FilterConfig, FilterEdit};
use wingscope::render::{NullRenderer, RenderFrame, Renderer};
use wingscope::views::palette;

#[derive(Debug, Default)]
struct RecordingRenderer {
    frames: Vec<RenderFrame>,
}

impl RecordingRenderer {
    fn last(&self, view: ViewKind) -> Option<&RenderFrame> {
        self.frames.iter().rev().find(|frame| frame.view == view)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()> {
        frame.validate()?;
        self.frames.push(frame.clone());
        Ok(())
    }
}

fn wing(id: &str, condition: Condition, size: f64) -> Specimen {
    Specimen::new(
        id,
        condition,
        Sex::Male,
        size,
        (0..15).map(|i| {
            DataPoint::new(
                f64::from(i % 5) * 20.0 + size,
                f64::from(i / 5) * 15.0 - size,
            )
        }),
    )
    .expect("valid specimen")
    .with_profile(GradientProfile::new(size * 10.0, 0.1, 1.0, 0.0, 5.0 + size))
}

fn store() -> RecordStore {
    RecordStore::new(vec![
        wing("std-1", Condition::Standard, 1.0),
        wing("hyp-1", Condition::Hypoxia, 2.0),
        wing("cold-1", Condition::Cold, 3.0),
    ])
}

fn engine<R: Renderer>(renderer: R) -> DashboardEngine<R> {
    let config = DashboardConfig::default().with_initial_filter(FilterConfig::admit_all());
    DashboardEngine::new(renderer, config, store()).expect("engine init")
}

#[test]
fn first_render_draws_every_view_then_nothing() {
    let mut engine = engine(NullRenderer::default());
    assert_eq!(engine.render().expect("render"), 3);
    assert_eq!(engine.render().expect("render"), 0);

    let renderer = engine.into_renderer();
    assert_eq!(renderer.total_frames(), 3);
    assert_eq!(renderer.stats(ViewKind::Scatter).circle_count, 3);
    assert_eq!(renderer.stats(ViewKind::GradientProfiles).polyline_count, 3);
    assert_eq!(renderer.stats(ViewKind::LandmarkMap).circle_count, 45);
    assert_eq!(renderer.stats(ViewKind::LandmarkMap).line_count, 0);
}

#[test]
fn viewport_change_redraws_only_landmark_map() {
    let mut engine = engine(NullRenderer::default());
    engine.render().expect("render");

    engine
        .wheel_zoom(DataPoint::new(400.0, 300.0), 1.5)
        .expect("zoom");
    assert_eq!(engine.render().expect("render"), 1);

    let renderer = engine.into_renderer();
    assert_eq!(renderer.stats(ViewKind::LandmarkMap).frames, 2);
    assert_eq!(renderer.stats(ViewKind::Scatter).frames, 1);
}

#[test]
fn filter_edit_without_change_renders_nothing() {
    let mut engine = engine(NullRenderer::default());
    engine.render().expect("render");

    let changed = engine
        .apply_filter_edit(FilterEdit::SetConditionVisible {
            condition: Condition::Cold,
            visible: true,
        })
        .expect("edit");
    assert!(!changed);
    assert!(engine.pending_invalidation().is_none());
    assert_eq!(engine.render().expect("render"), 0);
}

#[test]
fn filter_change_with_identical_output_is_not_resent() {
    let mut engine = engine(NullRenderer::default());
    engine.render().expect("render");

    engine
        .apply_filter_edit(FilterEdit::SetWithinUpper(0.99))
        .expect("edit");
    assert!(!engine.pending_invalidation().is_none());
    assert_eq!(engine.render().expect("render"), 0);
}

#[test]
fn hidden_condition_disappears_from_every_view() {
    let mut engine = engine(NullRenderer::default());
    engine.render().expect("render");
    engine
        .apply_filter_edit(FilterEdit::ToggleCondition(Condition::Hypoxia))
        .expect("edit");
    assert_eq!(engine.render().expect("render"), 3);

    let renderer = engine.into_renderer();
    assert_eq!(renderer.stats(ViewKind::Scatter).circle_count, 2);
    assert_eq!(renderer.stats(ViewKind::GradientProfiles).polyline_count, 2);
    assert_eq!(renderer.stats(ViewKind::LandmarkMap).circle_count, 30);
}

#[test]
fn selection_emphasis_drives_opacity_and_skeleton() {
    let mut engine = engine(RecordingRenderer::default());
    engine
        .toggle_selection(&SpecimenId::from("hyp-1"))
        .expect("toggle");
    engine.render().expect("render");
    let renderer = engine.renderer();

    let scatter = renderer.last(ViewKind::Scatter).expect("scatter frame");
    for circle in &scatter.circles {
        let expected = if circle.key == "hyp-1" {
            palette::LANDMARK_SELECTED_OPACITY
        } else {
            palette::LANDMARK_DIMMED_OPACITY
        };
        assert_eq!(circle.fill.alpha, expected);
    }

    let profiles = renderer
        .last(ViewKind::GradientProfiles)
        .expect("profiles frame");
    let last = profiles.polylines.last().expect("curves");
    assert_eq!(last.key, "hyp-1");
    assert_eq!(last.color.alpha, palette::CURVE_SELECTED_OPACITY);
    assert_eq!(last.stroke_width, 2.0);
    assert!(profiles.polylines[..profiles.polylines.len() - 1]
        .iter()
        .all(|curve| curve.color.alpha == palette::CURVE_BACKGROUND_OPACITY));

    let map = renderer.last(ViewKind::LandmarkMap).expect("map frame");
    assert_eq!(map.lines.len(), LANDMARK_CONNECTIONS.len());
    assert_eq!(map.texts.len(), 45);
    assert!(map
        .circles
        .iter()
        .filter(|circle| circle.key.starts_with("hyp-1:"))
        .all(|circle| circle.fill.alpha == palette::LANDMARK_SELECTED_OPACITY));
}

#[test]
fn idle_curves_use_idle_opacity() {
    let mut engine = engine(RecordingRenderer::default());
    engine.render().expect("render");
    let profiles = engine
        .renderer()
        .last(ViewKind::GradientProfiles)
        .expect("profiles frame");
    assert!(profiles
        .polylines
        .iter()
        .all(|curve| curve.color.alpha == palette::CURVE_IDLE_OPACITY && curve.stroke_width == 1.0));
}

#[test]
fn raw_profile_replaces_fitted_curve() {
    let mut engine = engine(RecordingRenderer::default());
    engine.render().expect("render");
    let samples = [
        DataPoint::new(-0.5, 2.0),
        DataPoint::new(0.0, 4.0),
        DataPoint::new(0.5, 1.0),
    ];
    assert!(engine
        .set_raw_profile(&SpecimenId::from("std-1"), &samples)
        .expect("raw profile"));
    assert_eq!(engine.render().expect("render"), 1);

    let profiles = engine
        .renderer()
        .last(ViewKind::GradientProfiles)
        .expect("profiles frame");
    let raw = profiles
        .polylines
        .iter()
        .find(|curve| curve.key == "std-1")
        .expect("raw curve");
    assert_eq!(raw.points.len(), 3);

    assert!(engine
        .set_raw_profile(&SpecimenId::from("missing"), &samples)
        .is_err());
}
