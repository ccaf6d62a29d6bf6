use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wingscope::api::{DashboardConfig, DashboardEngine};
use wingscope::core::{
    Condition, DataPoint, GradientProfile, PlotArea, RecordStore, Sex, Specimen, SpecimenId,
};
use wingscope::filter::{FilterConfig, NormalizationMode, visible_specimen_ids};
use wingscope::render::NullRenderer;
use wingscope::viewport::{
    BaseScales, DEFAULT_DOMAIN_PADDING_RATIO, ViewportProjection, ViewportTransform,
};
use wingscope::views::landmark_extent;

fn synthetic_store(count: usize) -> RecordStore {
    RecordStore::new(
        (0..count)
            .map(|i| {
                let size = 200.0 + (i * 37 % 1_000) as f64 * 0.25;
                let condition = Condition::ALL[i % Condition::ALL.len()];
                let sex = if i % 2 == 0 { Sex::Female } else { Sex::Male };
                Specimen::new(
                    format!("wd-{i:05}"),
                    condition,
                    sex,
                    size,
                    (0..15).map(move |j| {
                        let j = f64::from(j);
                        DataPoint::new(j * 18.0 + size * 0.01, (j * 0.7).sin() * 40.0)
                    }),
                )
                .expect("valid generated specimen")
                .with_profile(GradientProfile::new(size * 90.0, 0.1, 1.0, 0.0, 20.0 + size * 0.05))
            })
            .collect(),
    )
}

fn bench_size_filter_10k(c: &mut Criterion) {
    let store = synthetic_store(10_000);
    let percentile = FilterConfig::default();
    let absolute = FilterConfig::default().with_normalization_mode(NormalizationMode::Absolute);

    c.bench_function("size_filter_percentile_10k", |b| {
        b.iter(|| visible_specimen_ids(black_box(&store), black_box(&percentile)))
    });
    c.bench_function("size_filter_absolute_10k", |b| {
        b.iter(|| visible_specimen_ids(black_box(&store), black_box(&absolute)))
    });
}

fn bench_landmark_projection_2k(c: &mut Criterion) {
    let store = synthetic_store(2_000);
    let extent = landmark_extent(&store).expect("extent");
    let base = BaseScales::fit(
        extent,
        PlotArea::new(60.0, 60.0, 620.0, 580.0),
        DEFAULT_DOMAIN_PADDING_RATIO,
    )
    .expect("base scales");
    let projection = ViewportProjection {
        base,
        transform: ViewportTransform::new(-250.0, -120.0, 3.5),
    };
    let points: Vec<DataPoint> = store
        .iter()
        .flat_map(|specimen| specimen.landmarks().iter().map(|point| point.position()))
        .collect();

    c.bench_function("landmark_projection_30k_points", |b| {
        b.iter(|| {
            black_box(&points)
                .iter()
                .map(|point| projection.project(*point))
                .fold(0.0, |acc, pixel| acc + pixel.x)
        })
    });
}

fn bench_engine_selection_render_1k(c: &mut Criterion) {
    let config = DashboardConfig::default();
    let mut engine = DashboardEngine::new(NullRenderer::default(), config, synthetic_store(1_000))
        .expect("engine init");
    engine.render().expect("initial render");
    let ids: Vec<SpecimenId> = engine.visible_ids().iter().take(16).cloned().collect();

    c.bench_function("engine_toggle_and_render_1k", |b| {
        let mut cursor = 0;
        b.iter(|| {
            let id = &ids[cursor % ids.len()];
            cursor += 1;
            engine.toggle_selection(id).expect("toggle");
            black_box(engine.render().expect("render"))
        })
    });
}

criterion_group!(
    benches,
    bench_size_filter_10k,
    bench_landmark_projection_2k,
    bench_engine_selection_render_1k
);
criterion_main!(benches);
