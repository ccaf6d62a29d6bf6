use std::cell::RefCell;
use std::rc::Rc;

use wingscope::api::{
    DashboardConfig, DashboardContext, DashboardEngine, DashboardEvent, DashboardObserver,
};
use wingscope::core::{
    Condition, DataPoint, GradientProfile, RecordStore, Sex, Specimen, SpecimenId, ViewKind,
};
use wingscope::filter::{FilterConfig, FilterEdit};
use wingscope::interaction::InteractionMode;
use wingscope::render::NullRenderer;

type Log = Rc<RefCell<Vec<(DashboardEvent, DashboardContext)>>>;

struct Recorder {
    id: String,
    log: Log,
}

impl Recorder {
    fn new(id: &str) -> (Self, Log) {
        let log = Log::default();
        (
            Self {
                id: id.to_owned(),
                log: log.clone(),
            },
            log,
        )
    }
}

impl DashboardObserver for Recorder {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: DashboardEvent, context: DashboardContext) {
        self.log.borrow_mut().push((event, context));
    }
}

fn wing(id: &str, condition: Condition, size: f64) -> Specimen {
    Specimen::new(
        id,
        condition,
        Sex::Female,
        size,
        (0..15).map(|i| DataPoint::new(f64::from(i) + size, f64::from(i % 3) - size)),
    )
    .expect("valid specimen")
    .with_profile(GradientProfile::new(size, 0.1, 1.0, 0.0, 4.0 + size))
}

fn store() -> RecordStore {
    RecordStore::new(vec![
        wing("a", Condition::Standard, 1.0),
        wing("b", Condition::Hypoxia, 2.0),
        wing("c", Condition::Cold, 3.0),
    ])
}

fn engine() -> DashboardEngine<NullRenderer> {
    let config = DashboardConfig::default().with_initial_filter(FilterConfig::admit_all());
    DashboardEngine::new(NullRenderer::default(), config, store()).expect("engine init")
}

fn events(log: &Log) -> Vec<DashboardEvent> {
    log.borrow().iter().map(|(event, _)| *event).collect()
}

#[test]
fn observer_ids_must_be_unique_and_non_empty() {
    let mut engine = engine();
    let (first, _) = Recorder::new("recorder");
    let (duplicate, _) = Recorder::new("recorder");
    let (unnamed, _) = Recorder::new("");

    engine.register_observer(Box::new(first)).expect("register");
    assert!(engine.register_observer(Box::new(duplicate)).is_err());
    assert!(engine.register_observer(Box::new(unnamed)).is_err());
    assert_eq!(engine.observer_count(), 1);

    assert!(engine.unregister_observer("recorder"));
    assert!(!engine.unregister_observer("recorder"));
    assert!(!engine.has_observer("recorder"));
}

#[test]
fn unregistered_observer_stops_receiving_events() {
    let mut engine = engine();
    let (recorder, log) = Recorder::new("recorder");
    engine.register_observer(Box::new(recorder)).expect("register");
    engine.clear_selection();
    engine
        .toggle_selection(&SpecimenId::from("a"))
        .expect("toggle");
    assert_eq!(log.borrow().len(), 1);

    engine.unregister_observer("recorder");
    engine
        .toggle_selection(&SpecimenId::from("b"))
        .expect("toggle");
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn filter_change_context_reflects_new_visible_set() {
    let mut engine = engine();
    let (recorder, log) = Recorder::new("recorder");
    engine.register_observer(Box::new(recorder)).expect("register");

    engine
        .apply_filter_edit(FilterEdit::ToggleCondition(Condition::Cold))
        .expect("edit");
    let log = log.borrow();
    let (event, context) = log.first().expect("event");
    assert_eq!(*event, DashboardEvent::FilterChanged { visible_len: 2 });
    assert_eq!(context.visible_len, 2);
    assert_eq!(context.specimens_len, 3);
}

#[test]
fn brush_gesture_emits_start_change_and_end() {
    let mut engine = engine();
    let (recorder, log) = Recorder::new("recorder");
    engine.register_observer(Box::new(recorder)).expect("register");
    let area = engine.config().landmark_area;

    engine
        .brush_start(ViewKind::LandmarkMap, DataPoint::new(area.left, area.top))
        .expect("start");
    engine
        .brush_move(DataPoint::new(area.right(), area.bottom()), 1.0)
        .expect("move");
    engine.brush_end().expect("end");

    assert_eq!(
        events(&log),
        vec![
            DashboardEvent::BrushStarted {
                view: ViewKind::LandmarkMap
            },
            DashboardEvent::SelectionChanged {
                selected_len: 3,
                revision: 1
            },
            DashboardEvent::BrushEnded {
                view: ViewKind::LandmarkMap
            },
        ]
    );
    let log = log.borrow();
    assert_eq!(
        log[0].1.interaction_mode,
        InteractionMode::Brushing(ViewKind::LandmarkMap)
    );
    assert_eq!(log[2].1.interaction_mode, InteractionMode::Idle);
}

#[test]
fn replacing_store_clears_selection_and_reports_load() {
    let mut engine = engine();
    engine
        .toggle_selection(&SpecimenId::from("a"))
        .expect("toggle");
    let (recorder, log) = Recorder::new("recorder");
    engine.register_observer(Box::new(recorder)).expect("register");

    engine
        .replace_store(RecordStore::new(vec![wing("z", Condition::Cold, 9.0)]))
        .expect("replace");
    assert!(engine.selection().is_empty());
    assert_eq!(engine.visible_ids().len(), 1);
    assert_eq!(
        events(&log),
        vec![
            DashboardEvent::SelectionChanged {
                selected_len: 0,
                revision: 2
            },
            DashboardEvent::DataLoaded { specimens_len: 1 },
        ]
    );
}

#[test]
fn render_reports_frame_count() {
    let mut engine = engine();
    let (recorder, log) = Recorder::new("recorder");
    engine.register_observer(Box::new(recorder)).expect("register");
    engine.render().expect("render");
    assert_eq!(events(&log), vec![DashboardEvent::Rendered { frames: 3 }]);
}
