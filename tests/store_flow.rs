//! Store tests: queue semantics, reducer tree and the main loop flow.

mod common;

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use axis_store::axis::{AxisId, AxisStatus, SharedAxis};
use axis_store::config::units::Steps;
use axis_store::effects::PeriodicAction;
use axis_store::error::QueueFull;
use axis_store::model::{
    Action, App, AppStore, AxisAction, ClockAction, OutputId, OutputsAction, State,
};
use axis_store::store::{Dispatcher, Reducer, Store};
use common::*;
use fugit::ExtU32;

fn schedule(target: i64) -> Action {
    Action::Axis(AxisAction::Schedule {
        id: AxisId::X,
        target_position_steps: Steps(target),
    })
}

// =============================================================================
// Drain semantics
// =============================================================================

static BATCH_NOTIFICATIONS: AtomicUsize = AtomicUsize::new(0);
static BATCH_TICKS_SEEN: AtomicU32 = AtomicU32::new(0);

#[test]
fn test_batch_applied_in_order_with_one_notification() {
    let store = AppStore::new(State::new());
    store
        .subscribe(|state, _| {
            BATCH_NOTIFICATIONS.fetch_add(1, Ordering::SeqCst);
            BATCH_TICKS_SEEN.store(state.clock.ticks, Ordering::SeqCst);
        })
        .unwrap();

    store.dispatch(schedule(100));
    store.dispatch(Action::Outputs(OutputsAction::Toggle(OutputId::Green)));
    store.dispatch(schedule(-40));
    store.dispatch(Action::Clock(ClockAction::Tick));
    store.dispatch(Action::Clock(ClockAction::Tick));
    store.dispatch(Action::Init);

    assert!(store.drain());

    let state = store.get_state();
    assert_eq!(state.axis.x.target_position_steps, Steps(-40));
    assert!(!state.outputs.green);
    assert_eq!(state.clock.ticks, 2);
    assert_eq!(BATCH_NOTIFICATIONS.load(Ordering::SeqCst), 1);
    assert_eq!(BATCH_TICKS_SEEN.load(Ordering::SeqCst), 2);

    assert!(!store.drain());
    assert_eq!(BATCH_NOTIFICATIONS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_subscriber_dispatch_lands_in_next_drain() {
    let store = AppStore::new(State::new());
    store
        .subscribe(|state, dispatcher| {
            if state.clock.ticks < 3 {
                dispatcher.dispatch(Action::Clock(ClockAction::Tick));
            }
        })
        .unwrap();

    store.dispatch(Action::Clock(ClockAction::Tick));

    assert!(store.drain());
    assert_eq!(store.get_state().clock.ticks, 1);
    assert_eq!(store.pending(), 1);

    while store.drain() {}
    assert_eq!(store.get_state().clock.ticks, 3);
    assert_eq!(store.pending(), 0);
}

static REENTRANT: AppStore = AppStore::new(State::new());
static REENTRANT_RESULT: AtomicBool = AtomicBool::new(true);

#[test]
fn test_reentrant_drain_is_refused() {
    REENTRANT
        .subscribe(|_, dispatcher| {
            dispatcher.dispatch(Action::Init);
            REENTRANT_RESULT.store(REENTRANT.drain(), Ordering::SeqCst);
        })
        .unwrap();

    REENTRANT.dispatch(Action::Init);
    assert!(REENTRANT.drain());
    assert!(!REENTRANT_RESULT.load(Ordering::SeqCst));
    assert_eq!(REENTRANT.pending(), 1);
}

#[test]
#[should_panic(expected = "action queue saturated")]
fn test_dispatch_on_full_queue_panics() {
    let store: Store<App, 2, 1> = Store::new(State::new());
    store.dispatch(Action::Init);
    store.dispatch(Action::Init);
    store.dispatch(Action::Init);
}

#[test]
fn test_try_dispatch_returns_rejected_action() {
    let store: Store<App, 1, 1> = Store::new(State::new());
    store.try_dispatch(Action::Init).unwrap();

    let tick = Action::Clock(ClockAction::Tick);
    assert_eq!(store.try_dispatch(tick), Err(QueueFull(tick)));
    assert_eq!(store.dispatcher().try_dispatch(tick), Err(QueueFull(tick)));
}

// =============================================================================
// Reducer tree
// =============================================================================

#[test]
fn test_reducer_is_pure() {
    let state = State::new();
    let action = schedule(12);

    assert_eq!(App::reduce(state, &action), App::reduce(state, &action));
    assert_eq!(state, State::new());
}

#[test]
fn test_each_action_touches_its_domain_only() {
    let state = State::new();

    let outputs = App::reduce(state, &Action::Outputs(OutputsAction::Set(OutputId::Red, false)));
    assert_eq!(outputs.axis, state.axis);
    assert_eq!(outputs.clock, state.clock);

    let axis = App::reduce(state, &schedule(7));
    assert_eq!(axis.outputs, state.outputs);
    assert_eq!(axis.clock, state.clock);

    assert_eq!(App::reduce(state, &Action::Init), state);
}

// =============================================================================
// Main loop flow
// =============================================================================

#[test]
fn test_axis_follows_store() {
    let log = new_log();
    let store = AppStore::new(State::new());

    let mut axis = axis_store::axis::AxisController::builder()
        .enable_pin(RecordingPin::new(Line::Enable, &log))
        .dir_pin(RecordingPin::new(Line::Dir, &log))
        .step_pin(RecordingPin::new(Line::Step, &log))
        .delay(RecordingDelay::new(&log))
        .timer(FakeTimer::new())
        .sink(store.dispatcher())
        .profile(reference_profile())
        .build()
        .unwrap();

    store.dispatch(schedule(60));
    store.drain();

    let state = store.get_state();
    assert!(state.axis.x.has_pending_target());
    assert!(axis.follow(&state.axis.x).unwrap().is_some());

    store.drain();
    assert_eq!(store.get_state().axis.x.status, AxisStatus::RampUp);

    while axis.status() != AxisStatus::Stopped {
        axis.on_tick().unwrap();
        store.drain();
    }
    axis.progress();
    store.drain();

    let x = store.get_state().axis.x;
    assert_eq!(x.position_steps, Steps(60));
    assert_eq!(x.target_position_steps, Steps(60));
    assert_eq!(x.status, AxisStatus::Stopped);
    assert!(!x.has_pending_target());
    assert!(axis.follow(&x).unwrap().is_none());
}

#[test]
fn test_shared_axis_from_interrupt() {
    let log = new_log();
    let shared: SharedAxis<TestAxis> = SharedAxis::empty();
    shared.install(build_axis(&log, FakeTimer::new()));

    shared.lock(|axis| axis.move_to(Steps(3))).unwrap().unwrap();
    while shared.lock(|axis| axis.status()) != Some(AxisStatus::Stopped) {
        shared.lock(|axis| axis.on_tick()).unwrap().unwrap();
    }

    assert_eq!(shared.lock(|axis| axis.current_position_steps()), Some(Steps(3)));
}

#[test]
fn test_clock_effect() {
    let store = AppStore::new(State::new());
    let dispatcher: Dispatcher<'_, Action, 20> = store.dispatcher();
    let mut clock = PeriodicAction::clock(FakeTimer::new());

    clock.fire(dispatcher);
    assert_eq!(store.pending(), 0);

    clock.start(10_000.micros()).unwrap();
    assert_eq!(clock.timer().last(), Some(TimerCall::Periodic(10_000)));

    clock.fire(dispatcher);
    clock.fire(dispatcher);
    store.drain();
    assert_eq!(store.get_state().clock.ticks, 2);

    clock.stop();
    assert!(!clock.is_running());
    clock.fire(dispatcher);
    assert_eq!(store.pending(), 0);
}
