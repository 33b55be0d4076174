//! Shared helpers for workshop specs

#![allow(dead_code, unused_imports)]

pub use std::sync::{mpsc, Arc, Barrier};
pub use std::time::Duration;
pub use workshop_adapters::{ExecuteCall, FakeWorkplace};
pub use workshop_core::{
    WorkerId, Workplace, WorkplaceId, Workshop, WorkshopConfig, WorkshopError, WorkshopStats,
};

/// Long enough for a blocked worker to have moved had it been able to
pub const SETTLE: Duration = Duration::from_millis(50);

/// Upper bound for anything that must eventually happen
pub const LIVENESS: Duration = Duration::from_secs(10);

pub type Floor = Workshop<FakeWorkplace>;

pub fn wid(id: &str) -> WorkplaceId {
    id.into()
}

/// Workshop over fake workplaces with the default admission limit
pub fn floor(ids: &[&str]) -> Arc<Floor> {
    floor_with(ids, WorkshopConfig::default())
}

pub fn floor_with(ids: &[&str], config: WorkshopConfig) -> Arc<Floor> {
    let workplaces = ids.iter().map(|id| FakeWorkplace::new(*id));
    Arc::new(Workshop::with_config(workplaces, config).unwrap())
}

/// Fake workplace registered under `id`
pub fn fake<'a>(floor: &'a Floor, id: &str) -> &'a FakeWorkplace {
    floor.workplace(&wid(id)).unwrap()
}

/// Workers that executed at `id`, in start order
pub fn visitors(floor: &Floor, id: &str) -> Vec<WorkerId> {
    fake(floor, id).calls().iter().map(|call| call.worker).collect()
}

/// Assert no workplace ever ran two payloads at once
pub fn assert_exclusive(floor: &Floor) {
    for id in floor.workplace_ids() {
        let workplace = floor.workplace(id).unwrap();
        assert_eq!(workplace.overlaps(), 0, "overlapping executions at {id}");
    }
}

/// Assert the workshop has returned to its idle state
pub fn assert_idle(floor: &Floor) {
    let stats = floor.stats();
    assert_eq!(stats.workers_inside, 0, "{stats:?}");
    assert_eq!(stats.occupied, 0, "{stats:?}");
    assert_eq!(stats.pending_actions, 0, "{stats:?}");
    assert_eq!(stats.parked_enters, 0, "{stats:?}");
    assert_eq!(stats.waiting_moves, 0, "{stats:?}");
}

/// Spin until `cond` holds, failing after `LIVENESS`
pub fn wait_until(what: &str, cond: impl Fn() -> bool) {
    let deadline = std::time::Instant::now() + LIVENESS;
    while !cond() {
        assert!(std::time::Instant::now() < deadline, "never observed: {what}");
        std::thread::sleep(Duration::from_millis(1));
    }
}

/// Route workshop logs to the test output, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Run `scenario` on its own thread, failing if it does not finish in time.
///
/// A deadlocked scenario is left parked and reported as a failure instead
/// of hanging the test binary.
pub fn within_deadline<T: Send + 'static>(scenario: impl FnOnce() -> T + Send + 'static) -> T {
    init_tracing();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let _ = tx.send(scenario());
    });
    match rx.recv_timeout(LIVENESS) {
        Ok(value) => value,
        Err(mpsc::RecvTimeoutError::Timeout) => panic!("scenario did not finish: deadlock?"),
        Err(mpsc::RecvTimeoutError::Disconnected) => panic!("scenario panicked"),
    }
}

/// Walk `route`: enter at its first workplace, switch through the rest,
/// executing at each stop, then leave
pub fn walk(floor: &Floor, route: &[&str]) {
    let Some((first, rest)) = route.split_first() else {
        return;
    };
    floor.enter(&wid(first)).unwrap().execute().unwrap();
    for stop in rest {
        floor.switch_to(&wid(stop)).unwrap().execute().unwrap();
    }
    floor.leave().unwrap();
}
