//! Rotation specs
//!
//! Verify that workers waiting on each other in a cycle all move at once
//! instead of deadlocking.

use crate::prelude::*;

/// Seat one worker per workplace, then have every worker switch to the
/// next workplace in `ring` simultaneously
fn rotate_ring(ring: &'static [&'static str]) -> Arc<Floor> {
    let floor = floor(ring);
    let crew = Arc::clone(&floor);

    within_deadline(move || {
        let seated = Barrier::new(ring.len());
        let moved = Barrier::new(ring.len());
        std::thread::scope(|s| {
            for (i, from) in ring.iter().enumerate() {
                let to = ring[(i + 1) % ring.len()];
                let (crew, seated, moved) = (&crew, &seated, &moved);
                s.spawn(move || {
                    crew.enter(&wid(from)).unwrap().execute().unwrap();
                    seated.wait();

                    let handle = crew.switch_to(&wid(to)).unwrap();
                    assert_eq!(handle.id(), &wid(to));
                    assert_eq!(crew.current_workplace(), Some(&wid(to)));
                    handle.execute().unwrap();

                    moved.wait();
                    crew.leave().unwrap();
                });
            }
        });
    });

    floor
}

#[test]
fn two_workers_swap_workplaces() {
    let floor = rotate_ring(&["anvil", "bench"]);

    let stats = floor.stats();
    assert_eq!(stats.rotations, 1);
    assert_eq!(stats.direct_handoffs, 0);
    // The only entry gates released are the two freed by leave
    assert_eq!(stats.gate_releases, 2);
    assert_eq!(fake(&floor, "anvil").runs(), 2);
    assert_eq!(fake(&floor, "bench").runs(), 2);

    // Whoever started at anvil finished at bench and vice versa
    let anvil = visitors(&floor, "anvil");
    let bench = visitors(&floor, "bench");
    assert_eq!(anvil[0], bench[1]);
    assert_eq!(bench[0], anvil[1]);

    assert_exclusive(&floor);
    assert_idle(&floor);
}

#[test]
fn three_way_cycle_rotates_once() {
    let floor = rotate_ring(&["anvil", "bench", "crane"]);

    assert_eq!(floor.stats().rotations, 1);
    assert_eq!(floor.stats().direct_handoffs, 0);
    assert_eq!(floor.stats().gate_releases, 3);
    assert_eq!(visitors(&floor, "anvil")[0], visitors(&floor, "bench")[1]);
    assert_eq!(visitors(&floor, "bench")[0], visitors(&floor, "crane")[1]);
    assert_eq!(visitors(&floor, "crane")[0], visitors(&floor, "anvil")[1]);
    assert_exclusive(&floor);
    assert_idle(&floor);
}

#[test]
fn long_cycle_rotates_once() {
    let floor = rotate_ring(&["a", "b", "c", "d", "e", "f"]);

    assert_eq!(floor.stats().rotations, 1);
    assert_eq!(floor.stats().gate_releases, 6);
    for id in ["a", "b", "c", "d", "e", "f"] {
        assert_eq!(fake(&floor, id).runs(), 2, "workplace {id}");
    }
    assert_exclusive(&floor);
    assert_idle(&floor);
}

#[test]
fn cycle_members_leave_the_rest_of_the_floor_alone() {
    let floor = floor(&["anvil", "bench", "crane"]);
    let (seated_tx, seated_rx) = mpsc::channel();
    let (leave_tx, leave_rx) = mpsc::channel::<()>();

    // A bystander holds crane throughout the swap
    let bystander = {
        let floor = Arc::clone(&floor);
        std::thread::spawn(move || {
            floor.enter(&wid("crane")).unwrap().execute().unwrap();
            seated_tx.send(()).unwrap();
            leave_rx.recv().unwrap();
            floor.leave().unwrap();
        })
    };
    seated_rx.recv_timeout(LIVENESS).unwrap();

    let crew = Arc::clone(&floor);
    within_deadline(move || {
        let seated = Barrier::new(2);
        std::thread::scope(|s| {
            for (from, to) in [("anvil", "bench"), ("bench", "anvil")] {
                let (crew, seated) = (&crew, &seated);
                s.spawn(move || {
                    crew.enter(&wid(from)).unwrap().execute().unwrap();
                    seated.wait();
                    crew.switch_to(&wid(to)).unwrap().execute().unwrap();
                    crew.leave().unwrap();
                });
            }
        });
    });

    assert_eq!(floor.stats().rotations, 1);
    assert_eq!(floor.stats().workers_inside, 1);
    assert_eq!(fake(&floor, "crane").runs(), 1);

    leave_tx.send(()).unwrap();
    bystander.join().unwrap();
    assert_exclusive(&floor);
    assert_idle(&floor);
}
