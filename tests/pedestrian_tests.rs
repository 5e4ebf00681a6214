//! Pedestrian appearance scheduling and deadline tests

use rand::rngs::StdRng;
use rand::SeedableRng;

use crosswalk_trainer::simulation::{
    PedestrianScheduler, Position, APPEARANCE_DEADLINE_SECS, FIRST_SPAWN_SECS,
    PEDESTRIAN_LOCATION, SPAWN_INTERVAL_SECS,
};

fn scheduler() -> PedestrianScheduler {
    PedestrianScheduler::new(StdRng::seed_from_u64(42))
}

fn far_away() -> Position {
    Position::planar(0.0, 6.0)
}

fn next_to_her() -> Position {
    Position::planar(PEDESTRIAN_LOCATION.x + 1.0, PEDESTRIAN_LOCATION.z)
}

#[test]
fn test_first_appearance_is_early() {
    let mut pedestrian = scheduler();
    assert_eq!(pedestrian.next_spawn_at, FIRST_SPAWN_SECS);

    let update = pedestrian.update(FIRST_SPAWN_SECS - 0.1, &far_away());
    assert!(!update.spawned);
    assert!(!pedestrian.exists);

    let update = pedestrian.update(FIRST_SPAWN_SECS, &far_away());
    assert!(update.spawned);
    assert!(pedestrian.exists);
    assert_eq!(pedestrian.appearances, 1);
}

#[test]
fn test_next_spawn_advances_from_previous_schedule() {
    let mut pedestrian = scheduler();
    pedestrian.update(FIRST_SPAWN_SECS, &far_away());

    let gap = pedestrian.next_spawn_at - FIRST_SPAWN_SECS;
    assert!(gap >= SPAWN_INTERVAL_SECS.0 && gap < SPAWN_INTERVAL_SECS.1);
}

#[test]
fn test_late_spawn_keeps_schedule_drift() {
    let mut pedestrian = scheduler();

    // First spawn processed long after it was due
    pedestrian.update(30.0, &far_away());
    assert_eq!(pedestrian.appearances, 1);
    let scheduled = pedestrian.next_spawn_at;
    assert!(scheduled < 30.0, "next spawn is relative to the old schedule");

    // Once cleared she reappears immediately because the next slot is overdue
    let update = pedestrian.update(30.1, &next_to_her());
    assert!(update.cleared);
    let update = pedestrian.update(30.2, &far_away());
    assert!(update.spawned);
    assert_eq!(pedestrian.appearances, 2);
    assert!(pedestrian.next_spawn_at > scheduled);
}

#[test]
fn test_no_spawn_while_present() {
    let mut pedestrian = scheduler();
    pedestrian.update(FIRST_SPAWN_SECS, &far_away());

    for t in 4..100 {
        let update = pedestrian.update(t as f64, &far_away());
        assert!(!update.spawned);
    }
    assert_eq!(pedestrian.appearances, 1);
}

#[test]
fn test_avatar_close_clears_her() {
    let mut pedestrian = scheduler();
    pedestrian.update(FIRST_SPAWN_SECS, &far_away());

    // 2.6 away is outside the radius
    let outside = Position::planar(PEDESTRIAN_LOCATION.x + 2.6, PEDESTRIAN_LOCATION.z);
    assert!(!pedestrian.update(3.5, &outside).cleared);
    assert!(pedestrian.exists);

    let update = pedestrian.update(4.0, &next_to_her());
    assert!(update.cleared);
    assert!(!pedestrian.exists);
    // Clearing never lowers the counter
    assert_eq!(pedestrian.appearances, 1);
}

#[test]
fn test_spawn_and_clear_in_same_update() {
    let mut pedestrian = scheduler();
    let update = pedestrian.update(FIRST_SPAWN_SECS, &next_to_her());
    assert!(update.spawned);
    assert!(update.cleared);
    assert_eq!(pedestrian.appearances, 1);
    assert!(!pedestrian.exists);
}

#[test]
fn test_force_spawn_counts_once() {
    let mut pedestrian = scheduler();

    assert!(pedestrian.force_spawn());
    assert_eq!(pedestrian.appearances, 1);
    assert!(!pedestrian.force_spawn());
    assert_eq!(pedestrian.appearances, 1);

    // Schedule is untouched by a forced appearance
    assert_eq!(pedestrian.next_spawn_at, FIRST_SPAWN_SECS);
}

#[test]
fn test_deadline_rule() {
    let mut pedestrian = scheduler();
    pedestrian.appearances = 2;

    assert!(!pedestrian.deadline_missed(APPEARANCE_DEADLINE_SECS - 0.01));
    assert!(pedestrian.deadline_missed(APPEARANCE_DEADLINE_SECS));

    pedestrian.appearances = 3;
    assert!(!pedestrian.deadline_missed(APPEARANCE_DEADLINE_SECS + 100.0));
}

#[test]
fn test_time_remaining_floors_at_zero() {
    assert_eq!(PedestrianScheduler::time_remaining(0.0), APPEARANCE_DEADLINE_SECS);
    assert_eq!(PedestrianScheduler::time_remaining(45.0), 15.0);
    assert_eq!(PedestrianScheduler::time_remaining(75.0), 0.0);
}

#[test]
fn test_schedule_is_reproducible_for_a_seed() {
    let mut first = scheduler();
    let mut second = scheduler();
    first.update(FIRST_SPAWN_SECS, &far_away());
    second.update(FIRST_SPAWN_SECS, &far_away());
    assert_eq!(first.next_spawn_at, second.next_spawn_at);
}
