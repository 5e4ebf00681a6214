//! Session orchestration tests
//!
//! These drive `GameSession::tick` the way a frontend would and check the
//! terminal rules, cheat mode and reset behaviour.

use crosswalk_trainer::simulation::{
    GameSession, InputFrame, MovementIntent, Position, SessionConfig, SessionEvent, SignalState,
    TerminalReason, VehicleId, AVATAR_START, BUTTON_POLE, VEHICLE_HEIGHT,
};

/// Exactly representable step so elapsed times compare cleanly
const DT: f64 = 0.5;

fn empty_road() -> GameSession {
    GameSession::new(SessionConfig {
        vehicle_count: 0,
        ..SessionConfig::default()
    })
}

fn forward() -> InputFrame {
    InputFrame::moving(MovementIntent {
        forward: true,
        ..Default::default()
    })
}

fn with(edit: impl FnOnce(&mut InputFrame)) -> InputFrame {
    let mut frame = InputFrame::idle();
    edit(&mut frame);
    frame
}

/// Park one vehicle on top of the avatar
fn vehicle_on_avatar(session: &mut GameSession) {
    let vehicle = &mut session.fleet.vehicles[0];
    vehicle.position = Position::new(
        session.avatar.position.x,
        VEHICLE_HEIGHT,
        session.avatar.position.z,
    );
    vehicle.speed = 0.0;
}

#[test]
fn test_new_session_initial_state() {
    let session = GameSession::default();
    let snapshot = session.snapshot();

    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.avatar_position, AVATAR_START);
    assert!(snapshot.avatar_alive);
    assert!(!snapshot.cheat);
    assert_eq!(snapshot.vehicles.len(), 5);
    assert_eq!(snapshot.signal, SignalState::GreenForCars);
    assert!(!snapshot.pedestrian_exists);
    assert_eq!(snapshot.appearances, 0);
    assert_eq!(snapshot.waypoint_index, 0);
    assert!(!snapshot.terminal);
    assert_eq!(snapshot.reason, TerminalReason::None);
    assert_eq!(snapshot.time_remaining, 60.0);
}

#[test]
fn test_walking_forward_reaches_first_waypoint() {
    let mut session = empty_road();
    let mut reached = Vec::new();

    for _ in 0..34 {
        let report = session.tick(&forward(), 1.0 / 60.0);
        for event in report.events {
            if let SessionEvent::WaypointReached(index) = event {
                reached.push(index);
            }
        }
    }

    assert_eq!(session.waypoints.current_index(), 1);
    assert_eq!(reached, vec![1]);
    assert!(!session.is_terminal());
}

#[test]
fn test_crossing_request_depends_on_distance() {
    let mut session = empty_road();

    let report = session.tick(&with(|f| f.request_crossing = true), DT);
    assert!(!report.contains(&SessionEvent::CrossingRequested));
    assert_eq!(session.signal.state, SignalState::GreenForCars);

    session.avatar.position = Position::planar(BUTTON_POLE.x, BUTTON_POLE.z);
    let report = session.tick(&with(|f| f.request_crossing = true), DT);
    assert!(report.contains(&SessionEvent::CrossingRequested));
    assert_eq!(session.signal.state, SignalState::ChangingToRed);
}

#[test]
fn test_signal_cycles_through_session_ticks() {
    let mut session = empty_road();
    session.avatar.position = Position::planar(BUTTON_POLE.x, BUTTON_POLE.z);

    // Request lands at t=0.0, before the clock advances
    session.tick(&with(|f| f.request_crossing = true), 0.25);
    let mut changes = Vec::new();
    for _ in 0..40 {
        let report = session.tick(&InputFrame::idle(), 0.25);
        for event in report.events {
            if let SessionEvent::SignalChanged(state) = event {
                changes.push((session.clock.ticks(), state));
            }
        }
    }

    // Red at t=1.25 (tick 5), green again 6s later at t=7.25 (tick 29)
    assert_eq!(
        changes,
        vec![(5, SignalState::RedForCars), (29, SignalState::GreenForCars)]
    );
}

#[test]
fn test_idle_session_fails_appearance_rule() {
    let mut session = empty_road();

    let mut ended_at = None;
    for _ in 0..200 {
        let report = session.tick(&InputFrame::idle(), DT);
        if report.contains(&SessionEvent::Ended(TerminalReason::InsufficientAppearances)) {
            ended_at = Some(session.clock.ticks());
        }
    }

    // She appears once at 3s and is never cleared, so no further spawns
    assert_eq!(session.pedestrian.appearances, 1);
    assert_eq!(ended_at, Some(120));
    assert!(session.is_terminal());
    assert_eq!(session.reason(), TerminalReason::InsufficientAppearances);
    assert!(!session.avatar.alive);
    assert_eq!(session.elapsed(), 60.0);
}

#[test]
fn test_two_appearances_at_deadline_ends_session() {
    let mut session = empty_road();
    session.pedestrian.appearances = 2;
    session.pedestrian.next_spawn_at = 1000.0;
    session.avatar.position = Position::planar(5.0, -20.0);

    for _ in 0..119 {
        session.tick(&InputFrame::idle(), DT);
    }
    assert!(!session.is_terminal());

    session.tick(&InputFrame::idle(), DT);
    assert!(session.is_terminal());
    assert_eq!(session.reason(), TerminalReason::InsufficientAppearances);
}

#[test]
fn test_enough_appearances_survive_deadline() {
    let mut session = empty_road();
    session.pedestrian.next_spawn_at = 1000.0;

    for _ in 0..3 {
        session.tick(&with(|f| f.force_spawn = true), DT);
        // Walk up to her so she leaves again
        session.avatar.position = session.pedestrian.location;
        session.tick(&InputFrame::idle(), DT);
        session.avatar.position = AVATAR_START;
    }
    assert_eq!(session.pedestrian.appearances, 3);

    for _ in 0..200 {
        session.tick(&InputFrame::idle(), DT);
    }
    assert!(!session.is_terminal());
}

#[test]
fn test_force_spawn_counts_one_appearance() {
    let mut session = empty_road();

    let report = session.tick(&with(|f| f.force_spawn = true), DT);
    assert!(report.contains(&SessionEvent::PedestrianSpawned {
        appearances: 1,
        forced: true
    }));

    let report = session.tick(&with(|f| f.force_spawn = true), DT);
    assert!(report.events.is_empty());
    assert_eq!(session.pedestrian.appearances, 1);
}

#[test]
fn test_collision_ends_session() {
    let mut session = GameSession::default();
    vehicle_on_avatar(&mut session);

    let report = session.tick(&InputFrame::idle(), DT);
    assert!(report.contains(&SessionEvent::Collision {
        vehicle: VehicleId(0),
        suppressed: false
    }));
    assert!(report.contains(&SessionEvent::Ended(TerminalReason::VehicleCollision)));
    assert!(session.is_terminal());
    assert!(!session.avatar.alive);
}

#[test]
fn test_cheat_mode_suppresses_collision() {
    let mut session = GameSession::default();
    vehicle_on_avatar(&mut session);

    let report = session.tick(&with(|f| f.toggle_cheat = true), DT);
    assert!(report.contains(&SessionEvent::CheatToggled(true)));
    assert!(report.contains(&SessionEvent::Collision {
        vehicle: VehicleId(0),
        suppressed: true
    }));
    assert!(!session.is_terminal());
    assert!(session.avatar.alive);
    assert!(session.snapshot().cheat);
}

#[test]
fn test_cheat_mode_suppresses_deadline() {
    let mut session = GameSession::new(SessionConfig {
        vehicle_count: 0,
        cheat: true,
        ..SessionConfig::default()
    });

    for _ in 0..300 {
        session.tick(&InputFrame::idle(), DT);
    }
    assert!(!session.is_terminal());
    assert!(session.pedestrian.appearances < 3);
    assert_eq!(session.snapshot().time_remaining, 0.0);
}

#[test]
fn test_cheat_mode_does_not_spare_violating_vehicles() {
    let mut session = GameSession::default();
    session.tick(&with(|f| f.toggle_cheat = true), DT);

    session.signal.state = SignalState::RedForCars;
    session.signal.last_transition_at = Some(session.elapsed());
    let vehicle = &mut session.fleet.vehicles[0];
    vehicle.position = Position::new(0.0, VEHICLE_HEIGHT, -5.0);
    vehicle.direction = 1.0;

    let report = session.tick(&InputFrame::idle(), DT);
    assert!(report.contains(&SessionEvent::VehicleDestroyed(VehicleId(0))));
    assert!(!session.fleet.vehicles[0].alive);
}

#[test]
fn test_terminal_session_is_frozen() {
    let mut session = GameSession::default();
    vehicle_on_avatar(&mut session);
    session.tick(&InputFrame::idle(), DT);
    assert!(session.is_terminal());

    let before = session.snapshot();
    let busy = InputFrame {
        movement: MovementIntent {
            forward: true,
            left: true,
            ..Default::default()
        },
        toggle_cheat: true,
        request_crossing: true,
        force_spawn: true,
        ..Default::default()
    };
    for _ in 0..50 {
        let report = session.tick(&busy, DT);
        assert!(report.events.is_empty());
    }
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_reset_only_honored_when_terminal() {
    let mut session = empty_road();
    for _ in 0..10 {
        session.tick(&forward(), DT);
    }

    let report = session.tick(&with(|f| f.reset = true), DT);
    assert!(!report.reset);
    assert_eq!(session.clock.ticks(), 11);
}

#[test]
fn test_reset_restores_reproducible_session() {
    let fresh = GameSession::default();

    let mut session = GameSession::default();
    for _ in 0..30 {
        session.tick(&forward(), DT);
    }
    vehicle_on_avatar(&mut session);
    session.tick(&InputFrame::idle(), DT);
    assert!(session.is_terminal());

    let report = session.tick(&with(|f| f.reset = true), DT);
    assert!(report.reset);
    assert!(report.contains(&SessionEvent::Reset));
    assert_eq!(session.snapshot(), fresh.snapshot());
    assert_eq!(session.fleet.vehicles, fresh.fleet.vehicles);
    assert_eq!(session.pedestrian.next_spawn_at, fresh.pedestrian.next_spawn_at);
}

#[test]
fn test_completion_on_final_waypoint_when_enabled() {
    let mut session = GameSession::new(SessionConfig {
        vehicle_count: 0,
        complete_on_final_waypoint: true,
        ..SessionConfig::default()
    });

    let route: Vec<Position> = session.waypoints.targets().to_vec();
    for target in &route {
        session.avatar.position = *target;
        session.tick(&InputFrame::idle(), DT);
    }

    assert!(session.is_terminal());
    assert_eq!(session.reason(), TerminalReason::Completed);
    assert!(session.avatar.alive);
    assert!(!session.reason().is_failure());
}

#[test]
fn test_final_waypoint_is_not_terminal_by_default() {
    let mut session = empty_road();

    let route: Vec<Position> = session.waypoints.targets().to_vec();
    for target in &route {
        session.avatar.position = *target;
        session.tick(&InputFrame::idle(), DT);
    }

    assert_eq!(session.waypoints.current_index(), 3);
    assert!(!session.is_terminal());
}

#[test]
fn test_quit_is_reported_not_acted_on() {
    let mut session = empty_road();
    let report = session.tick(&with(|f| f.quit = true), DT);
    assert!(report.quit_requested);
    assert!(!session.is_terminal());
}

#[test]
fn test_scripted_run_is_deterministic() {
    let script: Vec<InputFrame> = (0..2000)
        .map(|i| {
            let mut frame = InputFrame::moving(MovementIntent {
                forward: i % 3 != 0,
                left: i % 7 == 0,
                right: i % 11 == 0,
                back: i % 13 == 0,
            });
            frame.request_crossing = i % 50 == 0;
            frame.force_spawn = i % 400 == 0;
            frame
        })
        .collect();

    let run = || {
        let mut session = GameSession::default();
        for frame in &script {
            session.tick(frame, 1.0 / 60.0);
            if session.is_terminal() {
                break;
            }
        }
        (session.clock.ticks(), session.reason(), session.snapshot())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_signal_and_deadline_land_on_exact_ticks_at_50hz() {
    let step = 1.0 / f64::from(50u32);

    let mut session = empty_road();
    session.avatar.position = Position::planar(BUTTON_POLE.x, BUTTON_POLE.z);
    session.tick(&with(|f| f.request_crossing = true), step);

    let mut red_at = None;
    for _ in 0..100 {
        let report = session.tick(&InputFrame::idle(), step);
        if report.contains(&SessionEvent::SignalChanged(SignalState::RedForCars)) {
            red_at = Some(session.clock.ticks());
        }
    }
    // Requested at t=0.0; 1.2s is tick 60
    assert_eq!(red_at, Some(60));

    let mut session = empty_road();
    session.pedestrian.next_spawn_at = 1000.0;
    session.avatar.position = Position::planar(5.0, -20.0);

    let mut ended_at = None;
    for _ in 0..3005 {
        let report = session.tick(&InputFrame::idle(), step);
        if report.contains(&SessionEvent::Ended(TerminalReason::InsufficientAppearances)) {
            ended_at = Some(session.clock.ticks());
        }
    }
    assert_eq!(ended_at, Some(3000));
    assert_eq!(session.elapsed(), 60.0);
}
