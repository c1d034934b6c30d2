use assert_matches::assert_matches;
use clickdash::runtime::ManualClock;
use clickdash::score::MemoryScoreStore;
use clickdash::session::{Session, Status};

// State-machine scenarios driven deterministically with a manual clock:
// every tick here is an explicit call, so the walkthroughs are exact.

fn start(session: &mut Session, secs: f64) {
    session.start(secs, || Box::new(ManualClock::new()));
}

#[test]
fn clicks_outside_a_round_never_count() {
    let store = MemoryScoreStore::new();
    let mut session = Session::new(Box::new(store.clone()), 5.0);

    for _ in 0..10 {
        session.register_click();
    }
    assert_eq!(session.click_count(), 0);

    start(&mut session, 5.0);
    for _ in 0..4 {
        session.register_click();
    }
    session.end();

    for _ in 0..10 {
        session.register_click();
    }
    assert_eq!(session.click_count(), 4);
    assert_eq!(session.outcome().unwrap().final_score, 4);
}

#[test]
fn final_score_counts_exactly_the_running_clicks() {
    let mut session = Session::new(Box::new(MemoryScoreStore::new()), 2.0);
    session.register_click(); // idle, dropped

    start(&mut session, 2.0);
    let mut made = 0u32;
    for tick in 0..20 {
        if tick % 3 == 0 {
            session.register_click();
            made += 1;
        }
        session.tick();
    }
    session.register_click(); // ended, dropped

    assert_eq!(session.outcome().unwrap().final_score, made);
}

#[test]
fn remaining_never_leaves_bounds() {
    let mut session = Session::new(Box::new(MemoryScoreStore::new()), 1.5);
    start(&mut session, 1.5);

    for tick in 0..40 {
        let remaining = session.seconds_remaining();
        assert!(remaining >= 0.0, "negative countdown at tick {tick}");
        assert!(remaining <= 1.5, "countdown above duration at tick {tick}");
        if tick % 2 == 0 {
            session.register_click();
        }
        session.tick();
    }
    assert_eq!(session.seconds_remaining(), 0.0);
    assert!(session.has_finished());
}

#[test]
fn expiry_is_the_only_path_to_a_zero_countdown() {
    let mut session = Session::new(Box::new(MemoryScoreStore::new()), 5.0);
    start(&mut session, 5.0);
    for _ in 0..7 {
        session.tick();
    }

    // explicit early end leaves the countdown where it stopped
    session.end();
    assert!(session.has_finished());
    assert_eq!(session.view().remaining, "4.3");
}

#[test]
fn restart_lands_idle_from_every_state() {
    let mut session = Session::new(Box::new(MemoryScoreStore::new()), 5.0);

    session.restart(5.0);
    assert_matches!(session.status(), Status::Idle);

    start(&mut session, 5.0);
    session.tick();
    session.restart(5.0);
    assert_matches!(session.status(), Status::Idle);

    start(&mut session, 5.0);
    session.end();
    session.restart(5.0);
    assert_matches!(session.status(), Status::Idle);
}

#[test]
fn countdown_display_always_has_one_fractional_digit() {
    let mut session = Session::new(Box::new(MemoryScoreStore::new()), 2.0);
    start(&mut session, 2.0);

    for _ in 0..25 {
        let remaining = session.view().remaining;
        let (_, frac) = remaining.split_once('.').expect("no fractional digit");
        assert_eq!(frac.len(), 1, "bad countdown format: {remaining}");
        session.tick();
    }
}

#[test]
fn new_duration_applies_on_restart() {
    let mut session = Session::new(Box::new(MemoryScoreStore::new()), 5.0);

    session.restart(0.3);
    assert_eq!(session.seconds_remaining(), 0.3);

    start(&mut session, 0.3);
    session.tick();
    session.tick();
    session.tick();
    assert!(session.has_finished());
}

#[test]
fn a_round_ends_exactly_once() {
    let store = MemoryScoreStore::new();
    let mut session = Session::new(Box::new(store.clone()), 0.2);
    start(&mut session, 0.2);
    session.register_click();

    session.tick();
    session.tick(); // expiry ends the round here
    assert!(session.has_finished());
    assert_eq!(store.writes(), 1);

    assert_eq!(session.end(), None);
    session.tick();
    assert_eq!(store.writes(), 1);
    assert_eq!(session.outcome().unwrap().final_score, 1);
}
