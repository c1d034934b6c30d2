use std::sync::mpsc;
use std::time::Duration;

use clickdash::runtime::{GameEvent, IntervalClock, ManualClock};
use clickdash::score::{MemoryScoreStore, ScoreStore};
use clickdash::session::Session;

// Headless integration using the runtime + Session without a TTY.
// Verifies a full round driven by a real interval clock over the event
// channel, and that leaving a round stops the ticking.

#[test]
fn headless_round_completes_by_clock() {
    let store = MemoryScoreStore::new();
    let mut session = Session::new(Box::new(store.clone()), 0.5);

    let (tx, rx) = mpsc::channel();
    let tick_tx = tx.clone();
    session.start(0.5, move || {
        Box::new(IntervalClock::spawn(tick_tx, Duration::from_millis(5)))
    });

    // stand in for the input producer: a click alongside the first ticks
    let mut clicks = 0u32;
    for _ in 0..200u32 {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(GameEvent::Tick) => {
                if clicks < 3 {
                    session.register_click();
                    clicks += 1;
                }
                session.tick();
            }
            Ok(_) => {}
            Err(_) => break,
        }
        if session.has_finished() {
            break;
        }
    }

    assert!(session.has_finished(), "round should finish by the clock");
    assert_eq!(session.view().remaining, "0.0");

    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.final_score, 3);
    assert!(outcome.is_new_high_score);
    assert_eq!(store.read(), 3);
}

#[test]
fn restart_mid_round_stops_the_ticking() {
    let mut session = Session::new(Box::new(MemoryScoreStore::new()), 5.0);

    let (tx, rx) = mpsc::channel();
    let tick_tx = tx.clone();
    session.start(5.0, move || {
        Box::new(IntervalClock::spawn(tick_tx, Duration::from_millis(5)))
    });

    // a few ticks arrive, then the operator bails out
    for _ in 0..3 {
        rx.recv_timeout(Duration::from_secs(1)).unwrap();
    }
    session.restart(5.0);

    // let an in-flight tick land, then the channel must stay quiet
    std::thread::sleep(Duration::from_millis(25));
    while rx.try_recv().is_ok() {}
    std::thread::sleep(Duration::from_millis(25));
    assert!(rx.try_recv().is_err());

    assert!(!session.has_finished());
    assert_eq!(session.seconds_remaining(), 5.0);
    assert_eq!(session.click_count(), 0);
}

#[test]
fn back_to_back_rounds_share_one_best() {
    let store = MemoryScoreStore::new();
    let mut session = Session::new(Box::new(store.clone()), 5.0);

    // round one: 8 clicks
    session.start(5.0, || Box::new(ManualClock::new()));
    for _ in 0..8 {
        session.register_click();
    }
    for _ in 0..50 {
        session.tick();
    }
    assert!(session.outcome().unwrap().is_new_high_score);
    assert_eq!(store.read(), 8);

    // round two: slower, the best survives
    session.restart(5.0);
    session.start(5.0, || Box::new(ManualClock::new()));
    for _ in 0..3 {
        session.register_click();
    }
    for _ in 0..50 {
        session.tick();
    }
    assert!(!session.outcome().unwrap().is_new_high_score);
    assert_eq!(store.read(), 8);
    assert_eq!(session.high_score(), 8);

    // round three: beats it again
    session.restart(5.0);
    session.start(5.0, || Box::new(ManualClock::new()));
    for _ in 0..9 {
        session.register_click();
    }
    for _ in 0..50 {
        session.tick();
    }
    assert!(session.outcome().unwrap().is_new_high_score);
    assert_eq!(store.read(), 9);
}
