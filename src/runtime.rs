use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the game loop. Clock ticks and input
/// share one channel, so the session only ever observes them in arrival
/// order.
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Cancellable countdown clock attached to a running session. The
/// session cancels it on every path out of `Running`; a clock still
/// ticking after its round has ended is a bug.
pub trait Clock {
    fn cancel(&self);
    fn is_cancelled(&self) -> bool;
}

/// Production clock: a background thread emitting `Tick` at a fixed
/// interval until cancelled.
pub struct IntervalClock {
    stop: Arc<AtomicBool>,
}

impl IntervalClock {
    pub fn spawn(tx: Sender<GameEvent>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        thread::spawn(move || loop {
            thread::sleep(interval);
            if thread_stop.load(Ordering::SeqCst) {
                break;
            }
            if tx.send(GameEvent::Tick).is_err() {
                break;
            }
        });

        Self { stop }
    }
}

impl Clock for IntervalClock {
    fn cancel(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

impl Drop for IntervalClock {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Test clock: no thread, no ticks of its own. Tests advance the session
/// by calling `tick()` directly and observe cancellation via the shared
/// flag.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    cancelled: Arc<AtomicBool>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the cancel flag, kept by the test after the clock
    /// itself has moved into a session.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}

impl Clock for ManualClock {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Forward terminal input into the game channel. Only key presses are
/// forwarded: the dispatch layer owns the no-double-fire guarantee, and
/// repeat/release events would count twice on some platforms.
pub fn spawn_input_pump(tx: Sender<GameEvent>) {
    thread::spawn(move || loop {
        match event::read() {
            Ok(CtEvent::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if tx.send(GameEvent::Key(key)).is_err() {
                    break;
                }
            }
            Ok(CtEvent::Resize(_, _)) => {
                if tx.send(GameEvent::Resize).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
}
