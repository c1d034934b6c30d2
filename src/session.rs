use crate::runtime::Clock;
use crate::score::ScoreStore;
use crate::TICK_RATE_MS;
use itertools::Itertools;
use std::collections::HashMap;

/// Lifecycle of a single countdown round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Ended,
}

/// Result of a finished round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundOutcome {
    pub final_score: u32,
    pub is_new_high_score: bool,
    pub clicks_per_sec: f64,
    pub consistency: f64,
}

/// What the presentation layer needs for one frame. Pure data, no
/// feedback into the session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub remaining: String,
    pub clicks: u32,
    pub high_score: u32,
    pub status_line: String,
}

/// represents one click round being played
///
/// The countdown is driven externally: whoever owns the session feeds it
/// `tick()` calls, one per `TICK_RATE_MS`. Internally time is tracked in
/// whole milliseconds so a 5.0s round expires after exactly 50 ticks.
pub struct Session {
    status: Status,
    duration_ms: u64,
    remaining_ms: u64,
    click_count: u32,
    click_times: Vec<f64>,
    cps_coords: Vec<(f64, f64)>,
    outcome: Option<RoundOutcome>,
    high_score: u32,
    score_store: Box<dyn ScoreStore>,
    clock: Option<Box<dyn Clock>>,
}

impl Session {
    pub fn new(score_store: Box<dyn ScoreStore>, duration_secs: f64) -> Self {
        let high_score = score_store.read();
        let duration_ms = secs_to_ms(duration_secs);
        Self {
            status: Status::Idle,
            duration_ms,
            remaining_ms: duration_ms,
            click_count: 0,
            click_times: vec![],
            cps_coords: vec![],
            outcome: None,
            high_score,
            score_store,
            clock: None,
        }
    }

    /// Begin the countdown. Only reachable from `Idle`; a duplicate call
    /// while `Running` is ignored and from `Ended` a `restart()` is
    /// required first. The clock factory runs only when the transition
    /// actually happens, so an ignored call cannot leak a ticker.
    pub fn start<F>(&mut self, duration_secs: f64, spawn_clock: F)
    where
        F: FnOnce() -> Box<dyn Clock>,
    {
        if self.status != Status::Idle {
            return;
        }
        self.duration_ms = secs_to_ms(duration_secs);
        self.remaining_ms = self.duration_ms;
        self.click_count = 0;
        self.click_times.clear();
        self.cps_coords.clear();
        self.outcome = None;
        self.high_score = self.score_store.read();
        self.clock = Some(spawn_clock());
        self.status = Status::Running;
    }

    /// Advance the countdown by one tick interval. Clamps at zero and
    /// finishes the round there; ticks outside `Running` are no-ops.
    pub fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(TICK_RATE_MS);
        if self.remaining_ms == 0 {
            self.end();
        }
    }

    /// Count one click. Outside `Running` this neither counts nor errors.
    pub fn register_click(&mut self) {
        if self.status != Status::Running {
            return;
        }
        self.click_count += 1;
        self.click_times.push(self.elapsed_secs());
    }

    /// Finish the round: cancel the clock, settle the score against the
    /// store and keep the outcome around for the results screen. Returns
    /// `Some` exactly once per round; calling again is a no-op.
    pub fn end(&mut self) -> Option<RoundOutcome> {
        if self.status != Status::Running {
            return None;
        }
        if let Some(clock) = self.clock.take() {
            clock.cancel();
        }
        self.status = Status::Ended;

        let (clicks_per_sec, consistency) = self.calc_results();
        let stored = self.score_store.read();
        let is_new_high_score = self.click_count > stored;
        if is_new_high_score {
            let _ = self.score_store.write(self.click_count);
            self.high_score = self.click_count;
        } else {
            self.high_score = stored;
        }

        let outcome = RoundOutcome {
            final_score: self.click_count,
            is_new_high_score,
            clicks_per_sec,
            consistency,
        };
        self.outcome = Some(outcome);
        Some(outcome)
    }

    /// Back to `Idle` with a freshly supplied duration. Cancels a live
    /// clock, resets every counter and never touches the stored best.
    pub fn restart(&mut self, duration_secs: f64) {
        if let Some(clock) = self.clock.take() {
            clock.cancel();
        }
        self.status = Status::Idle;
        self.duration_ms = secs_to_ms(duration_secs);
        self.remaining_ms = self.duration_ms;
        self.click_count = 0;
        self.click_times.clear();
        self.cps_coords.clear();
        self.outcome = None;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Ended
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    pub fn seconds_remaining(&self) -> f64 {
        self.remaining_ms as f64 / 1000.0
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Clicks-per-second series over the finished round, for charting.
    pub fn cps_coords(&self) -> &[(f64, f64)] {
        &self.cps_coords
    }

    /// Snapshot for the display sink. The countdown is always formatted
    /// with one fractional digit, whatever the tick granularity.
    pub fn view(&self) -> SessionView {
        let status_line = match self.status {
            Status::Idle => String::from("press space to start"),
            Status::Running => String::from("click!"),
            Status::Ended => match self.outcome {
                Some(o) if o.is_new_high_score => String::from("new personal best!"),
                _ => String::from("time's up"),
            },
        };
        SessionView {
            remaining: format!("{:.1}", self.seconds_remaining()),
            clicks: self.click_count,
            high_score: self.high_score,
            status_line,
        }
    }

    fn elapsed_secs(&self) -> f64 {
        (self.duration_ms - self.remaining_ms) as f64 / 1000.0
    }

    /// Bucket clicks into whole seconds and derive the average rate, the
    /// cumulative clicks/sec series and the spread across seconds.
    fn calc_results(&mut self) -> (f64, f64) {
        let elapsed = self.elapsed_secs();
        let clicks_per_sec = if elapsed > 0.0 {
            self.click_count as f64 / elapsed
        } else {
            0.0
        };

        let per_sec: Vec<(f64, f64)> = self
            .click_times
            .iter()
            .fold(HashMap::new(), |mut map: HashMap<u64, u32>, &t| {
                // a click before the first tick lands in the first second
                let bucket = (t.ceil() as u64).max(1);
                *map.entry(bucket).or_insert(0) += 1;
                map
            })
            .into_iter()
            .map(|(k, v)| (k as f64, v as f64))
            .sorted_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .collect();

        let mut clicks_so_far = 0.0;
        for &(t, n) in &per_sec {
            clicks_so_far += n;
            self.cps_coords.push((t, clicks_so_far / t));
        }

        let counts: Vec<f64> = per_sec.iter().map(|&(_, n)| n).collect();
        (clicks_per_sec, std_dev(&counts))
    }
}

fn secs_to_ms(secs: f64) -> u64 {
    (secs * 1000.0).round() as u64
}

fn std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mean = data.iter().sum::<f64>() / data.len() as f64;
    let variance = data
        .iter()
        .map(|v| (mean - v) * (mean - v))
        .sum::<f64>()
        / data.len() as f64;
    variance.sqrt()
}
