/// Fallback round length when the configured value is unusable.
pub const DEFAULT_DURATION_SECS: f64 = 5.0;

/// Preset round lengths offered on the ready screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum GameDuration {
    #[strum(serialize = "5s")]
    Secs5,
    #[strum(serialize = "10s")]
    Secs10,
    #[strum(serialize = "15s")]
    Secs15,
    #[strum(serialize = "30s")]
    Secs30,
    #[strum(serialize = "60s")]
    Secs60,
}

pub const DURATION_CHOICES: [GameDuration; 5] = [
    GameDuration::Secs5,
    GameDuration::Secs10,
    GameDuration::Secs15,
    GameDuration::Secs30,
    GameDuration::Secs60,
];

impl GameDuration {
    pub fn as_secs(self) -> f64 {
        match self {
            GameDuration::Secs5 => 5.0,
            GameDuration::Secs10 => 10.0,
            GameDuration::Secs15 => 15.0,
            GameDuration::Secs30 => 30.0,
            GameDuration::Secs60 => 60.0,
        }
    }
}

/// Operator-facing duration picker: the session reads the current value
/// at start and restart, the ready screen cycles through the presets.
/// A CLI-supplied value that matches no preset is kept as a custom
/// choice until the operator cycles away from it.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationSelector {
    index: usize,
    custom: Option<f64>,
}

impl DurationSelector {
    /// Build from configured seconds, falling back to the default when
    /// the value is non-finite or not positive.
    pub fn from_secs(secs: f64) -> Self {
        let secs = sanitize_secs(secs);
        match DURATION_CHOICES
            .iter()
            .position(|choice| choice.as_secs() == secs)
        {
            Some(index) => Self {
                index,
                custom: None,
            },
            None => Self {
                index: 0,
                custom: Some(secs),
            },
        }
    }

    pub fn current_duration(&self) -> f64 {
        match self.custom {
            Some(secs) => secs,
            None => DURATION_CHOICES[self.index].as_secs(),
        }
    }

    pub fn next(&mut self) {
        if self.custom.take().is_none() {
            self.index = (self.index + 1) % DURATION_CHOICES.len();
        }
    }

    pub fn prev(&mut self) {
        if self.custom.take().is_none() {
            self.index = (self.index + DURATION_CHOICES.len() - 1) % DURATION_CHOICES.len();
        }
    }

    pub fn label(&self) -> String {
        match self.custom {
            Some(secs) => format!("{secs}s"),
            None => DURATION_CHOICES[self.index].to_string(),
        }
    }
}

impl Default for DurationSelector {
    fn default() -> Self {
        Self::from_secs(DEFAULT_DURATION_SECS)
    }
}

fn sanitize_secs(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        DEFAULT_DURATION_SECS
    }
}
