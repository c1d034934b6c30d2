// Headless library surface: everything the integration tests drive
// without a terminal. Presentation stays with the binary (main.rs, ui.rs).
pub mod runtime;
pub mod score;
pub mod selector;
pub mod session;

/// Countdown tick interval in milliseconds.
pub const TICK_RATE_MS: u64 = 100;
