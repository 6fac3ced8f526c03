//! Callback contracts between the core and whoever drives it

/// Severity of a message sent through the logging callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
	Info,
	Success,
	Warn,
	Error,
}

/// Observational logging sink. Return values are never consumed.
pub type LogFn<'a> = &'a dyn Fn(&str, Level);

/// Progress sink, receives a percentage in `0.0..=100.0`.
pub type ProgressFn<'a> = &'a dyn Fn(f32);

/// A logging callback that drops everything.
pub fn silent(_msg: &str, _level: Level) {}
