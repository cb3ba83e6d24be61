use std::sync::{
	Mutex,
	atomic::{AtomicUsize, Ordering},
};

use time::{Duration, OffsetDateTime, macros::datetime};

use moodwatch_config::{Config, Display, Ingest, OutOfRangePolicy, Schedule, Service};
use moodwatch_service::{Clock, Error, Presenter, Result};

pub const EPOCH: OffsetDateTime = datetime!(2026-01-01 09:00 UTC);

/// A clock that only moves when told to.
pub struct ManualClock {
	now: Mutex<OffsetDateTime>,
}
impl ManualClock {
	pub fn new(start: OffsetDateTime) -> Self {
		Self { now: Mutex::new(start) }
	}

	pub fn advance(&self, by: Duration) {
		let mut now = self.now.lock().unwrap_or_else(|err| err.into_inner());

		*now += by;
	}
}
impl Default for ManualClock {
	fn default() -> Self {
		Self::new(EPOCH)
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.now.lock().unwrap_or_else(|err| err.into_inner())
	}
}

/// Keeps every frame it is asked to render. Can be told to fail or panic on its first calls.
#[derive(Default)]
pub struct RecordingPresenter {
	frames: Mutex<Vec<String>>,
	failures_left: AtomicUsize,
	panics_left: AtomicUsize,
}
impl RecordingPresenter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing(times: usize) -> Self {
		Self { failures_left: AtomicUsize::new(times), ..Self::default() }
	}

	pub fn panicking(times: usize) -> Self {
		Self { panics_left: AtomicUsize::new(times), ..Self::default() }
	}

	pub fn frames(&self) -> Vec<String> {
		self.frames.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn last_frame(&self) -> Option<String> {
		self.frames.lock().unwrap_or_else(|err| err.into_inner()).last().cloned()
	}
}
impl Presenter for RecordingPresenter {
	fn render(&self, frame: &str) -> Result<()> {
		if take_one(&self.panics_left) {
			panic!("Recording presenter was told to panic.");
		}
		if take_one(&self.failures_left) {
			return Err(Error::Presenter {
				message: "Recording presenter was told to fail.".to_string(),
			});
		}

		self.frames.lock().unwrap_or_else(|err| err.into_inner()).push(frame.to_string());

		Ok(())
	}
}

/// Default settings with the given schedule, in milliseconds.
pub fn test_config(generation_check_ms: u64, window_ms: u64, display_refresh_ms: u64) -> Config {
	Config {
		service: Service { log_level: "debug".to_string() },
		schedule: Schedule {
			generation_check_interval_ms: generation_check_ms,
			summary_window_ms: window_ms,
			display_refresh_interval_ms: display_refresh_ms,
		},
		ingest: Ingest { out_of_range: OutOfRangePolicy::Clamp },
		display: Display { sink: "log".to_string(), refresh_on_ingest: false, history_limit: 4 },
	}
}

fn take_one(counter: &AtomicUsize) -> bool {
	counter.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1)).is_ok()
}
