use std::{
	mem,
	sync::{Mutex, MutexGuard},
};

use time::{Duration, OffsetDateTime};

use moodwatch_domain::MessageEntry;

struct WindowState {
	entries: Vec<MessageEntry>,
	last_generation: OffsetDateTime,
}

/// Entries ingested since the last generation, guarded by a single critical section.
pub struct WindowStore {
	state: Mutex<WindowState>,
}
impl WindowStore {
	pub fn new(started_at: OffsetDateTime) -> Self {
		Self { state: Mutex::new(WindowState { entries: Vec::new(), last_generation: started_at }) }
	}

	pub fn append(&self, entry: MessageEntry) {
		self.lock().entries.push(entry);
	}

	pub fn len(&self) -> usize {
		self.lock().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lock().entries.is_empty()
	}

	pub fn last_generation(&self) -> OffsetDateTime {
		self.lock().last_generation
	}

	pub fn is_due(&self, now: OffsetDateTime, window: Duration) -> bool {
		now - self.lock().last_generation >= window
	}

	/// Takes every pending entry and restarts the window at `now` in one step.
	pub fn snapshot_and_clear(&self, now: OffsetDateTime) -> Vec<MessageEntry> {
		let mut state = self.lock();

		state.last_generation = now;

		mem::take(&mut state.entries)
	}

	/// Hands the pending entries to `settle` while holding the lock. The window is cleared and
	/// restarted at `now` only when `settle` returns `Some`; on `None` or a panic it is left as is.
	pub(crate) fn settle<T>(
		&self,
		now: OffsetDateTime,
		settle: impl FnOnce(&[MessageEntry]) -> Option<T>,
	) -> Option<T> {
		let mut state = self.lock();
		let outcome = settle(&state.entries)?;

		state.entries.clear();
		state.last_generation = now;

		Some(outcome)
	}

	fn lock(&self) -> MutexGuard<'_, WindowState> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}
}
