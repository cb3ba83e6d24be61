use std::{
	collections::VecDeque,
	sync::{Arc, Mutex, MutexGuard, RwLock},
};

use serde::Serialize;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::window::WindowStore;
use moodwatch_domain::{AggregateStats, NO_MESSAGES, SummaryReport, report};

/// A change of the top-ranked intent between two consecutive summaries.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntentShift {
	#[serde(with = "time::serde::rfc3339")]
	pub at: OffsetDateTime,
	pub previous: Option<String>,
	pub current: String,
	pub report_id: Uuid,
}

#[derive(Clone, Debug)]
pub enum Generation {
	Generated(Arc<SummaryReport>),
	/// Nothing was ingested and no earlier statistics exist to fall back on.
	NoData,
}
impl Generation {
	pub fn text(&self) -> &str {
		match self {
			Self::Generated(report) => &report.text,
			Self::NoData => NO_MESSAGES,
		}
	}

	pub fn report(&self) -> Option<&Arc<SummaryReport>> {
		match self {
			Self::Generated(report) => Some(report),
			Self::NoData => None,
		}
	}
}

pub struct SummaryEngine {
	window_length: Duration,
	history_limit: usize,
	last_stats: Mutex<Option<AggregateStats>>,
	current: RwLock<Option<Arc<SummaryReport>>>,
	history: Mutex<VecDeque<IntentShift>>,
}
impl SummaryEngine {
	pub fn new(window_length: Duration, history_limit: usize) -> Self {
		Self {
			window_length,
			history_limit: history_limit.max(1),
			last_stats: Mutex::new(None),
			current: RwLock::new(None),
			history: Mutex::new(VecDeque::new()),
		}
	}

	/// Summarizes the pending window and installs the result as the current report.
	///
	/// The window is cleared under its lock only after the new report is in place, so a reader
	/// never sees a cleared window paired with the previous report. An empty window reuses the
	/// previous statistics unchanged.
	pub fn generate(&self, window: &WindowStore, now: OffsetDateTime) -> Generation {
		let installed = window.settle(now, |entries| {
			let mut last_stats = lock(&self.last_stats);
			let (stats, fresh) = match AggregateStats::compute(entries, now) {
				Some(stats) => (stats, true),
				None => ((*last_stats).clone()?, false),
			};
			let text = report::render(&stats, self.window_length);
			let report = Arc::new(SummaryReport::new(text, now));

			if fresh {
				self.record_shift((*last_stats).as_ref(), &stats, &report);
			}

			*last_stats = Some(stats);
			*self.current.write().unwrap_or_else(|err| err.into_inner()) =
				Some(Arc::clone(&report));

			Some(report)
		});

		match installed {
			Some(report) => Generation::Generated(report),
			None => Generation::NoData,
		}
	}

	pub fn current_report(&self) -> Option<Arc<SummaryReport>> {
		self.current.read().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn current_stats(&self) -> Option<AggregateStats> {
		lock(&self.last_stats).clone()
	}

	pub fn intent_history(&self) -> Vec<IntentShift> {
		lock(&self.history).iter().cloned().collect()
	}

	pub fn window_length(&self) -> Duration {
		self.window_length
	}

	fn record_shift(
		&self,
		previous: Option<&AggregateStats>,
		next: &AggregateStats,
		report: &SummaryReport,
	) {
		let Some(current) = next.dominant_intent() else {
			return;
		};
		let previous = previous.and_then(AggregateStats::dominant_intent);

		if previous.map(|share| share.intent == current.intent).unwrap_or(false) {
			return;
		}

		tracing::info!(
			previous = previous.map(|share| share.intent.as_str()).unwrap_or("none"),
			current = %current.intent,
			report_id = %report.id,
			"Dominant intent changed."
		);

		let mut history = lock(&self.history);

		history.push_back(IntentShift {
			at: report.generated_at,
			previous: previous.map(|share| share.intent.clone()),
			current: current.intent.clone(),
			report_id: report.id,
		});

		while history.len() > self.history_limit {
			history.pop_front();
		}
	}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}
