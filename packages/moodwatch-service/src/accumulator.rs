use std::sync::Arc;

use time::Duration;

use crate::{
	Result,
	clock::{Clock, SystemClock},
	engine::{Generation, IntentShift, SummaryEngine},
	window::WindowStore,
};
use moodwatch_config::{Config, OutOfRangePolicy};
use moodwatch_domain::{AggregateStats, MessageEntry, NO_SUMMARY_YET, Sentiment, SummaryReport};

/// The single owner of the message window, the cached statistics and the current report.
pub struct Accumulator {
	clock: Arc<dyn Clock>,
	out_of_range: OutOfRangePolicy,
	window: WindowStore,
	engine: SummaryEngine,
}
impl Accumulator {
	pub fn new(cfg: &Config) -> Self {
		Self::with_clock(cfg, Arc::new(SystemClock))
	}

	pub fn with_clock(cfg: &Config, clock: Arc<dyn Clock>) -> Self {
		let window_length = Duration::milliseconds(
			i64::try_from(cfg.schedule.summary_window_ms).unwrap_or(i64::MAX),
		);
		let history_limit = usize::try_from(cfg.display.history_limit).unwrap_or(usize::MAX);
		let window = WindowStore::new(clock.now());

		Self {
			clock,
			out_of_range: cfg.ingest.out_of_range,
			window,
			engine: SummaryEngine::new(window_length, history_limit),
		}
	}

	pub fn ingest(&self, content: &str, sentiment: f64, intent: &str) -> Result<()> {
		let score = Sentiment::new(sentiment, self.out_of_range)?;

		if score.value() != sentiment {
			tracing::warn!(raw = sentiment, clamped = score.value(), "Sentiment clamped into range.");
		}

		let entry = MessageEntry::new(self.clock.now(), content, score, intent)?;

		tracing::debug!(intent = entry.intent(), sentiment = entry.sentiment(), "Message ingested.");

		self.window.append(entry);

		Ok(())
	}

	pub fn is_due(&self) -> bool {
		self.window.is_due(self.clock.now(), self.engine.window_length())
	}

	pub fn generate_if_due(&self) -> Option<Generation> {
		if !self.is_due() {
			return None;
		}

		Some(self.generate())
	}

	/// Generates regardless of the window age.
	pub fn generate(&self) -> Generation {
		let generation = self.engine.generate(&self.window, self.clock.now());

		match &generation {
			Generation::Generated(report) => tracing::info!(
				report_id = %report.id,
				generated_at = %report.generated_at,
				"Summary generated."
			),
			Generation::NoData => tracing::debug!("No messages to summarize."),
		}

		generation
	}

	pub fn force_generate(&self) -> String {
		self.generate().text().to_string()
	}

	/// The current report followed by its age, or the no-summary sentinel.
	pub fn current_summary_text(&self) -> String {
		match self.engine.current_report() {
			Some(report) => report.annotated(self.clock.now()),
			None => NO_SUMMARY_YET.to_string(),
		}
	}

	pub fn current_report(&self) -> Option<Arc<SummaryReport>> {
		self.engine.current_report()
	}

	pub fn current_stats(&self) -> Option<AggregateStats> {
		self.engine.current_stats()
	}

	pub fn intent_history(&self) -> Vec<IntentShift> {
		self.engine.intent_history()
	}

	pub fn pending_messages(&self) -> usize {
		self.window.len()
	}

	pub fn window_length(&self) -> Duration {
		self.engine.window_length()
	}
}
