use serde::Serialize;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::{mood::MoodLabel, stats::AggregateStats};

pub const NO_SUMMARY_YET: &str = "No summary available yet";
pub const NO_MESSAGES: &str = "No messages to summarize";

const RULE: &str = "------------------------------------------";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryReport {
	pub id: Uuid,
	pub text: String,
	#[serde(with = "time::serde::rfc3339")]
	pub generated_at: OffsetDateTime,
}
impl SummaryReport {
	pub fn new(text: String, generated_at: OffsetDateTime) -> Self {
		Self { id: Uuid::new_v4(), text, generated_at }
	}

	/// Whole seconds since generation, never negative.
	pub fn age_seconds(&self, now: OffsetDateTime) -> i64 {
		(now - self.generated_at).whole_seconds().max(0)
	}

	pub fn annotated(&self, now: OffsetDateTime) -> String {
		format!("{}\n\nLast updated: {} seconds ago", self.text, self.age_seconds(now))
	}
}

pub fn render(stats: &AggregateStats, window: Duration) -> String {
	let mut lines = vec![
		format!("📊 Chat Summary ({})", describe_window(window)),
		RULE.to_string(),
		format!(
			"Overall Mood: {} (Average Sentiment: {:.2})",
			stats.mood(),
			stats.avg_sentiment
		),
		String::new(),
		"Dominant Conversation Patterns:".to_string(),
	];

	for share in stats.ranked_intents() {
		lines.push(format!("- {} ({}% of messages)", share.intent, share.percentage));
	}

	lines.extend([
		String::new(),
		"Key Statistics:".to_string(),
		format!("• Total Messages: {}", stats.total_messages),
		format!(
			"• Peak Sentiment: {:.1} ({})",
			stats.peak_sentiment,
			MoodLabel::classify(stats.peak_sentiment)
		),
		format!(
			"• Lowest Sentiment: {:.1} ({})",
			stats.lowest_sentiment,
			MoodLabel::classify(stats.lowest_sentiment)
		),
		RULE.to_string(),
	]);

	lines.join("\n")
}

/// "Last 2 Minutes", "Last 45 Seconds", and so on.
pub fn describe_window(window: Duration) -> String {
	let seconds = window.whole_seconds();

	if seconds >= 60 && seconds % 60 == 0 {
		format!("Last {}", plural(seconds / 60, "Minute"))
	} else if seconds >= 1 {
		format!("Last {}", plural(seconds, "Second"))
	} else {
		format!("Last {}", plural(window.whole_milliseconds().max(0) as i64, "Millisecond"))
	}
}

fn plural(count: i64, unit: &str) -> String {
	if count == 1 { format!("1 {unit}") } else { format!("{count} {unit}s") }
}
