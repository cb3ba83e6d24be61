use std::{sync::Arc, time::Duration};

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use moodwatch_service::{Accumulator, Scheduler};

const DEMO_SPACING: Duration = Duration::from_millis(7_500);

/// Sample conversation replayed by `--demo`.
pub const DEMO_CONVERSATION: [(&str, f64, &str); 8] = [
	("Hello! How can I help you today?", 0.8, "Greeting"),
	("I need help with my account", 0.5, "Questions & Inquiries"),
	("This is frustrating!", 0.2, "Problem Solving"),
	("Thank you for your help!", 0.9, "Feedback & Suggestions"),
	("How do I reset my password?", 0.6, "Questions & Inquiries"),
	("The interface is very intuitive", 0.8, "Feedback & Suggestions"),
	("Where can I find the settings?", 0.5, "Questions & Inquiries"),
	("This new feature is amazing!", 0.9, "Feedback & Suggestions"),
];

/// One classified chat message, as produced by the upstream classifier.
#[derive(Debug, Deserialize, PartialEq)]
pub struct IncomingMessage {
	pub content: String,
	pub sentiment: f64,
	pub intent: String,
}

pub struct Ingestor {
	accumulator: Arc<Accumulator>,
	/// Set when every accepted message should trigger an immediate display refresh.
	refresh: Option<Arc<Scheduler>>,
}
impl Ingestor {
	pub fn new(accumulator: Arc<Accumulator>, refresh: Option<Arc<Scheduler>>) -> Self {
		Self { accumulator, refresh }
	}

	pub fn accept(&self, message: &IncomingMessage) -> bool {
		if let Err(err) =
			self.accumulator.ingest(&message.content, message.sentiment, &message.intent)
		{
			tracing::warn!(error = %err, "Message rejected.");

			return false;
		}
		if let Some(scheduler) = &self.refresh {
			scheduler.refresh_display();
		}

		true
	}
}

/// Returns `None` for blank lines.
pub fn parse_line(line: &str) -> Option<serde_json::Result<IncomingMessage>> {
	let line = line.trim();

	if line.is_empty() {
		return None;
	}

	Some(serde_json::from_str(line))
}

/// Ingests JSON lines until the reader is exhausted. Malformed lines are logged and skipped.
pub async fn read_lines<R>(reader: R, ingestor: &Ingestor) -> std::io::Result<usize>
where
	R: AsyncBufRead + Unpin,
{
	let mut lines = reader.lines();
	let mut accepted = 0_usize;
	let mut line_no = 0_usize;

	while let Some(line) = lines.next_line().await? {
		line_no += 1;

		match parse_line(&line) {
			None => {},
			Some(Ok(message)) =>
				if ingestor.accept(&message) {
					accepted += 1;
				},
			Some(Err(err)) => {
				tracing::warn!(line = line_no, error = %err, "Skipping malformed input line.");
			},
		}
	}

	Ok(accepted)
}

pub async fn demo(ingestor: Arc<Ingestor>) {
	for (idx, (content, sentiment, intent)) in DEMO_CONVERSATION.into_iter().enumerate() {
		if idx > 0 {
			tokio::time::sleep(DEMO_SPACING).await;
		}

		tracing::info!(content, "New message.");

		ingestor.accept(&IncomingMessage {
			content: content.to_string(),
			sentiment,
			intent: intent.to_string(),
		});
	}

	tracing::info!("Demo conversation finished.");
}
