use std::collections::HashMap;

use serde::Serialize;
use time::OffsetDateTime;

use crate::{entry::MessageEntry, mood::MoodLabel};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntentShare {
	pub intent: String,
	pub count: usize,
	/// `round(100 * count / total)`, rounded per bucket. Shares of one window may not sum to 100.
	pub percentage: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateStats {
	pub avg_sentiment: f64,
	/// One share per distinct intent, in order of first occurrence within the window.
	pub intent_percentages: Vec<IntentShare>,
	pub total_messages: usize,
	pub peak_sentiment: f64,
	pub lowest_sentiment: f64,
	#[serde(with = "time::serde::rfc3339")]
	pub computed_at: OffsetDateTime,
}
impl AggregateStats {
	/// Returns `None` for an empty window.
	pub fn compute(entries: &[MessageEntry], computed_at: OffsetDateTime) -> Option<Self> {
		let first = entries.first()?;
		let total_messages = entries.len();
		let mut sum = 0.0_f64;
		let mut peak_sentiment = first.sentiment();
		let mut lowest_sentiment = first.sentiment();
		let mut shares: Vec<IntentShare> = Vec::new();
		let mut slots: HashMap<&str, usize> = HashMap::new();

		for entry in entries {
			let sentiment = entry.sentiment();

			sum += sentiment;
			peak_sentiment = peak_sentiment.max(sentiment);
			lowest_sentiment = lowest_sentiment.min(sentiment);

			match slots.get(entry.intent()) {
				Some(&slot) => shares[slot].count += 1,
				None => {
					slots.insert(entry.intent(), shares.len());
					shares.push(IntentShare {
						intent: entry.intent().to_string(),
						count: 1,
						percentage: 0,
					});
				},
			}
		}

		for share in &mut shares {
			share.percentage = percentage(share.count, total_messages);
		}

		Some(Self {
			avg_sentiment: sum / total_messages as f64,
			intent_percentages: shares,
			total_messages,
			peak_sentiment,
			lowest_sentiment,
			computed_at,
		})
	}

	pub fn mood(&self) -> MoodLabel {
		MoodLabel::classify(self.avg_sentiment)
	}

	pub fn percentage_of(&self, intent: &str) -> Option<u32> {
		self.intent_percentages
			.iter()
			.find(|share| share.intent == intent)
			.map(|share| share.percentage)
	}

	/// Shares by descending percentage. The sort is stable, so ties keep first-seen order.
	pub fn ranked_intents(&self) -> Vec<&IntentShare> {
		let mut ranked: Vec<&IntentShare> = self.intent_percentages.iter().collect();

		ranked.sort_by(|a, b| b.percentage.cmp(&a.percentage));

		ranked
	}

	pub fn dominant_intent(&self) -> Option<&IntentShare> {
		self.ranked_intents().into_iter().next()
	}
}

fn percentage(count: usize, total: usize) -> u32 {
	((100 * count) as f64 / total as f64).round() as u32
}
