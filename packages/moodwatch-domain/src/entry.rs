use serde::Serialize;
use time::OffsetDateTime;

use crate::{Error, Result};
use moodwatch_config::OutOfRangePolicy;

/// A classifier score guaranteed to lie in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Sentiment(f64);
impl Sentiment {
	pub const MIN: f64 = 0.0;
	pub const MAX: f64 = 1.0;

	pub fn new(value: f64, policy: OutOfRangePolicy) -> Result<Self> {
		if !value.is_finite() {
			return Err(Error::NonFiniteSentiment { value });
		}
		if (Self::MIN..=Self::MAX).contains(&value) {
			return Ok(Self(value));
		}

		match policy {
			OutOfRangePolicy::Clamp => Ok(Self(value.clamp(Self::MIN, Self::MAX))),
			OutOfRangePolicy::Reject => Err(Error::SentimentOutOfRange { value }),
		}
	}

	pub fn value(self) -> f64 {
		self.0
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MessageEntry {
	#[serde(with = "time::serde::rfc3339")]
	timestamp: OffsetDateTime,
	content: String,
	sentiment: Sentiment,
	intent: String,
}
impl MessageEntry {
	pub fn new(
		timestamp: OffsetDateTime,
		content: impl Into<String>,
		sentiment: Sentiment,
		intent: &str,
	) -> Result<Self> {
		let intent = intent.trim();

		if intent.is_empty() {
			return Err(Error::EmptyIntent);
		}

		Ok(Self { timestamp, content: content.into(), sentiment, intent: intent.to_string() })
	}

	pub fn timestamp(&self) -> OffsetDateTime {
		self.timestamp
	}

	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn sentiment(&self) -> f64 {
		self.sentiment.value()
	}

	pub fn intent(&self) -> &str {
		&self.intent
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use crate::{
		Error,
		entry::{MessageEntry, Sentiment},
	};
	use moodwatch_config::OutOfRangePolicy;

	#[test]
	fn in_range_scores_pass_through_either_policy() {
		for policy in [OutOfRangePolicy::Clamp, OutOfRangePolicy::Reject] {
			assert_eq!(Sentiment::new(0.0, policy).map(Sentiment::value), Ok(0.0));
			assert_eq!(Sentiment::new(0.42, policy).map(Sentiment::value), Ok(0.42));
			assert_eq!(Sentiment::new(1.0, policy).map(Sentiment::value), Ok(1.0));
		}
	}

	#[test]
	fn clamp_policy_pulls_scores_into_range() {
		assert_eq!(Sentiment::new(1.7, OutOfRangePolicy::Clamp).map(Sentiment::value), Ok(1.0));
		assert_eq!(Sentiment::new(-0.3, OutOfRangePolicy::Clamp).map(Sentiment::value), Ok(0.0));
	}

	#[test]
	fn reject_policy_refuses_out_of_range_scores() {
		assert_eq!(
			Sentiment::new(1.7, OutOfRangePolicy::Reject),
			Err(Error::SentimentOutOfRange { value: 1.7 })
		);
	}

	#[test]
	fn non_finite_scores_are_always_rejected() {
		let err = Sentiment::new(f64::NAN, OutOfRangePolicy::Clamp)
			.expect_err("NaN must not be accepted.");

		assert!(matches!(err, Error::NonFiniteSentiment { .. }));
		assert!(Sentiment::new(f64::INFINITY, OutOfRangePolicy::Clamp).is_err());
	}

	#[test]
	fn intent_is_trimmed_and_required() {
		let at = datetime!(2026-01-01 00:00 UTC);
		let sentiment = Sentiment::new(0.5, OutOfRangePolicy::Clamp).expect("Valid sentiment.");
		let entry = MessageEntry::new(at, "hi", sentiment, "  Greeting ").expect("Valid entry.");

		assert_eq!(entry.intent(), "Greeting");
		assert_eq!(entry.content(), "hi");
		assert_eq!(entry.timestamp(), at);
		assert_eq!(MessageEntry::new(at, "hi", sentiment, "   "), Err(Error::EmptyIntent));
	}
}
