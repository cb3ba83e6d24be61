use std::fmt;

use serde::Serialize;

/// Thresholds are checked from the top down; each lower bound is inclusive.
const THRESHOLDS: [(f64, MoodLabel); 4] = [
	(0.8, MoodLabel::VeryPositive),
	(0.6, MoodLabel::MostlyPositive),
	(0.4, MoodLabel::Neutral),
	(0.2, MoodLabel::MostlyNegative),
];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
	VeryPositive,
	MostlyPositive,
	Neutral,
	MostlyNegative,
	VeryNegative,
}
impl MoodLabel {
	pub fn classify(sentiment: f64) -> Self {
		THRESHOLDS
			.iter()
			.find(|(floor, _)| sentiment >= *floor)
			.map(|(_, label)| *label)
			.unwrap_or(Self::VeryNegative)
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::VeryPositive => "Very Positive",
			Self::MostlyPositive => "Mostly Positive",
			Self::Neutral => "Neutral",
			Self::MostlyNegative => "Mostly Negative",
			Self::VeryNegative => "Very Negative",
		}
	}
}
impl fmt::Display for MoodLabel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
