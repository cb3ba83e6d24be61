pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
	#[error("Sentiment must be a finite number, got {value}.")]
	NonFiniteSentiment { value: f64 },
	#[error("Sentiment {value} is outside the range 0.0-1.0.")]
	SentimentOutOfRange { value: f64 },
	#[error("Intent label must be non-empty.")]
	EmptyIntent,
}
