pub mod entry;
pub mod mood;
pub mod report;
pub mod stats;

mod error;

pub use entry::{MessageEntry, Sentiment};
pub use error::{Error, Result};
pub use mood::MoodLabel;
pub use report::{NO_MESSAGES, NO_SUMMARY_YET, SummaryReport};
pub use stats::{AggregateStats, IntentShare};
