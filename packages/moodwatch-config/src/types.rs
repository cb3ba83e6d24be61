use serde::Deserialize;

pub const DEFAULT_GENERATION_CHECK_INTERVAL_MS: u64 = 10_000;
pub const DEFAULT_SUMMARY_WINDOW_MS: u64 = 120_000;
pub const DEFAULT_DISPLAY_REFRESH_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_HISTORY_LIMIT: u32 = 16;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub schedule: Schedule,
	#[serde(default)]
	pub ingest: Ingest,
	#[serde(default)]
	pub display: Display,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Schedule {
	/// How often the generation trigger checks whether the window is due.
	#[serde(default = "default_generation_check_interval_ms")]
	pub generation_check_interval_ms: u64,
	/// Age of the window, measured from the last generation, that makes it due.
	#[serde(default = "default_summary_window_ms")]
	pub summary_window_ms: u64,
	#[serde(default = "default_display_refresh_interval_ms")]
	pub display_refresh_interval_ms: u64,
}
impl Default for Schedule {
	fn default() -> Self {
		Self {
			generation_check_interval_ms: DEFAULT_GENERATION_CHECK_INTERVAL_MS,
			summary_window_ms: DEFAULT_SUMMARY_WINDOW_MS,
			display_refresh_interval_ms: DEFAULT_DISPLAY_REFRESH_INTERVAL_MS,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Ingest {
	#[serde(default)]
	pub out_of_range: OutOfRangePolicy,
}

/// What ingestion does with a finite sentiment score outside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
	#[default]
	Clamp,
	Reject,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Display {
	#[serde(default = "default_sink")]
	pub sink: String,
	/// Re-render the current summary right after each accepted message.
	#[serde(default = "default_refresh_on_ingest")]
	pub refresh_on_ingest: bool,
	/// Maximum number of dominant intent changes kept in memory.
	#[serde(default = "default_history_limit")]
	pub history_limit: u32,
}
impl Default for Display {
	fn default() -> Self {
		Self {
			sink: default_sink(),
			refresh_on_ingest: default_refresh_on_ingest(),
			history_limit: DEFAULT_HISTORY_LIMIT,
		}
	}
}

fn default_generation_check_interval_ms() -> u64 {
	DEFAULT_GENERATION_CHECK_INTERVAL_MS
}

fn default_summary_window_ms() -> u64 {
	DEFAULT_SUMMARY_WINDOW_MS
}

fn default_display_refresh_interval_ms() -> u64 {
	DEFAULT_DISPLAY_REFRESH_INTERVAL_MS
}

fn default_sink() -> String {
	"terminal".to_string()
}

fn default_refresh_on_ingest() -> bool {
	true
}

fn default_history_limit() -> u32 {
	DEFAULT_HISTORY_LIMIT
}
