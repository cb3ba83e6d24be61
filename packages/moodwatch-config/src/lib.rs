mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DEFAULT_DISPLAY_REFRESH_INTERVAL_MS, DEFAULT_GENERATION_CHECK_INTERVAL_MS,
	DEFAULT_HISTORY_LIMIT, DEFAULT_SUMMARY_WINDOW_MS, Display, Ingest, OutOfRangePolicy, Schedule,
	Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	for (label, value) in [
		("schedule.generation_check_interval_ms", cfg.schedule.generation_check_interval_ms),
		("schedule.summary_window_ms", cfg.schedule.summary_window_ms),
		("schedule.display_refresh_interval_ms", cfg.schedule.display_refresh_interval_ms),
	] {
		if value == 0 {
			return Err(Error::Validation { message: format!("{label} must be greater than zero.") });
		}
	}

	if cfg.schedule.generation_check_interval_ms > cfg.schedule.summary_window_ms {
		return Err(Error::Validation {
			message: "schedule.generation_check_interval_ms must not exceed schedule.summary_window_ms."
				.to_string(),
		});
	}
	if !matches!(cfg.display.sink.as_str(), "terminal" | "log") {
		return Err(Error::Validation {
			message: "display.sink must be one of terminal or log.".to_string(),
		});
	}
	if cfg.display.history_limit == 0 {
		return Err(Error::Validation {
			message: "display.history_limit must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
	cfg.display.sink = cfg.display.sink.trim().to_ascii_lowercase();
}
