use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read moodwatch config {}.", path.display())]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("Invalid TOML in moodwatch config {}: {source}", path.display())]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("Invalid moodwatch config: {message}")]
	Validation { message: String },
}
