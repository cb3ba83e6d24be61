pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid message: {0}")]
	InvalidMessage(#[from] moodwatch_domain::Error),
	#[error("Presenter error: {message}")]
	Presenter { message: String },
	#[error("Scheduler error: {message}")]
	Scheduler { message: String },
}
impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Presenter { message: err.to_string() }
	}
}
