use std::{
	io::{self, Write},
	sync::Arc,
};

use crate::Result;
use moodwatch_config::Display;

pub const BANNER: &str = "Chat Room Status\n================";

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Output sink for rendered frames. Each call replaces whatever was shown before.
pub trait Presenter
where
	Self: Send + Sync,
{
	fn render(&self, frame: &str) -> Result<()>;
}

pub fn frame(body: &str) -> String {
	format!("{BANNER}\n\n{body}\n")
}

pub fn from_config(cfg: &Display) -> Arc<dyn Presenter> {
	match cfg.sink.as_str() {
		"log" => Arc::new(LogPresenter),
		_ => Arc::new(TerminalPresenter),
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalPresenter;
impl Presenter for TerminalPresenter {
	fn render(&self, frame: &str) -> Result<()> {
		let mut stdout = io::stdout().lock();

		stdout.write_all(CLEAR_SCREEN.as_bytes())?;
		stdout.write_all(frame.as_bytes())?;
		stdout.flush()?;

		Ok(())
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogPresenter;
impl Presenter for LogPresenter {
	fn render(&self, frame: &str) -> Result<()> {
		tracing::info!(target: "moodwatch::display", "\n{frame}");

		Ok(())
	}
}
