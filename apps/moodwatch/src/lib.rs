pub mod feed;

use std::{future, path::PathBuf, sync::Arc};

use clap::Parser;
use tokio::{io::BufReader, signal};
use tracing_subscriber::EnvFilter;

use crate::feed::Ingestor;
use moodwatch_service::{Accumulator, Scheduler, presenter};

#[derive(Debug, Parser)]
#[command(
	version = moodwatch_cli::VERSION,
	rename_all = "kebab",
	styles = moodwatch_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Replay a built-in sample conversation alongside stdin.
	#[arg(long)]
	pub demo: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = moodwatch_config::load(&args.config)?;
	init_tracing(&config)?;

	let accumulator = Arc::new(Accumulator::new(&config));
	let sink = presenter::from_config(&config.display);
	let scheduler = Arc::new(Scheduler::new(accumulator.clone(), sink, &config.schedule));

	scheduler.start()?;
	tracing::info!(
		window_ms = config.schedule.summary_window_ms,
		check_ms = config.schedule.generation_check_interval_ms,
		refresh_ms = config.schedule.display_refresh_interval_ms,
		"Chat analyzer started."
	);

	let refresh = config.display.refresh_on_ingest.then(|| scheduler.clone());
	let ingestor = Arc::new(Ingestor::new(accumulator, refresh));

	if args.demo {
		tokio::spawn(feed::demo(ingestor.clone()));
	}

	let input = async {
		let accepted = feed::read_lines(BufReader::new(tokio::io::stdin()), &ingestor).await?;

		tracing::info!(accepted, "Input closed. Press Ctrl-C to stop.");

		future::pending::<color_eyre::Result<()>>().await
	};

	tokio::select! {
		result = input => result?,
		signal = signal::ctrl_c() => signal?,
	}

	scheduler.stop().await;
	tracing::info!("Chat analyzer stopped.");

	Ok(())
}

fn init_tracing(config: &moodwatch_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
	Ok(())
}
