use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = moodwatch::Args::parse();
	moodwatch::run(args).await
}
