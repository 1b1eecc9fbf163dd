use clap::Parser;

use pitchside_route::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	pitchside_route::run(args).await
}
