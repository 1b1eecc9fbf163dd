pub mod eval;

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pitchside_config::Config;
use pitchside_domain::prompt;
use pitchside_service::{Providers, RouteOutcome, Router, classify::IntentClassifier};
use pitchside_storage::qdrant::QdrantStore;

#[derive(Debug, Parser)]
#[command(
	version = pitchside_cli::VERSION,
	rename_all = "kebab",
	styles = pitchside_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Route one message and print the outcome as JSON.
	Route {
		#[arg(long, short = 'm')]
		message: String,
		/// Also print the system prompt built on top of this base prompt.
		#[arg(long, value_name = "TEXT")]
		base_prompt: Option<String>,
	},
	/// Score the configured classifier and extractor against a labeled dataset.
	Eval {
		#[arg(long, short = 'd', value_name = "FILE")]
		dataset: PathBuf,
	},
}

#[derive(Debug, Serialize)]
struct RouteReport {
	#[serde(flatten)]
	outcome: RouteOutcome,
	#[serde(skip_serializing_if = "Option::is_none")]
	system_prompt: Option<String>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = pitchside_config::load(&args.config)?;

	init_tracing(&config);

	match args.command {
		Command::Route { message, base_prompt } => route(config, &message, base_prompt).await,
		Command::Eval { dataset } => {
			let dataset = eval::load_dataset(&dataset)?;

			tracing::info!(cases = dataset.cases.len(), "Loaded evaluation dataset.");

			let classifier = IntentClassifier::from_config(&config, Providers::default().classifier)?;
			let report = eval::evaluate(&config, &classifier, &dataset).await;
			let json = serde_json::to_string_pretty(&report)?;

			println!("{json}");

			Ok(())
		},
	}
}

async fn route(
	config: Config,
	message: &str,
	base_prompt: Option<String>,
) -> color_eyre::Result<()> {
	let store = QdrantStore::new(&config.storage.qdrant)?;
	let router = Router::new(config, Providers::default(), Arc::new(store))?;
	let outcome = router.route_detailed(message).await;
	let system_prompt = base_prompt
		.map(|base| prompt::augment_system_prompt(&base, &outcome.context, outcome.intent));
	let json = serde_json::to_string_pretty(&RouteReport { outcome, system_prompt })?;

	println!("{json}");

	Ok(())
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
