//! CADASTUR registry command line.
//!
//! Runs the same checks the signup endpoint performs, against a registry file
//! located the same way the server locates it:
//! - `validate`: claimed name + registration number, prints the verdict
//! - `lookup`: recorded spellings for a registration number
//! - `stats`: which file was loaded and how much of it was usable

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use cadastur_lookup::{RegistryConfig, RegistryService, Verdict};
use cadastur_lookup::config::OVERRIDE_ENV;
use clap::{Parser, Subcommand};
use tracing::debug;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "cadastur")]
#[command(about = "Validate tour guide names against the CADASTUR registry")]
struct Args {
	/// Registry file to use instead of probing the search directories
	#[arg(long, value_name = "PATH", global = true)]
	csv: Option<PathBuf>,

	/// TOML configuration file
	#[arg(short, long, value_name = "PATH", global = true)]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Check a claimed name against a registration number
	Validate {
		name: String,
		number: String,
		/// Print the response body as JSON
		#[arg(long)]
		json: bool,
	},
	/// List the names recorded for a registration number
	Lookup { number: String },
	/// Show where the registry was loaded from and its size
	Stats,
}

fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let config = load_config(&args)?;
	debug!(?config, "resolved configuration");
	let service = RegistryService::new(config);

	match args.command {
		Command::Validate { name, number, json } => {
			let verdict = Verdict::evaluate(&service, &name, &number);
			if json {
				println!("{}", serde_json::to_string_pretty(&verdict)?);
			} else {
				print_verdict(&verdict);
			}
			Ok(if verdict.is_confirmed() {
				ExitCode::SUCCESS
			} else {
				ExitCode::FAILURE
			})
		}
		Command::Lookup { number } => {
			let index = service.snapshot()?;
			let digits = cadastur_names::digits_only(&number);
			let entries = index.get(&digits);
			if entries.is_empty() {
				println!("{digits}: not registered");
				return Ok(ExitCode::FAILURE);
			}
			for entry in entries {
				println!("{digits}: {} ({})", entry.raw_name(), entry.normalized_name());
			}
			Ok(ExitCode::SUCCESS)
		}
		Command::Stats => {
			let index = service.snapshot()?;
			println!("source:    {}", index.source().display());
			println!("delimiter: {:?}", index.delimiter());
			println!("entries:   {}", index.total());
			println!("numbers:   {}", index.numbers());
			Ok(ExitCode::SUCCESS)
		}
	}
}

/// Config file (or defaults), then `CADASTUR_CSV_PATH`, then `--csv`.
fn load_config(args: &Args) -> anyhow::Result<RegistryConfig> {
	let config = match &args.config {
		Some(path) => RegistryConfig::load_file(path).with_context(|| format!("loading {}", path.display()))?,
		None => RegistryConfig::default(),
	};
	let mut config = config.with_env(|key| std::env::var(key).ok());
	if let Some(csv) = &args.csv {
		debug!(path = %csv.display(), "--csv takes precedence over {OVERRIDE_ENV}");
		config.override_path = Some(csv.clone());
	}
	Ok(config)
}

fn print_verdict(verdict: &Verdict) {
	match verdict {
		Verdict::Confirmed {
			exact_match,
			official_name,
			..
		} => {
			let kind = if *exact_match { "exact" } else { "partial" };
			println!("confirmed ({kind} match): {official_name}");
		}
		Verdict::NameMismatch { suggestions } => {
			println!("name does not match the registry");
			for name in suggestions {
				println!("  registered as: {name}");
			}
		}
		other => {
			let code = other.code().unwrap_or_default();
			let message = other.message().unwrap_or_default();
			println!("{code}: {message}");
		}
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("cadastur=debug,cadastur_lookup=debug,warn")
		} else {
			EnvFilter::new("cadastur=info,cadastur_lookup=info,warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}
