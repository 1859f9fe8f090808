//! azp-mutator CLI
//!
//! Entry point for the `azp-mutator` command-line tool.

use azp_mutator::codec::{decode_provider_config, encode_provider_config, ConfigSide};
use azp_mutator::observability::init_tracing;
use azp_mutator::{
    merge_machine_images, merge_machine_types, AdmissionHandler, EffectiveSettings, Mutator,
    NamespacedCloudProfileMutator,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "azp-mutator")]
#[command(about = "Merge NamespacedCloudProfile provider configs for Azure", version)]
struct Cli {
    /// Path to settings file (TOML)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Log level / filter directive (overrides the settings file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Handle one admission request from stdin, write the response to stdout
    Review,

    /// Mutate a NamespacedCloudProfile and print the result
    Mutate {
        /// Resource JSON file (default: stdin)
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,
    },

    /// Merge two CloudProfileConfig documents (spec into status)
    Merge {
        /// Spec-side CloudProfileConfig JSON file
        #[arg(long)]
        spec: PathBuf,

        /// Status-side CloudProfileConfig JSON file
        #[arg(long)]
        status: PathBuf,
    },

    /// Settings commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective settings with provenance
    Show,
}

fn main() {
    let cli = Cli::parse();

    let cli_overrides = cli
        .log_level
        .as_ref()
        .map(|level| serde_json::json!({ "log_level": level }));
    let effective = match EffectiveSettings::build(cli.config.as_deref(), cli_overrides) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            process::exit(1);
        }
    };
    init_tracing(&effective.settings.log_level, effective.settings.log_format);

    let result = match cli.command {
        Commands::Review => run_review(&effective),
        Commands::Mutate { input } => run_mutate(&effective, input.as_deref()),
        Commands::Merge { spec, status } => run_merge(&effective, &spec, &status),
        Commands::Config { action } => match action {
            ConfigCommands::Show => run_config_show(&effective),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn mutator_for(effective: &EffectiveSettings) -> NamespacedCloudProfileMutator {
    NamespacedCloudProfileMutator::new(effective.settings.default_architecture.clone())
}

fn run_review(effective: &EffectiveSettings) -> Result<(), String> {
    AdmissionHandler::new(mutator_for(effective))
        .with_pretty_output(effective.settings.pretty_output)
        .run()
        .map_err(|e| format!("Failed to handle admission request: {}", e))
}

fn run_mutate(effective: &EffectiveSettings, input: Option<&Path>) -> Result<(), String> {
    let raw = read_input(input)?;
    let mut object: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|e| format!("Invalid resource JSON: {}", e))?;

    mutator_for(effective)
        .mutate(&mut object, None)
        .map_err(|e| e.to_string())?;

    print_json(&object, effective.settings.pretty_output)
}

fn run_merge(effective: &EffectiveSettings, spec: &Path, status: &Path) -> Result<(), String> {
    let spec_raw = read_input(Some(spec))?;
    let status_raw = read_input(Some(status))?;

    let spec_config = decode_provider_config(&spec_raw, ConfigSide::Spec).map_err(|e| e.to_string())?;
    let mut status_config =
        decode_provider_config(&status_raw, ConfigSide::Status).map_err(|e| e.to_string())?;

    status_config.machine_images =
        merge_machine_images(&spec_config.machine_images, &status_config.machine_images);
    status_config.machine_types =
        merge_machine_types(&spec_config.machine_types, &status_config.machine_types);

    let encoded = encode_provider_config(&status_config).map_err(|e| e.to_string())?;
    let value: serde_json::Value =
        serde_json::from_slice(&encoded).map_err(|e| format!("Failed to re-read output: {}", e))?;
    print_json(&value, effective.settings.pretty_output)
}

fn run_config_show(effective: &EffectiveSettings) -> Result<(), String> {
    let json = effective
        .to_json()
        .map_err(|e| format!("Error serializing settings: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, String> {
    match path {
        Some(path) => fs::read(path).map_err(|e| format!("{}: {}", path.display(), e)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(buf)
        }
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| format!("Error serializing output: {}", e))?;
    println!("{}", json);
    Ok(())
}
