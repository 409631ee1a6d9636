//! WFCOS configuration command line interface

use clap::{CommandFactory, Parser, Subcommand};
use std::path::Path;
use std::process;
use wfcos_config::{ConfigLoader, WfcosConfig};
use wfcos_core::{ConfigError, Result};

#[derive(Parser)]
#[command(name = "wfcos")]
#[command(about = "WFCOS training configuration toolkit")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration document
    Validate {
        /// Path to the JSON configuration document
        config: String,
    },

    /// Load a configuration document and print its validated form
    Show {
        /// Path to the JSON configuration document
        config: String,
    },

    /// Write a template configuration document (the reference COCO
    /// ResNet-101 run)
    Init {
        /// Output path for the template document
        #[arg(short, long, default_value = "wfcos.json")]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Validate { config }) => handle_validate(&config),
        Some(Commands::Show { config }) => handle_show(&config),
        Some(Commands::Init { output }) => handle_init(&output),
        None => {
            let _ = Cli::command().print_help();
            Ok(())
        }
    };

    if let Err(e) = result {
        match e.path() {
            Some(path) => eprintln!("Error at `{}`: {}", path, e),
            None => eprintln!("Error: {}", e),
        }
        process::exit(1);
    }
}

fn handle_validate(config_path: &str) -> Result<()> {
    let config = ConfigLoader::load_from_file(config_path)?;

    println!("Configuration OK: {}", config_path);
    println!(
        "  Model: {} (ResNet-{}, {} classes)",
        config.model().model_type,
        config.model().backbone.depth,
        config.model().head.num_classes
    );
    println!(
        "  Optimizer: {} (lr={})",
        config.optimizer().kind,
        config.optimizer().lr
    );
    println!(
        "  Run: {} epoch(s) on {} GPU(s), work dir {}",
        config.run().total_epochs,
        config.run().num_gpus,
        config.run().work_dir
    );
    Ok(())
}

fn handle_show(config_path: &str) -> Result<()> {
    let config = ConfigLoader::load_from_file(config_path)?;
    println!("{}", config.to_json_string());
    Ok(())
}

fn handle_init(output: &str) -> Result<()> {
    if Path::new(output).exists() {
        return Err(ConfigError::io(
            output,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file already exists"),
        ));
    }

    let document = WfcosConfig::default().to_document();
    let text = serde_json::to_string_pretty(&document)
        .expect("serializing a document tree cannot fail");
    std::fs::write(output, text).map_err(|e| ConfigError::io(output, e))?;

    println!("Wrote template configuration to: {}", output);
    println!("Validate it with: wfcos validate {}", output);
    Ok(())
}
