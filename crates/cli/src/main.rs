use clap::{Parser, Subcommand};
use dockcheck_core::{
    config::rules_from_env_value, open_store, BusinessRules, Outcome, PurchaseOrderLookup,
    ReferenceNumber, StoreConfig, ValidationPipeline, WebhookRequest,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dockcheck")]
#[command(about = "Dockcheck purchase-order validator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a webhook payload through the validation pipeline
    Validate {
        /// Path to the JSON webhook payload
        payload: PathBuf,
        /// YAML purchase-order store (defaults to the built-in stub)
        #[arg(long)]
        store_path: Option<PathBuf>,
        /// Comma-separated business rules to enforce
        #[arg(long)]
        rules: Option<String>,
    },
    /// Print the purchase orders matching a reference number
    Lookup {
        /// Reference number
        reference: String,
        /// YAML purchase-order store (defaults to the built-in stub)
        #[arg(long)]
        store_path: Option<PathBuf>,
    },
    /// Check the format of a reference number
    CheckRef {
        /// Reference number
        reference: String,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate {
            payload,
            store_path,
            rules,
        }) => {
            let outcome = validate_file(&payload, store_path, rules)?;
            println!(
                "{} {}: {}",
                outcome.status_code(),
                outcome.category(),
                outcome.message()
            );
            if !outcome.is_accepted() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Lookup {
            reference,
            store_path,
        }) => {
            let reference = ReferenceNumber::parse(&reference)?;
            let lookup = open_lookup(store_path)?;
            let records = lookup.find_by_reference(&reference)?;
            if records.is_empty() {
                println!("No purchase orders found for {}.", reference);
            } else {
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
        }
        Some(Commands::CheckRef { reference }) => match ReferenceNumber::parse(&reference) {
            Ok(reference) => println!("{} is a valid reference number", reference),
            Err(e) => {
                eprintln!("{:?} is not a valid reference number: {}", reference, e);
                return Ok(ExitCode::FAILURE);
            }
        },
        None => {
            println!("Use 'dockcheck --help' for commands");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_lookup(
    store_path: Option<PathBuf>,
) -> Result<Arc<dyn PurchaseOrderLookup>, Box<dyn std::error::Error>> {
    let config = match store_path {
        Some(path) => StoreConfig::File(path),
        None => StoreConfig::Stub,
    };
    Ok(open_store(&config)?)
}

fn validate_file(
    payload: &Path,
    store_path: Option<PathBuf>,
    rules: Option<String>,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let body = std::fs::read(payload)?;
    let request = WebhookRequest::from_slice(&body)?;
    let rules = BusinessRules::from_names(rules_from_env_value(rules).as_slice())?;
    let lookup = open_lookup(store_path)?;
    Ok(ValidationPipeline::new(rules).evaluate(&request, &*lookup))
}
