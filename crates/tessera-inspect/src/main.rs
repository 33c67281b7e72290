//! Command-line resolver queries against a Tessera type schema.
//!
//! ```text
//! tessera-inspect <type>               # ancestors and implemented interfaces
//! tessera-inspect <type> <interface>   # implements / find_interface
//! ```
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tessera-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Load the type schema named by the configuration
//! 4. Answer the query and exit

mod config;
mod error;

use std::path::Path;
use std::process::ExitCode;

use tessera_reflect::{SchemaError, TypeSchema, TypeSystem};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::InspectConfig;
use crate::error::InspectError;

const CONFIG_PATH: &str = "tessera-config.yaml";

/// Where the active configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    File,
    Defaults,
}

fn main() -> ExitCode {
    let loaded = load_config(Path::new(CONFIG_PATH));
    let level = loaded
        .as_ref()
        .map_or_else(|_| "info".to_owned(), |(c, _)| c.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Ok((_, ConfigSource::Defaults)) = &loaded {
        info!(path = CONFIG_PATH, "config file not found, using defaults");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match loaded.and_then(|(config, _)| run(&config, &args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "tessera-inspect failed");
            ExitCode::FAILURE
        }
    }
}

/// Load the configuration at `path`, falling back to defaults when the file
/// does not exist. Logging is not up yet, so the caller reports the source.
fn load_config(path: &Path) -> Result<(InspectConfig, ConfigSource), InspectError> {
    if path.exists() {
        Ok((InspectConfig::from_file(path)?, ConfigSource::File))
    } else {
        Ok((InspectConfig::parse("{}")?, ConfigSource::Defaults))
    }
}

fn run(config: &InspectConfig, args: &[String]) -> Result<(), InspectError> {
    let schema = TypeSchema::from_file(&config.schema.path)?;
    let system = TypeSystem::from_schema(&schema).map_err(SchemaError::from)?;
    info!(
        schema = %config.schema.path.display(),
        types = system.len(),
        "schema loaded"
    );

    match args {
        [ty] => describe(&system, ty),
        [ty, interface] => query(&system, ty, interface),
        _ => Err(InspectError::Usage),
    }
}

fn describe(system: &TypeSystem, source: &str) -> Result<(), InspectError> {
    let ty = system.parse_type(source)?;
    println!("type: {}", system.display(&ty));
    for ancestor in system.ancestors(&ty).iter().skip(1) {
        println!("  extends {}", system.display(ancestor));
    }
    for interface in system.all_interfaces(&ty) {
        println!("  implements {}", system.display(&interface));
    }
    Ok(())
}

fn query(system: &TypeSystem, source: &str, interface: &str) -> Result<(), InspectError> {
    let ty = system.parse_type(source)?;
    let template = system.parse_template(interface)?;
    println!(
        "implements {}: {}",
        system.display_template(&template),
        system.implements(&ty, &template)
    );
    match system.find_interface(&ty, &template) {
        Some(found) => println!("resolved: {}", system.display(&found)),
        None => println!("resolved: none"),
    }
    Ok(())
}
