//! `notesvc` - CLI for the notes service
//!
//! This binary runs the HTTP service and offers a few helpers for inspecting
//! its configuration and API description.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use notesvc::cli::{Cli, Command, ConfigCommand, OpenApiCommand, ServeCommand};
use notesvc::config::LogFormat;
use notesvc::logging::Verbosity;
use notesvc::{init_logging, server, Config, NoteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    // Only commands that use the configuration load it
    match cli.command {
        None => {
            let config = load_config(cli.config, verbosity)?;
            handle_serve(config, ServeCommand::default()).await
        }
        Some(Command::Serve(serve_cmd)) => {
            let config = load_config(cli.config, verbosity)?;
            handle_serve(config, serve_cmd).await
        }
        Some(Command::OpenApi(openapi_cmd)) => {
            init_logging(verbosity, LogFormat::default());
            handle_openapi(&openapi_cmd)
        }
        Some(Command::Config(config_cmd)) => handle_config(cli.config, verbosity, config_cmd),
    }
}

/// Load configuration and initialize logging in the configured format.
fn load_config(path: Option<PathBuf>, verbosity: Verbosity) -> anyhow::Result<Config> {
    let config = Config::load_from(path).context("loading configuration")?;
    init_logging(verbosity, config.log.format);
    Ok(config)
}

async fn handle_serve(config: Config, cmd: ServeCommand) -> anyhow::Result<()> {
    let config = config.with_overrides(cmd.host, cmd.port);
    let addr = config.socket_addr()?;

    let store = Arc::new(NoteStore::new());
    let listener = server::bind(addr).await?;
    server::serve(listener, store, server::shutdown_signal()).await?;

    info!("Goodbye");
    Ok(())
}

fn handle_openapi(cmd: &OpenApiCommand) -> anyhow::Result<()> {
    println!("{}", server::openapi::to_json(cmd.pretty)?);
    Ok(())
}

fn handle_config(
    config_path: Option<PathBuf>,
    verbosity: Verbosity,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path, verbosity)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!();
                println!("[Log]");
                println!("  Format:             {:?}", config.log.format);
            }
        }
        ConfigCommand::Path => {
            init_logging(verbosity, LogFormat::default());
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            init_logging(verbosity, LogFormat::default());
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
