//! Command-line host for the Roster record manager.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::{debug, info};
use roster::config::RosterConfig;
use roster::core::{FormElement, HttpRemoteResource, InitReport, RecordApp, SubmitOutcome};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line options for the Roster client.
#[derive(Parser)]
#[command(name = "roster", version)]
struct Cli {
    /// Optional path to a roster.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the remote collection URL
    #[arg(long)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load every record and print one line per item
    List,
    /// Load every record and print the full HTML page
    Page,
    /// Submit a new record built from name=value fields
    Add {
        /// Form field as name=value; repeat for each field
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

/// Split a `name=value` argument at the first `=`.
fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{raw}`"))?;
    if name.is_empty() {
        return Err(format!("field name is empty in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Message for stderr when the initial load failed and the list is empty.
fn load_warning(report: &InitReport) -> Option<String> {
    report
        .failure
        .as_ref()
        .map(|failure| format!("warning: {failure}; showing an empty list"))
}

fn load_config(cli: &Cli) -> anyhow::Result<RosterConfig> {
    let mut config = if let Some(path) = cli.config.as_ref() {
        info!("loading config from path: {}", path.display());
        RosterConfig::load_from_path(path).context("failed to load config")?
    } else {
        let cwd = std::env::current_dir().context("cwd")?;
        info!("loading layered config from cwd: {}", cwd.display());
        let layered = RosterConfig::load_layered(&cwd).context("failed to load layered config")?;
        debug!("layered config loaded (layers={})", layered.layers.len());
        layered.config
    };
    if let Some(base_url) = cli.base_url.as_ref() {
        config.remote.base_url = base_url.clone();
        config
            .validate()
            .context("invalid --base-url override")?;
    }
    Ok(config)
}

/// Entry point for the Roster CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    roster::init_logging();

    let cli = Cli::parse();
    info!(
        "starting roster (config_set={}, base_url_set={})",
        cli.config.is_some(),
        cli.base_url.is_some()
    );
    let config = load_config(&cli)?;
    let remote = HttpRemoteResource::from_config(&config.remote)
        .context("failed to build remote resource")?;
    let mut app = RecordApp::from_config(&config, Arc::new(remote));
    if let Some(warning) = load_warning(&app.init().await) {
        eprintln!("{warning}");
    }

    match cli.command {
        Command::List => {
            for item in app.list().items() {
                match &item.id {
                    Some(id) => println!("{id}\t{}", item.label),
                    None => println!("-\t{}", item.label),
                }
            }
        }
        Command::Page => print!("{}", app.page()),
        Command::Add { fields } => {
            let form: Vec<FormElement> = fields
                .into_iter()
                .map(|(name, value)| FormElement::named(name, value))
                .collect();
            let outcome = app.submit(&form).await;
            match &outcome {
                SubmitOutcome::Created(record) => match &record.id {
                    Some(id) => eprintln!("created {} (id={id})", record.name),
                    None => eprintln!("created {}", record.name),
                },
                SubmitOutcome::Invalid(errors) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                }
                SubmitOutcome::PersistFailed(message) => eprintln!("{message}"),
            }
            print!("{}", app.page());
            match outcome {
                SubmitOutcome::Created(_) => {}
                SubmitOutcome::Invalid(errors) => bail!("record rejected: {errors}"),
                SubmitOutcome::PersistFailed(message) => bail!("record not saved: {message}"),
            }
        }
    }
    Ok(())
}
