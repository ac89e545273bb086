// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{Catalog, ConvertRequest, Converter};
use domain::ConversionOutcome;
use infrastructure::{section_extractor, AnkiConnectClient, Config};
use ports::console::{self, ConsoleLog};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cli::args::{Args, Command};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting md2anki with arguments");
    let url = args.url.as_deref();
    let timeout = args.timeout;
    let config_path = args.config.as_deref();

    match args.command {
        Command::InitConfig { force } => {
            let path = config_path
                .map(Path::to_path_buf)
                .or_else(Config::default_path)
                .context("Could not determine config directory")?;
            init_config(&path, force)
        }
        Command::Sections { file, json } => preview_sections(&file, json),
        Command::Decks => {
            let mut catalog = Catalog::new(connect(url, timeout, config_path)?.0);
            print_lines(&catalog.deck_names()?);
            Ok(())
        }
        Command::Models => {
            let mut catalog = Catalog::new(connect(url, timeout, config_path)?.0);
            print_lines(&catalog.model_names()?);
            Ok(())
        }
        Command::Fields { model } => {
            let mut catalog = Catalog::new(connect(url, timeout, config_path)?.0);
            let fields = catalog.field_names(&model)?;
            if fields.is_empty() {
                warn!(model = %model, "No fields found for note type");
            }
            print_lines(&fields);
            Ok(())
        }
        Command::Convert {
            file,
            deck,
            model,
            front,
            back,
            tags,
        } => {
            let (client, config) = connect(url, timeout, config_path)?;
            let defaults = config.defaults;
            let request = ConvertRequest {
                path: file,
                deck: deck.unwrap_or(defaults.deck),
                model: model.unwrap_or(defaults.model),
                front_field: front.unwrap_or(defaults.front_field),
                back_field: back.unwrap_or(defaults.back_field),
                tags: tags.unwrap_or(defaults.tags),
            };
            convert(client, request)
        }
    }
}

/// Load the config file and build a client; command line flags win over the file.
fn connect(
    url: Option<&str>,
    timeout: Option<u64>,
    config_path: Option<&Path>,
) -> Result<(AnkiConnectClient, Config)> {
    // An explicitly named config file has to exist
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Config::default_path().as_deref())?,
    };
    debug!(?config, "Loaded configuration");

    let url = url.map_or_else(|| config.anki.url.clone(), str::to_string);
    let timeout = Duration::from_secs(timeout.unwrap_or(config.anki.timeout_secs));
    debug!(url = %url, ?timeout, "Using AnkiConnect endpoint");
    let client = AnkiConnectClient::new(url, timeout)?;
    Ok((client, config))
}

fn convert(client: AnkiConnectClient, mut request: ConvertRequest) -> Result<()> {
    let mut log = ConsoleLog::new(std::io::stdout());
    let mut converter = Converter::new(client);
    converter.fill_missing_fields(&mut request, &mut log)?;
    let outcome = converter.convert(&request, &mut log)?;

    let notice = console::summarize(&outcome);
    println!("{}", notice);
    match outcome {
        ConversionOutcome::Uploaded(tally) if tally.batch_error.is_some() => {
            bail!("{}", notice.message)
        }
        _ => Ok(()),
    }
}

fn preview_sections(file: &Path, json: bool) -> Result<()> {
    let sections = section_extractor::read_sections(file)?;
    if json {
        let out = serde_json::to_string_pretty(&sections)
            .context("Failed to serialize sections to JSON")?;
        println!("{}", out);
    } else if sections.is_empty() {
        println!("No level 4+ headings found in {}", file.display());
    } else {
        print!("{}", console::render_sections(&sections));
    }
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    Config::create_default(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
