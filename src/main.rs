//! cbsboard - Terminal CBS Report Dashboard
//!
//! Browse a document of per-stock CBS scores from a file or URL.

use anyhow::{Context, Result};
use cbsboard::render::navigation::SystemNavigator;
use cbsboard::render::ui::{ColorTheme, TerminalUI};
use cbsboard::{Application, LoadState, Settings};
use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::{Env, Target};
use std::fs::File;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("cbsboard")
        .version(cbsboard::VERSION)
        .about("A terminal dashboard for stock report summaries and CBS scores")
        .long_about(
            "cbsboard loads a report document (local path or http(s) URL, optionally gzipped) \
             once and shows summary statistics, a searchable newest-first list of stocks and \
             score category filters. Enter opens the selected stock's detail page.",
        )
        .arg(
            Arg::new("source")
                .help("Report document path or URL [default: data.json]")
                .index(1),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .short('f')
                .value_name("CATEGORY")
                .help("Initial category: all, excellent, good, average or poor"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .short('s')
                .value_name("TERM")
                .help("Initial search term (symbol or name)"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .help("Color theme: default, monochrome or high-contrast"),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .action(ArgAction::SetTrue)
                .help("Print the dashboard as plain text and exit"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Settings file [default: <config dir>/cbsboard/config.toml]"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write log output to FILE (level from RUST_LOG, info by default)"),
        )
}

/// Logging stays off unless asked for; stderr belongs to the alternate screen.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

/// Command-line flags override every other settings layer.
fn resolve_settings<F>(matches: &ArgMatches, env: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = matches.get_one::<PathBuf>("config");
    let mut settings = Settings::load_with_env(config_path.map(PathBuf::as_path), env)?;

    if let Some(source) = matches.get_one::<String>("source") {
        settings.source = source.clone();
    }
    if let Some(filter) = matches.get_one::<String>("filter") {
        settings.initial_filter = filter.parse()?;
    }
    if let Some(search) = matches.get_one::<String>("search") {
        settings.initial_search = search.clone();
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        settings.theme = theme.parse()?;
    }

    settings.validate()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_one::<PathBuf>("log-file"))?;

    let settings = resolve_settings(&matches, |key| std::env::var(key).ok())?;
    log::debug!("effective settings: {:?}", settings);

    let ui_renderer = Box::new(TerminalUI::with_theme(ColorTheme::from_choice(
        settings.theme,
    ))?);
    let mut app = Application::new(&settings, ui_renderer, Box::new(SystemNavigator))?;

    if matches.get_flag("once") {
        let text = app.run_once().await?;
        print!("{}", text);
        if app.dashboard().load_state() == LoadState::Failed {
            anyhow::bail!("failed to load reports from {}", settings.source);
        }
        return Ok(());
    }

    app.run().await?;

    Ok(())
}
