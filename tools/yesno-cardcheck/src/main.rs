//! Host-side SD card checker
//!
//! Loads the settings from a directory holding a copy of the card, the same
//! way the device does at startup, and prints what the device would use.
//! Run without `--card` to see what the device does with no card inserted.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::warn;
use yesno_core::settings::{CaSource, Fallback, FontAsset, Settings, BASE_DIR, SETTINGS_FILE};
use yesno_hal::NoStorage;
use yesno_hal_std::DirectoryStorage;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Check the settings on a YesNo button SD card",
    long_about = None
)]
struct Cli {
    /// Directory holding a copy of the card; omit to simulate no card
    #[arg(long, value_name = "DIR")]
    card: Option<PathBuf>,

    /// Print the resolved settings as JSON (secrets omitted)
    #[arg(long)]
    json: bool,

    /// Log every loader step
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.card {
        Some(root) => {
            if !root.exists() {
                bail!("card directory {} does not exist", root.display());
            }
            if !root.join(BASE_DIR.trim_matches('/')).is_dir() {
                warn!("{} has no {} directory", root.display(), BASE_DIR);
            }
            Settings::from_storage(&mut DirectoryStorage::new(root))
        }
        None => Settings::from_storage(&mut NoStorage),
    };

    if cli.json {
        let text =
            serde_json::to_string_pretty(&settings).context("failed to serialize settings")?;
        println!("{}", text);
    } else {
        print!("{}", report(&settings));
    }

    Ok(if settings.was_loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Human readable summary of the resolved settings
fn report(settings: &Settings) -> String {
    let mut out = String::new();

    let source = match (settings.was_loaded, settings.fallback) {
        (false, _) => "nothing (compiled-in defaults are broken)".to_string(),
        (true, None) => format!("card ({}{})", BASE_DIR, SETTINGS_FILE),
        (true, Some(reason)) => format!("compiled-in defaults ({})", describe(reason)),
    };
    out.push_str(&format!("Settings:      {}\n", source));
    out.push_str(&format!("Endpoint:      {}\n", settings.end_point));
    out.push_str(&format!(
        "Keyword:       {}\n",
        if settings.keyword.is_empty() { "(none)" } else { "(set)" }
    ));
    out.push_str(&format!(
        "Mode:          {}\n",
        if settings.is_transmitter { "transmitter" } else { "receiver" }
    ));
    out.push_str(&format!("Descriptions:  {}\n", on_off(settings.enable_description)));
    out.push_str(&format!(
        "Interval:      {} min ({} ms)\n",
        settings.interval_minutes,
        settings.interval_milliseconds()
    ));

    out.push_str(&format!("Wi-Fi:         {} network(s)\n", settings.wifi_count()));
    for (i, network) in settings.wifi.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i, network.ssid));
    }

    out.push_str("Buttons:      ");
    for label in settings.button_labels.iter() {
        out.push_str(&format!(" [{}]", label));
    }
    out.push('\n');

    out.push_str(&format!("Font small:    {}\n", font(&settings.small_font)));
    out.push_str(&format!("Font medium:   {}\n", font(&settings.medium_font)));
    out.push_str(&format!("Font large:    {}\n", font(&settings.large_font)));

    let ca = match settings.ca_source {
        CaSource::Storage => format!("{}{}", BASE_DIR, settings.ca_file),
        CaSource::Default => "compiled-in".to_string(),
    };
    out.push_str(&format!(
        "Certificate:   {} ({} bytes)\n",
        ca,
        settings.root_ca.len()
    ));
    out
}

fn describe(reason: Fallback) -> String {
    match reason {
        Fallback::Storage(e) => format!("card: {:?}", e),
        Fallback::Document(e) => format!("document: {:?}", e),
    }
}

fn font(asset: &FontAsset) -> String {
    if asset.available {
        format!("{}.vlw", asset.name)
    } else {
        "unavailable".to_string()
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
