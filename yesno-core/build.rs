//! Build script for yesno-core
//!
//! Validates the compiled-in settings document and root certificate, so
//! the fallback used without a card is known to load.

use std::fs;
use std::path::Path;

/// Must match `SETTINGS_MAX_DOCUMENT`
const MAX_DOCUMENT: usize = 4096;

/// Must match `SETTINGS_MAX_CA` (capacity includes a terminator)
const MAX_CA: usize = 2000;

/// Must match `SETTINGS_MAX_WIFI`
const MAX_WIFI: usize = 10;

fn main() {
    validate_settings(Path::new("assets/settings.json"));
    validate_root_ca(Path::new("assets/rootca.crt"));
}

/// Validate the default settings document
fn validate_settings(path: &Path) {
    println!("cargo:rerun-if-changed={}", path.display());

    let content = read(path);
    if content.len() > MAX_DOCUMENT {
        fail(
            "Default settings document too large",
            &[format!("{} bytes, limit is {}", content.len(), MAX_DOCUMENT)],
        );
    }

    let document: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail("Invalid JSON in assets/settings.json", &[e.to_string()]),
    };

    let mut errors = Vec::new();
    let Some(root) = document.as_object() else {
        fail("assets/settings.json must be a JSON object", &[]);
    };

    if !root.get("url").is_some_and(|v| v.is_string()) {
        errors.push("'url' must be a string".to_string());
    }
    if !root.get("interval_minutes").is_some_and(|v| v.is_number()) {
        errors.push("'interval_minutes' must be a number".to_string());
    }
    match root.get("wifi").and_then(|v| v.as_array()) {
        Some(networks) if networks.len() > MAX_WIFI => errors.push(format!(
            "'wifi' lists {} networks, only {} are used",
            networks.len(),
            MAX_WIFI
        )),
        Some(_) => {}
        None => errors.push("'wifi' must be an array".to_string()),
    }
    if !root.get("button").is_some_and(|v| v.is_array()) {
        errors.push("'button' must be an array".to_string());
    }

    if !errors.is_empty() {
        fail("Invalid default settings in assets/settings.json", &errors);
    }

    // The shipped document keeps the historical key spelling
    if root.contains_key("is_transmittrer") && !root.contains_key("is_transmitter") {
        println!(
            "cargo:warning=assets/settings.json sets 'is_transmittrer', which is not read; the default is receive mode"
        );
    }
}

/// Validate the default root certificate
fn validate_root_ca(path: &Path) {
    println!("cargo:rerun-if-changed={}", path.display());

    let content = read(path);
    let mut errors = Vec::new();

    if !content.starts_with("-----BEGIN CERTIFICATE-----") {
        errors.push("does not start with a PEM certificate header".to_string());
    }
    if !content.trim_end().ends_with("-----END CERTIFICATE-----") {
        errors.push("does not end with a PEM certificate footer".to_string());
    }
    if content.len() >= MAX_CA {
        errors.push(format!(
            "{} bytes, at most {} fit the certificate buffer",
            content.len(),
            MAX_CA - 1
        ));
    }

    if !errors.is_empty() {
        fail("Invalid default certificate in assets/rootca.crt", &errors);
    }
}

fn read(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(
            &format!("Failed to read {}", path.display()),
            &[e.to_string()],
        ),
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, details: &[String]) -> ! {
    let mut message = String::new();
    message.push_str("\n╔══════════════════════════════════════════════════════════════════╗\n");
    message.push_str(&format!("║  ERROR: {:<57}║\n", title));
    if !details.is_empty() {
        message.push_str("╠══════════════════════════════════════════════════════════════════╣\n");
        for detail in details {
            for line in detail.lines() {
                let line = if line.chars().count() > 62 {
                    let head: String = line.chars().take(59).collect();
                    format!("{}...", head)
                } else {
                    line.to_string()
                };
                message.push_str(&format!("║  • {:<62}║\n", line));
            }
        }
    }
    message.push_str("╚══════════════════════════════════════════════════════════════════╝\n");
    panic!("{}", message);
}
