//! Settings document parser
//!
//! Turns a JSON settings document into [`Settings`] fields.
//!
//! The document is parsed as a whole first; a syntax error leaves every
//! field untouched. Once the document is known to be valid JSON the fields
//! are overwritten one by one, each falling back to its zero value when
//! missing or of the wrong type. A root that is not an object reads as an
//! object without any field.

use serde_json::Value;
use yesno_hal::{join, FileStorage};

use super::json;
use super::types::{
    push_truncated, truncated, FontAsset, Settings, WifiCredential, BASE_DIR, FONT_EXTENSION,
    SETTINGS_MAX_DOCUMENT, SETTINGS_MAX_WIFI,
};
use crate::logging::{debug, warn};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Document larger than `SETTINGS_MAX_DOCUMENT`
    TooLarge,
    /// Not valid UTF-8 or not valid JSON
    Malformed,
}

impl Settings {
    /// Parse a settings document into this value
    ///
    /// `storage` is probed for font files and read for the root
    /// certificate (see [`Settings::load_ca`]).
    ///
    /// Only a document that is not valid JSON is an error. Field level
    /// problems are absorbed: missing or mistyped fields take their zero
    /// value, over-long strings and lists are truncated.
    pub fn parse<S: FileStorage>(
        &mut self,
        document: &str,
        storage: &mut S,
    ) -> Result<(), ParseError> {
        if document.len() > SETTINGS_MAX_DOCUMENT {
            warn!(
                "Settings document is {} bytes, limit is {}",
                document.len(),
                SETTINGS_MAX_DOCUMENT
            );
            return Err(ParseError::TooLarge);
        }

        let root: Value = serde_json::from_str(document).map_err(|_| ParseError::Malformed)?;
        if !root.is_object() {
            warn!("Settings document root is not an object");
        }

        self.interval_minutes = json::as_f32(root.get("interval_minutes"));
        self.end_point = truncated(json::as_str(root.get("url")));
        let ca_file = json::as_str(root.get("ca_file"));
        self.ca_file.clear();
        self.ca_file_truncated = !push_truncated(&mut self.ca_file, ca_file);
        if self.ca_file_truncated {
            warn!("Certificate file name {} is too long", ca_file);
        }
        self.keyword = truncated(json::as_str(root.get("keyword")));
        self.is_transmitter = json::as_bool(root.get("is_transmitter"));
        self.enable_description = json::as_bool(root.get("enable_description"));

        self.small_font = resolve_font(json::as_str(root.get("font_small")), storage);
        self.medium_font = resolve_font(json::as_str(root.get("font_medium")), storage);
        self.large_font = resolve_font(json::as_str(root.get("font_large")), storage);

        // Wi-Fi networks, in document order
        let networks = json::as_array(root.get("wifi"));
        if networks.len() > SETTINGS_MAX_WIFI {
            warn!(
                "{} Wi-Fi networks configured, keeping the first {}",
                networks.len(),
                SETTINGS_MAX_WIFI
            );
        }
        self.wifi.clear();
        for network in networks.iter().take(SETTINGS_MAX_WIFI) {
            let credential = WifiCredential {
                ssid: truncated(json::as_str(network.get("ssid"))),
                password: truncated(json::as_str(network.get("password"))),
            };
            // Bounded by take()
            let _ = self.wifi.push(credential);
        }

        // Button labels for transmit mode; slots past the end of the
        // document's list keep their previous label
        let buttons = json::as_array(root.get("button"));
        for (label, button) in self.button_labels.iter_mut().zip(buttons) {
            *label = truncated(json::as_str(button.get("label")));
        }

        self.load_ca(storage);

        Ok(())
    }
}

/// Build the font path and check the card for `<path>.vlw`
fn resolve_font<S: FileStorage>(font: &str, storage: &mut S) -> FontAsset {
    let mut asset = FontAsset::new();
    let complete =
        push_truncated(&mut asset.name, BASE_DIR) && push_truncated(&mut asset.name, font);
    if !complete {
        warn!("Font name {} does not fit the path buffer", font);
        return asset;
    }

    asset.available = match join(&[asset.name.as_str(), FONT_EXTENSION]) {
        Ok(file) => storage.exists(&file),
        Err(_) => false,
    };
    debug!("Font {}: available={}", asset.name.as_str(), asset.available);
    asset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::defaults::{DEFAULT_ROOT_CA, DEFAULT_SETTINGS};
    use crate::settings::types::{
        CaSource, SETTINGS_BUTTON_COUNT, SETTINGS_MAX_PASSWORD, SETTINGS_MAX_SSID,
    };
    use proptest::prelude::*;
    use yesno_hal::{MemoryStorage, NoStorage};

    fn parse(document: &str) -> (Settings, Result<(), ParseError>) {
        let mut settings = Settings::new();
        let result = settings.parse(document, &mut NoStorage);
        (settings, result)
    }

    fn wifi_document(networks: &[(String, String)]) -> String {
        let entries: Vec<String> = networks
            .iter()
            .map(|(ssid, password)| {
                serde_json::json!({ "ssid": ssid, "password": password }).to_string()
            })
            .collect();
        format!(r#"{{"wifi":[{}]}}"#, entries.join(","))
    }

    #[test]
    fn test_parse_default_document() {
        let (settings, result) = parse(DEFAULT_SETTINGS);
        assert_eq!(result, Ok(()));

        assert!(settings.end_point.starts_with("https://script.google.com/"));
        assert_eq!(settings.keyword.as_str(), "");
        assert_eq!(settings.ca_file.as_str(), "rootca.crt");
        assert_eq!(settings.interval_minutes, 2.0);
        assert!(settings.enable_description);
        // The shipped document spells the key "is_transmittrer"
        assert!(!settings.is_transmitter);

        assert_eq!(settings.wifi_count(), 2);
        assert_eq!(settings.wifi[0].ssid.as_str(), "foo");
        assert_eq!(settings.wifi[0].password.as_str(), "hogehoge");
        assert_eq!(settings.wifi[1].ssid.as_str(), "bar");
        assert_eq!(settings.wifi[1].password.as_str(), "fugafuga");

        // Labels hold four bytes of text
        for label in settings.button_labels.iter() {
            assert_eq!(label.as_str(), "Set ");
        }
    }

    #[test]
    fn test_missing_fields_take_zero_values() {
        let (mut settings, _) = parse(DEFAULT_SETTINGS);
        settings.parse("{}", &mut NoStorage).unwrap();

        assert_eq!(settings.end_point.as_str(), "");
        assert_eq!(settings.keyword.as_str(), "");
        assert_eq!(settings.ca_file.as_str(), "");
        assert_eq!(settings.interval_minutes, 0.0);
        assert!(!settings.is_transmitter);
        assert!(!settings.enable_description);
        assert_eq!(settings.wifi_count(), 0);
        assert_eq!(settings.small_font.name.as_str(), "/yesnobutton/");
        assert!(!settings.small_font.available);
    }

    #[test]
    fn test_mistyped_fields_coerce() {
        let (settings, result) = parse(
            r#"{"url": 5, "interval_minutes": "soon", "is_transmitter": 1,
                "enable_description": "yes", "wifi": {"ssid": "x"}, "button": "A"}"#,
        );
        assert_eq!(result, Ok(()));
        assert_eq!(settings.end_point.as_str(), "");
        assert_eq!(settings.interval_minutes, 0.0);
        assert!(settings.is_transmitter);
        assert!(!settings.enable_description);
        assert_eq!(settings.wifi_count(), 0);
    }

    #[test]
    fn test_non_object_root() {
        let (settings, result) = parse("[1, 2, 3]");
        assert_eq!(result, Ok(()));
        assert_eq!(settings.end_point.as_str(), "");
        assert_eq!(settings.wifi_count(), 0);
    }

    #[test]
    fn test_malformed_document_leaves_fields() {
        let (mut settings, _) = parse(DEFAULT_SETTINGS);
        let before = settings.clone();

        assert_eq!(
            settings.parse(r#"{"url":"#, &mut NoStorage),
            Err(ParseError::Malformed)
        );
        assert_eq!(settings, before);
    }

    #[test]
    fn test_oversized_document_rejected() {
        let padding = " ".repeat(SETTINGS_MAX_DOCUMENT);
        let document = format!("{{}}{}", padding);
        let (settings, result) = parse(&document);
        assert_eq!(result, Err(ParseError::TooLarge));
        assert_eq!(settings, Settings::new());
    }

    #[test]
    fn test_wifi_entry_not_an_object() {
        let (settings, _) = parse(r#"{"wifi": ["home", {"ssid": "work"}]}"#);
        assert_eq!(settings.wifi_count(), 2);
        assert_eq!(settings.wifi[0].ssid.as_str(), "");
        assert_eq!(settings.wifi[1].ssid.as_str(), "work");
        assert_eq!(settings.wifi[1].password.as_str(), "");
    }

    #[test]
    fn test_reparse_replaces_wifi_list() {
        let (mut settings, _) = parse(DEFAULT_SETTINGS);
        settings
            .parse(r#"{"wifi":[{"ssid":"only","password":"pw"}]}"#, &mut NoStorage)
            .unwrap();
        assert_eq!(settings.wifi_count(), 1);
        assert_eq!(settings.wifi[0].ssid.as_str(), "only");
    }

    #[test]
    fn test_short_button_list_keeps_later_slots() {
        let (mut settings, _) =
            parse(r#"{"button":[{"label":"A"},{"label":"B"},{"label":"C"},{"label":"D"}]}"#);
        settings
            .parse(r#"{"button":[{"label":"Yes"},{"label":"No"}]}"#, &mut NoStorage)
            .unwrap();

        assert_eq!(settings.button_labels[0].as_str(), "Yes");
        assert_eq!(settings.button_labels[1].as_str(), "No");
        assert_eq!(settings.button_labels[2].as_str(), "C");
        assert_eq!(settings.button_labels[3].as_str(), "D");
    }

    #[test]
    fn test_long_button_list_truncated() {
        let (settings, _) = parse(
            r#"{"button":[{"label":"1"},{"label":"2"},{"label":"3"},{"label":"4"},{"label":"5"}]}"#,
        );
        let labels: Vec<&str> = settings.button_labels.iter().map(|l| l.as_str()).collect();
        assert_eq!(labels, ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_font_availability() {
        let mut card = MemoryStorage::new()
            .with_file("/yesnobutton/small.vlw", [0u8; 4])
            .with_file("/yesnobutton/large", [0u8; 4]);
        let mut settings = Settings::new();
        settings
            .parse(
                r#"{"font_small":"small","font_medium":"","font_large":"large"}"#,
                &mut card,
            )
            .unwrap();

        assert_eq!(settings.small_font.name.as_str(), "/yesnobutton/small");
        assert!(settings.small_font.available);
        assert_eq!(settings.medium_font.name.as_str(), "/yesnobutton/");
        assert!(!settings.medium_font.available);
        // Only the .vlw file counts
        assert!(!settings.large_font.available);
    }

    #[test]
    fn test_font_name_too_long() {
        let name = "f".repeat(200);
        let mut card = MemoryStorage::new();
        let mut settings = Settings::new();
        settings
            .parse(&format!(r#"{{"font_small":"{}"}}"#, name), &mut card)
            .unwrap();
        assert!(!settings.small_font.available);
        assert!(settings.small_font.name.starts_with("/yesnobutton/fff"));
    }

    #[test]
    fn test_parse_loads_certificate() {
        let (settings, _) = parse(DEFAULT_SETTINGS);
        assert_eq!(settings.ca_source, CaSource::Default);
        assert_eq!(settings.root_ca.as_str(), DEFAULT_ROOT_CA);
    }

    proptest! {
        #[test]
        fn prop_wifi_count_is_bounded_and_ordered(
            networks in proptest::collection::vec(("[a-z0-9]{0,12}", "[ -~]{0,12}"), 0..16)
        ) {
            let (settings, result) = parse(&wifi_document(&networks));
            prop_assert_eq!(result, Ok(()));
            prop_assert_eq!(settings.wifi_count(), networks.len().min(SETTINGS_MAX_WIFI));
            for (stored, (ssid, password)) in settings.wifi.iter().zip(networks.iter()) {
                prop_assert_eq!(stored.ssid.as_str(), ssid.as_str());
                prop_assert_eq!(stored.password.as_str(), password.as_str());
            }
        }

        #[test]
        fn prop_credentials_truncated_to_capacity(
            ssid in "[a-zA-Z0-9]{0,200}",
            password in "[a-zA-Z0-9]{0,200}",
        ) {
            let networks = [(ssid.clone(), password.clone())];
            let (settings, _) = parse(&wifi_document(&networks));

            let ssid_len = ssid.len().min(SETTINGS_MAX_SSID - 1);
            let password_len = password.len().min(SETTINGS_MAX_PASSWORD - 1);
            prop_assert_eq!(settings.wifi[0].ssid.as_str(), &ssid[..ssid_len]);
            prop_assert_eq!(settings.wifi[0].password.as_str(), &password[..password_len]);
        }

        #[test]
        fn prop_button_slots_past_list_untouched(count in 0usize..=SETTINGS_BUTTON_COUNT) {
            let labels: Vec<String> = (0..count)
                .map(|i| format!(r#"{{"label":"B{}"}}"#, i))
                .collect();
            let document = format!(r#"{{"button":[{}]}}"#, labels.join(","));

            let mut settings = Settings::new();
            for label in settings.button_labels.iter_mut() {
                *label = truncated("old");
            }
            settings.parse(&document, &mut NoStorage).unwrap();

            for (i, label) in settings.button_labels.iter().enumerate() {
                if i < count {
                    prop_assert_eq!(label.as_str(), format!("B{}", i));
                } else {
                    prop_assert_eq!(label.as_str(), "old");
                }
            }
        }
    }
}
