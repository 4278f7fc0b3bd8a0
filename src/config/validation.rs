//! Configuration validation with detailed error reporting.
//!
//! The [`validate`] function checks a parsed [`Config`] for blank or
//! padded tab names, empty or malformed webhook URLs, and a zero
//! timeout. Returns a list of [`ValidationError`] values with per-field
//! suggestions. An empty webhook map is valid: every event is a no-op.

use url::Url;

use super::model::Config;
use crate::error::ValidationError;

/// Validate a single tab name. Returns `Ok(())` or a human-readable error.
pub fn validate_tab_name(tab: &str) -> Result<(), String> {
    if tab.trim().is_empty() {
        return Err("tab name cannot be empty".into());
    }
    if tab.trim() != tab {
        return Err("tab name has leading or trailing whitespace".into());
    }
    Ok(())
}

/// Validate a single webhook URL. Returns `Ok(())` or a human-readable error.
pub fn validate_webhook_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("webhook URL cannot be empty".into());
    }
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else {
                Ok(())
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.defaults.timeout == 0 {
        errors.push(ValidationError {
            tab: "(root)".into(),
            field: "defaults.timeout".into(),
            message: "timeout must be greater than zero".into(),
            suggestion: Some("omit it to use the 30000ms default".into()),
        });
    }

    for (tab, url) in config.webhooks.iter() {
        let tab_id = if tab.is_empty() {
            "(empty)".to_string()
        } else {
            format!("'{tab}'")
        };

        if let Err(msg) = validate_tab_name(tab) {
            errors.push(ValidationError {
                tab: tab_id.clone(),
                field: "name".into(),
                message: msg,
                suggestion: if tab.trim().is_empty() {
                    None
                } else {
                    Some(format!("did you mean '{}'?", tab.trim()))
                },
            });
        }

        if let Err(msg) = validate_webhook_url(url) {
            errors.push(ValidationError {
                tab: tab_id,
                field: "url".into(),
                message: msg,
                suggestion: if url.is_empty() || url.contains("://") {
                    None
                } else {
                    Some(format!("did you mean 'https://{url}'?"))
                },
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[must_use]
pub fn format_validation_report(path: &str, config: &Config) -> String {
    let mut lines = vec![format!(
        "  {} tabs, timeout {}ms\n",
        config.webhooks.len(),
        config.defaults.timeout
    )];

    for (tab, url) in config.webhooks.iter() {
        lines.push(format!("  {tab}  -> {url}"));
    }

    format!("{} is valid\n{}", path, lines.join("\n"))
}
