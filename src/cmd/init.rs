//! `sheethook init`: write a starter configuration file.
//!
//! The minimal templates map one example tab; the `--full` templates
//! document every key.

use std::path::PathBuf;

use crate::cli::{ConfigFormat, InitArgs};
use crate::error::SheethookError;

pub fn execute(args: &InitArgs) -> Result<(), SheethookError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("sheethook.{}", args.format.extension())));

    if output.exists() {
        return Err(SheethookError::FileExists { path: output });
    }

    std::fs::write(&output, template(&args.format, args.full))?;
    println!("Created {}", output.display());
    Ok(())
}

#[must_use]
pub const fn template(format: &ConfigFormat, full: bool) -> &'static str {
    match (format, full) {
        (ConfigFormat::Yaml, false) => YAML_MINIMAL,
        (ConfigFormat::Yaml, true) => YAML_FULL,
        (ConfigFormat::Json, false) => JSON_MINIMAL,
        (ConfigFormat::Json, true) => JSON_FULL,
        (ConfigFormat::Toml, false) => TOML_MINIMAL,
        (ConfigFormat::Toml, true) => TOML_FULL,
    }
}

const YAML_MINIMAL: &str = r#"# sheethook config: tab name -> webhook URL

webhooks:
  Orders: "https://hooks.example.com/orders"
"#;

const YAML_FULL: &str = r#"# sheethook config
#
# Each submission is forwarded to the webhook mapped to the tab that
# received it. Tabs without an entry are skipped. Tab names are matched
# exactly (case-sensitive, no trimming).

defaults:
  # Webhook request timeout in milliseconds.
  timeout: 30000

webhooks:
  Orders: "https://hooks.example.com/orders"
  # "Sign-ups": "https://hooks.example.com/signups"
  # Contacts: "http://localhost:8080/contacts"
"#;

const JSON_MINIMAL: &str = r#"{
  "webhooks": {
    "Orders": "https://hooks.example.com/orders"
  }
}
"#;

const JSON_FULL: &str = r#"{
  "defaults": {
    "timeout": 30000
  },
  "webhooks": {
    "Orders": "https://hooks.example.com/orders",
    "Sign-ups": "https://hooks.example.com/signups"
  }
}
"#;

const TOML_MINIMAL: &str = r#"# sheethook config: tab name -> webhook URL

[webhooks]
Orders = "https://hooks.example.com/orders"
"#;

const TOML_FULL: &str = r#"# sheethook config
#
# Each submission is forwarded to the webhook mapped to the tab that
# received it. Tabs without an entry are skipped. Tab names are matched
# exactly (case-sensitive, no trimming).

[defaults]
# Webhook request timeout in milliseconds.
timeout = 30000

[webhooks]
Orders = "https://hooks.example.com/orders"
# "Sign-ups" = "https://hooks.example.com/signups"
"#;
