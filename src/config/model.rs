//! Serde data structures for the sheethook configuration file.
//!
//! Contains [`Config`] (the root), [`Defaults`], and [`WebhookMap`], the
//! read-only tab name to webhook URL mapping. All types derive
//! `Serialize` and `Deserialize` with `deny_unknown_fields` for strict
//! parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const fn default_timeout() -> u64 {
    30_000
}

fn is_default_timeout(v: &u64) -> bool {
    *v == default_timeout()
}

fn is_default_defaults(v: &Defaults) -> bool {
    v.timeout == default_timeout()
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "is_default_defaults")]
    pub defaults: Defaults,

    #[serde(default)]
    pub webhooks: WebhookMap,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Webhook delivery timeout in milliseconds.
    #[serde(
        default = "default_timeout",
        skip_serializing_if = "is_default_timeout"
    )]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

/// Tab name to webhook URL mapping.
///
/// Lookups are exact-match on the tab name. A missing tab is a normal
/// outcome meaning "not wired to any destination".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct WebhookMap(BTreeMap<String, String>);

impl WebhookMap {
    #[must_use]
    pub fn resolve(&self, tab: &str) -> Option<&str> {
        self.0.get(tab).map(String::as_str)
    }

    /// Entries sorted by tab name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WebhookMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> WebhookMap {
        [
            ("Orders", "https://example.com/hook"),
            ("Leads", "https://hooks.example.org/leads"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn resolve_returns_configured_url() {
        let webhooks = map();
        assert_eq!(webhooks.resolve("Orders"), Some("https://example.com/hook"));
        assert_eq!(
            webhooks.resolve("Leads"),
            Some("https://hooks.example.org/leads")
        );
    }

    #[test]
    fn resolve_is_exact_match() {
        let webhooks = map();
        assert_eq!(webhooks.resolve("Unmapped"), None);
        assert_eq!(webhooks.resolve("orders"), None);
        assert_eq!(webhooks.resolve("Orders "), None);
        assert_eq!(webhooks.resolve(""), None);
    }

    #[test]
    fn iter_is_sorted_by_tab() {
        let webhooks = map();
        let tabs: Vec<&str> = webhooks.iter().map(|(tab, _)| tab).collect();
        assert_eq!(tabs, vec!["Leads", "Orders"]);
    }

    #[test]
    fn webhooks_deserialize_as_plain_map() {
        let config: Config =
            serde_json::from_str(r#"{"webhooks": {"Orders": "https://example.com/hook"}}"#)
                .unwrap();
        assert_eq!(config.webhooks.len(), 1);
        assert_eq!(config.defaults.timeout, 30_000);
    }

    #[test]
    fn unknown_fields_rejected() {
        let result = serde_json::from_str::<Config>(r#"{"routes": []}"#);
        assert!(result.is_err());
    }
}
