//! Client configuration and the per-page bootstrap document embedded by the
//! server as `<script type="application/json" id="asso7-bootstrap">`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::payee::CARD_ACCOUNT;
use crate::rules::RuleTableVersion;

pub const BOOTSTRAP_ELEMENT_ID: &str = "asso7-bootstrap";
pub const ROOT_ELEMENT_ID: &str = "asso7-root";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every API path; empty means same origin
    pub base_url: String,
    /// Account used to validate a concert payment when no popup is shown
    pub default_payment_account: String,
    /// Characters typed before the venue search fires
    pub search_min_chars: usize,
    /// Delay before a suggestion list closes on blur, so clicks still land
    pub blur_hide_delay_ms: u32,
    pub rule_table: RuleTableVersion,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            default_payment_account: CARD_ACCOUNT.to_string(),
            search_min_chars: 1,
            blur_hide_delay_ms: 120,
            rule_table: RuleTableVersion::Current,
        }
    }
}

impl ClientConfig {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Which client the page hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    OperationForm,
    ConcertForm,
    Cachets,
    Archives,
    ConcertsPayments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bootstrap {
    #[serde(default)]
    pub config: ClientConfig,
    pub page: PageKind,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Bootstrap {
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        serde_json::from_str(json).map_err(|e| FormError::InvalidBootstrap(e.to_string()))
    }

    /// Decodes the page-specific payload
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, FormError> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| FormError::InvalidBootstrap(format!("{:?} data: {}", self.page, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CachetsData, OperationFormData};

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let bootstrap = Bootstrap::from_json(
            r#"{"config": {"base_url": "https://asso7.example/"}, "page": "cachets", "data": {"action": "/cachets"}}"#,
        )
        .unwrap();

        assert_eq!(bootstrap.page, PageKind::Cachets);
        assert_eq!(bootstrap.config.default_payment_account, "CB ASSO7");
        assert_eq!(bootstrap.config.search_min_chars, 1);
        assert_eq!(bootstrap.config.rule_table, RuleTableVersion::Current);
        assert_eq!(bootstrap.config.url("/api/lieux"), "https://asso7.example/api/lieux");

        let data: CachetsData = bootstrap.data().unwrap();
        assert_eq!(data.action, "/cachets");
    }

    #[test]
    fn test_legacy_rule_table_is_selectable() {
        let bootstrap =
            Bootstrap::from_json(r#"{"config": {"rule_table": "legacy"}, "page": "operation-form"}"#).unwrap();
        assert_eq!(bootstrap.config.rule_table, RuleTableVersion::Legacy);
    }

    #[test]
    fn test_invalid_bootstrap_is_reported() {
        let err = Bootstrap::from_json(r#"{"page": "unknown"}"#).unwrap_err();
        assert!(matches!(err, FormError::InvalidBootstrap(_)));

        let bootstrap = Bootstrap::from_json(r#"{"page": "operation-form", "data": {}}"#).unwrap();
        let err = bootstrap.data::<OperationFormData>().unwrap_err();
        assert!(matches!(err, FormError::InvalidBootstrap(_)));
    }
}
