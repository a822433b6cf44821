use serde::{Deserialize, Serialize};

use crate::report::SubscriptionRates;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub organization: OrganizationSettings,
    pub report: ReportSettings,
    #[serde(default)]
    pub subscriptions: SubscriptionRates,
    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OrganizationSettings {
    pub name: String,
    /// Tenant to report on when `--org` is not given
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportSettings {
    pub currency_symbol: String,
    pub output_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
