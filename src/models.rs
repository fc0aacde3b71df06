use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Business {
    pub id: String,
    pub name: String,
}

/// Discovery path through which an ad account was first found.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Owned,
    Client,
    Personal,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdAccount {
    pub id: String,
    pub name: String,
    pub status: String,
    pub business_id: Option<String>,
    pub business_name: Option<String>,
    pub provenance: Provenance,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: String,
    pub objective: String,
    pub daily_budget: Option<f64>,
    pub lifetime_budget: Option<f64>,
    pub budget_remaining: Option<f64>,
}

/// A named count of user actions attributed to a campaign over one
/// reporting window.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ActionEvent {
    pub action_type: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct InsightsSnapshot {
    pub spend: f64,
    pub impressions: i64,
    pub reach: i64,
    pub actions: Vec<ActionEvent>,
    pub cost_per_action_type: Vec<ActionEvent>,
}

/// Reporting-window selector. `Maximum` means lifetime-to-date and is
/// encoded by omitting the parameter from the request entirely.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePreset {
    #[default]
    Maximum,
    Today,
    Yesterday,
    Last7d,
    Last14d,
    Last30d,
    Last90d,
    ThisMonth,
    LastMonth,
}

impl DatePreset {
    /// Query-parameter value, `None` for the lifetime window.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            DatePreset::Maximum => None,
            DatePreset::Today => Some("today"),
            DatePreset::Yesterday => Some("yesterday"),
            DatePreset::Last7d => Some("last_7d"),
            DatePreset::Last14d => Some("last_14d"),
            DatePreset::Last30d => Some("last_30d"),
            DatePreset::Last90d => Some("last_90d"),
            DatePreset::ThisMonth => Some("this_month"),
            DatePreset::LastMonth => Some("last_month"),
        }
    }
}

impl FromStr for DatePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maximum" => Ok(DatePreset::Maximum),
            "today" => Ok(DatePreset::Today),
            "yesterday" => Ok(DatePreset::Yesterday),
            "last_7d" => Ok(DatePreset::Last7d),
            "last_14d" => Ok(DatePreset::Last14d),
            "last_30d" => Ok(DatePreset::Last30d),
            "last_90d" => Ok(DatePreset::Last90d),
            "this_month" => Ok(DatePreset::ThisMonth),
            "last_month" => Ok(DatePreset::LastMonth),
            other => Err(format!("Unknown date preset: {}", other)),
        }
    }
}

/// Semantic campaign type inferred from the shape of its action telemetry.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CampaignType {
    TrafficWeb,
    Instagram,
    General,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassifiedCampaign {
    pub campaign: Campaign,
    pub insights: InsightsSnapshot,
    pub campaign_type: CampaignType,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum CostPerResult {
    /// The campaign has not spent anything yet.
    NoSpend,
    /// Spend exists but no countable result action was found.
    NoResults,
    /// Formatted currency figure plus the action it is priced against,
    /// e.g. "$1.25 / link click".
    PerAction(String),
}

impl fmt::Display for CostPerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostPerResult::NoSpend => write!(f, "No spend"),
            CostPerResult::NoResults => write!(f, "No results"),
            CostPerResult::PerAction(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetKind {
    Daily,
    Lifetime,
    Unavailable,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BudgetSummary {
    pub budget: Option<f64>,
    pub spent: f64,
    /// Only reported when the source provided an explicit remaining figure.
    /// Budget minus spend is not a reliable estimate under delivery pacing,
    /// so it is never computed here.
    pub remaining: Option<f64>,
    pub kind: BudgetKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub cost_per_result: CostPerResult,
    pub relevant_metrics: Vec<Metric>,
    pub budget: BudgetSummary,
}
