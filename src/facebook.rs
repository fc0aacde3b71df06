use crate::constants::{
    FACEBOOK_API_VERSION, FACEBOOK_BASE_URL, FB_ACCOUNT_FIELDS, FB_BUSINESS_FIELDS,
    FB_CAMPAIGN_FIELDS, FB_INSIGHT_FIELDS, FB_PERMISSION_ERROR_CODE, FB_PERMISSION_ERROR_RANGE,
};
use crate::models::{ActionEvent, Business, Campaign, DatePreset, InsightsSnapshot};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacebookApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FacebookApiError {
    pub fn is_permission_error(&self) -> bool {
        matches!(self, FacebookApiError::PermissionDenied(_))
    }
}

/// Ad account as it comes off the wire, before the aggregator assigns
/// a provenance tag.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawAdAccount {
    pub id: String,
    pub name: String,
    pub status: String,
    pub business_id: Option<String>,
    pub business_name: Option<String>,
}

/// Read-only queries against the remote ads platform, keyed by an opaque
/// access token supplied per call. The engine never stores a token.
#[async_trait]
pub trait AdsApi: Send + Sync {
    async fn list_businesses(&self, access_token: &str)
        -> Result<Vec<Business>, FacebookApiError>;

    async fn list_owned_ad_accounts(
        &self,
        business_id: &str,
        access_token: &str,
    ) -> Result<Vec<RawAdAccount>, FacebookApiError>;

    async fn list_client_ad_accounts(
        &self,
        business_id: &str,
        access_token: &str,
    ) -> Result<Vec<RawAdAccount>, FacebookApiError>;

    async fn list_personal_ad_accounts(
        &self,
        access_token: &str,
    ) -> Result<Vec<RawAdAccount>, FacebookApiError>;

    async fn list_campaigns(
        &self,
        account_id: &str,
        access_token: &str,
    ) -> Result<Vec<Campaign>, FacebookApiError>;

    async fn get_campaign_insights(
        &self,
        campaign_id: &str,
        date_preset: DatePreset,
        access_token: &str,
    ) -> Result<InsightsSnapshot, FacebookApiError>;
}

pub struct FacebookApi {
    client: Client,
    base_url: String,
}

impl FacebookApi {
    pub fn new() -> Self {
        Self::with_base_url(FACEBOOK_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}/{}", base_url, FACEBOOK_API_VERSION),
        }
    }

    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, FacebookApiError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FacebookApiError::RequestFailed(e.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FacebookApiError::InvalidResponse(e.to_string()))?;

        if let Some(error) = body.get("error") {
            let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            if code == FB_PERMISSION_ERROR_CODE || FB_PERMISSION_ERROR_RANGE.contains(&code) {
                return Err(FacebookApiError::PermissionDenied(message));
            }
            return Err(FacebookApiError::RequestFailed(message));
        }

        Ok(body)
    }
}

#[async_trait]
impl AdsApi for FacebookApi {
    async fn list_businesses(
        &self,
        access_token: &str,
    ) -> Result<Vec<Business>, FacebookApiError> {
        let url = format!("{}/me/businesses", self.base_url);
        let body = self
            .get_json(&url, &[("access_token", access_token), ("fields", FB_BUSINESS_FIELDS)])
            .await?;

        let mut result = Vec::new();
        if let Some(data) = body["data"].as_array() {
            for business in data {
                result.push(Business {
                    id: business["id"].as_str().unwrap_or("").to_string(),
                    name: business["name"].as_str().unwrap_or("").to_string(),
                });
            }
        }
        Ok(result)
    }

    async fn list_owned_ad_accounts(
        &self,
        business_id: &str,
        access_token: &str,
    ) -> Result<Vec<RawAdAccount>, FacebookApiError> {
        let url = format!("{}/{}/owned_ad_accounts", self.base_url, business_id);
        let body = self
            .get_json(&url, &[("access_token", access_token), ("fields", FB_ACCOUNT_FIELDS)])
            .await?;
        Ok(parse_ad_accounts(&body))
    }

    async fn list_client_ad_accounts(
        &self,
        business_id: &str,
        access_token: &str,
    ) -> Result<Vec<RawAdAccount>, FacebookApiError> {
        let url = format!("{}/{}/client_ad_accounts", self.base_url, business_id);
        let body = self
            .get_json(&url, &[("access_token", access_token), ("fields", FB_ACCOUNT_FIELDS)])
            .await?;
        Ok(parse_ad_accounts(&body))
    }

    async fn list_personal_ad_accounts(
        &self,
        access_token: &str,
    ) -> Result<Vec<RawAdAccount>, FacebookApiError> {
        let url = format!("{}/me/adaccounts", self.base_url);
        let body = self
            .get_json(&url, &[("access_token", access_token), ("fields", FB_ACCOUNT_FIELDS)])
            .await?;
        Ok(parse_ad_accounts(&body))
    }

    async fn list_campaigns(
        &self,
        account_id: &str,
        access_token: &str,
    ) -> Result<Vec<Campaign>, FacebookApiError> {
        let url = format!("{}/{}/campaigns", self.base_url, account_id);
        let body = self
            .get_json(&url, &[("access_token", access_token), ("fields", FB_CAMPAIGN_FIELDS)])
            .await?;

        let mut result = Vec::new();
        if let Some(data) = body["data"].as_array() {
            for campaign in data {
                result.push(Campaign {
                    id: campaign["id"].as_str().unwrap_or("").to_string(),
                    name: campaign["name"].as_str().unwrap_or("").to_string(),
                    status: campaign["status"].as_str().unwrap_or("").to_string(),
                    objective: campaign["objective"].as_str().unwrap_or("").to_string(),
                    daily_budget: parse_minor_units(&campaign["daily_budget"]),
                    lifetime_budget: parse_minor_units(&campaign["lifetime_budget"]),
                    budget_remaining: parse_minor_units(&campaign["budget_remaining"]),
                });
            }
        }
        Ok(result)
    }

    async fn get_campaign_insights(
        &self,
        campaign_id: &str,
        date_preset: DatePreset,
        access_token: &str,
    ) -> Result<InsightsSnapshot, FacebookApiError> {
        let url = format!("{}/{}/insights", self.base_url, campaign_id);

        let mut query = vec![("access_token", access_token), ("fields", FB_INSIGHT_FIELDS)];
        // The lifetime window is selected by leaving date_preset out entirely
        if let Some(preset) = date_preset.as_param() {
            query.push(("date_preset", preset));
        }

        let body = self.get_json(&url, &query).await?;

        let row = body
            .get("data")
            .and_then(|d| d.get(0))
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        Ok(InsightsSnapshot {
            spend: parse_number(&row["spend"]),
            impressions: parse_number(&row["impressions"]) as i64,
            reach: parse_number(&row["reach"]) as i64,
            actions: parse_action_list(&row["actions"]),
            cost_per_action_type: parse_action_list(&row["cost_per_action_type"]),
        })
    }
}

// Graph serializes most numeric fields as strings
fn parse_number(value: &serde_json::Value) -> f64 {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0.0)
}

// Budget fields arrive as strings in minor currency units
fn parse_minor_units(value: &serde_json::Value) -> Option<f64> {
    let raw = value
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| value.as_f64())?;
    Some(raw / 100.0)
}

fn parse_action_list(value: &serde_json::Value) -> Vec<ActionEvent> {
    let mut result = Vec::new();
    if let Some(entries) = value.as_array() {
        for entry in entries {
            if let Some(action_type) = entry["action_type"].as_str() {
                result.push(ActionEvent {
                    action_type: action_type.to_string(),
                    value: parse_number(&entry["value"]),
                });
            }
        }
    }
    result
}

fn parse_ad_accounts(body: &serde_json::Value) -> Vec<RawAdAccount> {
    let mut result = Vec::new();
    if let Some(data) = body["data"].as_array() {
        for account in data {
            result.push(RawAdAccount {
                id: account["id"].as_str().unwrap_or("").to_string(),
                name: account["name"].as_str().unwrap_or("").to_string(),
                status: map_account_status(account["account_status"].as_i64().unwrap_or(0)),
                business_id: account["business"]["id"].as_str().map(|s| s.to_string()),
                business_name: account["business"]["name"].as_str().map(|s| s.to_string()),
            });
        }
    }
    result
}

fn map_account_status(status: i64) -> String {
    match status {
        1 => "ACTIVE".to_string(),
        2 => "DISABLED".to_string(),
        3 => "UNSETTLED".to_string(),
        _ => "INACTIVE".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_encoded_numbers() {
        assert_eq!(parse_number(&json!("12.5")), 12.5);
        assert_eq!(parse_number(&json!(7)), 7.0);
        assert_eq!(parse_number(&json!(null)), 0.0);
    }

    #[test]
    fn budgets_convert_from_minor_units() {
        assert_eq!(parse_minor_units(&json!("2500")), Some(25.0));
        assert_eq!(parse_minor_units(&json!(null)), None);
    }

    #[test]
    fn ad_accounts_carry_embedded_business_reference() {
        let body = json!({
            "data": [
                {
                    "id": "act_1",
                    "name": "Main",
                    "account_status": 1,
                    "business": {"id": "9", "name": "Acme"}
                },
                {"id": "act_2", "name": "Side", "account_status": 2}
            ]
        });
        let accounts = parse_ad_accounts(&body);
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].business_name.as_deref(), Some("Acme"));
        assert_eq!(accounts[0].status, "ACTIVE");
        assert_eq!(accounts[1].business_name, None);
        assert_eq!(accounts[1].status, "DISABLED");
    }
}
