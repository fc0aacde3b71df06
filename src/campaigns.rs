use crate::constants::AD_ACCOUNT_ID_PREFIX;
use crate::facebook::{AdsApi, FacebookApiError};
use crate::models::{Campaign, DatePreset, InsightsSnapshot};
use futures::future::join_all;
use tracing::warn;

// Only operationally relevant campaign states are surfaced
const RETAINED_STATUSES: [&str; 2] = ["ACTIVE", "PAUSED"];

#[derive(Debug, Clone)]
pub struct CampaignWithInsights {
    pub campaign: Campaign,
    pub insights: InsightsSnapshot,
}

/// Callers may supply the bare numeric account id; campaign endpoints
/// require the `act_` prefix.
pub fn normalize_account_id(account_id: &str) -> String {
    if account_id.starts_with(AD_ACCOUNT_ID_PREFIX) {
        account_id.to_string()
    } else {
        format!("{}{}", AD_ACCOUNT_ID_PREFIX, account_id)
    }
}

/// Fetches an account's campaigns narrowed to ACTIVE/PAUSED. Transport
/// errors propagate: a user-initiated campaign load has no safe
/// empty-result interpretation.
pub async fn fetch_campaigns<A: AdsApi + ?Sized>(
    api: &A,
    account_id: &str,
    access_token: &str,
) -> Result<Vec<Campaign>, FacebookApiError> {
    let account_id = normalize_account_id(account_id);
    let campaigns = api.list_campaigns(&account_id, access_token).await?;
    Ok(campaigns
        .into_iter()
        .filter(|c| RETAINED_STATUSES.contains(&c.status.as_str()))
        .collect())
}

/// Resolves one campaign's insights for the window. Never fails: a
/// campaign with unavailable insights still renders with a "no data"
/// view, so any error collapses to a zeroed snapshot.
pub async fn fetch_insights<A: AdsApi + ?Sized>(
    api: &A,
    campaign_id: &str,
    date_preset: DatePreset,
    access_token: &str,
) -> InsightsSnapshot {
    match api
        .get_campaign_insights(campaign_id, date_preset, access_token)
        .await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("No insights for campaign {}: {}", campaign_id, e);
            InsightsSnapshot::default()
        }
    }
}

/// Fetches campaigns then fans out one insight request per campaign,
/// unbounded and concurrent. `join_all` re-joins results in input order,
/// so presentation order matches the campaign listing. The only failure
/// mode is the campaign fetch itself.
pub async fn campaigns_with_insights<A: AdsApi + ?Sized>(
    api: &A,
    account_id: &str,
    date_preset: DatePreset,
    access_token: &str,
) -> Result<Vec<CampaignWithInsights>, FacebookApiError> {
    let campaigns = fetch_campaigns(api, account_id, access_token).await?;

    let fetches = campaigns
        .iter()
        .map(|c| fetch_insights(api, &c.id, date_preset, access_token));
    let snapshots = join_all(fetches).await;

    Ok(campaigns
        .into_iter()
        .zip(snapshots)
        .map(|(campaign, insights)| CampaignWithInsights { campaign, insights })
        .collect())
}
