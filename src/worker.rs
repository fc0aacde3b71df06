use crate::accounts;
use crate::campaigns;
use crate::classifier;
use crate::constants::WORKER_INTERVAL_SECS;
use crate::facebook::{AdsApi, FacebookApiError};
use crate::metrics;
use crate::models::DatePreset;
use tokio::time::{self, Duration};
use tracing::{error, info};

pub const WORKER_INTERVAL: Duration = Duration::from_secs(WORKER_INTERVAL_SECS);

/// Periodic report harness: discover accounts, pull each account's
/// campaigns with insights, classify and derive, log the result.
pub struct ReportWorker<A: AdsApi> {
    api: A,
    date_preset: DatePreset,
}

impl<A: AdsApi> ReportWorker<A> {
    pub fn new(api: A, date_preset: DatePreset) -> Self {
        Self { api, date_preset }
    }

    pub async fn run_cycle(&self, access_token: &str) -> Result<(), FacebookApiError> {
        let discovery = accounts::discover(&self.api, access_token).await?;
        info!(
            "Discovered {} ad accounts across {} businesses",
            discovery.ad_accounts.len(),
            discovery.businesses.len()
        );

        for account in &discovery.ad_accounts {
            let rows = match campaigns::campaigns_with_insights(
                &self.api,
                &account.id,
                self.date_preset,
                access_token,
            )
            .await
            {
                Ok(rows) => rows,
                Err(e) => {
                    error!("Failed to load campaigns for account {}: {}", account.id, e);
                    continue;
                }
            };

            for row in rows {
                let classified = classifier::classify_campaign(row.campaign, row.insights);
                let derived = metrics::derive(&classified);
                info!(
                    "Account {} | {} [{:?}] | cost per result: {} | spend: {}",
                    account.id,
                    classified.campaign.name,
                    classified.campaign_type,
                    derived.cost_per_result,
                    metrics::format_currency(derived.budget.spent)
                );
            }
        }

        Ok(())
    }

    pub async fn run(&self, access_token: &str) -> Result<(), FacebookApiError> {
        loop {
            if let Err(e) = self.run_cycle(access_token).await {
                error!("Report cycle failed: {}", e);
            }
            time::sleep(WORKER_INTERVAL).await;
        }
    }
}
