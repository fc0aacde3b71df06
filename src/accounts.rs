use crate::facebook::{AdsApi, FacebookApiError, RawAdAccount};
use crate::models::{AdAccount, Business, Provenance};
use std::collections::HashSet;
use tracing::warn;

/// Everything reachable from one access token, deduplicated.
#[derive(Debug, Clone)]
pub struct AccountDiscovery {
    pub businesses: Vec<Business>,
    pub ad_accounts: Vec<AdAccount>,
}

/// Discovers every ad account reachable from the token across the
/// business-owned, business-client and personal paths, in that order.
///
/// Dedup key is the account id and the first occurrence wins: an account
/// found under a business is never re-tagged by a later business or by the
/// personal pass. The sweep is sequential because that ordering is the
/// contract.
pub async fn discover<A: AdsApi + ?Sized>(
    api: &A,
    access_token: &str,
) -> Result<AccountDiscovery, FacebookApiError> {
    let businesses = match api.list_businesses(access_token).await {
        Ok(businesses) => businesses,
        Err(e) if e.is_permission_error() => {
            warn!("Business listing not permitted for this token: {}", e);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut ad_accounts: Vec<AdAccount> = Vec::new();

    for business in &businesses {
        let owned = api
            .list_owned_ad_accounts(&business.id, access_token)
            .await
            .unwrap_or_else(|e| {
                warn!("Skipping owned accounts of business {}: {}", business.id, e);
                Vec::new()
            });
        for raw in owned {
            push_if_new(
                &mut seen,
                &mut ad_accounts,
                raw,
                Provenance::Owned,
                Some(business.id.clone()),
                Some(business.name.clone()),
            );
        }

        let client = api
            .list_client_ad_accounts(&business.id, access_token)
            .await
            .unwrap_or_else(|e| {
                warn!("Skipping client accounts of business {}: {}", business.id, e);
                Vec::new()
            });
        for raw in client {
            push_if_new(
                &mut seen,
                &mut ad_accounts,
                raw,
                Provenance::Client,
                Some(business.id.clone()),
                Some(format!("{} (Client)", business.name)),
            );
        }
    }

    let personal = api
        .list_personal_ad_accounts(access_token)
        .await
        .unwrap_or_else(|e| {
            warn!("Skipping personal accounts: {}", e);
            Vec::new()
        });
    for raw in personal {
        let business_id = raw.business_id.clone();
        let business_name = raw
            .business_name
            .clone()
            .or_else(|| Some("Personal".to_string()));
        push_if_new(
            &mut seen,
            &mut ad_accounts,
            raw,
            Provenance::Personal,
            business_id,
            business_name,
        );
    }

    Ok(AccountDiscovery {
        businesses,
        ad_accounts,
    })
}

fn push_if_new(
    seen: &mut HashSet<String>,
    ad_accounts: &mut Vec<AdAccount>,
    raw: RawAdAccount,
    provenance: Provenance,
    business_id: Option<String>,
    business_name: Option<String>,
) {
    if !seen.insert(raw.id.clone()) {
        return;
    }
    ad_accounts.push(AdAccount {
        id: raw.id,
        name: raw.name,
        status: raw.status,
        business_id,
        business_name,
        provenance,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Campaign, DatePreset, InsightsSnapshot};
    use async_trait::async_trait;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockAdsApi {
        businesses: Vec<Business>,
        business_failure: Option<BusinessFailure>,
        owned: HashMap<String, Vec<RawAdAccount>>,
        owned_failures: HashSet<String>,
        client: HashMap<String, Vec<RawAdAccount>>,
        personal: Vec<RawAdAccount>,
        personal_fails: bool,
    }

    enum BusinessFailure {
        Permission,
        Hard,
    }

    fn raw(id: &str, name: &str) -> RawAdAccount {
        RawAdAccount {
            id: id.to_string(),
            name: name.to_string(),
            status: "ACTIVE".to_string(),
            business_id: None,
            business_name: None,
        }
    }

    fn business(id: &str, name: &str) -> Business {
        Business {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[async_trait]
    impl AdsApi for MockAdsApi {
        async fn list_businesses(&self, _: &str) -> Result<Vec<Business>, FacebookApiError> {
            match self.business_failure {
                Some(BusinessFailure::Permission) => Err(FacebookApiError::PermissionDenied(
                    "requires business_management".to_string(),
                )),
                Some(BusinessFailure::Hard) => {
                    Err(FacebookApiError::RequestFailed("boom".to_string()))
                }
                None => Ok(self.businesses.clone()),
            }
        }

        async fn list_owned_ad_accounts(
            &self,
            business_id: &str,
            _: &str,
        ) -> Result<Vec<RawAdAccount>, FacebookApiError> {
            if self.owned_failures.contains(business_id) {
                return Err(FacebookApiError::RequestFailed("boom".to_string()));
            }
            Ok(self.owned.get(business_id).cloned().unwrap_or_default())
        }

        async fn list_client_ad_accounts(
            &self,
            business_id: &str,
            _: &str,
        ) -> Result<Vec<RawAdAccount>, FacebookApiError> {
            Ok(self.client.get(business_id).cloned().unwrap_or_default())
        }

        async fn list_personal_ad_accounts(
            &self,
            _: &str,
        ) -> Result<Vec<RawAdAccount>, FacebookApiError> {
            if self.personal_fails {
                return Err(FacebookApiError::RequestFailed("boom".to_string()));
            }
            Ok(self.personal.clone())
        }

        async fn list_campaigns(
            &self,
            _: &str,
            _: &str,
        ) -> Result<Vec<Campaign>, FacebookApiError> {
            Ok(Vec::new())
        }

        async fn get_campaign_insights(
            &self,
            _: &str,
            _: DatePreset,
            _: &str,
        ) -> Result<InsightsSnapshot, FacebookApiError> {
            Ok(InsightsSnapshot::default())
        }
    }

    #[tokio::test]
    async fn first_discovery_path_wins_dedup() {
        let mut api = MockAdsApi::default();
        api.businesses = vec![business("b1", "Business A"), business("b2", "Business B")];
        api.owned.insert("b1".to_string(), vec![raw("111", "Main")]);
        api.client.insert("b2".to_string(), vec![raw("111", "Main")]);
        api.personal = vec![raw("111", "Main"), raw("222", "Side")];

        let discovery = discover(&api, "token").await.unwrap();

        assert_eq!(discovery.ad_accounts.len(), 2);
        let first = &discovery.ad_accounts[0];
        assert_eq!(first.id, "111");
        assert_eq!(first.provenance, Provenance::Owned);
        assert_eq!(first.business_name.as_deref(), Some("Business A"));
        let second = &discovery.ad_accounts[1];
        assert_eq!(second.id, "222");
        assert_eq!(second.provenance, Provenance::Personal);
    }

    #[tokio::test]
    async fn client_accounts_get_suffixed_business_name() {
        let mut api = MockAdsApi::default();
        api.businesses = vec![business("b1", "Agency")];
        api.client.insert("b1".to_string(), vec![raw("333", "Managed")]);

        let discovery = discover(&api, "token").await.unwrap();

        assert_eq!(discovery.ad_accounts.len(), 1);
        assert_eq!(discovery.ad_accounts[0].provenance, Provenance::Client);
        assert_eq!(
            discovery.ad_accounts[0].business_name.as_deref(),
            Some("Agency (Client)")
        );
    }

    #[tokio::test]
    async fn personal_accounts_fall_back_to_literal_personal() {
        let mut api = MockAdsApi::default();
        let mut with_business = raw("444", "Own thing");
        with_business.business_id = Some("b9".to_string());
        with_business.business_name = Some("Embedded Biz".to_string());
        api.personal = vec![with_business, raw("555", "Hobby")];

        let discovery = discover(&api, "token").await.unwrap();

        assert_eq!(
            discovery.ad_accounts[0].business_name.as_deref(),
            Some("Embedded Biz")
        );
        assert_eq!(
            discovery.ad_accounts[1].business_name.as_deref(),
            Some("Personal")
        );
    }

    #[tokio::test]
    async fn permission_denied_business_listing_degrades_to_personal_only() {
        let mut api = MockAdsApi::default();
        api.business_failure = Some(BusinessFailure::Permission);
        api.personal = vec![raw("222", "Side")];

        let discovery = discover(&api, "token").await.unwrap();

        assert!(discovery.businesses.is_empty());
        assert_eq!(discovery.ad_accounts.len(), 1);
        assert_eq!(discovery.ad_accounts[0].provenance, Provenance::Personal);
    }

    #[tokio::test]
    async fn non_permission_business_failure_propagates() {
        let mut api = MockAdsApi::default();
        api.business_failure = Some(BusinessFailure::Hard);

        let result = discover(&api, "token").await;
        assert!(matches!(result, Err(FacebookApiError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn failing_sub_fetch_does_not_abort_the_sweep() {
        let mut api = MockAdsApi::default();
        api.businesses = vec![business("b1", "Business A"), business("b2", "Business B")];
        api.owned_failures.insert("b1".to_string());
        api.client.insert("b1".to_string(), vec![raw("666", "Client acct")]);
        api.owned.insert("b2".to_string(), vec![raw("777", "Owned acct")]);
        api.personal_fails = true;

        let discovery = discover(&api, "token").await.unwrap();

        let ids: Vec<&str> = discovery.ad_accounts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["666", "777"]);
    }
}
