use crate::classifier::{sum_for_kind, sum_profile_visits, ActionKind, PROFILE_VISIT_KINDS};
use crate::models::{
    BudgetKind, BudgetSummary, Campaign, CampaignType, ClassifiedCampaign, CostPerResult,
    DerivedMetrics, InsightsSnapshot, Metric,
};

pub fn format_currency(value: f64) -> String {
    format!("${:.2}", value)
}

/// Target action types for the cost-per-result figure, in priority order.
fn candidate_kinds(campaign_type: CampaignType) -> Vec<ActionKind> {
    match campaign_type {
        CampaignType::TrafficWeb => vec![ActionKind::LandingPageView, ActionKind::LinkClick],
        CampaignType::Instagram => {
            let mut kinds = PROFILE_VISIT_KINDS.to_vec();
            kinds.push(ActionKind::LinkClick);
            kinds
        }
        CampaignType::General => {
            let mut kinds = vec![ActionKind::LandingPageView];
            kinds.extend(PROFILE_VISIT_KINDS);
            kinds.push(ActionKind::LinkClick);
            kinds
        }
    }
}

/// Cost-per-result ladder, first match wins:
/// zero spend sentinel, then the pre-computed cost-per-action list, then
/// spend divided by a raw action count, then the no-results sentinel.
fn cost_per_result(campaign_type: CampaignType, insights: &InsightsSnapshot) -> CostPerResult {
    if insights.spend == 0.0 {
        return CostPerResult::NoSpend;
    }

    let candidates = candidate_kinds(campaign_type);

    for kind in &candidates {
        if let Some(entry) = insights
            .cost_per_action_type
            .iter()
            .find(|a| ActionKind::from_api_name(&a.action_type) == Some(*kind))
        {
            return CostPerResult::PerAction(format!(
                "{} / {}",
                format_currency(entry.value),
                kind.human_label()
            ));
        }
    }

    for kind in &candidates {
        if let Some(entry) = insights
            .actions
            .iter()
            .find(|a| ActionKind::from_api_name(&a.action_type) == Some(*kind) && a.value > 0.0)
        {
            return CostPerResult::PerAction(format!(
                "{} / {}",
                format_currency(insights.spend / entry.value),
                kind.human_label()
            ));
        }
    }

    CostPerResult::NoResults
}

/// Type-specific metric subset. Typed campaigns always show their fixed
/// list, zeros included; general campaigns show only the metrics that
/// actually occurred, in fixed candidate order.
fn relevant_metrics(campaign_type: CampaignType, insights: &InsightsSnapshot) -> Vec<Metric> {
    let page_views = sum_for_kind(&insights.actions, ActionKind::LandingPageView);
    let profile_visits = sum_profile_visits(&insights.actions);
    let link_clicks = sum_for_kind(&insights.actions, ActionKind::LinkClick);
    let engagement = sum_for_kind(&insights.actions, ActionKind::PostEngagement);

    let metric = |label: &str, value: f64| Metric {
        label: label.to_string(),
        value,
    };

    match campaign_type {
        CampaignType::TrafficWeb => vec![
            metric("Page Views", page_views),
            metric("Link Clicks", link_clicks),
        ],
        CampaignType::Instagram => vec![
            metric("Profile Visits", profile_visits),
            metric("Link Clicks", link_clicks),
            metric("Engagement", engagement),
        ],
        CampaignType::General => [
            metric("Page Views", page_views),
            metric("Profile Visits", profile_visits),
            metric("Link Clicks", link_clicks),
            metric("Engagement", engagement),
        ]
        .into_iter()
        .filter(|m| m.value > 0.0)
        .collect(),
    }
}

fn budget_summary(campaign: &Campaign, insights: &InsightsSnapshot) -> BudgetSummary {
    let (budget, kind) = if let Some(daily) = campaign.daily_budget {
        (Some(daily), BudgetKind::Daily)
    } else if let Some(lifetime) = campaign.lifetime_budget {
        (Some(lifetime), BudgetKind::Lifetime)
    } else {
        (None, BudgetKind::Unavailable)
    };

    BudgetSummary {
        budget,
        spent: insights.spend,
        // Never derived by subtraction: partial-day spend and pacing make
        // budget minus spend unreliable, only an explicit figure counts
        remaining: campaign.budget_remaining,
        kind,
    }
}

pub fn derive(classified: &ClassifiedCampaign) -> DerivedMetrics {
    DerivedMetrics {
        cost_per_result: cost_per_result(classified.campaign_type, &classified.insights),
        relevant_metrics: relevant_metrics(classified.campaign_type, &classified.insights),
        budget: budget_summary(&classified.campaign, &classified.insights),
    }
}
