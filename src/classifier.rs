use crate::models::{ActionEvent, Campaign, CampaignType, ClassifiedCampaign, InsightsSnapshot};

/// Closed enumeration of the action types the engine cares about. The
/// synonym table lives here so a new variant is reviewed in one place
/// instead of string literals spread across call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    LandingPageView,
    IgAccountVisit,
    ProfileVisit,
    OnsiteIgAccountVisit,
    OnsiteProfileVisit,
    LinkClick,
    PostEngagement,
}

/// Profile-visit synonyms in fixed priority order.
pub const PROFILE_VISIT_KINDS: [ActionKind; 4] = [
    ActionKind::IgAccountVisit,
    ActionKind::ProfileVisit,
    ActionKind::OnsiteIgAccountVisit,
    ActionKind::OnsiteProfileVisit,
];

impl ActionKind {
    pub fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "landing_page_view" => Some(ActionKind::LandingPageView),
            "ig_account_visit" => Some(ActionKind::IgAccountVisit),
            "profile_visit" => Some(ActionKind::ProfileVisit),
            "onsite_conversion.ig_account_visit" => Some(ActionKind::OnsiteIgAccountVisit),
            "onsite_conversion.profile_visit" => Some(ActionKind::OnsiteProfileVisit),
            "link_click" => Some(ActionKind::LinkClick),
            "post_engagement" => Some(ActionKind::PostEngagement),
            _ => None,
        }
    }

    pub fn human_label(&self) -> &'static str {
        match self {
            ActionKind::LandingPageView => "page view",
            ActionKind::IgAccountVisit
            | ActionKind::ProfileVisit
            | ActionKind::OnsiteIgAccountVisit
            | ActionKind::OnsiteProfileVisit => "profile visit",
            ActionKind::LinkClick => "link click",
            ActionKind::PostEngagement => "engagement",
        }
    }

    pub fn is_profile_visit(&self) -> bool {
        PROFILE_VISIT_KINDS.contains(self)
    }
}

/// Summed count over all events matching `kind`.
pub fn sum_for_kind(actions: &[ActionEvent], kind: ActionKind) -> f64 {
    actions
        .iter()
        .filter(|a| ActionKind::from_api_name(&a.action_type) == Some(kind))
        .map(|a| a.value)
        .sum()
}

/// Summed count over every profile-visit synonym.
pub fn sum_profile_visits(actions: &[ActionEvent]) -> f64 {
    actions
        .iter()
        .filter(|a| {
            ActionKind::from_api_name(&a.action_type).is_some_and(|k| k.is_profile_visit())
        })
        .map(|a| a.value)
        .sum()
}

/// Infers the campaign type from the shape of its action telemetry.
///
/// Page views alone mean web traffic; profile visits alone mean
/// Instagram. When both appear, the larger summed count wins and an
/// exact tie resolves to Instagram. That tie rule is deliberate and
/// tested, not an artifact of iteration order.
pub fn classify(insights: &InsightsSnapshot) -> CampaignType {
    let page_views = sum_for_kind(&insights.actions, ActionKind::LandingPageView);
    let profile_visits = sum_profile_visits(&insights.actions);

    let has_page_views = insights.actions.iter().any(|a| {
        ActionKind::from_api_name(&a.action_type) == Some(ActionKind::LandingPageView)
    });
    let has_profile_visits = insights.actions.iter().any(|a| {
        ActionKind::from_api_name(&a.action_type).is_some_and(|k| k.is_profile_visit())
    });

    match (has_page_views, has_profile_visits) {
        (true, false) => CampaignType::TrafficWeb,
        (false, true) => CampaignType::Instagram,
        (true, true) => {
            if page_views > profile_visits {
                CampaignType::TrafficWeb
            } else {
                CampaignType::Instagram
            }
        }
        (false, false) => CampaignType::General,
    }
}

pub fn classify_campaign(campaign: Campaign, insights: InsightsSnapshot) -> ClassifiedCampaign {
    let campaign_type = classify(&insights);
    ClassifiedCampaign {
        campaign,
        insights,
        campaign_type,
    }
}
