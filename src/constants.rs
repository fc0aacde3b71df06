// API Versions
pub const FACEBOOK_API_VERSION: &str = "v20.0";

// API Base URLs
pub const FACEBOOK_BASE_URL: &str = "https://graph.facebook.com";

// Worker Settings
pub const WORKER_INTERVAL_SECS: u64 = 1800; // 30 minutes

// Ad account ids must carry this prefix on campaign endpoints
pub const AD_ACCOUNT_ID_PREFIX: &str = "act_";

// Facebook API Fields
pub const FB_BUSINESS_FIELDS: &str = "id,name";
pub const FB_ACCOUNT_FIELDS: &str = "id,name,account_status,business";
pub const FB_CAMPAIGN_FIELDS: &str =
    "id,name,status,objective,daily_budget,lifetime_budget,budget_remaining";
pub const FB_INSIGHT_FIELDS: &str = "spend,impressions,reach,actions,cost_per_action_type";

// Graph error codes that mean the token lacks a permission rather than
// the request itself being broken
pub const FB_PERMISSION_ERROR_CODE: i64 = 10;
pub const FB_PERMISSION_ERROR_RANGE: std::ops::RangeInclusive<i64> = 200..=299;
