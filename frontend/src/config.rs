/// Key under which the authenticated flag lives in `localStorage`.
pub const AUTH_STORAGE_KEY: &str = "expense_tracker_auth";

pub const CURRENCY_SYMBOL: &str = "₹";

const DEFAULT_API_BASE_URL: &str = "";
const DEFAULT_FALLBACK_URL: &str = "/notion-data.json";
const DEFAULT_BEARER_TOKEN: &str = "authenticated";

/// Endpoint settings for the remote auth and data API.
///
/// Values are baked in at build time. Set `EXPENSE_VIEWER_API_BASE`,
/// `EXPENSE_VIEWER_FALLBACK_URL` or `EXPENSE_VIEWER_BEARER` while building the
/// wasm bundle to override the defaults. An empty API base means the API is
/// served from the same origin as the app.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub fallback_url: String,
    pub bearer_token: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            bearer_token: DEFAULT_BEARER_TOKEN.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("EXPENSE_VIEWER_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            fallback_url: option_env!("EXPENSE_VIEWER_FALLBACK_URL")
                .map(str::to_string)
                .unwrap_or(defaults.fallback_url),
            bearer_token: option_env!("EXPENSE_VIEWER_BEARER")
                .map(str::to_string)
                .unwrap_or(defaults.bearer_token),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/api/login", self.api_base_url)
    }

    pub fn expenses_url(&self) -> String {
        format!("{}/api/notion", self.api_base_url)
    }

    /// The secondary data subset (card expenses) served by the same endpoint.
    pub fn card_expenses_url(&self) -> String {
        format!("{}/api/notion?type=cc", self.api_base_url)
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.bearer_token)
    }
}
