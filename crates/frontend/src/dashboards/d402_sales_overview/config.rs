use super::chart::MAX_PERIOD_DAYS;
use serde::Deserialize;

/// Defaults embedded in the bundle
const EMBEDDED_CONFIG: &str = include_str!("../../../dashboard.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base: String,
    pub endpoint: String,
    pub default_chart_days: u32,
    /// Choices offered by the chart period selector
    pub chart_periods: Vec<u32>,
    pub top_items_limit: usize,
    pub request_timeout_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            endpoint: "/api/dashboard-data".to_string(),
            default_chart_days: 7,
            chart_periods: vec![7, 14, 30, 90],
            top_items_limit: 10,
            request_timeout_ms: 15_000,
        }
    }
}

/// Per-load overrides read from the page query string
#[derive(Debug, Default, Deserialize)]
struct QueryOverrides {
    api_base: Option<String>,
    chart_days: Option<u32>,
    top: Option<usize>,
    timeout_ms: Option<u32>,
}

impl DashboardConfig {
    /// Apply `?chart_days=..&top=..&timeout_ms=..&api_base=..`; unknown keys are ignored
    pub fn with_query_overrides(mut self, search: &str) -> Self {
        let search = search.trim_start_matches('?');
        if search.is_empty() {
            return self;
        }
        match serde_qs::from_str::<QueryOverrides>(search) {
            Ok(overrides) => {
                if let Some(api_base) = overrides.api_base {
                    self.api_base = api_base;
                }
                if let Some(days) = overrides.chart_days {
                    self.default_chart_days = days;
                }
                if let Some(top) = overrides.top {
                    self.top_items_limit = top;
                }
                if let Some(timeout) = overrides.timeout_ms {
                    self.request_timeout_ms = timeout;
                }
            }
            Err(e) => log::warn!("Ignoring dashboard query overrides: {}", e),
        }
        self.sanitized()
    }

    /// Replace out-of-range values with defaults and keep the default period selectable.
    ///
    /// Periods must lie in `1..=MAX_PERIOD_DAYS`.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let allowed = 1..=MAX_PERIOD_DAYS;
        self.chart_periods.retain(|days| allowed.contains(days));
        if self.chart_periods.is_empty() {
            self.chart_periods = defaults.chart_periods;
        }
        if !allowed.contains(&self.default_chart_days) {
            log::warn!(
                "Chart period {} outside 1..={}, using {}",
                self.default_chart_days,
                MAX_PERIOD_DAYS,
                defaults.default_chart_days
            );
            self.default_chart_days = defaults.default_chart_days;
        }
        if !self.chart_periods.contains(&self.default_chart_days) {
            self.chart_periods.push(self.default_chart_days);
        }
        self.chart_periods.sort_unstable();
        self.chart_periods.dedup();
        if self.top_items_limit == 0 {
            self.top_items_limit = defaults.top_items_limit;
        }
        if self.request_timeout_ms == 0 {
            self.request_timeout_ms = defaults.request_timeout_ms;
        }
        self
    }
}

pub fn parse_config(text: &str) -> Result<DashboardConfig, toml::de::Error> {
    toml::from_str::<DashboardConfig>(text).map(DashboardConfig::sanitized)
}

/// Embedded defaults, then overrides from the current page URL
pub fn load_config() -> DashboardConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid embedded dashboard config, using defaults: {}", e);
            DashboardConfig::default()
        }
    };

    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let config = config.with_query_overrides(&search);
    log::info!("Dashboard config: {:?}", config);
    config
}
