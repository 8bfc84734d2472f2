use super::error::GatewayError;
use crate::shared::api_utils::api_url;
use async_trait::async_trait;
use contracts::dashboards::d402_sales_overview::{
    AggregatedSalesResult, DashboardDataEnvelope, DashboardDataQuery, ResolvedRange,
    AGGREGATED_SALES_FIELDS,
};
use futures::future::{self, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;

/// Source of aggregated sales for a resolved range
#[async_trait(?Send)]
pub trait SalesGateway {
    async fn fetch_sales(&self, range: ResolvedRange)
        -> Result<AggregatedSalesResult, GatewayError>;
}

/// `GET {endpoint}?start=YYYY-MM-DD&end=YYYY-MM-DD` over gloo-net
pub struct HttpSalesGateway {
    endpoint: String,
    timeout_ms: u32,
}

impl HttpSalesGateway {
    pub fn new(api_base: &str, endpoint: &str, timeout_ms: u32) -> Self {
        Self {
            endpoint: api_url(api_base, endpoint),
            timeout_ms,
        }
    }

    pub fn url_for(&self, range: ResolvedRange) -> String {
        let query = DashboardDataQuery::from(range);
        format!(
            "{}?start={}&end={}",
            self.endpoint,
            urlencoding::encode(&query.start),
            urlencoding::encode(&query.end)
        )
    }

    async fn request(&self, range: ResolvedRange) -> Result<AggregatedSalesResult, GatewayError> {
        let url = self.url_for(range);
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !response.ok() {
            return Err(GatewayError::Http(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        parse_dashboard_data(&body)
    }
}

#[async_trait(?Send)]
impl SalesGateway for HttpSalesGateway {
    async fn fetch_sales(
        &self,
        range: ResolvedRange,
    ) -> Result<AggregatedSalesResult, GatewayError> {
        let request = Box::pin(self.request(range));
        let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));

        match future::select(request, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(GatewayError::Timeout(self.timeout_ms)),
        }
    }
}

/// Normalize a response body.
///
/// Accepts `{ "data": { ... } }` and the result inlined at the top level.
pub fn parse_dashboard_data(body: &str) -> Result<AggregatedSalesResult, GatewayError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::Malformed(format!("invalid JSON: {}", e)))?;

    match value {
        Value::Object(map) if map.contains_key("data") => {
            serde_json::from_value::<DashboardDataEnvelope>(Value::Object(map))
                .map(|envelope| envelope.data)
                .map_err(|e| GatewayError::Malformed(e.to_string()))
        }
        Value::Object(map)
            if AGGREGATED_SALES_FIELDS
                .iter()
                .any(|field| map.contains_key(*field)) =>
        {
            serde_json::from_value(Value::Object(map))
                .map_err(|e| GatewayError::Malformed(e.to_string()))
        }
        Value::Object(_) => Err(GatewayError::Malformed(
            "no dashboard fields in response".to_string(),
        )),
        other => Err(GatewayError::Malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
