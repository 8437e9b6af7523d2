use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::{
    config::{Config, JOURNEY_PLAN_PATH},
    entities::JourneyRequest,
    error::{empty_response_error, upstream_error, Error},
};

#[async_trait]
pub trait RoutingApi {
    async fn plan_journey(&self, request: &JourneyRequest) -> Result<String, Error>;
}

#[derive(Clone, Debug)]
pub struct JourneyPlanner {
    client: reqwest::Client,
    base_url: String,
}

impl JourneyPlanner {
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(config.api_base())
    }
}

#[async_trait]
impl RoutingApi for JourneyPlanner {
    #[tracing::instrument(skip(self))]
    async fn plan_journey(&self, request: &JourneyRequest) -> Result<String, Error> {
        let url = format!(
            "{}{}?Route={}&Format=Miles&TravelMode={}",
            self.base_url,
            JOURNEY_PLAN_PATH,
            encode_component(&request.route),
            request.travel_mode.name()
        );

        let res = self.client.get(url).send().await?;

        let status_code = res.status();

        if !status_code.is_success() {
            return Err(upstream_error(status_code.as_u16()));
        }

        let data = res.text().await?;

        if data.trim().is_empty() {
            return Err(empty_response_error());
        }

        tracing::debug!(bytes = data.len(), "journey data received");

        Ok(data)
    }
}

// Same escaping as a browser's encodeURIComponent: spaces become %20, not `+`.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => encoded.push(byte as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
