//! Token-acquisition probe: password grant, then verification.

use crate::http;
use probebench_core::{MetricRow, Probe, ProbeError};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Configuration for [`TokenAcquisitionProbe`].
#[derive(Debug, Clone)]
pub struct TokenAcquisitionConfig {
    /// Root URL of the identity service.
    pub base_url: String,
    /// Application the token is issued against.
    pub application: String,
    /// Resource-owner username for the password grant.
    pub username: String,
    /// Resource-owner password for the password grant.
    pub password: String,
    /// Full-request timeout applied to every phase.
    pub timeout: Duration,
}

/// Benchmarks OAuth2 token issuance: acquire an access token via the
/// password grant, then verify it against the application's token endpoint.
/// Phases land in the metric row as `acquire` and `verify`, in that order.
pub struct TokenAcquisitionProbe {
    client: Client,
    config: TokenAcquisitionConfig,
}

impl TokenAcquisitionProbe {
    /// Builds the probe and its HTTP client.
    pub fn new(config: TokenAcquisitionConfig) -> Result<Self, ProbeError> {
        let client = http::build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    fn application_url(&self, suffix: &str) -> String {
        http::join_url(
            &self.config.base_url,
            &format!("v1/applications/{}/{suffix}", self.config.application),
        )
    }
}

impl Probe for TokenAcquisitionProbe {
    fn execute(&self) -> Result<MetricRow, ProbeError> {
        let mut row = MetricRow::new();

        // acquire
        let form = [
            ("grant_type", "password"),
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];
        let started = Instant::now();
        let response = self
            .client
            .post(self.application_url("oauth/token"))
            .form(&form)
            .send()
            .map_err(|e| http::transport_error("acquire", e))?;
        let response = http::ensure_success("acquire", response)?;
        let body: Value = response
            .json()
            .map_err(|e| http::transport_error("acquire", e))?;
        row.record("acquire", started.elapsed());

        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| ProbeError::operation("acquire: response carries no access_token"))?
            .to_string();
        tracing::debug!("access token acquired");

        // verify
        let started = Instant::now();
        let response = self
            .client
            .get(self.application_url(&format!("authTokens/{token}")))
            .send()
            .map_err(|e| http::transport_error("verify", e))?;
        http::ensure_success("verify", response)?;
        row.record("verify", started.elapsed());

        Ok(row)
    }
}
