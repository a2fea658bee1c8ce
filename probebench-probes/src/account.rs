//! Entity-creation probe: create, fetch back, delete.

use crate::http;
use probebench_core::{MetricRow, Probe, ProbeError};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Configuration for [`EntityCreationProbe`].
#[derive(Debug, Clone)]
pub struct EntityCreationConfig {
    /// Root URL of the identity service, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Application the accounts are created under.
    pub application: String,
    /// Page-size limit for the fetch phase.
    pub limit: usize,
    /// Whether the fetch phase requests link expansion.
    pub expand_links: bool,
    /// Full-request timeout applied to every phase.
    pub timeout: Duration,
}

/// Benchmarks the account lifecycle of an application: create a
/// uniquely-named account, list the application's accounts back, delete the
/// account. Each phase lands in the metric row as whole milliseconds under
/// `create`, `fetch` and `delete`, in that order.
pub struct EntityCreationProbe {
    client: Client,
    config: EntityCreationConfig,
}

impl EntityCreationProbe {
    /// Builds the probe and its HTTP client.
    pub fn new(config: EntityCreationConfig) -> Result<Self, ProbeError> {
        let client = http::build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    fn accounts_url(&self) -> String {
        http::join_url(
            &self.config.base_url,
            &format!("v1/applications/{}/accounts", self.config.application),
        )
    }
}

impl Probe for EntityCreationProbe {
    fn execute(&self) -> Result<MetricRow, ProbeError> {
        let marker = http::unique_marker();
        let mut row = MetricRow::new();

        // create
        let payload = serde_json::json!({
            "username": format!("probe-{marker}"),
            "email": format!("probe-{marker}@load.example.com"),
            "password": format!("Pr0be!{marker}"),
            "givenName": "Probe",
            "surname": format!("Run{marker}"),
        });
        let started = Instant::now();
        let response = self
            .client
            .post(self.accounts_url())
            .json(&payload)
            .send()
            .map_err(|e| http::transport_error("create", e))?;
        let response = http::ensure_success("create", response)?;
        let body: Value = response
            .json()
            .map_err(|e| http::transport_error("create", e))?;
        row.record("create", started.elapsed());

        let href = body
            .get("href")
            .and_then(Value::as_str)
            .ok_or_else(|| ProbeError::operation("create: response carries no href"))?
            .to_string();
        tracing::debug!(href = %href, "account created");

        // fetch
        let mut request = self
            .client
            .get(self.accounts_url())
            .query(&[("limit", self.config.limit.to_string())]);
        if self.config.expand_links {
            request = request.query(&[("expand", "customData")]);
        }
        let started = Instant::now();
        let response = request.send().map_err(|e| http::transport_error("fetch", e))?;
        let response = http::ensure_success("fetch", response)?;
        response
            .bytes()
            .map_err(|e| http::transport_error("fetch", e))?;
        row.record("fetch", started.elapsed());

        // delete
        let started = Instant::now();
        let response = self
            .client
            .delete(href.as_str())
            .send()
            .map_err(|e| http::transport_error("delete", e))?;
        http::ensure_success("delete", response)?;
        row.record("delete", started.elapsed());
        tracing::debug!(href = %href, "account deleted");

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_http::{Response, Server};

    fn probe_for(addr: std::net::SocketAddr) -> EntityCreationProbe {
        EntityCreationProbe::new(EntityCreationConfig {
            base_url: format!("http://{addr}"),
            application: "benchmarks".to_string(),
            limit: 25,
            expand_links: true,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn records_all_three_phases_in_order() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = std::thread::spawn(move || {
            let mut seen = Vec::new();
            for request in server.incoming_requests().take(3) {
                seen.push((request.method().to_string(), request.url().to_string()));
                let body = format!(r#"{{"href":"http://{addr}/v1/accounts/42"}}"#);
                request.respond(Response::from_string(body)).unwrap();
            }
            seen
        });

        let row = probe_for(addr).execute().unwrap();
        let keys: Vec<&str> = row.keys().collect();
        assert_eq!(keys, ["create", "fetch", "delete"]);

        let seen = handle.join().unwrap();
        assert_eq!(seen[0].0, "POST");
        assert_eq!(seen[0].1, "/v1/applications/benchmarks/accounts");
        assert_eq!(seen[1].0, "GET");
        assert!(seen[1].1.contains("limit=25"));
        assert!(seen[1].1.contains("expand=customData"));
        assert_eq!(seen[2].0, "DELETE");
        assert_eq!(seen[2].1, "/v1/accounts/42");
    }

    #[test]
    fn no_expand_omits_the_expansion_parameter() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = std::thread::spawn(move || {
            let mut fetch_url = String::new();
            for (index, request) in server.incoming_requests().take(3).enumerate() {
                if index == 1 {
                    fetch_url = request.url().to_string();
                }
                let body = format!(r#"{{"href":"http://{addr}/v1/accounts/7"}}"#);
                request.respond(Response::from_string(body)).unwrap();
            }
            fetch_url
        });

        let mut probe = probe_for(addr);
        probe.config.expand_links = false;
        probe.execute().unwrap();

        let fetch_url = handle.join().unwrap();
        assert!(!fetch_url.contains("expand"));
    }

    #[test]
    fn server_failure_names_the_phase() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            for request in server.incoming_requests().take(1) {
                request
                    .respond(Response::from_string("oops").with_status_code(500))
                    .unwrap();
            }
        });

        let err = probe_for(addr).execute().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("create:"), "unexpected error: {message}");
    }
}
