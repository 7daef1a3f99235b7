//! XML-RPC transport to Odoo.
//!
//! `RpcTransport` is the seam between the client and the network. The
//! production implementation posts XML over HTTP with reqwest; tests swap in
//! an in-memory transport that records calls.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::config::OdooConfig;
use super::error::OdooError;
use super::xmlrpc::{self, Response, Value};

/// The two Odoo XML-RPC services used by this server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// `/xmlrpc/2/common`: `authenticate`, `version`.
    Common,
    /// `/xmlrpc/2/object`: `execute_kw`.
    Object,
}

impl Service {
    pub fn path(&self) -> &'static str {
        match self {
            Service::Common => "/xmlrpc/2/common",
            Service::Object => "/xmlrpc/2/object",
        }
    }
}

/// Sends one XML-RPC method call and returns its decoded result.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(
        &self,
        service: Service,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, OdooError>;
}

/// XML-RPC over HTTP(S) using a shared reqwest client.
pub struct HttpRpcTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRpcTransport {
    /// Build a transport for the configured server.
    pub fn new(config: &OdooConfig) -> Result<Self, OdooError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("odoo-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
        })
    }
}

#[async_trait]
impl RpcTransport for HttpRpcTransport {
    async fn call(
        &self,
        service: Service,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, OdooError> {
        let url = format!("{}{}", self.base_url, service.path());
        let body = xmlrpc::encode_call(method, &params)?;

        debug!(%url, method, "Sending XML-RPC call");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "XML-RPC endpoint returned an error status");
            return Err(OdooError::transport(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        let text = response.text().await?;
        match xmlrpc::decode_response(&text)? {
            Response::Success(value) => Ok(value),
            Response::Fault(fault) => {
                warn!(method, code = %fault.code, "XML-RPC fault");
                Err(fault.into())
            }
        }
    }
}
