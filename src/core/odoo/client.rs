//! Authenticated Odoo client.
//!
//! One client is shared by every tool. The session id (uid) is established
//! on first use and reused afterwards; a failed authentication is not cached.

use std::sync::Arc;

use serde_json::{Map, Value as Json, json};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use super::config::OdooConfig;
use super::domain::Domain;
use super::error::OdooError;
use super::rpc::{HttpRpcTransport, RpcTransport, Service};
use super::xmlrpc::Value;

/// A record as returned by `read`/`search_read`.
pub type Record = Map<String, Json>;

/// Keyword options for `search_read`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub fields: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order: Option<String>,
    pub context: Option<Json>,
}

impl SearchOptions {
    /// Options reading the given fields, without pagination.
    pub fn fields(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn order(mut self, order: Option<String>) -> Self {
        self.order = order;
        self
    }

    fn into_kwargs(self) -> Map<String, Json> {
        let mut kwargs = Map::new();
        if !self.fields.is_empty() {
            kwargs.insert("fields".to_string(), json!(self.fields));
        }
        if let Some(limit) = self.limit {
            kwargs.insert("limit".to_string(), json!(limit));
        }
        if let Some(offset) = self.offset {
            kwargs.insert("offset".to_string(), json!(offset));
        }
        if let Some(order) = self.order {
            kwargs.insert("order".to_string(), json!(order));
        }
        if let Some(context) = self.context {
            kwargs.insert("context".to_string(), context);
        }
        kwargs
    }
}

/// Client for the Odoo external API.
pub struct OdooClient {
    config: OdooConfig,
    transport: Arc<dyn RpcTransport>,
    uid: OnceCell<i64>,
}

impl OdooClient {
    /// Create a client speaking XML-RPC over HTTP.
    pub fn new(config: OdooConfig) -> Result<Self, OdooError> {
        let transport = Arc::new(HttpRpcTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client over an explicit transport.
    pub fn with_transport(config: OdooConfig, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            config,
            transport,
            uid: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &OdooConfig {
        &self.config
    }

    /// Call `common.authenticate` and return the uid.
    ///
    /// A falsy answer (`false` or `0`) means the credentials were rejected.
    #[instrument(skip(self), fields(db = %self.config.db, user = %self.config.username))]
    pub async fn authenticate(&self) -> Result<i64, OdooError> {
        let params = vec![
            Value::from(self.config.db.as_str()),
            Value::from(self.config.username.as_str()),
            Value::from(self.config.password.as_str()),
            Value::Struct(Default::default()),
        ];
        let result = self
            .transport
            .call(Service::Common, "authenticate", params)
            .await?;

        if !result.is_truthy() {
            warn!("Odoo rejected the credentials");
            return Err(OdooError::authentication(format!(
                "invalid credentials for '{}' on database '{}'",
                self.config.username, self.config.db
            )));
        }

        let uid = result.as_i64().ok_or_else(|| {
            OdooError::protocol(format!("authenticate returned a non-integer uid: {:?}", result))
        })?;
        info!(uid, "Authenticated with Odoo");
        Ok(uid)
    }

    /// The session uid, authenticating on first use.
    pub async fn uid(&self) -> Result<i64, OdooError> {
        self.uid
            .get_or_try_init(|| self.authenticate())
            .await
            .copied()
    }

    /// `object.execute_kw` with positional and keyword arguments.
    pub async fn execute_kw(
        &self,
        model: &str,
        method: &str,
        args: Vec<Json>,
        kwargs: Map<String, Json>,
    ) -> Result<Json, OdooError> {
        let uid = self.uid().await?;
        debug!(model, method, args = args.len(), "execute_kw");

        let params = vec![
            Value::from(self.config.db.as_str()),
            Value::Int(uid),
            Value::from(self.config.password.as_str()),
            Value::from(model),
            Value::from(method),
            Value::from(Json::Array(args)),
            Value::from(Json::Object(kwargs)),
        ];
        let result = self
            .transport
            .call(Service::Object, "execute_kw", params)
            .await?;
        Ok(result.into())
    }

    /// `execute_kw` with positional arguments only.
    pub async fn call(&self, model: &str, method: &str, args: Vec<Json>) -> Result<Json, OdooError> {
        self.execute_kw(model, method, args, Map::new()).await
    }

    /// `search_read` returning the matching records.
    pub async fn search_read(
        &self,
        model: &str,
        domain: &Domain,
        options: SearchOptions,
    ) -> Result<Vec<Record>, OdooError> {
        let result = self
            .execute_kw(model, "search_read", vec![domain.to_json()], options.into_kwargs())
            .await?;
        into_records(result)
    }

    /// `search_count` for a domain.
    pub async fn search_count(&self, model: &str, domain: &Domain) -> Result<i64, OdooError> {
        let result = self
            .call(model, "search_count", vec![domain.to_json()])
            .await?;
        result
            .as_i64()
            .ok_or_else(|| OdooError::protocol(format!("search_count returned {}", result)))
    }

    /// `create` a single record and return its id.
    pub async fn create(&self, model: &str, values: Json) -> Result<i64, OdooError> {
        let result = self.call(model, "create", vec![values]).await?;
        match result {
            Json::Array(ids) if ids.len() == 1 => ids[0].as_i64(),
            other => other.as_i64(),
        }
        .ok_or_else(|| OdooError::protocol(format!("create on {} returned no id", model)))
    }

    /// `read` the given fields of records, optionally under a context.
    pub async fn read(
        &self,
        model: &str,
        ids: &[i64],
        fields: &[&str],
        context: Option<Json>,
    ) -> Result<Vec<Record>, OdooError> {
        let mut kwargs = Map::new();
        kwargs.insert("fields".to_string(), json!(fields));
        if let Some(context) = context {
            kwargs.insert("context".to_string(), context);
        }
        let result = self
            .execute_kw(model, "read", vec![json!(ids)], kwargs)
            .await?;
        into_records(result)
    }

    /// `write` values onto records.
    pub async fn write(&self, model: &str, ids: &[i64], values: Json) -> Result<(), OdooError> {
        self.call(model, "write", vec![json!(ids), values]).await?;
        Ok(())
    }
}

fn into_records(result: Json) -> Result<Vec<Record>, OdooError> {
    let Json::Array(items) = result else {
        return Err(OdooError::protocol(format!(
            "expected a list of records, got {}",
            result
        )));
    };
    items
        .into_iter()
        .map(|item| match item {
            Json::Object(record) => Ok(record),
            other => Err(OdooError::protocol(format!(
                "expected a record, got {}",
                other
            ))),
        })
        .collect()
}

/// Helpers for Odoo's loosely typed record fields.
pub mod fields {
    use super::{Json, Record};

    /// Numeric field, treating `false`/missing as zero.
    pub fn float(record: &Record, name: &str) -> f64 {
        record.get(name).and_then(Json::as_f64).unwrap_or(0.0)
    }

    /// Integer field.
    pub fn int(record: &Record, name: &str) -> Option<i64> {
        record.get(name).and_then(Json::as_i64)
    }

    /// Text field; Odoo sends `false` for empty values.
    pub fn text<'a>(record: &'a Record, name: &str) -> Option<&'a str> {
        record.get(name).and_then(Json::as_str)
    }

    /// Many2one field `[id, display_name]`.
    pub fn many2one<'a>(record: &'a Record, name: &str) -> Option<(i64, &'a str)> {
        let pair = record.get(name)?.as_array()?;
        let id = pair.first()?.as_i64()?;
        let label = pair.get(1).and_then(Json::as_str).unwrap_or("");
        Some((id, label))
    }
}
