//! Twilio REST client.
//!
//! # Design
//! `Client` holds the account SID, the secret, the API base URL and a
//! `Transport`. Configuration is fixed after construction; only the transport
//! can be swapped, which is how tests avoid the network. Each call builds its
//! request with `request::build_request` and hands it to the transport. The
//! response comes back untouched, whatever its status.

use std::fmt;
use std::sync::Arc;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::Params;
use crate::request::build_request;
use crate::transport::{Transport, UreqTransport};

/// Root of the Twilio REST API. Account SIDs are appended to this.
pub const API_BASE: &str = "https://api.twilio.com/2010-04-01/Accounts";

pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const ENV_API_BASE: &str = "TWILIO_API_BASE";

/// Blocking client for one Twilio account.
///
/// The SID and secret are either the account's master credentials
/// (Account SID and Auth Token) or a generated API key pair.
#[derive(Clone)]
pub struct Client {
    sid: String,
    secret: String,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Create a client with the default pooled transport and `API_BASE`.
    pub fn new(sid: impl Into<String>, secret: impl Into<String>) -> Result<Self, ClientError> {
        let sid = sid.into();
        let secret = secret.into();
        if sid.is_empty() {
            return Err(ClientError::EmptySid);
        }
        if secret.is_empty() {
            return Err(ClientError::EmptySecret);
        }
        Ok(Self {
            sid,
            secret,
            base_url: API_BASE.to_string(),
            transport: Arc::new(UreqTransport::new()),
        })
    }

    /// Create a client from `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` and the
    /// optional `TWILIO_API_BASE`.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let sid = lookup(ENV_ACCOUNT_SID)
            .ok_or_else(|| ClientError::InvalidConfig(format!("{ENV_ACCOUNT_SID} is not set")))?;
        let secret = lookup(ENV_AUTH_TOKEN)
            .ok_or_else(|| ClientError::InvalidConfig(format!("{ENV_AUTH_TOKEN} is not set")))?;
        let client = Self::new(sid, secret)?;
        Ok(match lookup(ENV_API_BASE) {
            Some(base) if !base.is_empty() => client.with_base_url(base),
            _ => client,
        })
    }

    /// Point the client at another API root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_request(&self, method: HttpMethod, resource: &str, params: &Params) -> HttpRequest {
        build_request(self, method, resource, params)
    }

    /// GET `resource` with `params` as the query string.
    pub fn get(&self, resource: &str, params: &Params) -> Result<HttpResponse, ClientError> {
        self.send(self.build_request(HttpMethod::Get, resource, params))
    }

    /// POST `form` to `resource` as an urlencoded body.
    pub fn post(&self, resource: &str, form: &Params) -> Result<HttpResponse, ClientError> {
        self.send(self.build_request(HttpMethod::Post, resource, form))
    }

    /// Fetch the account resource itself (the account root).
    pub fn account(&self) -> Result<HttpResponse, ClientError> {
        self.get("", &Params::new())
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        Ok(self.transport.execute(request)?)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("sid", &self.sid)
            .field("secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
