//! Blocking client core for the Twilio REST API.
//!
//! # Overview
//! Builds Basic-authenticated requests against
//! `https://api.twilio.com/2010-04-01/Accounts/{sid}` and dispatches them
//! through a pluggable `Transport`. Parameters travel as a sorted,
//! urlencoded query string (GET) or form body (POST). Timestamps in Twilio
//! payloads use RFC 1123 with a numeric zone and are handled by `Timestamp`.
//!
//! # Design
//! - Request building is pure: `request::build_request` returns an
//!   `HttpRequest` value and never performs I/O.
//! - `Client` holds immutable configuration plus an `Arc<dyn Transport>`, so
//!   one client can be shared between threads.
//! - Responses are returned as-is. Callers decide what a 4xx/5xx means and can
//!   use `HttpResponse::exception` to read Twilio's error document.

pub mod client;
pub mod error;
pub mod http;
pub mod params;
pub mod request;
pub mod timestamp;
pub mod transport;
pub mod types;

pub use client::{Client, API_BASE};
pub use error::{ClientError, TimestampError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use params::{format_query, Params};
pub use request::{build_request, format_resource, user_agent, VERSION};
pub use timestamp::Timestamp;
pub use transport::{Transport, UreqTransport};
pub use types::{Account, Address, Exception};
