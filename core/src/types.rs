//! Twilio resource records.
//!
//! # Design
//! These are passive data shapes with the field names Twilio uses on the
//! wire. Nothing in the client decodes them automatically; callers pick the
//! shape that matches the resource they requested and call
//! `HttpResponse::json`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;

/// Error resource returned by the API when a request fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exception {
    /// HTTP status of the failed request.
    #[serde(rename = "status", alias = "Status")]
    pub status: u16,
    pub message: String,
    /// Twilio application error code.
    pub code: u32,
    /// Documentation URL for `code`.
    pub more_info: String,
}

/// A single Twilio account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// 34 character identifier of the account.
    pub sid: String,
    pub date_created: Timestamp,
    pub date_updated: Timestamp,
    /// Up to 64 characters; defaults to the owner's email address.
    pub friendly_name: String,
    /// `Trial` or `Full`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `active`, `suspended` or `closed`.
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_token: String,
    /// Path of this resource relative to `https://api.twilio.com`.
    pub uri: String,
    #[serde(default)]
    pub subresource_uris: HashMap<String, String>,
    pub owner_account_sid: String,
}

/// A physical location registered on an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    pub sid: String,
    pub account_sid: String,
    pub friendly_name: String,
    pub customer_name: String,
    pub street: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub iso_country: String,
    pub uri: String,
    pub emergency_enabled: bool,
    /// Whether the address passed local regulatory validation.
    pub validated: bool,
}
