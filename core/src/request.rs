//! Construction of outbound Twilio requests.
//!
//! Every resource lives under the account root:
//! `{base_url}/{sid}{resource}.json`. GET requests append the encoded
//! parameters as a query string; POST requests carry them as a form body.
//! Building a request performs no I/O.

use std::sync::LazyLock;

use crate::client::Client;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::{format_query, Params};

/// Version of this library, as reported in the `user-agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "Twilio/{VERSION} (github.com/theckman/houston/twilio) ureq ({}; {})",
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
});

/// `user-agent` value sent with every request.
pub fn user_agent() -> &'static str {
    USER_AGENT.as_str()
}

/// Make `resource` start with `/`. The empty string (account root) is kept.
pub fn format_resource(resource: &str) -> String {
    if resource.is_empty() || resource.starts_with('/') {
        return resource.to_string();
    }
    format!("/{resource}")
}

/// Build a request for `resource` relative to the client's account root.
pub fn build_request(
    client: &Client,
    method: HttpMethod,
    resource: &str,
    params: &Params,
) -> HttpRequest {
    let target = format!(
        "{}/{}{}.json",
        client.base_url(),
        client.sid(),
        format_resource(resource)
    );

    let mut request = match method {
        HttpMethod::Get => HttpRequest::new(method, format!("{target}{}", format_query(params))),
        HttpMethod::Post => {
            let mut request = HttpRequest::new(method, target);
            request.set_header("content-type", FORM_CONTENT_TYPE);
            request.body = Some(params.encode());
            request
        }
    };

    request.set_header("user-agent", user_agent());
    request.set_basic_auth(client.sid(), client.secret());
    request
}
