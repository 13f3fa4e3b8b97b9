use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Twilio's timestamp layout, `Thu, 09 Mar 2017 15:04:05 -0700`.
const TIMESTAMP: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

pub const ACCOUNT_CREATED: &str = "Thu, 09 Mar 2017 15:04:05 -0700";

/// The single account the mock server knows about.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub sid: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(sid: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            secret: secret.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub sid: String,
    pub account_sid: String,
    pub to: String,
    pub from: Option<String>,
    pub body: String,
    pub status: String,
    pub date_created: String,
    pub uri: String,
}

/// Twilio error document.
#[derive(Debug)]
pub struct ApiException {
    status: StatusCode,
    code: u32,
    message: String,
}

impl ApiException {
    fn new(status: StatusCode, code: u32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn not_found(path: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            20404,
            format!("The requested resource {path} was not found"),
        )
    }
}

impl IntoResponse for ApiException {
    fn into_response(self) -> Response {
        let body = json!({
            "code": self.code,
            "message": self.message,
            "more_info": format!("https://www.twilio.com/docs/errors/{}", self.code),
            "status": self.status.as_u16(),
        });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Clone)]
struct AppState {
    credentials: Arc<Credentials>,
    messages: Arc<RwLock<Vec<Message>>>,
}

pub fn app(credentials: Credentials) -> Router {
    let state = AppState {
        credentials: Arc::new(credentials),
        messages: Arc::new(RwLock::new(Vec::new())),
    };
    Router::new()
        .route("/{account}", get(get_account))
        .route("/{account}/{*resource}", get(get_resource).post(post_resource))
        .with_state(state)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials)).await
}

pub fn format_timestamp(value: OffsetDateTime) -> String {
    value
        .format(TIMESTAMP)
        .unwrap_or_else(|_| String::from("null"))
}

/// Check Basic credentials and the account segment of the path.
fn authorize(state: &AppState, headers: &HeaderMap, account: &str) -> Result<(), ApiException> {
    let unauthorized = || ApiException::new(StatusCode::UNAUTHORIZED, 20003, "Authenticate");

    let (user, pass) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Basic "))
        .and_then(|encoded| STANDARD.decode(encoded).ok())
        .and_then(|decoded| String::from_utf8(decoded).ok())
        .and_then(|decoded| {
            decoded
                .split_once(':')
                .map(|(user, pass)| (user.to_string(), pass.to_string()))
        })
        .ok_or_else(unauthorized)?;

    if user != state.credentials.sid || pass != state.credentials.secret {
        return Err(unauthorized());
    }
    if account != state.credentials.sid {
        return Err(ApiException::not_found(&format!("/{account}")));
    }
    Ok(())
}

fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn get_account(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiException> {
    let account = segment
        .strip_suffix(".json")
        .ok_or_else(|| ApiException::not_found(&format!("/{segment}")))?;
    authorize(&state, &headers, account)?;

    let sid = &state.credentials.sid;
    Ok(Json(json!({
        "sid": sid,
        "date_created": ACCOUNT_CREATED,
        "date_updated": format_timestamp(OffsetDateTime::now_utc()),
        "friendly_name": "mock@example.com",
        "type": "Full",
        "status": "active",
        "auth_token": state.credentials.secret,
        "uri": format!("/2010-04-01/Accounts/{sid}.json"),
        "subresource_uris": {
            "messages": format!("/2010-04-01/Accounts/{sid}/Messages.json"),
        },
        "owner_account_sid": sid,
    })))
}

async fn get_resource(
    State(state): State<AppState>,
    Path((account, resource)): Path<(String, String)>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiException> {
    authorize(&state, &headers, &account)?;
    let name = resource
        .strip_suffix(".json")
        .ok_or_else(|| ApiException::not_found(&format!("/{account}/{resource}")))?;

    if name == "Messages" {
        let messages = state.messages.read().await;
        return Ok(Json(json!({ "messages": &*messages })).into_response());
    }

    Ok(Json(json!({
        "resource": name,
        "params": params,
        "user_agent": user_agent(&headers),
    }))
    .into_response())
}

async fn post_resource(
    State(state): State<AppState>,
    Path((account, resource)): Path<(String, String)>,
    headers: HeaderMap,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response, ApiException> {
    authorize(&state, &headers, &account)?;
    let name = resource
        .strip_suffix(".json")
        .ok_or_else(|| ApiException::not_found(&format!("/{account}/{resource}")))?;

    if name == "Messages" {
        let message = create_message(&state, &form)?;
        state.messages.write().await.push(message.clone());
        return Ok((StatusCode::CREATED, Json(message)).into_response());
    }

    Ok(Json(json!({
        "resource": name,
        "params": form,
        "user_agent": user_agent(&headers),
    }))
    .into_response())
}

fn create_message(state: &AppState, form: &[(String, String)]) -> Result<Message, ApiException> {
    let field = |key: &str| {
        form.iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
    };
    let to = field("To").ok_or_else(|| {
        ApiException::new(StatusCode::BAD_REQUEST, 21604, "A 'To' phone number is required.")
    })?;
    let body = field("Body").ok_or_else(|| {
        ApiException::new(StatusCode::BAD_REQUEST, 21602, "Message body is required.")
    })?;

    let account_sid = state.credentials.sid.clone();
    let sid = format!("SM{}", Uuid::new_v4().simple());
    Ok(Message {
        uri: format!("/2010-04-01/Accounts/{account_sid}/Messages/{sid}.json"),
        sid,
        account_sid,
        to,
        from: field("From"),
        body,
        status: "queued".to_string(),
        date_created: format_timestamp(OffsetDateTime::now_utc()),
    })
}
