//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `Client` over real
//! HTTP with the default `UreqTransport`. Validates URL layout, Basic auth,
//! query and form encoding and timestamp decoding as the server sees them.

use std::net::SocketAddr;

use serde_json::Value;
use twilio_core::{Account, Client, ClientError, Params, Timestamp, TransportError};

const SID: &str = "ACtest";
const SECRET: &str = "secret";

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, mock_server::Credentials::new(SID, SECRET)).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr, secret: &str) -> Client {
    Client::new(SID, secret)
        .unwrap()
        .with_base_url(format!("http://{addr}"))
}

#[test]
fn account_lifecycle() {
    let addr = start_server();
    let client = client(addr, SECRET);

    // Step 1: account root, no parameters.
    let resp = client.account().unwrap();
    assert_eq!(resp.status, 200);
    let account: Account = resp.json().unwrap();
    assert_eq!(account.sid, SID);
    assert_eq!(
        account.date_created,
        Timestamp::decode(mock_server::ACCOUNT_CREATED).unwrap()
    );
    assert!(!account.date_updated.is_zero());

    // Step 2: GET with a query string.
    let params: Params = [("testQuery", "set")].into_iter().collect();
    let resp = client.get("/q", &params).unwrap();
    assert_eq!(resp.status, 200);
    let echo: Value = resp.json().unwrap();
    assert_eq!(echo["resource"], "q");
    assert_eq!(echo["params"], serde_json::json!([["testQuery", "set"]]));
    assert_eq!(echo["user_agent"], twilio_core::user_agent());

    // Step 3: repeated values and escaping survive the trip.
    let params: Params = [("a", "x y"), ("a", "1+1"), ("b", "é")].into_iter().collect();
    let echo: Value = client.get("Things", &params).unwrap().json().unwrap();
    assert_eq!(
        echo["params"],
        serde_json::json!([["a", "x y"], ["a", "1+1"], ["b", "é"]])
    );

    // Step 4: POST a form and read it back.
    let form: Params = [("To", "+15550001"), ("From", "+15550000"), ("Body", "hello & bye")]
        .into_iter()
        .collect();
    let resp = client.post("Messages", &form).unwrap();
    assert_eq!(resp.status, 201);
    let created: Value = resp.json().unwrap();
    assert_eq!(created["to"], "+15550001");
    assert_eq!(created["body"], "hello & bye");
    let date_created = Timestamp::decode(created["date_created"].as_str().unwrap()).unwrap();
    assert!(!date_created.is_zero());

    let list: Value = client.get("Messages", &Params::new()).unwrap().json().unwrap();
    assert_eq!(list["messages"].as_array().unwrap().len(), 1);

    // Step 5: a Twilio error comes back as a response, not an error.
    let resp = client.post("Messages", &Params::new()).unwrap();
    assert_eq!(resp.status, 400);
    let exception = resp.exception().unwrap();
    assert_eq!(exception.code, 21604);
}

#[test]
fn bad_credentials_yield_exception_document() {
    let addr = start_server();
    let client = client(addr, "wrong");

    let resp = client.account().unwrap();
    assert_eq!(resp.status, 401);
    assert!(!resp.is_success());
    let exception = resp.exception().unwrap();
    assert_eq!(exception.status, 401);
    assert_eq!(exception.code, 20003);
    assert_eq!(exception.more_info, "https://www.twilio.com/docs/errors/20003");
}

#[test]
fn connection_refused_is_a_transport_error() {
    // Bind then drop to get a port nothing is listening on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client(addr, SECRET);

    let err = client.account().unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::Request(_))));
}
