//! Verify the timestamp codec and request builder against JSON vectors stored
//! in `test-vectors/`.

use std::sync::Arc;

use time::{OffsetDateTime, UtcOffset};
use twilio_core::{
    Client, HttpMethod, HttpRequest, HttpResponse, Params, Timestamp, TimestampError, Transport,
    TransportError,
};

struct Offline;

impl Transport for Offline {
    fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Request("offline".to_string()))
    }
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn instant(unix: i64, offset_minutes: i64) -> OffsetDateTime {
    let offset = UtcOffset::from_whole_seconds((offset_minutes * 60) as i32).unwrap();
    OffsetDateTime::from_unix_timestamp(unix).unwrap().to_offset(offset)
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

#[test]
fn timestamp_encode_vectors() {
    let raw = include_str!("../../test-vectors/timestamps.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["encode"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let ts = Timestamp::new(instant(
            case["unix"].as_i64().unwrap(),
            case["offset_minutes"].as_i64().unwrap(),
        ));
        let result = ts.encode();

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "OutOfRange" => assert!(
                    matches!(err, TimestampError::OutOfRange { .. }),
                    "{name}: expected OutOfRange"
                ),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let out = String::from_utf8(result.unwrap()).unwrap();
            assert_eq!(out, case["expected"].as_str().unwrap(), "{name}: encoded");
            let back = Timestamp::decode(&out).unwrap();
            assert_eq!(back, ts, "{name}: round trip");
        }
    }
}

#[test]
fn timestamp_decode_vectors() {
    let raw = include_str!("../../test-vectors/timestamps.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["decode"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = Timestamp::decode(case["input"].as_str().unwrap());

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "Parse" => assert!(matches!(err, TimestampError::Parse(_)), "{name}: expected Parse"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let ts = result.unwrap();
            assert_eq!(
                ts.into_inner().unix_timestamp(),
                case["unix"].as_i64().unwrap(),
                "{name}: instant"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = Client::new(
        vectors["sid"].as_str().unwrap(),
        vectors["secret"].as_str().unwrap(),
    )
    .unwrap()
    .with_base_url(vectors["base_url"].as_str().unwrap())
    .with_transport(Arc::new(Offline));
    let authorization = vectors["authorization"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let method = parse_method(case["method"].as_str().unwrap());
        let params: Params = case["params"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| {
                let pair = pair.as_array().unwrap();
                (pair[0].as_str().unwrap(), pair[1].as_str().unwrap())
            })
            .collect();

        let req = client.build_request(method, case["resource"].as_str().unwrap(), &params);
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, case["expected_url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.body.as_deref(), case["expected_body"].as_str(), "{name}: body");
        assert_eq!(req.header("authorization"), Some(authorization), "{name}: auth");
        assert_eq!(
            req.header("user-agent"),
            Some(twilio_core::user_agent()),
            "{name}: user agent"
        );

        // Building twice yields the same request.
        let again = client.build_request(method, case["resource"].as_str().unwrap(), &params);
        assert_eq!(again, req, "{name}: deterministic");
    }
}
