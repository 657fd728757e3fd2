use anyhow::Result;
use smartsheet_core::{ApiErrorKind, ErrorResult, Model, RetryPolicy, SmartsheetError};
use std::time::Duration;

#[test]
fn test_retry_loop_over_classified_responses() {
    let policy = RetryPolicy::new(Duration::from_secs(10), Duration::from_secs(1));
    let responses = [
        (503, r#"{"errorCode": 4001, "message": "Maintenance"}"#),
        (429, r#"{"errorCode": 4003, "message": "Slow down"}"#),
        (500, r#"{"errorCode": 4004}"#),
    ];

    let mut elapsed = Duration::ZERO;
    let mut delays = Vec::new();
    for (attempt, (status, body)) in responses.iter().enumerate() {
        let err = SmartsheetError::classify(*status, body);
        match policy.next_delay(&err, attempt as u32, elapsed) {
            Some(delay) => {
                elapsed += delay;
                delays.push(delay);
            }
            None => break,
        }
    }

    assert_eq!(
        delays,
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4)
        ]
    );
}

#[test]
fn test_api_error_keeps_decoded_payload() -> Result<()> {
    let err = SmartsheetError::classify(
        400,
        r#"{"errorCode": 1012, "message": "Required object attribute(s) are missing.", "refId": "x1"}"#,
    );
    let api = err.api_error().expect("api error");
    assert_eq!(api.kind(), ApiErrorKind::Generic);
    assert!(!err.should_retry());
    assert_eq!(api.error().ref_id(), Some("x1"));
    assert_eq!(
        api.error().to_json(),
        r#"{"errorCode":1012,"message":"Required object attribute(s) are missing.","refId":"x1"}"#
    );
    Ok(())
}

#[test]
fn test_errors_convert_into_anyhow() {
    fn fetch() -> Result<ErrorResult> {
        Err(SmartsheetError::classify(502, "Bad Gateway"))?
    }

    let err = fetch().unwrap_err();
    assert_eq!(err.to_string(), "internal server error 502: Bad Gateway");
    assert!(err.downcast_ref::<SmartsheetError>().is_some());
}
