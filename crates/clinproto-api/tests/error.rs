use clinproto_api::ApiError;
use clinproto_api::error::detail_message;
use reqwest::StatusCode;

#[test]
fn string_detail_is_used_verbatim() {
    let msg = detail_message(StatusCode::NOT_FOUND, r#"{"detail": "Protocol not found"}"#);
    assert_eq!(msg, "Protocol not found");
}

#[test]
fn validation_detail_uses_first_msg() {
    let body = r#"{"detail": [{"msg": "value is not a valid email address"}, {"msg": "second"}]}"#;
    assert_eq!(
        detail_message(StatusCode::UNPROCESSABLE_ENTITY, body),
        "value is not a valid email address"
    );
}

#[test]
fn unparseable_body_falls_back_to_reason() {
    assert_eq!(
        detail_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
        "Internal Server Error"
    );
    assert_eq!(detail_message(StatusCode::FORBIDDEN, r#"{"detail": ""}"#), "Forbidden");
}

#[test]
fn banner_messages() {
    assert_eq!(
        ApiError::SessionExpired.user_message(),
        "Your session has expired. Please sign in again."
    );
    let err = ApiError::Status {
        status: 409,
        message: "Email already registered".to_string(),
    };
    assert_eq!(err.user_message(), "Email already registered");
    assert!(!err.is_not_found());
}
