// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use fitness_dashboard::error::AppError;

#[test]
fn test_is_upstream_matches() {
    assert!(AppError::Upstream("Firestore: unavailable".to_string()).is_upstream());
    assert!(AppError::WriteRejected(vec!["duplicate".to_string()]).is_upstream());
}

#[test]
fn test_is_upstream_no_match() {
    assert!(!AppError::BadRequest("user id must not be empty".to_string()).is_upstream());
    assert!(!AppError::DataIntegrity("workout row 0 has no id".to_string()).is_upstream());
    assert!(!AppError::NotFound("user ghost".to_string()).is_upstream());
}

#[test]
fn test_status_codes() {
    let cases = [
        (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
        (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
        (
            AppError::DataIntegrity("x".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        (AppError::Upstream("x".to_string()), StatusCode::BAD_GATEWAY),
        (
            AppError::WriteRejected(vec!["x".to_string()]),
            StatusCode::BAD_GATEWAY,
        ),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, status) in cases {
        assert_eq!(err.into_response().status(), status);
    }
}

#[test]
fn test_write_rejected_display_joins_errors() {
    let err = AppError::WriteRejected(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(err.to_string(), "Write rejected: a; b");
}
