#[cfg(test)]
mod tests {
    use docsum::{ApiError, AppError, Disposition};

    #[test]
    fn test_status_codes_map_onto_taxonomy() {
        assert_eq!(ApiError::from_status(422, "bad"), ApiError::Validation("bad".into()));
        assert_eq!(ApiError::from_status(400, "bad"), ApiError::Validation("bad".into()));
        assert_eq!(ApiError::from_status(401, "who"), ApiError::Auth("who".into()));
        assert_eq!(ApiError::from_status(403, "no"), ApiError::Forbidden("no".into()));
        assert_eq!(ApiError::from_status(404, "gone"), ApiError::NotFound("gone".into()));
        assert_eq!(
            ApiError::from_status(500, "boom"),
            ApiError::Unknown { status: Some(500), message: "boom".into() }
        );
    }

    #[test]
    fn test_dispositions_follow_error_kind() {
        let cases = [
            (AppError::from(ApiError::Validation("x".into())), Disposition::Inline),
            (AppError::from(ApiError::Auth("x".into())), Disposition::ForceLogout),
            (AppError::from(ApiError::NotFound("x".into())), Disposition::BackToList),
            (AppError::from(ApiError::Forbidden("x".into())), Disposition::BackToList),
            (AppError::from(ApiError::Network("x".into())), Disposition::Retry),
            (AppError::from(ApiError::Timeout), Disposition::Retry),
            (AppError::Precondition("x".into()), Disposition::Blocked),
            (AppError::from(ApiError::Unknown { status: None, message: "x".into() }), Disposition::Fail),
        ];
        for (err, expected) in cases {
            assert_eq!(err.disposition(), expected, "{}", err);
        }
    }

    #[test]
    fn test_unknown_error_message_mentions_status() {
        let err = ApiError::Unknown { status: Some(502), message: "bad gateway".into() };
        assert_eq!(err.to_string(), "Unexpected response (502): bad gateway");
        let err = ApiError::Unknown { status: None, message: "garbled".into() };
        assert_eq!(err.to_string(), "Unexpected response (no status): garbled");
    }
}
