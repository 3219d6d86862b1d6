#[cfg(test)]
mod tests {
    use std::time::Duration;

    use docsum::config::{ClientConfig, DEFAULT_TIMEOUT};
    use docsum::session::SessionStore;
    use docsum::{parse_file_ids, FileRecord, SummaryRecord, UserProfile};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_token_survives_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let token_path = temp_dir.path().join("nested").join("token");

        let session = SessionStore::open(&token_path).await.expect("open");
        assert!(!session.is_authenticated().await);
        session.create_session("abc123").await.expect("create");

        let reopened = SessionStore::open(&token_path).await.expect("reopen");
        assert_eq!(reopened.token().await.as_deref(), Some("abc123"));

        reopened.destroy_session().await.expect("destroy");
        assert!(!token_path.exists());
        let after_logout = SessionStore::open(&token_path).await.expect("reopen");
        assert!(!after_logout.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_clones_share_session() {
        let session = SessionStore::in_memory();
        let reader = session.clone();

        session.create_session("t").await.expect("create");
        assert!(reader.is_authenticated().await);

        reader.destroy_session().await.expect("destroy");
        assert!(!session.is_authenticated().await);
        // destroying twice is fine
        session.destroy_session().await.expect("destroy again");
    }

    #[test]
    fn test_config_builder_trims_url() {
        let config = ClientConfig::default()
            .with_base_url("https://api.example.com///")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(ClientConfig::default().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_file_record_accepts_naive_timestamps() {
        let json = r#"{"id": 3, "file_name": "a.pdf", "file_path": "storage/1/x_a.pdf",
                       "file_size": 2048, "upload_date": "2024-05-01T12:30:00.123456"}"#;
        let record: FileRecord = serde_json::from_str(json).expect("parse");

        assert_eq!(record.size_bytes, 2048);
        assert_eq!(record.upload_date.to_rfc3339(), "2024-05-01T12:30:00.123456+00:00");
    }

    #[test]
    fn test_summary_ids_are_structured() {
        let json = r#"[
            {"id": 1, "file_ids": "3", "summary_text": "s", "created_at": "2024-05-01T10:00:00Z"},
            {"id": 2, "file_ids": "3,5", "summary_text": "m", "created_at": "2024-05-01T11:00:00"}
        ]"#;
        let summaries: Vec<SummaryRecord> = serde_json::from_str(json).expect("parse");

        assert_eq!(summaries[0].file_ids, vec![3]);
        assert_eq!(summaries[1].file_ids, vec![3, 5]);
        assert!(summaries[0].summarizes_only(3));
        assert!(!summaries[1].summarizes_only(3));
        assert!(summaries[1].is_consolidated());

        let encoded = serde_json::to_value(&summaries[1]).expect("encode");
        assert_eq!(encoded["file_ids"], "3,5");
    }

    #[test]
    fn test_parse_file_ids_rejects_garbage() {
        assert_eq!(parse_file_ids(" 1, 2 ,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_file_ids("").unwrap(), Vec::<i64>::new());
        assert!(parse_file_ids("1,x").is_err());
    }

    #[test]
    fn test_profile_nulls_and_image_url() {
        let json = r#"{"id": 1, "full_name": "Ana Souza", "username": "ana", "email": "a@b.c",
                       "description": null, "profile_image": "storage/profile_images/1/me.png"}"#;
        let profile: UserProfile = serde_json::from_str(json).expect("parse");

        assert_eq!(profile.description, "");
        assert_eq!(
            profile.image_url("http://localhost:8000/").as_deref(),
            Some("http://localhost:8000/storage/profile_images/1/me.png")
        );

        let remote = UserProfile { profile_image_ref: Some("https://cdn/x.png".into()), ..profile.clone() };
        assert_eq!(remote.image_url("http://localhost:8000").as_deref(), Some("https://cdn/x.png"));

        let nameless = UserProfile { full_name: String::new(), ..profile };
        assert_eq!(nameless.initials(), "A");
    }
}
