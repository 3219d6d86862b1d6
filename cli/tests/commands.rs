#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn docsum_cli(temp_dir: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("docsum-cli").expect("binary built");
        cmd.env("DOCSUM_TOKEN_PATH", temp_dir.path().join("token"))
            // nothing listens here, so remote calls fail fast
            .env("DOCSUM_API_URL", "http://127.0.0.1:9")
            .env("DOCSUM_TIMEOUT_SECS", "2")
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_help_lists_commands() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        docsum_cli(&temp_dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("upload").and(predicate::str::contains("consolidate")));
    }

    #[test]
    fn test_status_without_session() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        docsum_cli(&temp_dir)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn test_status_reads_stored_token_and_logout_removes_it() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("token"), "abc").expect("write token");

        docsum_cli(&temp_dir)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged in"));

        docsum_cli(&temp_dir).arg("logout").assert().success();
        assert!(!temp_dir.path().join("token").exists());

        docsum_cli(&temp_dir)
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn test_unreachable_backend_offers_retry() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        docsum_cli(&temp_dir)
            .arg("files")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Connection problem"));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        docsum_cli(&temp_dir)
            .env("DOCSUM_TIMEOUT_SECS", "soon")
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("DOCSUM_TIMEOUT_SECS"));
    }
}
