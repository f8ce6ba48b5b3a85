use crm_api::{BatchEmailVisibility, CrmConfig, CrmError, CrmSchema};
use crm_model::CustomerInput;
use std::path::PathBuf;

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn empty_json_gives_defaults() {
    let config = CrmConfig::from_json("{}").unwrap();
    assert_eq!(config, CrmConfig::default());
    assert_eq!(config.batch_email_visibility, BatchEmailVisibility::IncludeAccepted);
    assert!(config.database_path.is_none());
}

#[test]
fn full_json_is_read() {
    let config = CrmConfig::from_json(
        r#"{"database_path": "/tmp/crm.db", "batch_email_visibility": "committed_only"}"#,
    )
    .unwrap();
    assert_eq!(config.database_path, Some(PathBuf::from("/tmp/crm.db")));
    assert_eq!(config.batch_email_visibility, BatchEmailVisibility::CommittedOnly);
}

#[test]
fn unknown_visibility_is_an_error() {
    let err = CrmConfig::from_json(r#"{"batch_email_visibility": "sometimes"}"#).unwrap_err();
    assert!(matches!(err, CrmError::Serialization(_)));
}

#[test]
fn missing_file_is_config_error() {
    let err = CrmConfig::from_file(std::path::Path::new("/nonexistent/crm.json")).unwrap_err();
    assert!(matches!(err, CrmError::Config(_)));
}

#[test]
fn visibility_from_str_accepts_cli_spellings() {
    assert_eq!(
        "committed-only".parse::<BatchEmailVisibility>().unwrap(),
        BatchEmailVisibility::CommittedOnly
    );
    assert_eq!(
        "INCLUDE_ACCEPTED".parse::<BatchEmailVisibility>().unwrap(),
        BatchEmailVisibility::IncludeAccepted
    );
    assert!("whatever".parse::<BatchEmailVisibility>().is_err());
    assert_eq!(BatchEmailVisibility::CommittedOnly.to_string(), "committed-only");
}

// ── Opening ──────────────────────────────────────────────────────

#[test]
fn schema_from_file_config_persists() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("crm.json");
    let db_path = dir.path().join("data").join("crm.db");
    std::fs::write(
        &config_path,
        format!(r#"{{"database_path": {:?}}}"#, db_path.display().to_string()),
    )
    .unwrap();

    let config = CrmConfig::from_file(&config_path).unwrap();
    {
        let schema = CrmSchema::open(&config).unwrap();
        assert!(schema
            .mutation
            .create_customer(CustomerInput::new("Alice", "a@x.com"))
            .unwrap()
            .is_success());
    }

    let reopened = CrmSchema::open(&config).unwrap();
    assert_eq!(reopened.query.customers().unwrap().len(), 1);
}
