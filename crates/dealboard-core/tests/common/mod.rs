use dealboard_core::{params::CreateContact, Contact, Crm, CrmBuilder};
use tempfile::TempDir;

/// Helper function to create a test store acting as `anna@example.com`
pub async fn create_test_crm() -> (TempDir, Crm) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let crm = CrmBuilder::new()
        .with_database_path(Some(&db_path))
        .with_user(Some("anna@example.com"))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, crm)
}

/// Adds a contact with just a name
pub async fn add_contact(crm: &Crm, name: &str) -> Contact {
    crm.create_contact(&CreateContact {
        name: name.to_string(),
        ..Default::default()
    })
    .await
    .expect("Failed to create contact")
}
