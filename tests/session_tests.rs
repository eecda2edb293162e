/// Session tests
///
/// The auth stub: any non-empty email signs in, one current user at a time,
/// sign-out discards the session. Run with: cargo test --test session_tests
use calendash::StoreClient;
use calendash::model::{UserPatch, UserRole};

#[tokio::test]
async fn test_signed_out_by_default() {
    let store = StoreClient::ephemeral();
    assert!(!store.auth().is_signed_in().await);
    assert!(store.auth().get_session().await.is_none());
}

#[tokio::test]
async fn test_sign_in_yields_seed_account() {
    let store = StoreClient::ephemeral();

    let user = store
        .auth()
        .sign_in_with_password("whoever@example.com", "any-password")
        .await
        .unwrap();

    assert_eq!(user.name, "Gestor");
    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(user.department.as_deref(), Some("Geral"));
}

#[tokio::test]
async fn test_sign_in_rejects_empty_email() {
    let store = StoreClient::ephemeral();
    assert!(store.auth().sign_in_with_password("", "pw").await.is_err());
}

#[tokio::test]
async fn test_sign_up_then_sign_out() {
    let store = StoreClient::ephemeral();

    let user = store
        .auth()
        .sign_up("pedro@empresa.com", "pw", None)
        .await
        .unwrap();
    assert_eq!(user.name, "pedro");
    assert!(store.auth().is_signed_in().await);

    store.auth().sign_out().await;
    assert!(!store.auth().is_signed_in().await);
}

#[tokio::test]
async fn test_update_user_shallow_merges() {
    let store = StoreClient::ephemeral();
    store.auth().sign_up("ana@x.com", "pw", Some("Ana")).await.unwrap();

    let updated = store
        .auth()
        .update_user(&UserPatch {
            company: Some("Estúdio Ana".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.company.as_deref(), Some("Estúdio Ana"));
    assert_eq!(updated.name, "Ana");
    assert_eq!(updated.email, "ana@x.com");
}

#[tokio::test]
async fn test_get_user_matches_session() {
    let store = StoreClient::ephemeral();
    store.auth().sign_in_with_password("a@b.com", "pw").await.unwrap();

    let via_session = store.auth().get_session().await;
    let via_user = store.auth().get_user().await;
    assert_eq!(via_session, via_user);
}
