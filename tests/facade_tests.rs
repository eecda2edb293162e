/// Facade tests
///
/// Tests for the chainable query surface: select / insert / update / delete
/// and the filter entry points, all speaking `{data, error}` envelopes.
/// Run with: cargo test --test facade_tests
use calendash::{Record, StoreClient, StoreError};
use serde_json::json;

fn record(value: serde_json::Value) -> Record {
    Record::from_value(value).unwrap()
}

#[tokio::test]
async fn test_insert_roundtrip() {
    let store = StoreClient::ephemeral();

    let inserted = store
        .from("projects")
        .insert(vec![record(json!({
            "name": "Kickoff",
            "type": "Reunião",
            "status": "scheduled"
        }))])
        .await;

    assert!(inserted.is_ok());
    let rows = inserted.data.unwrap();
    assert_eq!(rows.len(), 1);

    let id = rows[0].id().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(rows[0].get("created_at").is_some());

    // A subsequent select returns the record with identical fields.
    let all = store.from("projects").select().await.data.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], rows[0]);
}

#[tokio::test]
async fn test_insert_takes_first_record_only() {
    let store = StoreClient::ephemeral();

    let inserted = store
        .from("products")
        .insert(vec![
            record(json!({"name": "Agenda"})),
            record(json!({"name": "Caneta"})),
        ])
        .await;

    assert_eq!(inserted.data.unwrap().len(), 1);
    let all = store.from("products").select().await.data.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].get("name"), Some(&json!("Agenda")));
}

#[tokio::test]
async fn test_insert_empty_input_is_a_validation_error() {
    let store = StoreClient::ephemeral();
    let response = store.from("projects").insert(Vec::new()).await;
    assert!(matches!(response.error, Some(StoreError::Validation(_))));
}

#[tokio::test]
async fn test_insert_prepends_newest_first() {
    let store = StoreClient::ephemeral();

    store
        .from("projects")
        .insert(vec![record(json!({"id": "old", "name": "Old"}))])
        .await;
    store
        .from("projects")
        .insert(vec![record(json!({"id": "new", "name": "New"}))])
        .await;

    let rows = store.from("projects").select().await.data.unwrap();
    assert_eq!(rows[0].id(), Some("new"));
    assert_eq!(rows[1].id(), Some("old"));
}

#[tokio::test]
async fn test_generated_ids_are_pairwise_distinct() {
    let store = StoreClient::ephemeral();
    let mut ids = std::collections::HashSet::new();

    for _ in 0..10 {
        let rows = store
            .from("clients")
            .insert(vec![record(json!({"name": "Ana"}))])
            .await
            .data
            .unwrap();
        ids.insert(rows[0].id().unwrap().to_string());
    }

    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn test_supplied_id_and_timestamp_are_kept() {
    let store = StoreClient::ephemeral();

    let rows = store
        .from("projects")
        .insert(vec![record(json!({
            "id": "evt-7",
            "created_at": "2026-03-01T08:00:00Z",
            "name": "Planejamento"
        }))])
        .await
        .data
        .unwrap();

    assert_eq!(rows[0].id(), Some("evt-7"));
    assert_eq!(rows[0].get("created_at"), Some(&json!("2026-03-01T08:00:00Z")));
}

#[tokio::test]
async fn test_update_merges_shallowly() {
    let store = StoreClient::ephemeral();

    store
        .from("clients")
        .insert(vec![record(json!({
            "id": "c1",
            "name": "Ana",
            "salary": 4000
        }))])
        .await;
    store
        .from("clients")
        .insert(vec![record(json!({
            "id": "c2",
            "name": "Bia",
            "salary": 3500
        }))])
        .await;

    let response = store
        .from("clients")
        .update(record(json!({"salary": 5000})))
        .eq("id", "c1")
        .await;

    assert!(response.is_ok());
    // The patch is echoed back as the data row.
    assert_eq!(response.data.unwrap()[0].get("salary"), Some(&json!(5000)));

    let rows = store.from("clients").select().await.data.unwrap();
    let c1 = rows.iter().find(|r| r.id() == Some("c1")).unwrap();
    let c2 = rows.iter().find(|r| r.id() == Some("c2")).unwrap();

    assert_eq!(c1.get("salary"), Some(&json!(5000)));
    assert_eq!(c1.get("name"), Some(&json!("Ana")));
    assert_eq!(c2.get("salary"), Some(&json!(3500)));
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let store = StoreClient::ephemeral();

    let response = store
        .from("projects")
        .update(record(json!({"name": "x"})))
        .eq("id", "ghost")
        .await;

    assert!(response.data.is_none());
    assert!(matches!(
        response.error,
        Some(StoreError::RecordNotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_on_non_id_column_is_unsupported() {
    let store = StoreClient::ephemeral();

    let response = store
        .from("projects")
        .update(record(json!({"status": "completed"})))
        .eq("name", "Kickoff")
        .await;

    assert_eq!(
        response.error,
        Some(StoreError::UnsupportedFilter("name".to_string()))
    );
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = StoreClient::ephemeral();

    store
        .from("projects")
        .insert(vec![record(json!({"id": "p1", "name": "Kickoff"}))])
        .await;

    let first = store.from("projects").delete().eq("id", "p1").await;
    assert!(first.is_ok());

    // Deleting the same id twice never errors the second time.
    let second = store.from("projects").delete().eq("id", "p1").await;
    assert!(second.is_ok());

    let rows = store.from("projects").select().await.data.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_eq_select_and_single() {
    let store = StoreClient::ephemeral();

    store
        .from("projects")
        .insert(vec![record(json!({"id": "p1", "name": "Kickoff"}))])
        .await;

    let found = store.from("projects").eq("id", "p1").single().await;
    assert_eq!(found.data.unwrap().get("name"), Some(&json!("Kickoff")));

    // The record is still there; the filtered read does not remove it.
    assert_eq!(store.from("projects").select().await.data.unwrap().len(), 1);

    let missing = store.from("projects").eq("id", "nope").select().await;
    assert!(missing.data.is_none());
    assert!(missing.error.is_none());
}

#[tokio::test]
async fn test_eq_delete_shortcut() {
    let store = StoreClient::ephemeral();

    store
        .from("products")
        .insert(vec![record(json!({"id": "prod-1", "name": "Agenda"}))])
        .await;

    let response = store.from("products").eq("id", "prod-1").delete().await;
    assert!(response.is_ok());
    assert!(store.from("products").select().await.data.unwrap().is_empty());
}

#[tokio::test]
async fn test_events_is_an_alias_for_projects() {
    let store = StoreClient::ephemeral();

    store
        .from("events")
        .insert(vec![record(json!({"id": "e1", "name": "Evento"}))])
        .await;

    let rows = store.from("projects").select().await.data.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), Some("e1"));
}

#[tokio::test]
async fn test_unknown_tables_select_empty() {
    let store = StoreClient::ephemeral();

    for table in ["kpis", "analytics", "nonsense"] {
        let response = store.from(table).select().await;
        assert!(response.is_ok());
        assert!(response.data.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_unknown_table_mutations_are_errors() {
    let store = StoreClient::ephemeral();

    let response = store
        .from("kpis")
        .insert(vec![record(json!({"label": "Receita"}))])
        .await;
    assert_eq!(
        response.error,
        Some(StoreError::TableNotFound("kpis".to_string()))
    );
}

#[tokio::test]
async fn test_templates_are_read_only_seed_data() {
    let store = StoreClient::ephemeral();

    let rows = store.from("templates").select().await.data.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("title"), Some(&json!("Calendário Editorial")));

    let response = store
        .from("templates")
        .insert(vec![record(json!({"title": "Novo"}))])
        .await;
    assert_eq!(
        response.error,
        Some(StoreError::ReadOnlyTable("templates".to_string()))
    );

    let delete = store.from("templates").delete().eq("id", "1").await;
    assert_eq!(
        delete.error,
        Some(StoreError::ReadOnlyTable("templates".to_string()))
    );
}

#[tokio::test]
async fn test_transactions_are_derived_from_projects() {
    let store = StoreClient::ephemeral();

    store
        .from("projects")
        .insert(vec![record(json!({"id": "p1", "name": "Projeto"}))])
        .await;

    let rows = store.from("transactions").select().await.data.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&json!("p1")));
    assert_eq!(rows[0].get("type"), Some(&json!("income")));
    assert_eq!(rows[0].get("amount"), Some(&json!(1500.0)));
}

#[tokio::test]
async fn test_column_list_is_ignored() {
    let store = StoreClient::ephemeral();

    store
        .from("clients")
        .insert(vec![record(json!({"id": "c1", "name": "Ana", "salary": 4000}))])
        .await;

    // Full records always come back, whatever the projection asked for.
    let rows = store
        .from("clients")
        .select_columns("name")
        .await
        .data
        .unwrap();
    assert_eq!(rows[0].get("salary"), Some(&json!(4000)));
}

#[tokio::test]
async fn test_gte_order_limit() {
    let store = StoreClient::ephemeral();

    for (id, date) in [
        ("a", "2026-01-01T00:00:00Z"),
        ("b", "2026-02-01T00:00:00Z"),
        ("c", "2026-03-01T00:00:00Z"),
    ] {
        store
            .from("projects")
            .insert(vec![record(json!({"id": id, "created_at": date}))])
            .await;
    }

    let rows = store
        .from("projects")
        .gte("created_at", "2026-02-01T00:00:00Z")
        .order("created_at", false)
        .limit(10)
        .await
        .data
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id(), Some("b"));
    assert_eq!(rows[1].id(), Some("c"));
}

#[tokio::test]
async fn test_neq_order_limit() {
    let store = StoreClient::ephemeral();

    for id in ["a", "b", "c"] {
        let status = if id == "b" { "cancelled" } else { "scheduled" };
        store
            .from("projects")
            .insert(vec![record(json!({"id": id, "status": status}))])
            .await;
    }

    let rows = store
        .from("projects")
        .neq("status", "cancelled")
        .order("id", true)
        .limit(1)
        .await
        .data
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id(), Some("c"));
}

#[tokio::test]
async fn test_example_scenario_insert_then_delete() {
    let store = StoreClient::ephemeral();

    let rows = store
        .from("projects")
        .insert(vec![record(json!({
            "name": "Kickoff",
            "type": "Reunião",
            "status": "scheduled"
        }))])
        .await
        .data
        .unwrap();

    let id = rows[0].id().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(rows[0].get("created_at").is_some());

    let deleted = store.from("projects").delete().eq("id", id.as_str()).await;
    assert!(deleted.is_ok());

    let remaining = store.from("projects").select().await.data.unwrap();
    assert!(remaining.iter().all(|r| r.id() != Some(id.as_str())));
}
