/// Repository tests
///
/// Typed CRUD over the same store core the facade uses.
/// Run with: cargo test --test repo_tests
use calendash::model::{ClientStatus, PlanTier, ProjectStatus};
use calendash::repo::{ClientPatch, NewClient, ProductPatch, ProjectPatch};
use calendash::{NewProduct, NewProject, Repository, StoreClient, StoreError};

fn new_client(name: &str, salary: f64) -> NewClient {
    NewClient {
        name: name.to_string(),
        email: format!("{}@empresa.com", name.to_lowercase()),
        company: "Design".to_string(),
        role: None,
        phone: None,
        salary: Some(salary),
        status: ClientStatus::Active,
        plan: PlanTier::Pro,
        projects_count: 0,
    }
}

#[tokio::test]
async fn test_project_crud_roundtrip() {
    let store = StoreClient::ephemeral();
    let repo = store.projects();

    let inserted = repo
        .insert(NewProject::scheduled("Kickoff", "Reunião"))
        .await
        .unwrap();
    assert!(!inserted.id.is_empty());
    assert_eq!(inserted.status, ProjectStatus::Scheduled);

    let fetched = repo.get(&inserted.id).await.unwrap().unwrap();
    assert_eq!(fetched, inserted);

    let updated = repo
        .update(
            &inserted.id,
            ProjectPatch {
                status: Some(ProjectStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, ProjectStatus::Completed);
    assert_eq!(updated.name, "Kickoff");

    assert_eq!(repo.delete(&inserted.id).await.unwrap(), 1);
    assert!(repo.get(&inserted.id).await.unwrap().is_none());
    // Deleting again finds nothing and is not an error.
    assert_eq!(repo.delete(&inserted.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_project_status_queries() {
    let store = StoreClient::ephemeral();
    let repo = store.projects();

    repo.insert(NewProject::scheduled("A", "Reunião")).await.unwrap();
    let done = repo.insert(NewProject::scheduled("B", "Entrega")).await.unwrap();
    repo.update(
        &done.id,
        ProjectPatch {
            status: Some(ProjectStatus::Completed),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(repo.scheduled().await.unwrap().len(), 1);
    assert_eq!(repo.by_status(ProjectStatus::Completed).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_missing_project_is_not_found() {
    let store = StoreClient::ephemeral();
    let err = store
        .projects()
        .update("ghost", ProjectPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RecordNotFound { .. }));
}

#[tokio::test]
async fn test_product_restock_report() {
    let store = StoreClient::ephemeral();
    let repo = store.products();

    repo.insert(NewProduct {
        name: "Agenda".to_string(),
        description: None,
        cost_price: 10.0,
        sale_price: 25.0,
        current_stock: 2,
        min_stock: 5,
    })
    .await
    .unwrap();
    repo.insert(NewProduct {
        name: "Caneta".to_string(),
        description: None,
        cost_price: 1.0,
        sale_price: 3.0,
        current_stock: 50,
        min_stock: 10,
    })
    .await
    .unwrap();

    let low = repo.below_min_stock().await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Agenda");
}

#[tokio::test]
async fn test_product_patch_keeps_other_fields() {
    let store = StoreClient::ephemeral();
    let repo = store.products();

    let product = repo
        .insert(NewProduct {
            name: "Agenda".to_string(),
            description: Some("Capa dura".to_string()),
            cost_price: 10.0,
            sale_price: 25.0,
            current_stock: 7,
            min_stock: 5,
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            &product.id,
            ProductPatch {
                current_stock: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.current_stock, 6);
    assert_eq!(updated.description.as_deref(), Some("Capa dura"));
    assert_eq!(updated.sale_price, 25.0);
}

#[tokio::test]
async fn test_client_salary_update_scenario() {
    let store = StoreClient::ephemeral();
    let repo = store.clients();

    let c1 = repo.insert(new_client("Ana", 4000.0)).await.unwrap();
    let c2 = repo.insert(new_client("Bia", 3500.0)).await.unwrap();

    let updated = repo
        .update(
            &c1.id,
            ClientPatch {
                salary: Some(5000.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.salary, Some(5000.0));

    let untouched = repo.get(&c2.id).await.unwrap().unwrap();
    assert_eq!(untouched.salary, Some(3500.0));
}

#[tokio::test]
async fn test_active_clients_filter() {
    let store = StoreClient::ephemeral();
    let repo = store.clients();

    let active = repo.insert(new_client("Ana", 4000.0)).await.unwrap();
    let inactive = repo.insert(new_client("Bia", 3500.0)).await.unwrap();
    repo.update(
        &inactive.id,
        ClientPatch {
            status: Some(ClientStatus::Inactive),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let result = repo.active().await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, active.id);
}

#[tokio::test]
async fn test_repository_rows_visible_to_facade() {
    let store = StoreClient::ephemeral();

    let inserted = store
        .projects()
        .insert(NewProject::scheduled("Kickoff", "Reunião"))
        .await
        .unwrap();

    let row = store
        .from("projects")
        .eq("id", inserted.id.as_str())
        .single()
        .await
        .data
        .unwrap();
    assert_eq!(row.get("name"), Some(&serde_json::json!("Kickoff")));
}
