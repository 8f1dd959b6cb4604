//! Integration tests for the append-only audit trail.

use serde_json::Map;
use sqlx::PgPool;
use taskflow_core::action::Action;
use taskflow_core::scope::Scope;
use taskflow_db::audit::AuditTrail;
use taskflow_db::models::history::HistoryQuery;
use taskflow_db::store::EntityStore;

fn org_a() -> Scope {
    Scope::Org("org-a".into())
}

async fn record(store: &EntityStore, scope: &Scope, action: Action, entity_type: &str, id: &str) {
    AuditTrail::record(store, scope, "Alice", action, entity_type, id, id, Map::new())
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn entries_come_back_newest_first(pool: PgPool) {
    let store = EntityStore::new(pool);

    record(&store, &org_a(), Action::Created, "task", "t-1").await;
    record(&store, &org_a(), Action::Updated, "task", "t-1").await;
    record(&store, &org_a(), Action::Deleted, "task", "t-1").await;

    let entries = AuditTrail::query(&store, &org_a(), &HistoryQuery::default())
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].action, Action::Deleted);
    assert_eq!(entries[1].action, Action::Updated);
    assert_eq!(entries[2].action, Action::Created);
    assert!(entries[0].timestamp >= entries[2].timestamp);
}

#[sqlx::test(migrations = "./migrations")]
async fn query_is_scoped_to_the_organization(pool: PgPool) {
    let store = EntityStore::new(pool);

    record(&store, &org_a(), Action::Created, "task", "t-1").await;
    record(&store, &Scope::Org("org-b".into()), Action::Created, "task", "t-2").await;

    let entries = AuditTrail::query(&store, &org_a(), &HistoryQuery::default())
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entity_id, "t-1");
    assert_eq!(entries[0].organization_id, "org-a");
}

#[sqlx::test(migrations = "./migrations")]
async fn query_filters_by_entity_type_and_id(pool: PgPool) {
    let store = EntityStore::new(pool);

    record(&store, &org_a(), Action::Created, "task", "t-1").await;
    record(&store, &org_a(), Action::Created, "project", "p-1").await;
    record(&store, &org_a(), Action::Updated, "task", "t-2").await;

    let params = HistoryQuery {
        entity_type: Some("task".into()),
        entity_id: None,
        limit: None,
    };
    let tasks = AuditTrail::query(&store, &org_a(), &params).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|e| e.entity_type == "task"));

    let params = HistoryQuery {
        entity_type: Some("task".into()),
        entity_id: Some("t-2".into()),
        limit: None,
    };
    let one = AuditTrail::query(&store, &org_a(), &params).await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].entity_id, "t-2");
}

#[sqlx::test(migrations = "./migrations")]
async fn limit_is_clamped(pool: PgPool) {
    let store = EntityStore::new(pool);

    for i in 0..3 {
        record(&store, &org_a(), Action::Updated, "task", &format!("t-{i}")).await;
    }

    // Zero and negative limits clamp up to one entry.
    let params = HistoryQuery {
        entity_type: None,
        entity_id: None,
        limit: Some(0),
    };
    let entries = AuditTrail::query(&store, &org_a(), &params).await.unwrap();
    assert_eq!(entries.len(), 1);

    let params = HistoryQuery {
        entity_type: None,
        entity_id: None,
        limit: Some(2),
    };
    let entries = AuditTrail::query(&store, &org_a(), &params).await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn unscoped_record_is_a_noop(pool: PgPool) {
    let store = EntityStore::new(pool);

    record(&store, &Scope::Unscoped, Action::Created, "organization", "o-1").await;

    // Nothing was written: the unscoped query (no conjuncts) sees all rows.
    let entries = AuditTrail::query(&store, &Scope::Unscoped, &HistoryQuery::default())
        .await
        .unwrap();
    assert!(entries.is_empty());
}
