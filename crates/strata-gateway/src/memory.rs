//! In-memory reference store
//!
//! DashMap-backed, tenant-partitioned. Semantics mirror what the engine
//! assumes of the real backend: id assignment on insert, shallow patch
//! merge on update, last write wins. Used by tests and simulations; not a
//! durability layer.

use crate::store::{GatewayError, PlanStore, Table};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use strata_model::TenantId;
use ulid::Ulid;

fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

/// Tenant-partitioned in-memory table store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<(TenantId, Table), Vec<Value>>,
}

impl MemoryStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table wholesale, bypassing id assignment
    pub fn seed(&self, table: Table, tenant: &TenantId, rows: Vec<Value>) {
        self.tables.insert((tenant.clone(), table), rows);
    }

    /// Row count across all tenants and tables
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|e| e.value().len()).sum()
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn fetch_table(
        &self,
        table: Table,
        tenant: &TenantId,
    ) -> Result<Vec<Value>, GatewayError> {
        Ok(self
            .tables
            .get(&(tenant.clone(), table))
            .map(|rows| rows.clone())
            .unwrap_or_default())
    }

    async fn insert_record(
        &self,
        table: Table,
        mut record: Value,
        tenant: &TenantId,
    ) -> Result<Value, GatewayError> {
        let obj = record
            .as_object_mut()
            .ok_or_else(|| GatewayError::MalformedRow {
                table,
                message: "row is not a JSON object".to_string(),
            })?;
        if !obj.contains_key("id") {
            obj.insert("id".to_string(), Value::String(Ulid::new().to_string()));
        }
        self.tables
            .entry((tenant.clone(), table))
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        table: Table,
        id: &str,
        patch: Value,
        tenant: &TenantId,
    ) -> Result<Value, GatewayError> {
        let patch = patch
            .as_object()
            .ok_or_else(|| GatewayError::MalformedRow {
                table,
                message: "patch is not a JSON object".to_string(),
            })?
            .clone();
        let mut rows =
            self.tables
                .get_mut(&(tenant.clone(), table))
                .ok_or_else(|| GatewayError::RowNotFound {
                    table,
                    id: id.to_string(),
                })?;
        let row = rows
            .iter_mut()
            .find(|r| row_id(r) == Some(id))
            .ok_or_else(|| GatewayError::RowNotFound {
                table,
                id: id.to_string(),
            })?;
        let obj = row.as_object_mut().ok_or_else(|| GatewayError::MalformedRow {
            table,
            message: "stored row is not a JSON object".to_string(),
        })?;
        for (key, value) in patch {
            obj.insert(key, value);
        }
        Ok(row.clone())
    }

    async fn delete_record(
        &self,
        table: Table,
        id: &str,
        tenant: &TenantId,
    ) -> Result<(), GatewayError> {
        let mut rows =
            self.tables
                .get_mut(&(tenant.clone(), table))
                .ok_or_else(|| GatewayError::RowNotFound {
                    table,
                    id: id.to_string(),
                })?;
        let before = rows.len();
        rows.retain(|r| row_id(r) != Some(id));
        if rows.len() == before {
            return Err(GatewayError::RowNotFound {
                table,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tenant() -> TenantId {
        TenantId::from("acme")
    }

    #[tokio::test]
    async fn insert_assigns_an_id_when_missing() {
        let store = MemoryStore::new();
        let row = store
            .insert_record(Table::Areas, json!({ "name": "Area" }), &tenant())
            .await
            .unwrap();
        assert!(row_id(&row).is_some());
        assert_eq!(store.total_rows(), 1);
    }

    #[tokio::test]
    async fn tables_are_tenant_partitioned() {
        let store = MemoryStore::new();
        store
            .insert_record(Table::Areas, json!({ "id": "ar-1" }), &tenant())
            .await
            .unwrap();

        let other = TenantId::from("umbrella");
        let rows = store.fetch_table(Table::Areas, &other).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn update_is_a_shallow_merge() {
        let store = MemoryStore::new();
        store
            .insert_record(
                Table::Targets,
                json!({ "id": "t-1", "name": "Old", "code": "T1" }),
                &tenant(),
            )
            .await
            .unwrap();

        let row = store
            .update_record(Table::Targets, "t-1", json!({ "name": "New" }), &tenant())
            .await
            .unwrap();
        assert_eq!(row["name"], "New");
        assert_eq!(row["code"], "T1");
    }

    #[tokio::test]
    async fn update_of_missing_row_is_row_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_record(Table::Targets, "ghost", json!({}), &tenant())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RowNotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let store = MemoryStore::new();
        for id in ["e-1", "e-2"] {
            store
                .insert_record(Table::Expenses, json!({ "id": id }), &tenant())
                .await
                .unwrap();
        }
        store
            .delete_record(Table::Expenses, "e-1", &tenant())
            .await
            .unwrap();
        let rows = store.fetch_table(Table::Expenses, &tenant()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(row_id(&rows[0]), Some("e-2"));
    }
}
