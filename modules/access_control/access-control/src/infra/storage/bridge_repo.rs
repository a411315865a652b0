//! Dynamic distinct-id queries over bridge tables.
//!
//! The table and column names come out of a [`RelationConfig`] at call
//! time, so the statement is assembled with sea-query rather than a static
//! entity.

use access_control_sdk::RelationConfig;
use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use uuid::Uuid;

use crate::domain::repo::BridgeRepository;

/// `SeaORM` implementation of [`BridgeRepository`].
pub struct SeaOrmBridgeRepository {
    conn: DatabaseConnection,
}

impl SeaOrmBridgeRepository {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BridgeRepository for SeaOrmBridgeRepository {
    async fn distinct_entity_ids(
        &self,
        config: &RelationConfig,
        customer_id: Uuid,
    ) -> anyhow::Result<Vec<Uuid>> {
        let entity_col = Alias::new(&config.entity_column);
        let stmt = Query::select()
            .column(entity_col.clone())
            .distinct()
            .from(Alias::new(&config.bridge_table))
            .and_where(Expr::col(Alias::new(&config.tenant_column)).eq(customer_id))
            .and_where(Expr::col(entity_col).is_not_null())
            .to_owned();

        let backend = self.conn.get_database_backend();
        let rows = self.conn.query_all(backend.build(&stmt)).await?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            ids.push(row.try_get_by_index::<Uuid>(0)?);
        }
        Ok(ids)
    }
}
