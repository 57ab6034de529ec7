use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::prelude::async_trait::async_trait;
use sea_orm::sea_query::{DeleteStatement, InsertStatement, SelectStatement, UpdateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Statement, Value};

use super::StoreAdapter;
use crate::model::ColumnDef;

/// 基于 sea-orm 连接的存储适配器
pub struct PostgresStoreAdapter {
    pub conn: Arc<DatabaseConnection>,
}

impl PostgresStoreAdapter {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    fn backend(&self) -> DbBackend {
        self.conn.get_database_backend()
    }
}

#[async_trait]
impl StoreAdapter for PostgresStoreAdapter {
    async fn next_sequence_value(&self, sequence: &str) -> Result<i64, DbErr> {
        let sql = format!("SELECT nextval('{sequence}')");
        let row = self
            .conn
            .query_one(Statement::from_string(self.backend(), sql))
            .await?
            .ok_or_else(|| DbErr::Custom(format!("sequence {sequence} returned no row")))?;
        Ok(row.try_get_by::<i64, _>(0)?)
    }

    async fn execute_insert(
        &self,
        stmt: InsertStatement,
        returning: Option<&ColumnDef>,
    ) -> Result<Option<Value>, DbErr> {
        let stmt = self.backend().build(&stmt);
        match returning {
            Some(column) => {
                let row = self.conn.query_one(stmt).await?;
                row.map(|row| column.decode(&row)).transpose()
            }
            None => {
                self.conn.execute(stmt).await?;
                Ok(None)
            }
        }
    }

    async fn execute_update(&self, stmt: UpdateStatement) -> Result<u64, DbErr> {
        let result = self.conn.execute(self.backend().build(&stmt)).await?;
        Ok(result.rows_affected())
    }

    async fn execute_delete(&self, stmt: DeleteStatement) -> Result<u64, DbErr> {
        let result = self.conn.execute(self.backend().build(&stmt)).await?;
        Ok(result.rows_affected())
    }

    async fn query_rows(
        &self,
        stmt: SelectStatement,
        columns: &[ColumnDef],
    ) -> Result<Vec<BTreeMap<String, Value>>, DbErr> {
        let rows = self.conn.query_all(self.backend().build(&stmt)).await?;
        let mut decoded = Vec::with_capacity(rows.len());
        for row in rows {
            let mut attributes = BTreeMap::new();
            for column in columns {
                attributes.insert(column.name().to_owned(), column.decode(&row)?);
            }
            decoded.push(attributes);
        }
        Ok(decoded)
    }
}
