use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use sea_orm::sea_query::{
    DeleteStatement, InsertStatement, PostgresQueryBuilder, QueryStatementWriter, SelectStatement, UpdateStatement,
};
use sea_orm::{DbErr, Value};
use shardkit_seaorm::model::ColumnDef;
use shardkit_seaorm::store::StoreAdapter;

/// 把送达的语句按到达顺序渲染为 SQL 并记录下来的内存适配器
#[derive(Default)]
pub struct MockStore {
    pub statements: Mutex<Vec<String>>,
    pub sequence: AtomicI64,
    pub insert_id: Option<i64>,
    pub affected: u64,
    pub rows: Mutex<Vec<BTreeMap<String, Value>>>,
    pub fail_inserts: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoreAdapter for MockStore {
    async fn next_sequence_value(&self, sequence: &str) -> Result<i64, DbErr> {
        self.statements.lock().unwrap().push(format!("SELECT nextval('{sequence}')"));
        Ok(self.sequence.fetch_add(1, Ordering::SeqCst))
    }

    async fn execute_insert(
        &self,
        stmt: InsertStatement,
        _returning: Option<&ColumnDef>,
    ) -> Result<Option<Value>, DbErr> {
        if self.fail_inserts {
            return Err(DbErr::Custom("insert rejected".to_owned()));
        }
        self.statements.lock().unwrap().push(stmt.to_string(PostgresQueryBuilder));
        Ok(self.insert_id.map(Value::from))
    }

    async fn execute_update(&self, stmt: UpdateStatement) -> Result<u64, DbErr> {
        self.statements.lock().unwrap().push(stmt.to_string(PostgresQueryBuilder));
        Ok(self.affected)
    }

    async fn execute_delete(&self, stmt: DeleteStatement) -> Result<u64, DbErr> {
        self.statements.lock().unwrap().push(stmt.to_string(PostgresQueryBuilder));
        Ok(self.affected)
    }

    async fn query_rows(
        &self,
        stmt: SelectStatement,
        _columns: &[ColumnDef],
    ) -> Result<Vec<BTreeMap<String, Value>>, DbErr> {
        self.statements.lock().unwrap().push(stmt.to_string(PostgresQueryBuilder));
        Ok(self.rows.lock().unwrap().drain(..).collect())
    }
}

pub fn attrs(pairs: Vec<(&str, Value)>) -> BTreeMap<String, Value> {
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}
