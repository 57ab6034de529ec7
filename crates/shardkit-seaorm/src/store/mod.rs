use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::sea_query::{DeleteStatement, InsertStatement, SelectStatement, UpdateStatement};
use sea_orm::{DbErr, Value};

use crate::model::ColumnDef;

mod postgres;
pub use postgres::*;

/// 底层存储客户端
///
/// 交付到这里的语句已完成目标表改写, 适配器不感知分区归属;
/// 存储报出的错误(表不存在, 约束冲突等)原样上抛, 本层不重试
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// 取序列下一个值, 用于主键预取
    async fn next_sequence_value(&self, sequence: &str) -> Result<i64, DbErr>;

    /// 执行插入, 返回存储生成的主键(如有)
    async fn execute_insert(
        &self,
        stmt: InsertStatement,
        returning: Option<&ColumnDef>,
    ) -> Result<Option<Value>, DbErr>;

    /// 执行更新, 返回受影响行数
    async fn execute_update(&self, stmt: UpdateStatement) -> Result<u64, DbErr>;

    /// 执行删除, 返回受影响行数
    async fn execute_delete(&self, stmt: DeleteStatement) -> Result<u64, DbErr>;

    /// 执行查询, 按列描述解码为属性映射
    async fn query_rows(
        &self,
        stmt: SelectStatement,
        columns: &[ColumnDef],
    ) -> Result<Vec<BTreeMap<String, Value>>, DbErr>;
}
