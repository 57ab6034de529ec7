use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use sea_orm::Value;
use sea_orm::sea_query::{Alias, Expr};
use snafu::{ResultExt, ensure};
use tracing::debug;

use crate::error::{AlreadyDestroyedSnafu, DbSnafu, Result};
use crate::model::ModelDef;
use crate::statement;
use crate::store::StoreAdapter;
use crate::value_ext::ValueNullExt;

/// 一条逻辑行的内存表示
///
/// 写路径在语句送达存储前解析归属分区, 并把语句的目标表操作数
/// 改写为解析结果; 读路径仍然面向逻辑表
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<ModelDef>,
    attributes: BTreeMap<String, Value>,
    loaded: Option<BTreeMap<String, Value>>,
    persisted: bool,
    destroyed: bool,
}

impl Record {
    pub fn new(model: Arc<ModelDef>) -> Self {
        Self { model, attributes: BTreeMap::new(), loaded: None, persisted: false, destroyed: false }
    }

    /// 由存储加载出的行构造记录
    pub fn from_loaded(model: Arc<ModelDef>, attributes: BTreeMap<String, Value>) -> Self {
        Self { model, loaded: Some(attributes.clone()), attributes, persisted: true, destroyed: false }
    }

    pub fn model(&self) -> &Arc<ModelDef> {
        &self.model
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.attributes.get(column)
    }

    /// 写属性; 已销毁的记录拒绝任何修改
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> Result<()> {
        ensure!(!self.destroyed, AlreadyDestroyedSnafu { table: self.model.table() });
        let column = self.model.find_column(column)?;
        self.attributes.insert(column.name().to_owned(), value.into());
        Ok(())
    }

    pub fn primary_key_name(&self) -> &str {
        self.model.primary_key_name()
    }

    pub fn primary_key(&self) -> Option<&Value> {
        self.attributes.get(self.model.primary_key_name()).filter(|v| !v.is_null())
    }

    pub fn persisted(&self) -> bool {
        self.persisted && !self.destroyed
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed
    }

    /// 定位行所用的属性: 有加载快照时用快照,
    /// 未保存的分区键改动不会改变既有行的路由
    fn routing_attributes(&self) -> &BTreeMap<String, Value> {
        self.loaded.as_ref().unwrap_or(&self.attributes)
    }

    fn routed_primary_key(&self) -> Option<Value> {
        self.routing_attributes()
            .get(self.model.primary_key_name())
            .filter(|v| !v.is_null())
            .cloned()
    }

    /// 插入
    ///
    /// 顺序固定: 先补齐预取主键, 再以完整属性解析分区,
    /// 最后改写目标表并执行; 解析失败时不产生任何语句
    pub async fn insert<S>(&mut self, store: &S) -> Result<()>
    where
        S: StoreAdapter + ?Sized,
    {
        ensure!(!self.destroyed, AlreadyDestroyedSnafu { table: self.model.table() });

        if self.model.uses_prefetched_primary_key() && self.primary_key().is_none() {
            let sequence = self.model.sequence_name();
            let id = store.next_sequence_value(&sequence).await.context(DbSnafu)?;
            self.attributes.insert(self.model.primary_key_name().to_owned(), id.into());
        }

        let table = self.model.resolve_partition_table(&self.attributes)?;
        let mut stmt = statement::insert(&self.model, &self.attributes)?;
        stmt.into_table(table.clone());
        debug!(table = %table, "插入语句改写至分区表");

        let returning = self.model.primary_key_column().cloned();
        let generated = store.execute_insert(stmt, returning.as_ref()).await.context(DbSnafu)?;
        if self.primary_key().is_none() {
            if let Some(id) = generated.filter(|v| !v.is_null()) {
                self.attributes.insert(self.model.primary_key_name().to_owned(), id);
            }
        }

        self.persisted = true;
        self.loaded = Some(self.attributes.clone());
        Ok(())
    }

    /// 更新给定列, 返回受影响行数
    ///
    /// 空集直接返回 0, 不发语句; 行定位用加载时的主键与分区键
    pub async fn update<S>(&mut self, store: &S, changed: &[&str]) -> Result<u64>
    where
        S: StoreAdapter + ?Sized,
    {
        ensure!(!self.destroyed, AlreadyDestroyedSnafu { table: self.model.table() });

        if changed.is_empty() {
            return Ok(0);
        }
        if !self.persisted {
            debug!(table = self.model.table(), "记录尚未持久化, 跳过更新");
            return Ok(0);
        }
        let Some(id) = self.routed_primary_key() else {
            debug!(table = self.model.table(), "缺少主键, 跳过更新");
            return Ok(0);
        };

        let mut values = BTreeMap::new();
        for name in changed {
            let column = self.model.find_column(name)?;
            let value = self
                .attributes
                .get(column.name())
                .cloned()
                .unwrap_or_else(|| column.kind().null_value());
            values.insert(column.name().to_owned(), value);
        }

        let table = self.model.resolve_partition_table(self.routing_attributes())?;
        let mut stmt = statement::update(&self.model, &values, id)?;
        stmt.table(table.clone());
        debug!(table = %table, columns = values.len(), "更新语句改写至分区表");

        let affected = store.execute_update(stmt).await.context(DbSnafu)?;

        if let Some(loaded) = self.loaded.as_mut() {
            for (name, value) in values {
                loaded.insert(name, value);
            }
        }
        Ok(affected)
    }

    /// 删除
    ///
    /// 先解析归属分区, 再按主键删除; 对已销毁的记录是幂等空操作
    pub async fn delete<S>(&mut self, store: &S) -> Result<u64>
    where
        S: StoreAdapter + ?Sized,
    {
        if self.destroyed {
            return Ok(0);
        }

        let mut affected = 0;
        if self.persisted {
            if let Some(id) = self.routed_primary_key() {
                let table = self.model.resolve_partition_table(self.routing_attributes())?;
                let mut stmt = statement::delete(&self.model, id);
                stmt.from_table(table.clone());
                debug!(table = %table, "删除语句改写至分区表");
                affected = store.execute_delete(stmt).await.context(DbSnafu)?;
            }
        }

        self.persisted = false;
        self.destroyed = true;
        Ok(affected)
    }

    /// 销毁: 先按声明顺序销毁关联子记录, 再删除自身行
    pub fn destroy<'a, S>(&'a mut self, store: &'a S) -> BoxFuture<'a, Result<()>>
    where
        S: StoreAdapter + ?Sized,
    {
        async move {
            if self.destroyed {
                return Ok(());
            }

            if let Some(id) = self.routed_primary_key() {
                for association in self.model.associations() {
                    let child_model = association.model().clone();
                    let mut stmt = statement::select(&child_model, None, &[])?;
                    stmt.and_where(Expr::col(Alias::new(association.foreign_key())).eq(id.clone()));
                    let rows = store.query_rows(stmt, child_model.columns()).await.context(DbSnafu)?;
                    for attributes in rows {
                        let mut child = Record::from_loaded(child_model.clone(), attributes);
                        child.destroy(store).await?;
                    }
                }
            }

            self.delete(store).await?;
            Ok(())
        }
        .boxed()
    }
}
