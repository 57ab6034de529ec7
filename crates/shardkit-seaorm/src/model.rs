use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use sea_orm::{DbErr, QueryResult, Value};

use crate::error::{Result, UnknownColumnSnafu};
use crate::partition::{PartitionSpec, PartitionTableRef};

/// 列类型, 用于绑定值描述与查询结果解码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    BigInt,
    Integer,
    Text,
    Boolean,
    Double,
    Date,
    DateTime,
    TimestampTz,
}

impl ColumnKind {
    /// 对应类型的空值
    pub fn null_value(self) -> Value {
        match self {
            ColumnKind::BigInt => Value::BigInt(None),
            ColumnKind::Integer => Value::Int(None),
            ColumnKind::Text => Value::String(None),
            ColumnKind::Boolean => Value::Bool(None),
            ColumnKind::Double => Value::Double(None),
            ColumnKind::Date => Value::ChronoDate(None),
            ColumnKind::DateTime => Value::ChronoDateTime(None),
            ColumnKind::TimestampTz => Value::ChronoDateTimeWithTimeZone(None),
        }
    }
}

/// 列描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    name: String,
    kind: ColumnKind,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self { name: name.into(), kind }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// 按声明类型从查询结果中取出本列的值
    pub fn decode(&self, row: &QueryResult) -> Result<Value, DbErr> {
        let name = self.name.as_str();
        let value: Value = match self.kind {
            ColumnKind::BigInt => row.try_get_by::<Option<i64>, _>(name)?.into(),
            ColumnKind::Integer => row.try_get_by::<Option<i32>, _>(name)?.into(),
            ColumnKind::Text => row.try_get_by::<Option<String>, _>(name)?.into(),
            ColumnKind::Boolean => row.try_get_by::<Option<bool>, _>(name)?.into(),
            ColumnKind::Double => row.try_get_by::<Option<f64>, _>(name)?.into(),
            ColumnKind::Date => row.try_get_by::<Option<NaiveDate>, _>(name)?.into(),
            ColumnKind::DateTime => row.try_get_by::<Option<NaiveDateTime>, _>(name)?.into(),
            ColumnKind::TimestampTz => row.try_get_by::<Option<DateTime<FixedOffset>>, _>(name)?.into(),
        };
        Ok(value)
    }
}

/// 模型分区能力: 普通模型或分区模型, 调用方按变体分支
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum ModelKind {
    Plain,
    #[from]
    Partitioned(PartitionSpec),
}

/// has_many 关联, 父记录销毁前先销毁的子集合
#[derive(Debug, Clone)]
pub struct Association {
    model: Arc<ModelDef>,
    foreign_key: String,
}

impl Association {
    pub fn new(model: Arc<ModelDef>, foreign_key: impl Into<String>) -> Self {
        Self { model, foreign_key: foreign_key.into() }
    }

    pub fn model(&self) -> &Arc<ModelDef> {
        &self.model
    }

    pub fn foreign_key(&self) -> &str {
        &self.foreign_key
    }
}

/// 模型描述
///
/// 逻辑表名, 主键, 列清单与分区配置, 启动期构建一次, 之后不可变
#[derive(Debug, Clone)]
pub struct ModelDef {
    table: String,
    primary_key: String,
    sequence: Option<String>,
    prefetch_primary_key: bool,
    columns: Vec<ColumnDef>,
    kind: ModelKind,
    associations: Vec<Association>,
}

impl ModelDef {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: "id".to_owned(),
            sequence: None,
            prefetch_primary_key: false,
            columns: Vec::new(),
            kind: ModelKind::Plain,
            associations: Vec::new(),
        }
    }

    pub fn primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    pub fn column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.columns.push(ColumnDef::new(name, kind));
        self
    }

    /// 声明分区键, 模型转为分区模型
    pub fn partitioned_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kind = PartitionSpec::new(columns).into();
        self
    }

    /// 主键改为插入前从序列预取
    pub fn prefetched_primary_key(mut self) -> Self {
        self.prefetch_primary_key = true;
        self
    }

    pub fn sequence(mut self, name: impl Into<String>) -> Self {
        self.sequence = Some(name.into());
        self
    }

    pub fn has_many(mut self, model: Arc<ModelDef>, foreign_key: impl Into<String>) -> Self {
        self.associations.push(Association::new(model, foreign_key));
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn primary_key_name(&self) -> &str {
        &self.primary_key
    }

    pub fn kind(&self) -> &ModelKind {
        &self.kind
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    pub fn uses_prefetched_primary_key(&self) -> bool {
        self.prefetch_primary_key
    }

    /// 主键序列名, 未配置时按 `<表名>_id_seq` 约定
    pub fn sequence_name(&self) -> String {
        self.sequence.clone().unwrap_or_else(|| format!("{}_id_seq", self.table))
    }

    /// 分区键名清单, 普通模型为空
    pub fn partition_key_names(&self) -> &[String] {
        match &self.kind {
            ModelKind::Plain => &[],
            ModelKind::Partitioned(spec) => spec.columns(),
        }
    }

    pub fn find_column(&self, name: &str) -> Result<&ColumnDef> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| UnknownColumnSnafu { table: self.table.as_str(), column: name }.build())
    }

    pub fn primary_key_column(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name() == self.primary_key)
    }

    /// 由属性值解析目标物理表; 普通模型返回基础表自身
    ///
    /// 部分属性(仅插入列)与完整属性在键列取值一致时结果一致
    pub fn resolve_partition_table(&self, attributes: &BTreeMap<String, Value>) -> Result<PartitionTableRef> {
        match &self.kind {
            ModelKind::Plain => Ok(PartitionTableRef::new(self.table.as_str())),
            ModelKind::Partitioned(spec) => spec.resolve(&self.table, attributes),
        }
    }
}
