use std::collections::BTreeMap;

use sea_orm::Value;

use super::PartitionTableRef;
use crate::error::{MissingPartitionKeySnafu, Result, UnsupportedPartitionKeySnafu};
use crate::value_ext::ValueNullExt;

/// 分区键定义: 一组有序属性名, 其取值决定记录归属的物理分区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSpec {
    columns: Vec<String>,
}

impl PartitionSpec {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { columns: columns.into_iter().map(Into::into).collect() }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 按声明顺序取出分区键值
    ///
    /// 任一键缺失或为空值时解析失败, 不产生任何语句
    pub fn key_values<'a>(&self, table: &str, attributes: &'a BTreeMap<String, Value>) -> Result<Vec<&'a Value>> {
        let mut values = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            match attributes.get(column).filter(|v| !v.is_null()) {
                Some(value) => values.push(value),
                None => return MissingPartitionKeySnafu { table, column: column.as_str() }.fail(),
            }
        }
        Ok(values)
    }

    /// 由基础表名与分区键值推导分区表名, 纯函数
    ///
    /// 同一组键值始终得到同一个表名; 传入部分属性或完整属性,
    /// 只要键列取值一致, 结果一致
    pub fn resolve(&self, table: &str, attributes: &BTreeMap<String, Value>) -> Result<PartitionTableRef> {
        let values = self.key_values(table, attributes)?;

        let mut suffix = String::new();
        for (column, value) in self.columns.iter().zip(values) {
            let fragment = match key_fragment(value) {
                Some(fragment) if !fragment.is_empty() => fragment,
                _ => return UnsupportedPartitionKeySnafu { table, column: column.as_str() }.fail(),
            };
            if !suffix.is_empty() {
                suffix.push('_');
            }
            suffix.push_str(&fragment);
        }

        Ok(PartitionTableRef::from(format!("{table}_p{suffix}")))
    }
}

/// 把单个键值规整为合法的标识符片段
fn key_fragment(value: &Value) -> Option<String> {
    match value {
        Value::TinyInt(Some(v)) => Some(int_fragment(i64::from(*v))),
        Value::SmallInt(Some(v)) => Some(int_fragment(i64::from(*v))),
        Value::Int(Some(v)) => Some(int_fragment(i64::from(*v))),
        Value::BigInt(Some(v)) => Some(int_fragment(*v)),
        Value::TinyUnsigned(Some(v)) => Some(v.to_string()),
        Value::SmallUnsigned(Some(v)) => Some(v.to_string()),
        Value::Unsigned(Some(v)) => Some(v.to_string()),
        Value::BigUnsigned(Some(v)) => Some(v.to_string()),
        Value::String(Some(v)) => Some(sanitize(v)),
        Value::ChronoDate(Some(v)) => Some(v.format("%Y%m%d").to_string()),
        Value::ChronoDateTime(Some(v)) => Some(v.format("%Y%m%d").to_string()),
        Value::ChronoDateTimeUtc(Some(v)) => Some(v.format("%Y%m%d").to_string()),
        Value::ChronoDateTimeWithTimeZone(Some(v)) => Some(v.format("%Y%m%d").to_string()),
        _ => None,
    }
}

fn int_fragment(v: i64) -> String {
    // 负数以 n 前缀表达, 避免标识符里出现减号
    if v < 0 { format!("n{}", v.unsigned_abs()) } else { v.to_string() }
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
