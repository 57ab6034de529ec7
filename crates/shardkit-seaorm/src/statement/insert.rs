use std::collections::BTreeMap;

use sea_orm::Value;
use sea_orm::sea_query::{Alias, InsertStatement, Query, SimpleExpr};

use crate::error::{BindArityMismatchSnafu, Result};
use crate::model::ModelDef;

/// 以基础逻辑表为目标组装插入语句
///
/// 绑定元组按列名稳定排序, 占位符与绑定值一一对应;
/// 目标表操作数由调用方在执行前改写为解析出的分区表
pub fn insert(model: &ModelDef, attributes: &BTreeMap<String, Value>) -> Result<InsertStatement> {
    let mut columns = Vec::with_capacity(attributes.len());
    let mut values = Vec::with_capacity(attributes.len());
    for (name, value) in attributes {
        let column = model.find_column(name)?;
        columns.push(Alias::new(column.name()));
        values.push(value.clone());
    }
    let placeholders = columns.len();
    let binds = values.len();

    let mut stmt = Query::insert();
    stmt.into_table(Alias::new(model.table()));

    if columns.is_empty() {
        // 零属性插入落到存储的空插入形式
        stmt.or_default_values();
    } else {
        stmt.columns(columns);
        stmt.values(values.into_iter().map(SimpleExpr::from))
            .map_err(|_| BindArityMismatchSnafu { table: model.table(), placeholders, binds }.build())?;
    }

    if model.primary_key_column().is_some() {
        stmt.returning_col(Alias::new(model.primary_key_name()));
    }

    Ok(stmt)
}
