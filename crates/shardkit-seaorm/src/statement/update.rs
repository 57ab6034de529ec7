use std::collections::BTreeMap;

use sea_orm::Value;
use sea_orm::sea_query::{Alias, Expr, Query, UpdateStatement};

use crate::error::Result;
use crate::model::ModelDef;

/// 以基础逻辑表为目标组装按主键更新语句
///
/// 定位条件使用更新前的主键值, 目标表操作数由调用方在执行前改写
pub fn update(model: &ModelDef, changed: &BTreeMap<String, Value>, primary_key: Value) -> Result<UpdateStatement> {
    let mut stmt = Query::update();
    stmt.table(Alias::new(model.table()));

    for (name, value) in changed {
        let column = model.find_column(name)?;
        stmt.value(Alias::new(column.name()), value.clone());
    }

    stmt.and_where(Expr::col(Alias::new(model.primary_key_name())).eq(primary_key));
    Ok(stmt)
}
