use sea_orm::Value;
use sea_orm::sea_query::{Alias, DeleteStatement, Expr, Query};

use crate::model::ModelDef;

/// 以基础逻辑表为目标组装按主键删除语句
pub fn delete(model: &ModelDef, primary_key: Value) -> DeleteStatement {
    let mut stmt = Query::delete();
    stmt.from_table(Alias::new(model.table()));
    stmt.and_where(Expr::col(Alias::new(model.primary_key_name())).eq(primary_key));
    stmt
}
