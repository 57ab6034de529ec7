use sea_orm::sea_query::{Alias, Asterisk, Query, SelectStatement};

use crate::error::Result;
use crate::model::ModelDef;
use crate::partition::PartitionTableRef;

/// 构建查询语句
///
/// 未给出列清单时对解析后的表操作数做整表投影,
/// 表操作数可被动态表引用替换而投影仍然正确
pub fn select(model: &ModelDef, table: Option<&PartitionTableRef>, columns: &[&str]) -> Result<SelectStatement> {
    let operand = match table {
        Some(table) => table.clone(),
        None => PartitionTableRef::new(model.table()),
    };

    let mut stmt = Query::select();
    stmt.from(operand.clone());

    if columns.is_empty() {
        stmt.column((operand, Asterisk));
    } else {
        for name in columns {
            let column = model.find_column(name)?;
            stmt.column(Alias::new(column.name()));
        }
    }

    Ok(stmt)
}
