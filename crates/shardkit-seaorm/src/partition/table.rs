use std::fmt;

use sea_orm::sea_query::Iden;

/// 动态表引用: 包装一个物理表名, 可替换查询构建器中任意表操作数
///
/// 相等性为结构相等, 同名即可互换
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::From)]
pub struct PartitionTableRef {
    name: String,
}

impl PartitionTableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PartitionTableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Iden for PartitionTableRef {
    fn unquoted(&self, s: &mut dyn fmt::Write) {
        write!(s, "{}", self.name).unwrap();
    }
}
