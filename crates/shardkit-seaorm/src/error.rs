use sea_orm::DbErr;
use snafu::{Location, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("表 {table} 缺少分区键 {column}"))]
    MissingPartitionKey {
        table: String,
        column: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("表 {table} 的分区键 {column} 无法转换为分区后缀"))]
    UnsupportedPartitionKey {
        table: String,
        column: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("表 {table} 不存在列 {column}"))]
    UnknownColumn {
        table: String,
        column: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("表 {table} 的记录已销毁, 禁止修改"))]
    AlreadyDestroyed {
        table: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("表 {table} 占位符与绑定值数量不一致: {placeholders} != {binds}"))]
    BindArityMismatch {
        table: String,
        placeholders: usize,
        binds: usize,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("{source}"))]
    Db {
        source: DbErr,
        #[snafu(implicit)]
        location: Location,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
