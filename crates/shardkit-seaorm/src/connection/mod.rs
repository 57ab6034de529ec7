use sea_orm::{Database, DatabaseConnection, DbErr};
use tokio::sync::OnceCell;
use tracing::info;

mod cfg;
pub use cfg::*;

/// 尝试创建数据库连接
pub async fn try_new_database_connection(cfg: Config) -> Result<DatabaseConnection, DbErr> {
    info!(url = %cfg.url, schema = ?cfg.schema, "连接数据库");
    Database::connect(cfg).await
}

static DB_CONNECTION: OnceCell<DatabaseConnection> = OnceCell::const_new();

/// 初始化全局连接, 重复调用只连一次
pub async fn get_or_init_database_connection(cfg: Config) -> Result<&'static DatabaseConnection, DbErr> {
    DB_CONNECTION.get_or_try_init(|| try_new_database_connection(cfg)).await
}

#[inline(always)]
pub fn get_database_connection() -> Option<&'static DatabaseConnection> {
    DB_CONNECTION.get()
}

#[inline(always)]
pub fn must_get_database_connection() -> &'static DatabaseConnection {
    get_database_connection().expect("Failed to get database connection")
}
