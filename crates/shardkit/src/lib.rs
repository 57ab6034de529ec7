pub use {sea_orm, tracing};

pub mod db {
    pub use shardkit_seaorm::connection::{
        Config, LevelFilter, get_database_connection, get_or_init_database_connection,
        must_get_database_connection, try_new_database_connection,
    };
    pub use shardkit_seaorm::{error, model, partition, record, statement, store};
}

pub mod prelude {
    pub use shardkit_seaorm::error::{Error, Result};
    pub use shardkit_seaorm::model::{Association, ColumnDef, ColumnKind, ModelDef, ModelKind};
    pub use shardkit_seaorm::partition::{PartitionSpec, PartitionTableRef};
    pub use shardkit_seaorm::record::Record;
    pub use shardkit_seaorm::store::{PostgresStoreAdapter, StoreAdapter};
}
