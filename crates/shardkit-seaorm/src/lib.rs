pub use sea_orm;

pub mod connection;

pub mod error;

pub mod model;

pub mod partition;

pub mod record;

pub mod statement;

pub mod store;

pub(crate) mod value_ext;
