//! 创建示例 schema 并写入种子数据
//!
//! 需要 DATABASE_URL 指向可用的 postgres 实例

use std::sync::Arc;

use shardkit::db::{Config, statement, try_new_database_connection};
use shardkit::prelude::*;
use shardkit::sea_orm::ConnectionTrait;

const SCHEMA: &str = r#"
create table if not exists companies
(
    id         bigserial not null primary key,
    created_at timestamp not null default now(),
    name       text null
);

create sequence if not exists widgets_id_seq;

create table if not exists widgets
(
    id         bigint not null default nextval('widgets_id_seq'),
    company_id bigint not null,
    name       text null,
    created_at timestamp not null default now(),
    primary key (id, company_id)
) partition by list (company_id);

create table if not exists widgets_p1 partition of widgets for values in (1);
create table if not exists widgets_p2 partition of widgets for values in (2);
create table if not exists widgets_p3 partition of widgets for values in (3);
create table if not exists widgets_p4 partition of widgets for values in (4);
"#;

const COMPANIES: [&str; 4] = [
    "Fluent Mobile, inc.",
    "Fiksu, inc.",
    "AppExchanger, inc.",
    "FreeMyApps, inc.",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cfg = Config { url: std::env::var("DATABASE_URL")?, ..Default::default() };
    let conn = Arc::new(try_new_database_connection(cfg).await?);
    conn.execute_unprepared(SCHEMA).await?;

    let widgets = Arc::new(
        ModelDef::new("widgets")
            .column("id", ColumnKind::BigInt)
            .column("company_id", ColumnKind::BigInt)
            .column("name", ColumnKind::Text)
            .partitioned_by(["company_id"])
            .prefetched_primary_key(),
    );
    let companies = Arc::new(
        ModelDef::new("companies")
            .column("id", ColumnKind::BigInt)
            .column("name", ColumnKind::Text)
            .has_many(widgets.clone(), "company_id"),
    );

    let store = PostgresStoreAdapter::new(conn);

    for (index, name) in COMPANIES.iter().enumerate() {
        let mut company = Record::new(companies.clone());
        company.set("name", *name)?;
        company.insert(&store).await?;

        let mut widget = Record::new(widgets.clone());
        widget.set("company_id", (index + 1) as i64)?;
        widget.set("name", format!("widget of {name}"))?;
        widget.insert(&store).await?;
        println!("inserted widget {:?} for {name}", widget.primary_key());
    }

    // 销毁演示: 先销毁关联的 widgets, 再删除公司本身
    let stmt = statement::select(&companies, None, &[])?;
    let rows = store.query_rows(stmt, companies.columns()).await?;
    if let Some(attributes) = rows.into_iter().next() {
        let mut company = Record::from_loaded(companies.clone(), attributes);
        company.destroy(&store).await?;
        println!("destroyed {:?}", company.get("name"));
    }

    Ok(())
}
