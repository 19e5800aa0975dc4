use crate::models::DbVip;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use visitday_core::models::vip::NewVip;

pub async fn create_vip(pool: &Pool<Postgres>, vip: &NewVip) -> Result<DbVip> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let vip = sqlx::query_as::<_, DbVip>(
        r#"
        INSERT INTO vips (id, program_id, name, title, profile_url, ranking, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, program_id, name, title, profile_url, ranking, created_at
        "#,
    )
    .bind(id)
    .bind(vip.program_id)
    .bind(&vip.name)
    .bind(&vip.title)
    .bind(&vip.profile_url)
    .bind(vip.ranking)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(vip)
}

pub async fn get_vip_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbVip>> {
    let vip = sqlx::query_as::<_, DbVip>(
        r#"
        SELECT id, program_id, name, title, profile_url, ranking, created_at
        FROM vips
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(vip)
}

pub async fn get_vips_by_program_id(pool: &Pool<Postgres>, program_id: Uuid) -> Result<Vec<DbVip>> {
    let vips = sqlx::query_as::<_, DbVip>(
        r#"
        SELECT id, program_id, name, title, profile_url, ranking, created_at
        FROM vips
        WHERE program_id = $1
        ORDER BY ranking ASC NULLS LAST, name ASC
        "#,
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;

    Ok(vips)
}
