use sqlx::PgPool;
use uuid::Uuid;

use crate::models::transformation::TransformationRecord;

/// Parameters for recording one successful rewrite.
pub struct NewTransformation<'a> {
    pub account_id: Uuid,
    pub original_text: &'a str,
    pub transformed_text: &'a str,
    pub job_description: &'a str,
    pub score: f64,
}

/// Appends a transformation to the account's history. Rows are never updated.
pub async fn insert_transformation(
    pool: &PgPool,
    params: NewTransformation<'_>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO transformations
            (id, account_id, original_text, transformed_text, job_description, score)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(params.account_id)
    .bind(params.original_text)
    .bind(params.transformed_text)
    .bind(params.job_description)
    .bind(params.score)
    .execute(pool)
    .await?;

    Ok(id)
}

/// Returns every transformation of an account, newest first.
pub async fn list_transformations(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Vec<TransformationRecord>, sqlx::Error> {
    sqlx::query_as::<_, TransformationRecord>(
        "SELECT * FROM transformations WHERE account_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}
