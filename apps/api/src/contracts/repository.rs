use sqlx::PgPool;
use uuid::Uuid;

use crate::models::contract::ContractRow;

pub async fn insert_contract(
    pool: &PgPool,
    deal_id: Uuid,
    contract_text: &str,
    pdf_url: &str,
) -> Result<ContractRow, sqlx::Error> {
    sqlx::query_as::<_, ContractRow>(
        r#"
        INSERT INTO contracts (id, deal_id, contract_text, pdf_url)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(deal_id)
    .bind(contract_text)
    .bind(pdf_url)
    .fetch_one(pool)
    .await
}
