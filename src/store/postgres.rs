use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewTicket, TicketRecord};
use crate::store::TicketStore;
use crate::utils::error::AppError;

const RECORD_COLUMNS: &str =
    "id, first_name, last_name, email, ticket_type, quantity, notes, created_at";

/// Postgres-backed ticket store. The `tickets` table and the `ticket_type`
/// enum are created by the startup migration; `id` and `created_at` default
/// server-side.
#[derive(Clone)]
pub struct PgTicketStore {
    pool: PgPool,
}

impl PgTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn create(&self, ticket: NewTicket) -> Result<TicketRecord, AppError> {
        let record = sqlx::query_as::<_, TicketRecord>(&format!(
            "INSERT INTO tickets (first_name, last_name, email, ticket_type, quantity, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {RECORD_COLUMNS}"
        ))
        .bind(&ticket.first_name)
        .bind(&ticket.last_name)
        .bind(&ticket.email)
        .bind(ticket.ticket_type)
        .bind(ticket.quantity)
        .bind(&ticket.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list(&self, limit: i64) -> Result<Vec<TicketRecord>, AppError> {
        let records = sqlx::query_as::<_, TicketRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM tickets ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn list_all(&self) -> Result<Vec<TicketRecord>, AppError> {
        let records = sqlx::query_as::<_, TicketRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM tickets ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
