use async_trait::async_trait;

use crate::models::{NewTicket, TicketRecord};
use crate::utils::error::AppError;

pub mod memory;
pub mod postgres;

pub use memory::MemoryTicketStore;
pub use postgres::PgTicketStore;

/// Default number of records returned by the admin listing endpoint.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Persistence gateway for the ticket reservation collection.
///
/// Insert-only: there is deliberately no update or delete operation. The
/// store assigns `id` and `created_at` on insert and guarantees that
/// `created_at` is non-decreasing with insertion order.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Insert a validated reservation and return the stored record.
    async fn create(&self, ticket: NewTicket) -> Result<TicketRecord, AppError>;

    /// The most recent `limit` records, newest first.
    async fn list(&self, limit: i64) -> Result<Vec<TicketRecord>, AppError>;

    /// Every stored record, newest first, for export.
    async fn list_all(&self) -> Result<Vec<TicketRecord>, AppError>;

    /// Whether the underlying store is currently reachable.
    async fn ping(&self) -> bool;
}
