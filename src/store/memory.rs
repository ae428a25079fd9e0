use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{NewTicket, TicketRecord};
use crate::store::TicketStore;
use crate::utils::error::AppError;

/// In-memory ticket store backing the integration tests. Mirrors the
/// Postgres store's guarantees: unique ids and `created_at` non-decreasing
/// with insertion order.
#[derive(Default)]
pub struct MemoryTicketStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    records: Vec<TicketRecord>,
    last_created: Option<DateTime<Utc>>,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn create(&self, ticket: NewTicket) -> Result<TicketRecord, AppError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");

        // Clamp the clock so concurrent inserts never observe a created_at
        // earlier than an already stored record.
        let mut created_at = Utc::now();
        if let Some(last) = inner.last_created {
            created_at = created_at.max(last);
        }
        inner.last_created = Some(created_at);

        let record = TicketRecord {
            id: Uuid::new_v4(),
            first_name: ticket.first_name,
            last_name: ticket.last_name,
            email: ticket.email,
            ticket_type: ticket.ticket_type,
            quantity: ticket.quantity,
            notes: ticket.notes,
            created_at,
        };
        inner.records.push(record.clone());

        Ok(record)
    }

    async fn list(&self, limit: i64) -> Result<Vec<TicketRecord>, AppError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .records
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<TicketRecord>, AppError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.records.iter().rev().cloned().collect())
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketType;

    fn new_ticket(email: &str) -> NewTicket {
        NewTicket {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            ticket_type: TicketType::GaPass,
            quantity: 1,
            notes: None,
        }
    }

    #[tokio::test]
    async fn listing_returns_newest_first() {
        let store = MemoryTicketStore::new();
        store.create(new_ticket("first@example.com")).await.unwrap();
        store.create(new_ticket("second@example.com")).await.unwrap();

        let records = store.list(50).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email, "second@example.com");
        assert!(records[0].created_at >= records[1].created_at);
    }

    #[tokio::test]
    async fn list_honors_the_limit() {
        let store = MemoryTicketStore::new();
        for i in 0..5 {
            store.create(new_ticket(&format!("{i}@example.com"))).await.unwrap();
        }

        assert_eq!(store.list(3).await.unwrap().len(), 3);
        assert_eq!(store.list_all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = MemoryTicketStore::new();
        let a = store.create(new_ticket("a@example.com")).await.unwrap();
        let b = store.create(new_ticket("b@example.com")).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
