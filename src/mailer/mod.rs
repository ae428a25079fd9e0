use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::warn;

use crate::config::MailConfig;
use crate::models::TicketRecord;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("invalid message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Best-effort confirmation mailer over SMTP.
///
/// `notify` is called from a detached task after a reservation is stored;
/// every failure is logged and swallowed so mail trouble can never affect a
/// response that has already been decided.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    admin: Option<Mailbox>,
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailerError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        // Unauthenticated relays are allowed; only send AUTH when a
        // username is configured.
        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }
        let transport = builder.build();

        Ok(Self {
            transport,
            from: config.from.parse()?,
            admin: config.admin.as_deref().map(str::parse).transpose()?,
        })
    }

    /// Send the guest confirmation and, if configured, the admin copy.
    /// Never fails: dispatch problems are logged and dropped.
    pub async fn notify(&self, record: &TicketRecord) {
        if let Err(e) = self.send_guest_confirmation(record).await {
            warn!(error = %e, email = %record.email, "Failed to send guest confirmation");
        }

        if let Some(admin) = self.admin.clone() {
            if let Err(e) = self.send_admin_copy(admin, record).await {
                warn!(error = %e, "Failed to send admin notification");
            }
        }
    }

    async fn send_guest_confirmation(&self, record: &TicketRecord) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(record.email.parse()?)
            .subject("Your ticket reservation is confirmed")
            .header(ContentType::TEXT_PLAIN)
            .body(guest_body(record))?;

        self.transport.send(message).await?;
        Ok(())
    }

    async fn send_admin_copy(
        &self,
        admin: Mailbox,
        record: &TicketRecord,
    ) -> Result<(), MailerError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(admin)
            .subject("New ticket reservation")
            .header(ContentType::TEXT_PLAIN)
            .body(admin_body(record))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

fn guest_body(record: &TicketRecord) -> String {
    format!(
        "Hi {first},\n\n\
         Thanks for your reservation. Here is what we have on file:\n\n\
         Ticket: {ticket} x {quantity}\n\
         Reserved at: {created}\n\n\
         See you at the gate!\n",
        first = record.first_name,
        ticket = record.ticket_type,
        quantity = record.quantity,
        created = record.created_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

fn admin_body(record: &TicketRecord) -> String {
    format!(
        "New reservation {id}:\n\n\
         Name: {first} {last}\n\
         Email: {email}\n\
         Ticket: {ticket} x {quantity}\n\
         Notes: {notes}\n",
        id = record.id,
        first = record.first_name,
        last = record.last_name,
        email = record.email,
        ticket = record.ticket_type,
        quantity = record.quantity,
        notes = record.notes.as_deref().unwrap_or("-"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketType;
    use chrono::Utc;
    use uuid::Uuid;

    fn record() -> TicketRecord {
        TicketRecord {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ticket_type: TicketType::GaPassParking,
            quantity: 4,
            notes: Some("arriving late".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn guest_body_names_the_guest_and_the_ticket() {
        let body = guest_body(&record());
        assert!(body.contains("Hi Ada"));
        assert!(body.contains("GA Pass + Parking x 4"));
    }

    #[test]
    fn admin_body_carries_the_full_record() {
        let body = admin_body(&record());
        assert!(body.contains("Ada Lovelace"));
        assert!(body.contains("ada@example.com"));
        assert!(body.contains("arriving late"));
    }

    #[test]
    fn mailer_rejects_an_invalid_sender_address() {
        let config = MailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "mailer".to_string(),
            smtp_password: "secret".to_string(),
            from: "not an address".to_string(),
            admin: None,
        };
        assert!(Mailer::new(&config).is_err());
    }
}
