use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The fixed set of ticket categories a reservation may request.
///
/// Serialized everywhere (JSON, CSV, Postgres) by its public label, e.g.
/// `"GA Pass + Parking"`. The database column uses a Postgres enum created
/// by the startup migration, so out-of-set values cannot reach storage even
/// if validation is bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_type")]
pub enum TicketType {
    #[serde(rename = "GA Pass")]
    #[sqlx(rename = "GA Pass")]
    GaPass,
    #[serde(rename = "GA Pass + Parking")]
    #[sqlx(rename = "GA Pass + Parking")]
    GaPassParking,
    #[serde(rename = "VIP Pass")]
    #[sqlx(rename = "VIP Pass")]
    VipPass,
    #[serde(rename = "1st Day Ticket")]
    #[sqlx(rename = "1st Day Ticket")]
    FirstDay,
    #[serde(rename = "2nd Day Ticket")]
    #[sqlx(rename = "2nd Day Ticket")]
    SecondDay,
    #[serde(rename = "Weekend Parking Pass")]
    #[sqlx(rename = "Weekend Parking Pass")]
    WeekendParking,
    #[serde(rename = "Single Day Parking")]
    #[sqlx(rename = "Single Day Parking")]
    SingleDayParking,
}

impl TicketType {
    pub const ALL: [TicketType; 7] = [
        TicketType::GaPass,
        TicketType::GaPassParking,
        TicketType::VipPass,
        TicketType::FirstDay,
        TicketType::SecondDay,
        TicketType::WeekendParking,
        TicketType::SingleDayParking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::GaPass => "GA Pass",
            TicketType::GaPassParking => "GA Pass + Parking",
            TicketType::VipPass => "VIP Pass",
            TicketType::FirstDay => "1st Day Ticket",
            TicketType::SecondDay => "2nd Day Ticket",
            TicketType::WeekendParking => "Weekend Parking Pass",
            TicketType::SingleDayParking => "Single Day Parking",
        }
    }

    /// Look up a category by its exact public label.
    pub fn from_label(label: &str) -> Option<TicketType> {
        Self::ALL.into_iter().find(|t| t.as_str() == label)
    }
}

impl std::fmt::Display for TicketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated reservation ready for insertion. `id` and `created_at` are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ticket_type: TicketType,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// One stored ticket reservation. Insert-only: records are never updated or
/// deleted once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub ticket_type: TicketType,
    pub quantity: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_lookup() {
        for ticket_type in TicketType::ALL {
            assert_eq!(TicketType::from_label(ticket_type.as_str()), Some(ticket_type));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(TicketType::from_label("Backstage Pass"), None);
        assert_eq!(TicketType::from_label("ga pass"), None);
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = TicketRecord {
            id: Uuid::nil(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ticket_type: TicketType::VipPass,
            quantity: 2,
            notes: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["ticketType"], "VIP Pass");
        assert!(json["createdAt"].is_string());
    }
}
