use chrono::SecondsFormat;

use crate::models::TicketRecord;

pub const CSV_HEADER: &str = "createdAt,firstName,lastName,email,ticketType,quantity,notes";

/// Serialize records to the export document: fixed header, one line per
/// record, every field double-quoted with embedded quotes doubled, missing
/// notes as `""`. Lines are newline-joined with no trailing newline, so the
/// output is byte-for-byte deterministic for a given input sequence.
pub fn to_csv(records: &[TicketRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for record in records {
        let fields = [
            record
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            record.first_name.clone(),
            record.last_name.clone(),
            record.email.clone(),
            record.ticket_type.to_string(),
            record.quantity.to_string(),
            record.notes.clone().unwrap_or_default(),
        ];
        let line = fields.iter().map(|f| quote(f)).collect::<Vec<_>>().join(",");
        lines.push(line);
    }

    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketType;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn record(notes: Option<&str>) -> TicketRecord {
        TicketRecord {
            id: Uuid::nil(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ticket_type: TicketType::FirstDay,
            quantity: 2,
            notes: notes.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn empty_export_is_exactly_the_header() {
        assert_eq!(to_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn every_field_is_quoted_and_missing_notes_render_empty() {
        let csv = to_csv(&[record(None)]);
        assert_eq!(
            csv,
            format!(
                "{CSV_HEADER}\n\
                 \"2025-06-01T12:30:00.000Z\",\"Ada\",\"Lovelace\",\"ada@example.com\",\"1st Day Ticket\",\"2\",\"\""
            )
        );
    }

    #[test]
    fn embedded_double_quotes_are_doubled() {
        let csv = to_csv(&[record(Some(r#"He said "hi""#))]);
        assert!(csv.ends_with(r#","He said ""hi""""#), "got: {csv}");
    }

    #[test]
    fn output_has_no_trailing_newline() {
        let csv = to_csv(&[record(None)]);
        assert!(!csv.ends_with('\n'));
        assert_eq!(csv.lines().count(), 2);
    }
}
