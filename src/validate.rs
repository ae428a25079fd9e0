use serde::Deserialize;
use serde_json::Value;

use crate::models::{NewTicket, TicketType};

const MAX_NAME_LEN: usize = 80;
const MAX_EMAIL_LEN: usize = 160;
const MAX_NOTES_LEN: usize = 1000;
const MIN_QUANTITY: i64 = 1;
const MAX_QUANTITY: i64 = 20;

/// A raw reservation submission as posted by a client. Every field is
/// optional at this layer; `validate` decides what is actually acceptable.
/// `quantity` is kept as a raw JSON value so that both `5` and `"5"` reach
/// the validator instead of failing body deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketSubmission {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub ticket_type: Option<String>,
    pub quantity: Option<Value>,
    pub notes: Option<String>,
}

/// Check a raw submission against the field rules and normalize it.
///
/// Returns either a fully normalized [`NewTicket`] or a non-empty list of
/// human-readable error messages, at most one per field, in stable field
/// order: firstName, lastName, email, ticketType, quantity, notes. Nothing
/// partially normalized escapes a failed validation.
pub fn validate(submission: TicketSubmission) -> Result<NewTicket, Vec<String>> {
    let mut errors = Vec::new();

    let first_name = check_name("firstName", submission.first_name, &mut errors);
    let last_name = check_name("lastName", submission.last_name, &mut errors);
    let email = check_email(submission.email, &mut errors);
    let ticket_type = check_ticket_type(submission.ticket_type, &mut errors);
    let quantity = check_quantity(submission.quantity, &mut errors);
    let notes = check_notes(submission.notes, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // Every `check_*` returned Some when it pushed no error.
    Ok(NewTicket {
        first_name: first_name.unwrap(),
        last_name: last_name.unwrap(),
        email: email.unwrap(),
        ticket_type: ticket_type.unwrap(),
        quantity: quantity.unwrap(),
        notes: notes.unwrap_or(None),
    })
}

fn check_name(field: &str, value: Option<String>, errors: &mut Vec<String>) -> Option<String> {
    let trimmed = value.as_deref().unwrap_or("").trim().to_string();
    if trimmed.is_empty() {
        errors.push(format!("{field} is required"));
        return None;
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        errors.push(format!("{field} must be at most {MAX_NAME_LEN} characters"));
        return None;
    }
    Some(trimmed)
}

fn check_email(value: Option<String>, errors: &mut Vec<String>) -> Option<String> {
    let normalized = value.as_deref().unwrap_or("").trim().to_lowercase();
    if normalized.is_empty() {
        errors.push("email is required".to_string());
        return None;
    }
    if normalized.chars().count() > MAX_EMAIL_LEN {
        errors.push(format!("email must be at most {MAX_EMAIL_LEN} characters"));
        return None;
    }
    if !has_email_shape(&normalized) {
        errors.push("email must be a valid address like name@example.com".to_string());
        return None;
    }
    Some(normalized)
}

/// Exactly one `@`, a non-empty whitespace-free part on each side, and a
/// `.` somewhere in the domain part.
fn has_email_shape(address: &str) -> bool {
    let mut parts = address.splitn(3, '@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !local.chars().any(char::is_whitespace)
        && !domain.chars().any(char::is_whitespace)
        && domain.contains('.')
}

fn check_ticket_type(value: Option<String>, errors: &mut Vec<String>) -> Option<TicketType> {
    let trimmed = value.as_deref().unwrap_or("").trim().to_string();
    if trimmed.is_empty() {
        errors.push("ticketType is required".to_string());
        return None;
    }
    match TicketType::from_label(&trimmed) {
        Some(ticket_type) => Some(ticket_type),
        None => {
            errors.push("ticketType must be one of the offered ticket categories".to_string());
            None
        }
    }
}

fn check_quantity(value: Option<Value>, errors: &mut Vec<String>) -> Option<i32> {
    let Some(raw) = value else {
        errors.push("quantity is required".to_string());
        return None;
    };

    // Submissions arrive untyped; accept a JSON integer or a numeric string.
    let parsed = match &raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        Some(q) if (MIN_QUANTITY..=MAX_QUANTITY).contains(&q) => Some(q as i32),
        Some(_) => {
            errors.push(format!(
                "quantity must be between {MIN_QUANTITY} and {MAX_QUANTITY}"
            ));
            None
        }
        None => {
            errors.push("quantity must be a whole number".to_string());
            None
        }
    }
}

/// Returns `Some(normalized)` on success; the outer Option collapses a
/// blank or absent notes field to None.
fn check_notes(value: Option<String>, errors: &mut Vec<String>) -> Option<Option<String>> {
    let trimmed = value.as_deref().unwrap_or("").trim().to_string();
    if trimmed.is_empty() {
        return Some(None);
    }
    if trimmed.chars().count() > MAX_NOTES_LEN {
        errors.push(format!("notes must be at most {MAX_NOTES_LEN} characters"));
        return None;
    }
    Some(Some(trimmed))
}
