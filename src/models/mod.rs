pub mod ticket;

pub use ticket::{NewTicket, TicketRecord, TicketType};
