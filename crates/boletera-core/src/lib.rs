//! Core contracts and helpers for Boletera.
//!
//! This crate defines the canonical ticket and series types, the payload
//! record handed to scannable-image encoders, and utilities shared across
//! the catalog, the export pipeline, and the CLI.

pub mod codes;
pub mod ticket;

pub use codes::{folio_span, ticket_code};
pub use ticket::{Series, SheetRow, Ticket, TicketPayload};

/// Storage key under which the serialized catalog lives.
pub const TICKETS_KEY: &str = "tickets_v1";
/// Storage key under which the serialized series registry lives.
pub const SERIES_KEY: &str = "saved_series_v1";
/// Storage key for the display preference; read and written by the CLI only.
pub const DARK_PREF_KEY: &str = "pref_dark";
