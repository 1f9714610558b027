//! Vendor invoice intake with holiday-aware due dates.
//!
//! - [`domain`]: the invoice entity, due date calculation and the ports they rely on
//! - [`application`]: intake use cases for manual, OCR and freight invoices
//! - [`infrastructure`]: configuration and adapters backing the ports

pub mod application;
pub mod domain;
pub mod infrastructure;
