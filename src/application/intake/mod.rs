//! Invoice intake use cases
//!
//! Each channel turns its own input shape into an [`InvoiceRequest`] and hands
//! it to [`InvoiceIntake`], which computes the due date, builds the invoice and
//! stores it.

pub mod errors;
pub mod freight_integration;
pub mod manual_entry;
pub mod ocr_extraction;
pub mod pipeline;
pub mod request;

pub use errors::IntakeError;
pub use freight_integration::{FreightCharge, FreightInvoiceUseCase, FreightRecord};
pub use manual_entry::{ManualInvoiceCommand, ManualInvoiceUseCase};
pub use ocr_extraction::{OcrExtraction, OcrField, OcrInvoiceUseCase};
pub use pipeline::InvoiceIntake;
pub use request::{IntakeChannel, IntakeResponse, InvoiceRequest};
