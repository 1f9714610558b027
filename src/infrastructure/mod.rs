//! Infrastructure layer
//!
//! Configuration and the adapters that back the domain ports.

pub mod batch;
pub mod calendar;
pub mod config;
pub mod directory;
pub mod persistence;

pub use batch::{BatchOutcome, BatchProcessor, EnvelopeError, IntakeEnvelope, Outcome};
pub use calendar::{RegionCalendar, RegionalHolidayCalendar};
pub use directory::ConfiguredVendorDirectory;
pub use persistence::InMemoryInvoiceStore;
