pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use errors::{CalendarError, DirectoryError, DueDateError};
pub use ports::{HolidayLookup, VendorTermsLookup};
pub use services::{AdjustmentPolicy, DueDateService};
pub use value_objects::{Region, VendorTerms};
