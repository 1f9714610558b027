pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::Invoice;
pub use errors::{InvoiceEntityError, StoreError};
pub use ports::InvoiceStore;
pub use value_objects::{Amount, InvoiceStatus, ValueObjectError, VendorId};
