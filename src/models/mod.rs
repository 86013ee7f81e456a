mod field_change;
mod invoice_data;
mod line_item;
pub mod numeric;

pub use field_change::{FieldChange, TextField};
pub use invoice_data::{Adjustments, DATE_FORMAT, InvoiceData};
pub use line_item::LineItem;
