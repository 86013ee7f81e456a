use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("row {index} does not exist, the invoice has {len} item(s)")]
    RowOutOfRange { index: usize, len: usize },
}
