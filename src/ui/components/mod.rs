pub mod additional_fields;
pub mod currency_select;
pub mod date_input;
