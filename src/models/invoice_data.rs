use anyhow::{Result, anyhow};
use chrono::{Days, NaiveDate};

use crate::config::Config;
use crate::models::{FieldChange, LineItem};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The invoice being edited. Owned by the application loop; the form only
/// ever sees it by shared reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceData {
    pub from_name: String,
    pub from_email: String,
    pub from_address: String,
    pub client_name: String,
    pub client_email: String,
    pub client_address: String,
    pub date: String,
    pub due_date: String,
    pub currency: String,
    pub custom_currency: String,
    pub items: Vec<LineItem>,
    pub tax: Option<f64>,
    pub discount: Option<f64>,
    pub shipping: Option<f64>,
    pub note: String,
}

/// The three values handed to the additional fields editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    pub tax: Option<f64>,
    pub discount: Option<f64>,
    pub shipping: Option<f64>,
}

impl InvoiceData {
    /// Fails when `today + due_days` falls outside the calendar chrono can represent.
    pub fn new(config: &Config, today: NaiveDate) -> Result<Self> {
        let offset = Days::new(config.due_days.unsigned_abs());
        let due = if config.due_days >= 0 {
            today.checked_add_days(offset)
        } else {
            today.checked_sub_days(offset)
        }
        .ok_or_else(|| anyhow!("due date {} days from {} is out of range", config.due_days, today))?;

        Ok(Self {
            from_name: config.from_name.clone(),
            from_email: config.from_email.clone(),
            from_address: config.from_address.clone(),
            date: today.format(DATE_FORMAT).to_string(),
            due_date: due.format(DATE_FORMAT).to_string(),
            currency: config.currency.clone(),
            tax: Some(0.0),
            discount: Some(0.0),
            shipping: Some(0.0),
            ..Default::default()
        })
    }

    pub fn adjustments(&self) -> Adjustments {
        Adjustments {
            tax: self.tax,
            discount: self.discount,
            shipping: self.shipping,
        }
    }

    /// Replace the one field named by `change`.
    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::FromName(v) => self.from_name = v,
            FieldChange::FromEmail(v) => self.from_email = v,
            FieldChange::FromAddress(v) => self.from_address = v,
            FieldChange::ClientName(v) => self.client_name = v,
            FieldChange::ClientEmail(v) => self.client_email = v,
            FieldChange::ClientAddress(v) => self.client_address = v,
            FieldChange::Date(v) => self.date = v,
            FieldChange::DueDate(v) => self.due_date = v,
            FieldChange::Currency(v) => self.currency = v,
            FieldChange::CustomCurrency(v) => self.custom_currency = v,
            FieldChange::Items(v) => self.items = v,
            FieldChange::Tax(v) => self.tax = v,
            FieldChange::Discount(v) => self.discount = v,
            FieldChange::Shipping(v) => self.shipping = v,
            FieldChange::Note(v) => self.note = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> Config {
        Config {
            from_name: "Acme Ltd".to_string(),
            from_email: "billing@acme.test".to_string(),
            from_address: "1 Main St".to_string(),
            currency: "EUR".to_string(),
            due_days: 14,
            log_file: None::<PathBuf>,
            log_filter: "info".to_string(),
        }
    }

    #[test]
    fn new_invoice_is_seeded_from_config() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let invoice = InvoiceData::new(&config(), today).unwrap();

        assert_eq!(invoice.from_name, "Acme Ltd");
        assert_eq!(invoice.from_email, "billing@acme.test");
        assert_eq!(invoice.date, "2024-01-25");
        assert_eq!(invoice.due_date, "2024-02-08");
        assert_eq!(invoice.currency, "EUR");
        assert!(invoice.client_name.is_empty());
        assert!(invoice.items.is_empty());
        assert_eq!(invoice.tax, Some(0.0));
    }

    #[test]
    fn negative_due_days_go_backwards() {
        let config = Config { due_days: -10, ..config() };
        let invoice = InvoiceData::new(&config, NaiveDate::from_ymd_opt(2024, 1, 25).unwrap()).unwrap();

        assert_eq!(invoice.due_date, "2024-01-15");
    }

    #[test]
    fn unrepresentable_due_date_is_an_error() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for due_days in [200_000_000, -200_000_000, 10_000_000_000_000, i64::MIN] {
            let config = Config { due_days, ..config() };
            assert!(InvoiceData::new(&config, today).is_err(), "due_days = {}", due_days);
        }
    }

    #[test]
    fn apply_replaces_only_the_named_field() {
        let mut invoice = InvoiceData::new(&config(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
        let before = invoice.clone();

        invoice.apply(FieldChange::ClientEmail("ops@client.test".to_string()));

        assert_eq!(invoice.client_email, "ops@client.test");
        assert_eq!(
            InvoiceData {
                client_email: before.client_email.clone(),
                ..invoice.clone()
            },
            before
        );
    }

    #[test]
    fn apply_replaces_items_and_adjustments() {
        let mut invoice = InvoiceData::default();

        invoice.apply(FieldChange::Items(vec![LineItem::blank()]));
        invoice.apply(FieldChange::Shipping(Some(12.0)));
        invoice.apply(FieldChange::Tax(None));

        assert_eq!(invoice.items, vec![LineItem::blank()]);
        assert_eq!(
            invoice.adjustments(),
            Adjustments {
                tax: None,
                discount: None,
                shipping: Some(12.0),
            }
        );
    }
}
