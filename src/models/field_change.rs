use crate::models::{InvoiceData, LineItem};

/// One edit to one invoice field, carrying the field's new value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    FromName(String),
    FromEmail(String),
    FromAddress(String),
    ClientName(String),
    ClientEmail(String),
    ClientAddress(String),
    Date(String),
    DueDate(String),
    Currency(String),
    CustomCurrency(String),
    Items(Vec<LineItem>),
    Tax(Option<f64>),
    Discount(Option<f64>),
    Shipping(Option<f64>),
    Note(String),
}

impl FieldChange {
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldChange::FromName(_) => "fromName",
            FieldChange::FromEmail(_) => "fromEmail",
            FieldChange::FromAddress(_) => "fromAddress",
            FieldChange::ClientName(_) => "clientName",
            FieldChange::ClientEmail(_) => "clientEmail",
            FieldChange::ClientAddress(_) => "clientAddress",
            FieldChange::Date(_) => "date",
            FieldChange::DueDate(_) => "dueDate",
            FieldChange::Currency(_) => "currency",
            FieldChange::CustomCurrency(_) => "customCurrency",
            FieldChange::Items(_) => "items",
            FieldChange::Tax(_) => "tax",
            FieldChange::Discount(_) => "discount",
            FieldChange::Shipping(_) => "shipping",
            FieldChange::Note(_) => "note",
        }
    }
}

/// The plain string fields, edited as free text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextField {
    FromName,
    FromEmail,
    FromAddress,
    ClientName,
    ClientEmail,
    ClientAddress,
    Note,
}

impl TextField {
    pub const FROM: [TextField; 3] = [TextField::FromName, TextField::FromEmail, TextField::FromAddress];
    pub const BILLED_TO: [TextField; 3] = [
        TextField::ClientName,
        TextField::ClientEmail,
        TextField::ClientAddress,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TextField::FromName | TextField::ClientName => "Name",
            TextField::FromEmail | TextField::ClientEmail => "Email",
            TextField::FromAddress | TextField::ClientAddress => "Address",
            TextField::Note => "Note",
        }
    }

    pub fn value(self, invoice: &InvoiceData) -> &str {
        match self {
            TextField::FromName => &invoice.from_name,
            TextField::FromEmail => &invoice.from_email,
            TextField::FromAddress => &invoice.from_address,
            TextField::ClientName => &invoice.client_name,
            TextField::ClientEmail => &invoice.client_email,
            TextField::ClientAddress => &invoice.client_address,
            TextField::Note => &invoice.note,
        }
    }

    pub fn change(self, value: String) -> FieldChange {
        match self {
            TextField::FromName => FieldChange::FromName(value),
            TextField::FromEmail => FieldChange::FromEmail(value),
            TextField::FromAddress => FieldChange::FromAddress(value),
            TextField::ClientName => FieldChange::ClientName(value),
            TextField::ClientEmail => FieldChange::ClientEmail(value),
            TextField::ClientAddress => FieldChange::ClientAddress(value),
            TextField::Note => FieldChange::Note(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_change_round_trips_through_apply() {
        let fields = TextField::FROM
            .into_iter()
            .chain(TextField::BILLED_TO)
            .chain([TextField::Note]);

        for field in fields {
            let mut invoice = InvoiceData::default();
            invoice.apply(field.change(format!("{:?} value", field)));
            assert_eq!(field.value(&invoice), format!("{:?} value", field));
        }
    }

    #[test]
    fn field_names_match_the_record_keys() {
        assert_eq!(FieldChange::DueDate(String::new()).field_name(), "dueDate");
        assert_eq!(FieldChange::CustomCurrency(String::new()).field_name(), "customCurrency");
        assert_eq!(FieldChange::Items(Vec::new()).field_name(), "items");
    }
}
