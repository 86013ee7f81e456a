use crate::models::numeric::decimal_text;

/// One row of the invoice's item table.
///
/// `None` in a numeric column means the input held text that did not parse.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
}

impl LineItem {
    /// The row appended by "Add item".
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            quantity: Some(1),
            price: Some(0.0),
            amount: Some(0.0),
        }
    }

    /// Re-derive `amount` from `quantity` and `price`.
    pub fn recompute_amount(&mut self) {
        self.amount = amount_of(self.quantity, self.price);
    }

    /// `$` plus two decimals, or `$NaN` when either operand failed to parse.
    pub fn amount_display(&self) -> String {
        match self.amount {
            Some(amount) if amount.is_infinite() => format!("${}", decimal_text(amount)),
            Some(amount) => format!("${:.2}", amount),
            None => "$NaN".to_string(),
        }
    }
}

pub fn amount_of(quantity: Option<i64>, price: Option<f64>) -> Option<f64> {
    match (quantity, price) {
        (Some(quantity), Some(price)) => Some(quantity as f64 * price),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_row_is_one_free_unit() {
        let item = LineItem::blank();
        assert_eq!(item.name, "");
        assert_eq!(item.quantity, Some(1));
        assert_eq!(item.price, Some(0.0));
        assert_eq!(item.amount, Some(0.0));
    }

    #[test]
    fn amount_follows_quantity_and_price() {
        let mut item = LineItem {
            name: "Widget".to_string(),
            quantity: Some(3),
            price: Some(2.5),
            amount: None,
        };
        item.recompute_amount();
        assert_eq!(item.amount, Some(7.5));
        assert_eq!(item.amount_display(), "$7.50");
    }

    #[test]
    fn missing_operand_gives_nan_amount() {
        assert_eq!(amount_of(None, Some(2.0)), None);
        assert_eq!(amount_of(Some(2), None), None);

        let item = LineItem {
            name: String::new(),
            quantity: None,
            price: Some(4.0),
            amount: None,
        };
        assert_eq!(item.amount_display(), "$NaN");
    }

    #[test]
    fn overflowing_amount_shows_infinity() {
        let mut item = LineItem {
            name: String::new(),
            quantity: Some(-2),
            price: Some(f64::INFINITY),
            amount: None,
        };
        item.recompute_amount();
        assert_eq!(item.amount_display(), "$-Infinity");

        item.quantity = Some(3);
        item.recompute_amount();
        assert_eq!(item.amount_display(), "$Infinity");
    }
}
