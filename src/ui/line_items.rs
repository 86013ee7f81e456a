//! Edits to the item table. Each function returns a fresh list so the owner
//! of the invoice sees a replaced value; the input slice is left alone.
//! Rows are addressed by position.

use crate::error::FormError;
use crate::models::LineItem;
use crate::models::numeric::{parse_decimal_prefix, parse_int_prefix};

pub fn rename(items: &[LineItem], index: usize, name: &str) -> Result<Vec<LineItem>, FormError> {
    edit_row(items, index, |item| item.name = name.to_string())
}

/// Parse `raw` as a whole number and re-derive that row's amount.
pub fn set_quantity(items: &[LineItem], index: usize, raw: &str) -> Result<Vec<LineItem>, FormError> {
    edit_row(items, index, |item| {
        item.quantity = parse_int_prefix(raw);
        item.recompute_amount();
    })
}

/// Parse `raw` as a decimal and re-derive that row's amount.
pub fn set_price(items: &[LineItem], index: usize, raw: &str) -> Result<Vec<LineItem>, FormError> {
    edit_row(items, index, |item| {
        item.price = parse_decimal_prefix(raw);
        item.recompute_amount();
    })
}

pub fn remove(items: &[LineItem], index: usize) -> Result<Vec<LineItem>, FormError> {
    check_index(items, index)?;

    Ok(items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect())
}

pub fn append_blank(items: &[LineItem]) -> Vec<LineItem> {
    let mut new_items = items.to_vec();
    new_items.push(LineItem::blank());
    new_items
}

fn edit_row<F>(items: &[LineItem], index: usize, edit: F) -> Result<Vec<LineItem>, FormError>
where
    F: FnOnce(&mut LineItem),
{
    check_index(items, index)?;

    let mut new_items = items.to_vec();
    edit(&mut new_items[index]);
    Ok(new_items)
}

fn check_index(items: &[LineItem], index: usize) -> Result<(), FormError> {
    if index < items.len() {
        Ok(())
    } else {
        Err(FormError::RowOutOfRange {
            index,
            len: items.len(),
        })
    }
}
