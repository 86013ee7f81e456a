use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::numeric::{decimal_text, is_number_input_char, parse_decimal_prefix};
use crate::models::{Adjustments, FieldChange};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Adjustment {
    Tax,
    Discount,
    Shipping,
}

impl Adjustment {
    const ALL: [Adjustment; 3] = [Adjustment::Tax, Adjustment::Discount, Adjustment::Shipping];

    fn label(self) -> &'static str {
        match self {
            Adjustment::Tax => "Tax",
            Adjustment::Discount => "Discount",
            Adjustment::Shipping => "Shipping",
        }
    }

    fn value(self, data: &Adjustments) -> Option<f64> {
        match self {
            Adjustment::Tax => data.tax,
            Adjustment::Discount => data.discount,
            Adjustment::Shipping => data.shipping,
        }
    }

    fn change(self, value: Option<f64>) -> FieldChange {
        match self {
            Adjustment::Tax => FieldChange::Tax(value),
            Adjustment::Discount => FieldChange::Discount(value),
            Adjustment::Shipping => FieldChange::Shipping(value),
        }
    }
}

/// Tax, discount and shipping inputs. Writes straight through the form's
/// change callback.
pub struct AdditionalFieldsState {
    current: Adjustment,
    raw: String,
    pub editing: bool,
}

impl AdditionalFieldsState {
    pub fn new() -> Self {
        Self {
            current: Adjustment::Tax,
            raw: String::new(),
            editing: false,
        }
    }

    pub fn begin(&mut self, data: &Adjustments) {
        self.current = Adjustment::Tax;
        self.raw = number_text(self.current.value(data));
        self.editing = true;
    }

    pub fn finish(&mut self) {
        self.editing = false;
        self.raw.clear();
    }

    fn focus(&mut self, adjustment: Adjustment, data: &Adjustments) {
        self.current = adjustment;
        self.raw = number_text(adjustment.value(data));
    }

    pub fn handle_input(
        &mut self,
        key: KeyCode,
        data: &Adjustments,
        on_change: &mut impl FnMut(FieldChange),
    ) {
        if !self.editing {
            return;
        }

        let position = Adjustment::ALL
            .iter()
            .position(|a| *a == self.current)
            .unwrap_or(0);

        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.focus(Adjustment::ALL[(position + 1) % Adjustment::ALL.len()], data);
            }
            KeyCode::BackTab | KeyCode::Up => {
                let previous = (position + Adjustment::ALL.len() - 1) % Adjustment::ALL.len();
                self.focus(Adjustment::ALL[previous], data);
            }
            KeyCode::Char(c) if is_number_input_char(c) => {
                self.raw.push(c);
                on_change(self.current.change(parse_decimal_prefix(&self.raw)));
            }
            KeyCode::Backspace if self.raw.pop().is_some() => {
                on_change(self.current.change(parse_decimal_prefix(&self.raw)));
            }
            _ => {}
        }
    }
}

impl Default for AdditionalFieldsState {
    fn default() -> Self {
        Self::new()
    }
}

/// How a stored number reads back in an input; NaN shows as empty.
pub fn number_text(value: Option<f64>) -> String {
    value.map(decimal_text).unwrap_or_default()
}

pub fn render_additional_fields<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    data: &Adjustments,
    state: &AdditionalFieldsState,
    focused: bool,
) {
    let block = Block::default()
        .title("Additional Fields")
        .borders(Borders::ALL)
        .style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ]
            .as_ref(),
        )
        .split(inner);

    for (adjustment, column) in Adjustment::ALL.iter().zip(columns) {
        let active = focused && state.editing && state.current == *adjustment;
        let value = if active {
            format!("{}|", state.raw)
        } else {
            number_text(adjustment.value(data))
        };

        let style = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let paragraph = Paragraph::new(Spans::from(vec![
            Span::styled(format!("{}: ", adjustment.label()), style),
            Span::raw(value),
        ]));
        frame.render_widget(paragraph, column);
    }
}
