use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const CURRENCIES: [&str; 9] = ["USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY", "INR"];
pub const CUSTOM_CURRENCY: &str = "CUSTOM";

/// What the selector reports after a key: the chosen code and, for the
/// custom option, the typed code if there is one.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyChoice {
    pub currency: String,
    pub custom: Option<String>,
}

pub struct CurrencySelectState {
    /// Index into the standard codes, `CURRENCIES.len()` for the custom option
    highlighted: usize,
    custom_input: String,
    pub editing: bool,
}

impl CurrencySelectState {
    pub fn new() -> Self {
        Self {
            highlighted: 0,
            custom_input: String::new(),
            editing: false,
        }
    }

    /// Start from what the invoice currently holds.
    pub fn begin(&mut self, currency: &str, custom_currency: &str) {
        self.highlighted = option_index(currency);
        self.custom_input = custom_currency.to_string();
        self.editing = true;
    }

    pub fn finish(&mut self) {
        self.editing = false;
    }

    fn option_count() -> usize {
        CURRENCIES.len() + 1
    }

    fn on_custom(&self) -> bool {
        self.highlighted == CURRENCIES.len()
    }

    fn choice(&self) -> CurrencyChoice {
        if self.on_custom() {
            CurrencyChoice {
                currency: CUSTOM_CURRENCY.to_string(),
                custom: Some(self.custom_input.clone()).filter(|c| !c.is_empty()),
            }
        } else {
            CurrencyChoice {
                currency: CURRENCIES[self.highlighted].to_string(),
                custom: None,
            }
        }
    }

    pub fn handle_input(&mut self, key: KeyCode) -> Option<CurrencyChoice> {
        if !self.editing {
            return None;
        }

        match key {
            KeyCode::Right => {
                self.highlighted = (self.highlighted + 1) % Self::option_count();
                Some(self.choice())
            }
            KeyCode::Left => {
                self.highlighted = (self.highlighted + Self::option_count() - 1) % Self::option_count();
                Some(self.choice())
            }
            KeyCode::Char(c) if self.on_custom() && !c.is_control() => {
                self.custom_input.push(c);
                Some(self.choice())
            }
            KeyCode::Backspace if self.on_custom() && self.custom_input.pop().is_some() => Some(self.choice()),
            _ => None,
        }
    }
}

impl Default for CurrencySelectState {
    fn default() -> Self {
        Self::new()
    }
}

fn option_index(currency: &str) -> usize {
    CURRENCIES
        .iter()
        .position(|code| *code == currency)
        .unwrap_or(if currency == CUSTOM_CURRENCY { CURRENCIES.len() } else { 0 })
}

/// The code to show for the invoice's current selection.
pub fn display_currency<'a>(currency: &'a str, custom_currency: &'a str) -> &'a str {
    if currency == CUSTOM_CURRENCY && !custom_currency.is_empty() {
        custom_currency
    } else {
        currency
    }
}

pub fn render_currency_select<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    currency: &str,
    custom_currency: &str,
    state: &CurrencySelectState,
    focused: bool,
) {
    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::styled("Currency: ", label_style)];
    if focused && state.editing {
        for (i, code) in CURRENCIES.iter().chain([&CUSTOM_CURRENCY]).enumerate() {
            let style = if i == state.highlighted {
                Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", code), style));
        }
        if state.on_custom() {
            spans.push(Span::raw(format!("  Code: {}|", state.custom_input)));
        }
    } else {
        spans.push(Span::raw(display_currency(currency, custom_currency).to_string()));
    }

    let paragraph = Paragraph::new(Spans::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(currency: &str, custom: &str) -> CurrencySelectState {
        let mut state = CurrencySelectState::new();
        state.begin(currency, custom);
        state
    }

    #[test]
    fn cycling_reports_standard_codes_without_custom() {
        let mut state = editing("USD", "");

        assert_eq!(
            state.handle_input(KeyCode::Right),
            Some(CurrencyChoice {
                currency: "EUR".to_string(),
                custom: None,
            })
        );
        assert_eq!(
            state.handle_input(KeyCode::Left).map(|c| c.currency),
            Some("USD".to_string())
        );
    }

    #[test]
    fn cycling_wraps_to_custom_option() {
        let mut state = editing("USD", "BTC");

        assert_eq!(
            state.handle_input(KeyCode::Left),
            Some(CurrencyChoice {
                currency: CUSTOM_CURRENCY.to_string(),
                custom: Some("BTC".to_string()),
            })
        );
    }

    #[test]
    fn typing_on_custom_reports_the_code() {
        let mut state = editing(CUSTOM_CURRENCY, "");

        state.handle_input(KeyCode::Char('X'));
        let choice = state.handle_input(KeyCode::Char('A'));

        assert_eq!(choice.and_then(|c| c.custom), Some("XA".to_string()));
    }

    #[test]
    fn empty_custom_code_is_absent() {
        let mut state = editing(CUSTOM_CURRENCY, "X");

        let choice = state.handle_input(KeyCode::Backspace);

        assert_eq!(
            choice,
            Some(CurrencyChoice {
                currency: CUSTOM_CURRENCY.to_string(),
                custom: None,
            })
        );
    }

    #[test]
    fn backspace_with_no_custom_code_reports_nothing() {
        let mut state = editing(CUSTOM_CURRENCY, "");

        assert_eq!(state.handle_input(KeyCode::Backspace), None);
    }

    #[test]
    fn letters_do_nothing_on_standard_codes() {
        let mut state = editing("GBP", "");

        assert_eq!(state.handle_input(KeyCode::Char('x')), None);
    }

    #[test]
    fn unknown_currency_starts_at_first_option() {
        assert_eq!(option_index("XYZ"), 0);
        assert_eq!(option_index("JPY"), 3);
        assert_eq!(option_index(CUSTOM_CURRENCY), CURRENCIES.len());
    }

    #[test]
    fn display_prefers_custom_code() {
        assert_eq!(display_currency(CUSTOM_CURRENCY, "BTC"), "BTC");
        assert_eq!(display_currency("EUR", "BTC"), "EUR");
    }
}
