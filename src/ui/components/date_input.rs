use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::DATE_FORMAT;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

/// Segmented `YYYY-MM-DD` entry for one date field.
pub struct DateInputState {
    pub date: NaiveDate,
    pub editing: bool,
    pub date_part: DatePart,
    pub current_date_input: String,
}

impl DateInputState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            editing: false,
            date_part: DatePart::Year,
            current_date_input: String::new(),
        }
    }

    /// Start editing from the field's current text, or `fallback` when the
    /// field is empty or not a date.
    pub fn begin(&mut self, value: &str, fallback: NaiveDate) {
        self.date = NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap_or(fallback);
        self.editing = true;
        self.date_part = DatePart::Year;
        self.current_date_input.clear();
    }

    pub fn finish(&mut self) {
        self.editing = false;
        self.current_date_input.clear();
    }

    pub fn next_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.current_date_input.clear();
    }

    pub fn previous_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.current_date_input.clear();
    }

    /// Feed one key. Returns the field's new text when the key changed it:
    /// a completed segment that forms a real date, or Delete to clear.
    pub fn handle_input(&mut self, key: KeyCode) -> Option<String> {
        if !self.editing {
            return None;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.current_date_input.push(c);
                let width = match self.date_part {
                    DatePart::Year => 4,
                    DatePart::Month | DatePart::Day => 2,
                };
                if self.current_date_input.len() < width {
                    return None;
                }

                let entered = std::mem::take(&mut self.current_date_input);
                let (year, month, day) = (self.date.year(), self.date.month(), self.date.day());
                let candidate = match self.date_part {
                    DatePart::Year => entered
                        .parse::<i32>()
                        .ok()
                        .filter(|y| (1900..=2100).contains(y))
                        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day)),
                    DatePart::Month => entered
                        .parse::<u32>()
                        .ok()
                        .and_then(|m| NaiveDate::from_ymd_opt(year, m, day)),
                    DatePart::Day => entered
                        .parse::<u32>()
                        .ok()
                        .and_then(|d| NaiveDate::from_ymd_opt(year, month, d)),
                };

                candidate.map(|date| {
                    self.date = date;
                    date.format(DATE_FORMAT).to_string()
                })
            }
            KeyCode::Backspace => {
                self.current_date_input.pop();
                None
            }
            KeyCode::Delete => {
                self.current_date_input.clear();
                Some(String::new())
            }
            KeyCode::Right => {
                self.next_date_part();
                None
            }
            KeyCode::Left => {
                self.previous_date_part();
                None
            }
            _ => None,
        }
    }

    pub fn get_display_string(&self) -> String {
        let year = format!("{:04}", self.date.year());
        let month = format!("{:02}", self.date.month());
        let day = format!("{:02}", self.date.day());

        let current_input = if !self.current_date_input.is_empty() {
            format!("[{}]", self.current_date_input)
        } else {
            match self.date_part {
                DatePart::Year => "[YYYY]".to_string(),
                DatePart::Month => "[MM]".to_string(),
                DatePart::Day => "[DD]".to_string(),
            }
        };

        match self.date_part {
            DatePart::Year => format!("{}{}-{}-{}", year, current_input, month, day),
            DatePart::Month => format!("{}-{}{}-{}", year, month, current_input, day),
            DatePart::Day => format!("{}-{}-{}{}", year, month, day, current_input),
        }
    }
}

pub fn render_date_input<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    label: &str,
    value: &str,
    state: &DateInputState,
    focused: bool,
) {
    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let shown = if focused && state.editing {
        state.get_display_string()
    } else if value.is_empty() {
        "yyyy-mm-dd".to_string()
    } else {
        value.to_string()
    };

    let paragraph = Paragraph::new(Spans::from(vec![
        Span::styled(format!("{}: ", label), label_style),
        Span::raw(shown),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(value: &str) -> DateInputState {
        let fallback = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut state = DateInputState::new(fallback);
        state.begin(value, fallback);
        state
    }

    fn type_digits(state: &mut DateInputState, digits: &str) -> Vec<String> {
        digits
            .chars()
            .filter_map(|c| state.handle_input(KeyCode::Char(c)))
            .collect()
    }

    #[test]
    fn completed_year_emits_full_date() {
        let mut state = editing("2024-03-15");

        let emitted = type_digits(&mut state, "2025");

        assert_eq!(emitted, vec!["2025-03-15".to_string()]);
    }

    #[test]
    fn partial_segment_emits_nothing() {
        let mut state = editing("2024-03-15");

        assert!(type_digits(&mut state, "20").is_empty());
        assert_eq!(state.get_display_string(), "2024[20]-03-15");
    }

    #[test]
    fn month_and_day_segments() {
        let mut state = editing("2024-03-15");
        state.handle_input(KeyCode::Right);
        assert_eq!(type_digits(&mut state, "11"), vec!["2024-11-15".to_string()]);

        state.handle_input(KeyCode::Right);
        assert_eq!(type_digits(&mut state, "30"), vec!["2024-11-30".to_string()]);
    }

    #[test]
    fn impossible_date_is_ignored() {
        let mut state = editing("2024-03-31");
        state.handle_input(KeyCode::Right);

        assert!(type_digits(&mut state, "02").is_empty());
        assert!(type_digits(&mut state, "13").is_empty());
        assert_eq!(state.date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn year_outside_range_is_ignored() {
        let mut state = editing("2024-03-15");

        assert!(type_digits(&mut state, "1800").is_empty());
    }

    #[test]
    fn empty_field_starts_from_fallback() {
        let state = editing("");

        assert_eq!(state.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn delete_clears_the_field() {
        let mut state = editing("2024-03-15");

        assert_eq!(state.handle_input(KeyCode::Delete), Some(String::new()));
    }

    #[test]
    fn keys_are_ignored_when_not_editing() {
        let mut state = DateInputState::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        assert_eq!(state.handle_input(KeyCode::Char('2')), None);
        assert_eq!(state.handle_input(KeyCode::Delete), None);
    }
}
