use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::warn;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::error::FormError;
use crate::models::numeric::is_number_input_char;
use crate::models::{FieldChange, InvoiceData, LineItem, TextField};
use crate::ui::components::additional_fields::{number_text, render_additional_fields, AdditionalFieldsState};
use crate::ui::components::currency_select::{render_currency_select, CurrencyChoice, CurrencySelectState};
use crate::ui::components::date_input::{render_date_input, DateInputState};
use crate::ui::line_items;

// Represents a field in the invoice form, in focus order
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FormField {
    FromName,
    FromEmail,
    FromAddress,
    ClientName,
    ClientEmail,
    ClientAddress,
    Date,
    DueDate,
    Currency,
    Items,
    AdditionalFields,
    Note,
}

impl FormField {
    const ORDER: [FormField; 12] = [
        FormField::FromName,
        FormField::FromEmail,
        FormField::FromAddress,
        FormField::ClientName,
        FormField::ClientEmail,
        FormField::ClientAddress,
        FormField::Date,
        FormField::DueDate,
        FormField::Currency,
        FormField::Items,
        FormField::AdditionalFields,
        FormField::Note,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn text_field(self) -> Option<TextField> {
        match self {
            FormField::FromName => Some(TextField::FromName),
            FormField::FromEmail => Some(TextField::FromEmail),
            FormField::FromAddress => Some(TextField::FromAddress),
            FormField::ClientName => Some(TextField::ClientName),
            FormField::ClientEmail => Some(TextField::ClientEmail),
            FormField::ClientAddress => Some(TextField::ClientAddress),
            FormField::Note => Some(TextField::Note),
            _ => None,
        }
    }

    fn from_text_field(field: TextField) -> Self {
        match field {
            TextField::FromName => FormField::FromName,
            TextField::FromEmail => FormField::FromEmail,
            TextField::FromAddress => FormField::FromAddress,
            TextField::ClientName => FormField::ClientName,
            TextField::ClientEmail => FormField::ClientEmail,
            TextField::ClientAddress => FormField::ClientAddress,
            TextField::Note => FormField::Note,
        }
    }
}

// A column of the item table that can be typed into
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ItemColumn {
    Name,
    Quantity,
    Price,
}

impl ItemColumn {
    fn next(self) -> Self {
        match self {
            ItemColumn::Name => ItemColumn::Quantity,
            ItemColumn::Quantity => ItemColumn::Price,
            ItemColumn::Price => ItemColumn::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            ItemColumn::Name => ItemColumn::Price,
            ItemColumn::Quantity => ItemColumn::Name,
            ItemColumn::Price => ItemColumn::Quantity,
        }
    }

    fn accepts(self, c: char) -> bool {
        match self {
            ItemColumn::Name => !c.is_control(),
            ItemColumn::Quantity | ItemColumn::Price => is_number_input_char(c),
        }
    }
}

// The cell being typed into and its raw text
struct CellEdit {
    row: usize,
    column: ItemColumn,
    raw: String,
}

impl CellEdit {
    fn start(item: &LineItem, row: usize, column: ItemColumn) -> Self {
        let raw = match column {
            ItemColumn::Name => item.name.clone(),
            ItemColumn::Quantity => quantity_text(item.quantity),
            ItemColumn::Price => number_text(item.price),
        };
        Self { row, column, raw }
    }
}

pub enum FormAction {
    Quit,
}

/// UI-only state of the form. The invoice itself is never copied in here;
/// every render and key handler is given the current snapshot.
pub struct InvoiceFormState {
    today: NaiveDate,
    current_field: FormField,
    editing: bool,
    items_table_state: TableState,
    editing_cell: Option<CellEdit>,
    date_state: DateInputState,
    due_date_state: DateInputState,
    currency_state: CurrencySelectState,
    additional_state: AdditionalFieldsState,
}

impl InvoiceFormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            current_field: FormField::FromName,
            editing: false,
            items_table_state: TableState::default(),
            editing_cell: None,
            date_state: DateInputState::new(today),
            due_date_state: DateInputState::new(today),
            currency_state: CurrencySelectState::new(),
            additional_state: AdditionalFieldsState::new(),
        }
    }

    pub fn next_field(&mut self) {
        let next = (self.current_field.position() + 1) % FormField::ORDER.len();
        self.current_field = FormField::ORDER[next];
    }

    pub fn previous_field(&mut self) {
        let len = FormField::ORDER.len();
        let previous = (self.current_field.position() + len - 1) % len;
        self.current_field = FormField::ORDER[previous];
    }

    fn begin_editing(&mut self, invoice: &InvoiceData) {
        self.editing = true;

        match self.current_field {
            FormField::Date => self.date_state.begin(&invoice.date, self.today),
            FormField::DueDate => self.due_date_state.begin(&invoice.due_date, self.today),
            FormField::Currency => self
                .currency_state
                .begin(&invoice.currency, &invoice.custom_currency),
            FormField::AdditionalFields => self.additional_state.begin(&invoice.adjustments()),
            FormField::Items => {
                if self.items_table_state.selected().is_none() && !invoice.items.is_empty() {
                    self.items_table_state.select(Some(0));
                }
            }
            _ => {}
        }
    }

    fn stop_editing(&mut self) {
        self.editing = false;
        self.editing_cell = None;
        self.date_state.finish();
        self.due_date_state.finish();
        self.currency_state.finish();
        self.additional_state.finish();
    }

    fn edit_current_field(&mut self, invoice: &InvoiceData, key: KeyCode, on_change: &mut impl FnMut(FieldChange)) {
        if let Some(field) = self.current_field.text_field() {
            edit_text(field, invoice, key, on_change);
            return;
        }

        match self.current_field {
            FormField::Date => {
                if let Some(date) = self.date_state.handle_input(key) {
                    on_change(FieldChange::Date(date));
                }
            }
            FormField::DueDate => {
                if let Some(date) = self.due_date_state.handle_input(key) {
                    on_change(FieldChange::DueDate(date));
                }
            }
            FormField::Currency => {
                if let Some(choice) = self.currency_state.handle_input(key) {
                    apply_currency_choice(choice, on_change);
                }
            }
            FormField::AdditionalFields => {
                self.additional_state
                    .handle_input(key, &invoice.adjustments(), on_change);
            }
            _ => {}
        }
    }

    fn handle_items_key(&mut self, invoice: &InvoiceData, key: KeyCode, on_change: &mut impl FnMut(FieldChange)) {
        let items = &invoice.items;

        if let Some(mut cell) = self.editing_cell.take() {
            match key {
                KeyCode::Esc | KeyCode::Enter => {}
                KeyCode::Tab | KeyCode::BackTab => {
                    let column = if key == KeyCode::Tab {
                        cell.column.next()
                    } else {
                        cell.column.previous()
                    };
                    self.editing_cell = items.get(cell.row).map(|item| CellEdit::start(item, cell.row, column));
                }
                KeyCode::Char(c) if cell.column.accepts(c) => {
                    cell.raw.push(c);
                    commit_cell(&cell, items, on_change);
                    self.editing_cell = Some(cell);
                }
                KeyCode::Backspace => {
                    if cell.raw.pop().is_some() {
                        commit_cell(&cell, items, on_change);
                    }
                    self.editing_cell = Some(cell);
                }
                _ => self.editing_cell = Some(cell),
            }
            return;
        }

        match key {
            KeyCode::Esc => self.stop_editing(),
            KeyCode::Up => self.select_previous_item(items.len()),
            KeyCode::Down => self.select_next_item(items.len()),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                let new_items = line_items::append_blank(items);
                self.items_table_state.select(Some(new_items.len() - 1));
                on_change(FieldChange::Items(new_items));
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                if let Some(selected) = self.items_table_state.selected() {
                    match line_items::remove(items, selected) {
                        Ok(new_items) => {
                            let new_selection = if new_items.is_empty() {
                                None
                            } else {
                                Some(selected.min(new_items.len() - 1))
                            };
                            self.items_table_state.select(new_selection);
                            on_change(FieldChange::Items(new_items));
                        }
                        Err(err) => warn!(%err, "remove item ignored"),
                    }
                }
            }
            KeyCode::Enter => {
                if let Some(selected) = self.items_table_state.selected() {
                    match items.get(selected) {
                        Some(item) => self.editing_cell = Some(CellEdit::start(item, selected, ItemColumn::Name)),
                        None => {
                            let err = FormError::RowOutOfRange {
                                index: selected,
                                len: items.len(),
                            };
                            warn!(%err, "edit item ignored");
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn select_next_item(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.items_table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.items_table_state.select(Some(i));
    }

    fn select_previous_item(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.items_table_state.selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.items_table_state.select(Some(i));
    }

    // The list may have shrunk since the selection was made
    fn clamp_item_selection(&mut self, len: usize) {
        match self.items_table_state.selected() {
            Some(_) if len == 0 => self.items_table_state.select(None),
            Some(i) if i >= len => self.items_table_state.select(Some(len - 1)),
            _ => {}
        }
        if self.editing_cell.as_ref().is_some_and(|cell| cell.row >= len) {
            self.editing_cell = None;
        }
    }
}

fn edit_text(field: TextField, invoice: &InvoiceData, key: KeyCode, on_change: &mut impl FnMut(FieldChange)) {
    let current = field.value(invoice);

    match key {
        KeyCode::Char(c) if !c.is_control() => {
            let mut value = current.to_string();
            value.push(c);
            on_change(field.change(value));
        }
        KeyCode::Backspace if !current.is_empty() => {
            let mut value = current.to_string();
            value.pop();
            on_change(field.change(value));
        }
        _ => {}
    }
}

fn quantity_text(quantity: Option<i64>) -> String {
    quantity.map(|q| q.to_string()).unwrap_or_default()
}

fn commit_cell(cell: &CellEdit, items: &[LineItem], on_change: &mut impl FnMut(FieldChange)) {
    let result = match cell.column {
        ItemColumn::Name => line_items::rename(items, cell.row, &cell.raw),
        ItemColumn::Quantity => line_items::set_quantity(items, cell.row, &cell.raw),
        ItemColumn::Price => line_items::set_price(items, cell.row, &cell.raw),
    };

    match result {
        Ok(new_items) => on_change(FieldChange::Items(new_items)),
        Err(err) => warn!(%err, column = ?cell.column, "item edit ignored"),
    }
}

/// The currency selector's change event: the code is always written, the
/// custom code only when one was typed.
pub fn apply_currency_choice(choice: CurrencyChoice, on_change: &mut impl FnMut(FieldChange)) {
    on_change(FieldChange::Currency(choice.currency));
    if let Some(custom) = choice.custom.filter(|c| !c.is_empty()) {
        on_change(FieldChange::CustomCurrency(custom));
    }
}

/// Route one key to the form. Every edit is reported through `on_change`,
/// which the caller must apply before the next key.
pub fn handle_key(
    state: &mut InvoiceFormState,
    invoice: &InvoiceData,
    key: KeyCode,
    on_change: &mut impl FnMut(FieldChange),
) -> Option<FormAction> {
    if !state.editing {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => return Some(FormAction::Quit),
            KeyCode::Down | KeyCode::Tab => state.next_field(),
            KeyCode::Up | KeyCode::BackTab => state.previous_field(),
            KeyCode::Enter => state.begin_editing(invoice),
            _ => {}
        }
        return None;
    }

    if state.current_field == FormField::Items {
        state.handle_items_key(invoice, key, on_change);
        return None;
    }

    match key {
        KeyCode::Esc | KeyCode::Enter => state.stop_editing(),
        _ => state.edit_current_field(invoice, key, on_change),
    }

    None
}

pub fn handle_input(
    state: &mut InvoiceFormState,
    invoice: &InvoiceData,
    on_change: &mut impl FnMut(FieldChange),
) -> Result<Option<FormAction>> {
    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(FormAction::Quit));
        }
        return Ok(handle_key(state, invoice, key.code, on_change));
    }

    Ok(None)
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub fn render_invoice_form<B: Backend>(frame: &mut Frame<B>, state: &mut InvoiceFormState, invoice: &InvoiceData) {
    state.clamp_item_selection(invoice.items.len());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(5), // From / Billed To
                Constraint::Length(3), // Dates
                Constraint::Length(3), // Currency
                Constraint::Min(6),    // Items
                Constraint::Length(3), // Additional fields
                Constraint::Length(3), // Note
                Constraint::Length(3), // Help
            ]
            .as_ref(),
        )
        .split(frame.size());

    let parties = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[0]);
    render_party_group(frame, parties[0], "From:", TextField::FROM, state, invoice);
    render_party_group(frame, parties[1], "Billed To:", TextField::BILLED_TO, state, invoice);

    let dates = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(chunks[1]);
    render_date_input(
        frame,
        dates[0],
        "Date",
        &invoice.date,
        &state.date_state,
        state.current_field == FormField::Date,
    );
    render_date_input(
        frame,
        dates[1],
        "Due Date",
        &invoice.due_date,
        &state.due_date_state,
        state.current_field == FormField::DueDate,
    );

    render_currency_select(
        frame,
        chunks[2],
        &invoice.currency,
        &invoice.custom_currency,
        &state.currency_state,
        state.current_field == FormField::Currency,
    );

    render_items(frame, chunks[3], state, &invoice.items);

    render_additional_fields(
        frame,
        chunks[4],
        &invoice.adjustments(),
        &state.additional_state,
        state.current_field == FormField::AdditionalFields,
    );

    render_note(frame, chunks[5], state, invoice);

    let help = Paragraph::new(help_text(state))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[6]);
}

fn help_text(state: &InvoiceFormState) -> &'static str {
    match (state.editing, state.current_field) {
        (false, _) => "Enter - Edit field | Up/Down - Navigate fields | Q/Esc - Quit",
        (true, FormField::Date | FormField::DueDate) => {
            "Digits - Set part | Left/Right - Switch date part | Del - Clear | Enter/Esc - Done"
        }
        (true, FormField::Currency) => "Left/Right - Choose currency | Type - Custom code | Enter/Esc - Done",
        (true, FormField::AdditionalFields) => "Tab - Next field | Enter/Esc - Done",
        (true, FormField::Items) => {
            if state.editing_cell.is_some() {
                "Tab - Next column | Enter/Esc - Done with row"
            } else {
                "A - Add item | D - Remove selected | Enter - Edit selected | Esc - Done"
            }
        }
        (true, _) => "Type to edit | Enter/Esc - Done",
    }
}

fn text_spans<'a>(field: TextField, state: &InvoiceFormState, value: &'a str) -> Spans<'a> {
    let focused = state.current_field == FormField::from_text_field(field);
    let cursor = if focused && state.editing { "|" } else { "" };

    Spans::from(vec![
        Span::styled(format!("{}: ", field.label()), focus_style(focused)),
        Span::raw(value),
        Span::raw(cursor),
    ])
}

fn render_party_group<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    title: &str,
    fields: [TextField; 3],
    state: &InvoiceFormState,
    invoice: &InvoiceData,
) {
    let lines = fields
        .iter()
        .map(|field| text_spans(*field, state, field.value(invoice)))
        .collect::<Vec<_>>();

    let group = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL),
    );
    frame.render_widget(group, area);
}

fn render_note<B: Backend>(frame: &mut Frame<B>, area: Rect, state: &InvoiceFormState, invoice: &InvoiceData) {
    let focused = state.current_field == FormField::Note;

    let line = if invoice.note.is_empty() && !(focused && state.editing) {
        Spans::from(vec![
            Span::styled("Note: ", focus_style(focused)),
            Span::styled("Add a note (optional)", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        text_spans(TextField::Note, state, &invoice.note)
    };

    let note = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(note, area);
}

fn render_items<B: Backend>(frame: &mut Frame<B>, area: Rect, state: &mut InvoiceFormState, items: &[LineItem]) {
    let focused = state.current_field == FormField::Items;

    let header = Row::new(vec!["Item", "Quantity", "Price", "Amount"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows = items.iter().enumerate().map(|(row, item)| {
        let mut cells = vec![
            item.name.clone(),
            quantity_text(item.quantity),
            number_text(item.price),
            item.amount_display(),
        ];
        if let Some(cell) = state.editing_cell.as_ref().filter(|cell| cell.row == row) {
            let column = match cell.column {
                ItemColumn::Name => 0,
                ItemColumn::Quantity => 1,
                ItemColumn::Price => 2,
            };
            cells[column] = format!("{}|", cell.raw);
        }
        Row::new(cells.into_iter().map(Cell::from))
    });

    let title = if items.is_empty() { "Items: (none yet)" } else { "Items:" };
    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).style(focus_style(focused)))
        .widths(&[
            Constraint::Percentage(40),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ])
        .highlight_style(if focused && state.editing {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        });

    frame.render_stateful_widget(table, area, &mut state.items_table_state);
}
