mod config;
mod error;
mod logging;
mod models;
mod ui;

use std::io;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, info};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::models::{FieldChange, InvoiceData};
use crate::ui::invoice_form::{handle_input, render_invoice_form, FormAction, InvoiceFormState};

// Main application state: the invoice and the form editing it
struct AppState {
    invoice: InvoiceData,
    form_state: InvoiceFormState,
}

impl AppState {
    fn new(invoice: InvoiceData, form_state: InvoiceFormState) -> Self {
        Self { invoice, form_state }
    }

    // The form's change callback lands here
    fn on_input_change(&mut self, change: FieldChange) {
        debug!(field = change.field_name(), "field changed");
        self.invoice.apply(change);
    }
}

fn main() -> Result<()> {
    // Load configuration
    let config = config::init()?;
    logging::init(&config)?;

    let today = Local::now().date_naive();
    let invoice = InvoiceData::new(&config, today)?;
    info!(currency = %invoice.currency, due_date = %invoice.due_date, "starting invoice form");

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(invoice, InvoiceFormState::new(today));

    let result = run_app(&mut terminal, &mut app_state);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Show any error message
    if let Err(err) = result {
        println!("Error: {}", err);
    }

    let invoice = &app_state.invoice;
    info!(items = invoice.items.len(), "invoice form closed");
    println!(
        "Invoice for {} with {} item(s), due {}",
        if invoice.client_name.is_empty() { "(no client)" } else { invoice.client_name.as_str() },
        invoice.items.len(),
        if invoice.due_date.is_empty() { "(no due date)" } else { invoice.due_date.as_str() },
    );

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| render_invoice_form(f, &mut app_state.form_state, &app_state.invoice))?;

        // Changes from one key are applied before the next frame
        let mut pending = Vec::new();
        let action = handle_input(&mut app_state.form_state, &app_state.invoice, &mut |change| {
            pending.push(change)
        })?;
        for change in pending {
            app_state.on_input_change(change);
        }

        if let Some(FormAction::Quit) = action {
            info!("quit requested");
            break;
        }
    }

    Ok(())
}
