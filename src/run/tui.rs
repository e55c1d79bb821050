use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::Ledger;
use crate::models::TransactionType;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::form::FormField;
use crate::ui::util::{scroll_down, scroll_up};

pub(crate) fn as_tui(ledger: &mut Ledger) -> Result<()> {
    let mut app = App::new(ledger);
    // Store warnings from load land in the status line
    app.drain_events(ledger);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Dashboard table sits below two rows of cards
            let content_height = f.area().height.saturating_sub(3 + 10 + 3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    if app.screen == Screen::AddTransaction && handle_form_input(key, app, ledger) {
        return Ok(());
    }

    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Budget),
        KeyCode::Char('3') => switch_screen(app, ledger, Screen::AddTransaction),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, ledger, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, ledger, screens[prev]);
        }
        KeyCode::Esc => handle_escape(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('H') => {
            commands::handle_command("prev-month", app, ledger)?;
        }
        KeyCode::Char('L') => {
            commands::handle_command("next-month", app, ledger)?;
        }
        KeyCode::Char('i') => app.open_form(TransactionType::Income),
        KeyCode::Char('e') => app.open_form(TransactionType::Expense),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Dashboard => {
            commands::handle_command("delete", app, ledger)?;
        }
        _ => {}
    }
    Ok(())
}

/// Keys that mean something different on the add form. Returns `true` when
/// the key was consumed.
fn handle_form_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> bool {
    match key.code {
        KeyCode::Enter => {
            let field = app.form.field();
            if field == FormField::Kind {
                app.form.toggle_kind();
            } else {
                app.command_input = app.form.value(field);
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => adjust_form_field(app, 1),
        KeyCode::Char('-') => adjust_form_field(app, -1),
        KeyCode::Char('s') => app.submit_form(ledger),
        KeyCode::Esc => {
            app.screen = Screen::Dashboard;
            app.set_status("Add cancelled");
        }
        _ => return false,
    }
    true
}

fn adjust_form_field(app: &mut App, delta: isize) {
    match app.form.field() {
        FormField::Kind => app.form.toggle_kind(),
        FormField::Category => app.form.cycle_category(delta),
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let field = app.form.field();
            let value = std::mem::take(&mut app.command_input);
            app.form.set_value(field, value);
            app.form.next_field();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, ledger: &mut Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(ledger)?,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_pending(),
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, ledger: &Ledger, screen: Screen) {
    app.screen = screen;
    app.refresh(ledger);
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Dashboard => {
            let page = app.visible_rows;
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        Screen::AddTransaction => app.form.next_field(),
        Screen::Budget => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Dashboard => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::AddTransaction => app.form.prev_field(),
        Screen::Budget => {}
    }
}

fn handle_escape(app: &mut App) {
    app.status_message.clear();
}
