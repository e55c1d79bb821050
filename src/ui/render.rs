use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

/// Key bindings listed in the help popup.
const KEY_HELP: &[(&str, &str)] = &[
    ("1 2 3, Tab", "Dashboard, Budget, Add"),
    ("j / k", "Move through transactions or form fields"),
    ("H / L", "Previous / next month"),
    ("i / e", "New income / expense"),
    ("D", "Delete the selected transaction"),
    ("Enter", "Edit the current form field"),
    ("+ / -", "Cycle type or category on the form"),
    ("s", "Save the form"),
    (":", "Type a command"),
    ("Esc", "Clear the message or leave the form"),
    ("Ctrl-q", "Quit"),
];

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [header, body, status, prompt] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_header(f, header, app);
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, body, app),
        Screen::Budget => super::screens::budget::render(f, body, app),
        Screen::AddTransaction => super::screens::form::render(f, body, app),
    }
    render_status(f, status, app);
    render_prompt(f, prompt, app);

    if app.show_help {
        render_help(f, f.area());
    }
}

/// App name, numbered screens, and the month on the right.
fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let month = app.current_month.format(" %B %Y ").to_string();
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(month.chars().count() as u16)])
            .areas(area);

    let mut spans = vec![Span::styled(
        " budgetrack ",
        Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    )];
    for (i, screen) in Screen::all().iter().enumerate() {
        let style = if *screen == app.screen {
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        spans.push(Span::styled(format!("  {} {screen}", i + 1), style));
    }

    let bg = Style::default().bg(theme::HEADER_BG);
    f.render_widget(Paragraph::new(Line::from(spans)).style(bg), left);
    f.render_widget(Paragraph::new(Span::styled(month, theme::title_style())).style(bg), right);
}

fn screen_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Dashboard => " i/e add  D delete  ? help ",
        Screen::Budget => " :budget <amount>  ? help ",
        Screen::AddTransaction => " Enter edit  s save  Esc back ",
    }
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let hint = screen_hint(app.screen);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(hint.len() as u16)]).areas(area);

    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode = Span::styled(
        format!(" {} ", app.input_mode),
        Style::default()
            .fg(theme::HEADER_BG)
            .bg(mode_bg)
            .add_modifier(Modifier::BOLD),
    );
    let count = Span::raw(format!(
        " {} transactions, balance {}",
        app.summary.transaction_count,
        super::util::format_amount(app.summary.totals.balance)
    ));

    f.render_widget(
        Paragraph::new(Line::from(vec![mode, count])).style(theme::status_bar_style()),
        left,
    );
    f.render_widget(Paragraph::new(hint).style(theme::status_bar_style()), right);
}

/// Bottom line: what is being typed, a pending question, or the last message.
fn render_prompt(f: &mut Frame, area: Rect, app: &App) {
    let typed = |prefix: String| {
        let cursor = (prefix.chars().count() + app.command_input.chars().count()) as u16;
        let line = Line::from(vec![
            Span::styled(prefix, Style::default().fg(theme::ACCENT)),
            Span::raw(app.command_input.as_str()),
        ]);
        (line, Some(cursor))
    };

    let (line, cursor) = match app.input_mode {
        InputMode::Command => typed(":".into()),
        InputMode::Editing => typed(format!("{}> ", app.form.field().label())),
        InputMode::Confirm => (
            Line::styled(
                format!("{} (y/n)", app.confirm_message),
                Style::default().fg(theme::YELLOW),
            ),
            None,
        ),
        InputMode::Normal if app.status_message.is_empty() => {
            (Line::styled(" : command   ? help", theme::dim_style()), None)
        }
        InputMode::Normal => (Line::raw(app.status_message.as_str()), None),
    };

    f.render_widget(Paragraph::new(line).style(theme::command_bar_style()), area);
    if let Some(x) = cursor {
        f.set_cursor_position((area.x + x, area.y));
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let heading = |text: &'static str| {
        Row::new(vec![text]).style(Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD))
    };

    let mut rows = vec![heading("Keys")];
    rows.extend(KEY_HELP.iter().map(|&(key, what)| Row::new(vec![key, what])));
    rows.push(Row::new(vec![""]));
    rows.push(heading("Commands"));
    rows.extend(
        commands::help_entries()
            .into_iter()
            .map(|(name, what)| Row::new(vec![format!(":{name}"), what.to_string()])),
    );

    let height = (rows.len() as u16 + 2).min(area.height);
    let width = 72.min(area.width);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(0)])
        .style(theme::normal_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(Span::styled(" Help ", theme::title_style()))
                .title_bottom(Span::styled(" any key closes ", theme::dim_style()))
                .style(Style::default().bg(theme::HEADER_BG)),
        );
    f.render_widget(Clear, popup);
    f.render_widget(table, popup);
}
