use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::{App, InputMode};
use crate::ui::form::{suggested_categories, FormField};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FormField::all().len() as u16 + 2),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    render_fields(f, chunks[0], app);
    render_hints(f, chunks[1], app);
}

fn render_fields(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let current = form.field();
    let editing = app.input_mode == InputMode::Editing;

    let items: Vec<ListItem> = FormField::all()
        .iter()
        .map(|&field| {
            let is_current = field == current;
            let value = if is_current && editing {
                format!("{}▏", app.command_input)
            } else {
                form.value(field)
            };

            let value_style = match field {
                FormField::Kind => Style::default()
                    .fg(theme::kind_color(form.kind))
                    .add_modifier(Modifier::BOLD),
                _ if value.is_empty() => theme::dim_style(),
                _ => theme::normal_style(),
            };
            let shown = if value.is_empty() { "—".to_string() } else { value };

            let label_style = if is_current {
                theme::selected_style()
            } else {
                theme::dim_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<12}", field.label()), label_style),
                Span::raw(" "),
                Span::styled(shown, value_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" New {} ", form.kind),
                theme::title_style(),
            )),
    );
    f.render_widget(list, area);
}

fn render_hints(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let picks = suggested_categories(form.kind).join(", ");
    let submit = if form.is_submittable() {
        Span::styled(
            " Press s to save",
            Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" Amount and category are required", theme::dim_style())
    };

    let hints = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" Categories: ", theme::dim_style()),
            Span::styled(picks, theme::normal_style()),
        ]),
        Line::from(submit),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY)),
    );
    f.render_widget(hints, area);
}
