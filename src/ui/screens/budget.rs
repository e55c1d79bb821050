use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(area);

    render_progress(f, chunks[0], app);
    render_top_expenses(f, chunks[1], app);
}

fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let summary = &app.summary;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Budget for {} ", app.current_month.format("%B %Y")),
            theme::title_style(),
        ));

    if summary.budget <= Decimal::ZERO {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No monthly budget set", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Use :budget <amount> to set one",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let color = theme::tier_color(summary.tier);
    let used = summary.progress.used_percentage;
    let ratio = (used / Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0);
    let bar_width = area.width.saturating_sub(16).max(10) as usize;
    let remaining_color = if summary.progress.remaining < Decimal::ZERO {
        theme::RED
    } else {
        theme::TEXT
    };

    let text = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("  Budget     ", theme::dim_style()),
            Span::styled(format_amount(summary.budget), theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("  Spent      ", theme::dim_style()),
            Span::styled(
                format_amount(summary.totals.expense),
                Style::default().fg(theme::RED),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Remaining  ", theme::dim_style()),
            Span::styled(
                format_amount(summary.progress.remaining),
                Style::default().fg(remaining_color),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {}", progress_bar(ratio, bar_width)), Style::default().fg(color)),
            Span::styled(
                format!(" {}%", used.round_dp(1).normalize()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}", summary.tier),
            Style::default().fg(color),
        )),
    ])
    .block(block);

    f.render_widget(text, area);
}

fn render_top_expenses(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Top Expenses ", theme::title_style()));

    let ranked = &app.summary.top_expenses;
    if ranked.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses this month",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bar_width = area.width.saturating_sub(48).clamp(5, 30) as usize;
    let items: Vec<ListItem> = ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let ratio = (entry.percent / Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0);
            let color = theme::CARD_COLORS[i % theme::CARD_COLORS.len()];
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}. {:<18}", i + 1, truncate(&entry.category, 17)), style),
                Span::styled(format!("{:>14} ", format_amount(entry.total)), style),
                Span::styled(progress_bar(ratio, bar_width), Style::default().fg(color)),
                Span::styled(
                    format!(" {}%", entry.percent.round_dp(1).normalize()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
