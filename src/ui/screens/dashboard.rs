use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ledger::aggregate::CATEGORY_CARD_LIMIT;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Length(5), // Category cards
            Constraint::Min(5),    // Transactions
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_cards(f, chunks[1], app);
    render_transactions(f, chunks[2], app);
}

fn titled_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = &app.summary.totals;
    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.iter().filter(|t| t.is_expense()).count();
    let balance_color = if totals.balance >= Decimal::ZERO {
        theme::GREEN
    } else {
        theme::RED
    };

    render_card(f, cards[0], "Balance", totals.balance, balance_color, String::new());
    render_card(
        f,
        cards[1],
        "Income",
        totals.income,
        theme::GREEN,
        format!("{income_count} txns"),
    );
    render_card(
        f,
        cards[2],
        "Expense",
        totals.expense,
        theme::RED,
        format!("{expense_count} txns"),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color, subtitle: String) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(titled_block(title.to_string()));

    f.render_widget(text, area);
}

fn render_category_cards(f: &mut Frame, area: Rect, app: &App) {
    let groups = &app.summary.category_cards;
    if groups.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No categories yet this month",
            theme::dim_style(),
        )))
        .centered()
        .block(titled_block("Categories".into()));
        f.render_widget(msg, area);
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, CATEGORY_CARD_LIMIT as u32);
            CATEGORY_CARD_LIMIT
        ])
        .split(area);

    for (i, group) in groups.iter().enumerate() {
        let color = theme::CARD_COLORS[i % theme::CARD_COLORS.len()];
        let width = slots[i].width.saturating_sub(4) as usize;
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                format_amount(group.total),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} {}", group.count, group.kind),
                Style::default().fg(theme::kind_color(group.kind)),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", truncate(&group.category, width)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(card, slots[i]);
    }
}

fn render_transactions(f: &mut Frame, area: Rect, app: &App) {
    if app.transactions.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions for this month",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press i or e to add one, or :expense <amount> <category>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(titled_block("Transactions (0)".into())),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::title_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let sign = if txn.is_income() { "+" } else { "-" };
            let amount = Span::styled(
                format!("{sign}{}", format_amount(txn.amount)),
                Style::default().fg(theme::kind_color(txn.kind)),
            );

            Row::new(vec![
                Cell::from(txn.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(truncate(txn.description.as_deref().unwrap_or(""), 40)),
                Cell::from(amount),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!("Transactions ({})", app.transactions.len())));

    f.render_widget(table, area);
}
