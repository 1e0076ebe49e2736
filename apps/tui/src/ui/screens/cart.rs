use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use trove_storefront::cart::GST_RATE;

use crate::app::App;
use crate::ui::widgets::navbar::GOLD;
use crate::ui::widgets::tables::{format_price, scroll_offset};

pub fn render_cart(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.cart.is_empty() {
        let paragraph = Paragraph::new("Your cart is empty. Add an experience with a.")
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(" CART ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(paragraph, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(5)])
        .split(area);

    let header = Row::new(vec![
        Cell::from("Experience"),
        Cell::from("City"),
        Cell::from("Unit"),
        Cell::from("Qty"),
        Cell::from("Total"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let items = app.cart.items();
    let max_visible_rows = chunks[0].height.saturating_sub(3) as usize;
    let offset = scroll_offset(items.len(), max_visible_rows, app.cart_selection_index);

    let rows = items
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, item)| {
            let style = if i == app.cart_selection_index {
                Style::default()
                    .bg(GOLD)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let city = item
                .city_tag
                .clone()
                .unwrap_or_else(|| item.experience.location.name.clone());

            Row::new(vec![
                Cell::from(item.experience.heading.clone()),
                Cell::from(city),
                Cell::from(format_price(item.unit_price())),
                Cell::from(item.quantity.to_string()),
                Cell::from(format_price(item.line_total())),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Min(24),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(5),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" CART ({} guests) ", app.cart.count()))
                .borders(Borders::ALL),
        )
        .column_spacing(1);
    f.render_widget(table, chunks[0]);

    let amount = |value: f64| Span::styled(format_price(value), Style::default().fg(Color::White));
    let gst_percent = GST_RATE * 100.0;
    let totals = vec![
        Line::from(vec![Span::raw("Subtotal      "), amount(app.cart.subtotal())]),
        Line::from(vec![
            Span::raw(format!("GST ({gst_percent:.0}%)     ")),
            amount(app.cart.gst()),
        ]),
        Line::from(vec![
            Span::styled("Total         ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format_price(app.cart.total()),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    let paragraph = Paragraph::new(totals)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(paragraph, chunks[1]);
}
