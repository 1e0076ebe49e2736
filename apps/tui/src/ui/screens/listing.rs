use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use trove_storefront::catalogue::{self, CATEGORIES};
use trove_storefront::domain::{Experience, ExperienceStatus};
use trove_storefront::navigation::{Page, ALL_SELECTION};

use crate::app::App;
use crate::ui::widgets::navbar::GOLD;
use crate::ui::widgets::tables::{format_price, scroll_offset};

pub fn render_listing(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_filter_bar(app, f, chunks[0]);

    let title = match app.navigation.page() {
        Page::Category => app.navigation.selected_category().to_uppercase(),
        Page::Upcoming if app.navigation.selected_location() != ALL_SELECTION => {
            app.navigation.selected_location().to_uppercase()
        }
        page => page.label().to_uppercase(),
    };
    render_experience_table(app, &app.visible_experiences(), &title, f, chunks[1]);
}

fn render_filter_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let selected = Style::default()
        .fg(Color::Black)
        .bg(GOLD)
        .add_modifier(Modifier::BOLD);
    let normal = Style::default().fg(Color::Gray);

    let mut spans: Vec<Span<'_>> = if app.navigation.page() == Page::Category {
        CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i == app.category_index { selected } else { normal };
                Span::styled(format!(" {name} "), style)
            })
            .collect()
    } else {
        let active = app.city_filter_index();
        app.city_filters
            .iter()
            .enumerate()
            .map(|(i, filter)| {
                let style = if i == active { selected } else { normal };
                Span::styled(format!(" {} ", filter.name), style)
            })
            .collect()
    };

    if app.search.active || !app.search.query.is_empty() {
        let cursor = if app.search.active { "_" } else { "" };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("/{}{cursor}", app.search.query),
            Style::default().fg(Color::Yellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Filter"));
    f.render_widget(paragraph, area);
}

/// Table of experiences with the app's selection highlighted. Shows the
/// loading, error or empty state instead when there is nothing to list.
pub fn render_experience_table(
    app: &App,
    experiences: &[Experience],
    title: &str,
    f: &mut Frame<'_>,
    area: Rect,
) {
    if experiences.is_empty() {
        let message = if app.experiences_loading {
            "Loading experiences..."
        } else if app.experiences_error.is_some() {
            "Experiences are unavailable right now. Press r to retry."
        } else {
            "No experiences found."
        };
        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Experience"),
        Cell::from("City"),
        Cell::from("Price"),
        Cell::from("Status"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let total_rows = experiences.len();
    let max_visible_rows = area.height.saturating_sub(3) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_index);

    let rows = experiences
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(i, exp)| {
            let style = if i == app.selected_index {
                Style::default()
                    .bg(GOLD)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if exp.status == ExperienceStatus::Draft {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(exp.date().map(|d| d.format("%d %b %Y").to_string()).unwrap_or_default()),
                Cell::from(exp.heading.clone()),
                Cell::from(exp.location.name.clone()),
                Cell::from(format_price(catalogue::discounted_price(exp))),
                Cell::from(exp.status.label()),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(12),
        Constraint::Min(24),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " {title} ({} of {total_rows}) ",
                    app.selected_index.min(total_rows - 1) + 1
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}
