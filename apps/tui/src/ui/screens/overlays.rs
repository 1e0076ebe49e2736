use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::ui::widgets::navbar::GOLD;
use crate::ui::widgets::popup::centered_rect;

pub fn render_location_picker(app: &App, f: &mut Frame<'_>) {
    let area = centered_rect(40, 50, f.area());
    f.render_widget(Clear, area);

    let items: Vec<ListItem<'_>> = app
        .locations
        .iter()
        .map(|location| {
            ListItem::new(format!(
                "{:<16} {}",
                location.name,
                location.city_code().to_uppercase()
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Reserve at (Enter to add, Esc to cancel) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GOLD)),
        )
        .highlight_style(
            Style::default()
                .bg(GOLD)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(app.location_picker);
    f.render_stateful_widget(list, area, &mut state);
}

pub fn render_concierge(app: &App, f: &mut Frame<'_>) {
    let area = centered_rect(70, 70, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" THE DISCOVERY ")
        .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(inner);

    let input = Paragraph::new(format!("{}_", app.concierge.input)).block(
        Block::default()
            .title("What does your soul seek?")
            .borders(Borders::ALL),
    );
    f.render_widget(input, chunks[0]);

    let mut lines = Vec::new();
    if app.concierge.results.is_empty() {
        lines.push(Line::from(Span::styled(
            "Describe a mood or an activity and press Enter. Esc closes.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for rec in &app.concierge.results {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}% ", rec.match_score),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                rec.mood.to_uppercase(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            rec.activity,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            rec.reason,
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    let results = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
    f.render_widget(results, chunks[1]);
}

pub fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let key = |k: &'static str| {
        Span::styled(
            format!("{k:<12}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    };
    let rows: [(&'static str, &'static str); 14] = [
        ("Tab/S-Tab", "Next / previous page"),
        ("1-9, 0", "Jump to page"),
        ("↑/↓", "Select or scroll"),
        ("←/→", "Change city or category"),
        ("Enter", "Open experience"),
        ("a", "Add to cart"),
        ("l", "Add to cart at a location"),
        ("+/-", "Change quantity (cart)"),
        ("d/Del", "Remove from cart"),
        ("/", "Search"),
        ("c", "Concierge"),
        ("r", "Refresh catalogue"),
        ("F1/Esc", "Close help"),
        ("q", "Quit"),
    ];
    let lines: Vec<Line<'_>> = rows
        .iter()
        .map(|&(k, action)| Line::from(vec![key(k), Span::raw(action)]))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}
