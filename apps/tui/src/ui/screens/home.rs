use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::screens::listing::render_experience_table;
use crate::ui::widgets::navbar::GOLD;

pub fn render_home(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    let hero = Text::from(vec![
        Line::from(Span::styled(
            "DEPARTURES FROM THE EVERYDAY",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Curated workshops, tastings and retreats in your city."),
        Line::from(vec![
            Span::raw("Not sure where to begin? Press "),
            Span::styled("c", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" to ask the concierge."),
        ]),
    ]);
    let hero = Paragraph::new(hero)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(GOLD)));
    f.render_widget(hero, chunks[0]);

    render_experience_table(app, &app.visible_experiences(), "COMING UP", f, chunks[1]);
}
