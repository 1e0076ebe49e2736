use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};
use trove_storefront::navigation::Page;

use crate::app::state::NAV_PAGES;
use crate::app::App;

pub const GOLD: Color = Color::Rgb(191, 162, 96);

pub fn render_navbar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(26)])
        .split(area);

    let titles: Vec<Line<'_>> = NAV_PAGES
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let slot = (i + 1) % 10;
            let label = if *page == Page::Cart {
                format!("{slot} {} ({})", page.label(), app.cart.count())
            } else {
                format!("{slot} {}", page.label())
            };
            Line::from(label)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.nav_index())
        .block(
            Block::default()
                .title(" TROVE ")
                .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GOLD)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(GOLD)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD));
    let inner = status_block.inner(chunks[1]);
    f.render_widget(status_block, chunks[1]);

    if app.is_loading() {
        let throbber = Throbber::default()
            .label("Loading")
            .style(Style::default().fg(Color::Gray))
            .throbber_style(Style::default().fg(GOLD))
            .throbber_set(BRAILLE_SIX);
        let mut state = app.throbber.clone();
        f.render_stateful_widget(throbber, inner, &mut state);
    } else {
        let location = app
            .active_city()
            .map_or("All Locations", |filter| filter.name.as_str());
        f.render_widget(
            Paragraph::new(format!("@ {location}")).style(Style::default().fg(Color::White)),
            inner,
        );
    }
}
