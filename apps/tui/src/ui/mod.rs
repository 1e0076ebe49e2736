// UI module for the storefront
// Renders the navbar, the current page and any open overlay

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use trove_storefront::navigation::Page;
use widgets::hints::key_hints;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navbar
            Constraint::Min(5),    // Page
            Constraint::Length(3), // Status
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area());

    widgets::navbar::render_navbar(app, f, chunks[0]);

    match app.navigation.page() {
        Page::Home => screens::home::render_home(app, f, chunks[1]),
        Page::Upcoming | Page::AllExperiences | Page::Category => {
            screens::listing::render_listing(app, f, chunks[1]);
        }
        Page::ExperienceDetail => screens::detail::render_detail(app, f, chunks[1]),
        Page::Cart => screens::cart::render_cart(app, f, chunks[1]),
        page @ (Page::Groups | Page::Gifting | Page::About | Page::Contact | Page::Profile) => {
            screens::info::render_info(page, f, chunks[1]);
        }
    }

    render_status(app, f, chunks[2]);
    render_shortcuts(app, f, chunks[3]);

    if app.location_picker.is_some() {
        screens::overlays::render_location_picker(app, f);
    }
    if app.concierge.open {
        screens::overlays::render_concierge(app, f);
    }
    if app.show_help {
        screens::overlays::render_help(f);
    }
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (text, color) = if let Some(error) = &app.experiences_error {
        (format!("{}  ({error})", app.status_message), Color::Red)
    } else {
        (app.status_message.clone(), Color::Green)
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().title("Status").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let hints = match app.navigation.page() {
        Page::Cart => key_hints(&[
            ("↑/↓", "Select"),
            ("+/-", "Quantity"),
            ("d", "Remove"),
            ("Tab", "Pages"),
            ("F1", "Help"),
            ("q", "Quit"),
        ]),
        Page::ExperienceDetail => key_hints(&[
            ("↑/↓", "Scroll"),
            ("a", "Add to cart"),
            ("l", "Reserve at"),
            ("Esc", "Back"),
            ("F1", "Help"),
            ("q", "Quit"),
        ]),
        Page::Home | Page::Upcoming | Page::AllExperiences | Page::Category => key_hints(&[
            ("↑/↓", "Select"),
            ("←/→", "Filter"),
            ("Enter", "Details"),
            ("a", "Add"),
            ("/", "Search"),
            ("c", "Concierge"),
            ("F1", "Help"),
            ("q", "Quit"),
        ]),
        _ => key_hints(&[
            ("Tab", "Pages"),
            ("c", "Concierge"),
            ("F1", "Help"),
            ("q", "Quit"),
        ]),
    };

    f.render_widget(Paragraph::new(hints).alignment(Alignment::Center), area);
}
