use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use trove_storefront::navigation::Page;

use crate::ui::widgets::navbar::GOLD;

fn page_copy(page: Page) -> (&'static str, &'static [&'static str]) {
    match page {
        Page::Groups => (
            "MASTERING TOGETHERNESS",
            &[
                "New experiences have the power to transform us, to inspire us, or at the very least to enrich our lives with stories to tell our loved ones.",
                "We host private, corporate and social groups. Tell us about your tribe and we will curate a departure for it.",
            ],
        ),
        Page::Gifting => (
            "THE GIFT OF WONDER",
            &[
                "Anniversaries, birthdays and little celebrations deserve more than another object.",
                "Gift an experience: pick one from the catalogue, add it to your cart and we will send a note to the recipient.",
            ],
        ),
        Page::About => (
            "THE ARCHITECTS OF WONDER",
            &[
                "Trove was born from a simple realization: our cities are overflowing with noise, but starving for wonder.",
                "We are a collective of architects, storytellers and dreamers curating departures from the everyday.",
            ],
        ),
        Page::Contact => (
            "CONTACT",
            &[
                "Questions about an experience or a private booking?",
                "Write to hello@trove.example and a curator will get back to you within a day.",
            ],
        ),
        Page::Profile => (
            "YOUR PROFILE",
            &["Sign-in is not available in the terminal storefront yet. Your cart lasts for this session."],
        ),
        _ => ("", &[]),
    }
}

pub fn render_info(page: Page, f: &mut Frame<'_>, area: Rect) {
    let (headline, paragraphs) = page_copy(page);

    let mut lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for text in paragraphs {
        lines.push(Line::from(*text));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {} ", page.label()))
                .borders(Borders::ALL),
        );
    f.render_widget(paragraph, area);
}
