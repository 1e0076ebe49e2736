use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use trove_storefront::catalogue;
use trove_storefront::domain::Experience;

use crate::app::App;
use crate::ui::widgets::navbar::GOLD;
use crate::ui::widgets::tables::format_price;

pub fn render_detail(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD));

    // Nothing selected: an empty frame, no placeholder.
    let Some(experience) = app.navigation.detail_experience() else {
        f.render_widget(block, area);
        return;
    };

    let paragraph = Paragraph::new(detail_text(experience))
        .block(block.title(format!(" {} ", experience.heading)))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    f.render_widget(paragraph, area);
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(
        format!("{text:<14}"),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )
}

fn section(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
    ))
}

fn detail_text(exp: &Experience) -> Text<'static> {
    let mut lines = Vec::new();

    if !exp.subheading.is_empty() {
        lines.push(Line::from(Span::styled(
            exp.subheading.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }

    let date = exp
        .date()
        .map(|d| d.format("%A, %d %B %Y").to_string())
        .unwrap_or_else(|| "To be announced".to_string());
    lines.push(Line::from(vec![label("When"), Span::raw(date)]));

    let window = exp.time_window();
    if !window.is_empty() {
        let duration = if exp.duration.is_empty() {
            String::new()
        } else {
            format!(" ({})", exp.duration)
        };
        lines.push(Line::from(vec![label("Time"), Span::raw(format!("{window}{duration}"))]));
    }

    let mut place = exp.location.name.clone();
    if !exp.experience_address.is_empty() {
        place = format!("{place}, {}", exp.experience_address);
    }
    lines.push(Line::from(vec![label("Where"), Span::raw(place)]));
    if let Some(link) = &exp.google_map_link {
        lines.push(Line::from(vec![label("Map"), Span::raw(link.clone())]));
    }

    let price = catalogue::discounted_price(exp);
    let mut price_spans = vec![label("Price"), Span::raw(format_price(price))];
    if exp.discount.is_some() {
        price_spans.push(Span::styled(
            format!("  was {}", format_price(exp.price_per_participant)),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
        ));
    }
    price_spans.push(Span::raw(if exp.gst_included {
        "  incl. GST"
    } else {
        "  + GST"
    }));
    lines.push(Line::from(price_spans));

    lines.push(Line::from(vec![label("Level"), Span::raw(exp.skill_level.label())]));
    if let Some(age) = &exp.age_group {
        lines.push(Line::from(vec![label("Ages"), Span::raw(age.clone())]));
    }
    if exp.max_participants > 0 {
        lines.push(Line::from(vec![
            label("Group size"),
            Span::raw(format!("up to {}", exp.max_participants)),
        ]));
    }

    if !exp.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("ABOUT"));
        lines.extend(exp.description.lines().map(|line| Line::from(line.to_string())));
    }

    if !exp.hosts.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("HOSTED BY"));
        for host in &exp.hosts {
            lines.push(Line::from(Span::styled(
                host.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if !host.details.is_empty() {
                lines.push(Line::from(host.details.clone()));
            }
        }
    }

    if !exp.faqs.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("FAQ"));
        for faq in &exp.faqs {
            lines.push(Line::from(Span::styled(
                format!("Q. {}", faq.question),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("A. {}", faq.answer)));
        }
    }

    Text::from(lines)
}
