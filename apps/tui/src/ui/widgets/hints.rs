use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Key hint line: each pair renders as a highlighted key and its action.
pub fn key_hints(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (i, (key, action)) in pairs.iter().enumerate() {
        spans.push(Span::styled(*key, key_style));
        let sep = if i + 1 == pairs.len() { "" } else { "   " };
        spans.push(Span::raw(format!(": {action}{sep}")));
    }
    Line::from(spans)
}
