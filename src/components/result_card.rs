//! Result card: name, animated sprite and type badges

use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::sprite::SpriteView;
use crate::state::{AppState, CatalogEntry};

pub struct ResultCardProps<'a> {
    pub entry: &'a CatalogEntry,
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct ResultCard;

/// Uppercases the first character, leaves the rest alone.
pub fn format_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn badge_color(type_name: &str) -> Color {
    match type_name {
        "fire" => Color::Rgb(240, 128, 48),
        "water" => Color::Rgb(104, 144, 240),
        "grass" => Color::Rgb(120, 200, 80),
        "electric" => Color::Rgb(248, 208, 48),
        "poison" => Color::Rgb(160, 64, 160),
        "normal" => Color::Rgb(168, 168, 120),
        _ => Color::Rgb(112, 128, 144),
    }
}

fn badges(types: &[String]) -> Line<'static> {
    let mut spans = Vec::with_capacity(types.len() * 2);
    for (idx, type_name) in types.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!(" {} ", type_name.to_uppercase()),
            Style::default()
                .fg(Color::Black)
                .bg(badge_color(type_name))
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans).centered()
}

impl Component<Action> for ResultCard {
    type Props<'a> = ResultCardProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ResultCardProps<'_>) {
        let entry = props.entry;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(Span::styled(
                    format!(" {} ", format_name(&entry.name)),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .centered(),
            )
            .title_bottom(Line::from(format!(" #{} ", entry.id)).right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Sprite
            Constraint::Length(1), // Badges
        ])
        .split(inner);

        match props.state.visible_sprite() {
            Some(sprite) => frame.render_widget(SpriteView { sprite }, chunks[0]),
            None => {
                let label = if props.state.sprite_pending() {
                    "[loading sprite]"
                } else {
                    "[no sprite]"
                };
                let [placeholder] = Layout::vertical([Constraint::Length(1)])
                    .flex(Flex::Center)
                    .areas(chunks[0]);
                frame.render_widget(
                    Paragraph::new(label)
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Center),
                    placeholder,
                );
            }
        }

        frame.render_widget(Paragraph::new(badges(&entry.types)), chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("pikachu"), "Pikachu");
        assert_eq!(format_name("mr-mime"), "Mr-mime");
        assert_eq!(format_name(""), "");
    }

    #[test]
    fn test_badge_colors_are_distinct() {
        let known = ["fire", "water", "grass", "electric", "poison", "normal"];
        for (i, a) in known.iter().enumerate() {
            for b in &known[i + 1..] {
                assert_ne!(badge_color(a), badge_color(b), "{a} vs {b}");
            }
        }
        assert_eq!(badge_color("dragon"), badge_color("ghost"));
    }

    #[test]
    fn test_badges_keep_type_order() {
        let line = badges(&["grass".into(), "poison".into()]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " GRASS   POISON ");
        assert_eq!(line.spans[0].style.bg, Some(badge_color("grass")));
    }
}
