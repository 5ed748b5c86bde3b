use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, ResultCard, ResultCardProps};
use crate::action::Action;
use crate::state::AppState;

pub const TITLE: &str = "Pokémon Finder";
pub const PLACEHOLDER: &str = "Search Pokémon...";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Props for FinderView - read-only view of state
pub struct FinderViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Search input, search button, error line and result card
#[derive(Default)]
pub struct FinderView {
    card: ResultCard,
}

impl FinderView {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
        let chunks = Layout::horizontal([
            Constraint::Min(10),    // Input
            Constraint::Length(12), // Button
        ])
        .split(area);

        let border_color = if is_focused && !state.is_loading {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let input = if state.query.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(state.query.as_str())
        };
        frame.render_widget(
            Paragraph::new(input).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            ),
            chunks[0],
        );
        if is_focused && !state.is_loading {
            let typed = u16::try_from(state.query.chars().count()).unwrap_or(u16::MAX);
            let cursor_x = chunks[0].x.saturating_add(1).saturating_add(typed);
            if cursor_x < chunks[0].right().saturating_sub(1) {
                frame.set_cursor_position((cursor_x, chunks[0].y + 1));
            }
        }

        let (label, style) = if state.is_loading {
            let frame_idx = state.spinner_tick as usize % SPINNER_FRAMES.len();
            (
                format!("[ {} ]", SPINNER_FRAMES[frame_idx]),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (
                "[ Search ]".to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let [_, button] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
            .areas(chunks[1]);
        frame.render_widget(
            Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center),
            button,
        );
    }
}

impl Component<Action> for FinderView {
    type Props<'a> = FinderViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            // Input and button are disabled while a lookup runs
            _ if props.state.is_loading => None,
            KeyCode::Enter => Some(Action::SearchSubmit(props.state.query.clone())),
            KeyCode::Backspace => Some(Action::QueryBackspace),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::QueryInput(ch))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: FinderViewProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Input + button
            Constraint::Length(1), // Error
            Constraint::Min(1),    // Result card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            chunks[0],
        );

        self.render_input(frame, chunks[1], state, props.is_focused);

        if !state.error_message.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    state.error_message.as_str(),
                    Style::default().fg(Color::Red),
                ))
                .alignment(Alignment::Center),
                chunks[2],
            );
        }

        if let Some(entry) = state.entry.as_ref().filter(|_| state.shows_result()) {
            self.card
                .render(frame, chunks[3], ResultCardProps { entry, state });
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
