//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! return effects. The transcript records its measured viewport through
//! `Cell`s so scrolling can be computed by the reducer.

use helios_core::domain::short_id;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{spinner, truncate_with_ellipsis};
use crate::creation::render_creation_form;
use crate::echo_chamber::render_echo_chamber;
use crate::input::{InputBox, render_input_box};
use crate::overlays::OverlayExt;
use crate::overlays::render_utils::{InputHint, hint_line};
use crate::state::{AppState, Screen, TuiState};
use crate::transcript::render_transcript;

const HEADER_HEIGHT: u16 = 1;
const INPUT_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;

/// Horizontal margin around the main content.
pub const CONTENT_MARGIN: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let show_input = state.screen == Screen::Conversation && !state.session.in_echo_chamber();
    let input_height = if show_input { INPUT_HEIGHT } else { 0 };

    let [header, body, input, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(input_height),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    render_header(frame, header, state);

    let body = inset(body, CONTENT_MARGIN);
    match state.screen {
        Screen::Creation => render_creation_form(frame, body, &state.creation, state.loading),
        Screen::Conversation if state.session.in_echo_chamber() => {
            render_echo_chamber(frame, body, &state.echo, state.spinner_frame);
        }
        Screen::Conversation => render_transcript(frame, body, &state.transcript),
    }

    if show_input {
        render_chat_input(frame, input, state, app.overlay.is_none());
    }
    render_footer(frame, footer, state);

    app.overlay.render(frame, area);
}

fn inset(area: Rect, margin: u16) -> Rect {
    Rect::new(
        area.x + margin.min(area.width / 2),
        area.y,
        area.width.saturating_sub(margin * 2),
        area.height,
    )
}

fn render_header(frame: &mut Frame, area: Rect, state: &TuiState) {
    let mut spans = vec![
        Span::styled(
            " Helios ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", state.variant),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let player = match &state.session.player_id {
        Some(id) => format!("player {}", short_id(id)),
        None => "no player".to_string(),
    };
    spans.push(Span::styled(player, Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!(" • {}", state.session.status),
        Style::default().fg(Color::DarkGray),
    ));

    if state.is_busy() {
        spans.push(Span::styled(
            format!("  {} working...", spinner(state.spinner_frame)),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chat_input(frame: &mut Frame, area: Rect, state: &TuiState, focused: bool) {
    let partner = state
        .selected_partner()
        .map_or("nobody", |npc| npc.name.as_str());
    let title = format!("To {partner}");
    let title = truncate_with_ellipsis(&title, area.width.saturating_sub(4) as usize);

    let (placeholder, color) = if state.session.player_id.is_none() {
        ("Waiting for the world to load...", Color::DarkGray)
    } else if state.loading {
        ("Waiting for a reply...", Color::DarkGray)
    } else {
        ("Say something and press Enter", Color::Cyan)
    };

    render_input_box(
        frame,
        area,
        &state.input,
        &InputBox {
            title: &title,
            placeholder,
            border_color: color,
            focused: focused && state.can_submit(),
        },
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &TuiState) {
    let line = match state.screen {
        Screen::Conversation if !state.session.in_echo_chamber() => partner_line(state),
        _ => hint_line(&[InputHint::new("Esc", "quit")], Color::Yellow),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Partner tabs followed by key hints.
fn partner_line(state: &TuiState) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, npc) in state.partners.iter().enumerate() {
        let style = if idx == state.selected_partner {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Magenta)
        };
        spans.push(Span::styled(format!(" {} {} ", idx + 1, npc.name), style));
        spans.push(Span::raw(" "));
    }

    let hints = [
        InputHint::new("Tab", "partner"),
        InputHint::new("Alt+N", "send to N"),
        InputHint::new("PgUp/PgDn", "scroll"),
        InputHint::new("Esc", "quit"),
    ];
    spans.extend(hint_line(&hints, Color::Yellow).spans);
    Line::from(spans)
}
