//! Transcript rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style as TuiStyle};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use super::TranscriptState;
use super::style::{Style, StyledLine};

/// Renders the visible slice of the transcript.
///
/// Records the viewport height and max offset so the reducer can scroll
/// without knowing the layout.
pub fn render_transcript(frame: &mut Frame, area: Rect, state: &TranscriptState) {
    if area.width < 2 || area.height == 0 {
        return;
    }

    // Last column is reserved for the scrollbar.
    let content_width = area.width.saturating_sub(1) as usize;
    let lines = state.display_lines(content_width);
    let viewport = area.height as usize;
    let max_offset = lines.len().saturating_sub(viewport);
    state.viewport_height.set(viewport);
    state.max_offset.set(max_offset);

    let offset = state.offset();
    let visible: Vec<Line<'static>> = lines
        .iter()
        .skip(offset)
        .take(viewport)
        .map(to_line)
        .collect();

    let content = Rect::new(area.x, area.y, area.width - 1, area.height);
    frame.render_widget(Paragraph::new(visible), content);

    if max_offset > 0 {
        let mut scrollbar = ScrollbarState::new(max_offset).position(offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            area,
            &mut scrollbar,
        );
    }
}

fn to_line(line: &StyledLine) -> Line<'static> {
    Line::from(
        line.spans
            .iter()
            .map(|span| Span::styled(span.text.clone(), style_for(span.style)))
            .collect::<Vec<_>>(),
    )
}

fn style_for(style: Style) -> TuiStyle {
    match style {
        Style::Plain => TuiStyle::default(),
        Style::UserLabel => TuiStyle::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        Style::User => TuiStyle::default().add_modifier(Modifier::ITALIC),
        Style::NpcLabel => TuiStyle::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        Style::Npc => TuiStyle::default(),
        Style::Gutter => TuiStyle::default().fg(Color::DarkGray),
    }
}
