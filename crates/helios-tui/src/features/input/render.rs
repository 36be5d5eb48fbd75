//! Input box rendering.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use super::LineBuffer;

/// How the box should look.
pub struct InputBox<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
    pub border_color: Color,
    /// Draws the terminal cursor inside the box.
    pub focused: bool,
}

/// Renders a bordered single-line input.
///
/// Long text scrolls horizontally so the cursor always stays visible.
pub fn render_input_box(frame: &mut Frame, area: Rect, buffer: &LineBuffer, input: &InputBox<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input.border_color))
        .title(Span::styled(
            format!(" {} ", input.title),
            Style::default().fg(input.border_color),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if buffer.text().is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                input.placeholder,
                Style::default().fg(Color::DarkGray),
            ))),
            inner,
        );
        if input.focused {
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    let (visible, cursor_x) = visible_window(buffer, inner.width as usize);
    frame.render_widget(Paragraph::new(Line::from(visible)), inner);
    if input.focused {
        frame.set_cursor_position(Position::new(inner.x + cursor_x as u16, inner.y));
    }
}

/// Slice of the buffer that fits `width` columns with the cursor in view,
/// plus the cursor column inside that slice.
fn visible_window(buffer: &LineBuffer, width: usize) -> (String, usize) {
    let chars: Vec<char> = buffer.text().chars().collect();
    let cursor = buffer.cursor().min(chars.len());
    let col_width = |c: &char| c.width().unwrap_or(0);

    // Leave one column for the cursor itself.
    let budget = width.saturating_sub(1);
    let mut start = 0;
    let mut prefix: usize = chars[..cursor].iter().map(col_width).sum();
    while prefix > budget && start < cursor {
        prefix -= col_width(&chars[start]);
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let w = col_width(ch);
        if used + w > width {
            break;
        }
        visible.push(*ch);
        used += w;
    }
    (visible, prefix)
}
