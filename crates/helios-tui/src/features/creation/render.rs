use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{CreationField, CreationForm};
use crate::input::{InputBox, render_input_box};

const FORM_WIDTH: u16 = 64;

/// Renders the character creation form centered in `area`.
pub fn render_creation_form(frame: &mut Frame, area: Rect, form: &CreationForm, loading: bool) {
    let width = FORM_WIDTH.min(area.width);
    let x = area.x + (area.width - width) / 2;
    let area = Rect::new(x, area.y, width, area.height);

    let [intro, identity, motivation, status] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(area);

    let heading = vec![
        Line::from(Span::styled(
            "Create your character",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Who are you, and what drives you? Both answers shape the scene.",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(heading).wrap(Wrap { trim: true }), intro);

    let color_for = |field: CreationField| {
        if form.focus == field {
            Color::Yellow
        } else {
            Color::DarkGray
        }
    };

    render_input_box(
        frame,
        identity,
        &form.identity,
        &InputBox {
            title: "Identity",
            placeholder: "a retired lighthouse keeper",
            border_color: color_for(CreationField::Identity),
            focused: !loading && form.focus == CreationField::Identity,
        },
    );
    render_input_box(
        frame,
        motivation,
        &form.motivation,
        &InputBox {
            title: "Motivation",
            placeholder: "to learn why the light went out",
            border_color: color_for(CreationField::Motivation),
            focused: !loading && form.focus == CreationField::Motivation,
        },
    );

    let note = if loading {
        Span::styled("Creating character...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "Tab switch field • Enter begin",
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(note)), status);
}
