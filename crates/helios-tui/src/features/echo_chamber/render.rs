use helios_core::domain::EchoChoice;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::EchoChamberState;
use crate::common::spinner;

const ACCENT: Color = Color::LightMagenta;

pub fn render_echo_chamber(
    frame: &mut Frame,
    area: Rect,
    state: &EchoChamberState,
    spinner_frame: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            " Echo Chamber ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(data) = state.data.as_ref() else {
        let text = if state.loading {
            format!("{} The echoes gather...", spinner(spinner_frame))
        } else {
            "The echoes are silent.".to_string()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(Color::Gray),
            )))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [monologue, choices, footer] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(data.monologue.as_str())
            .style(Style::default().add_modifier(Modifier::ITALIC))
            .wrap(Wrap { trim: false }),
        monologue,
    );

    let button = |choice: EchoChoice, key: &str, label: &str| {
        let selected = state.highlighted == choice && !state.resolved;
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT)
        };
        Span::styled(format!(" [{key}] {label} "), style)
    };
    let buttons = Line::from(vec![
        button(EchoChoice::Survival, "A", &data.choice_a),
        Span::raw("   "),
        button(EchoChoice::Idealism, "B", &data.choice_b),
    ]);
    frame.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        choices,
    );

    let note = match (&state.beliefs, state.resolved, state.loading) {
        (_, true, true) => format!("{} Your choice echoes...", spinner(spinner_frame)),
        (Some(beliefs), true, false) => format!(
            "Beliefs now: survival {:.2} • idealism {:.2}. Waiting for the world to answer.",
            beliefs.survival, beliefs.idealism
        ),
        (None, true, false) => "Waiting for the world to answer.".to_string(),
        _ => "←/→ pick • Enter choose".to_string(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            note,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center),
        footer,
    );
}
