//! Transcript state: the message log and its scroll position.

use std::cell::Cell;

use helios_core::domain::{Message, Sender};

use super::style::{Style, StyledLine, StyledSpan};
use crate::common::{sanitize_for_display, wrap_text};

/// Gutter drawn in front of every message body line.
const GUTTER: &str = "│ ";

/// Label used for NPC messages that carry no speaker name.
pub const DEFAULT_NPC_LABEL: &str = "Helios";

/// Scroll behavior of the transcript view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Pinned to the newest line.
    #[default]
    FollowLatest,
    /// Pinned to a line offset from the top.
    Anchored { offset: usize },
}

#[derive(Debug, Default)]
pub struct TranscriptState {
    messages: Vec<Message>,
    pub scroll_mode: ScrollMode,
    /// Viewport height seen by the last render.
    pub viewport_height: Cell<usize>,
    /// Largest valid top offset seen by the last render.
    pub max_offset: Cell<usize>,
}

impl TranscriptState {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends a message and snaps the view back to the newest line.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_mode = ScrollMode::FollowLatest;
    }

    /// Top line offset the renderer should use.
    pub fn offset(&self) -> usize {
        match self.scroll_mode {
            ScrollMode::FollowLatest => self.max_offset.get(),
            ScrollMode::Anchored { offset } => offset.min(self.max_offset.get()),
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let offset = self.offset().saturating_sub(lines);
        self.scroll_mode = ScrollMode::Anchored { offset };
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let offset = self.offset().saturating_add(lines);
        self.scroll_mode = if offset >= self.max_offset.get() {
            ScrollMode::FollowLatest
        } else {
            ScrollMode::Anchored { offset }
        };
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_mode = ScrollMode::Anchored { offset: 0 };
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_mode = ScrollMode::FollowLatest;
    }

    fn page_size(&self) -> usize {
        self.viewport_height.get().saturating_sub(1).max(1)
    }

    /// Lays every message out at `width` columns.
    pub fn display_lines(&self, width: usize) -> Vec<StyledLine> {
        let body_width = width.saturating_sub(GUTTER.chars().count()).max(1);
        let mut lines = Vec::new();

        for (idx, message) in self.messages.iter().enumerate() {
            if idx > 0 {
                lines.push(StyledLine::empty());
            }
            let (label, label_style, body_style) = match message.sender {
                Sender::User => ("You", Style::UserLabel, Style::User),
                Sender::Npc => (
                    message.speaker.as_deref().unwrap_or(DEFAULT_NPC_LABEL),
                    Style::NpcLabel,
                    Style::Npc,
                ),
            };
            lines.push(StyledLine::styled(label, label_style));

            let text = sanitize_for_display(&message.text);
            for row in wrap_text(&text, body_width) {
                lines.push(StyledLine {
                    spans: vec![
                        StyledSpan {
                            text: GUTTER.to_string(),
                            style: Style::Gutter,
                        },
                        StyledSpan {
                            text: row,
                            style: body_style,
                        },
                    ],
                });
            }
        }

        lines
    }
}
