/// A styled span of text (UI-agnostic).
///
/// Converted to ratatui `Span`/`Line` at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

/// A line of styled spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    pub fn empty() -> Self {
        StyledLine { spans: vec![] }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        StyledLine {
            spans: vec![StyledSpan {
                text: text.into(),
                style,
            }],
        }
    }

    /// Concatenated text, for tests and width checks.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Semantic style identifiers.
///
/// The renderer maps these to terminal styles so the transcript slice
/// stays free of ratatui types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    /// "You" header above user messages.
    UserLabel,
    /// User message body.
    User,
    /// Speaker header above NPC messages.
    NpcLabel,
    /// NPC message body.
    Npc,
    /// Left gutter bar.
    Gutter,
}
