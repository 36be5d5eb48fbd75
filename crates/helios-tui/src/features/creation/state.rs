use helios_core::domain::CharacterProfile;

use crate::input::LineBuffer;

/// Which creation field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationField {
    #[default]
    Identity,
    Motivation,
}

impl CreationField {
    pub fn next(self) -> Self {
        match self {
            CreationField::Identity => CreationField::Motivation,
            CreationField::Motivation => CreationField::Identity,
        }
    }
}

/// Scene character creation form.
#[derive(Debug, Clone, Default)]
pub struct CreationForm {
    pub identity: LineBuffer,
    pub motivation: LineBuffer,
    pub focus: CreationField,
}

impl CreationForm {
    pub fn focused_mut(&mut self) -> &mut LineBuffer {
        match self.focus {
            CreationField::Identity => &mut self.identity,
            CreationField::Motivation => &mut self.motivation,
        }
    }

    pub fn profile(&self) -> CharacterProfile {
        CharacterProfile {
            identity: self.identity.text().trim().to_string(),
            motivation: self.motivation.text().trim().to_string(),
        }
    }
}
