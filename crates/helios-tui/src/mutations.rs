//! State mutations requested by overlays.
//!
//! Overlay key handlers only see `&TuiState`, so changes they need outside
//! their own state are returned as data and applied by the reducer.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    /// The player accepted the echo chamber prompt.
    BeginEchoChamber,
}
