//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Nothing in this module performs I/O.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use helios_core::config::Variant;
use helios_core::domain::{BeliefSystem, EchoChamberData, Message, PlayerStatus, short_id};

use crate::creation::{self, CreationAction};
use crate::effects::UiEffect;
use crate::events::{DialogueReply, SceneCharacter, UiEvent};
use crate::mutations::StateMutation;
use crate::overlays::{self, AlertState, EchoPromptState, Overlay};
use crate::state::{AppState, Screen, TuiState};

/// Alert shown when a creation field is left blank.
pub const INCOMPLETE_PROFILE_ALERT: &str =
    "Please describe both who you are and what drives you.";

/// Alert shown when the backend rejects a scene character.
pub const CREATION_FAILED_ALERT: &str = "Character creation failed. Please try again.";

/// Speaker label for the scene opening line.
pub const NARRATOR: &str = "Narrator";

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Mounted => handle_mounted(&mut app.tui),
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::PlayerCreated { result } => handle_player_created(&mut app.tui, result),
        UiEvent::DialogueReplied { result } => {
            handle_dialogue_replied(&mut app.tui, result);
            vec![]
        }
        UiEvent::EchoChamberLoaded { result } => {
            handle_echo_chamber_loaded(&mut app.tui, result);
            vec![]
        }
        UiEvent::EchoChamberResolved { result } => {
            handle_echo_chamber_resolved(&mut app.tui, result);
            vec![]
        }
        UiEvent::SceneCharacterCreated { result } => {
            handle_scene_character_created(app, result);
            vec![]
        }
        UiEvent::StatusPushed(status) => {
            handle_status_pushed(app, status);
            vec![]
        }
        UiEvent::SubscriptionEnded { result } => {
            match result {
                Ok(()) => tracing::info!("status subscription ended"),
                Err(e) => tracing::warn!(error = %e, "status subscription failed"),
            }
            vec![]
        }
    }
}

fn handle_mounted(tui: &mut TuiState) -> Vec<UiEffect> {
    match tui.variant {
        Variant::Prism if tui.session.player_id.is_none() && !tui.loading => {
            tui.loading = true;
            vec![UiEffect::CreatePlayer {
                username: tui.username.clone(),
            }]
        }
        _ => vec![],
    }
}

fn handle_player_created(tui: &mut TuiState, result: Result<String, String>) -> Vec<UiEffect> {
    tui.loading = false;
    let Ok(player_id) = result else {
        return vec![];
    };

    tui.transcript.push(Message::npc(
        format!(
            "Welcome to the world of Helios, player {}",
            short_id(&player_id)
        ),
        None,
    ));
    tui.session.player_id = Some(player_id.clone());
    vec![UiEffect::SubscribeStatus { player_id }]
}

fn handle_dialogue_replied(tui: &mut TuiState, result: Result<DialogueReply, String>) {
    tui.loading = false;
    let Ok(reply) = result else {
        return;
    };
    if let Some(dialogue) = reply.dialogue.filter(|d| !d.trim().is_empty()) {
        tui.transcript.push(Message::npc(dialogue, reply.speaker));
    }
}

fn handle_echo_chamber_loaded(tui: &mut TuiState, result: Result<EchoChamberData, String>) {
    tui.echo.loading = false;
    // A push may have closed the chamber while the call was in flight.
    if !tui.session.in_echo_chamber() {
        return;
    }
    // On failure the view stays in the chamber with no choices.
    if let Ok(data) = result {
        tui.echo.data = Some(data);
    }
}

fn handle_echo_chamber_resolved(
    tui: &mut TuiState,
    result: Result<Option<BeliefSystem>, String>,
) {
    tui.echo.loading = false;
    if !tui.session.in_echo_chamber() {
        return;
    }
    match result {
        Ok(beliefs) => tui.echo.beliefs = beliefs,
        Err(_) => tui.echo.resolved = false,
    }
}

fn handle_scene_character_created(app: &mut AppState, result: Result<SceneCharacter, String>) {
    let tui = &mut app.tui;
    tui.loading = false;
    match result {
        Ok(character) => {
            let profile = &character.profile;
            tui.transcript.push(Message::npc(
                format!(
                    "Your story begins. You are {}. What drives you: {}.",
                    profile.identity.trim_end_matches('.'),
                    profile.motivation.trim_end_matches('.')
                ),
                Some(NARRATOR.to_string()),
            ));
            tui.session.player_id = Some(character.player_id);
            tui.screen = Screen::Conversation;
        }
        Err(_) => {
            app.overlay = Some(Overlay::Alert(AlertState::new(CREATION_FAILED_ALERT)));
        }
    }
}

fn handle_status_pushed(app: &mut AppState, status: PlayerStatus) {
    match status {
        // Already inside: the round in progress stays as it is.
        PlayerStatus::RequiresEchoChamber if app.tui.session.in_echo_chamber() => {}
        PlayerStatus::RequiresEchoChamber => {
            app.overlay = Some(Overlay::EchoPrompt(EchoPromptState));
        }
        PlayerStatus::Active => {
            app.tui.session.status = PlayerStatus::Active;
            app.tui.echo.reset();
            if matches!(app.overlay, Some(Overlay::EchoPrompt(_))) {
                app.overlay = None;
            }
        }
    }
}

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::BeginEchoChamber => {
                tui.session.status = PlayerStatus::RequiresEchoChamber;
                tui.echo.reset();
                tui.echo.loading = true;
            }
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    if app.overlay.is_some() {
        return;
    }
    let tui = &mut app.tui;
    match tui.screen {
        Screen::Creation => tui.creation.focused_mut().insert_str(text),
        Screen::Conversation if !tui.session.in_echo_chamber() => tui.input.insert_str(text),
        Screen::Conversation => {}
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if matches!(key.kind, KeyEventKind::Release) {
        return vec![];
    }

    if let Some(update) = overlays::handle_overlay_key(&app.tui, &mut app.overlay, key) {
        apply_mutations(&mut app.tui, update.mutations);
        return update.effects;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
        return vec![UiEffect::Quit];
    }

    match app.tui.screen {
        Screen::Creation => match creation::handle_key(&mut app.tui.creation, key) {
            CreationAction::Submit => submit_creation(app),
            CreationAction::None => vec![],
        },
        Screen::Conversation => handle_conversation_key(&mut app.tui, key),
    }
}

fn handle_conversation_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::PageUp => {
            tui.transcript.page_up();
            return vec![];
        }
        KeyCode::PageDown => {
            tui.transcript.page_down();
            return vec![];
        }
        KeyCode::Home => {
            tui.transcript.scroll_to_top();
            return vec![];
        }
        KeyCode::End => {
            tui.transcript.scroll_to_bottom();
            return vec![];
        }
        _ => {}
    }

    if tui.session.in_echo_chamber() {
        return handle_echo_chamber_key(tui, key);
    }

    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Enter => submit_message(tui),
        KeyCode::Tab => {
            cycle_partner(tui, 1);
            vec![]
        }
        KeyCode::BackTab => {
            cycle_partner(tui, tui.partners.len().saturating_sub(1));
            vec![]
        }
        KeyCode::Char(digit @ '1'..='9') if alt => {
            let idx = digit as usize - '1' as usize;
            if idx >= tui.partners.len() {
                return vec![];
            }
            tui.selected_partner = idx;
            submit_message(tui)
        }
        _ => {
            tui.input.input(key);
            vec![]
        }
    }
}

fn cycle_partner(tui: &mut TuiState, step: usize) {
    if tui.partners.is_empty() {
        return;
    }
    tui.selected_partner = (tui.selected_partner + step) % tui.partners.len();
}

fn handle_echo_chamber_key(tui: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(choice) = tui.echo.handle_key(key) else {
        return vec![];
    };
    if tui.echo.data.is_none() || tui.echo.resolved || tui.echo.loading {
        return vec![];
    }
    let Some(player_id) = tui.session.player_id.clone() else {
        return vec![];
    };

    tui.echo.highlighted = choice;
    tui.echo.resolved = true;
    tui.echo.loading = true;
    vec![UiEffect::ResolveEchoChamber { player_id, choice }]
}

/// Appends the user message and asks for a reply from the selected partner.
fn submit_message(tui: &mut TuiState) -> Vec<UiEffect> {
    if !tui.can_submit() || tui.input.is_blank() {
        return vec![];
    }
    let (Some(player_id), Some(partner)) = (
        tui.session.player_id.clone(),
        tui.selected_partner().cloned(),
    ) else {
        return vec![];
    };

    let message = tui.input.take();
    tui.transcript.push(Message::user(message.clone()));
    tui.loading = true;

    let effect = match tui.variant {
        Variant::Prism => UiEffect::SendChat {
            player_id,
            npc_id: partner.id,
            message,
        },
        Variant::Scene => UiEffect::SendSceneDialogue {
            player_id,
            character_id: partner.id,
            message,
        },
    };
    vec![effect]
}

fn submit_creation(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.loading {
        return vec![];
    }
    let profile = app.tui.creation.profile();
    if !profile.is_complete() {
        app.overlay = Some(Overlay::Alert(AlertState::new(INCOMPLETE_PROFILE_ALERT)));
        return vec![];
    }
    app.tui.loading = true;
    vec![UiEffect::CreateSceneCharacter { profile }]
}

#[cfg(test)]
mod tests {
    use helios_core::config::Config;
    use helios_core::domain::{
        BeliefSystem, CharacterProfile, EchoChamberData, EchoChoice, Sender,
    };

    use super::*;
    use crate::creation::CreationField;

    const PLAYER: &str = "0123456789abcdef";

    fn app(variant: Variant) -> AppState {
        let config = Config {
            variant,
            ..Default::default()
        };
        AppState::new(&config)
    }

    /// A prism session that already has a player id.
    fn ready_prism() -> AppState {
        let mut app = app(Variant::Prism);
        update(&mut app, UiEvent::Mounted);
        update(
            &mut app,
            UiEvent::PlayerCreated {
                result: Ok(PLAYER.to_string()),
            },
        );
        app
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        press_with(app, code, KeyModifiers::NONE)
    }

    fn press_with(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers))),
        )
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn texts(app: &AppState) -> Vec<(Sender, String)> {
        app.tui
            .transcript
            .messages()
            .iter()
            .map(|m| (m.sender, m.text.clone()))
            .collect()
    }

    fn chamber_data() -> EchoChamberData {
        EchoChamberData {
            monologue: "The rain will not stop.".to_string(),
            choice_a: "Seek shelter".to_string(),
            choice_b: "Walk on".to_string(),
        }
    }

    /// A prism session inside the chamber with choices loaded.
    fn in_chamber() -> AppState {
        let mut app = ready_prism();
        update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );
        press(&mut app, KeyCode::Char('y'));
        update(
            &mut app,
            UiEvent::EchoChamberLoaded {
                result: Ok(chamber_data()),
            },
        );
        app
    }

    #[test]
    fn test_prism_mount_creates_player() {
        let mut app = app(Variant::Prism);
        let effects = update(&mut app, UiEvent::Mounted);
        assert_eq!(
            effects,
            vec![UiEffect::CreatePlayer {
                username: "Alex".to_string()
            }]
        );
        assert!(app.tui.loading);
    }

    #[test]
    fn test_scene_mount_shows_form_only() {
        let mut app = app(Variant::Scene);
        let effects = update(&mut app, UiEvent::Mounted);
        assert!(effects.is_empty());
        assert_eq!(app.tui.screen, Screen::Creation);
    }

    #[test]
    fn test_player_created_seeds_welcome_and_subscribes() {
        let mut app = app(Variant::Prism);
        update(&mut app, UiEvent::Mounted);
        let effects = update(
            &mut app,
            UiEvent::PlayerCreated {
                result: Ok(PLAYER.to_string()),
            },
        );

        assert_eq!(
            effects,
            vec![UiEffect::SubscribeStatus {
                player_id: PLAYER.to_string()
            }]
        );
        assert_eq!(
            texts(&app),
            vec![(
                Sender::Npc,
                "Welcome to the world of Helios, player 01234567...".to_string()
            )]
        );
        assert!(!app.tui.loading);
    }

    #[test]
    fn test_player_creation_failure_keeps_input_disabled() {
        let mut app = app(Variant::Prism);
        update(&mut app, UiEvent::Mounted);
        let effects = update(
            &mut app,
            UiEvent::PlayerCreated {
                result: Err("connection refused".to_string()),
            },
        );
        assert!(effects.is_empty());
        assert!(!app.tui.loading);

        type_text(&mut app, "Hello");
        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert!(app.tui.transcript.is_empty());
    }

    #[test]
    fn test_hello_hi_scenario() {
        let mut app = app(Variant::Prism);
        app.tui.session.player_id = Some(PLAYER.to_string());

        type_text(&mut app, "Hello");
        let effects = press(&mut app, KeyCode::Enter);

        assert_eq!(texts(&app), vec![(Sender::User, "Hello".to_string())]);
        assert_eq!(
            effects,
            vec![UiEffect::SendChat {
                player_id: PLAYER.to_string(),
                npc_id: "a1b2c3d4-e5f6-7890-1234-567890abcdef".to_string(),
                message: "Hello".to_string(),
            }]
        );
        assert_eq!(app.tui.input.text(), "");
        assert!(app.tui.loading);

        update(
            &mut app,
            UiEvent::DialogueReplied {
                result: Ok(DialogueReply {
                    dialogue: Some("Hi".to_string()),
                    speaker: Some("Gaia".to_string()),
                }),
            },
        );
        assert_eq!(
            texts(&app),
            vec![
                (Sender::User, "Hello".to_string()),
                (Sender::Npc, "Hi".to_string())
            ]
        );
        assert_eq!(
            app.tui.transcript.messages()[1].speaker.as_deref(),
            Some("Gaia")
        );
        assert!(!app.tui.loading);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut app = ready_prism();
        type_text(&mut app, "   ");
        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert_eq!(app.tui.transcript.len(), 1);
    }

    #[test]
    fn test_submit_ignored_while_loading() {
        let mut app = ready_prism();
        type_text(&mut app, "one");
        assert_eq!(press(&mut app, KeyCode::Enter).len(), 1);
        type_text(&mut app, "two");
        assert!(press(&mut app, KeyCode::Enter).is_empty());
        assert_eq!(app.tui.input.text(), "two");
        assert_eq!(app.tui.transcript.len(), 2);
    }

    #[test]
    fn test_failed_or_empty_reply_appends_nothing() {
        let mut app = ready_prism();
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);

        update(
            &mut app,
            UiEvent::DialogueReplied {
                result: Err("500".to_string()),
            },
        );
        assert_eq!(app.tui.transcript.len(), 2);
        assert!(!app.tui.loading);

        type_text(&mut app, "Again");
        press(&mut app, KeyCode::Enter);
        update(
            &mut app,
            UiEvent::DialogueReplied {
                result: Ok(DialogueReply {
                    dialogue: None,
                    speaker: None,
                }),
            },
        );
        assert_eq!(app.tui.transcript.len(), 3);
    }

    #[test]
    fn test_alt_digit_sends_to_that_partner() {
        let mut app = ready_prism();
        type_text(&mut app, "Hey");
        let effects = press_with(&mut app, KeyCode::Char('2'), KeyModifiers::ALT);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SendChat { npc_id, .. }] if npc_id == "b2c3d4e5-f6a7-8901-2345-67890abcdef0"
        ));
        assert_eq!(app.tui.selected_partner, 1);
    }

    #[test]
    fn test_alt_digit_out_of_range_does_nothing() {
        let mut app = ready_prism();
        type_text(&mut app, "Hey");
        assert!(press_with(&mut app, KeyCode::Char('9'), KeyModifiers::ALT).is_empty());
        assert_eq!(app.tui.input.text(), "Hey");
    }

    #[test]
    fn test_tab_cycles_partners() {
        let mut app = ready_prism();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tui.selected_partner, 1);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tui.selected_partner, 0);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tui.selected_partner, 1);
    }

    #[test]
    fn test_requires_echo_chamber_push_only_shows_prompt() {
        let mut app = ready_prism();
        let transcript_before = texts(&app);

        let effects = update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );

        assert!(effects.is_empty());
        assert!(matches!(app.overlay, Some(Overlay::EchoPrompt(_))));
        assert_eq!(app.tui.session.status, PlayerStatus::Active);
        assert!(!app.tui.loading);
        assert!(app.tui.echo.data.is_none());
        assert_eq!(texts(&app), transcript_before);
    }

    #[test]
    fn test_accepting_prompt_enters_chamber() {
        let mut app = ready_prism();
        update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );

        let effects = press(&mut app, KeyCode::Enter);

        assert_eq!(
            effects,
            vec![UiEffect::EnterEchoChamber {
                player_id: PLAYER.to_string()
            }]
        );
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.session.status, PlayerStatus::RequiresEchoChamber);
        assert!(app.tui.echo.loading);
    }

    #[test]
    fn test_declining_prompt_hides_it() {
        let mut app = ready_prism();
        update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );

        let effects = press(&mut app, KeyCode::Char('n'));

        assert!(effects.is_empty());
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.session.status, PlayerStatus::Active);
    }

    #[test]
    fn test_resolve_emits_exactly_one_effect_per_choice() {
        for (key, choice) in [('a', EchoChoice::Survival), ('b', EchoChoice::Idealism)] {
            let mut app = in_chamber();
            assert!(!app.tui.loading);

            let effects = press(&mut app, KeyCode::Char(key));
            assert_eq!(
                effects,
                vec![UiEffect::ResolveEchoChamber {
                    player_id: PLAYER.to_string(),
                    choice
                }]
            );
            assert_eq!(app.tui.session.status, PlayerStatus::RequiresEchoChamber);

            // A second choice before the push does nothing.
            update(
                &mut app,
                UiEvent::EchoChamberResolved {
                    result: Ok(Some(BeliefSystem {
                        survival: 0.4,
                        idealism: 0.6,
                    })),
                },
            );
            assert!(press(&mut app, KeyCode::Char('a')).is_empty());
            assert_eq!(app.tui.session.status, PlayerStatus::RequiresEchoChamber);
            assert!(app.tui.echo.beliefs.is_some());
        }
    }

    #[test]
    fn test_resolve_failure_allows_choosing_again() {
        let mut app = in_chamber();
        press(&mut app, KeyCode::Enter);
        update(
            &mut app,
            UiEvent::EchoChamberResolved {
                result: Err("timeout".to_string()),
            },
        );
        assert_eq!(press(&mut app, KeyCode::Enter).len(), 1);
    }

    #[test]
    fn test_choice_needs_loaded_payload() {
        let mut app = ready_prism();
        update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );
        press(&mut app, KeyCode::Enter);
        update(
            &mut app,
            UiEvent::EchoChamberLoaded {
                result: Err("404".to_string()),
            },
        );

        assert!(!app.tui.echo.loading);
        assert_eq!(app.tui.session.status, PlayerStatus::RequiresEchoChamber);
        assert!(press(&mut app, KeyCode::Char('a')).is_empty());
    }

    #[test]
    fn test_active_push_leaves_chamber() {
        let mut app = in_chamber();
        press(&mut app, KeyCode::Char('b'));

        update(&mut app, UiEvent::StatusPushed(PlayerStatus::Active));

        assert_eq!(app.tui.session.status, PlayerStatus::Active);
        assert!(app.tui.echo.data.is_none());
        assert!(!app.tui.echo.resolved);
    }

    #[test]
    fn test_active_push_hides_pending_prompt() {
        let mut app = ready_prism();
        update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );
        update(&mut app, UiEvent::StatusPushed(PlayerStatus::Active));
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_typing_disabled_inside_chamber() {
        let mut app = in_chamber();
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.tui.input.text(), "");
    }

    #[test]
    fn test_late_chamber_payload_after_active_push_is_dropped() {
        let mut app = ready_prism();
        update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );
        press(&mut app, KeyCode::Enter);
        update(&mut app, UiEvent::StatusPushed(PlayerStatus::Active));

        update(
            &mut app,
            UiEvent::EchoChamberLoaded {
                result: Ok(chamber_data()),
            },
        );

        assert_eq!(app.tui.session.status, PlayerStatus::Active);
        assert!(app.tui.echo.data.is_none());
        assert!(!app.tui.echo.loading);
        assert!(!app.tui.is_busy());
    }

    #[test]
    fn test_late_resolve_after_active_push_is_dropped() {
        let mut app = in_chamber();
        press(&mut app, KeyCode::Char('a'));
        update(&mut app, UiEvent::StatusPushed(PlayerStatus::Active));

        update(
            &mut app,
            UiEvent::EchoChamberResolved {
                result: Ok(Some(BeliefSystem {
                    survival: 0.7,
                    idealism: 0.3,
                })),
            },
        );

        assert!(app.tui.echo.beliefs.is_none());
        assert!(!app.tui.echo.resolved);
        assert!(!app.tui.echo.loading);
    }

    #[test]
    fn test_chat_reply_does_not_end_chamber_fetch() {
        let mut app = ready_prism();
        type_text(&mut app, "hi");
        press(&mut app, KeyCode::Enter);
        update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );
        press(&mut app, KeyCode::Enter);
        assert!(app.tui.echo.loading);

        update(
            &mut app,
            UiEvent::DialogueReplied {
                result: Ok(DialogueReply {
                    dialogue: Some("Hello, traveler.".to_string()),
                    speaker: None,
                }),
            },
        );

        assert!(app.tui.session.in_echo_chamber());
        assert!(!app.tui.loading);
        assert!(app.tui.echo.loading);
        assert!(app.tui.is_busy());

        update(
            &mut app,
            UiEvent::EchoChamberLoaded {
                result: Ok(chamber_data()),
            },
        );
        assert!(!app.tui.echo.loading);
        assert_eq!(app.tui.echo.data, Some(chamber_data()));
    }

    #[test]
    fn test_repeated_requires_push_keeps_current_round() {
        let mut app = in_chamber();
        press(&mut app, KeyCode::Char('b'));

        let effects = update(
            &mut app,
            UiEvent::StatusPushed(PlayerStatus::RequiresEchoChamber),
        );

        assert!(effects.is_empty());
        assert!(app.overlay.is_none());
        assert!(app.tui.echo.data.is_some());
        assert!(app.tui.echo.resolved);
    }

    #[test]
    fn test_creation_with_empty_motivation_alerts() {
        let mut app = app(Variant::Scene);
        update(&mut app, UiEvent::Mounted);
        type_text(&mut app, "A");

        let effects = press(&mut app, KeyCode::Enter);

        assert!(effects.is_empty());
        assert_eq!(app.tui.screen, Screen::Creation);
        assert!(matches!(
            &app.overlay,
            Some(Overlay::Alert(alert)) if alert.message == INCOMPLETE_PROFILE_ALERT
        ));
        assert!(!app.tui.loading);
    }

    #[test]
    fn test_creation_submits_trimmed_profile() {
        let mut app = app(Variant::Scene);
        type_text(&mut app, " A smuggler ");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Pay off a debt");
        assert_eq!(app.tui.creation.focus, CreationField::Motivation);

        let effects = press(&mut app, KeyCode::Enter);

        assert_eq!(
            effects,
            vec![UiEffect::CreateSceneCharacter {
                profile: CharacterProfile {
                    identity: "A smuggler".to_string(),
                    motivation: "Pay off a debt".to_string(),
                }
            }]
        );
        assert!(app.tui.loading);
        assert!(press(&mut app, KeyCode::Enter).is_empty());
    }

    #[test]
    fn test_creation_success_switches_to_conversation() {
        let mut app = app(Variant::Scene);
        update(
            &mut app,
            UiEvent::SceneCharacterCreated {
                result: Ok(SceneCharacter {
                    player_id: "c0ffee00-0000-4000-8000-000000000000".to_string(),
                    profile: CharacterProfile {
                        identity: "A smuggler".to_string(),
                        motivation: "Pay off a debt".to_string(),
                    },
                }),
            },
        );

        assert_eq!(app.tui.screen, Screen::Conversation);
        assert!(app.tui.session.player_id.is_some());
        let opening = &app.tui.transcript.messages()[0];
        assert_eq!(opening.speaker.as_deref(), Some(NARRATOR));
        assert!(opening.text.contains("A smuggler"));
    }

    #[test]
    fn test_creation_failure_alerts_and_stays() {
        let mut app = app(Variant::Scene);
        app.tui.loading = true;
        update(
            &mut app,
            UiEvent::SceneCharacterCreated {
                result: Err("422".to_string()),
            },
        );
        assert_eq!(app.tui.screen, Screen::Creation);
        assert!(!app.tui.loading);
        assert!(matches!(
            &app.overlay,
            Some(Overlay::Alert(alert)) if alert.message == CREATION_FAILED_ALERT
        ));
    }

    #[test]
    fn test_scene_dialogue_uses_scene_effect() {
        let mut app = app(Variant::Scene);
        app.tui.screen = Screen::Conversation;
        app.tui.session.player_id = Some("p-2".to_string());

        type_text(&mut app, "Any news?");
        let effects = press(&mut app, KeyCode::Enter);

        assert_eq!(
            effects,
            vec![UiEffect::SendSceneDialogue {
                player_id: "p-2".to_string(),
                character_id: "a1b2c3d4-e5f6-7890-1234-567890abcdef".to_string(),
                message: "Any news?".to_string(),
            }]
        );
    }

    #[test]
    fn test_alert_blocks_keys_until_dismissed() {
        let mut app = app(Variant::Scene);
        press(&mut app, KeyCode::Enter);
        assert!(app.overlay.is_some());

        press(&mut app, KeyCode::Char('z'));
        assert_eq!(app.tui.creation.identity.text(), "");

        press(&mut app, KeyCode::Enter);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut app = ready_prism();
        assert_eq!(press(&mut app, KeyCode::Esc), vec![UiEffect::Quit]);
        assert_eq!(
            press_with(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            vec![UiEffect::Quit]
        );
    }

    #[test]
    fn test_new_message_returns_to_latest() {
        let mut app = ready_prism();
        press(&mut app, KeyCode::Home);
        assert_ne!(
            app.tui.transcript.scroll_mode,
            crate::transcript::ScrollMode::FollowLatest
        );
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.tui.transcript.scroll_mode,
            crate::transcript::ScrollMode::FollowLatest
        );
    }

    #[test]
    fn test_paste_goes_to_focused_input() {
        let mut app = ready_prism();
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("multi\nline".to_string())),
        );
        assert_eq!(app.tui.input.text(), "multi line");
    }
}
