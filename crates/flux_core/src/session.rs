//! The session phase state machine.
//!
//! Phases: `Start` (optional gate screen) -> `Active` (one microgame on a
//! wall-clock budget) -> `Transition` (the "NEXT!" banner) -> `Active` with
//! the next pick, looping; `Menu` is reachable from anywhere by explicit
//! toggle and never exits on its own.
//!
//! No caller mutates the phase directly. Every edge runs through a method
//! here, and each method returns the ordered entry actions for the phase
//! being entered. The presentation loop applies that list before it renders
//! anything, so a transition and its side effects (audio cut, game reset,
//! background start) are atomic within the frame that detected it; there is
//! no observable half-transition.
//!
//! The asymmetry around the menu is deliberate and load-bearing: explicitly
//! selecting an entry always resets that microgame, while toggling the menu
//! open and closed resumes the prior microgame untouched (a peek, not a
//! restart).

use crate::catalog::MicrogameId;
use crate::clock::PhaseTimer;
use crate::select::{SelectionMode, Selector};

/// Default wall-clock budget for one microgame.
pub const DEFAULT_ACTIVE_MS: u64 = 6_000;
/// Default wall-clock budget for the advance banner.
pub const DEFAULT_TRANSITION_MS: u64 = 2_000;
/// The objective caption fades out over this window at the top of `Active`.
pub const CAPTION_FADE_MS: u64 = 1_100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Start,
    Menu,
    Active,
    Transition,
}

/// Entry actions returned by a phase edge, in the order they must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Hard-cancel the exclusive background loop and any held loop.
    StopAllAudio,
    /// Reinitialize this microgame's transient state.
    ResetGame(MicrogameId),
    /// Ask the channel manager to apply this game's background policy.
    StartBackground(MicrogameId),
    /// Fire the single advance cue (one-shot, effects path).
    PlayAdvanceCue,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub active_ms: u64,
    pub transition_ms: u64,
    pub selection: SelectionMode,
    pub start_screen: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            active_ms: DEFAULT_ACTIVE_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
            selection: SelectionMode::Sequential,
            start_screen: true,
        }
    }
}

pub struct Session {
    config: SessionConfig,
    ids: Vec<MicrogameId>,
    selector: Selector,
    phase: SessionPhase,
    timer: PhaseTimer,
    current: MicrogameId,
    /// False until the first Active entry. A menu opened straight from the
    /// start screen has no prior game to peek back into.
    started: bool,
}

impl Session {
    /// Build the session. When no start screen is configured the session
    /// begins mid-game, so the returned actions may already carry the first
    /// Active entry.
    pub fn new(
        config: SessionConfig,
        ids: Vec<MicrogameId>,
        now_ms: u64,
    ) -> (Self, Vec<SessionAction>) {
        assert!(!ids.is_empty(), "session requires a non-empty catalog");
        let current = ids[0];
        let mut session = Self {
            selector: Selector::new(config.selection),
            config,
            ids,
            phase: SessionPhase::Start,
            timer: PhaseTimer::started_at(now_ms),
            current,
            started: false,
        };
        let actions = if session.config.start_screen {
            Vec::new()
        } else {
            session.first_entry(now_ms)
        };
        (session, actions)
    }

    #[cfg(test)]
    pub fn with_seeded_selector(
        config: SessionConfig,
        ids: Vec<MicrogameId>,
        now_ms: u64,
        seed: u64,
    ) -> (Self, Vec<SessionAction>) {
        let (mut session, _) = Self::new(
            SessionConfig {
                start_screen: true,
                ..config
            },
            ids,
            now_ms,
        );
        session.selector = Selector::with_seed(config.selection, seed);
        session.config.start_screen = config.start_screen;
        let actions = if config.start_screen {
            Vec::new()
        } else {
            session.first_entry(now_ms)
        };
        (session, actions)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current(&self) -> MicrogameId {
        self.current
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase_elapsed(&self, now_ms: u64) -> u64 {
        self.timer.elapsed(now_ms)
    }

    /// Explicit "begin" from the start screen. Ignored in any other phase;
    /// that would be a caller bug, not a player action.
    pub fn begin(&mut self, now_ms: u64) -> Vec<SessionAction> {
        if self.phase != SessionPhase::Start {
            debug_assert!(false, "begin() outside the Start phase");
            return Vec::new();
        }
        self.first_entry(now_ms)
    }

    /// Menu toggle. Opening stops all audio; closing resumes the prior
    /// microgame *without* resetting it. If no game has ever run, closing
    /// behaves like a first entry instead, since there is nothing to resume.
    pub fn toggle_menu(&mut self, now_ms: u64) -> Vec<SessionAction> {
        if self.phase != SessionPhase::Menu {
            self.phase = SessionPhase::Menu;
            self.timer.restart(now_ms);
            return vec![SessionAction::StopAllAudio];
        }
        if !self.started {
            return self.first_entry(now_ms);
        }
        self.phase = SessionPhase::Active;
        self.timer.restart(now_ms);
        vec![SessionAction::StartBackground(self.current)]
    }

    /// Explicit selection of a catalog entry from the menu. Always resets
    /// the chosen game, even when it is the one that was already current.
    pub fn select_from_menu(&mut self, id: MicrogameId, now_ms: u64) -> Vec<SessionAction> {
        if self.phase != SessionPhase::Menu {
            debug_assert!(false, "select_from_menu() outside the Menu phase");
            return Vec::new();
        }
        debug_assert!(self.ids.contains(&id), "menu offered an unknown id");
        self.enter_active(id, now_ms)
    }

    /// Timed transitions. Call once per frame with the current wall clock;
    /// returns entry actions when a phase budget has elapsed.
    pub fn tick(&mut self, now_ms: u64) -> Vec<SessionAction> {
        match self.phase {
            SessionPhase::Active => {
                if self.timer.elapsed(now_ms) >= self.config.active_ms {
                    self.phase = SessionPhase::Transition;
                    self.timer.restart(now_ms);
                    vec![SessionAction::StopAllAudio, SessionAction::PlayAdvanceCue]
                } else {
                    Vec::new()
                }
            }
            SessionPhase::Transition => {
                if self.timer.elapsed(now_ms) >= self.config.transition_ms {
                    let next = self.selector.next(&self.ids, self.current);
                    self.enter_active(next, now_ms)
                } else {
                    Vec::new()
                }
            }
            SessionPhase::Start | SessionPhase::Menu => Vec::new(),
        }
    }

    fn first_entry(&mut self, now_ms: u64) -> Vec<SessionAction> {
        let id = self.selector.initial(&self.ids, self.current);
        self.enter_active(id, now_ms)
    }

    fn enter_active(&mut self, id: MicrogameId, now_ms: u64) -> Vec<SessionAction> {
        self.phase = SessionPhase::Active;
        self.current = id;
        self.started = true;
        self.timer.restart(now_ms);
        vec![
            SessionAction::StopAllAudio,
            SessionAction::ResetGame(id),
            SessionAction::StartBackground(id),
        ]
    }
}

/// Opacity of the objective caption at `elapsed` ms into the Active phase:
/// fully opaque at 0, gone at `CAPTION_FADE_MS`, linear in between.
pub fn caption_alpha(elapsed_ms: u64) -> f32 {
    if elapsed_ms >= CAPTION_FADE_MS {
        0.0
    } else {
        1.0 - elapsed_ms as f32 / CAPTION_FADE_MS as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u8]) -> Vec<MicrogameId> {
        raw.iter().map(|&v| MicrogameId(v)).collect()
    }

    fn sequential_config() -> SessionConfig {
        SessionConfig {
            selection: SelectionMode::Sequential,
            ..SessionConfig::default()
        }
    }

    /// Minimal stand-in for the channel manager: applies actions the way the
    /// arcade loop does and tracks the exclusive-channel occupancy.
    #[derive(Default)]
    struct AudioProbe {
        active_background: Option<MicrogameId>,
        max_concurrent: usize,
    }

    impl AudioProbe {
        fn apply(&mut self, actions: &[SessionAction]) {
            for action in actions {
                match action {
                    SessionAction::StopAllAudio => self.active_background = None,
                    SessionAction::StartBackground(id) => {
                        // A start always replaces; cardinality never exceeds 1.
                        self.active_background = Some(*id);
                    }
                    SessionAction::ResetGame(_) | SessionAction::PlayAdvanceCue => {}
                }
                self.max_concurrent = self
                    .max_concurrent
                    .max(usize::from(self.active_background.is_some()));
            }
        }
    }

    #[test]
    fn starts_in_start_phase_when_configured() {
        let (session, actions) = Session::new(sequential_config(), ids(&[1, 2]), 0);
        assert_eq!(session.phase(), SessionPhase::Start);
        assert!(actions.is_empty());
    }

    #[test]
    fn skips_start_screen_when_disabled() {
        let config = SessionConfig {
            start_screen: false,
            ..sequential_config()
        };
        let (session, actions) = Session::new(config, ids(&[4, 5]), 0);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current(), MicrogameId(4));
        assert_eq!(
            actions,
            vec![
                SessionAction::StopAllAudio,
                SessionAction::ResetGame(MicrogameId(4)),
                SessionAction::StartBackground(MicrogameId(4)),
            ]
        );
    }

    #[test]
    fn begin_enters_active_with_initial_pick() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 3, 4]), 0);
        let actions = session.begin(100);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current(), MicrogameId(1));
        assert!(actions.contains(&SessionAction::ResetGame(MicrogameId(1))));
        assert_eq!(session.phase_elapsed(100), 0);
    }

    #[test]
    fn active_advances_to_transition_at_budget_not_before() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 2]), 0);
        session.begin(0);
        assert!(session.tick(5_999).is_empty());
        assert_eq!(session.phase(), SessionPhase::Active);
        let actions = session.tick(6_000);
        assert_eq!(session.phase(), SessionPhase::Transition);
        assert_eq!(
            actions,
            vec![SessionAction::StopAllAudio, SessionAction::PlayAdvanceCue]
        );
    }

    #[test]
    fn transition_advances_to_next_game_at_budget() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 3, 4]), 0);
        session.begin(0);
        session.tick(6_000);
        assert!(session.tick(7_999).is_empty());
        let actions = session.tick(8_000);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current(), MicrogameId(3));
        assert_eq!(
            actions,
            vec![
                SessionAction::StopAllAudio,
                SessionAction::ResetGame(MicrogameId(3)),
                SessionAction::StartBackground(MicrogameId(3)),
            ]
        );
    }

    #[test]
    fn sequential_session_wraps_through_catalog() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 3, 4]), 0);
        let mut now = 0;
        session.begin(now);
        let mut visited = vec![session.current().0];
        for _ in 0..5 {
            now += 6_000;
            session.tick(now);
            now += 2_000;
            session.tick(now);
            visited.push(session.current().0);
        }
        assert_eq!(visited, vec![1, 3, 4, 1, 3, 4]);
    }

    #[test]
    fn reset_precedes_background_on_every_active_entry() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 2]), 0);
        let check = |actions: Vec<SessionAction>| {
            let reset = actions
                .iter()
                .position(|a| matches!(a, SessionAction::ResetGame(_)))
                .expect("active entry must reset");
            let start = actions
                .iter()
                .position(|a| matches!(a, SessionAction::StartBackground(_)))
                .expect("active entry must apply background policy");
            assert!(reset < start);
            assert_eq!(
                actions
                    .iter()
                    .filter(|a| matches!(a, SessionAction::ResetGame(_)))
                    .count(),
                1
            );
        };
        check(session.begin(0));
        session.tick(6_000);
        check(session.tick(8_000));
    }

    #[test]
    fn background_channel_cardinality_stays_at_most_one() {
        let (mut session, actions) = Session::new(
            SessionConfig {
                start_screen: false,
                ..sequential_config()
            },
            ids(&[1, 2, 3]),
            0,
        );
        let mut probe = AudioProbe::default();
        probe.apply(&actions);
        let mut now = 0;
        for _ in 0..10 {
            now += 6_000;
            probe.apply(&session.tick(now));
            now += 2_000;
            probe.apply(&session.tick(now));
        }
        probe.apply(&session.toggle_menu(now));
        assert_eq!(probe.active_background, None);
        probe.apply(&session.select_from_menu(MicrogameId(2), now));
        assert_eq!(probe.active_background, Some(MicrogameId(2)));
        assert_eq!(probe.max_concurrent, 1);
    }

    #[test]
    fn menu_toggle_is_a_peek_without_reset() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 2]), 0);
        session.begin(0);
        let open = session.toggle_menu(1_000);
        assert_eq!(session.phase(), SessionPhase::Menu);
        assert_eq!(open, vec![SessionAction::StopAllAudio]);

        let close = session.toggle_menu(2_000);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.current(), MicrogameId(1));
        assert!(
            !close.iter().any(|a| matches!(a, SessionAction::ResetGame(_))),
            "peek-return must not reset the prior game"
        );
        assert_eq!(close, vec![SessionAction::StartBackground(MicrogameId(1))]);
    }

    #[test]
    fn explicit_menu_selection_of_same_id_still_resets() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 2]), 0);
        session.begin(0);
        session.toggle_menu(1_000);
        let actions = session.select_from_menu(MicrogameId(1), 2_000);
        assert!(actions.contains(&SessionAction::ResetGame(MicrogameId(1))));
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn menu_never_times_out() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 2]), 0);
        session.begin(0);
        session.toggle_menu(1_000);
        assert!(session.tick(1_000_000).is_empty());
        assert_eq!(session.phase(), SessionPhase::Menu);
    }

    #[test]
    fn menu_opened_from_start_screen_enters_fresh_on_toggle_back() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 2]), 0);
        let open = session.toggle_menu(500);
        assert_eq!(open, vec![SessionAction::StopAllAudio]);
        let close = session.toggle_menu(900);
        // No prior game exists, so this must be a full first entry.
        assert!(close.contains(&SessionAction::ResetGame(MicrogameId(1))));
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn menu_selection_does_not_disturb_sequential_cycle() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 3, 4]), 0);
        session.begin(0);
        session.toggle_menu(100);
        session.select_from_menu(MicrogameId(4), 200);
        assert_eq!(session.current(), MicrogameId(4));
        // The cycle resumes from the index it had, not from the menu pick.
        session.tick(6_200);
        session.tick(8_200);
        assert_eq!(session.current(), MicrogameId(3));
    }

    #[test]
    fn phase_timer_resets_on_every_entry() {
        let (mut session, _) = Session::new(sequential_config(), ids(&[1, 2]), 0);
        session.begin(1_000);
        assert_eq!(session.phase_elapsed(1_500), 500);
        session.tick(7_000);
        assert_eq!(session.phase_elapsed(7_100), 100);
        session.tick(9_000);
        assert_eq!(session.phase_elapsed(9_001), 1);
    }

    #[test]
    fn random_session_avoids_immediate_repeat() {
        let config = SessionConfig {
            selection: SelectionMode::Random,
            start_screen: false,
            ..SessionConfig::default()
        };
        let (mut session, _) =
            Session::with_seeded_selector(config, ids(&[1, 2, 3, 4]), 0, 99);
        let mut now = 0;
        let mut prev = session.current();
        for _ in 0..2_000 {
            now += 6_000;
            session.tick(now);
            now += 2_000;
            session.tick(now);
            assert_ne!(session.current(), prev);
            prev = session.current();
        }
    }

    #[test]
    fn caption_alpha_fades_monotonically() {
        assert_eq!(caption_alpha(0), 1.0);
        assert_eq!(caption_alpha(CAPTION_FADE_MS), 0.0);
        assert_eq!(caption_alpha(CAPTION_FADE_MS + 500), 0.0);
        let mut prev = caption_alpha(0);
        for elapsed in (0..=CAPTION_FADE_MS).step_by(50) {
            let alpha = caption_alpha(elapsed);
            assert!(alpha <= prev);
            assert!((0.0..=1.0).contains(&alpha));
            prev = alpha;
        }
    }
}
