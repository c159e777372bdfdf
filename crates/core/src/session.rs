//! Game session - runs the per-tick state machine
//!
//! This module ties together the board, the collision checks, the piece
//! source and the scoring rules. One [`GameSession::tick`] is one step of the
//! simulation:
//!
//! 1. advance the descent timer,
//! 2. apply the player's intents (down, right, left, rotate; each only if it fits),
//! 3. on a forced descent that does not fit, lock, speed up, mark completed
//!    rows and spawn the next piece,
//! 4. score and collapse the marked rows.
//!
//! Steps 1-3 are [`GameSession::advance`] and step 4 is
//! [`GameSession::resolve_clears`]. Drivers that want to show the marked rows
//! before they disappear call the two halves separately and pause in between.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::collision::piece_fits;
use crate::pieces::Tetromino;
use crate::rng::{PieceSource, SimpleRng};
use crate::scoring::{difficulty_level, line_clear_score, next_speed};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    ContractError, Intent, IntentSet, PieceKind, BASE_SPEED, FIELD_HEIGHT, FIELD_WIDTH,
    PIECES_PER_SPEEDUP, SPEED_FLOOR,
};

/// Tunables fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Field width including both side walls.
    pub width: usize,
    /// Field height including the bottom wall.
    pub height: usize,
    /// Ticks per forced descent at the start.
    pub base_speed: u32,
    /// Ticks per forced descent never go below this.
    pub speed_floor: u32,
    /// Locked pieces between speed-ups.
    pub pieces_per_speedup: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            base_speed: BASE_SPEED,
            speed_floor: SPEED_FLOOR,
            pieces_per_speedup: PIECES_PER_SPEEDUP,
        }
    }
}

impl SessionConfig {
    /// Check the speed settings. Field size is checked by [`Board::with_size`].
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.speed_floor == 0
            || self.speed_floor > self.base_speed
            || self.pieces_per_speedup == 0
        {
            return Err(ContractError::InvalidSpeed {
                base: self.base_speed,
                floor: self.speed_floor,
                per: self.pieces_per_speedup,
            });
        }
        Ok(())
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// A freshly spawned piece did not fit.
    Blocked,
    /// The player asked to quit.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Playing,
    /// Terminal: further ticks do nothing.
    GameOver(EndReason),
}

/// What happened during one call to [`GameSession::advance`] or
/// [`GameSession::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// A forced descent happened this tick.
    pub forced_descent: bool,
    /// The active piece locked into the board.
    pub locked: bool,
    /// Rows marked complete by the lock.
    pub rows_marked: usize,
    /// Kind of the piece spawned after the lock.
    pub spawned: Option<PieceKind>,
    /// Points awarded (only set by [`GameSession::tick`]).
    pub points: u32,
    /// The session ended during this tick.
    pub ended: Option<EndReason>,
}

/// One game, from first spawn to game over.
#[derive(Debug, Clone)]
pub struct GameSession<S: PieceSource = SimpleRng> {
    config: SessionConfig,
    board: Board,
    source: S,
    active: Tetromino,
    state: SessionState,
    score: u32,
    /// Ticks per forced descent.
    speed: u32,
    speed_counter: u32,
    piece_count: u32,
    /// Rows marked with the clearing sentinel, top to bottom.
    pending_rows: Vec<usize>,
    ticks: u64,
}

impl<S: PieceSource> GameSession<S> {
    /// Start a session on an empty field built from `config`.
    pub fn new(config: SessionConfig, source: S) -> Result<Self, ContractError> {
        let board = Board::with_size(config.width, config.height)?;
        Self::with_board(config, board, source)
    }

    /// Start a session on a prepared board.
    ///
    /// The board's own size wins over `config.width`/`config.height`. The
    /// first piece is drawn immediately; if it does not fit the session starts
    /// out finished.
    pub fn with_board(
        mut config: SessionConfig,
        board: Board,
        source: S,
    ) -> Result<Self, ContractError> {
        config.validate()?;
        config.width = board.width();
        config.height = board.height();
        Ok(Self::start(config, board, source))
    }

    fn start(config: SessionConfig, board: Board, mut source: S) -> Self {
        let kind = source.next_kind();
        let mut session = Self {
            config,
            active: Tetromino::spawn(kind, board.width()),
            board,
            source,
            state: SessionState::Playing,
            score: 0,
            speed: config.base_speed,
            speed_counter: 0,
            piece_count: 0,
            pending_rows: Vec::with_capacity(4),
            ticks: 0,
        };
        if !piece_fits(&session.board, &session.active) {
            session.end(EndReason::Blocked);
        }
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::GameOver(_))
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current ticks per forced descent.
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// `base_speed - speed`
    pub fn level(&self) -> u32 {
        difficulty_level(self.config.base_speed, self.speed)
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_count
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Rows currently showing the clearing sentinel.
    pub fn rows_pending_clear(&self) -> &[usize] {
        &self.pending_rows
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run a full tick: [`advance`](Self::advance) then
    /// [`resolve_clears`](Self::resolve_clears).
    pub fn tick(&mut self, intents: IntentSet) -> TickOutcome {
        let mut outcome = self.advance(intents);
        outcome.points = self.resolve_clears();
        outcome
    }

    /// Timer, input and forced descent for one tick.
    ///
    /// Rows completed by a lock stay marked until
    /// [`resolve_clears`](Self::resolve_clears); if a caller skips that, the
    /// next `advance` resolves them first.
    pub fn advance(&mut self, intents: IntentSet) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.is_over() {
            return outcome;
        }
        if !self.pending_rows.is_empty() {
            self.resolve_clears();
        }
        self.ticks += 1;

        self.speed_counter += 1;
        let force_down = self.speed_counter >= self.speed;

        if intents.contains(Intent::MoveDown) {
            self.try_replace(self.active.moved(0, 1));
        }
        if intents.contains(Intent::MoveRight) {
            self.try_replace(self.active.moved(1, 0));
        }
        if intents.contains(Intent::MoveLeft) {
            self.try_replace(self.active.moved(-1, 0));
        }
        if intents.contains(Intent::Rotate) {
            self.try_replace(self.active.rotated_cw());
        }

        if force_down {
            self.speed_counter = 0;
            outcome.forced_descent = true;
            if !self.try_replace(self.active.moved(0, 1)) {
                self.lock_and_spawn(&mut outcome);
            } else {
                trace!(y = self.active.y, "forced descent");
            }
        }

        if intents.contains(Intent::Quit) && !self.is_over() {
            self.end(EndReason::Quit);
        }
        if let SessionState::GameOver(reason) = self.state {
            outcome.ended = Some(reason);
        }
        outcome
    }

    /// Score and collapse the marked rows. Returns the points awarded.
    ///
    /// Runs even after the session has ended, so rows completed by the final
    /// lock are still counted.
    pub fn resolve_clears(&mut self) -> u32 {
        if self.pending_rows.is_empty() {
            return 0;
        }
        let rows = self.pending_rows.len();
        let points = line_clear_score(rows);
        self.score = self.score.saturating_add(points);
        self.board.collapse_rows(&mut self.pending_rows);
        debug!(rows, points, score = self.score, "rows cleared");
        points
    }

    /// Current state for a renderer.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill `out` with the current state, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.active = ActiveSnapshot::from(self.active);
        out.score = self.score;
        out.level = self.level();
        out.speed = self.speed;
        out.pieces = self.piece_count;
        out.pending_rows.clear();
        out.pending_rows.extend_from_slice(&self.pending_rows);
        out.state = self.state;
    }

    /// Replace the active piece with `candidate` if it fits.
    fn try_replace(&mut self, candidate: Tetromino) -> bool {
        if piece_fits(&self.board, &candidate) {
            self.active = candidate;
            true
        } else {
            false
        }
    }

    fn lock_and_spawn(&mut self, outcome: &mut TickOutcome) {
        self.board.lock(&self.active);
        outcome.locked = true;

        self.piece_count += 1;
        let speed = next_speed(
            self.speed,
            self.piece_count,
            self.config.pieces_per_speedup,
            self.config.speed_floor,
        );
        if speed != self.speed {
            self.speed = speed;
            info!(
                speed,
                level = self.level(),
                pieces = self.piece_count,
                "difficulty increased"
            );
        }

        outcome.rows_marked = self
            .board
            .scan_completed_rows_into(&mut self.pending_rows);

        let kind = self.source.next_kind();
        self.active = Tetromino::spawn(kind, self.board.width());
        outcome.spawned = Some(kind);
        debug!(kind = kind.as_str(), pieces = self.piece_count, "piece spawned");

        if !piece_fits(&self.board, &self.active) {
            self.end(EndReason::Blocked);
        }
    }

    fn end(&mut self, reason: EndReason) {
        self.state = SessionState::GameOver(reason);
        info!(
            ?reason,
            score = self.score,
            pieces = self.piece_count,
            level = self.level(),
            "game over"
        );
    }
}

impl GameSession<SimpleRng> {
    /// Default 12x18 session with a seeded RNG.
    pub fn seeded(seed: u32) -> Self {
        Self::start(SessionConfig::default(), Board::new(), SimpleRng::new(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;
    use crate::types::{Rotation, CELL_CLEARING, CELL_EMPTY};

    fn session_with(kinds: &[PieceKind]) -> GameSession<ScriptedSource> {
        GameSession::new(
            SessionConfig::default(),
            ScriptedSource::new(kinds.iter().copied()),
        )
        .unwrap()
    }

    fn idle() -> IntentSet {
        IntentSet::empty()
    }

    #[test]
    fn test_new_session() {
        let session = session_with(&[PieceKind::T]);
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.speed(), BASE_SPEED);
        assert_eq!(session.level(), 0);
        assert_eq!(session.piece_count(), 0);

        let active = session.active();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!((active.x, active.y), (6, 0));
    }

    #[test]
    fn test_invalid_speed_config_rejected() {
        let config = SessionConfig {
            speed_floor: 0,
            ..SessionConfig::default()
        };
        assert!(GameSession::new(config, ScriptedSource::repeat(PieceKind::O)).is_err());

        let config = SessionConfig {
            base_speed: 5,
            speed_floor: 10,
            ..SessionConfig::default()
        };
        assert!(GameSession::new(config, ScriptedSource::repeat(PieceKind::O)).is_err());
    }

    #[test]
    fn test_forced_descent_every_speed_ticks() {
        let mut session = session_with(&[PieceKind::O]);
        for _ in 0..BASE_SPEED - 1 {
            let outcome = session.tick(idle());
            assert!(!outcome.forced_descent);
        }
        assert_eq!(session.active().y, 0);

        let outcome = session.tick(idle());
        assert!(outcome.forced_descent);
        assert_eq!(session.active().y, 1);
    }

    #[test]
    fn test_intents_apply_in_order() {
        let mut session = session_with(&[PieceKind::T]);
        let all = IntentSet::empty()
            .with(Intent::MoveDown)
            .with(Intent::MoveRight)
            .with(Intent::MoveLeft)
            .with(Intent::Rotate);
        session.tick(all);

        // Right then left cancel out; down and rotate both stick.
        let active = session.active();
        assert_eq!((active.x, active.y), (6, 1));
        assert_eq!(active.rotation, Rotation::East);
    }

    #[test]
    fn test_blocked_move_is_ignored() {
        let mut session = session_with(&[PieceKind::O]);
        // O's right column is local x 2; at x = 8 it touches column 10.
        for _ in 0..10 {
            session.tick(IntentSet::from(Intent::MoveRight));
        }
        assert_eq!(session.active().x, 8);
    }

    #[test]
    fn test_square_locks_at_bottom() {
        let mut session = session_with(&[PieceKind::O, PieceKind::I]);
        let mut locked = false;
        for _ in 0..200 {
            let outcome = session.tick(IntentSet::from(Intent::MoveDown));
            if outcome.locked {
                locked = true;
                assert_eq!(outcome.spawned, Some(PieceKind::I));
                break;
            }
        }
        assert!(locked);

        let board = session.board();
        for (x, y) in [(7, 15), (8, 15), (7, 16), (8, 16)] {
            assert_eq!(board.get(x, y), Some(4), "({}, {})", x, y);
        }
        assert_eq!(board.occupied_count(), 4);
        assert_eq!(session.piece_count(), 1);
        assert_eq!(session.active().kind, PieceKind::I);
    }

    #[test]
    fn test_active_piece_is_not_written_before_lock() {
        let mut session = session_with(&[PieceKind::L]);
        for _ in 0..5 {
            session.tick(IntentSet::from(Intent::MoveDown));
        }
        assert_eq!(session.board().occupied_count(), 0);
    }

    #[test]
    fn test_completing_a_row_scores_and_collapses() {
        let mut board = Board::new();
        // Bottom interior row full except columns 7 and 8, where the square lands.
        for x in 1..11 {
            if x != 7 && x != 8 {
                board.set(x, 16, 1);
            }
        }
        board.set(2, 15, 6);
        let mut session = GameSession::with_board(
            SessionConfig::default(),
            board,
            ScriptedSource::repeat(PieceKind::O),
        )
        .unwrap();

        let mut outcome = TickOutcome::default();
        for _ in 0..200 {
            outcome = session.advance(IntentSet::from(Intent::MoveDown));
            if outcome.locked {
                break;
            }
        }
        assert!(outcome.locked);
        assert_eq!(outcome.rows_marked, 1);
        assert_eq!(session.rows_pending_clear(), &[16]);
        assert_eq!(session.board().get(1, 16), Some(CELL_CLEARING));

        assert_eq!(session.resolve_clears(), 200);
        assert_eq!(session.score(), 200);
        assert!(session.rows_pending_clear().is_empty());

        let board = session.board();
        // Row 15 dropped into row 16: the L cell plus the square's top half.
        assert_eq!(board.get(2, 16), Some(6));
        assert_eq!(board.get(7, 16), Some(4));
        assert_eq!(board.get(8, 16), Some(4));
        assert_eq!(board.get(3, 16), Some(CELL_EMPTY));
        assert!(board.row(0)[1..11].iter().all(|c| *c == CELL_EMPTY));
    }

    #[test]
    fn test_speed_stops_at_floor() {
        let config = SessionConfig {
            base_speed: 20,
            speed_floor: 18,
            pieces_per_speedup: 1,
            ..SessionConfig::default()
        };
        let mut session =
            GameSession::new(config, ScriptedSource::repeat(PieceKind::O)).unwrap();

        let mut speeds = Vec::new();
        while speeds.len() < 4 && !session.is_over() {
            if session.tick(IntentSet::from(Intent::MoveDown)).locked {
                speeds.push(session.speed());
            }
        }
        assert_eq!(speeds, vec![19, 18, 18, 18]);
        assert_eq!(session.level(), 2);
    }

    #[test]
    fn test_blocked_spawn_ends_session() {
        let mut board = Board::new();
        // Square spawns over columns 7-8, rows 1-2.
        board.set(7, 2, 3);
        let session = GameSession::with_board(
            SessionConfig::default(),
            board,
            ScriptedSource::repeat(PieceKind::O),
        )
        .unwrap();
        assert_eq!(session.state(), SessionState::GameOver(EndReason::Blocked));
    }

    #[test]
    fn test_game_over_ignores_further_ticks() {
        let mut board = Board::new();
        board.set(7, 2, 3);
        let mut session = GameSession::with_board(
            SessionConfig::default(),
            board,
            ScriptedSource::repeat(PieceKind::O),
        )
        .unwrap();
        let before = session.active();
        let outcome = session.tick(IntentSet::from(Intent::MoveLeft));
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(session.active(), before);
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn test_quit_finishes_tick_then_ends() {
        let mut session = session_with(&[PieceKind::T]);
        let outcome = session.tick(IntentSet::from(Intent::MoveRight).with(Intent::Quit));
        assert_eq!(outcome.ended, Some(EndReason::Quit));
        assert_eq!(session.state(), SessionState::GameOver(EndReason::Quit));
        assert_eq!(session.active().x, 7);
    }

    #[test]
    fn test_seeded_session_is_deterministic() {
        let mut a = GameSession::seeded(99);
        let mut b = GameSession::seeded(99);
        for _ in 0..500 {
            let oa = a.tick(IntentSet::from(Intent::MoveDown));
            let ob = b.tick(IntentSet::from(Intent::MoveDown));
            assert_eq!(oa, ob);
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.active(), b.active());
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = session_with(&[PieceKind::S]);
        session.tick(IntentSet::from(Intent::MoveLeft));
        let snap = session.snapshot();
        assert_eq!(snap.width, 12);
        assert_eq!(snap.height, 18);
        assert_eq!(snap.cells.as_slice(), session.board().cells());
        assert_eq!(snap.active.kind, PieceKind::S);
        assert_eq!(snap.active.x, 5);
        assert_eq!(snap.state, SessionState::Playing);

        let mut reused = snap.clone();
        session.tick(IntentSet::from(Intent::MoveLeft));
        session.snapshot_into(&mut reused);
        assert_eq!(reused.active.x, 4);
        assert_eq!(reused.cells.len(), 12 * 18);
    }
}
