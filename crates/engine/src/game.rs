//! Game module - the frame-driven simulation
//!
//! [`Game`] owns everything that changes during play: the board, the active
//! and next pieces, the drop-frame counter and the kind source. One call to
//! [`Game::tick`] advances exactly one frame.
//!
//! Within a tick a piece is *falling* until a collision one row below is
//! found, at which point it is *locked* (committed to the board, rows cleared,
//! next piece promoted). If the promoted piece is already blocked at its spawn
//! position the board is *reset* or the game halts, depending on
//! [`BlockedPolicy`]. Locking and resetting complete inside the tick.

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use blockfall_core::{
    validate_catalog, BlockedPolicy, Board, ConfigError, GameConfig, GameSnapshot, KindSource,
    Piece, SimpleRng,
};
use blockfall_types::{GameEvent, InputFrame};

use crate::collision::collision;

/// Events emitted by one tick. A tick can lock at most twice (gravity and
/// the end-of-tick check), each lock adding at most two events.
pub type TickEvents = ArrayVec<GameEvent, 4>;

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S: KindSource = SimpleRng> {
    board: Board,
    active: Piece,
    next: Piece,
    frame_counter: u32,
    config: GameConfig,
    source: S,
    halted: bool,
}

impl Game<SimpleRng> {
    /// Create a game whose pieces come from a [`SimpleRng`] seeded with `seed`.
    pub fn with_seed(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::new(config, SimpleRng::new(seed))
    }
}

impl<S: KindSource> Game<S> {
    /// Validate configuration and catalog, then draw the first two pieces.
    pub fn new(config: GameConfig, mut source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_catalog()?;

        let active = Piece::spawn_from(&mut source);
        let next = Piece::spawn_from(&mut source);
        debug!(
            "new game: active={:?} next={:?} drop_interval={} on_blocked={}",
            active.kind(),
            next.kind(),
            config.drop_interval,
            config.on_blocked.as_str()
        );

        Ok(Self {
            board: Board::new(),
            active,
            next,
            frame_counter: 0,
            config,
            source,
            halted: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    /// Replace the active piece. The caller is responsible for its placement.
    pub fn set_active(&mut self, piece: Piece) {
        self.active = piece;
    }

    pub fn set_next(&mut self, piece: Piece) {
        self.next = piece;
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// True after a blocked spawn under [`BlockedPolicy::Halt`].
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::new(&self.board, &self.active, &self.next);
        s.halted = self.halted;
        s.frame_counter = self.frame_counter;
        s
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.write_from(&self.board, &self.active, &self.next);
        out.halted = self.halted;
        out.frame_counter = self.frame_counter;
    }

    /// Would the active piece collide if moved by (dx, dy)?
    pub fn collides_at(&self, dx: i8, dy: i8) -> bool {
        collision(
            &self.board,
            &self.active,
            self.active.x + dx,
            self.active.y + dy,
        )
    }

    /// Advance one frame.
    ///
    /// Order within the frame:
    /// 1. count the frame; on reaching the drop interval move down one row,
    ///    or lock if blocked, and restart the count
    /// 2. move right, then move left, each if signaled and free
    /// 3. soft drop one row if signaled and free
    /// 4. rotate forward if signaled, stepping back once on collision
    /// 5. lock if the piece cannot move down
    pub fn tick(&mut self, input: InputFrame) -> TickEvents {
        let mut events = TickEvents::new();
        if self.halted {
            return events;
        }

        self.frame_counter += 1;
        if self.frame_counter >= self.config.drop_interval {
            if !self.collides_at(0, 1) {
                self.active.y += 1;
                trace!("gravity: {:?} to row {}", self.active.kind(), self.active.y);
            } else {
                self.lock_and_clear(&mut events);
            }
            self.frame_counter = 0;
        }
        if self.halted {
            return events;
        }

        // Both directions may apply in the same frame when both keys are held.
        if input.move_right && !self.collides_at(1, 0) {
            self.active.x += 1;
        }
        if input.move_left && !self.collides_at(-1, 0) {
            self.active.x -= 1;
        }

        if input.soft_drop && !self.collides_at(0, 1) {
            self.active.y += 1;
        }

        if input.rotate {
            self.try_rotate();
        }

        if self.collides_at(0, 1) {
            self.lock_and_clear(&mut events);
        }

        events
    }

    /// Rotate forward; on collision step back once to the previous state.
    ///
    /// Returns whether the rotation stuck.
    pub fn try_rotate(&mut self) -> bool {
        self.active.rotate_forward();
        if self.collides_at(0, 0) {
            self.active.rotate_backward();
            return false;
        }
        true
    }

    /// Commit the active piece, promote the next one and clear full rows.
    fn lock_and_clear(&mut self, events: &mut TickEvents) {
        let locked = self.active;
        self.board.lock(&locked);

        let fresh = Piece::spawn_from(&mut self.source);
        self.active = std::mem::replace(&mut self.next, fresh);

        let blocked = self.collides_at(0, 0);
        if blocked {
            match self.config.on_blocked {
                BlockedPolicy::Reset => {
                    info!("spawn blocked by {:?}; clearing board", self.active.kind());
                    self.board.reset();
                }
                BlockedPolicy::Halt => {
                    info!("spawn blocked by {:?}; halting", self.active.kind());
                    self.halted = true;
                }
            }
        }

        let cleared = self.board.clear_full_rows();
        debug!(
            "locked {:?} at ({}, {}) rotation {}; cleared rows {:?}",
            locked.kind(),
            locked.x,
            locked.y,
            locked.rotation(),
            cleared.as_slice()
        );

        events.push(GameEvent::Locked {
            kind: locked.kind(),
            rows_cleared: cleared.len() as u8,
        });
        if blocked {
            events.push(GameEvent::PlacementBlocked);
        }
    }

    /// Clear the board and start over with fresh pieces.
    pub fn restart(&mut self) {
        self.board.reset();
        self.active = Piece::spawn_from(&mut self.source);
        self.next = Piece::spawn_from(&mut self.source);
        self.frame_counter = 0;
        self.halted = false;
        info!("restart: active={:?}", self.active.kind());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::FixedSequence;
    use blockfall_types::{Color, Command, PieceKind};

    fn game_of(kinds: &[PieceKind]) -> Game<FixedSequence> {
        let source = FixedSequence::new(kinds.iter().copied());
        Game::new(GameConfig::default(), source).unwrap()
    }

    fn idle() -> InputFrame {
        InputFrame::default()
    }

    #[test]
    fn test_new_game() {
        let game = game_of(&[PieceKind::T, PieceKind::L]);
        assert_eq!(game.active().kind(), PieceKind::T);
        assert_eq!(game.next().kind(), PieceKind::L);
        assert_eq!((game.active().x, game.active().y), (3, 0));
        assert_eq!(game.frame_counter(), 0);
        assert!(game.board().is_empty());
        assert!(!game.is_halted());
    }

    #[test]
    fn test_zero_drop_interval_rejected() {
        let config = GameConfig::default().with_drop_interval(0);
        let err = Game::new(config, FixedSequence::repeat(PieceKind::O)).unwrap_err();
        assert_eq!(err, ConfigError::ZeroDropInterval);
    }

    #[test]
    fn test_gravity_waits_for_interval() {
        let mut game = game_of(&[PieceKind::O]);
        for _ in 0..59 {
            assert!(game.tick(idle()).is_empty());
        }
        assert_eq!(game.active().y, 0);
        assert_eq!(game.frame_counter(), 59);

        game.tick(idle());
        assert_eq!(game.active().y, 1);
        assert_eq!(game.frame_counter(), 0);
    }

    #[test]
    fn test_both_horizontal_moves_apply() {
        let mut game = game_of(&[PieceKind::O]);
        let input = idle().with(Command::MoveLeft).with(Command::MoveRight);
        game.tick(input);
        // Right then left: net zero.
        assert_eq!(game.active().x, 3);
    }

    #[test]
    fn test_left_wall_blocks_move() {
        let mut game = game_of(&[PieceKind::O]);
        game.set_active(Piece::at(PieceKind::O, 0, 5));
        game.tick(idle().with(Command::MoveLeft));
        assert_eq!(game.active().x, 0);
    }

    #[test]
    fn test_soft_drop_is_independent_of_timer() {
        let mut game = game_of(&[PieceKind::I]);
        game.tick(idle().with(Command::SoftDrop));
        assert_eq!(game.active().y, 1);
        assert_eq!(game.frame_counter(), 1);
    }

    #[test]
    fn test_rotate_advances_state() {
        let mut game = game_of(&[PieceKind::T]);
        game.set_active(Piece::at(PieceKind::T, 4, 5));
        game.tick(idle().with(Command::Rotate));
        assert_eq!(game.active().rotation(), 1);
        assert_eq!((game.active().x, game.active().y), (4, 5));
    }

    #[test]
    fn test_rotate_falls_back_at_right_wall() {
        let mut game = game_of(&[PieceKind::I]);
        let mut piece = Piece::at(PieceKind::I, 9, 5);
        piece.set_rotation(1);
        game.set_active(piece);

        // Horizontal I at column 9 would span columns 9..12.
        assert!(!game.try_rotate());
        assert_eq!(game.active().rotation(), 1);
        assert_eq!(game.active().x, 9);
    }

    #[test]
    fn test_landing_locks_same_tick() {
        let mut game = game_of(&[PieceKind::O, PieceKind::T, PieceKind::S]);
        game.set_active(Piece::at(PieceKind::O, 0, 17));

        let events = game.tick(idle().with(Command::SoftDrop));
        assert_eq!(
            events.as_slice(),
            &[GameEvent::Locked {
                kind: PieceKind::O,
                rows_cleared: 0
            }]
        );
        assert_eq!(game.board().get(0, 19), Some(Color::Yellow));
        assert_eq!(game.active().kind(), PieceKind::T);
        assert_eq!(game.next().kind(), PieceKind::S);
    }

    #[test]
    fn test_halt_policy_keeps_board_and_stops() {
        let config = GameConfig::default().with_on_blocked(BlockedPolicy::Halt);
        let mut game = Game::new(config, FixedSequence::repeat(PieceKind::O)).unwrap();
        // Rows 2..20 full except column 0: no clears, spawn rows 0-1 free.
        for y in 2..20 {
            game.board_mut().fill_row(y, Color::Red, Some(0));
        }
        game.board_mut().set(4, 1, Color::Red);
        game.set_active(Piece::at(PieceKind::O, 7, 0));

        let events = game.tick(idle());
        assert!(events.contains(&GameEvent::PlacementBlocked));
        assert!(game.is_halted());
        assert!(!game.board().is_empty());

        let before = game.board().clone();
        assert!(game.tick(idle().with(Command::MoveLeft)).is_empty());
        assert_eq!(game.board(), &before);

        game.restart();
        assert!(!game.is_halted());
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = game_of(&[PieceKind::J, PieceKind::Z]);
        game.board_mut().set(9, 19, Color::Green);
        let snap = game.snapshot();
        assert_eq!(snap.board[19][9], Color::Green);
        assert_eq!(snap.active.kind, PieceKind::J);
        assert_eq!(snap.next.kind, PieceKind::Z);

        let mut reused = snap.clone();
        game.tick(idle().with(Command::MoveRight));
        game.snapshot_into(&mut reused);
        assert_eq!(reused.active.x, 4);
        assert_eq!(reused.frame_counter, 1);
    }
}
