/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::Result;
use log::{debug, info};

use crate::{
    is_attacked, reaches, Board, Color, Evaluator, Hypothetical, Move, Occupancy, Piece, PieceId,
    PieceKind, Player, Rank, Square, Violation,
};

/// How a game is decided.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MateRule {
    /// The game ends when a King is captured. Moves that expose the King are still refused.
    #[default]
    KingCapture,

    /// The game also ends when the side to move has no legal moves: checkmate if it is in check, stalemate otherwise.
    Checkmate,
}

/// Settings that stay fixed for the whole game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GameConfig {
    pub mate_rule: MateRule,
}

/// How a finished game ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Outcome {
    KingCaptured { winner: Color },
    Checkmate { winner: Color },
    Stalemate,
}

impl Outcome {
    /// The winning side, if the game was not drawn.
    #[inline(always)]
    pub const fn winner(&self) -> Option<Color> {
        match self {
            Self::KingCaptured { winner } | Self::Checkmate { winner } => Some(*winner),
            Self::Stalemate => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KingCaptured { winner } => write!(f, "{winner} captured the king and wins"),
            Self::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Self::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Why [`Game::play`] refused a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum PlayError {
    #[error(transparent)]
    Illegal(#[from] Violation),

    #[error("The game is over")]
    GameOver,
}

/// What happened when a move was played.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Report {
    /// The piece taken by this move, if any.
    pub captured: Option<Piece>,
    pub castled: bool,
    pub en_passant: bool,
    /// The kind a Pawn promoted to.
    pub promotion: Option<PieceKind>,
    /// Whether the opponent is now in check.
    pub check: bool,
    pub outcome: Option<Outcome>,
}

/// A Pawn that just advanced two squares and may be taken en passant on the very next move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct EnPassant {
    /// The square the Pawn skipped over, where the capturing Pawn lands.
    target: Square,
    victim: PieceId,
}

/// A game of chess in progress: the board, both players, and whose turn it is.
///
/// All changes to the game go through [`Game::play`], which refuses illegal moves without touching anything.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: [Player; Color::COUNT],
    side_to_move: Color,
    en_passant: Option<EnPassant>,
    outcome: Option<Outcome>,
    config: GameConfig,
}

impl Game {
    /// Starts a new game from the standard position.
    pub fn new(config: GameConfig) -> Self {
        let board = Board::standard();
        let players = Color::all().map(|color| Player::standard(&board, color));

        Self {
            board,
            players,
            side_to_move: Color::White,
            en_passant: None,
            outcome: None,
            config,
        }
    }

    /// Starts a game from a custom `board`, with White to move.
    ///
    /// Fails unless each side has exactly one King.
    pub fn with_board(board: Board, config: GameConfig) -> Result<Self> {
        let players = [
            Player::from_board(&board, Color::White)?,
            Player::from_board(&board, Color::Black)?,
        ];

        let mut game = Self {
            board,
            players,
            side_to_move: Color::White,
            en_passant: None,
            outcome: None,
            config,
        };
        game.refresh_check_flags();

        Ok(game)
    }

    /// Hands the move to `color`.
    pub fn with_side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[inline(always)]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The square a Pawn may currently capture en passant onto, if any.
    #[inline(always)]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant.map(|ep| ep.target)
    }

    /// Checks whether `mv` is legal for the side to move, returning the rule it breaks if not.
    ///
    /// En passant captures are not routed through the [`Evaluator`]; see [`Game::en_passant_capture`].
    pub fn evaluate(&self, mv: &Move) -> Option<Violation> {
        let color = self.side_to_move;
        Evaluator::new(
            &self.board,
            self.player(color),
            self.player(color.opponent()),
            mv,
        )
        .evaluate()
    }

    /// If `mv` takes a Pawn en passant, returns the Pawn that would be taken.
    ///
    /// That is the case when a Pawn of the side to move lands diagonally on the square an enemy Pawn just skipped over.
    pub fn en_passant_capture(&self, mv: &Move) -> Option<PieceId> {
        let ep = self.en_passant?;
        let piece = self.board.piece_at(mv.from())?;

        let takes = piece.is_pawn()
            && piece.color() == self.side_to_move
            && mv.to() == ep.target
            && reaches(&piece.attack_rays(), ep.target);

        takes.then_some(ep.victim)
    }

    /// Returns `true` if `mv` moves a Pawn of the side to move onto its last rank.
    pub fn is_promotion(&self, mv: &Move) -> bool {
        self.board.piece_at(mv.from()).is_some_and(|piece| {
            piece.is_pawn()
                && piece.color() == self.side_to_move
                && mv.to().rank() == Rank::eighth(piece.color())
        })
    }

    /// Plays `mv` for the side to move.
    ///
    /// Illegal moves are refused with the [`Violation`] they commit, and leave the game untouched.
    /// A Pawn reaching its last rank becomes the kind requested by `mv`, or a Queen if none was given.
    /// The turn passes to the opponent after every executed move, including the one that ends the game.
    ///
    /// An en passant capture skips the [`Evaluator`] entirely, so it is executed even if it
    /// exposes the mover's King. [`Game::legal_moves`] does check King safety and never lists such a capture.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Game, Move, Square, Violation, PlayError};
    /// let mut game = Game::default();
    /// game.play(Move::new(Square::E2, Square::E4)).unwrap();
    ///
    /// let err = game.play(Move::new(Square::E4, Square::E5)).unwrap_err();
    /// assert_eq!(err, PlayError::Illegal(Violation::WrongColor(arbiter::Color::Black)));
    /// ```
    pub fn play(&mut self, mv: Move) -> Result<Report, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }

        let mover = self.side_to_move;
        let opponent = mover.opponent();
        let mut report = Report::default();

        let id = if let Some(victim) = self.en_passant_capture(&mv) {
            let id = self.moving_piece(&mv)?;
            let square = self.board.piece(victim).current();
            report.captured = self.take(square, opponent);
            report.en_passant = true;
            self.board.relocate(id, mv.to());
            id
        } else {
            let evaluator =
                Evaluator::new(&self.board, self.player(mover), self.player(opponent), &mv);
            if let Some(violation) = evaluator.evaluate() {
                return Err(violation.into());
            }
            let castler = evaluator.castler().cloned();
            let id = self.moving_piece(&mv)?;

            if let Some(castler) = castler {
                self.board.relocate(castler.king(), castler.king_landing());
                self.board
                    .relocate(castler.rook(), castler.rook_destination());
                report.castled = true;
            } else {
                report.captured = self.take(mv.to(), opponent);
                self.board.relocate(id, mv.to());
            }
            id
        };

        debug!("{mover} played {mv}");
        self.en_passant = None;

        if self.player(opponent).has_lost_king() {
            self.side_to_move = opponent;
            return Ok(self.finish(report, Outcome::KingCaptured { winner: mover }));
        }

        let piece = *self.board.piece(id);
        if piece.gives_en_passant(mv.from()) {
            if let Some(target) = mv.from().forward_by(mover, 1) {
                self.en_passant = Some(EnPassant { target, victim: id });
            }
        } else if piece.reaches_last_rank() {
            let kind = mv
                .promotion()
                .filter(PieceKind::is_promotion_target)
                .unwrap_or(PieceKind::Queen);
            self.board.promote(id, kind);
            info!("{mover} pawn on {} promoted to {kind}", mv.to());
            report.promotion = Some(kind);
        }

        self.refresh_check_flags();
        if self.player(opponent).is_in_check() {
            info!("*** {opponent} is in check ***");
            report.check = true;
        }

        self.side_to_move = opponent;

        if self.config.mate_rule == MateRule::Checkmate && self.legal_moves().is_empty() {
            let outcome = if report.check {
                Outcome::Checkmate { winner: mover }
            } else {
                Outcome::Stalemate
            };
            return Ok(self.finish(report, outcome));
        }

        Ok(report)
    }

    /// Every legal move for the side to move, including castling, en passant and each promotion choice.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Game;
    /// assert_eq!(Game::default().legal_moves().len(), 20);
    /// ```
    pub fn legal_moves(&self) -> Vec<Move> {
        self.player(self.side_to_move)
            .pieces()
            .iter()
            .flat_map(|&id| self.legal_moves_of(id))
            .collect()
    }

    /// Every legal move of the piece on `square`, which is empty unless that piece belongs to the side to move.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        match self.board.occupant(square) {
            Some(id) if self.board.piece(id).color() == self.side_to_move => {
                self.legal_moves_of(id)
            }
            _ => Vec::new(),
        }
    }

    fn legal_moves_of(&self, id: PieceId) -> Vec<Move> {
        let piece = self.board.piece(id);
        let from = piece.current();

        let mut targets = piece.rays().into_iter().flatten().collect::<Vec<_>>();
        if piece.is_king() {
            targets.extend([-2, 2].into_iter().filter_map(|df| from.offset(df, 0)));
        }

        let mut moves = Vec::with_capacity(targets.len());
        for to in targets {
            let mv = Move::new(from, to);

            if self.en_passant_capture(&mv).is_some() {
                if self.is_safe_en_passant(&mv) {
                    moves.push(mv);
                }
                continue;
            }

            if self.evaluate(&mv).is_some() {
                continue;
            }

            if self.is_promotion(&mv) {
                moves.extend(PieceKind::PROMOTIONS.map(|kind| mv.with_promotion(kind)));
            } else {
                moves.push(mv);
            }
        }

        moves
    }

    /// En passant skips the [`Evaluator`], so enumeration checks King safety itself.
    fn is_safe_en_passant(&self, mv: &Move) -> bool {
        let mut scratch = self.clone();
        let color = self.side_to_move;
        if scratch.play(*mv).is_err() {
            return false;
        }

        let view = Hypothetical::new(&scratch.board);
        let king = scratch.player(color).king_square(&scratch.board);
        !is_attacked(&view, scratch.player(color.opponent()), king)
    }

    fn moving_piece(&self, mv: &Move) -> Result<PieceId, PlayError> {
        self.board
            .occupant(mv.from())
            .ok_or(PlayError::Illegal(Violation::NoPiece))
    }

    /// Removes whatever stands on `square` from the board and sends it to `owner`'s graveyard.
    fn take(&mut self, square: Square, owner: Color) -> Option<Piece> {
        let victim = self.board.capture(square)?;
        self.players[owner.index()].piece_taken(victim);

        let piece = *self.board.piece(victim);
        debug!("{piece} was captured");
        Some(piece)
    }

    fn refresh_check_flags(&mut self) {
        for color in Color::all() {
            let view = Hypothetical::new(&self.board);
            let king = self.player(color).king_square(&self.board);
            let attacked = is_attacked(&view, self.player(color.opponent()), king);
            self.players[color.index()].set_in_check(attacked);
        }
    }

    fn finish(&mut self, mut report: Report, outcome: Outcome) -> Report {
        info!("*** Game over: {outcome} ***");
        self.outcome = Some(outcome);
        report.outcome = Some(outcome);
        report
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        match self.outcome {
            Some(outcome) => write!(f, "Game over: {outcome}"),
            None => write!(f, "{} to move", self.side_to_move),
        }
    }
}
