//! 国际象棋规则核心
//!
//! 包含:
//! - 棋子、棋盘、局面等核心数据结构
//! - 走法生成、攻击检测和合法性过滤
//! - 走法执行（易位、吃过路兵、升变、步数）
//! - 对局状态（待升变状态机、吃子记录、终局判定）
//! - FEN 与坐标记谱
//! - 棋谱记录

mod attacks;
mod board;
mod constants;
mod error;
mod executor;
mod fen;
mod game;
mod moves;
mod notation;
mod perft;
mod piece;
mod record;

pub use attacks::Attacks;
pub use board::{Board, BoardState, CastlingRights, WingRights};
pub use constants::*;
pub use error::{ChessError, Result};
pub use executor::{Applied, MoveExecutor};
pub use fen::{Fen, INITIAL_FEN};
pub use game::{CapturedMaterial, Game, GamePhase, MoveRecord, MoveStatus, Outcome};
pub use moves::{Move, MoveGenerator, MoveKind};
pub use notation::{CoordinateMove, Notation};
pub use perft::{perft, perft_divide};
pub use piece::{Piece, PieceType, Side, Square};
pub use record::{GameMetadata, GameRecord, RECORD_VERSION};
