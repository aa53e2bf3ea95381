use std::fmt::Display;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use threadpool::ThreadPool;
use tracing::{debug, info};

use crate::agent::{Agent, RandomAgent};
use crate::checkers::{Board, ChainPolicy, Color, Move};
use crate::mcts::{MctsAgent, MctsConfig};
use crate::minimax::{AlphaBetaConfig, MinimaxAgent};
use crate::util::derive_seed;

/*====================================================================================================================*/

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentSpecError {
    #[error("unknown agent kind '{0}', expected random, minimax:<depth> or mcts:<simulations>")]
    UnknownKind(String),
    #[error("agent '{kind}' needs a parameter, e.g. '{kind}:{example}'")]
    MissingParameter { kind: String, example: u32 },
    #[error("invalid parameter '{value}' for agent '{kind}'")]
    InvalidParameter { kind: String, value: String },
    #[error("mcts needs at least one simulation")]
    ZeroSimulations,
}

/// agent description as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentSpec {
    Random,
    Minimax { depth: u32 },
    Mcts { simulations: u32 },
}

impl AgentSpec {
    /// `chain_policy` must match the policy of the board the agent will be asked about
    pub fn build(&self, color: Color, seed: u64, chain_policy: ChainPolicy) -> Box<dyn Agent + Send> {
        match *self {
            AgentSpec::Random => Box::new(RandomAgent::new(color, seed)),
            AgentSpec::Minimax { depth } => Box::new(MinimaxAgent::new(
                color,
                AlphaBetaConfig {
                    depth,
                    chain_policy,
                    ..AlphaBetaConfig::default()
                },
            )),
            AgentSpec::Mcts { simulations } => Box::new(MctsAgent::new(
                color,
                MctsConfig {
                    simulations,
                    chain_policy,
                    ..MctsConfig::default()
                },
                seed,
            )),
        }
    }
}

impl FromStr for AgentSpec {
    type Err = AgentSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (kind, parameter) = match s.split_once(':') {
            Some((kind, parameter)) => (kind, Some(parameter)),
            None => (s.as_str(), None),
        };

        let parse_parameter = |example: u32| -> Result<u32, AgentSpecError> {
            let value = parameter.ok_or_else(|| AgentSpecError::MissingParameter {
                kind: kind.to_string(),
                example,
            })?;

            value.parse().map_err(|_| AgentSpecError::InvalidParameter {
                kind: kind.to_string(),
                value: value.to_string(),
            })
        };

        match kind {
            "random" => Ok(AgentSpec::Random),
            "minimax" | "alphabeta" => Ok(AgentSpec::Minimax {
                depth: parse_parameter(3)?,
            }),
            "mcts" => match parse_parameter(500)? {
                0 => Err(AgentSpecError::ZeroSimulations),
                simulations => Ok(AgentSpec::Mcts { simulations }),
            },
            _ => Err(AgentSpecError::UnknownKind(kind.to_string())),
        }
    }
}

impl Display for AgentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentSpec::Random => write!(f, "random"),
            AgentSpec::Minimax { depth } => write!(f, "minimax:{}", depth),
            AgentSpec::Mcts { simulations } => write!(f, "mcts:{}", simulations),
        }
    }
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Winner(Color),
    /// ply cap reached
    Draw,
}

impl Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(color) => write!(f, "{} won", color),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MatchSettings {
    pub max_plies: u32,
    /// pick the first mover at random instead of always starting with White
    pub random_start: bool,
    pub seed: u64,
    /// continuation rule of the played board, the agents search under the same rule
    pub chain_policy: ChainPolicy,
}

impl Default for MatchSettings {
    fn default() -> Self {
        MatchSettings {
            max_plies: 200,
            random_start: false,
            seed: 0,
            chain_policy: ChainPolicy::Longest,
        }
    }
}

impl MatchSettings {
    /// the starting position, continuing jump chains with the configured policy
    pub fn starting_board(&self) -> Board {
        let mut board = Board::new();
        board.set_chain_policy(self.chain_policy);
        board
    }
}

/// asks `playing_agent` for a move and applies it to the authoritative board, None if the agent has no move
pub fn single_ply(board: &mut Board, playing_agent: &mut dyn Agent, print: bool) -> Option<Move> {
    let player = playing_agent.color();

    let start_time = std::time::Instant::now();
    let player_move = playing_agent.get_move(board)?;
    let dur = start_time.elapsed();

    let valid_moves = board.get_all_moves(player);

    if !valid_moves.contains(&player_move) {
        panic!("Invalid move {} by {} in position \n{}\n\n", player_move, player, board);
    }

    board.move_piece(player_move.start, player_move.end);

    if print {
        info!(%player, move_ = %player_move, hops = board.last_move().len(), elapsed = ?dur, "\n{}", board);
    } else {
        debug!(%player, move_ = %player_move, elapsed = ?dur, "ply");
    }

    Some(player_move)
}

pub fn game_loop<'a>(
    board: Board,
    white_agent: &'a mut dyn Agent,
    black_agent: &'a mut dyn Agent,
    first_player: Color,
    max_plies: u32,
    print: bool,
) -> (Board, GameResult) {
    let mut board = board;
    let mut current_player = first_player;

    for _ in 0..max_plies {
        let playing_agent = match current_player {
            Color::White => &mut *white_agent,
            Color::Black => &mut *black_agent,
        };

        if single_ply(&mut board, playing_agent, print).is_none() {
            return (board, GameResult::Winner(!current_player));
        }

        if let Some(winner) = board.check_winner() {
            return (board, GameResult::Winner(winner));
        }

        current_player = !current_player;
    }

    (board, GameResult::Draw)
}

fn pick_first_player(settings: &MatchSettings, game_index: u64) -> Color {
    if settings.random_start {
        let mut rng = StdRng::seed_from_u64(derive_seed(settings.seed, game_index));
        if rng.gen::<bool>() {
            Color::White
        } else {
            Color::Black
        }
    } else {
        Color::White
    }
}

/// plays a single game, logging every ply
pub fn play_game(white: AgentSpec, black: AgentSpec, settings: MatchSettings) -> GameResult {
    let mut white_agent = white.build(Color::White, derive_seed(settings.seed, 0), settings.chain_policy);
    let mut black_agent = black.build(Color::Black, derive_seed(settings.seed, 1), settings.chain_policy);

    let first_player = pick_first_player(&settings, 0);
    info!(%white, %black, %first_player, "starting game");

    let (board, result) = game_loop(
        settings.starting_board(),
        white_agent.as_mut(),
        black_agent.as_mut(),
        first_player,
        settings.max_plies,
        true,
    );

    info!(%result, white_pieces = board.count(Color::White), black_pieces = board.count(Color::Black), "\nFinal board:\n{}", board);

    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub white_wins: u64,
    pub black_wins: u64,
    pub draws: u64,
}

impl BatchSummary {
    pub fn total(&self) -> u64 {
        self.white_wins + self.black_wins + self.draws
    }
}

/// plays `num_runs` independent games on a pool of `num_workers` threads
pub fn run_batch(
    white: AgentSpec,
    black: AgentSpec,
    settings: MatchSettings,
    num_runs: u64,
    num_workers: usize,
) -> BatchSummary {
    let white_wins = Arc::new(AtomicU64::new(0));
    let black_wins = Arc::new(AtomicU64::new(0));
    let draws = Arc::new(AtomicU64::new(0));

    let pool = ThreadPool::new(num_workers.max(1));

    for game_index in 0..num_runs {
        let white_wins = Arc::clone(&white_wins);
        let black_wins = Arc::clone(&black_wins);
        let draws = Arc::clone(&draws);

        pool.execute(move || {
            // each game owns its board and agents, nothing mutable is shared
            let mut white_agent =
                white.build(Color::White, derive_seed(settings.seed, 2 * game_index), settings.chain_policy);
            let mut black_agent =
                black.build(Color::Black, derive_seed(settings.seed, 2 * game_index + 1), settings.chain_policy);

            let (_, result) = game_loop(
                settings.starting_board(),
                white_agent.as_mut(),
                black_agent.as_mut(),
                pick_first_player(&settings, game_index),
                settings.max_plies,
                false,
            );

            info!(game = game_index, %result, "game finished");

            match result {
                GameResult::Winner(Color::White) => white_wins.fetch_add(1, Ordering::Release),
                GameResult::Winner(Color::Black) => black_wins.fetch_add(1, Ordering::Release),
                GameResult::Draw => draws.fetch_add(1, Ordering::Release),
            };
        });
    }

    pool.join();

    BatchSummary {
        white_wins: white_wins.load(Ordering::Acquire),
        black_wins: black_wins.load(Ordering::Acquire),
        draws: draws.load(Ordering::Acquire),
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use super::{game_loop, run_batch, single_ply, AgentSpec, AgentSpecError, GameResult, MatchSettings};
    use crate::agent::RandomAgent;
    use crate::checkers::{Board, Cell, ChainPolicy, Color, Move};
    use crate::minimax::{AlphaBetaConfig, MinimaxAgent};

    #[test]
    fn test_parse_agent_spec() {
        assert_eq!("random".parse::<AgentSpec>(), Ok(AgentSpec::Random));
        assert_eq!("minimax:4".parse::<AgentSpec>(), Ok(AgentSpec::Minimax { depth: 4 }));
        assert_eq!("AlphaBeta:0".parse::<AgentSpec>(), Ok(AgentSpec::Minimax { depth: 0 }));
        assert_eq!("mcts:800".parse::<AgentSpec>(), Ok(AgentSpec::Mcts { simulations: 800 }));

        assert_eq!("mcts:0".parse::<AgentSpec>(), Err(AgentSpecError::ZeroSimulations));
        assert_eq!(
            "minimax".parse::<AgentSpec>(),
            Err(AgentSpecError::MissingParameter {
                kind: "minimax".to_string(),
                example: 3
            })
        );
        assert_eq!(
            "mcts:lots".parse::<AgentSpec>(),
            Err(AgentSpecError::InvalidParameter {
                kind: "mcts".to_string(),
                value: "lots".to_string()
            })
        );
        assert_eq!(
            "human".parse::<AgentSpec>(),
            Err(AgentSpecError::UnknownKind("human".to_string()))
        );

        for spec in [AgentSpec::Random, AgentSpec::Minimax { depth: 2 }, AgentSpec::Mcts { simulations: 10 }] {
            assert_eq!(spec.to_string().parse::<AgentSpec>(), Ok(spec));
        }
    }

    #[test]
    fn test_single_ply_applies_move() {
        let mut board = Board::new();
        let mut agent = RandomAgent::new(Color::White, 3);

        let move_ = single_ply(&mut board, &mut agent, false).unwrap();

        assert_eq!(board.last_move().first(), Some(&move_));
        assert!(board.cell(move_.start).is_empty());
        assert_eq!(board.cell(move_.end), Cell::Man(Color::White));
    }

    fn chain_position(chain_policy: ChainPolicy) -> Board {
        // the white man can stop after two hops or take three
        let mut board = Board::empty();
        board.set_cell((6, 2), Cell::Man(Color::White));
        board.set_cell((5, 2), Cell::Man(Color::Black));
        board.set_cell((4, 1), Cell::Man(Color::Black));
        board.set_cell((4, 3), Cell::Man(Color::Black));
        board.set_cell((3, 4), Cell::Man(Color::Black));
        board.set_cell((0, 7), Cell::Man(Color::Black));
        board.set_chain_policy(chain_policy);
        board
    }

    #[test]
    fn test_planned_chain_is_played() {
        for chain_policy in [ChainPolicy::First, ChainPolicy::Longest] {
            let mut board = chain_position(chain_policy);
            let mut agent = MinimaxAgent::new(
                Color::White,
                AlphaBetaConfig {
                    depth: 1,
                    chain_policy,
                    ..AlphaBetaConfig::default()
                },
            );

            let move_ = single_ply(&mut board, &mut agent, false).unwrap();

            assert_eq!(move_, Move::new((6, 2), (4, 2)));
            assert_eq!(agent.planned_chain(), board.last_move());
        }
    }

    #[test]
    fn test_match_board_follows_settings() {
        let settings = MatchSettings::default();
        let mut board = settings.starting_board();
        assert_eq!(board.chain_policy(), settings.chain_policy);

        let mut played = chain_position(settings.chain_policy);
        let mut agent = AgentSpec::Minimax { depth: 1 }.build(Color::White, 0, settings.chain_policy);
        single_ply(&mut played, agent.as_mut(), false).unwrap();
        assert_eq!(played.last_move().len(), 3);
        assert_eq!(played.last_move().last().unwrap().end, (2, 4));

        single_ply(&mut board, agent.as_mut(), false).unwrap();
        assert_eq!(board.count(Color::Black), 16);
    }

    #[test]
    fn test_stuck_player_loses() {
        let mut board = Board::empty();
        board.set_cell((6, 0), Cell::Man(Color::Black));
        board.set_cell((7, 0), Cell::Man(Color::White));
        board.set_cell((6, 1), Cell::Man(Color::White));
        board.set_cell((6, 2), Cell::Man(Color::White));
        board.set_cell((5, 0), Cell::Man(Color::White));

        let mut white = RandomAgent::new(Color::White, 0);
        let mut black = RandomAgent::new(Color::Black, 0);

        let (_, result) = game_loop(board, &mut white, &mut black, Color::Black, 10, false);
        assert_eq!(result, GameResult::Winner(Color::White));
    }

    #[test]
    fn test_capture_ends_game() {
        let mut board = Board::empty();
        board.set_cell((4, 4), Cell::Man(Color::White));
        board.set_cell((3, 4), Cell::Man(Color::Black));

        let mut white = MinimaxAgent::with_depth(Color::White, 2);
        let mut black = RandomAgent::new(Color::Black, 0);

        let (board, result) = game_loop(board, &mut white, &mut black, Color::White, 10, false);
        assert_eq!(result, GameResult::Winner(Color::White));
        assert_eq!(board.count(Color::Black), 0);
    }

    #[test]
    fn test_ply_cap_is_a_draw() {
        let mut white = RandomAgent::new(Color::White, 1);
        let mut black = RandomAgent::new(Color::Black, 2);

        let (_, result) = game_loop(Board::new(), &mut white, &mut black, Color::White, 2, false);
        assert_eq!(result, GameResult::Draw);
    }

    #[test]
    fn test_agents_keep_their_color() {
        let white = AgentSpec::Mcts { simulations: 5 }.build(Color::White, 0, ChainPolicy::Longest);
        let black = AgentSpec::Minimax { depth: 1 }.build(Color::Black, 0, ChainPolicy::First);

        assert_eq!(white.color(), Color::White);
        assert_eq!(black.color(), Color::Black);
    }

    #[test]
    fn test_run_batch() {
        let settings = MatchSettings {
            max_plies: 60,
            random_start: true,
            seed: 17,
            chain_policy: ChainPolicy::Longest,
        };

        let summary = run_batch(AgentSpec::Random, AgentSpec::Minimax { depth: 1 }, settings, 6, 3);
        assert_eq!(summary.total(), 6);
    }
}
