use anyhow::anyhow;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use draughts_agents::checkers::ChainPolicy;
use draughts_agents::game::{play_game, run_batch, AgentSpec, MatchSettings};

/// Pits two draughts agents against each other without a GUI
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// white agent: random, minimax:<depth> or mcts:<simulations>
    #[arg(long, default_value = "minimax:3")]
    white: AgentSpec,

    /// black agent: random, minimax:<depth> or mcts:<simulations>
    #[arg(long, default_value = "mcts:500")]
    black: AgentSpec,

    /// number of games; more than one runs them in parallel without per-ply output
    #[arg(long, default_value_t = 1)]
    games: u64,

    /// worker threads for parallel games, defaults to the number of cpus
    #[arg(long)]
    workers: Option<usize>,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// plies after which a game counts as a draw
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// choose the first mover at random for every game
    #[arg(long)]
    random_start: bool,

    /// continue jump chains with the first available capture instead of the longest line
    #[arg(long)]
    first_chain: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    let settings = MatchSettings {
        max_plies: args.max_plies,
        random_start: args.random_start,
        seed: args.seed,
        chain_policy: if args.first_chain {
            ChainPolicy::First
        } else {
            ChainPolicy::Longest
        },
    };

    if args.games <= 1 {
        play_game(args.white, args.black, settings);
        return Ok(());
    }

    let num_workers = args.workers.unwrap_or_else(num_cpus::get);
    info!(white = %args.white, black = %args.black, games = args.games, num_workers, "starting batch");

    let summary = run_batch(args.white, args.black, settings, args.games, num_workers);

    info!("White wins: {}", summary.white_wins);
    info!("Draws:      {}", summary.draws);
    info!("Black wins: {}", summary.black_wins);

    Ok(())
}
