use rand::Rng;
use tracing::debug;

use crate::agent::random_move;
use crate::checkers::{Board, ChainPolicy, Color, Move};

use super::node::{NodeId, Tree};

/// which nodes a simulated win is credited to during backpropagation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Perspective {
    /// every node on the path counts wins of the searching color
    #[default]
    AgentColor,
    /// a node counts wins of the color that moved into it
    NodeMover,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    pub simulations: u32,
    pub exploration: f64,
    /// plies after which a rollout is abandoned as undecided
    pub turn_cap: u32,
    pub chain_policy: ChainPolicy,
    pub perspective: Perspective,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            simulations: 500,
            exploration: 1.4,
            turn_cap: 100,
            chain_policy: ChainPolicy::Longest,
            perspective: Perspective::AgentColor,
        }
    }
}

/*====================================================================================================================*/

/// plays uniformly random moves from `board` with `to_move` starting, returns the winner or None at the turn cap
pub fn rollout<R: Rng>(board: &Board, to_move: Color, turn_cap: u32, rng: &mut R) -> Option<Color> {
    let mut board = board.clone();
    let mut current = to_move;

    for _ in 0..turn_cap {
        if let Some(winner) = board.check_winner() {
            return Some(winner);
        }

        let Some(move_) = random_move(&board, current, rng) else {
            return Some(!current);
        };

        board.move_piece(move_.start, move_.end);
        current = !current;
    }

    None
}

/*====================================================================================================================*/

/// one decision's worth of tree search, the tree is dropped with it
pub struct Search<'a, R: Rng> {
    tree: Tree,
    color: Color,
    config: MctsConfig,

    rng: &'a mut R,
}

impl<'a, R: Rng> Search<'a, R> {
    pub fn new(board: &Board, color: Color, config: MctsConfig, rng: &'a mut R) -> Self {
        let mut root = board.clone();
        root.set_chain_policy(config.chain_policy);

        Search {
            tree: Tree::new(root, color),
            color,
            config,
            rng,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    fn select(&self) -> NodeId {
        let mut node = Tree::ROOT;

        while !self.tree[node].children().is_empty() && self.tree[node].is_fully_expanded() {
            match self.tree.best_child(node, self.config.exploration) {
                Some(child) => node = child,
                None => break,
            }
        }

        node
    }

    fn expand(&mut self, node: NodeId) -> NodeId {
        let untried = self.tree[node].untried_moves().len();

        if untried == 0 {
            return node;
        }

        let index = self.rng.gen_range(0..untried);
        self.tree.expand(node, index).unwrap_or(node)
    }

    fn simulate(&mut self, node: NodeId) -> Option<Color> {
        let node = &self.tree[node];
        rollout(node.board(), node.to_move(), self.config.turn_cap, &mut *self.rng)
    }

    fn backpropagate(&mut self, node: NodeId, winner: Option<Color>) {
        let path: Vec<NodeId> = self.tree.path_to_root(node).collect();

        for id in path {
            let credited = match self.config.perspective {
                Perspective::AgentColor => self.color,
                Perspective::NodeMover => !self.tree[id].to_move(),
            };

            let node = &mut self.tree[id];
            node.visits += 1;
            if winner == Some(credited) {
                node.wins += 1;
            }
        }
    }

    pub fn iterate(&mut self) {
        let selected = self.select();
        let expanded = self.expand(selected);
        let winner = self.simulate(expanded);
        self.backpropagate(expanded, winner);
    }

    pub fn iterate_n_times(&mut self, n: u32) {
        for _ in 0..n {
            self.iterate();
        }
    }

    /// move of the most visited root child, None if the root never got a child
    pub fn best_move(&self) -> Option<Move> {
        let child = self.tree.most_visited_child(Tree::ROOT)?;
        self.tree[child].get_move()
    }

    pub fn run(mut self) -> Option<Move> {
        self.iterate_n_times(self.config.simulations);

        let best_move = self.best_move();

        if let Some(child) = self.tree.most_visited_child(Tree::ROOT) {
            debug!(
                color = %self.color,
                simulations = self.config.simulations,
                tree_size = self.tree.len(),
                root_visits = self.tree.root().visits,
                child_visits = self.tree[child].visits,
                child_win_rate = self.tree[child].win_rate(),
                best_move = ?best_move,
                "mcts search finished"
            );
        }

        best_move
    }
}

/*====================================================================================================================*/
