use crate::checkers::{Board, Color, Move};

pub type NodeId = usize;

/// added to visit counts so unvisited children are maximally attractive instead of dividing by zero
const VISIT_EPSILON: f64 = 1e-6;

/*====================================================================================================================*/

pub struct Node {
    board: Board,
    to_move: Color,

    parent: Option<NodeId>,
    move_: Option<Move>,

    children: Vec<NodeId>,
    untried_moves: Vec<Move>,

    pub visits: u32,
    pub wins: u32,
}

impl Node {
    fn new(board: Board, to_move: Color, parent: Option<NodeId>, move_: Option<Move>) -> Self {
        // decided positions are leaves for good
        let untried_moves = match board.check_winner() {
            Some(_) => Vec::new(),
            None => board.get_all_moves(to_move),
        };

        Node {
            board,
            to_move,
            parent,
            move_,
            children: Vec::new(),
            untried_moves,
            visits: 0,
            wins: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// color to move at this node
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// move that led here from the parent, None for the root
    pub fn get_move(&self) -> Option<Move> {
        self.move_
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn untried_moves(&self) -> &[Move] {
        &self.untried_moves
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / (self.visits as f64 + VISIT_EPSILON)
    }

    pub fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        let visits = self.visits as f64 + VISIT_EPSILON;
        let parent_visits = parent_visits.max(1) as f64;

        self.win_rate() + exploration * (parent_visits.ln() / visits).sqrt()
    }
}

/*====================================================================================================================*/

/// arena of search nodes, parents and children refer to each other by index
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = 0;

    pub fn new(board: Board, to_move: Color) -> Self {
        Tree {
            nodes: vec![Node::new(board, to_move, None, None)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &Node {
        &self[Tree::ROOT]
    }

    /// removes `index` from the untried moves of `parent` and appends the child reached by it
    pub fn expand(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        if index >= self[parent].untried_moves.len() {
            return None;
        }

        let move_ = self[parent].untried_moves.swap_remove(index);

        let mut board = self[parent].board.clone();
        board.move_piece(move_.start, move_.end);

        let to_move = !self[parent].to_move;
        let child = self.nodes.len();

        self.nodes.push(Node::new(board, to_move, Some(parent), Some(move_)));
        self[parent].children.push(child);

        Some(child)
    }

    /// child with the highest UCB1 value, earliest on ties
    pub fn best_child(&self, parent: NodeId, exploration: f64) -> Option<NodeId> {
        let parent_visits = self[parent].visits;
        let mut best: Option<(NodeId, f64)> = None;

        for &child in self[parent].children() {
            let value = self[child].ucb1(parent_visits, exploration);

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((child, value));
            }
        }

        best.map(|(child, _)| child)
    }

    /// child with the most visits, earliest on ties
    pub fn most_visited_child(&self, parent: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;

        for &child in self[parent].children() {
            if best.map_or(true, |best| self[child].visits > self[best].visits) {
                best = Some(child);
            }
        }

        best
    }

    /// `node` followed by all its ancestors up to the root
    pub fn path_to_root(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |&current| self[current].parent)
    }
}

impl std::ops::Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index]
    }
}

impl std::ops::IndexMut<NodeId> for Tree {
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

/*====================================================================================================================*/
