use super::{
    action::{self, Action, Distribution},
    error::{Error, Result},
    info_set::{self, InformationSetId},
    node::{Node, NodeId, NodeValue},
    player::Player,
    strategy::Strategy,
    transition::{self, Transition},
};
use rand::Rng;
use std::collections::BTreeMap;

/// An immutable extensive-form game tree.
///
/// Nodes live in an arena and refer to their children by [`NodeId`]. The
/// information set of every decision node is computed once, in
/// [`GameBuilder::build`].
#[derive(Debug)]
pub struct Game {
    nodes: Vec<Node>,
    root: NodeId,
    transition: Transition,

    // for utils
    info_set_id_by_node: BTreeMap<NodeId, InformationSetId>,
    actions_by_info_set: BTreeMap<InformationSetId, Vec<Action>>,
}

impl Game {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Panics if `node_id` is not a node of this game.
    pub fn node(&self, node_id: NodeId) -> &Node {
        &self.nodes[node_id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// Acting player, `Player::C` for chance, `None` for terminal nodes.
    pub fn player(&self, node_id: NodeId) -> Option<Player> {
        self.node(node_id).player()
    }

    pub fn is_terminal(&self, node_id: NodeId) -> bool {
        self.node(node_id).is_terminal()
    }

    /// Actions available at `node_id`, in ascending order. Empty for terminals.
    pub fn actions(&self, node_id: NodeId) -> Vec<Action> {
        self.node(node_id).actions()
    }

    pub fn child(&self, node_id: NodeId, action: Action) -> Option<NodeId> {
        self.node(node_id)
            .edges()
            .and_then(|edges| edges.get(&action))
            .cloned()
    }

    pub fn chance_probs(&self, node_id: NodeId) -> Option<&Distribution> {
        self.transition.get(&node_id)
    }

    /// Draw an outcome of the chance node `node_id`; `None` if it is not one.
    pub fn sample_chance_action<R: Rng>(&self, node_id: NodeId, rng: &mut R) -> Option<Action> {
        self.chance_probs(node_id)
            .and_then(|dist| action::sample(dist, rng))
    }

    pub fn utility(&self, node_id: NodeId, player: Player) -> Option<f64> {
        self.node(node_id).utility(player)
    }

    pub fn info_set_id(&self, node_id: NodeId) -> Option<&InformationSetId> {
        self.info_set_id_by_node.get(&node_id)
    }

    /// Every information set of both players with its actions.
    pub fn info_sets(&self) -> impl Iterator<Item = (&InformationSetId, &Vec<Action>)> {
        self.actions_by_info_set.iter()
    }

    pub fn actions_at(&self, info_set_id: &InformationSetId) -> Option<&[Action]> {
        self.actions_by_info_set
            .get(info_set_id)
            .map(|actions| actions.as_slice())
    }

    /// Identifier of every node from `player`'s point of view.
    pub fn build_information_set_map(&self, player: Player) -> BTreeMap<NodeId, InformationSetId> {
        info_set::build_information_set_map(&self.nodes, self.root, player)
    }

    /// Fill every information set missing from `strt` with the uniform
    /// distribution over its actions.
    pub fn complete(&self, strt: &Strategy) -> Strategy {
        let mut completed = strt.clone();
        let mut missing = 0;
        for (info_set_id, actions) in self.actions_by_info_set.iter() {
            if !completed.contains_key(info_set_id) {
                completed.insert(info_set_id.clone(), action::uniform(actions));
                missing += 1;
            }
        }
        if missing > 0 {
            debug!("completed strategy at {} information sets", missing);
        }
        completed
    }

    fn build(&mut self) -> Result<()> {
        self.check_tree()?;
        self.check_transition()?;
        self.info_set_id_by_node = info_set::build_info_set_ids(&self.nodes, self.root);
        self.build_actions_by_info_set()
    }

    fn check_tree(&self) -> Result<()> {
        trace!("start: check_tree");
        if self.root.index() >= self.nodes.len() {
            return Err(Error::Configuration(format!("root {} does not exist", self.root)));
        }
        let mut parents = vec![0usize; self.nodes.len()];
        for (node_id, node) in self.nodes() {
            if let Node::NonTerminal { edges, .. } = node {
                if edges.is_empty() {
                    return Err(Error::Configuration(format!(
                        "non-terminal node {} has no actions",
                        node_id
                    )));
                }
                for child_id in edges.values() {
                    let count = parents.get_mut(child_id.index()).ok_or_else(|| {
                        Error::Configuration(format!(
                            "node {} points to missing child {}",
                            node_id, child_id
                        ))
                    })?;
                    *count += 1;
                }
            }
        }
        if parents[self.root.index()] > 0 {
            return Err(Error::Configuration(format!("root {} has a parent", self.root)));
        }
        for (i, count) in parents.iter().enumerate() {
            if *count > 1 {
                return Err(Error::Configuration(format!(
                    "node {} has {} parents",
                    NodeId::new(i),
                    count
                )));
            }
            if *count == 0 && i != self.root.index() {
                return Err(Error::Configuration(format!(
                    "node {} is unreachable from the root",
                    NodeId::new(i)
                )));
            }
        }
        trace!("finish: check_tree");
        Ok(())
    }

    fn check_transition(&self) -> Result<()> {
        for (node_id, node) in self.nodes() {
            match (node, self.transition.get(&node_id)) {
                (Node::NonTerminal { player: Player::C, edges, .. }, Some(dist)) => {
                    transition::validate(node_id, dist, edges)?;
                }
                (Node::NonTerminal { player: Player::C, .. }, None) => {
                    return Err(Error::Configuration(format!(
                        "chance node {} has no probabilities",
                        node_id
                    )));
                }
                (_, Some(_)) => {
                    return Err(Error::Configuration(format!(
                        "node {} is not a chance node but has chance probabilities",
                        node_id
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn build_actions_by_info_set(&mut self) -> Result<()> {
        trace!("start: build_actions_by_info_set");
        for (node_id, info_set_id) in self.info_set_id_by_node.iter() {
            let actions = self.nodes[node_id.index()].actions();
            match self.actions_by_info_set.get(info_set_id) {
                Some(known) if *known != actions => {
                    return Err(Error::Configuration(format!(
                        "node {} offers {:?} but information set {} offers {:?}",
                        node_id, actions, info_set_id, known
                    )));
                }
                Some(_) => {}
                None => {
                    self.actions_by_info_set.insert(info_set_id.clone(), actions);
                }
            }
        }
        trace!("finish: build_actions_by_info_set");
        Ok(())
    }
}

/// Bottom-up construction of a [`Game`]: children are added before the
/// node that points to them.
#[derive(Default)]
pub struct GameBuilder {
    nodes: Vec<Node>,
    transition: Transition,
}

impl GameBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn terminal(&mut self, value: NodeValue) -> Result<NodeId> {
        if !value.is_finite() {
            return Err(Error::Configuration(format!("terminal value {} is not finite", value)));
        }
        Ok(self.push(Node::Terminal { value }))
    }

    pub fn decision<I>(
        &mut self,
        player: Player,
        hidden_from: &[Player],
        children: I,
    ) -> Result<NodeId>
    where
        I: IntoIterator<Item = (Action, NodeId)>,
    {
        if player == Player::C {
            return Err(Error::Configuration(
                "chance nodes must be added with GameBuilder::chance".to_string(),
            ));
        }
        let edges = self.edges(children)?;
        Ok(self.push(Node::NonTerminal {
            player,
            edges,
            hidden_from: hidden_from.to_vec(),
        }))
    }

    pub fn chance<I>(&mut self, hidden_from: &[Player], outcomes: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = (Action, f64, NodeId)>,
    {
        let mut dist = Distribution::new();
        let edges = self.edges(outcomes.into_iter().map(|(action, prob, child_id)| {
            dist.insert(action, prob);
            (action, child_id)
        }))?;
        let node_id = self.push(Node::NonTerminal {
            player: Player::C,
            edges,
            hidden_from: hidden_from.to_vec(),
        });
        self.transition.insert(node_id, dist);
        Ok(node_id)
    }

    /// Validate the tree rooted at `root` and index its information sets.
    pub fn build(self, root: NodeId) -> Result<Game> {
        let mut game = Game {
            nodes: self.nodes,
            root,
            transition: self.transition,
            info_set_id_by_node: BTreeMap::new(),
            actions_by_info_set: BTreeMap::new(),
        };
        game.build()?;
        debug!(
            "built game with {} nodes and {} information sets",
            game.nodes.len(),
            game.actions_by_info_set.len()
        );
        Ok(game)
    }

    fn edges<I>(&self, children: I) -> Result<BTreeMap<Action, NodeId>>
    where
        I: IntoIterator<Item = (Action, NodeId)>,
    {
        let mut edges = BTreeMap::new();
        for (action, child_id) in children {
            if child_id.index() >= self.nodes.len() {
                return Err(Error::Configuration(format!(
                    "child {} has not been added yet",
                    child_id
                )));
            }
            if edges.insert(action, child_id).is_some() {
                return Err(Error::Configuration(format!("action {} appears twice", action)));
            }
        }
        Ok(edges)
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }
}
