//! Provide CFR calculations.
//!
//! Vanilla counterfactual regret minimization with chance sampling: every
//! iteration walks the tree once per player, following all player actions
//! but a single sampled outcome at each chance node.

use super::{
    action::{self, Action, Distribution},
    config::CfrConfig,
    error::{Error, Result},
    game::Game,
    info_set::InformationSetId,
    node::{Node, NodeId},
    player::Player,
    solver,
    strategy::{self, Strategy},
};
use indicatif::{ProgressBar, ProgressIterator};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Regret matching plays uniformly unless the positive regrets sum above this.
pub const POSITIVE_REGRET_FLOOR: f64 = 0.0;

/// Accumulated counterfactual regret per information set and action.
pub type Regret = BTreeMap<InformationSetId, Distribution>;

/// Accumulated reach-weighted strategy per information set and action.
pub type ActionCount = BTreeMap<InformationSetId, Distribution>;

/// Calculate an ε-Nash strategy
/// # Example
/// ```
/// use efg_cfr::*;
/// let game = games::one_card::game(3).unwrap();
/// let config = config::CfrConfig::with_iterations(1000);
/// let strt = cfr::calc_nash_strt(&game, config).unwrap();
/// assert!(solver::calc_exploitability(&game, &game.complete(&strt)).unwrap() >= 0.0);
/// ```
pub fn calc_nash_strt(game: &Game, config: CfrConfig) -> Result<Strategy> {
    Ok(CfrSolver::new(game, config).run()?.strategy)
}

/// Outcome of [`CfrSolver::run`].
#[derive(Clone, Debug)]
pub struct Solution {
    /// Average strategy. Information sets never reached are absent.
    pub strategy: Strategy,
    pub iterations: usize,
    /// Whether the run stopped because the average strategy settled.
    pub converged: bool,
    /// Exploitability of the completed average strategy.
    pub exploitability: f64,
    /// Exploitability of the current strategy at every report interval.
    pub trace: BTreeMap<usize, f64>,
}

#[derive(Default)]
struct Tables {
    regret_sum: Regret,
    action_count: ActionCount,
    next_strt: Strategy,
}

/// Probability of reaching a node due to each player's strategy, chance
/// excluded.
#[derive(Clone, Copy, Debug)]
struct Reach {
    pr1: f64,
    pr2: f64,
}

impl Reach {
    const ROOT: Reach = Reach { pr1: 1.0, pr2: 1.0 };

    fn of(&self, player: Player) -> f64 {
        match player {
            Player::P1 => self.pr1,
            Player::P2 => self.pr2,
            Player::C => 1.0,
        }
    }

    fn scaled(self, player: Player, prob: f64) -> Reach {
        match player {
            Player::P1 => Reach { pr1: self.pr1 * prob, ..self },
            Player::P2 => Reach { pr2: self.pr2 * prob, ..self },
            Player::C => self,
        }
    }
}

pub struct CfrSolver<'g, R> {
    game: &'g Game,
    config: CfrConfig,
    rng: R,
    tables: Tables,
    /// Strategy played during the current iteration. Both traversals read
    /// it unchanged; updates go to `tables.next_strt`.
    strt: Strategy,
    iteration: usize,
}

impl<'g> CfrSolver<'g, StdRng> {
    pub fn new(game: &'g Game, config: CfrConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(game, config, rng)
    }
}

impl<'g, R: Rng> CfrSolver<'g, R> {
    pub fn with_rng(game: &'g Game, config: CfrConfig, rng: R) -> Self {
        CfrSolver {
            game,
            config,
            rng,
            tables: Default::default(),
            strt: Strategy::new(),
            iteration: 0,
        }
    }

    /// Train until the average strategy settles or the iteration budget runs
    /// out. Running out of iterations is not an error.
    pub fn run(mut self) -> Result<Solution> {
        self.config.validate()?;
        let iterations = self.config.iterations;
        let bar = if self.config.show_progress {
            ProgressBar::new(iterations as u64)
        } else {
            ProgressBar::hidden()
        };

        let mut snapshot: Option<Strategy> = None;
        let mut trace: BTreeMap<usize, f64> = BTreeMap::new();

        for t in (1..=iterations).progress_with(bar) {
            self.iterate()?;

            if t % self.config.report_interval == 0 {
                let exploitability =
                    solver::calc_exploitability(self.game, &self.game.complete(&self.strt))?;
                debug!("t: {}, current strategy exploitability: {:.6}", t, exploitability);
                trace.insert(t, exploitability);
            }

            if t % self.config.convergence_interval == 0 {
                let avg_strt = self.average_strategy();
                if let Some(distance) = snapshot
                    .as_ref()
                    .and_then(|snapshot| strategy::distance(&avg_strt, snapshot))
                {
                    debug!("t: {}, distance to snapshot: {:.10}", t, distance);
                    if distance < self.config.convergence_threshold {
                        info!("average strategy settled after {} iterations", t);
                        return self.finish(avg_strt, true, trace);
                    }
                }
                snapshot = Some(avg_strt);
            }
        }

        let avg_strt = self.average_strategy();
        self.finish(avg_strt, false, trace)
    }

    /// One iteration: a traversal for each player against the same frozen
    /// current strategy, then the regret-matched strategy becomes current.
    pub fn iterate(&mut self) -> Result<()> {
        self.iteration += 1;
        for myself in Player::PLAYERS.iter() {
            cfr_dfs(
                self.game,
                &self.strt,
                &mut self.tables,
                &mut self.rng,
                self.game.root(),
                *myself,
                Reach::ROOT,
            )?;
        }
        self.strt = self.tables.next_strt.clone();
        Ok(())
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn current_strategy(&self) -> &Strategy {
        &self.strt
    }

    pub fn regrets(&self) -> &Regret {
        &self.tables.regret_sum
    }

    pub fn action_counts(&self) -> &ActionCount {
        &self.tables.action_count
    }

    pub fn average_strategy(&self) -> Strategy {
        average_strategy(&self.tables.action_count)
    }

    fn finish(
        self,
        strategy: Strategy,
        converged: bool,
        trace: BTreeMap<usize, f64>,
    ) -> Result<Solution> {
        let exploitability =
            solver::calc_exploitability(self.game, &self.game.complete(&strategy))?;
        debug!("exploitability: {}", serde_json::to_string(&trace)?);
        info!(
            "iterations: {}, average strategy exploitability: {:.6}",
            self.iteration, exploitability
        );
        Ok(Solution {
            strategy,
            iterations: self.iteration,
            converged,
            exploitability,
            trace,
        })
    }
}

/// Next strategy from accumulated regrets: proportional to positive regret,
/// uniform when no regret is positive.
pub fn regret_matching(regrets: &Distribution) -> Distribution {
    let norm: f64 = regrets.values().map(|regret| regret.max(0.0)).sum();
    if norm > POSITIVE_REGRET_FLOOR {
        regrets
            .iter()
            .map(|(action, regret)| (*action, regret.max(0.0) / norm))
            .collect()
    } else {
        let len = regrets.len() as f64;
        regrets.keys().map(|action| (*action, 1.0 / len)).collect()
    }
}

/// Normalized action counts of every information set with positive total.
pub fn average_strategy(action_count: &ActionCount) -> Strategy {
    action_count
        .iter()
        .filter_map(|(info_set_id, counts)| {
            strategy::normalized(counts).map(|dist| (info_set_id.clone(), dist))
        })
        .collect()
}

fn accumulate<I>(table: &mut Distribution, contributions: I)
where
    I: IntoIterator<Item = (Action, f64)>,
{
    for (action, amount) in contributions {
        *table.entry(action).or_insert(0.0) += amount;
    }
}

fn cfr_dfs<R: Rng>(
    game: &Game,
    strt: &Strategy,
    tables: &mut Tables,
    rng: &mut R,
    node_id: NodeId,
    myself: Player,
    reach: Reach,
) -> Result<f64> {
    match game.node(node_id) {
        Node::Terminal { value } => Ok(*value * myself.sign()),
        Node::NonTerminal { player: Player::C, edges, .. } => {
            let child_id = game
                .sample_chance_action(node_id, rng)
                .and_then(|action| edges.get(&action))
                .ok_or_else(|| {
                    Error::Configuration(format!("could not sample chance node {}", node_id))
                })?;
            cfr_dfs(game, strt, tables, rng, *child_id, myself, reach)
        }
        Node::NonTerminal { player, edges, .. } => {
            let player = *player;
            let info_set_id = game.info_set_id(node_id).ok_or_else(|| {
                Error::Configuration(format!("decision node {} has no information set", node_id))
            })?;
            let actions: Vec<Action> = edges.keys().cloned().collect();
            let dist: Cow<Distribution> = match strt.get(info_set_id) {
                Some(dist) => Cow::Borrowed(dist),
                None => {
                    tables
                        .next_strt
                        .entry(info_set_id.clone())
                        .or_insert_with(|| action::uniform(&actions));
                    Cow::Owned(action::uniform(&actions))
                }
            };

            let mut action_util: BTreeMap<Action, f64> = BTreeMap::new();
            let mut avg_util = 0.0;
            for (action, child_id) in edges.iter() {
                let prob = dist.get(action).copied().unwrap_or(0.0);
                let child_reach = reach.scaled(player, prob);
                let util = cfr_dfs(game, strt, tables, rng, *child_id, myself, child_reach)?;
                avg_util += prob * util;
                action_util.insert(*action, util);
            }

            if player == myself {
                let pr_except = reach.of(player.opponent());
                let pr_myself = reach.of(player);

                let regrets = tables
                    .regret_sum
                    .entry(info_set_id.clone())
                    .or_insert_with(|| action::zeros(&actions));
                accumulate(
                    regrets,
                    action_util
                        .iter()
                        .map(|(action, util)| (*action, (util - avg_util) * pr_except)),
                );
                let next = regret_matching(regrets);

                let counts = tables
                    .action_count
                    .entry(info_set_id.clone())
                    .or_insert_with(|| action::zeros(&actions));
                accumulate(
                    counts,
                    actions.iter().map(|action| {
                        (*action, pr_myself * dist.get(action).copied().unwrap_or(0.0))
                    }),
                );

                tables.next_strt.insert(info_set_id.clone(), next);
            }
            Ok(avg_util)
        }
    }
}
