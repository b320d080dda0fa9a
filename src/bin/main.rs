use argh::FromArgs;
use efg_cfr::*;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;

#[macro_use]
extern crate log;

/// Solve a poker game with CFR and report its exploitability.
#[derive(FromArgs)]
struct Args {
    /// game to solve: one-card or leduc
    #[argh(option, default = "String::from(\"one-card\")")]
    game: String,

    /// number of cards (one-card) or ranks (leduc)
    #[argh(option, default = "3")]
    cards: usize,

    /// CFR configuration as JSON; --iterations and --seed override it
    #[argh(option)]
    config: Option<String>,

    /// maximum number of iterations
    #[argh(option)]
    iterations: Option<usize>,

    /// seed of the chance sampler
    #[argh(option)]
    seed: Option<u64>,

    /// rollouts used to estimate the game value
    #[argh(option, default = "10000")]
    samples: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();
    if let Err(err) = run(args) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let game = match args.game.as_str() {
        "one-card" => games::one_card::game(args.cards)?,
        "leduc" => games::leduc::game(args.cards)?,
        other => return Err(Error::Configuration(format!("unknown game {}", other))),
    };

    let mut config = match &args.config {
        Some(path) => config::CfrConfig::from_file(path)?,
        None => config::CfrConfig {
            show_progress: true,
            ..Default::default()
        },
    };
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let seed = config.seed;

    let start = Instant::now();
    let solution = cfr::CfrSolver::new(&game, config).run()?;
    info!("elapsed time: {:.3} [sec]", start.elapsed().as_secs_f64());
    info!(
        "iterations: {}, converged: {}, exploitability: {:.8}",
        solution.iterations, solution.converged, solution.exploitability
    );

    let strt = game.complete(&solution.strategy);
    info!("exact value for P1: {:.8}", solver::calc_ev(&game, &strt)?);

    let mut rng = StdRng::seed_from_u64(seed);
    let evaluation = evaluator::evaluate(&game, &strt, args.samples, &mut rng)?;
    info!(
        "sampled value for P1 over {} games: {:.8}",
        evaluation.samples.len(),
        evaluation.mean
    );
    Ok(())
}
