use std::path::PathBuf;

use oxiflap_engine::{Controller, Generation, NoopObserver, ObstacleGenerator, Session};
use oxiflap_evaluator::scripted::ScriptedController;
use tracing::info;

use crate::{ui::TerminalRenderer, util};

/// Tick limit applied to headless runs when none is given.
const HEADLESS_TICK_LIMIT: u64 = 100_000;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Path to the model file (JSON format); the scripted controller flies when omitted
    pub(crate) model_path: Option<PathBuf>,
    /// Stop after this many ticks
    #[arg(long)]
    pub(crate) tick_limit: Option<u64>,
    /// Run without drawing, as fast as possible
    #[arg(long, default_value_t = false)]
    pub(crate) headless: bool,
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        model_path,
        tick_limit,
        headless,
    } = arg;

    let controller: Box<dyn Controller> = match model_path {
        Some(path) => {
            let model = util::read_controller_model_file(path)?;
            info!(name = %model.name, trained_at = %model.trained_at, "model loaded");
            Box::new(model.into_controller()?)
        }
        None => Box::new(ScriptedController::default()),
    };

    let mut session = Session::new();
    let mut generation = Generation::new(&mut session, [controller], ObstacleGenerator::new());
    let report = if *headless {
        let limit = tick_limit.unwrap_or(HEADLESS_TICK_LIMIT);
        generation.run(&mut session, &mut NoopObserver, Some(limit))
    } else {
        let mut renderer = TerminalRenderer::init();
        let report = generation.run(&mut session, &mut renderer, *tick_limit);
        renderer.finish()?;
        report
    };

    info!(
        outcome = %report.outcome,
        ticks = report.ticks,
        score = report.score,
        fitness = ?report.max_fitness(),
        "flight finished"
    );
    Ok(())
}
