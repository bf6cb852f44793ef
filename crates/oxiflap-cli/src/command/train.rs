use std::path::PathBuf;

use anyhow::{Context as _, bail};
use chrono::Utc;
use oxiflap_engine::NoopObserver;
use oxiflap_training::{
    genetic::Population,
    trainer::{Trainer, TrainingSummary},
};
use tracing::info;

use crate::{config::TrainingConfig, model::ControllerModel, ui::TerminalRenderer, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Training configuration file (JSON); defaults are used when omitted
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Output file path for the trained model
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Draw every generation in the terminal at 30 ticks per second
    #[arg(long, default_value_t = false)]
    pub(crate) watch: bool,
    /// Name recorded in the saved model
    #[arg(long, default_value = "oxiflap")]
    pub(crate) name: String,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        config,
        output,
        watch,
        name,
    } = arg;

    let config = match config {
        Some(path) => util::read_training_config_file(path)?,
        None => TrainingConfig::default(),
    };
    config.validate().context("Invalid training config")?;
    info!(?config, "training started");

    let mut rng = rand::rng();
    let shape = config.shape();
    let population =
        Population::random(shape, config.population_size, &mut rng, config.max_weight);
    let mut trainer = Trainer::new(population, config.evolver(), config.generations)
        .context("Invalid training config")?
        .with_fitness_threshold(config.fitness_threshold)
        .with_tick_limit(config.tick_limit)
        .with_course_seed(config.course_seed);

    let result = if *watch {
        let mut renderer = TerminalRenderer::init();
        let result = trainer.run(&mut renderer, &mut rng);
        renderer.finish()?;
        result
    } else {
        trainer.run(&mut NoopObserver, &mut rng)
    };

    let Some(summary) = result.context("Population does not fit its network shape")? else {
        bail!("No generation was evaluated");
    };
    report(&summary);

    let model = ControllerModel::from_summary(name.clone(), Utc::now(), shape, &summary);
    util::Output::save_json(&model, output.clone())?;
    Ok(())
}

fn report(summary: &TrainingSummary) {
    info!(
        stop = %summary.stop,
        generations = summary.generations,
        best_generation = summary.best_generation,
        best_fitness = summary.best.fitness(),
        best_score = summary.best_score,
        "training summary"
    );
}
