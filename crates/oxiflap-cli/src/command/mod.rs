use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, train::TrainArg};

mod auto_play;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a population of network controllers
    Train(#[clap(flatten)] TrainArg),
    /// Fly a saved model (or the scripted controller) through a course
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::AutoPlay(AutoPlayArg::default())) {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_train() {
        let args = CommandArgs::try_parse_from([
            "oxiflap", "train", "--config", "cfg.json", "--output", "out.json", "--watch",
        ])
        .unwrap();
        let Some(Mode::Train(arg)) = args.mode else {
            panic!("expected train mode");
        };
        assert!(arg.watch);
        assert_eq!(arg.config.as_deref(), Some(Path::new("cfg.json")));
        assert_eq!(arg.output.as_deref(), Some(Path::new("out.json")));
    }

    #[test]
    fn test_parse_auto_play() {
        let args =
            CommandArgs::try_parse_from(["oxiflap", "auto-play", "model.json", "--headless"])
                .unwrap();
        let Some(Mode::AutoPlay(arg)) = args.mode else {
            panic!("expected auto-play mode");
        };
        assert!(arg.headless);
        assert_eq!(arg.model_path.as_deref(), Some(Path::new("model.json")));
        assert_eq!(arg.tick_limit, None);
    }
}
