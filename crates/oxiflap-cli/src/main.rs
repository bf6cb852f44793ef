mod command;
mod config;
mod logging;
mod model;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    logging::init();
    command::run()
}
