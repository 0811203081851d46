use std::{
    cell::RefCell,
    fs::File,
    path::{Path, PathBuf},
    rc::Rc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};
use ratatui_runtime::{Runtime, ScreenStack};
use tetrust_engine::{ColorPolicy, GameConfig, GameModel, ScoreManager};

use crate::view::screens::{MainMenuScreen, SharedGame};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct CommandArgs {
    /// High score file, created if missing
    #[clap(long, default_value = "scores.txt")]
    scores_file: PathBuf,
    /// How new pieces are colored
    #[clap(long, value_enum, default_value_t = ColorPolicyArg::Fixed)]
    color_policy: ColorPolicyArg,
    /// Milliseconds between two gravity steps
    #[clap(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    gravity_ms: u64,
    /// Log file; the terminal is taken by the game
    #[clap(long, default_value = "tetrust.log")]
    log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorPolicyArg {
    /// One theme color per piece kind
    Fixed,
    /// A random color for every piece
    Random,
}

impl From<ColorPolicyArg> for ColorPolicy {
    fn from(arg: ColorPolicyArg) -> Self {
        match arg {
            ColorPolicyArg::Fixed => ColorPolicy::FixedByType,
            ColorPolicyArg::Random => ColorPolicy::Random,
        }
    }
}

fn init_logger(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let CommandArgs {
        scores_file,
        color_policy,
        gravity_ms,
        log_file,
    } = args;

    init_logger(&log_file)?;

    let mut scores = ScoreManager::new(&scores_file);
    scores
        .load()
        .with_context(|| format!("failed to load high scores from {}", scores_file.display()))?;

    let config = GameConfig {
        color_policy: color_policy.into(),
    };
    let game = SharedGame::new(
        Rc::new(RefCell::new(GameModel::new(scores, config))),
        Duration::from_millis(gravity_ms),
    );

    info!("starting with {config:?}, gravity every {gravity_ms} ms");
    let mut stack = ScreenStack::new(Box::new(MainMenuScreen::new(game)));
    Runtime::new().run(&mut stack)?;
    info!("exiting");
    Ok(())
}
