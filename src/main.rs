//! Card Battle - headless driver
//!
//! Runs the turn flow on the autopilot at a fixed timestep and reports
//! events through the log presenter.
//!
//! Usage: `card-battle [CONFIG.json] [--ticks N] [--json]`

use anyhow::{Context, Result, bail};

use card_battle::consts::SIM_DT;
use card_battle::sim::{GameState, TickInput, tick};
use card_battle::{BattleConfig, LogPresenter, Presenter};

/// Default run length (two minutes of simulated time)
const DEFAULT_TICKS: u64 = 120 * 60;

struct Args {
    config: Option<String>,
    ticks: u64,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        ticks: DEFAULT_TICKS,
        json: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = iter.next().context("--ticks needs a value")?;
                args.ticks = value
                    .parse()
                    .with_context(|| format!("invalid tick count: {}", value))?;
            }
            "--json" => args.json = true,
            flag if flag.starts_with("--") => bail!("unknown flag: {}", flag),
            path => args.config = Some(path.to_string()),
        }
    }

    Ok(args)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };

    log::info!("Card Battle starting...");
    let mut state = GameState::new(config)?;
    let mut presenter = LogPresenter::new();
    let input = TickInput {
        auto_play: true,
        ..Default::default()
    };

    for _ in 0..args.ticks {
        tick(&mut state, &input, SIM_DT);

        let events = state.drain_events();
        if args.json {
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
        presenter.present_all(&events);
    }

    log::info!(
        "Stopped after {} ticks in {:?}, enemy health {}",
        state.time_ticks(),
        state.phase(),
        state.enemy_health()
    );
    Ok(())
}
