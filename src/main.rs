//! Headless runner (default binary).
//!
//! Plays a game with the greedy placement engine and prints the final board.
//! Rendering, sound and keyboard input live elsewhere; this binary only
//! exercises the rules.

use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};

use swiftris::core::{GameSession, SessionError};
use swiftris::engine::play_turn;
use swiftris::types::GameConfig;

const DEFAULT_SHAPE_BUDGET: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    seed: Option<u32>,
    shapes: u32,
    config_path: Option<String>,
    json: bool,
    events: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            shapes: DEFAULT_SHAPE_BUDGET,
            config_path: None,
            json: false,
            events: false,
        }
    }
}

fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut run = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --seed"))?;
                run.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--shapes" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --shapes"))?;
                run.shapes = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --shapes value: {}", v))?;
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                run.config_path = Some(v.clone());
            }
            "--json" => run.json = true,
            "--events" => run.events = true,
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }
    Ok(run)
}

fn load_config(path: Option<&str>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path))?;
            serde_json::from_str::<GameConfig>(&text)
                .with_context(|| format!("parsing config file {}", path))?
        }
        None => GameConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let run = parse_args(&args)?;
    let config = load_config(run.config_path.as_deref())?;
    let seed = run.seed.unwrap_or_else(clock_seed);

    let mut session = GameSession::new(config, seed);
    session.begin();

    let mut shapes = 0u32;
    let mut lines = 0usize;
    while shapes < run.shapes {
        match session.spawn() {
            Ok(_) => {}
            Err(SessionError::NoRoom) => break,
            Err(e) => return Err(e.into()),
        }
        shapes += 1;

        let drop = play_turn(&mut session).map_err(|e| anyhow!("autoplay: {}", e.message()))?;
        lines += drop.outcome.cleared.lines();

        for event in session.drain_events() {
            if run.events {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    let snapshot = session.snapshot();
    if run.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", snapshot);
    }
    println!(
        "seed {} shapes {} lines {}{}",
        seed,
        shapes,
        lines,
        if session.is_game_over() { " game over" } else { "" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_defaults() {
        assert_eq!(parse_args(&[]).unwrap(), RunConfig::default());
    }

    #[test]
    fn parses_all_flags() {
        let run = parse_args(&args(&[
            "--seed", "42", "--shapes", "10", "--config", "board.json", "--json", "--events",
        ]))
        .unwrap();
        assert_eq!(run.seed, Some(42));
        assert_eq!(run.shapes, 10);
        assert_eq!(run.config_path.as_deref(), Some("board.json"));
        assert!(run.json);
        assert!(run.events);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "x"])).is_err());
        assert!(parse_args(&args(&["--fast"])).is_err());
    }
}
