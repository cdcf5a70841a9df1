//! ptcg-pack-sim - open Pokémon TCG booster packs in the terminal

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, error};

use ptcg_pack_sim::{view, PackSimulator};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ptcg-pack-sim")]
#[command(about = "Open simulated Pokémon TCG booster packs", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog API key (defaults to POKEMON_TCG_API_KEY)
    #[arg(long, env = "POKEMON_TCG_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Catalog base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = ptcg_pack_sim::config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Set to select after the set list loads (defaults to the newest set)
    #[arg(long)]
    set: Option<String>,

    /// Print the set list and exit
    #[arg(long)]
    list_sets: bool,

    /// Open one pack, print its summary and exit
    #[arg(long)]
    summary: bool,

    /// Seed for reproducible packs
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// One line of interactive input.
#[derive(Debug, PartialEq)]
enum Command {
    Sets,
    Select(String),
    Open,
    Next,
    Swipe(f64, f64),
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let cmd = match words.next() {
        None => return Ok(Command::Next),
        Some(w) => w.to_lowercase(),
    };
    match cmd.as_str() {
        "sets" | "ls" => Ok(Command::Sets),
        "select" | "set" => words
            .next()
            .map(|id| Command::Select(id.to_string()))
            .ok_or_else(|| "usage: select <set id>".to_string()),
        "open" | "o" => Ok(Command::Open),
        "next" | "n" => Ok(Command::Next),
        "swipe" => {
            let start = words.next().and_then(|w| w.parse::<f64>().ok());
            let end = words.next().and_then(|w| w.parse::<f64>().ok());
            match (start, end) {
                (Some(s), Some(e)) => Ok(Command::Swipe(s, e)),
                _ => Err("usage: swipe <start x> <end x>".to_string()),
            }
        }
        "reset" | "r" => Ok(Command::Reset),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}' (try `help`)", other)),
    }
}

const HELP: &str = "\
commands:
  sets                 show the set list
  select <id>          select a set
  open                 open a pack of the selected set
  next | <enter>       reveal the next card
  swipe <start> <end>  touch swipe; leftward travel over 50 reveals the next card
  reset                put the pack away
  quit
";

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .parse_filters(cli.log_level.to_filter_directive())
        .parse_default_env()
        .init();

    let mut builder = PackSimulator::builder().timeout(Duration::from_secs(cli.timeout));
    if let Some(key) = cli.api_key.clone() {
        builder = builder.api_key(key);
    }
    if let Some(url) = cli.base_url.clone() {
        builder = builder.base_url(url);
    }
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let mut sim = builder.build().context("failed to configure the simulator")?;
    debug!("{}", sim);

    // Catalog failures only reach the banner; the loop keeps running.
    if let Err(e) = sim.load_sets() {
        error!("could not load sets: {}", e);
    }
    if let Some(id) = &cli.set {
        let _ = sim.select_set(id);
    }

    if cli.list_sets {
        print!("{}", view::set_selector(sim.session().sets(), sim.session().selected()));
        return Ok(());
    }

    if cli.summary {
        print!("{}", summary_once(&mut sim, |loading| print!("{}", view::render(loading))));
        return Ok(());
    }

    interactive(&mut sim)
}

/// Open one pack, reveal it straight through and render the result.
///
/// A failed generation renders the error banner instead; it is not fatal.
fn summary_once<C, R, F>(sim: &mut PackSimulator<C, R>, on_loading: F) -> String
where
    C: ptcg_pack_sim::Catalog,
    R: ptcg_pack_sim::RandomSource,
    F: FnOnce(&ptcg_pack_sim::Session),
{
    let opened = sim.open_pack_with(on_loading).map(|_| ());
    if let Err(e) = opened {
        error!("could not open a pack: {}", e);
        return view::render(sim.session());
    }
    while !sim.session().reveal().is_complete() {
        sim.advance();
    }
    view::render(sim.session())
}

fn interactive<C, R>(sim: &mut PackSimulator<C, R>) -> Result<()>
where
    C: ptcg_pack_sim::Catalog,
    R: ptcg_pack_sim::RandomSource,
{
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", view::render(sim.session()));
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => print!("{}", HELP),
            Ok(cmd) => {
                // Failures are already recorded in the session banner.
                let _ = match cmd {
                    Command::Sets => sim.load_sets().map(|_| ()),
                    Command::Select(id) => sim.select_set(&id).map(|_| ()),
                    Command::Open => sim
                        .open_pack_with(|loading| print!("{}", view::render(loading)))
                        .map(|_| ()),
                    Command::Next => {
                        sim.advance();
                        Ok(())
                    }
                    Command::Swipe(start, end) => {
                        sim.swipe(start, end);
                        Ok(())
                    }
                    Command::Reset => {
                        sim.reset();
                        Ok(())
                    }
                    Command::Help | Command::Quit => Ok(()),
                };
                print!("{}", view::render(sim.session()));
            }
            Err(msg) => println!("{}", msg),
        }
        print!("> ");
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_advances() {
        assert_eq!(parse_command("   "), Ok(Command::Next));
    }

    #[test]
    fn swipe_needs_two_positions() {
        assert_eq!(parse_command("swipe 200 100"), Ok(Command::Swipe(200.0, 100.0)));
        assert!(parse_command("swipe 200").is_err());
    }

    #[test]
    fn select_takes_an_id() {
        assert_eq!(parse_command("select sv3pt5"), Ok(Command::Select("sv3pt5".into())));
        assert!(parse_command("select").is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse_command("shuffle").is_err());
    }

    #[test]
    fn summary_failure_renders_banner() {
        // Nothing listens on port 1; the request is refused.
        let mut sim = PackSimulator::builder()
            .api_key("test-key")
            .base_url("http://127.0.0.1:1/v2")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let _ = sim.load_sets();

        let mut loading_shown = false;
        let out = summary_once(&mut sim, |_| loading_shown = true);
        assert!(!loading_shown, "no set is selected, so no generation starts");
        assert!(out.contains("Error:"), "{}", out);
        assert!(!out.contains("Your Complete Pack"), "{}", out);
    }
}
