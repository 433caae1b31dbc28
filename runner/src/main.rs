// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for the protocol bot and the headless arena
// ═══════════════════════════════════════════════════════════════════════
//
// `bot` speaks the referee protocol on stdin/stdout, so all logging goes
// to stderr. `arena` plays two agents against each other offline.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use splash_agents::{Agent, PlannerAgent, RandomAgent};
use splash_arena::{run_series, MatchSettings};
use splash_engine::clock::{TurnClock, TURN_BUDGET_MS};
use splash_engine::protocol::{read_setup, read_turn, write_commands, Scanner};
use splash_engine::types::PlayerId;

#[derive(Parser)]
#[command(name = "splash-runner", about = "Splash bomb skirmish bot and arena")]
struct Cli {
    /// -v for debug, -vv for trace (always on stderr).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Speak the referee protocol on stdin/stdout
    Bot {
        /// Per-turn compute budget in milliseconds
        #[arg(short, long, default_value_t = TURN_BUDGET_MS)]
        budget_ms: u64,
        /// Commands considered per agent during composition
        #[arg(short, long, default_value_t = 2)]
        width: usize,
    },
    /// Run a headless side-swapped series between two agents
    Arena {
        /// Seed pairs to play; every pair is two games with sides swapped
        #[arg(short, long, default_value_t = 50)]
        pairs: u32,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        max_turns: u32,
        #[arg(long, default_value_t = 16)]
        map_width: i32,
        #[arg(long, default_value_t = 8)]
        map_height: i32,
        /// Agents per side
        #[arg(long, default_value_t = 3)]
        squad: usize,
        #[arg(long, value_enum, default_value = "planner")]
        first: AgentKind,
        #[arg(long, value_enum, default_value = "random")]
        second: AgentKind,
        /// Emit the series stats as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgentKind {
    Planner,
    Random,
}

impl AgentKind {
    fn build(self, player: PlayerId, seed: u64) -> Box<dyn Agent> {
        match self {
            AgentKind::Planner => Box::new(PlannerAgent::new(player)),
            AgentKind::Random => Box::new(RandomAgent::new(player, seed)),
        }
    }
}

fn init_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("logging setup failed: {e}");
        return ExitCode::FAILURE;
    }

    let outcome = match cli.command {
        Commands::Bot { budget_ms, width } => cmd_bot(budget_ms, width),
        Commands::Arena {
            pairs,
            seed,
            max_turns,
            map_width,
            map_height,
            squad,
            first,
            second,
            json,
        } => {
            let settings = MatchSettings {
                width: map_width,
                height: map_height,
                squad,
                max_turns,
                turn_budget_ms: TURN_BUDGET_MS,
            };
            cmd_arena(pairs, seed, settings, first, second, json)
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Turn loop against the live referee: read a state, plan, answer.
fn cmd_bot(budget_ms: u64, width: usize) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut scanner = Scanner::new(stdin.lock());
    let config = read_setup(&mut scanner)?;

    let mut agent = PlannerAgent::with_search_width(config.my_player, width);
    log::info!("bot up as {} with search width {width}", config.my_player);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    while let Some(state) = read_turn(&mut scanner, &config)? {
        let clock = TurnClock::start(budget_ms);
        let bundle = agent.plan(&config, &state, &clock);
        if clock.expired() {
            log::warn!("turn overran its {budget_ms}ms budget: {:.2}ms", clock.elapsed_ms());
        }
        write_commands(&mut out, &config, &state, &bundle, clock.elapsed_ms())?;
    }
    log::info!("input closed, match over");
    Ok(())
}

fn cmd_arena(
    pairs: u32,
    seed: u64,
    settings: MatchSettings,
    first: AgentKind,
    second: AgentKind,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = run_series(
        pairs,
        seed,
        &settings,
        move |player, game_seed| first.build(player, game_seed),
        move |player, game_seed| second.build(player, game_seed.wrapping_add(0x5eed)),
    )?;

    if json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &stats)?;
        out.write_all(b"\n")?;
    } else {
        println!(
            "{} vs {}: {} games, {}-{} ({} draws)",
            stats.first_name,
            stats.second_name,
            stats.games,
            stats.first_wins,
            stats.second_wins,
            stats.draws
        );
    }
    Ok(())
}
