// ═══════════════════════════════════════════════════════════════════════
// Match Runner — headless games and side-swapped series
// ═══════════════════════════════════════════════════════════════════════
//
// Generates a random symmetric battlefield per seed, runs two agents
// against each other through the referee, and aggregates series
// statistics. Every seed is played twice with sides swapped so a map
// that favours one spawn cannot skew the comparison.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use splash_agents::Agent;
use splash_engine::clock::TurnClock;
use splash_engine::control::control_balance;
use splash_engine::setup::{build_config, AgentRecord, SetupError, TileRecord};
use splash_engine::types::{GameConfig, PlayerId, TurnState};
use splash_engine::Cell;

use crate::referee::resolve_turn;

/// Fraction of interior cells turned into cover walls.
const WALL_DENSITY: f64 = 0.12;

/// Shape of the matches in a series.
#[derive(Debug, Clone, Copy)]
pub struct MatchSettings {
    pub width: i32,
    pub height: i32,
    /// Agents per side.
    pub squad: usize,
    pub max_turns: u32,
    pub turn_budget_ms: u64,
}

impl Default for MatchSettings {
    fn default() -> MatchSettings {
        MatchSettings { width: 16, height: 8, squad: 3, max_turns: 100, turn_budget_ms: 50 }
    }
}

/// Outcome of one headless match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub seed: u64,
    /// None on a draw.
    pub winner: Option<PlayerId>,
    /// Accumulated per-turn control balance, one entry per player.
    pub scores: [i64; 2],
    pub turns: u32,
}

/// Build a seeded, left-right symmetric battlefield and its starting
/// state. Both squads get identical stats; spawn columns stay clear.
pub fn generate_setup(
    seed: u64,
    settings: &MatchSettings,
) -> Result<(GameConfig, TurnState), SetupError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let MatchSettings { width, height, squad, .. } = *settings;

    let mut tiles = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            tiles.push(TileRecord { x, y, tile: 0 });
        }
    }
    // Mirror walls across the vertical axis, leaving both spawn columns
    // and their approach open.
    for y in 0..height {
        for x in 2..width / 2 {
            if rng.gen_bool(WALL_DENSITY) {
                tiles[(y * width + x) as usize].tile = 1;
                tiles[(y * width + (width - 1 - x)) as usize].tile = 1;
            }
        }
    }

    let mut records = Vec::with_capacity(squad * 2);
    for player in 0..2 {
        for slot in 0..squad {
            records.push(AgentRecord {
                id: (player * squad + slot) as i32 + 1,
                player: player as i32,
                shoot_cooldown: 1 + (slot as i32 % 2),
                optimal_range: 2 + (slot as i32 % 3),
                soaking_power: 16 + 8 * (slot as i32 % 2),
                splash_bombs: 1 + (slot as i32 % 2),
            });
        }
    }

    let config = build_config(0, &records, width, height, &tiles)?;

    let mut state = TurnState::empty(records.len());
    for player in PlayerId::ALL {
        let x = if player == PlayerId(0) { 0 } else { width - 1 };
        for (i, id) in config.roster(player).ids().enumerate() {
            let y = (height * (2 * i as i32 + 1)) / (2 * squad as i32);
            let a = state.agent_mut(id);
            a.pos = Cell::new(x, y);
            a.splash_bombs = config.profile(id).splash_bombs;
            a.alive = true;
        }
    }

    Ok((config, state))
}

/// Run one match to elimination or the turn limit. The winner is the
/// side with the higher accumulated control balance; equal totals draw.
pub fn run_match(
    seed: u64,
    settings: &MatchSettings,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
) -> Result<MatchResult, SetupError> {
    let (config, mut state) = generate_setup(seed, settings)?;
    let mut scores = [0i64; 2];
    let mut turns = 0;

    while turns < settings.max_turns {
        let clock = TurnClock::start(settings.turn_budget_ms);
        let a = first.plan(&config, &state, &clock);
        let b = second.plan(&config, &state, &clock);
        resolve_turn(&config, &mut state, [&a, &b]);
        turns += 1;

        let balance = control_balance(&config, &state.agents, PlayerId(0)) as i64;
        scores[0] += balance;
        scores[1] -= balance;

        if PlayerId::ALL.iter().any(|p| state.living_count(config.roster(*p)) == 0) {
            break;
        }
    }

    let alive = [
        state.living_count(config.roster(PlayerId(0))),
        state.living_count(config.roster(PlayerId(1))),
    ];
    let winner = if alive[0] == 0 && alive[1] == 0 {
        None
    } else if alive[1] == 0 {
        Some(PlayerId(0))
    } else if alive[0] == 0 {
        Some(PlayerId(1))
    } else {
        match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => Some(PlayerId(0)),
            std::cmp::Ordering::Less => Some(PlayerId(1)),
            std::cmp::Ordering::Equal => None,
        }
    };

    log::debug!(
        "seed {seed}: {turns} turns, {} vs {} alive, scores {:?}",
        alive[0],
        alive[1],
        scores
    );
    Ok(MatchResult { seed, winner, scores, turns })
}

/// Aggregated outcome of a side-swapped series between two contenders.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesStats {
    pub first_name: String,
    pub second_name: String,
    pub games: u32,
    pub first_wins: u32,
    pub second_wins: u32,
    pub draws: u32,
}

/// Play `pairs` seeds, each twice with sides swapped, in parallel.
/// Factories build a fresh agent per game for a given side and seed.
pub fn run_series<F, G>(
    pairs: u32,
    base_seed: u64,
    settings: &MatchSettings,
    first: F,
    second: G,
) -> Result<SeriesStats, SetupError>
where
    F: Fn(PlayerId, u64) -> Box<dyn Agent> + Sync,
    G: Fn(PlayerId, u64) -> Box<dyn Agent> + Sync,
{
    let results: Vec<Result<[MatchResult; 2], SetupError>> = (0..pairs)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i as u64);
            let straight = run_match(
                seed,
                settings,
                first(PlayerId(0), seed).as_mut(),
                second(PlayerId(1), seed).as_mut(),
            )?;
            let swapped = run_match(
                seed,
                settings,
                second(PlayerId(0), seed).as_mut(),
                first(PlayerId(1), seed).as_mut(),
            )?;
            Ok([straight, swapped])
        })
        .collect();

    let first_name = first(PlayerId(0), base_seed).name().to_owned();
    let second_name = second(PlayerId(1), base_seed).name().to_owned();
    let mut stats = SeriesStats {
        first_name,
        second_name,
        games: 0,
        first_wins: 0,
        second_wins: 0,
        draws: 0,
    };

    for pair in results {
        let [straight, swapped] = pair?;
        stats.games += 2;
        match straight.winner {
            Some(PlayerId(0)) => stats.first_wins += 1,
            Some(_) => stats.second_wins += 1,
            None => stats.draws += 1,
        }
        match swapped.winner {
            Some(PlayerId(0)) => stats.second_wins += 1,
            Some(_) => stats.first_wins += 1,
            None => stats.draws += 1,
        }
    }
    Ok(stats)
}
