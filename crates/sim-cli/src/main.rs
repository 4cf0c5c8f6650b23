use std::env;

use chrono::Utc;
use contracts::SimConfig;
use serde_json::json;
use sim_core::{generate_population, generate_series, SimWorld, TickRng, DEFAULT_SERIES_HOURS};

fn print_usage() {
    println!("sim-cli <command>");
    println!("commands:");
    println!("  generate [count] [seed]");
    println!("    fabricate a population and print it as JSON");
    println!("    defaults: count=15 seed=1337");
    println!("  run <seed> [ticks] [count]");
    println!("    run a deterministic population simulation and print the final");
    println!("    snapshot, summary, and replay hash as JSON");
    println!("    defaults: ticks=60 count=15");
    println!("  series [hours] [seed]");
    println!("    print a standalone hourly chart series as JSON");
    println!("    defaults: hours=24 seed=1337");
}

fn parse_u64(value: Option<&String>, label: &str) -> Result<u64, String> {
    let raw = value.ok_or_else(|| format!("missing {}", label))?;
    raw.parse::<u64>()
        .map_err(|_| format!("invalid {}: {}", label, raw))
}

fn parse_u64_or(value: Option<&String>, label: &str, default: u64) -> Result<u64, String> {
    match value {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| format!("invalid {}: {}", label, raw)),
        None => Ok(default),
    }
}

fn parse_count(value: Option<&String>, default: u16) -> Result<u16, String> {
    match value {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| format!("invalid count: {}", raw)),
        None => Ok(default),
    }
}

fn run_generate(args: &[String]) -> Result<(), String> {
    let count = parse_count(args.get(2), 15)?;
    let seed = parse_u64_or(args.get(3), "seed", 1337)?;
    let now_ms = Utc::now().timestamp_millis();

    let mut rng = TickRng::new(seed);
    let population = generate_population(usize::from(count), now_ms, &mut rng);
    let payload = serde_json::to_string_pretty(&population)
        .map_err(|err| format!("failed to encode population: {err}"))?;
    println!("{payload}");
    Ok(())
}

fn run_simulation(args: &[String]) -> Result<(), String> {
    let seed = parse_u64(args.get(2), "seed")?;
    let ticks = parse_u64_or(args.get(3), "ticks", 60)?;
    let count = parse_count(args.get(4), 15)?;

    let mut config = SimConfig::default();
    config.seed = seed;
    config.subject_count = count;

    let origin_ms = Utc::now().timestamp_millis();
    let mut world = SimWorld::new(config, origin_ms);
    world.step_n(ticks);

    let payload = json!({
        "snapshot": world.snapshot(),
        "summary": world.summary(),
        "events": world.events(),
        "replay_hash": world.replay_hash().to_string(),
    });
    let encoded = serde_json::to_string_pretty(&payload)
        .map_err(|err| format!("failed to encode run output: {err}"))?;
    println!("{encoded}");
    eprintln!(
        "simulated seed={} tick={}/{} {}",
        seed,
        world.current_tick(),
        ticks,
        world.summary()
    );
    Ok(())
}

fn run_series(args: &[String]) -> Result<(), String> {
    let hours = parse_u64_or(args.get(2), "hours", DEFAULT_SERIES_HOURS as u64)?;
    let seed = parse_u64_or(args.get(3), "seed", 1337)?;
    let now_ms = Utc::now().timestamp_millis();

    let mut rng = TickRng::new(seed);
    let series = generate_series(hours as usize, now_ms, &mut rng);
    let payload = serde_json::to_string_pretty(&series)
        .map_err(|err| format!("failed to encode series: {err}"))?;
    println!("{payload}");
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    let result = match command {
        Some("generate") => run_generate(&args),
        Some("run") => run_simulation(&args),
        Some("series") => run_series(&args),
        Some("help") | None => {
            print_usage();
            Ok(())
        }
        Some(other) => Err(format!("unknown command: {other}")),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        print_usage();
        std::process::exit(2);
    }
}
