use std::env;
use std::fs;
use std::path::Path;

use magnetics_core::mas::Mas;

fn main() {
    let mut args = env::args().skip(1);
    let Some(first) = args.next() else {
        eprintln!("usage: magnetics-cli [--advise] <scenario.json>");
        std::process::exit(2);
    };

    let (advise, scenario_path) = if first == "--advise" {
        match args.next() {
            Some(path) => (true, path),
            None => {
                eprintln!("usage: magnetics-cli [--advise] <scenario.json>");
                std::process::exit(2);
            }
        }
    } else {
        (false, first)
    };

    let path = Path::new(&scenario_path);
    if !path.exists() {
        eprintln!("scenario not found: {scenario_path}");
        std::process::exit(2);
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("failed to read {scenario_path}: {err}");
            std::process::exit(2);
        }
    };

    let mas: Mas = match serde_json::from_str(&content) {
        Ok(m) => m,
        Err(err) => {
            eprintln!("malformed scenario {scenario_path}: {err}");
            std::process::exit(2);
        }
    };

    if advise {
        println!(
            "advise mode requested for '{}', run the HTTP API's /v1/magnetics/advise for full search",
            mas.magnetic.name
        );
        return;
    }

    let settings = magnetics_core::settings::Settings::default();
    let frequency = mas
        .inputs
        .operating_points
        .first()
        .and_then(|op| op.excitations.first())
        .map(|e| e.current.frequency)
        .unwrap_or(100_000.0);
    let turns0 = mas
        .magnetic
        .coil
        .functional
        .first()
        .map(|w| w.number_turns)
        .unwrap_or(1);

    match magnetics_core::inductance::magnetizing::magnetizing_inductance(
        &mas.magnetic.core,
        turns0,
        &settings,
    ) {
        Ok(out) => {
            println!(
                "parsed scenario: {} frequency={frequency}Hz turns0={turns0} lm0={:.6e}H",
                mas.magnetic.name, out.lm0
            );
        }
        Err(err) => {
            eprintln!("physics evaluation failed: {err}");
            std::process::exit(1);
        }
    }
}
