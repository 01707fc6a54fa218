use clap::{Arg, Command};
use header_forensics::analyzer::AnalysisEngine;
use header_forensics::geo::{DisabledResolver, GeoResolver, IpinfoResolver};
use header_forensics::Config;
use log::LevelFilter;
use std::io::Read;
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("header-forensics")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reconstructs delivery provenance and authentication posture from raw email headers")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .help("File containing raw header text (\"-\" or omitted reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit the structured result as JSON instead of the annotated report")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-geo")
                .long("no-geo")
                .help("Skip geolocation lookups (offline mode)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match matches.get_one::<String>("config") {
        Some(path) => match Config::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration: {e}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    let raw = match read_input(matches.get_one::<String>("input")) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error reading input: {e}");
            process::exit(1);
        }
    };

    // The engine tolerates empty input; refusing it here is the shell's job.
    if raw.trim().is_empty() {
        eprintln!("No header text provided");
        process::exit(1);
    }

    let as_json = matches.get_flag("json");

    if matches.get_flag("no-geo") {
        log::debug!("Geolocation lookups disabled");
        let engine = build_engine(&config, DisabledResolver);
        run_report(&engine, &raw, as_json).await;
    } else {
        let resolver = match IpinfoResolver::new(&config.geolocation) {
            Ok(resolver) => resolver,
            Err(e) => {
                eprintln!("Error creating geolocation client: {e}");
                process::exit(1);
            }
        };
        let engine = build_engine(&config, resolver);
        run_report(&engine, &raw, as_json).await;
    }
}

fn build_engine<R: GeoResolver>(config: &Config, resolver: R) -> AnalysisEngine<R> {
    match AnalysisEngine::new(config, resolver) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error creating analysis engine: {e}");
            process::exit(1);
        }
    }
}

async fn run_report<R: GeoResolver>(engine: &AnalysisEngine<R>, raw: &str, as_json: bool) {
    let result = engine.analyze(raw).await;

    if as_json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing result: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", engine.render(&result));
    }
}

fn read_input(path: Option<&String>) -> anyhow::Result<String> {
    match path.map(|p| p.as_str()) {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Generated default configuration: {path}");
        }
        Err(e) => {
            eprintln!("Error generating configuration: {e}");
            process::exit(1);
        }
    }
}
