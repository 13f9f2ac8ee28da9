mod config;
mod generators;
mod init;
mod report;

use std::path::Path;

use clap::{parser::ValueSource, ArgMatches, Command};
use config::Config;
use generators::{current_year, generate, make_rng};

#[derive(Debug)]
enum Error {
    Config(String),
    Range(String),
    Output(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Config error: {}", e),
            Self::Range(e) => write!(f, "Range error: {}", e),
            Self::Output(e) => write!(f, "Output error: {}", e),
        }
    }
}

fn setup_command_line_args() -> Command {
    clap::command!()
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .default_value("tiregen.yaml")
                .help("Use a custom config file (.yaml, .yml or .toml)"),
        )
        .arg(
            clap::Arg::new("count")
                .short('n')
                .long("count")
                .value_parser(clap::value_parser!(usize))
                .help("Number of tire sizes and timestamps to generate"),
        )
        .arg(
            clap::Arg::new("seed")
                .short('s')
                .long("seed")
                .value_parser(clap::value_parser!(u64))
                .help("Seed the random generator for a reproducible run"),
        )
        .arg(
            clap::Arg::new("min-year")
                .long("min-year")
                .value_parser(clap::value_parser!(i32))
                .help("First year of the timestamp range"),
        )
        .arg(
            clap::Arg::new("max-year")
                .long("max-year")
                .value_parser(clap::value_parser!(i32))
                .help("Year used to size the timestamp range instead of the current one"),
        )
        .arg(
            clap::Arg::new("output")
                .short('o')
                .long("output")
                .help("The file to write the samples to"),
        )
        .subcommand(
            Command::new("init")
                .about("Write an example config file")
                .arg(
                    clap::Arg::new("force")
                        .short('f')
                        .long("force")
                        .action(clap::ArgAction::SetTrue)
                        .help("Overwrite an existing config file"),
                )
                .arg(
                    clap::Arg::new("config")
                        .short('c')
                        .long("config")
                        .default_value("tiregen.yaml")
                        .help("Where to write the config file"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<Config, Error> {
    let path = matches
        .get_one::<String>("config")
        .ok_or(Error::Config("No config path given".to_string()))?;
    load_config_from(path, matches.value_source("config"))
}

fn load_config_from(path: &str, source: Option<ValueSource>) -> Result<Config, Error> {
    // only an explicitly requested file has to exist
    if source == Some(ValueSource::DefaultValue) && !Path::new(path).exists() {
        log::debug!("No config file at {}, using defaults", path);
        return Ok(Config::default());
    }

    log::debug!("Loading config file {}", path);
    Config::load(path)
}

fn run_generate(matches: &ArgMatches) -> Result<(), Error> {
    let mut cfg = load_config(matches)?;
    cfg.read_flags(matches)?;
    log::debug!("Using config {:?}", cfg);

    let sizes = cfg.tire_size_range()?;
    let dates = cfg.date_range(current_year())?;

    let mut rng = make_rng(cfg.seed);
    let mut samples = generate(&mut rng, cfg.count, sizes, dates);
    samples.seed = cfg.seed;

    report::log_summary(&samples);

    if let Some(output) = &cfg.output {
        report::write(&samples, output)?;
        log::info!("Samples written to {}", output);
    }

    Ok(())
}

struct TimeLogger {
    start: std::time::Instant,
}

impl Drop for TimeLogger {
    fn drop(&mut self) {
        log::info!(
            "Run completed in {}",
            humantime::format_duration(self.start.elapsed())
        );
    }
}

fn main() -> Result<(), Error> {
    let _time_logger = TimeLogger {
        start: std::time::Instant::now(),
    };

    pretty_env_logger::init();

    let matches = setup_command_line_args().get_matches();

    match matches.subcommand() {
        Some(("init", sub_matches)) => init::init(sub_matches)?,
        None => run_generate(&matches)?,
        _ => unreachable!("Invalid subcommand"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    fn matches(args: &[&str]) -> ArgMatches {
        setup_command_line_args()
            .get_matches_from(std::iter::once("tiregen").chain(args.iter().copied()))
    }

    #[test]
    fn cli_is_well_formed() {
        setup_command_line_args().debug_assert();
    }

    #[test]
    fn missing_default_config_falls_back() {
        let dir = TempDir::new("tiregen-main").unwrap();
        let path = dir.path().join("tiregen.yaml");
        let path = path.to_str().unwrap();

        let cfg = load_config_from(path, Some(ValueSource::DefaultValue)).unwrap();
        similar_asserts::assert_eq!(cfg, Config::default());

        std::fs::write(path, "count: 3\n").unwrap();
        let cfg = load_config_from(path, Some(ValueSource::DefaultValue)).unwrap();
        assert_eq!(cfg.count, 3);
    }

    #[test]
    fn default_source_is_reported_for_the_config_flag() {
        let m = matches(&[]);
        assert_eq!(m.value_source("config"), Some(ValueSource::DefaultValue));

        let m = matches(&["-c", "other.yaml"]);
        assert_eq!(m.value_source("config"), Some(ValueSource::CommandLine));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let m = matches(&["--config", "/nonexistent/tiregen.yaml"]);
        assert!(matches!(load_config(&m), Err(Error::Config(_))));
    }

    #[test]
    fn full_run_writes_report() {
        let dir = TempDir::new("tiregen-main").unwrap();
        let cfg_path = dir.path().join("cfg.toml");
        std::fs::write(&cfg_path, "count = 40\n[timestamps]\nmax_year = 2020\n").unwrap();
        let out_path = dir.path().join("out.json");

        let m = matches(&[
            "-c",
            cfg_path.to_str().unwrap(),
            "--seed",
            "8",
            "-o",
            out_path.to_str().unwrap(),
        ]);
        run_generate(&m).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(json["seed"], 8);
        assert_eq!(json["tire_sizes"].as_array().unwrap().len(), 40);
        assert_eq!(json["date_range"]["end"], "2021-12-31T00:00:00");
    }

    #[test]
    fn largest_seed_writes_toml_report() {
        let dir = TempDir::new("tiregen-main").unwrap();
        let cfg_path = dir.path().join("cfg.yaml");
        std::fs::write(&cfg_path, "count: 5\n").unwrap();
        let out_path = dir.path().join("out.toml");

        let m = matches(&[
            "-c",
            cfg_path.to_str().unwrap(),
            "-s",
            "18446744073709551615",
            "-o",
            out_path.to_str().unwrap(),
        ]);
        run_generate(&m).unwrap();

        let toml: toml::Value =
            toml::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(toml["seed"].as_str(), Some("18446744073709551615"));
        assert_eq!(toml["tire_sizes"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn invalid_years_fail_the_run() {
        let dir = TempDir::new("tiregen-main").unwrap();
        let cfg_path = dir.path().join("cfg.yaml");
        std::fs::write(&cfg_path, "count: 1\n").unwrap();

        let m = matches(&[
            "-c",
            cfg_path.to_str().unwrap(),
            "--min-year",
            "2017",
            "--max-year",
            "2000",
        ]);
        let err = run_generate(&m).unwrap_err();
        assert!(matches!(err, Error::Range(_)));
        assert!(err.to_string().starts_with("Range error:"));
    }
}
