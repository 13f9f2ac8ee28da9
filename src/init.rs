use std::{fs, path::Path};

use clap::ArgMatches;

use crate::config::{is_toml, Config};
use crate::Error;

const EXAMPLE_YAML: &str = r#"# Number of tire sizes and timestamps to generate
count: 25760
# Set a number here to make runs reproducible
seed: null
# Write the samples here (.json, .yaml/.yml or .toml)
output: null
tire_sizes:
  min: 26
  max: 29
timestamps:
  min_year: 2017
  # Defaults to the current year
  max_year: null
"#;

pub fn init(sub_matches: &ArgMatches) -> Result<(), Error> {
    let config_path = sub_matches
        .get_one::<String>("config")
        .ok_or(Error::Config("No config path given".to_string()))?;
    write_example(config_path, sub_matches.get_flag("force"))
}

/// Returns without touching an existing file unless `force` is set.
pub fn write_example(config_path: &str, force: bool) -> Result<(), Error> {
    if Path::new(config_path).exists() && !force {
        log::info!("Config file {} already exists, skipping", config_path);
        return Ok(());
    }

    let contents = if is_toml(config_path) {
        let example = Config::from_yaml(EXAMPLE_YAML).map_err(|e| Error::Config(e.to_string()))?;
        example.to_toml().map_err(|e| Error::Config(e.to_string()))?
    } else {
        EXAMPLE_YAML.to_string()
    };

    log::info!("Creating example config file {}", config_path);
    fs::write(config_path, contents).map_err(|e| Error::Config(e.to_string()))?;

    log::info!("Initialization complete!");
    Ok(())
}
