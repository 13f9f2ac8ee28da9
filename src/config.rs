use std::path::Path;

use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use crate::generators::{
    DateRange, TireSize, TireSizeRange, DEFAULT_COUNT, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE,
    DEFAULT_MIN_YEAR,
};
use crate::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub count: usize,
    pub seed: Option<u64>,
    pub output: Option<String>,
    pub tire_sizes: TireSizes,
    pub timestamps: Timestamps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TireSizes {
    pub min: TireSize,
    pub max: TireSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timestamps {
    pub min_year: i32,
    /// Defaults to the current year.
    pub max_year: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            seed: None,
            output: None,
            tire_sizes: TireSizes::default(),
            timestamps: Timestamps::default(),
        }
    }
}

impl Default for TireSizes {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SIZE,
            max: DEFAULT_MAX_SIZE,
        }
    }
}

impl Default for Timestamps {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: None,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let cfg = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path, e)))?;
        if is_toml(path) {
            Self::from_toml(&cfg).map_err(|e| Error::Config(e.to_string()))
        } else {
            Self::from_yaml(&cfg).map_err(|e| Error::Config(e.to_string()))
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[cfg(test)]
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Command line flags win over values from the file.
    pub fn read_flags(&mut self, matches: &ArgMatches) -> Result<(), Error> {
        if let Some(count) = matches.get_one::<usize>("count") {
            self.count = *count;
        }
        if let Some(seed) = matches.get_one::<u64>("seed") {
            self.seed = Some(*seed);
        }
        if let Some(year) = matches.get_one::<i32>("min-year") {
            self.timestamps.min_year = *year;
        }
        if let Some(year) = matches.get_one::<i32>("max-year") {
            self.timestamps.max_year = Some(*year);
        }
        if let Some(output) = matches.get_one::<String>("output") {
            self.output = Some(output.clone());
        }
        Ok(())
    }

    pub fn tire_size_range(&self) -> Result<TireSizeRange, Error> {
        TireSizeRange::new(self.tire_sizes.min, self.tire_sizes.max)
    }

    /// `current_year` is used when no max year is configured.
    pub fn date_range(&self, current_year: i32) -> Result<DateRange, Error> {
        DateRange::for_years(
            self.timestamps.min_year,
            self.timestamps.max_year.unwrap_or(current_year),
        )
    }
}

pub fn is_toml(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
