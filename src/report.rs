use std::path::Path;

use crate::generators::Samples;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

pub fn render(samples: &Samples, format: Format) -> Result<String, Error> {
    match format {
        Format::Json => {
            serde_json::to_string_pretty(samples).map_err(|e| Error::Output(e.to_string()))
        }
        Format::Yaml => serde_yaml::to_string(samples).map_err(|e| Error::Output(e.to_string())),
        Format::Toml => toml::to_string(samples).map_err(|e| Error::Output(e.to_string())),
    }
}

pub fn write(samples: &Samples, output: &str) -> Result<(), Error> {
    let format = Format::from_path(output);
    log::debug!("Writing {:?} report to {}", format, output);
    let contents = render(samples, format)?;
    std::fs::write(output, contents).map_err(|e| Error::Output(format!("{}: {}", output, e)))
}

pub fn log_summary(samples: &Samples) {
    log::info!(
        "Generated {} tire sizes in [{}, {}]",
        samples.tire_sizes.len(),
        samples.tire_size_range.min(),
        samples.tire_size_range.max()
    );
    for bucket in &samples.tire_size_histogram {
        log::info!("  size {}: {}", bucket.size, bucket.count);
    }
    log::info!(
        "Generated {} timestamps between {} and {}",
        samples.timestamps.len(),
        samples.date_range.start(),
        samples.date_range.end()
    );
    if let (Some(earliest), Some(latest)) = (samples.earliest(), samples.latest()) {
        log::info!("  earliest {}, latest {}", earliest, latest);
    }
}
