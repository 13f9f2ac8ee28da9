use chrono::NaiveDateTime;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Serialize, Serializer};

mod timestamps;
mod tire_sizes;

pub use timestamps::{current_year, generate_timestamps, DateRange, DEFAULT_MIN_YEAR};
pub use tire_sizes::{
    generate_tire_sizes, histogram, TireSize, TireSizeRange, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE,
};

pub const DEFAULT_COUNT: usize = 25_760;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeCount {
    pub size: TireSize,
    pub count: usize,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Samples {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_seed"
    )]
    pub seed: Option<u64>,
    pub tire_sizes: Vec<TireSize>,
    pub timestamps: Vec<NaiveDateTime>,
    pub tire_size_range: TireSizeRange,
    pub date_range: DateRange,
    pub tire_size_histogram: Vec<SizeCount>,
}

impl Samples {
    pub fn earliest(&self) -> Option<&NaiveDateTime> {
        self.timestamps.iter().min()
    }

    pub fn latest(&self) -> Option<&NaiveDateTime> {
        self.timestamps.iter().max()
    }
}

/// TOML integers stop at `i64::MAX`, so larger seeds are written as strings.
fn serialize_seed<S: Serializer>(seed: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
    match seed {
        Some(seed) => match i64::try_from(*seed) {
            Ok(seed) => s.serialize_i64(seed),
            Err(_) => s.serialize_str(&seed.to_string()),
        },
        None => s.serialize_none(),
    }
}

/// Seeded when `seed` is set, otherwise drawn from OS entropy.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draws the tire sizes first and the timestamps second from the same rng.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    sizes: TireSizeRange,
    dates: DateRange,
) -> Samples {
    log::debug!("Generating {} tire sizes in {:?}", count, sizes);
    let tire_sizes = generate_tire_sizes(rng, count, sizes);
    debug_assert!(tire_sizes.iter().all(|s| sizes.contains(*s)));

    log::debug!(
        "Generating {} timestamps between {} and {}",
        count,
        dates.start(),
        dates.end()
    );
    let timestamps = generate_timestamps(rng, count, &dates);
    debug_assert!(timestamps.iter().all(|t| dates.contains(t)));

    let tire_size_histogram = histogram(&tire_sizes)
        .into_iter()
        .map(|(size, count)| SizeCount { size, count })
        .collect();

    Samples {
        seed: None,
        tire_sizes,
        timestamps,
        tire_size_range: sizes,
        date_range: dates,
        tire_size_histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_shape() {
        let mut rng = make_rng(Some(1));
        let samples = generate(
            &mut rng,
            DEFAULT_COUNT,
            TireSizeRange::default(),
            DateRange::for_years(DEFAULT_MIN_YEAR, 2020).unwrap(),
        );

        assert_eq!(samples.tire_sizes.len(), DEFAULT_COUNT);
        assert_eq!(samples.timestamps.len(), DEFAULT_COUNT);
        assert!(samples.tire_sizes.iter().all(|s| samples.tire_size_range.contains(*s)));
        assert!(samples.timestamps.iter().all(|t| samples.date_range.contains(t)));
        assert_eq!(
            samples.tire_size_histogram.iter().map(|c| c.count).sum::<usize>(),
            DEFAULT_COUNT
        );
        assert!(samples.earliest() <= samples.latest());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = |seed| {
            generate(
                &mut make_rng(Some(seed)),
                2_000,
                TireSizeRange::default(),
                DateRange::for_years(2017, 2025).unwrap(),
            )
        };

        similar_asserts::assert_eq!(run(11), run(11));
        assert_ne!(run(11).timestamps, run(12).timestamps);
    }

    #[test]
    fn timestamps_follow_tire_sizes_in_the_stream() {
        let dates = DateRange::for_years(2017, 2025).unwrap();
        let samples = generate(&mut make_rng(Some(5)), 100, TireSizeRange::default(), dates);

        let mut rng = make_rng(Some(5));
        let _ = generate_tire_sizes(&mut rng, 100, TireSizeRange::default());
        assert_eq!(samples.timestamps, generate_timestamps(&mut rng, 100, &dates));
    }

    #[test]
    fn empty_run() {
        let samples = generate(
            &mut make_rng(Some(0)),
            0,
            TireSizeRange::default(),
            DateRange::for_years(2017, 2025).unwrap(),
        );
        assert!(samples.tire_sizes.is_empty());
        assert!(samples.tire_size_histogram.is_empty());
        assert_eq!(samples.earliest(), None);
    }
}
