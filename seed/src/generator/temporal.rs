use super::{Generator, RngCore, SeedValue};
use rand::Rng;

fn random_date(rng: &mut dyn RngCore) -> String {
    let year = rng.random_range(2020u16..=2025);
    let month = rng.random_range(1u8..=12);
    let day = rng.random_range(1u8..=28); // valid in every month
    format!("{year:04}-{month:02}-{day:02}")
}

fn random_time(rng: &mut dyn RngCore) -> String {
    let hour = rng.random_range(0u8..=23);
    let minute = rng.random_range(0u8..=59);
    let second = rng.random_range(0u8..=59);
    format!("{hour:02}:{minute:02}:{second:02}")
}

/// Generates random dates in YYYY-MM-DD format.
pub struct DateGen;

impl Generator for DateGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        SeedValue::Text(random_date(rng))
    }
    fn name(&self) -> &'static str {
        "Date"
    }
}

/// Generates random timestamps in YYYY-MM-DD HH:MM:SS format.
pub struct TimestampGen;

impl Generator for TimestampGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        let date = random_date(rng);
        let time = random_time(rng);
        SeedValue::Text(format!("{date} {time}"))
    }
    fn name(&self) -> &'static str {
        "Timestamp"
    }
}

/// Generates random times in HH:MM:SS format.
pub struct TimeGen;

impl Generator for TimeGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        SeedValue::Text(random_time(rng))
    }
    fn name(&self) -> &'static str {
        "Time"
    }
}
