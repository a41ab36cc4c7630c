use super::{Generator, RngCore, SeedValue};
use crate::datasets;
use rand::Rng;

/// Prefix marking primary keys written by the seeder
pub const SEED_ID_PREFIX: &str = "seed_";

fn pick(rng: &mut dyn RngCore, list: &[&'static str]) -> &'static str {
    list[rng.random_range(0..list.len())]
}

fn lorem_words(rng: &mut dyn RngCore, count: usize) -> Vec<&'static str> {
    (0..count).map(|_| pick(rng, datasets::LOREM)).collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `seed_` followed by 16 hex digits.
pub struct SeedIdGen;

impl Generator for SeedIdGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        SeedValue::Text(format!("{SEED_ID_PREFIX}{:016x}", rng.next_u64()))
    }
    fn name(&self) -> &'static str {
        "SeedId"
    }
}

/// Generates random lowercase strings of a given length range.
pub struct TextGen {
    pub min_len: usize,
    pub max_len: usize,
}

impl Generator for TextGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        let len = rng.random_range(self.min_len..=self.max_len);
        let s: String = (0..len)
            .map(|_| {
                let idx = rng.random_range(0u8..26);
                (b'a' + idx) as char
            })
            .collect();
        SeedValue::Text(s)
    }
    fn name(&self) -> &'static str {
        "Text"
    }
}

pub struct FirstNameGen;

impl Generator for FirstNameGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        SeedValue::Text(pick(rng, datasets::FIRST_NAMES).to_string())
    }
    fn name(&self) -> &'static str {
        "FirstName"
    }
}

pub struct LastNameGen;

impl Generator for LastNameGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        SeedValue::Text(pick(rng, datasets::LAST_NAMES).to_string())
    }
    fn name(&self) -> &'static str {
        "LastName"
    }
}

/// First and last name separated by a space.
pub struct FullNameGen;

impl Generator for FullNameGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        let first = pick(rng, datasets::FIRST_NAMES);
        let last = pick(rng, datasets::LAST_NAMES);
        SeedValue::Text(format!("{first} {last}"))
    }
    fn name(&self) -> &'static str {
        "FullName"
    }
}

/// Lowercase handle with the row index appended so rows stay unique.
pub struct UsernameGen;

impl Generator for UsernameGen {
    fn generate(&self, rng: &mut dyn RngCore, index: usize, _sql_type: &str) -> SeedValue {
        let first = pick(rng, datasets::FIRST_NAMES).to_lowercase();
        SeedValue::Text(format!("{first}{index}"))
    }
    fn name(&self) -> &'static str {
        "Username"
    }
}

pub struct EmailGen;

impl Generator for EmailGen {
    fn generate(&self, rng: &mut dyn RngCore, index: usize, _sql_type: &str) -> SeedValue {
        let first = pick(rng, datasets::FIRST_NAMES).to_lowercase();
        let last = pick(rng, datasets::LAST_NAMES).to_lowercase();
        let domain = pick(rng, datasets::EMAIL_DOMAINS);
        // index suffix keeps emails unique within a run
        SeedValue::Text(format!("{first}.{last}{index}@{domain}"))
    }
    fn name(&self) -> &'static str {
        "Email"
    }
}

/// US-style phone number.
pub struct PhoneGen;

impl Generator for PhoneGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        let area: u16 = rng.random_range(200..999);
        let exchange: u16 = rng.random_range(200..999);
        let subscriber: u16 = rng.random_range(1000..9999);
        SeedValue::Text(format!("({area}) {exchange}-{subscriber}"))
    }
    fn name(&self) -> &'static str {
        "Phone"
    }
}

pub struct UrlGen;

impl Generator for UrlGen {
    fn generate(&self, rng: &mut dyn RngCore, index: usize, _sql_type: &str) -> SeedValue {
        let word = pick(rng, datasets::LOREM);
        let domain = pick(rng, datasets::EMAIL_DOMAINS);
        SeedValue::Text(format!("https://{domain}/{word}-{index}"))
    }
    fn name(&self) -> &'static str {
        "Url"
    }
}

pub struct CityGen;

impl Generator for CityGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        SeedValue::Text(pick(rng, datasets::CITIES).to_string())
    }
    fn name(&self) -> &'static str {
        "City"
    }
}

pub struct CountryGen;

impl Generator for CountryGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        SeedValue::Text(pick(rng, datasets::COUNTRIES).to_string())
    }
    fn name(&self) -> &'static str {
        "Country"
    }
}

pub struct AddressGen;

impl Generator for AddressGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        let num: u16 = rng.random_range(1..9999);
        let street = pick(rng, datasets::LAST_NAMES);
        let suffix = pick(rng, datasets::STREET_SUFFIXES);
        SeedValue::Text(format!("{num} {street} {suffix}"))
    }
    fn name(&self) -> &'static str {
        "Address"
    }
}

pub struct CompanyGen;

impl Generator for CompanyGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        let name = pick(rng, datasets::LAST_NAMES);
        let suffix = pick(rng, datasets::COMPANY_SUFFIXES);
        SeedValue::Text(format!("{name} {suffix}"))
    }
    fn name(&self) -> &'static str {
        "Company"
    }
}

/// Three to six lorem words, first one capitalised.
pub struct TitleGen;

impl Generator for TitleGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        let count = rng.random_range(3usize..=6);
        let words = lorem_words(rng, count);
        SeedValue::Text(capitalize(&words.join(" ")))
    }
    fn name(&self) -> &'static str {
        "Title"
    }
}

/// A paragraph of lorem ipsum.
pub struct LoremGen {
    pub words: usize,
}

impl Generator for LoremGen {
    fn generate(&self, rng: &mut dyn RngCore, _index: usize, _sql_type: &str) -> SeedValue {
        let words = lorem_words(rng, self.words);
        SeedValue::Text(format!("{}.", capitalize(&words.join(" "))))
    }
    fn name(&self) -> &'static str {
        "LoremIpsum"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn text(g: &dyn Generator, index: usize) -> String {
        let mut rng = StdRng::seed_from_u64(42);
        match g.generate(&mut rng, index, "TEXT") {
            SeedValue::Text(s) => s,
            other => panic!("expected Text, got {other:?}"),
        }
    }

    #[test]
    fn seed_id_shape() {
        let id = text(&SeedIdGen, 0);
        assert!(id.starts_with(SEED_ID_PREFIX));
        assert_eq!(id.len(), SEED_ID_PREFIX.len() + 16);
    }

    #[test]
    fn email_is_unique_per_index() {
        let a = text(&EmailGen, 1);
        let b = text(&EmailGen, 2);
        assert!(a.contains('@'));
        assert_ne!(a, b);
    }

    #[test]
    fn title_is_capitalised() {
        let title = text(&TitleGen, 0);
        assert!(title.chars().next().is_some_and(char::is_uppercase));
        assert!(title.split(' ').count() >= 3);
    }

    #[test]
    fn lorem_word_count() {
        let para = text(&LoremGen { words: 12 }, 0);
        assert_eq!(para.split(' ').count(), 12);
        assert!(para.ends_with('.'));
    }

    #[test]
    fn text_length_bounds() {
        let g = TextGen {
            min_len: 3,
            max_len: 5,
        };
        let s = text(&g, 0);
        assert!((3..=5).contains(&s.len()));
    }
}
