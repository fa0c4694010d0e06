//! Deterministic member name generation using a curated name list.
//!
//! Names are display sugar for logs and summaries. All generation is
//! deterministic (same RNG seed = same roster).

use crate::rng::StreamRng;

pub struct NameGenerator;

impl NameGenerator {
    /// Pick a first name from the curated list.
    pub fn first_name(rng: &mut StreamRng) -> &'static str {
        let names = Self::first_names();
        let index = rng.next_u64_below(names.len() as u64) as usize;
        names[index]
    }

    /// Curated list of 60 first names.
    fn first_names() -> &'static [&'static str] {
        &[
            "Lukas", "Leon", "Finn", "Jonas", "Paul", "Felix", "Noah", "Elias",
            "Maximilian", "Ben", "Luis", "Henry", "Emil", "Anton", "Jakob",
            "Moritz", "Theo", "Niklas", "Julian", "David", "Oskar", "Erik",
            "Tim", "Fabian", "Simon", "Jan", "Florian", "Tobias", "Sebastian",
            "Matthias",
            "Mia", "Emma", "Hannah", "Sofia", "Anna", "Lea", "Lina", "Marie",
            "Clara", "Lena", "Johanna", "Laura", "Ida", "Charlotte", "Greta",
            "Amelie", "Frieda", "Katharina", "Julia", "Sarah", "Nele", "Maja",
            "Helena", "Paula", "Antonia", "Mathilda", "Franziska", "Theresa",
            "Annika", "Carla",
        ]
    }
}
