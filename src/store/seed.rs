//! Reference data loaded into a fresh store.

/// Countries available to addresses on a seeded store.
pub const SEED_COUNTRIES: &[&str] = &[
    "United States",
    "Canada",
    "Mexico",
    "France",
    "Australia",
    "Spain",
    "Russia",
    "Italy",
    "Brazil",
    "Belgium",
    "Germany",
    "Greece",
    "Argentina",
    "China",
    "Japan",
    "South Korea",
    "New Zealand",
];

/// Country of the sample customer's billing address.
pub(crate) const SAMPLE_COUNTRY: &str = "United States";
