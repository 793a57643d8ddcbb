use crate::domain::SelectOption;

struct Country {
    code: &'static str,
    name: &'static str,
    states: &'static [&'static str],
}

const COUNTRIES: &[Country] = &[
    Country {
        code: "IN",
        name: "India",
        states: &["Delhi", "Gujarat", "Karnataka", "Maharashtra", "Tamil Nadu"],
    },
    Country {
        code: "US",
        name: "United States",
        states: &["California", "New York", "Texas", "Washington"],
    },
    Country {
        code: "GB",
        name: "United Kingdom",
        states: &["England", "Northern Ireland", "Scotland", "Wales"],
    },
    Country {
        code: "AU",
        name: "Australia",
        states: &["New South Wales", "Queensland", "Victoria"],
    },
];

pub fn country_options() -> Vec<SelectOption> {
    COUNTRIES
        .iter()
        .map(|country| SelectOption::new(country.name, country.code))
        .collect()
}

/// States of the country with the given code; empty for unknown codes.
pub fn state_options(country_code: &str) -> Vec<SelectOption> {
    COUNTRIES
        .iter()
        .find(|country| country.code.eq_ignore_ascii_case(country_code))
        .map(|country| country.states.iter().map(|state| SelectOption::same(*state)).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_follow_country() {
        assert_eq!(state_options("AU").len(), 3);
        assert_eq!(state_options("in")[0].label, "Delhi");
        assert!(state_options("").is_empty());
        assert!(state_options("ZZ").is_empty());
    }
}
