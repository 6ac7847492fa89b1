//! Human-readable facts shown in the info panel for each body.

use crate::catalog::BodyId;

/// Label of the trivia row, always shown last.
pub const TRIVIA_LABEL: &str = "Interesting Facts";

/// Descriptive attributes of one body. `fields` keeps display order and uses
/// camelCase keys; see [`display_label`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFacts {
    pub title: &'static str,
    pub fields: &'static [(&'static str, &'static str)],
    pub trivia: &'static str,
}

/// One labelled row of the info panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRow {
    pub label: String,
    pub value: &'static str,
}

impl BodyFacts {
    /// Panel rows: the fields in order, then the trivia.
    #[must_use]
    pub fn rows(&self) -> Vec<FactRow> {
        self.fields
            .iter()
            .map(|&(key, value)| FactRow {
                label: display_label(key),
                value,
            })
            .chain(std::iter::once(FactRow {
                label: TRIVIA_LABEL.to_string(),
                value: self.trivia,
            }))
            .collect()
    }
}

/// Turn a camelCase key into a title: `distanceFromSun` -> `Distance From Sun`.
#[must_use]
pub fn display_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                label.push(' ');
            }
            label.push(c);
        }
    }
    label
}

impl BodyId {
    #[must_use]
    pub fn facts(self) -> &'static BodyFacts {
        &FACTS[self.index()]
    }
}

static FACTS: [BodyFacts; 9] = [
    BodyFacts {
        title: "The Sun",
        fields: &[
            ("type", "G-type Main-Sequence Star"),
            ("diameter", "1,391,000 km"),
            ("mass", "1.989 × 10³⁰ kg"),
            ("temperature", "5,778 K (surface)"),
            ("composition", "Hydrogen (73%), Helium (25%), Other elements (2%)"),
            ("rotationPeriod", "25-35 days (varies by latitude)"),
        ],
        trivia: "The Sun contains 99.86% of the Solar System's mass and provides the energy that sustains life on Earth. It's about 4.6 billion years old.",
    },
    BodyFacts {
        title: "Mercury",
        fields: &[
            ("type", "Terrestrial Planet"),
            ("diameter", "4,879 km"),
            ("mass", "3.285 × 10²³ kg"),
            ("distanceFromSun", "57.9 million km"),
            ("orbitalPeriod", "88 Earth days"),
            ("rotationPeriod", "59 Earth days"),
            ("temperature", "-173°C to 427°C"),
            ("moons", "0"),
        ],
        trivia: "Mercury is the smallest planet and has the most eccentric orbit. Despite being closest to the Sun, it's not the hottest planet.",
    },
    BodyFacts {
        title: "Venus",
        fields: &[
            ("type", "Terrestrial Planet"),
            ("diameter", "12,104 km"),
            ("mass", "4.867 × 10²⁴ kg"),
            ("distanceFromSun", "108.2 million km"),
            ("orbitalPeriod", "225 Earth days"),
            ("rotationPeriod", "243 Earth days (retrograde)"),
            ("temperature", "462°C (average)"),
            ("moons", "0"),
            ("atmosphere", "96.5% CO₂, 3.5% Nitrogen"),
        ],
        trivia: "Venus is the hottest planet due to its thick atmosphere causing a runaway greenhouse effect. It rotates backwards compared to most planets.",
    },
    BodyFacts {
        title: "Earth",
        fields: &[
            ("type", "Terrestrial Planet"),
            ("diameter", "12,742 km"),
            ("mass", "5.972 × 10²⁴ kg"),
            ("distanceFromSun", "149.6 million km"),
            ("orbitalPeriod", "365.25 days"),
            ("rotationPeriod", "24 hours"),
            ("temperature", "-88°C to 58°C"),
            ("moons", "1 (The Moon)"),
            ("atmosphere", "78% Nitrogen, 21% Oxygen, 1% Other"),
        ],
        trivia: "Earth is the only known planet to harbor life. About 71% of its surface is covered by water, earning it the nickname 'The Blue Planet'.",
    },
    BodyFacts {
        title: "Mars",
        fields: &[
            ("type", "Terrestrial Planet"),
            ("diameter", "6,779 km"),
            ("mass", "6.39 × 10²³ kg"),
            ("distanceFromSun", "227.9 million km"),
            ("orbitalPeriod", "687 Earth days"),
            ("rotationPeriod", "24.6 hours"),
            ("temperature", "-87°C to -5°C"),
            ("moons", "2 (Phobos and Deimos)"),
            ("atmosphere", "95% CO₂, 3% Nitrogen"),
        ],
        trivia: "Mars is known as the Red Planet due to iron oxide on its surface. It has the largest volcano in the solar system, Olympus Mons, which is about 22 km high.",
    },
    BodyFacts {
        title: "Jupiter",
        fields: &[
            ("type", "Gas Giant"),
            ("diameter", "139,820 km"),
            ("mass", "1.898 × 10²⁷ kg"),
            ("distanceFromSun", "778.5 million km"),
            ("orbitalPeriod", "12 Earth years"),
            ("rotationPeriod", "10 hours"),
            ("temperature", "-108°C (cloud tops)"),
            ("moons", "95 known moons"),
            ("notableMoons", "Io, Europa, Ganymede, Callisto"),
        ],
        trivia: "Jupiter is the largest planet in our solar system. Its Great Red Spot is a storm that has been raging for at least 400 years and is larger than Earth.",
    },
    BodyFacts {
        title: "Saturn",
        fields: &[
            ("type", "Gas Giant"),
            ("diameter", "116,460 km"),
            ("mass", "5.683 × 10²⁶ kg"),
            ("distanceFromSun", "1.4 billion km"),
            ("orbitalPeriod", "29 Earth years"),
            ("rotationPeriod", "10.7 hours"),
            ("temperature", "-138°C (cloud tops)"),
            ("moons", "146 known moons"),
            ("notableMoons", "Titan, Enceladus, Mimas"),
        ],
        trivia: "Saturn's rings are made of billions of pieces of ice and rock. The planet is so light that it would float in water if there were a bathtub big enough!",
    },
    BodyFacts {
        title: "Uranus",
        fields: &[
            ("type", "Ice Giant"),
            ("diameter", "50,724 km"),
            ("mass", "8.681 × 10²⁵ kg"),
            ("distanceFromSun", "2.9 billion km"),
            ("orbitalPeriod", "84 Earth years"),
            ("rotationPeriod", "17.2 hours (retrograde)"),
            ("temperature", "-197°C"),
            ("moons", "27 known moons"),
            ("notableMoons", "Titania, Oberon, Miranda"),
        ],
        trivia: "Uranus rotates on its side, likely due to a massive collision. It was the first planet discovered using a telescope, in 1781.",
    },
    BodyFacts {
        title: "Neptune",
        fields: &[
            ("type", "Ice Giant"),
            ("diameter", "49,244 km"),
            ("mass", "1.024 × 10²⁶ kg"),
            ("distanceFromSun", "4.5 billion km"),
            ("orbitalPeriod", "165 Earth years"),
            ("rotationPeriod", "16 hours"),
            ("temperature", "-201°C"),
            ("moons", "14 known moons"),
            ("notableMoons", "Triton, Proteus"),
        ],
        trivia: "Neptune has the strongest winds in the solar system, reaching speeds of 2,100 km/h. It was discovered in 1846 through mathematical predictions rather than observation.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("type"), "Type");
        assert_eq!(display_label("distanceFromSun"), "Distance From Sun");
        assert_eq!(display_label("notableMoons"), "Notable Moons");
        assert_eq!(display_label(""), "");
    }

    #[test]
    fn test_trivia_is_last_row() {
        for id in BodyId::ALL {
            let rows = id.facts().rows();
            let last = rows.last().unwrap();
            assert_eq!(last.label, TRIVIA_LABEL);
            assert_eq!(last.value, id.facts().trivia);
            assert_eq!(rows.len(), id.facts().fields.len() + 1);
        }
    }

    #[test]
    fn test_sun_rows_keep_declared_order() {
        let labels: Vec<String> = BodyId::Sun
            .facts()
            .rows()
            .into_iter()
            .map(|row| row.label)
            .collect();
        assert_eq!(
            labels,
            [
                "Type",
                "Diameter",
                "Mass",
                "Temperature",
                "Composition",
                "Rotation Period",
                "Interesting Facts",
            ]
        );
    }

    fn row_value(id: BodyId, label: &str) -> Option<&'static str> {
        id.facts()
            .rows()
            .into_iter()
            .find_map(|row| (row.label == label).then_some(row.value))
    }

    #[test]
    fn test_optional_fields() {
        assert_eq!(row_value(BodyId::Mars, "Moons"), Some("2 (Phobos and Deimos)"));
        assert_eq!(row_value(BodyId::Mercury, "Atmosphere"), None);
        assert_eq!(row_value(BodyId::Sun, "Distance From Sun"), None);
        assert!(row_value(BodyId::Jupiter, "Notable Moons").is_some());
    }

    #[test]
    fn test_every_body_has_core_fields() {
        for id in BodyId::ALL {
            for label in ["Type", "Diameter", "Mass", "Temperature"] {
                assert!(row_value(id, label).is_some(), "{id} is missing {label}");
            }
        }
    }
}
