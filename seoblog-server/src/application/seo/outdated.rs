use regex::Regex;

use crate::domain::refresh::{Entity, EntityLabel, OutdatedSpan};

pub(crate) trait EntityRecognizer: Send + Sync {
    /// Entities ordered by start offset, non-overlapping.
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

const DATE_PATTERN: &str = r"(?i)\b(?:(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(?:\d{1,2}(?:st|nd|rd|th)?,?\s+)?|q[1-4]\s+|(?:early|mid|late|spring|summer|autumn|fall|winter)[\s-]+)?(?:19|20)\d{2}s?\b";
const PERCENT_PATTERN: &str = r"(?i)\b\d+(?:\.\d+)?(?:\s?%|\s+per\s?cent\b)";
const QUANTITY_PATTERN: &str = r"(?i)\b\d+(?:\.\d+)?\s?(?:kg|km|cm|mm|mg|ml|lbs?|gb|mb|tb|kb|miles?|meters?|metres?|kilograms?|grams?|pounds?|tons?|liters?|litres?|gallons?|feet|foot|inch(?:es)?)\b";
const CARDINAL_PATTERN: &str = r"(?i)\b(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?\b|\b(?:one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|hundred|thousand|million|billion)\b";

/// Pattern-based recognizer for the entity kinds the refresh pipeline cares
/// about. Earlier patterns win when matches overlap.
pub(crate) struct RuleBasedRecognizer {
    patterns: Vec<(EntityLabel, Regex)>,
}

impl RuleBasedRecognizer {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        let patterns = vec![
            (EntityLabel::Date, Regex::new(DATE_PATTERN)?),
            (EntityLabel::Percent, Regex::new(PERCENT_PATTERN)?),
            (EntityLabel::Quantity, Regex::new(QUANTITY_PATTERN)?),
            (EntityLabel::Cardinal, Regex::new(CARDINAL_PATTERN)?),
        ];
        Ok(Self { patterns })
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut accepted: Vec<Entity> = Vec::new();

        for (label, pattern) in &self.patterns {
            for found in pattern.find_iter(text) {
                let overlaps = accepted
                    .iter()
                    .any(|entity| found.start() < entity.end && entity.start < found.end());
                if overlaps {
                    continue;
                }
                accepted.push(Entity {
                    text: found.as_str().to_string(),
                    start: found.start(),
                    end: found.end(),
                    label: *label,
                });
            }
        }

        accepted.sort_by_key(|entity| entity.start);
        accepted
    }
}

/// Flags dates older than `current_year` and every numeric entity.
pub(crate) fn detect_outdated(
    recognizer: &dyn EntityRecognizer,
    text: &str,
    current_year: i32,
) -> Vec<OutdatedSpan> {
    recognizer
        .recognize(text)
        .into_iter()
        .filter(|entity| match entity.label {
            EntityLabel::Date => {
                first_four_digit_year(&entity.text).is_some_and(|year| year < current_year)
            }
            EntityLabel::Cardinal | EntityLabel::Percent | EntityLabel::Quantity => true,
        })
        .collect()
}

pub(crate) fn first_four_digit_year(text: &str) -> Option<i32> {
    let position = text
        .as_bytes()
        .windows(4)
        .position(|window| window.iter().all(u8::is_ascii_digit))?;
    text[position..position + 4].parse().ok()
}

pub(crate) fn starts_with_year(text: &str) -> bool {
    text.len() >= 4 && text.as_bytes()[..4].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::{
        EntityRecognizer, RuleBasedRecognizer, detect_outdated, first_four_digit_year,
        starts_with_year,
    };
    use crate::domain::refresh::EntityLabel;

    fn recognizer() -> RuleBasedRecognizer {
        RuleBasedRecognizer::new().expect("patterns must compile")
    }

    #[test]
    fn recognizes_each_label_with_byte_offsets() {
        let text = "In 2019 we grew 45% to 1,200 users and shipped 3 kg of stickers.";
        let entities = recognizer().recognize(text);

        let labels: Vec<_> = entities.iter().map(|e| (e.label, e.text.as_str())).collect();
        assert_eq!(
            labels,
            vec![
                (EntityLabel::Date, "2019"),
                (EntityLabel::Percent, "45%"),
                (EntityLabel::Cardinal, "1,200"),
                (EntityLabel::Quantity, "3 kg"),
            ]
        );
        for entity in &entities {
            assert_eq!(&text[entity.start..entity.end], entity.text);
        }
    }

    #[test]
    fn month_prefix_is_part_of_the_date_entity() {
        let entities = recognizer().recognize("Published on March 3, 2018.");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label, EntityLabel::Date);
        assert_eq!(entities[0].text, "March 3, 2018");
    }

    #[test]
    fn offsets_survive_multibyte_text() {
        let text = "Café guide — updated 2020";
        let entities = recognizer().recognize(text);
        assert_eq!(entities.len(), 1);
        assert_eq!(&text[entities[0].start..entities[0].end], "2020");
    }

    #[test]
    fn only_past_dates_are_flagged_but_numbers_always_are() {
        let text = "Trends for 2031 and 2020, with 12 tips.";
        let spans = detect_outdated(&recognizer(), text, 2026);

        let texts: Vec<_> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["2020", "12"]);
    }

    #[test]
    fn current_year_is_not_outdated() {
        let spans = detect_outdated(&recognizer(), "The 2026 roadmap", 2026);
        assert!(spans.is_empty());
    }

    #[test]
    fn year_helpers() {
        assert_eq!(first_four_digit_year("late 1999s"), Some(1999));
        assert_eq!(first_four_digit_year("March"), None);
        assert!(starts_with_year("2019"));
        assert!(starts_with_year("1990s"));
        assert!(!starts_with_year("May 2019"));
    }
}
