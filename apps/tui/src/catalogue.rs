use chrono::NaiveDate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::domain::{DiscountKind, Experience, ExperienceStatus, ALL_CITIES_CODE};
use crate::navigation::ALL_SELECTION;

/// Category menu, in display order.
pub const CATEGORIES: [&str; 7] = [
    "Alcobev",
    "Arts & Crafts",
    "Niche",
    "Food & Beverages",
    "Performance",
    "Wellness",
    "Movement",
];

/// Which lifecycle states may be shown to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    /// Show DRAFT items alongside ACTIVE ones. On by default while the
    /// catalogue is still being populated.
    pub include_drafts: bool,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            include_drafts: true,
        }
    }
}

impl StatusPolicy {
    pub const fn active_only() -> Self {
        Self {
            include_drafts: false,
        }
    }

    pub const fn is_displayable(self, status: ExperienceStatus) -> bool {
        match status {
            ExperienceStatus::Active => true,
            ExperienceStatus::Draft => self.include_drafts,
            ExperienceStatus::Inactive
            | ExperienceStatus::Completed
            | ExperienceStatus::Cancelled
            | ExperienceStatus::Unknown => false,
        }
    }
}

pub fn displayable(experiences: &[Experience], policy: StatusPolicy) -> Vec<Experience> {
    experiences
        .iter()
        .filter(|exp| policy.is_displayable(exp.status))
        .cloned()
        .collect()
}

/// Keeps items at the city with `code`. [`ALL_CITIES_CODE`] keeps all.
pub fn filter_by_city(experiences: &[Experience], code: &str) -> Vec<Experience> {
    if code.eq_ignore_ascii_case(ALL_CITIES_CODE) {
        return experiences.to_vec();
    }
    experiences
        .iter()
        .filter(|exp| exp.location.city_code().eq_ignore_ascii_case(code))
        .cloned()
        .collect()
}

/// Items whose text mentions `category`. "All" keeps everything.
pub fn in_category(experiences: &[Experience], category: &str) -> Vec<Experience> {
    let needle = category.trim().to_lowercase();
    if needle.is_empty() || category == ALL_SELECTION {
        return experiences.to_vec();
    }
    experiences
        .iter()
        .filter(|exp| {
            [&exp.heading, &exp.subheading, &exp.description]
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Items scheduled on or after `today`, soonest first. Undated items are
/// dropped.
pub fn upcoming(experiences: &[Experience], today: NaiveDate) -> Vec<Experience> {
    let mut dated: Vec<(NaiveDate, &Experience)> = experiences
        .iter()
        .filter_map(|exp| exp.date().map(|date| (date, exp)))
        .filter(|(date, _)| *date >= today)
        .collect();
    dated.sort_by_key(|(date, _)| *date);
    dated.into_iter().map(|(_, exp)| exp.clone()).collect()
}

/// Fuzzy search over heading, subheading and location name, best match
/// first. A blank query returns the input unchanged.
pub fn search(experiences: &[Experience], query: &str) -> Vec<Experience> {
    let query = query.trim();
    if query.is_empty() {
        return experiences.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &Experience)> = experiences
        .iter()
        .filter_map(|exp| {
            [&exp.heading, &exp.subheading, &exp.location.name]
                .iter()
                .filter_map(|text| matcher.fuzzy_match(text, query))
                .max()
                .map(|score| (score, exp))
        })
        .collect();
    // Stable sort keeps catalogue order between equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, exp)| exp.clone()).collect()
}

/// Per-participant price after the optional discount, floored at zero.
pub fn discounted_price(experience: &Experience) -> f64 {
    let base = experience.price_per_participant;
    let price = match &experience.discount {
        Some(discount) => match discount.kind {
            DiscountKind::Percentage => base - base * discount.value / 100.0,
            DiscountKind::Flat => base - discount.value,
        },
        None => base,
    };
    price.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Discount, Location};

    fn experience(id: &str, status: ExperienceStatus) -> Experience {
        Experience {
            id: id.to_string(),
            status,
            ..Experience::default()
        }
    }

    fn at(id: &str, location_id: &str, name: &str) -> Experience {
        Experience {
            id: id.to_string(),
            location: Location::new(id, location_id, name),
            ..Experience::default()
        }
    }

    fn dated(id: &str, date: &str) -> Experience {
        Experience {
            id: id.to_string(),
            experience_date: date.to_string(),
            ..Experience::default()
        }
    }

    fn ids(experiences: &[Experience]) -> Vec<&str> {
        experiences.iter().map(|exp| exp.id.as_str()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(diff < 1e-9, "expected {expected}, got {actual}, diff {diff}");
    }

    fn every_status() -> Vec<Experience> {
        ExperienceStatus::ALL
            .iter()
            .map(|status| experience(status.as_str(), *status))
            .collect()
    }

    #[test]
    fn default_policy_shows_drafts_and_active() {
        let shown = displayable(&every_status(), StatusPolicy::default());

        assert_eq!(ids(&shown), ["DRAFT", "ACTIVE"]);
    }

    #[test]
    fn document_without_status_is_hidden() {
        let missing: Experience =
            serde_json::from_value(serde_json::json!({ "_id": "x", "heading": "h" })).unwrap();

        assert!(displayable(&[missing], StatusPolicy::default()).is_empty());
    }

    #[test]
    fn active_only_policy_hides_drafts() {
        let shown = displayable(&every_status(), StatusPolicy::active_only());

        assert_eq!(ids(&shown), ["ACTIVE"]);
    }

    #[test]
    fn city_filter_matches_three_character_code() {
        let items = vec![
            at("a", "MUM01", "Mumbai"),
            at("b", "PUNE01", "Pune"),
            at("c", "MUMBAI02", "Mumbai West"),
        ];

        assert_eq!(ids(&filter_by_city(&items, "MUM")), ["a", "c"]);
        assert_eq!(ids(&filter_by_city(&items, "ALL")), ["a", "b", "c"]);
        assert!(filter_by_city(&items, "HYD").is_empty());
    }

    #[test]
    fn upcoming_drops_past_and_undated_and_sorts() {
        let items = vec![
            dated("later", "2025-03-01"),
            dated("past", "2024-12-31"),
            dated("today", "2025-01-10T18:30:00.000Z"),
            dated("undated", ""),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

        assert_eq!(ids(&upcoming(&items, today)), ["today", "later"]);
    }

    #[test]
    fn category_matches_text_and_all_keeps_everything() {
        let mut wine = experience("wine", ExperienceStatus::Active);
        wine.subheading = "An Alcobev tasting".to_string();
        let yoga = experience("yoga", ExperienceStatus::Active);
        let items = vec![wine, yoga];

        assert_eq!(ids(&in_category(&items, "alcobev")), ["wine"]);
        assert_eq!(ids(&in_category(&items, "All")), ["wine", "yoga"]);
    }

    #[test]
    fn search_ranks_best_match_first() {
        let mut pasta = at("pasta", "MUM01", "Mumbai");
        pasta.heading = "A Pasta Making Experience".to_string();
        let mut watch = at("watch", "PUNE01", "Pune");
        watch.heading = "The Art of Fine Watchmaking".to_string();
        let items = vec![pasta, watch];

        let found = search(&items, "watchmaking");
        assert_eq!(ids(&found), ["watch"]);

        let by_city = search(&items, "pune");
        assert_eq!(ids(&by_city), ["watch"]);

        assert_eq!(search(&items, "  ").len(), 2);
    }

    #[test]
    fn discounts_never_go_negative() {
        let mut item = experience("e1", ExperienceStatus::Active);
        item.price_per_participant = 2000.0;
        assert_close(discounted_price(&item), 2000.0);

        item.discount = Some(Discount {
            kind: DiscountKind::Percentage,
            value: 25.0,
        });
        assert_close(discounted_price(&item), 1500.0);

        item.discount = Some(Discount {
            kind: DiscountKind::Flat,
            value: 5000.0,
        });
        assert_close(discounted_price(&item), 0.0);
    }
}
