use serde::Serialize;

/// Number of picks shown when nothing matches the request.
const FALLBACK_PICKS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub mood: &'static str,
    pub activity: &'static str,
    pub reason: &'static str,
    pub match_score: u8,
}

pub const RECOMMENDATIONS: [Recommendation; 5] = [
    Recommendation {
        mood: "Serene & Grounded",
        activity: "Forest Bathing in the Northern Groves",
        reason: "A poetic escape into the ancient rhythm of the trees, designed to recalibrate your senses.",
        match_score: 98,
    },
    Recommendation {
        mood: "Creative & Artisanal",
        activity: "Wheel Throwing Masterclass",
        reason: "A tactile journey into the alchemy of clay, finding stillness in the movement of the potter's wheel.",
        match_score: 94,
    },
    Recommendation {
        mood: "Refined & Sensory",
        activity: "The Art of Mixology",
        reason: "Explore the architecture of flavor through balanced spirits and artisanal botanicals.",
        match_score: 91,
    },
    Recommendation {
        mood: "Niche & Precise",
        activity: "Watchmaking Workshop",
        reason: "Uncover the mechanical heart of time, where precision meets unparalleled craftsmanship.",
        match_score: 89,
    },
    Recommendation {
        mood: "Atmospheric & Deep",
        activity: "Perfume Formulation Lab",
        reason: "Synthesize your personal aura using rare essences and historical fragrance libraries.",
        match_score: 87,
    },
];

impl Recommendation {
    fn matches(&self, needle: &str) -> bool {
        [self.activity, self.mood, self.reason]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Recommendations for a free-text request.
///
/// Blank input yields nothing. Input that matches no recommendation yields
/// the top picks instead of an empty list.
pub fn search(input: &str) -> Vec<Recommendation> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let matched: Vec<Recommendation> = RECOMMENDATIONS
        .iter()
        .filter(|rec| rec.matches(&needle))
        .copied()
        .collect();

    if matched.is_empty() {
        RECOMMENDATIONS[..FALLBACK_PICKS].to_vec()
    } else {
        matched
    }
}
