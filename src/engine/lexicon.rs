//! Lexicon-based mood classification.
//!
//! This is the fallback path behind the generative detector: it must be
//! total — any input maps to one of the six labels, nothing panics. Matching
//! is plain lowercase substring search with no negation handling ("not happy"
//! still counts toward happy); that is a documented limitation of the
//! approach, not something to paper over here.

use crate::models::Mood;

/// Multi-word phrases checked before any keyword counting. First match wins,
/// so table order is part of the contract: more specific or higher-priority
/// phrases go first.
const PHRASES: &[(&str, Mood)] = &[
    ("passed away", Mood::Sad),
    ("funeral", Mood::Sad),
    ("broke up with", Mood::Sad),
    ("lost my job", Mood::Sad),
    ("failed my exam", Mood::Sad),
    ("got the job", Mood::Happy),
    ("got promoted", Mood::Happy),
    ("passed my exam", Mood::Happy),
    ("best day", Mood::Happy),
    ("panic attack", Mood::Anxious),
    ("can't sleep", Mood::Anxious),
    ("cant sleep", Mood::Anxious),
    ("job interview", Mood::Anxious),
    ("too much work", Mood::Stressed),
    ("so much to do", Mood::Stressed),
    ("no time for", Mood::Stressed),
    ("day off", Mood::Calm),
    ("at peace", Mood::Calm),
];

/// Per-mood keyword lists, scanned in `Mood::ORDER` (neutral is the sentinel
/// for "no hits", it has no list of its own). Each list mixes explicit
/// emotion words with contextual triggers.
const KEYWORDS: &[(Mood, &[&str])] = &[
    (
        Mood::Happy,
        &[
            "happy", "great", "wonderful", "amazing", "excited", "joy", "love", "grateful",
            "thrilled", "fantastic", "delighted", "proud", "promotion", "celebrate",
        ],
    ),
    (
        Mood::Calm,
        &[
            "calm", "peaceful", "relaxed", "serene", "content", "tranquil", "rested", "mindful",
            "okay", "fine",
        ],
    ),
    (
        Mood::Anxious,
        &[
            "anxious", "worried", "nervous", "panic", "scared", "afraid", "fear", "uneasy",
            "dread", "restless", "overthinking", "interview",
        ],
    ),
    (
        Mood::Sad,
        &[
            "sad", "depressed", "unhappy", "upset", "cry", "crying", "lonely", "hurt", "grief",
            "heartbroken", "miserable", "hopeless", "loss",
        ],
    ),
    (
        Mood::Stressed,
        &[
            "stressed", "overwhelmed", "pressure", "deadline", "exhausted", "burnout",
            "burned out", "swamped", "tense", "overworked", "tired",
        ],
    ),
];

/// Map free text to a mood label.
///
/// Phrase matches take strict priority over keyword counting. Keyword hits
/// are counted per occurrence (saying "sad" three times counts three), and
/// the strictly highest total wins; ties — including the all-zero case —
/// resolve to the earliest mood in `Mood::ORDER`, which for zero hits means
/// `Neutral`.
pub fn classify_mood(text: &str) -> Mood {
    let lower = text.to_lowercase();
    if lower.trim().is_empty() {
        return Mood::Neutral;
    }

    for (phrase, mood) in PHRASES {
        if lower.contains(phrase) {
            return *mood;
        }
    }

    let mut best: Option<(Mood, usize)> = None;
    for (mood, words) in KEYWORDS {
        let hits: usize = words.iter().map(|w| lower.matches(w).count()).sum();
        if hits == 0 {
            continue;
        }
        match best {
            // Strict comparison keeps the earliest category on ties.
            Some((_, top)) if hits <= top => {}
            _ => best = Some((*mood, hits)),
        }
    }

    best.map(|(mood, _)| mood).unwrap_or(Mood::Neutral)
}
