//! Weighted-penalty scoring.
//!
//! Pure function from signals to scores. The mobile score deducts the
//! viewport weight a second time on top of the shared deduction; that is the
//! shipped behavior the stored historical reports were produced with, so it
//! stays until product says otherwise.

use crate::domain::models::{PageSignals, ScoreTriple};

const TITLE_MISSING_PENALTY: i64 = 15;
const TITLE_TOO_LONG_PENALTY: i64 = 5;
const TITLE_MAX_CHARS: usize = 60;
const DESCRIPTION_MISSING_PENALTY: i64 = 15;
const DESCRIPTION_TOO_LONG_PENALTY: i64 = 5;
const DESCRIPTION_MAX_CHARS: usize = 160;
const H1_MISSING_PENALTY: i64 = 10;
const H1_MULTIPLE_PENALTY: i64 = 5;
const IMAGE_ALT_PENALTY_PER_IMAGE: i64 = 2;
const IMAGE_ALT_PENALTY_CAP: i64 = 10;
const VIEWPORT_MISSING_PENALTY: i64 = 10;
const CANONICAL_MISSING_PENALTY: i64 = 5;
const MOBILE_VIEWPORT_EXTRA_PENALTY: i64 = 20;

/// Score a set of extracted signals. Deterministic and side-effect free.
pub fn score(signals: &PageSignals) -> ScoreTriple {
    let mut penalty = 0;

    match signals.title.as_deref() {
        None => penalty += TITLE_MISSING_PENALTY,
        Some(title) if title.chars().count() > TITLE_MAX_CHARS => {
            penalty += TITLE_TOO_LONG_PENALTY
        }
        Some(_) => {}
    }

    match signals.meta_description.as_deref() {
        None => penalty += DESCRIPTION_MISSING_PENALTY,
        Some(desc) if desc.chars().count() > DESCRIPTION_MAX_CHARS => {
            penalty += DESCRIPTION_TOO_LONG_PENALTY
        }
        Some(_) => {}
    }

    if signals.h1_count == 0 {
        penalty += H1_MISSING_PENALTY;
    } else if signals.h1_count > 1 {
        penalty += H1_MULTIPLE_PENALTY;
    }

    penalty +=
        (signals.images_without_alt * IMAGE_ALT_PENALTY_PER_IMAGE).min(IMAGE_ALT_PENALTY_CAP);

    if !signals.has_viewport {
        penalty += VIEWPORT_MISSING_PENALTY;
    }
    if !signals.has_canonical {
        penalty += CANONICAL_MISSING_PENALTY;
    }

    let global = (100 - penalty).clamp(0, 100);
    let mobile = if signals.has_viewport {
        global
    } else {
        (global - MOBILE_VIEWPORT_EXTRA_PENALTY).clamp(0, 100)
    };

    ScoreTriple { global, mobile, desktop: global }
}
