//! Partial-ratio string similarity
//!
//! The shorter string is slid across the longer one, one character at a
//! time, and the best normalized Levenshtein similarity over all windows is
//! kept. A query that appears verbatim inside a longer term scores 1.0.
//!
//! This approximates the usual Indel-based partial ratio: only full-length
//! windows are compared, with no partial alignment at the string edges, so
//! scores near a threshold can differ slightly from that measure.

/// Best-window similarity of `a` and `b`, in [0, 1]
///
/// Either string being empty scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let long_chars: Vec<char> = long.chars().collect();
    let window = short.chars().count();

    let mut best: f64 = 0.0;
    for start in 0..=(long_chars.len() - window) {
        let candidate: String = long_chars[start..start + window].iter().collect();
        let sim = strsim::normalized_levenshtein(short, &candidate);
        if sim > best {
            best = sim;
            if best >= 1.0 {
                break;
            }
        }
    }
    best
}

/// [`partial_ratio`] on the 0 to 100 scale used by percentage thresholds
pub fn partial_ratio_percent(a: &str, b: &str) -> f64 {
    partial_ratio(a, b) * 100.0
}
