use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

// Token-based scores are slightly discounted against the plain ratio, and
// partial scores discount harder as the length mismatch grows.
const TOKEN_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const PARTIAL_SCALE_EXTREME: f64 = 0.6;

/// Weighted-ratio similarity between two strings, in `[0, 100]`.
///
/// Case- and punctuation-insensitive; tolerates token reordering (token-sort
/// and token-set scores), partial substring matches (best-window score when
/// one side is much longer), and minor edit differences (Levenshtein base
/// ratio). Deterministic for a given pair. Either side normalizing to empty
/// scores 0.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let full = ratio(&a, &b);
    let tokens = token_ratio(&a, &b) * TOKEN_SCALE;

    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (shorter, longer) = if a_len <= b_len { (&a, &b) } else { (&b, &a) };
    let len_ratio = longer.chars().count() as f64 / shorter.chars().count() as f64;

    if len_ratio < 1.5 {
        return full.max(tokens);
    }

    let partial_scale = if len_ratio < 8.0 {
        PARTIAL_SCALE
    } else {
        PARTIAL_SCALE_EXTREME
    };

    full.max(partial_ratio(shorter, longer) * partial_scale)
        .max(tokens * partial_scale)
}

/// Lowercase, strip punctuation to spaces, collapse whitespace runs.
fn normalize(input: &str) -> String {
    let lowered: String = input
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

fn token_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Compares the sorted token intersection against each side's full sorted
/// token list, so shared tokens dominate regardless of the surrounding text.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split(' ').collect();
    let tokens_b: BTreeSet<&str> = b.split(' ').collect();

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let intersection = shared.join(" ");
    let combined_a = join_sections(&intersection, &only_a.join(" "));
    let combined_b = join_sections(&intersection, &only_b.join(" "));

    ratio(&intersection, &combined_a)
        .max(ratio(&intersection, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Best alignment of the shorter string against every equal-length character
/// window of the longer one.
fn partial_ratio(shorter: &str, longer: &str) -> f64 {
    let longer_chars: Vec<char> = longer.chars().collect();
    let window = shorter.chars().count();

    let mut best = 0.0_f64;
    for start in 0..=(longer_chars.len() - window) {
        let slice: String = longer_chars[start..start + window].iter().collect();
        best = best.max(ratio(shorter, &slice));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(input: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = input.split(' ').collect();
    tokens.sort_unstable();
    tokens
}

fn join_sections(head: &str, tail: &str) -> String {
    if head.is_empty() {
        tail.to_string()
    } else if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head} {tail}")
    }
}
