//! Engine-legal container names

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

/// Longest name produced by [`sanitize`]
pub const MAX_NAME_LEN: usize = 40;

static ILLEGAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_.\-]").unwrap());
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Reduce free text to a name the engine accepts
///
/// Keeps only `[A-Za-z0-9_.-]`, collapses whitespace, trims and cuts the
/// result to [`MAX_NAME_LEN`] characters. Idempotent; may return an empty
/// string.
pub fn sanitize(raw: &str) -> String {
    let filtered = ILLEGAL_CHARS.replace_all(raw, "");
    let collapsed = WHITESPACE_RUNS.replace_all(&filtered, " ");
    collapsed.trim().chars().take(MAX_NAME_LEN).collect()
}

/// Random four digit prefix used when the caller supplies no hash
pub fn random_hash() -> String {
    rand::thread_rng().gen_range(1000..=9999).to_string()
}

/// Prefix `name` with `hash` (or a random one) and sanitize the result
///
/// Best-effort collision avoidance only; callers that need guaranteed
/// uniqueness pass their own hash.
pub fn disambiguate(name: &str, hash: Option<&str>) -> String {
    let hash = match hash {
        Some(hash) => hash.to_owned(),
        None => random_hash(),
    };
    sanitize(&format!("{}.{}", hash, name))
}
