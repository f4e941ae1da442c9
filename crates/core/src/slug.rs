//! URL slug derivation for passions.
//!
//! `slugify` is deterministic; uniqueness comes from probing the store
//! with successive candidates (`art`, `art-1`, `art-2`, ...). Under a
//! concurrent race on the same name, both writers can compute the same
//! candidate; the database unique constraint decides the loser, which
//! surfaces as a conflict.

/// Derive the base slug from a passion name: lowercase, trim, strip
/// characters outside `[a-z0-9\s_-]`, collapse whitespace / underscore /
/// hyphen runs into a single hyphen, strip leading/trailing hyphens.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;
    for c in lowered.trim().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else if c.is_whitespace() || c == '_' || c == '-' {
            pending_hyphen = true;
        }
        // Anything else is stripped without breaking the current run.
    }
    out
}

/// Candidate sequence for uniqueness probing: the base slug, then
/// `base-1`, `base-2`, ... An empty base falls back to `"passion"`.
pub fn slug_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    let base = if base.is_empty() { "passion" } else { base };
    std::iter::once(base.to_string())
        .chain((1u32..).map(move |n| format!("{base}-{n}")))
}
