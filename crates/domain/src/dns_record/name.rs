//! Domain name normalization.
//!
//! Canonical form: surrounding whitespace trimmed, ASCII letters lower-cased,
//! exactly one trailing `.`. Every cache key, stored record name and
//! forwarder suffix goes through [`canonical_name`], so `Example.COM`,
//! `example.com` and `example.com.` all address the same entry.

/// Returns the canonical fully-qualified spelling of `name`.
pub fn canonical_name(name: &str) -> String {
    let trimmed = name.trim().trim_end_matches('.');
    let mut canonical = String::with_capacity(trimmed.len() + 1);
    canonical.push_str(trimmed);
    canonical.make_ascii_lowercase();
    canonical.push('.');
    canonical
}

/// `true` when `name` equals `suffix` or sits below it in the name hierarchy.
///
/// Label boundaries are respected: `notcorp.example.` is not below `corp.example.`.
pub fn is_subdomain(name: &str, suffix: &str) -> bool {
    let name = canonical_name(name);
    let suffix = canonical_name(suffix);

    if suffix == "." {
        return true;
    }

    if name == suffix {
        return true;
    }

    name.len() > suffix.len()
        && name.ends_with(suffix.as_str())
        && name.as_bytes()[name.len() - suffix.len() - 1] == b'.'
}
