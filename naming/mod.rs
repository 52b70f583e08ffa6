/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Unique-name resolution for symbols.
//!
//! Colliding names are disambiguated with a parenthesized integer
//! suffix: the first duplicate of `"A"` becomes `"A (2)"`, the next
//! `"A (3)"`. A name that already carries a suffix has it incremented
//! in place, so `"B (2)"` colliding yields `"B (3)"`.

/// Resolve `candidate` to a name not present in `existing`.
///
/// The candidate is trimmed first. Callers must exclude the symbol's
/// own current name from `existing` so that re-validating a name does
/// not count as a self-collision.
///
/// Terminates because every collision strictly increases the suffix
/// integer against a finite set of existing names.
pub fn resolve_unique_name<S: AsRef<str>>(candidate: &str, existing: &[S]) -> String {
    let mut name = candidate.trim().to_string();
    while existing.iter().any(|e| e.as_ref() == name) {
        // A suffix at u64::MAX cannot be bumped; start a fresh
        // counter on the full name instead.
        let bumped = split_counted_suffix(&name)
            .and_then(|(stem, n)| n.checked_add(1).map(|next| format!("{stem}({next})")));
        name = match bumped {
            Some(bumped) => bumped,
            None => format!("{name} (2)"),
        };
    }
    name
}

/// Split a trailing `(n)` integer suffix off `name`.
///
/// Returns the stem (everything up to and excluding the opening
/// parenthesis) and the parsed integer. `None` when the name does not
/// end in a parenthesized integer.
fn split_counted_suffix(name: &str) -> Option<(&str, u64)> {
    let body = name.strip_suffix(')')?;
    let open = body.rfind('(')?;
    let digits = &body[open + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u64 = digits.parse().ok()?;
    Some((&body[..open], n))
}
