// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Script detection by Unicode block.

use scribe_core::types::Script;

/// Which supported script a character belongs to, if any.
pub fn script_of(c: char) -> Option<Script> {
    match c {
        '\u{0900}'..='\u{097F}' => Some(Script::Devanagari),
        '\u{0B80}'..='\u{0BFF}' => Some(Script::Tamil),
        '\u{0C00}'..='\u{0C7F}' => Some(Script::Telugu),
        '\u{0C80}'..='\u{0CFF}' => Some(Script::Kannada),
        c if c.is_ascii_alphabetic() => Some(Script::Latin),
        _ => None,
    }
}

/// The script most of `text`'s letters are written in.
///
/// Digits, punctuation and whitespace don't count. Ties go to the script
/// listed first in [`Script::ALL`], so mixed Indic/English text resolves to
/// the Indic script. Returns `None` when no character matches.
pub fn detect_script(text: &str) -> Option<Script> {
    let mut counts = [0usize; Script::ALL.len()];
    for script in text.chars().filter_map(script_of) {
        if let Some(slot) = Script::ALL.iter().position(|s| *s == script) {
            counts[slot] += 1;
        }
    }

    let (best, count) = counts
        .iter()
        .enumerate()
        .fold((0, 0), |acc, (i, &n)| if n > acc.1 { (i, n) } else { acc });

    (count > 0).then(|| Script::ALL[best])
}
