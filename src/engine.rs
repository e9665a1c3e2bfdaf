use core::iter;

use crate::modes::RuleTable;
use crate::tone::{apply_tone_among, fold, is_vowel, ladder_of, vowel_positions_in};

/// Rewrites one word fragment typed with `table`'s input method.
///
/// Never fails: a fragment no rule applies to comes back unchanged.
pub fn transliterate(fragment: &str, table: &RuleTable) -> String {
    if fragment.is_empty() {
        return String::new();
    }

    // 1. Tone keys
    let toned = tone_pass(fragment, table);
    // 2. Marks (â, ă, ê, ô, ơ, ư, đ)
    let marked = mark_pass(&toned, table);
    // 3. u + ơ -> ươ
    fuse_horned_pairs(&marked)
}

#[derive(Clone, Copy)]
struct Typed {
    ch: char,
    literal: bool,
}

// A tone key is literal when it opens the fragment, doubles the key typed just
// before it, or spells an onset cluster ("tr") ahead of the first vowel.
fn is_literal_key(raw: &[char], idx: usize, table: &RuleTable) -> bool {
    if table.tone_for(raw[idx]).is_none() {
        return false;
    }
    if idx == 0 {
        return true;
    }
    let (prev, key) = (raw[idx - 1], raw[idx]);
    if fold(prev) == fold(key) {
        return true;
    }
    // "bangr": after the first vowel the consonant is a final, not an onset.
    table.is_onset_cluster(prev, key) && !raw[..idx].iter().any(|&c| is_vowel(c))
}

fn next_tone_key(working: &[Typed], table: &RuleTable) -> Option<(usize, u8)> {
    working.iter().enumerate().find_map(|(i, t)| {
        if t.literal {
            return None;
        }
        let tone = table.tone_for(t.ch)?;
        let has_vowel = working
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && ladder_of(other.ch).is_some());
        has_vowel.then_some((i, tone))
    })
}

// Vowel run around `anchor`; `vowels` ascends and contains `anchor`.
fn cluster_around(vowels: &[usize], anchor: usize) -> &[usize] {
    let Some(k) = vowels.iter().position(|&p| p == anchor) else {
        return &[];
    };
    let mut lo = k;
    while lo > 0 && vowels[lo - 1] + 1 == vowels[lo] {
        lo -= 1;
    }
    let mut hi = k;
    while hi + 1 < vowels.len() && vowels[hi] + 1 == vowels[hi + 1] {
        hi += 1;
    }
    &vowels[lo..=hi]
}

fn tone_pass(fragment: &str, table: &RuleTable) -> String {
    let raw: Vec<char> = fragment.chars().collect();
    let mut working: Vec<Typed> = raw
        .iter()
        .enumerate()
        .map(|(i, &ch)| Typed { ch, literal: is_literal_key(&raw, i, table) })
        .collect();

    // Each round removes one key, then rescans from the start.
    while let Some((at, tone)) = next_tone_key(&working, table) {
        let rest: Vec<Typed> = working[..at].iter().chain(&working[at + 1..]).copied().collect();
        let chars: Vec<char> = rest.iter().map(|t| t.ch).collect();
        let vowels = vowel_positions_in(&chars);

        // The key usually follows its vowel.
        let Some(anchor) = vowels.iter().rev().find(|&&p| p < at).or(vowels.last()).copied() else {
            break;
        };
        let cluster = cluster_around(&vowels, anchor);
        tracing::trace!(key = %working[at].ch, at, anchor, "tone key");

        let toned = apply_tone_among(&chars, cluster, tone);
        working = toned
            .into_iter()
            .zip(rest)
            .map(|(ch, t)| Typed { ch, literal: t.literal })
            .collect();
    }

    working.into_iter().map(|t| t.ch).collect()
}

fn rfind_key(hay: &[char], key: &[char]) -> Option<usize> {
    if key.is_empty() || key.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - key.len())
        .rev()
        .find(|&s| hay[s..s + key.len()].iter().zip(key).all(|(&h, &k)| fold(h) == k))
}

fn mark_pass(text: &str, table: &RuleTable) -> String {
    let keys: Vec<Vec<char>> = table.marks.iter().map(|r| r.key.chars().collect()).collect();
    let mut working: Vec<char> = text.chars().collect();
    // Chars at the end that an undo has handed back as literal text.
    let mut frozen = 0usize;

    loop {
        let window = working.len() - frozen;
        let Some((rule, key, at)) = table
            .marks
            .iter()
            .zip(&keys)
            .find_map(|(rule, key)| rfind_key(&working[..window], key).map(|at| (rule, key, at)))
        else {
            break;
        };

        let end = at + key.len();
        if at > 0 && fold(working[at - 1]) == rule.lower {
            // Retyping the trigger after its own result keeps the keys.
            tracing::trace!(key = rule.key, at, "mark undone");
            frozen = working.len() - at;
            continue;
        }

        let composed = rule.result(working[at].is_uppercase());
        tracing::trace!(key = rule.key, at, %composed, "mark composed");
        working = working[..at]
            .iter()
            .copied()
            .chain(iter::once(composed))
            .chain(working[end..].iter().copied())
            .collect();
    }

    working.into_iter().collect()
}

fn is_horned_o(c: char) -> bool {
    ladder_of(c).is_some_and(|ladder| ladder[0] == 'ơ')
}

fn fuse_horned_pairs(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let Some(&next) = chars.get(i + 1) else {
                return c;
            };
            // "quơ" keeps its glide.
            if (i > 0 && fold(chars[i - 1]) == 'q') || !is_horned_o(next) {
                return c;
            }
            match c {
                'u' if next.is_lowercase() => 'ư',
                'U' => 'Ư',
                _ => c,
            }
        })
        .collect()
}
