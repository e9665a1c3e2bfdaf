//! Tone ladders, the vowel scanner and the tone resolver.

/// Bare vowel plus the five tones.
pub const LADDER_LEN: usize = 6;

/// One ladder per base vowel, indexed by tone: bare, sắc, huyền, hỏi, ngã, nặng.
pub const TONE_LADDERS: [[char; LADDER_LEN]; 12] = [
    ['a', 'á', 'à', 'ả', 'ã', 'ạ'],
    ['ă', 'ắ', 'ằ', 'ẳ', 'ẵ', 'ặ'],
    ['â', 'ấ', 'ầ', 'ẩ', 'ẫ', 'ậ'],
    ['e', 'é', 'è', 'ẻ', 'ẽ', 'ẹ'],
    ['ê', 'ế', 'ề', 'ể', 'ễ', 'ệ'],
    ['i', 'í', 'ì', 'ỉ', 'ĩ', 'ị'],
    ['o', 'ó', 'ò', 'ỏ', 'õ', 'ọ'],
    ['ô', 'ố', 'ồ', 'ổ', 'ỗ', 'ộ'],
    ['ơ', 'ớ', 'ờ', 'ở', 'ỡ', 'ợ'],
    ['u', 'ú', 'ù', 'ủ', 'ũ', 'ụ'],
    ['ư', 'ứ', 'ừ', 'ử', 'ữ', 'ự'],
    ['y', 'ý', 'ỳ', 'ỷ', 'ỹ', 'ỵ'],
];

// Main vowel of a cluster first: "oa" -> a, "uê" -> ê, "ươ" -> ơ.
const PRIORITY: [char; 12] = ['a', 'ă', 'â', 'o', 'ô', 'ơ', 'e', 'ê', 'u', 'ư', 'i', 'y'];

#[inline(always)]
pub fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[inline(always)]
pub fn raise(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Ladder holding `c` (any tone, any case).
pub fn ladder_of(c: char) -> Option<&'static [char; LADDER_LEN]> {
    let c = fold(c);
    TONE_LADDERS.iter().find(|ladder| ladder.contains(&c))
}

#[inline]
pub fn is_vowel(c: char) -> bool {
    ladder_of(c).is_some()
}

pub fn vowel_positions(text: &str) -> Vec<usize> {
    let chars: Vec<char> = text.chars().collect();
    vowel_positions_in(&chars)
}

pub(crate) fn vowel_positions_in(chars: &[char]) -> Vec<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|&(_, &c)| is_vowel(c))
        .map(|(i, _)| i)
        .collect()
}

/// `c` moved to `tone` on its ladder, keeping its case. Non-vowels are returned as is.
pub fn with_tone(c: char, tone: u8, upper: bool) -> char {
    match ladder_of(c) {
        Some(ladder) => {
            let g = ladder[(tone as usize).min(LADDER_LEN - 1)];
            if upper { raise(g) } else { g }
        }
        None => c,
    }
}

fn rank(c: char) -> usize {
    ladder_of(c)
        .and_then(|ladder| PRIORITY.iter().position(|&p| p == ladder[0]))
        .unwrap_or(usize::MAX)
}

fn is_all_upper(chars: &[char]) -> bool {
    chars.iter().all(|c| !c.is_lowercase())
}

/// Puts `tone` on the highest-priority vowel of `text` (rightmost on ties).
pub fn apply_tone(text: &str, tone: u8) -> String {
    let chars: Vec<char> = text.chars().collect();
    let candidates = vowel_positions_in(&chars);
    if candidates.is_empty() {
        return text.to_string();
    }
    apply_tone_among(&chars, &candidates, tone).into_iter().collect()
}

/// Same as [`apply_tone`], restricted to the given vowel positions (ascending).
pub(crate) fn apply_tone_among(chars: &[char], candidates: &[usize], tone: u8) -> Vec<char> {
    let mut chosen: Option<(usize, usize)> = None;
    for &p in candidates {
        let r = rank(chars[p]);
        // `<=` because candidates ascend: equal rank means further right.
        if chosen.is_none_or(|(_, best)| r <= best) {
            chosen = Some((p, r));
        }
    }

    let mut out = chars.to_vec();
    if let Some((pos, _)) = chosen {
        let upper = is_all_upper(chars) || chars[pos].is_uppercase();
        out[pos] = with_tone(chars[pos], tone, upper);
        tracing::trace!(pos, tone, glyph = %out[pos], "tone placed");
    }
    out
}
