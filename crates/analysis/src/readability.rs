//! Flesch–Kincaid grade level.
//!
//! `0.39 * (words / sentences) + 11.8 * (syllables / words) - 15.59`

/// Grade-level reading score for `text`, rounded to two decimals.
/// Text without any words scores `0.0`.
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let words: Vec<String> = text
        .split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return 0.0;
    }

    let word_count = words.len() as f64;
    let sentences = sentence_runs(text).max(1) as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let grade = 0.39 * (word_count / sentences) + 11.8 * (syllables as f64 / word_count) - 15.59;
    (grade * 100.0).round() / 100.0
}

/// Lowercase and keep letters only; "Court's" -> "courts".
fn normalize_word(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Count runs of sentence terminators so "Wait..." is one sentence, not three.
fn sentence_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for c in text.chars() {
        let terminal = matches!(c, '.' | '!' | '?');
        if terminal && !in_run {
            runs += 1;
        }
        in_run = terminal;
    }
    runs
}

/// Vowel-group syllable estimate with a silent trailing 'e'.
pub(crate) fn count_syllables(word: &str) -> usize {
    const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];
    let mut count = 0;
    let mut prev_was_vowel = false;

    for ch in word.chars() {
        let is_vowel = VOWELS.contains(&ch);
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    // "table" keeps its final syllable, "make" does not
    if word.ends_with('e') && !word.ends_with("le") && count > 1 {
        count -= 1;
    }

    count.max(1)
}
