//! Answer normalization and tokenization.
//!
//! Mirrors the SQuAD evaluation recipe (lowercase, strip punctuation, drop
//! English articles, collapse whitespace) with the punctuation table extended
//! to cover Japanese marks. F1 tokenization splits CJK runs into single
//! characters: Japanese answers rarely contain spaces, so whitespace tokens
//! alone would collapse F1 into exact match.

use regex::Regex;
use std::sync::OnceLock;

/// Japanese punctuation and symbols removed during normalization, alongside
/// ASCII punctuation.
const JA_PUNCTUATION: &[char] = &[
    '。', '、', '・', '「', '」', '『', '』', '（', '）', '〔', '〕', '［', '］', '｛', '｝',
    '〈', '〉', '《', '》', '【', '】', '！', '？', '：', '；', '，', '．', '…', '‥', '〜',
    '～', '＝', '＋', '／', '＼', '｜', '＠', '＃', '％', '＆', '＊', '￥',
];

fn article_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(a|an|the)\b").expect("static regex"))
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || JA_PUNCTUATION.contains(&c)
}

/// Normalize an answer string for comparison: lowercase, strip punctuation,
/// remove English articles, collapse all whitespace (including ideographic
/// spaces) to single ASCII spaces.
pub fn normalize_answer(s: &str) -> String {
    let lowered = s.to_lowercase();
    let stripped: String = lowered.chars().filter(|c| !is_punctuation(*c)).collect();
    let without_articles = article_re().replace_all(&stripped, " ");
    without_articles
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309f}'   // hiragana
        | '\u{30a0}'..='\u{30ff}' // katakana
        | '\u{31f0}'..='\u{31ff}' // katakana phonetic extensions
        | '\u{3400}'..='\u{4dbf}' // CJK extension A
        | '\u{4e00}'..='\u{9fff}' // CJK unified ideographs
        | '\u{f900}'..='\u{faff}' // CJK compatibility ideographs
        | '\u{ff66}'..='\u{ff9d}' // halfwidth katakana
        | '々' | '〆' | '〇'
    )
}

/// Split a normalized string into F1 tokens: whitespace-delimited words, with
/// runs of CJK characters further split into one token per character.
pub fn tokenize(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in s.split_whitespace() {
        let mut run = String::new();
        for c in word.chars() {
            if is_cjk(c) {
                if !run.is_empty() {
                    tokens.push(std::mem::take(&mut run));
                }
                tokens.push(c.to_string());
            } else {
                run.push(c);
            }
        }
        if !run.is_empty() {
            tokens.push(run);
        }
    }
    tokens
}
