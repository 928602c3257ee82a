//! Rule-based English sentence segmentation.
//!
//! A boundary is terminal punctuation (`.`, `!`, `?`, plus any closing quotes or
//! brackets) followed by whitespace. A candidate is rejected when the next word
//! starts in lowercase, or when the word before a period is an abbreviation, an
//! initial, or a dotted abbreviation (`Ph.D.`) and the next word is not a common
//! sentence opener.

/// Common abbreviations that take a period (lowercase, without the period).
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "no", "vol", "pp", "ed", "eds",
    "rev", "gen", "col", "lt", "sgt", "capt", "gov", "sen", "rep", "hon", "inc", "ltd", "co",
    "corp", "bros", "dept", "univ", "assn", "est", "approx", "ca", "cf", "vs", "etc", "al", "fig",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

/// Words that typically open a sentence, so an abbreviation before them still ends one.
const SENTENCE_OPENERS: &[&str] = &[
    "the", "he", "she", "they", "it", "his", "her", "their", "its", "we", "in", "on", "at",
    "after", "before", "during", "this", "that", "these", "those", "there", "then", "later",
    "a", "an", "as", "while", "when", "however", "although", "since", "following", "from",
    "upon", "with", "by",
];

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '”' | '’')
}

fn is_opener(c: char) -> bool {
    matches!(c, '"' | '\'' | '(' | '[' | '“' | '‘')
}

/// Split `text` into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (term_pos, c) = chars[i];
        if !is_terminal(c) {
            i += 1;
            continue;
        }

        // Extend over the punctuation run and any closing quotes/brackets.
        let mut j = i + 1;
        while j < chars.len() && (is_terminal(chars[j].1) || is_closer(chars[j].1)) {
            j += 1;
        }
        if j == chars.len() {
            break;
        }
        if !chars[j].1.is_whitespace() {
            i = j;
            continue;
        }

        let mut k = j;
        while k < chars.len() && chars[k].1.is_whitespace() {
            k += 1;
        }
        if k == chars.len() {
            break;
        }

        if is_boundary(&text[start..term_pos], c, &text[chars[k].0..]) {
            push_trimmed(&mut sentences, &text[start..chars[j].0]);
            start = chars[k].0;
        }
        i = k;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

/// Decide a candidate boundary given the text before the terminal character,
/// the terminal character itself, and the text starting at the next word.
fn is_boundary(before: &str, terminal: char, after: &str) -> bool {
    let next_word = after
        .split(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(is_opener);

    match next_word.chars().next() {
        Some(first) if first.is_lowercase() => return false,
        Some(first) if matches!(first, ',' | ';' | ':') => return false,
        None => return false,
        _ => {}
    }

    if terminal != '.' {
        return true;
    }

    let token = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(is_opener)
        .trim_end_matches(is_closer);

    if !is_abbreviation(token) {
        return true;
    }

    let opener = next_word
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    SENTENCE_OPENERS.contains(&opener.as_str())
}

/// Known abbreviation, single-letter initial, or dotted abbreviation like `B.A`.
fn is_abbreviation(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }

    let mut letters = token.chars();
    if let (Some(only), None) = (letters.next(), letters.next()) {
        return only.is_alphabetic();
    }

    if token.contains('.') && token.chars().any(char::is_alphabetic) {
        return true;
    }

    ABBREVIATIONS.contains(&token.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_sentences() {
        assert_eq!(
            split_sentences("Smith was born in Ohio. She moved to Texas! Why? Nobody knows."),
            ["Smith was born in Ohio.", "She moved to Texas!", "Why?", "Nobody knows."]
        );
    }

    #[test]
    fn degree_abbreviation_mid_sentence() {
        assert_eq!(
            split_sentences("She earned a B.A. in 1990. Then she left."),
            ["She earned a B.A. in 1990.", "Then she left."]
        );
    }

    #[test]
    fn dotted_abbreviation_before_proper_noun() {
        assert_eq!(
            split_sentences("He received his Ph.D. Harvard later hired him."),
            ["He received his Ph.D. Harvard later hired him."]
        );
    }

    #[test]
    fn dotted_abbreviation_before_opener_splits() {
        assert_eq!(
            split_sentences("He received his Ph.D. He then joined Bell Labs."),
            ["He received his Ph.D.", "He then joined Bell Labs."]
        );
    }

    #[test]
    fn titles_and_initials_do_not_split() {
        assert_eq!(
            split_sentences("Dr. Smith met John F. Kennedy in 1961. It was brief."),
            ["Dr. Smith met John F. Kennedy in 1961.", "It was brief."]
        );
    }

    #[test]
    fn closing_quotes_stay_with_sentence() {
        assert_eq!(
            split_sentences("He said \"I studied law.\" Later he taught."),
            ["He said \"I studied law.\"", "Later he taught."]
        );
    }

    #[test]
    fn decimals_and_trailing_text() {
        assert_eq!(
            split_sentences("The grade was 3.9 overall. no terminal punctuation"),
            ["The grade was 3.9 overall. no terminal punctuation"]
        );
    }

    #[test]
    fn empty_and_whitespace() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }
}
