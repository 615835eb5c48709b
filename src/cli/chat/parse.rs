use regex::Regex;

/// Day-range pattern, tried left to right: "N일"/"N-M일" (dash, tilde or
/// en-dash separator), then "N days", then a bare "N-M" range.
const DAY_PATTERN: &str = r"(\d+)\s*[-~–]?\s*(\d+)?\s*일|(\d+)\s*days?|\b(\d+)-(\d+)\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "쉬움",
            Difficulty::Moderate => "보통",
            Difficulty::Hard => "어려움",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Difficulty::Easy => "🟢",
            Difficulty::Moderate => "🟡",
            Difficulty::Hard => "🔴",
        }
    }
}

/// Trip constraints extracted from a free-text query. Unset day fields are
/// defaulted by the recommendation engine, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedQuery {
    pub min_days: Option<u32>,
    pub max_days: Option<u32>,
    pub difficulty: Difficulty,
}

/// Extracts (min_days, max_days, difficulty) from arbitrary user text.
/// Total: any input, including the empty string, yields a ParsedQuery.
pub fn parse_query(query: &str) -> ParsedQuery {
    let q = query.to_lowercase();

    let (min_days, max_days) = match extract_days(&q) {
        Some((min, max)) => (Some(min), Some(max)),
        None => (None, None),
    };

    // Fixed scan order: easy, hard, moderate. A later match overwrites an
    // earlier one, so 보통/moderate wins on any overlap. This mirrors the
    // original behavior; do not reorder.
    let mut difficulty = Difficulty::Moderate;
    if q.contains("쉬움") || q.contains("easy") {
        difficulty = Difficulty::Easy;
    }
    if q.contains("어려움") || q.contains("hard") {
        difficulty = Difficulty::Hard;
    }
    if q.contains("보통") || q.contains("moderate") {
        difficulty = Difficulty::Moderate;
    }

    ParsedQuery {
        min_days,
        max_days,
        difficulty,
    }
}

fn extract_days(q: &str) -> Option<(u32, u32)> {
    let re = Regex::new(DAY_PATTERN).ok()?;
    let caps = re.captures(q)?;

    // digit-only captures can only fail to parse by overflowing u32;
    // saturate so absurd day counts land in the long bucket instead of
    // being dropped
    let nums: Vec<u32> = (1..=5)
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
        .collect();

    match nums.as_slice() {
        [a, b, ..] => Some(((*a).min(*b), (*a).max(*b))),
        [a] => Some((*a, *a)),
        [] => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_defaults() {
        let parsed = parse_query("");
        assert_eq!(parsed.min_days, None);
        assert_eq!(parsed.max_days, None);
        assert_eq!(parsed.difficulty, Difficulty::Moderate);
    }

    #[test]
    fn korean_range_with_dash() {
        let parsed = parse_query("6-8일 보통 난이도");
        assert_eq!(parsed.min_days, Some(6));
        assert_eq!(parsed.max_days, Some(8));
        assert_eq!(parsed.difficulty, Difficulty::Moderate);
    }

    #[test]
    fn reversed_range_is_normalized() {
        let parsed = parse_query("10-6일");
        assert_eq!(parsed.min_days, Some(6));
        assert_eq!(parsed.max_days, Some(10));
    }

    #[test]
    fn tilde_separator() {
        let parsed = parse_query("12~14일 어려움");
        assert_eq!(parsed.min_days, Some(12));
        assert_eq!(parsed.max_days, Some(14));
        assert_eq!(parsed.difficulty, Difficulty::Hard);
    }

    #[test]
    fn single_korean_day_count() {
        let parsed = parse_query("3일 쉬움");
        assert_eq!(parsed.min_days, Some(3));
        assert_eq!(parsed.max_days, Some(3));
        assert_eq!(parsed.difficulty, Difficulty::Easy);
    }

    #[test]
    fn english_days_token() {
        let parsed = parse_query("7 days, easy please");
        assert_eq!(parsed.min_days, Some(7));
        assert_eq!(parsed.max_days, Some(7));
        assert_eq!(parsed.difficulty, Difficulty::Easy);
    }

    #[test]
    fn bare_numeric_range() {
        let parsed = parse_query("hard trek 5-9");
        assert_eq!(parsed.min_days, Some(5));
        assert_eq!(parsed.max_days, Some(9));
        assert_eq!(parsed.difficulty, Difficulty::Hard);
    }

    #[test]
    fn uppercase_input_is_matched() {
        let parsed = parse_query("10 DAYS HARD");
        assert_eq!(parsed.min_days, Some(10));
        assert_eq!(parsed.difficulty, Difficulty::Hard);
    }

    #[test]
    fn later_keyword_check_overwrites_earlier() {
        // moderate is scanned last, so it wins over easy and hard
        assert_eq!(parse_query("easy or moderate?").difficulty, Difficulty::Moderate);
        assert_eq!(parse_query("hard 말고 보통").difficulty, Difficulty::Moderate);
        // hard overwrites easy when moderate is absent
        assert_eq!(parse_query("easy? no, hard").difficulty, Difficulty::Hard);
    }

    #[test]
    fn huge_day_counts_saturate() {
        let parsed = parse_query("99999999999일");
        assert_eq!(parsed.min_days, Some(u32::MAX));
        assert_eq!(parsed.max_days, Some(u32::MAX));
    }

    #[test]
    fn parse_is_total_on_odd_input() {
        for text in ["", "   ", "일", "days", "-", "99999999999일", "🏔️🏔️🏔️"] {
            let _ = parse_query(text);
        }
    }
}
