//! Literal normalization before querying the oracle.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RANK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\-]").expect("Invalid rank separator regex"));

static UNIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{L}+|\p{N}+|/").expect("Invalid unit token regex")
});

const RANK_ABBREVIATIONS: [(&str, &str); 2] = [("kaart", "stm"), ("aliluutn", "aliluutnantti")];

const CAMP_ALIASES: [(&str, &str); 3] = [
    ("Siestarjoki", "Siestarjoki, ven. Sestroretsk"),
    ("Karhumäki", "Karhumäki, evakuointipiste"),
    ("Sorokka", "Sorokka ven. Belomorsk"),
];

/// Joiners tried between unit designator tokens.
const UNIT_JOINERS: [&str; 4] = [" ", "", ".", "-"];

/// Unit designators with more tokens than this are queried verbatim only.
const MAX_UNIT_TOKENS: usize = 5;

/// Normalization applied to a literal before it is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preprocess {
    #[default]
    Trim,
    Rank,
    Unit,
    Camp,
    Occupation,
}

impl Preprocess {
    /// Query strings for a literal, most specific first. Empty when the
    /// literal has nothing to look up.
    pub fn queries(self, literal: &str) -> Vec<String> {
        let literal = literal.trim();
        if literal.is_empty() {
            return Vec::new();
        }
        match self {
            Self::Trim => vec![literal.to_string()],
            Self::Rank => vec![rank(literal)],
            Self::Unit => unit_variants(literal),
            Self::Camp => vec![camp(literal).to_string()],
            Self::Occupation => vec![literal.to_lowercase()],
        }
    }
}

/// `ylim.-kers` becomes `ylim. kers`; known short forms are expanded.
pub fn rank(literal: &str) -> String {
    let cleaned = RANK_SEPARATOR.replace_all(literal, " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    match RANK_ABBREVIATIONS
        .iter()
        .find(|(short, _)| cleaned.eq_ignore_ascii_case(short))
    {
        Some((_, full)) => full.to_string(),
        None => cleaned,
    }
}

pub fn camp(literal: &str) -> &str {
    CAMP_ALIASES
        .iter()
        .find(|(alias, _)| *alias == literal)
        .map_or(literal, |(_, name)| *name)
}

/// Spellings of a unit designator with varying punctuation between its
/// tokens: `JR 7` also as `JR7`, `JR.7` and `JR-7`. Each gap takes its own
/// joiner, so `Er P 15` also yields `Er.P15`. A `/` between tokens is kept as
/// written.
pub fn unit_variants(literal: &str) -> Vec<String> {
    let mut variants = vec![literal.to_string()];
    let tokens: Vec<&str> = UNIT_TOKEN.find_iter(literal).map(|m| m.as_str()).collect();
    let words = tokens.iter().filter(|t| **t != "/").count();
    if !(2..=MAX_UNIT_TOKENS).contains(&words) {
        return variants;
    }
    let gaps = tokens
        .windows(2)
        .filter(|pair| pair[0] != "/" && pair[1] != "/")
        .count();
    // Joiner choices per gap, first gap varying slowest.
    let mut choice = vec![0usize; gaps];
    loop {
        let variant = join_units(&tokens, &choice);
        if !variants.contains(&variant) {
            variants.push(variant);
        }
        let Some(gap) = choice.iter().rposition(|c| *c + 1 < UNIT_JOINERS.len()) else {
            break;
        };
        choice[gap] += 1;
        choice[gap + 1..].fill(0);
    }
    variants
}

fn join_units(tokens: &[&str], choice: &[usize]) -> String {
    let mut variant = String::new();
    let mut joiners = choice.iter().map(|c| UNIT_JOINERS[*c]);
    let mut previous: Option<&str> = None;
    for token in tokens {
        match previous {
            None | Some("/") => {}
            Some(_) if *token == "/" => {}
            Some(_) => variant.push_str(joiners.next().unwrap_or_default()),
        }
        variant.push_str(token);
        previous = Some(*token);
    }
    variant
}
