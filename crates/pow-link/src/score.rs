//! Candidate scoring for person linking.
//!
//! Every comparable field contributes independently to an additive score:
//! name similarity above a floor, categorical agreement and date-range
//! agreement. A candidate is accepted when its score exceeds the acceptance
//! threshold; among several accepted candidates the highest score wins and
//! equal scores keep the oracle's order.

use rapidfuzz::distance::{jaro_winkler, levenshtein};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use pow_model::Iri;

use crate::candidate::{Candidate, DateRange};
use crate::source::SourcePerson;

/// Weights and thresholds of the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maximum contribution of each name part.
    pub name_weight: f64,
    /// Similarity below which a name part contributes nothing.
    pub name_similarity_floor: f64,
    pub category_bonus: f64,
    pub category_penalty: f64,
    /// One range contains the other.
    pub date_match_bonus: f64,
    /// Ranges overlap without containment.
    pub date_overlap_bonus: f64,
    pub date_mismatch_penalty: f64,
    /// Maximum edit distance between two single dates written `YYYY-MM-DD`
    /// for them to count as a typo rather than a mismatch.
    pub date_fuzz_distance: usize,
    pub acceptance_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            name_weight: 10.0,
            name_similarity_floor: 0.8,
            category_bonus: 5.0,
            category_penalty: 5.0,
            date_match_bonus: 20.0,
            date_overlap_bonus: 10.0,
            date_mismatch_penalty: 15.0,
            date_fuzz_distance: 1,
            acceptance_threshold: 22.0,
        }
    }
}

/// A component contributing to a candidate's score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreComponent {
    /// Component name (e.g., "Family name").
    pub name: &'static str,
    /// Contribution, negative for penalties.
    pub value: f64,
    /// Human-readable description.
    pub description: String,
}

/// Score of one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore {
    pub id: Iri,
    pub score: f64,
    pub explanation: Vec<ScoreComponent>,
}

impl CandidateScore {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.explanation
            .iter()
            .map(|c| format!("{}: {:+.1}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn is_unknown(value: &str) -> bool {
    value.is_empty() || value == "tuntematon" || value.ends_with("/tuntematon")
}

fn known(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| normalize(v))
        .filter(|v| !is_unknown(v))
        .collect()
}

/// Date agreement between a record and a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAgreement {
    /// One range contains the other.
    Match,
    Overlap,
    /// Disjoint single dates within the typo tolerance.
    Fuzzy,
    Mismatch,
}

fn is_typo(a: &DateRange, b: &DateRange, fuzz: usize) -> bool {
    let a = a.begin.format("%Y-%m-%d").to_string();
    let b = b.begin.format("%Y-%m-%d").to_string();
    levenshtein::distance(a.chars(), b.chars()) <= fuzz
}

/// Compare two date ranges.
pub fn compare_dates(source: &DateRange, candidate: &DateRange, fuzz: usize) -> DateAgreement {
    if source.contains(candidate) || candidate.contains(source) {
        DateAgreement::Match
    } else if source.intersects(candidate) {
        DateAgreement::Overlap
    } else if source.is_point() && candidate.is_point() && is_typo(source, candidate, fuzz) {
        DateAgreement::Fuzzy
    } else {
        DateAgreement::Mismatch
    }
}

/// Scores candidates against a record.
#[derive(Debug, Clone, Default)]
pub struct CandidateScorer {
    config: ScoringConfig,
}

impl CandidateScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a single candidate.
    pub fn score(&self, source: &SourcePerson, candidate: &Candidate) -> CandidateScore {
        let mut components = Vec::new();

        self.name(
            "Family name",
            source.family.as_deref(),
            candidate.family.as_deref(),
            &mut components,
        );
        self.name(
            "Given names",
            source.given.as_deref(),
            candidate.given.as_deref(),
            &mut components,
        );

        for (name, ours, theirs) in [
            ("Rank", &source.ranks, &candidate.ranks),
            ("Occupation", &source.occupations, &candidate.occupations),
            ("Unit", &source.units, &candidate.units),
            ("Birth place", &source.birth_places, &candidate.birth_places),
            ("Death place", &source.death_places, &candidate.death_places),
        ] {
            self.category(name, ours, theirs, &mut components);
        }

        self.dates("Birth date", source.birth, candidate.birth, &mut components);
        self.dates("Death date", source.death, candidate.death, &mut components);

        CandidateScore {
            id: candidate.id.clone(),
            score: components.iter().map(|c| c.value).sum(),
            explanation: components,
        }
    }

    fn name(
        &self,
        name: &'static str,
        ours: Option<&str>,
        theirs: Option<&str>,
        components: &mut Vec<ScoreComponent>,
    ) {
        let (Some(ours), Some(theirs)) = (ours, theirs) else {
            return;
        };
        let (ours, theirs) = (normalize(ours), normalize(theirs));
        if ours.is_empty() || theirs.is_empty() {
            return;
        }
        let similarity = jaro_winkler::similarity(ours.chars(), theirs.chars());
        let floor = self.config.name_similarity_floor;
        if similarity < floor {
            return;
        }
        let scaled = if floor < 1.0 {
            (similarity - floor) / (1.0 - floor)
        } else {
            1.0
        };
        components.push(ScoreComponent {
            name,
            value: scaled * self.config.name_weight,
            description: format!("'{ours}' vs '{theirs}' {:.0}%", similarity * 100.0),
        });
    }

    fn category(
        &self,
        name: &'static str,
        ours: &[String],
        theirs: &[String],
        components: &mut Vec<ScoreComponent>,
    ) {
        let (ours, theirs) = (known(ours), known(theirs));
        if ours.is_empty() || theirs.is_empty() {
            return;
        }
        if let Some(shared) = ours.iter().find(|v| theirs.contains(v)) {
            components.push(ScoreComponent {
                name,
                value: self.config.category_bonus,
                description: format!("both have '{shared}'"),
            });
        } else {
            components.push(ScoreComponent {
                name,
                value: -self.config.category_penalty,
                description: format!("{} vs {}", ours.join(", "), theirs.join(", ")),
            });
        }
    }

    fn dates(
        &self,
        name: &'static str,
        ours: Option<DateRange>,
        theirs: Option<DateRange>,
        components: &mut Vec<ScoreComponent>,
    ) {
        let (Some(ours), Some(theirs)) = (ours, theirs) else {
            return;
        };
        let value = match compare_dates(&ours, &theirs, self.config.date_fuzz_distance) {
            DateAgreement::Match => self.config.date_match_bonus,
            DateAgreement::Overlap => self.config.date_overlap_bonus,
            DateAgreement::Fuzzy => return,
            DateAgreement::Mismatch => -self.config.date_mismatch_penalty,
        };
        components.push(ScoreComponent {
            name,
            value,
            description: format!(
                "{}..{} vs {}..{}",
                ours.begin, ours.end, theirs.begin, theirs.end
            ),
        });
    }

    /// Pick the accepted candidate, if any.
    pub fn select(&self, source: &SourcePerson, candidates: &[Candidate]) -> Option<CandidateScore> {
        let accepted: Vec<CandidateScore> = candidates
            .iter()
            .map(|c| self.score(source, c))
            .inspect(|s| debug!(candidate = %s.id, score = s.score, explanation = %s.explain(), "scored candidate"))
            .filter(|s| s.score > self.config.acceptance_threshold)
            .collect();

        let count = accepted.len();
        let mut best: Option<CandidateScore> = None;
        for score in accepted {
            if best.as_ref().is_none_or(|b| score.score > b.score) {
                best = Some(score);
            }
        }
        if count > 1
            && let Some(best) = &best
        {
            info!(count, chosen = %best.id, score = best.score, "multiple candidates accepted, keeping the highest score");
        }
        best
    }

    /// Accepted candidate identifiers: empty or exactly one.
    pub fn validate(
        &self,
        candidates: &[Candidate],
        query_text: &str,
        source: &SourcePerson,
    ) -> Vec<Iri> {
        match self.select(source, candidates) {
            Some(best) => vec![best.id],
            None => {
                debug!(
                    query = query_text,
                    candidates = candidates.len(),
                    threshold = self.config.acceptance_threshold,
                    "no candidate above the acceptance threshold"
                );
                Vec::new()
            }
        }
    }
}
