//! The linking driver.
//!
//! Literals needing resolution are preprocessed into query strings and sent
//! to the oracle one at a time. Accepted identifiers are written to a new
//! graph; the input graph is never modified. A failed lookup is logged and
//! counted as no match.

use std::fmt;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use pow_model::{Graph, Iri, Triple, attr};

use crate::candidate::{Candidate, parse_candidates};
use crate::oracle::CandidateOracle;
use crate::preprocess::Preprocess;
use crate::score::CandidateScorer;
use crate::source::SourcePerson;

/// Decides which returned candidate, if any, a literal refers to.
pub trait MatchValidator {
    fn validate(&self, candidates: &[Candidate], literal: &str, subject: &Iri) -> Option<Iri>;
}

/// Accepts the oracle's top candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl MatchValidator for FirstCandidate {
    fn validate(&self, candidates: &[Candidate], _literal: &str, _subject: &Iri) -> Option<Iri> {
        candidates.first().map(|c| c.id.clone())
    }
}

/// Scores person candidates against the record they were queried for.
pub struct PersonValidator<'a> {
    scorer: &'a CandidateScorer,
    source: &'a SourcePerson,
}

impl<'a> PersonValidator<'a> {
    pub fn new(scorer: &'a CandidateScorer, source: &'a SourcePerson) -> Self {
        Self { scorer, source }
    }
}

impl MatchValidator for PersonValidator<'_> {
    fn validate(&self, candidates: &[Candidate], literal: &str, subject: &Iri) -> Option<Iri> {
        let best = self
            .scorer
            .validate(candidates, literal, self.source)
            .into_iter()
            .next()?;
        debug!(%subject, query = literal, %best, "person match");
        Some(best)
    }
}

/// One literal-to-resource linking job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTask {
    pub name: String,
    pub source: Iri,
    pub target: Iri,
    pub preprocess: Preprocess,
}

impl LinkTask {
    pub fn ranks() -> Self {
        Self::new("ranks", attr::rank_literal(), attr::rank(), Preprocess::Rank)
    }

    pub fn units() -> Self {
        Self::new("units", attr::unit_literal(), attr::unit(), Preprocess::Unit)
    }

    pub fn camps() -> Self {
        Self::new("camps", attr::location_literal(), attr::location(), Preprocess::Camp)
    }

    pub fn occupations() -> Self {
        Self::new(
            "occupations",
            attr::occupation_literal(),
            attr::occupation(),
            Preprocess::Occupation,
        )
    }

    /// Birth, domicile, residence, capture and death municipalities, each
    /// linked from its literal to its own resource attribute.
    pub fn municipalities() -> Vec<Self> {
        [
            (attr::municipality_of_birth_literal(), attr::municipality_of_birth()),
            (attr::municipality_of_domicile_literal(), attr::municipality_of_domicile()),
            (attr::municipality_of_residence_literal(), attr::municipality_of_residence()),
            (attr::municipality_of_capture_literal(), attr::municipality_of_capture()),
            (attr::municipality_of_death_literal(), attr::municipality_of_death()),
        ]
        .into_iter()
        .map(|(source, target)| Self::new("municipalities", source, target, Preprocess::Trim))
        .collect()
    }

    pub fn new(name: &str, source: Iri, target: Iri, preprocess: Preprocess) -> Self {
        Self {
            name: name.to_string(),
            source,
            target,
            preprocess,
        }
    }
}

/// Counts of lookup outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub accepted: usize,
    pub rejected: usize,
    pub no_results: usize,
    pub failed: usize,
}

impl LinkReport {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected + self.no_results + self.failed
    }

    fn record(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::Accepted(_) => self.accepted += 1,
            Resolution::Rejected => self.rejected += 1,
            Resolution::NoResults => self.no_results += 1,
            Resolution::Failed => self.failed += 1,
        }
    }
}

impl AddAssign for LinkReport {
    fn add_assign(&mut self, other: Self) {
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.no_results += other.no_results;
        self.failed += other.failed;
    }
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} accepted, {} rejected, {} without candidates, {} failed",
            self.accepted, self.rejected, self.no_results, self.failed
        )
    }
}

/// Links and counts produced by a linking run.
#[derive(Debug, Clone, Default)]
pub struct LinkOutcome {
    pub graph: Graph,
    pub report: LinkReport,
}

#[derive(Debug, Clone, PartialEq)]
enum Resolution {
    Accepted(Iri),
    Rejected,
    NoResults,
    Failed,
}

/// Drives lookups against one oracle.
pub struct Linker<O> {
    oracle: O,
}

impl<O: CandidateOracle> Linker<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Resolve every `(subject, task.source, literal)` triple of `graph`.
    pub fn link(
        &self,
        graph: &Graph,
        task: &LinkTask,
        validator: Option<&dyn MatchValidator>,
    ) -> LinkOutcome {
        let span = info_span!("link", task = %task.name);
        let _guard = span.enter();

        let mut outcome = LinkOutcome::default();
        let triples: Vec<&Triple> = graph.matching(None, Some(&task.source), None);
        info!(literals = triples.len(), "linking literals");
        for triple in triples {
            let literal = triple.object.value_str();
            let queries = task.preprocess.queries(literal);
            let resolution = self.resolve(&triple.subject, literal, &queries, validator);
            if let Resolution::Accepted(id) = &resolution {
                outcome
                    .graph
                    .add(triple.subject.clone(), task.target.clone(), id.clone());
            }
            outcome.report.record(&resolution);
        }
        info!(report = %outcome.report, "linking finished");
        outcome
    }

    /// Run several tasks over the same graph, collecting their links into one
    /// graph and one report.
    pub fn link_all(
        &self,
        graph: &Graph,
        tasks: &[LinkTask],
        validator: Option<&dyn MatchValidator>,
    ) -> LinkOutcome {
        let mut outcome = LinkOutcome::default();
        for task in tasks {
            let LinkOutcome { graph: links, report } = self.link(graph, task, validator);
            outcome.graph.merge(links);
            outcome.report += report;
        }
        outcome
    }

    /// Resolve records of `record_class` to person identifiers by scoring
    /// candidates on every comparable field. Records whose personal
    /// information was removed are skipped.
    pub fn link_persons(
        &self,
        graph: &Graph,
        record_class: &Iri,
        scorer: &CandidateScorer,
    ) -> LinkOutcome {
        let span = info_span!("link", task = "persons");
        let _guard = span.enter();

        let mut outcome = LinkOutcome::default();
        let records = graph.instances_of(record_class);
        info!(records = records.len(), "linking persons");
        for person in records {
            let Some(source) = SourcePerson::from_graph(graph, &person) else {
                debug!(%person, "personal information removed, not linking");
                continue;
            };
            let query = source.query_text();
            if query.is_empty() {
                continue;
            }
            let validator = PersonValidator::new(scorer, &source);
            let resolution = self.resolve(
                &person,
                &query,
                std::slice::from_ref(&query),
                Some(&validator as &dyn MatchValidator),
            );
            if let Resolution::Accepted(id) = &resolution {
                outcome
                    .graph
                    .add(person.clone(), attr::person_link(), id.clone());
            }
            outcome.report.record(&resolution);
        }
        info!(report = %outcome.report, "linking finished");
        outcome
    }

    /// Try each query in turn; the first one with candidates decides.
    fn resolve(
        &self,
        subject: &Iri,
        literal: &str,
        queries: &[String],
        validator: Option<&dyn MatchValidator>,
    ) -> Resolution {
        let mut failed = false;
        for query in queries {
            let raw = match self.oracle.query(query) {
                Ok(raw) => raw,
                Err(error) => {
                    warn!(%subject, query = %query, %error, "candidate lookup failed");
                    failed = true;
                    continue;
                }
            };
            let candidates = parse_candidates(&raw);
            if candidates.is_empty() {
                continue;
            }
            let accepted = match validator {
                Some(validator) => validator.validate(&candidates, literal, subject),
                None => FirstCandidate.validate(&candidates, literal, subject),
            };
            return match accepted {
                Some(id) => {
                    debug!(%subject, literal, "matched literal");
                    info!(%subject, %id, "Accepted a match");
                    Resolution::Accepted(id)
                }
                None => {
                    info!(%subject, candidates = candidates.len(), "Match failed validation");
                    Resolution::Rejected
                }
            };
        }
        if failed {
            Resolution::Failed
        } else {
            debug!(%subject, literal, "No match found");
            Resolution::NoResults
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pow_model::vocab::dct_source;
    use pow_model::{RecordId, ReificationId, ReificationReason, Term};

    use super::*;
    use crate::candidate::RawCandidate;
    use crate::oracle::JsonOracle;
    use crate::sources::{link_sources, source_iri};

    fn oracle(entries: &[(&str, &str)]) -> JsonOracle {
        let mut answers: BTreeMap<String, Vec<RawCandidate>> = BTreeMap::new();
        for (query, id) in entries {
            answers
                .entry(query.to_string())
                .or_default()
                .push(RawCandidate::new(*id));
        }
        JsonOracle::new(answers)
    }

    #[test]
    fn links_ranks_into_new_graph() {
        let person = RecordId::new(1).entity();
        let mut graph = Graph::new();
        graph.add(person.clone(), attr::rank_literal(), Term::string("kaart"));
        let linker = Linker::new(oracle(&[("stm", "http://ldf.fi/warsa/actors/ranks/Sotamies")]));

        let outcome = linker.link(&graph, &LinkTask::ranks(), None);
        assert_eq!(outcome.report.accepted, 1);
        assert_eq!(outcome.graph.len(), 1);
        assert!(
            outcome
                .graph
                .value(&person, &attr::rank())
                .is_some_and(|t| t.value_str().ends_with("Sotamies"))
        );
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn unit_falls_back_to_variant_spelling() {
        let person = RecordId::new(2).entity();
        let mut graph = Graph::new();
        graph.add(person.clone(), attr::unit_literal(), Term::string("JR 7"));
        let linker = Linker::new(oracle(&[("JR.7", "http://ldf.fi/warsa/units/unit_7")]));

        let outcome = linker.link(&graph, &LinkTask::units(), None);
        assert_eq!(outcome.report.accepted, 1);
    }

    #[test]
    fn missing_candidates_are_not_errors() {
        let person = RecordId::new(3).entity();
        let mut graph = Graph::new();
        graph.add(person, attr::location_literal(), Term::string("Oranki"));
        let outcome = Linker::new(JsonOracle::default()).link(&graph, &LinkTask::camps(), None);
        assert!(outcome.graph.is_empty());
        assert_eq!(outcome.report.no_results, 1);
        assert_eq!(outcome.report.total(), 1);
    }

    #[test]
    fn municipalities_link_each_role_to_its_own_attribute() {
        let person = RecordId::new(5).entity();
        let mut graph = Graph::new();
        graph.add(person.clone(), attr::municipality_of_birth_literal(), Term::string("Viipuri"));
        graph.add(person.clone(), attr::municipality_of_domicile_literal(), Term::string(" Viipuri "));
        graph.add(person.clone(), attr::municipality_of_residence_literal(), Term::string("Sortavala"));
        graph.add(person.clone(), attr::municipality_of_capture_literal(), Term::string("Suomussalmi"));
        graph.add(person.clone(), attr::municipality_of_death_literal(), Term::string("Tuntematon"));
        let linker = Linker::new(oracle(&[
            ("Viipuri", "http://ldf.fi/warsa/places/municipalities/m_place_1"),
            ("Sortavala", "http://ldf.fi/warsa/places/municipalities/m_place_2"),
            ("Suomussalmi", "http://ldf.fi/warsa/places/municipalities/m_place_3"),
        ]));

        let tasks = LinkTask::municipalities();
        assert_eq!(tasks.len(), 5);
        let outcome = linker.link_all(&graph, &tasks, None);
        assert_eq!(outcome.report.accepted, 4);
        assert_eq!(outcome.report.no_results, 1);
        assert_eq!(outcome.report.total(), 5);

        let linked = |target: Iri| {
            outcome
                .graph
                .value(&person, &target)
                .map(|t| t.value_str().to_string())
        };
        assert_eq!(
            linked(attr::municipality_of_birth()).as_deref(),
            Some("http://ldf.fi/warsa/places/municipalities/m_place_1")
        );
        assert_eq!(
            linked(attr::municipality_of_domicile()).as_deref(),
            Some("http://ldf.fi/warsa/places/municipalities/m_place_1")
        );
        assert_eq!(
            linked(attr::municipality_of_residence()).as_deref(),
            Some("http://ldf.fi/warsa/places/municipalities/m_place_2")
        );
        assert_eq!(
            linked(attr::municipality_of_capture()).as_deref(),
            Some("http://ldf.fi/warsa/places/municipalities/m_place_3")
        );
        assert!(linked(attr::municipality_of_death()).is_none());
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn municipality_matches_go_through_the_validator() {
        let person = RecordId::new(6).entity();
        let mut graph = Graph::new();
        graph.add(person, attr::municipality_of_death_literal(), Term::string("Kirovsk"));
        let linker = Linker::new(oracle(&[(
            "Kirovsk",
            "http://ldf.fi/warsa/places/municipalities/m_place_9",
        )]));

        let outcome = linker.link_all(
            &graph,
            &LinkTask::municipalities(),
            Some(&Reject as &dyn MatchValidator),
        );
        assert_eq!(outcome.report.rejected, 1);
        assert!(outcome.graph.is_empty());
    }

    #[test]
    fn municipality_sources_become_resources_after_linking() {
        let person = RecordId::new(7).entity();
        let attribute = attr::municipality_of_birth_literal();
        let mut graph = Graph::new();
        graph.add(person.clone(), attribute.clone(), Term::string("Viipuri"));
        let statement =
            ReificationId::derive(&person, &attribute, 0, &ReificationReason::Source(0)).iri();
        graph.add(statement.clone(), dct_source(), Term::string("KA"));
        let linker = Linker::new(oracle(&[(
            "Viipuri",
            "http://ldf.fi/warsa/places/municipalities/m_place_1",
        )]));

        let outcome = linker.link_all(&graph, &LinkTask::municipalities(), None);
        assert_eq!(outcome.report.accepted, 1);

        let report = link_sources(&mut graph, &[]);
        assert_eq!(report.rewritten, 1);
        let source = source_iri("KA").unwrap();
        assert_eq!(graph.value(&statement, &dct_source()), Some(&Term::Iri(source.clone())));
        assert_eq!(graph.instances_of(&attr::source_class()), vec![source]);
    }

    struct Reject;

    impl MatchValidator for Reject {
        fn validate(&self, _: &[Candidate], _: &str, _: &Iri) -> Option<Iri> {
            None
        }
    }

    #[test]
    fn validator_can_reject() {
        let person = RecordId::new(4).entity();
        let mut graph = Graph::new();
        graph.add(person, attr::occupation_literal(), Term::string("Maanviljelijä"));
        let linker = Linker::new(oracle(&[("maanviljelijä", "http://ldf.fi/warsa/occupations/o1")]));
        let outcome = linker.link(&graph, &LinkTask::occupations(), Some(&Reject as &dyn MatchValidator));
        assert_eq!(outcome.report.rejected, 1);
        assert!(outcome.graph.is_empty());
    }
}
