//! Privacy pruning of person records.
//!
//! Records are classified by death and birth dates. Health information is
//! removed from everyone who died recently or may still be alive; personal
//! information is additionally removed from those who may be alive. A family
//! name common enough in the census is kept, any other is replaced with a
//! placeholder name. Removing a triple also removes its reification nodes.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Months, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use pow_model::vocab::{self, attr};
use pow_model::{Graph, Iri, Term, Triple};
use pow_transform::convert_date;

use crate::config::PruneOptions;

pub const PLACEHOLDER_FAMILY_NAME: &str = "Tuntematon";
pub const PLACEHOLDER_GIVEN_NAMES: &str = "Sotilas";

fn health_attributes() -> [Iri; 2] {
    [attr::cause_of_death(), attr::additional_information()]
}

fn personal_attributes() -> Vec<Iri> {
    vec![
        attr::given_names(),
        attr::original_name(),
        vocab::pref_label(),
        attr::date_of_birth(),
        attr::date_of_going_mia(),
        attr::place_of_going_mia_literal(),
        attr::date_of_capture(),
        attr::date_of_return(),
        attr::municipality_of_birth_literal(),
        attr::municipality_of_domicile_literal(),
        attr::municipality_of_residence_literal(),
        attr::municipality_of_death_literal(),
        attr::photograph(),
        attr::radio_report(),
        attr::recording(),
        attr::finnish_return_interrogation_file(),
    ]
}

/// Read a possibly partial date.
///
/// Placeholder characters are stripped from both ends. When the rest does
/// not parse, the last four characters are taken as a year and the last day
/// of that year is used.
pub fn cast_date(raw: &str) -> Option<NaiveDate> {
    let stripped = raw.trim().trim_matches(|c| matches!(c, 'X' | 'x' | '-'));
    if let Ok(date) = NaiveDate::parse_from_str(stripped, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(date) = convert_date(stripped).as_date() {
        return Some(date);
    }
    let year = stripped
        .char_indices()
        .rev()
        .nth(3)
        .and_then(|(i, _)| stripped[i..].parse::<i32>().ok())
        .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31));
    if year.is_none() {
        warn!(value = raw, "bad date");
    }
    year
}

fn term_date(term: &Term) -> Option<NaiveDate> {
    term.as_literal()
        .and_then(pow_model::Literal::as_date)
        .or_else(|| cast_date(term.value_str()))
}

/// Privacy class of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyClass {
    Public,
    /// Died within the public period, or has a death date that does not parse.
    DiedRecently,
    /// No death information and born late enough to be alive.
    PossiblyAlive,
}

/// Classify a person record as of `today`.
pub fn classify(graph: &Graph, person: &Iri, options: &PruneOptions, today: NaiveDate) -> PrivacyClass {
    let mut latest: Option<NaiveDate> = None;
    let mut undated = false;
    let mut count = 0;
    for term in graph.objects(person, &attr::date_of_death()) {
        count += 1;
        match term_date(term) {
            Some(date) => latest = latest.max(Some(date)),
            None => undated = true,
        }
    }
    if count > 1 {
        debug!(%person, "multiple death dates, using the latest");
    }

    let cutoff = today
        .checked_sub_months(Months::new(options.public_after_years * 12))
        .unwrap_or(NaiveDate::MIN);
    if undated || latest.is_some_and(|date| date >= cutoff) {
        return PrivacyClass::DiedRecently;
    }
    if latest.is_none() {
        let born = graph
            .value(person, &attr::date_of_birth())
            .and_then(term_date);
        if born.is_some_and(|date| date >= options.possibly_alive_born_after) {
            return PrivacyClass::PossiblyAlive;
        }
    }
    PrivacyClass::Public
}

/// Family name frequencies from an external name census.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCensus {
    counts: BTreeMap<String, u64>,
}

impl NameCensus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family_name: impl Into<String>, count: u64) {
        *self.counts.entry(family_name.into()).or_default() += count;
    }

    pub fn count(&self, family_name: &str) -> u64 {
        self.counts.get(family_name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Family names that do not identify a person.
    ///
    /// A name is common when the census count reaches the minimum and the
    /// census count plus occurrences in the dataset reaches the threshold.
    pub fn common_names(
        &self,
        dataset_counts: &BTreeMap<String, u64>,
        options: &PruneOptions,
    ) -> BTreeSet<String> {
        self.counts
            .iter()
            .filter(|(_, count)| **count >= options.common_name_min_census)
            .filter(|(name, count)| {
                let in_dataset = dataset_counts.get(*name).copied().unwrap_or(0);
                **count + in_dataset >= options.common_name_threshold
            })
            .map(|(name, count)| {
                debug!(name = %name, census = count, "common family name");
                name.clone()
            })
            .collect()
    }
}

impl FromIterator<(String, u64)> for NameCensus {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut census = Self::new();
        for (name, count) in iter {
            census.insert(name, count);
        }
        census
    }
}

/// Counts of a pruning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    pub public: usize,
    pub died_recently: usize,
    pub possibly_alive: usize,
    /// Records skipped because personal information was already removed.
    pub already_pruned: usize,
    pub removed_triples: usize,
}

fn triples_with(graph: &Graph, person: &Iri, predicates: &[Iri]) -> Vec<Triple> {
    graph
        .about(person)
        .filter(|t| predicates.contains(&t.predicate))
        .cloned()
        .collect()
}

fn hide_health_information(graph: &mut Graph, person: &Iri) -> usize {
    let triples = triples_with(graph, person, &health_attributes());
    let removed = graph.remove_with_reifications(&triples);
    graph.set_flag(person, attr::hide_documents());
    removed
}

fn hide_personal_information(graph: &mut Graph, person: &Iri, common: &BTreeSet<String>) -> usize {
    let mut triples = triples_with(graph, person, &personal_attributes());
    let family_name = graph
        .value(person, &attr::family_name())
        .map(|t| t.value_str().to_string());
    let keep_family = family_name.as_ref().is_some_and(|name| common.contains(name));
    if !keep_family {
        debug!(%person, "hiding family name");
        triples.extend(triples_with(graph, person, &[attr::family_name()]));
    }

    let removed = graph.remove_with_reifications(&triples);

    if !keep_family {
        graph.add(
            person.clone(),
            attr::family_name(),
            Term::string(PLACEHOLDER_FAMILY_NAME),
        );
        graph.add(
            person.clone(),
            attr::given_names(),
            Term::string(PLACEHOLDER_GIVEN_NAMES),
        );
        graph.add(
            person.clone(),
            vocab::pref_label(),
            Term::string(format!("{PLACEHOLDER_FAMILY_NAME}, {PLACEHOLDER_GIVEN_NAMES}")),
        );
    }
    graph.set_flag(person, attr::personal_information_removed());
    removed
}

/// Family name occurrences among records of the graph.
pub fn dataset_family_names(graph: &Graph) -> BTreeMap<String, u64> {
    let family = attr::family_name();
    let mut counts = BTreeMap::new();
    for triple in graph.matching(None, Some(&family), None) {
        *counts.entry(triple.object.value_str().to_string()).or_default() += 1;
    }
    counts
}

/// Prune every record of `record_class` in place.
///
/// Running this on an already pruned graph changes nothing.
pub fn prune(
    graph: &mut Graph,
    record_class: &Iri,
    census: &NameCensus,
    options: &PruneOptions,
    today: NaiveDate,
) -> PruneReport {
    let common = census.common_names(&dataset_family_names(graph), options);
    let persons = graph.instances_of(record_class);
    info!(
        records = persons.len(),
        common_names = common.len(),
        %today,
        "pruning person records"
    );

    let mut report = PruneReport::default();
    let mut died_recently = Vec::new();
    let mut possibly_alive = Vec::new();
    for person in persons {
        if graph.has_true_flag(&person, &attr::personal_information_removed()) {
            report.already_pruned += 1;
            continue;
        }
        match classify(graph, &person, options, today) {
            PrivacyClass::Public => report.public += 1,
            PrivacyClass::DiedRecently => died_recently.push(person),
            PrivacyClass::PossiblyAlive => possibly_alive.push(person),
        }
    }

    for person in died_recently.iter().chain(&possibly_alive) {
        debug!(%person, "hiding health information");
        report.removed_triples += hide_health_information(graph, person);
    }
    for person in &possibly_alive {
        debug!(%person, "hiding personal information");
        report.removed_triples += hide_personal_information(graph, person, &common);
    }

    report.died_recently = died_recently.len();
    report.possibly_alive = possibly_alive.len();
    info!(
        public = report.public,
        died_recently = report.died_recently,
        possibly_alive = report.possibly_alive,
        already_pruned = report.already_pruned,
        "pruned person records"
    );
    report
}

#[cfg(test)]
mod tests {
    use pow_model::{Literal, RecordId};

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2017, 6, 1)
    }

    fn person(graph: &mut Graph, n: u64, family: &str) -> Iri {
        let person = RecordId::new(n).entity();
        graph.add(person.clone(), vocab::rdf_type(), attr::prisoner_record());
        graph.add(person.clone(), attr::family_name(), Term::string(family));
        graph.add(person.clone(), attr::given_names(), Term::string("Matti"));
        graph.add(person.clone(), vocab::pref_label(), Term::string(format!("{family}, Matti")));
        person
    }

    #[test]
    fn cast_date_variants() {
        assert_eq!(cast_date("1942-10-13"), Some(ymd(1942, 10, 13)));
        assert_eq!(cast_date("13.10.1942"), Some(ymd(1942, 10, 13)));
        assert_eq!(cast_date("xx.11.1942"), Some(ymd(1942, 12, 31)));
        assert_eq!(cast_date("kesällä"), None);
    }

    #[test]
    fn classification() {
        let options = PruneOptions::default();
        let mut graph = Graph::new();

        let old = person(&mut graph, 1, "Aho");
        graph.add(old.clone(), attr::date_of_death(), Literal::date(ymd(1943, 1, 1)));
        assert_eq!(classify(&graph, &old, &options, today()), PrivacyClass::Public);

        let recent = person(&mut graph, 2, "Aho");
        graph.add(recent.clone(), attr::date_of_death(), Literal::date(ymd(1943, 1, 1)));
        graph.add(recent.clone(), attr::date_of_death(), Literal::date(ymd(1990, 1, 1)));
        assert_eq!(classify(&graph, &recent, &options, today()), PrivacyClass::DiedRecently);

        let unknown = person(&mut graph, 3, "Aho");
        graph.add(unknown.clone(), attr::date_of_death(), Term::string("kesällä"));
        assert_eq!(classify(&graph, &unknown, &options, today()), PrivacyClass::DiedRecently);

        let young = person(&mut graph, 4, "Aho");
        graph.add(young.clone(), attr::date_of_birth(), Literal::date(ymd(1920, 5, 5)));
        assert_eq!(classify(&graph, &young, &options, today()), PrivacyClass::PossiblyAlive);

        let older = person(&mut graph, 5, "Aho");
        graph.add(older.clone(), attr::date_of_birth(), Literal::date(ymd(1905, 5, 5)));
        assert_eq!(classify(&graph, &older, &options, today()), PrivacyClass::Public);
    }

    #[test]
    fn common_names_need_census_and_threshold() {
        let census: NameCensus = [
            ("Virtanen".to_string(), 10),
            ("Aho".to_string(), 2),
            ("Kulju".to_string(), 1),
        ]
        .into_iter()
        .collect();
        let dataset = BTreeMap::from([("Aho".to_string(), 2), ("Kulju".to_string(), 5)]);
        let common = census.common_names(&dataset, &PruneOptions::default());
        assert_eq!(
            common,
            BTreeSet::from(["Aho".to_string(), "Virtanen".to_string()])
        );
    }

    #[test]
    fn possibly_alive_gets_placeholder_name() {
        let mut graph = Graph::new();
        let p = person(&mut graph, 1, "Harvinainen");
        graph.add(p.clone(), attr::date_of_birth(), Literal::date(ymd(1920, 5, 5)));
        graph.add(p.clone(), attr::cause_of_death(), Term::string("tauti"));

        let report = prune(
            &mut graph,
            &attr::prisoner_record(),
            &NameCensus::new(),
            &PruneOptions::default(),
            today(),
        );
        assert_eq!(report.possibly_alive, 1);
        assert_eq!(graph.literal_values(&p, &attr::family_name()), vec![PLACEHOLDER_FAMILY_NAME]);
        assert_eq!(graph.literal_values(&p, &attr::given_names()), vec![PLACEHOLDER_GIVEN_NAMES]);
        assert_eq!(
            graph.literal_values(&p, &vocab::pref_label()),
            vec!["Tuntematon, Sotilas"]
        );
        assert!(graph.value(&p, &attr::date_of_birth()).is_none());
        assert!(graph.has_true_flag(&p, &attr::personal_information_removed()));
        assert!(graph.has_true_flag(&p, &attr::hide_documents()));
    }

    #[test]
    fn common_family_name_is_kept() {
        let mut graph = Graph::new();
        let p = person(&mut graph, 1, "Virtanen");
        graph.add(p.clone(), attr::date_of_birth(), Literal::date(ymd(1920, 5, 5)));
        let census: NameCensus = [("Virtanen".to_string(), 100)].into_iter().collect();

        prune(&mut graph, &attr::prisoner_record(), &census, &PruneOptions::default(), today());
        assert_eq!(graph.literal_values(&p, &attr::family_name()), vec!["Virtanen"]);
        assert!(graph.value(&p, &attr::given_names()).is_none());
        assert!(graph.value(&p, &vocab::pref_label()).is_none());
    }
}
