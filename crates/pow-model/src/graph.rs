//! Set-semantics triple store.
//!
//! Triples are kept in a `BTreeSet` ordered subject-predicate-object, which
//! makes subject lookups a range scan and gives deterministic iteration
//! order. A second index keyed by object serves reverse lookups
//! (`subjects(p, o)`), used for type queries and reification discovery.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::term::{Iri, Literal, Term};
use crate::vocab;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Iri, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    spo: BTreeSet<Triple>,
    by_object: BTreeMap<Term, BTreeSet<(Iri, Iri)>>,
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.spo == other.spo
    }
}

impl Eq for Graph {}

fn min_iri() -> Iri {
    Iri::from_trusted(String::new())
}

fn subject_floor(subject: &Iri) -> Triple {
    Triple {
        subject: subject.clone(),
        predicate: min_iri(),
        object: Term::Iri(min_iri()),
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a triple. Returns `false` when it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.spo.contains(&triple) {
            return false;
        }
        self.by_object
            .entry(triple.object.clone())
            .or_default()
            .insert((triple.predicate.clone(), triple.subject.clone()));
        self.spo.insert(triple)
    }

    pub fn add(&mut self, subject: Iri, predicate: Iri, object: impl Into<Term>) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    pub fn remove(&mut self, triple: &Triple) -> bool {
        if !self.spo.remove(triple) {
            return false;
        }
        if let Some(entries) = self.by_object.get_mut(&triple.object) {
            entries.remove(&(triple.predicate.clone(), triple.subject.clone()));
            if entries.is_empty() {
                self.by_object.remove(&triple.object);
            }
        }
        true
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.spo.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.spo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spo.is_empty()
    }

    /// Triples in subject-predicate-object order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.spo.iter()
    }

    /// Add every triple of `other` to this graph.
    pub fn merge(&mut self, other: Graph) {
        for triple in other.spo {
            self.insert(triple);
        }
    }

    /// All triples with the given subject.
    pub fn about<'a>(&'a self, subject: &'a Iri) -> impl Iterator<Item = &'a Triple> + 'a {
        self.spo
            .range(subject_floor(subject)..)
            .take_while(move |t| &t.subject == subject)
    }

    pub fn objects<'a>(
        &'a self,
        subject: &'a Iri,
        predicate: &'a Iri,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.about(subject)
            .filter(move |t| &t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// First object for `(subject, predicate)` in graph order.
    pub fn value<'a>(&'a self, subject: &'a Iri, predicate: &'a Iri) -> Option<&'a Term> {
        self.objects(subject, predicate).next()
    }

    /// Subjects of triples `(?, predicate, object)`, in IRI order.
    pub fn subjects(&self, predicate: &Iri, object: &Term) -> Vec<Iri> {
        self.by_object
            .get(object)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(p, _)| p == predicate)
                    .map(|(_, s)| s.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Triples matching a pattern; `None` matches anything.
    pub fn matching<'a>(
        &'a self,
        subject: Option<&'a Iri>,
        predicate: Option<&'a Iri>,
        object: Option<&'a Term>,
    ) -> Vec<&'a Triple> {
        let keep = move |t: &&Triple| {
            predicate.is_none_or(|p| &t.predicate == p) && object.is_none_or(|o| &t.object == o)
        };
        match subject {
            Some(subject) => self.about(subject).filter(keep).collect(),
            None => self.spo.iter().filter(keep).collect(),
        }
    }

    /// Instances of `class` via `rdf:type`.
    pub fn instances_of(&self, class: &Iri) -> Vec<Iri> {
        self.subjects(&vocab::rdf_type(), &Term::Iri(class.clone()))
    }

    /// Reification node IRIs describing `triple`.
    pub fn reifications_of(&self, triple: &Triple) -> Vec<Iri> {
        let by_subject = self.subjects(&vocab::rdf_subject(), &Term::Iri(triple.subject.clone()));
        by_subject
            .into_iter()
            .filter(|node| {
                self.value(node, &vocab::rdf_predicate())
                    .is_some_and(|p| p == &Term::Iri(triple.predicate.clone()))
                    && self
                        .value(node, &vocab::rdf_object())
                        .is_some_and(|o| o == &triple.object)
            })
            .collect()
    }

    /// Remove triples together with the reification nodes that describe them.
    pub fn remove_with_reifications(&mut self, triples: &[Triple]) -> usize {
        let mut removed = 0;
        for triple in triples {
            for node in self.reifications_of(triple) {
                let owned: Vec<Triple> = self.about(&node).cloned().collect();
                for t in &owned {
                    self.remove(t);
                }
            }
            if self.remove(triple) {
                removed += 1;
            }
        }
        removed
    }

    /// Triples present here but not in `other`.
    pub fn difference<'a>(&'a self, other: &'a Graph) -> Vec<&'a Triple> {
        self.spo.difference(&other.spo).collect()
    }

    /// Graph isomorphism. Graphs here are blank-node free, so this is set equality.
    pub fn is_isomorphic(&self, other: &Graph) -> bool {
        self == other
    }

    /// Literal lexical values for `(subject, predicate)`, in graph order.
    pub fn literal_values(&self, subject: &Iri, predicate: &Iri) -> Vec<String> {
        self.objects(subject, predicate)
            .filter_map(Term::as_literal)
            .map(|l| l.lexical().to_string())
            .collect()
    }

    pub fn has_true_flag(&self, subject: &Iri, predicate: &Iri) -> bool {
        self.objects(subject, predicate)
            .filter_map(Term::as_literal)
            .any(|l| l.as_bool() == Some(true) || l.lexical() == "true")
    }

    pub fn set_flag(&mut self, subject: &Iri, predicate: Iri) {
        self.add(subject.clone(), predicate, Literal::boolean(true));
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        for triple in iter {
            graph.insert(triple);
        }
        graph
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::collections::btree_set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.spo.into_iter()
    }
}
