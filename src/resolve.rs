//! Cross-reference resolution over a loaded site graph.
//!
//! The resolver derives the flattened, identifier-keyed views the render
//! pipeline reads: constant-time node lookup, per-node applicable rules,
//! and the technique ↔ success criterion association graph. Everything
//! here is computed once and immutable thereafter.
//!
//! Resolution distinguishes two failure classes. Structural integrity is
//! the builders' job and has already been enforced when this module runs.
//! Citation integrity is best-effort: a rule citing an identifier that is
//! not in the flattened maps loses that one citation, with a warning
//! naming the rule and the identifier; valid citations are kept.

use std::collections::HashMap;

use petgraph::{graphmap::DiGraphMap, Direction};
use tracing::warn;

use crate::{
    domain::{Guideline, Rule, SuccessCriterion, Technique, Technology},
    ingest::SiteGraph,
};

/// Immutable cross-reference tables derived from a [`SiteGraph`] and an
/// injected rule-mapping table.
#[derive(Debug)]
pub struct CrossRefs<'a> {
    guidelines: HashMap<String, &'a Guideline>,
    criteria: HashMap<String, &'a SuccessCriterion>,
    techniques: HashMap<String, (Technology, &'a Technique)>,
    rules: HashMap<String, Vec<&'a Rule>>,

    /// Identifier interner backing the association graph. Node indices
    /// are positions in `nodes`.
    nodes: Vec<String>,
    indices: HashMap<String, usize>,

    /// Association edges point from technique to success criterion.
    citations: DiGraphMap<usize, ()>,

    dropped: usize,
}

impl<'a> CrossRefs<'a> {
    /// Builds the cross-reference tables.
    ///
    /// The rule table is consumed as a read-only slice; pass an empty
    /// slice to resolve a graph without rule filters.
    #[must_use]
    pub fn resolve(graph: &'a SiteGraph, rules: &'a [Rule]) -> Self {
        let mut guidelines = HashMap::new();
        let mut criteria = HashMap::new();
        for guideline in graph.taxonomy().guidelines() {
            guidelines.insert(guideline.id.clone(), guideline);
        }
        for criterion in graph.taxonomy().success_criteria() {
            criteria.insert(criterion.id.clone(), criterion);
        }

        let mut techniques = HashMap::new();
        for (technology, list) in graph.catalog().iter() {
            for technique in list {
                techniques.insert(technique.id.to_string(), (technology, technique));
            }
        }

        let mut refs = Self {
            guidelines,
            criteria,
            techniques,
            rules: HashMap::new(),
            nodes: Vec::new(),
            indices: HashMap::new(),
            citations: DiGraphMap::new(),
            dropped: 0,
        };

        for rule in rules {
            refs.apply_rule(rule);
        }

        refs
    }

    /// Applies one rule record: registers it against every node it cites
    /// and records technique → criterion association edges.
    fn apply_rule(&mut self, rule: &'a Rule) {
        let mut cited_criteria = Vec::new();
        for id in &rule.success_criteria {
            let is_criterion = self.criteria.contains_key(id);
            if is_criterion || self.guidelines.contains_key(id) {
                self.rules.entry(id.clone()).or_default().push(rule);
                if is_criterion {
                    cited_criteria.push(id.as_str());
                }
            } else {
                warn!("rule '{}' cites unknown criterion '{id}'; citation dropped", rule.id);
                self.dropped += 1;
            }
        }

        let mut cited_techniques = Vec::new();
        for id in &rule.wcag_techniques {
            if self.techniques.contains_key(id) {
                self.rules.entry(id.clone()).or_default().push(rule);
                cited_techniques.push(id.as_str());
            } else {
                warn!("rule '{}' cites unknown technique '{id}'; citation dropped", rule.id);
                self.dropped += 1;
            }
        }

        for technique in &cited_techniques {
            for criterion in &cited_criteria {
                let from = self.intern(technique);
                let to = self.intern(criterion);
                self.citations.add_edge(from, to, ());
            }
        }
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&index) = self.indices.get(id) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(id.to_string());
        self.indices.insert(id.to_string(), index);
        index
    }

    /// Looks up a guideline by identifier.
    #[must_use]
    pub fn guideline(&self, id: &str) -> Option<&'a Guideline> {
        self.guidelines.get(id).copied()
    }

    /// Looks up a success criterion by identifier.
    #[must_use]
    pub fn criterion(&self, id: &str) -> Option<&'a SuccessCriterion> {
        self.criteria.get(id).copied()
    }

    /// Looks up a technique and the technology it belongs to.
    #[must_use]
    pub fn technique(&self, id: &str) -> Option<(Technology, &'a Technique)> {
        self.techniques.get(id).copied()
    }

    /// Iterates the identifiers of the flattened success criterion map.
    pub fn criterion_ids(&self) -> impl Iterator<Item = &str> {
        self.criteria.keys().map(String::as_str)
    }

    /// The applicable rules for a taxonomy node or technique, in rule
    /// table order.
    #[must_use]
    pub fn rules_for(&self, id: &str) -> &[&'a Rule] {
        self.rules.get(id).map_or(&[], Vec::as_slice)
    }

    /// The success criteria associated with a technique, ordered by their
    /// positional code.
    #[must_use]
    pub fn criteria_for_technique(&self, id: &str) -> Vec<&'a SuccessCriterion> {
        let Some(&index) = self.indices.get(id) else {
            return Vec::new();
        };

        let mut criteria: Vec<&SuccessCriterion> = self
            .citations
            .neighbors_directed(index, Direction::Outgoing)
            .filter_map(|neighbor| {
                self.criteria
                    .get(self.nodes[neighbor].as_str())
                    .copied()
            })
            .collect();

        criteria.sort_by_key(|criterion| num_key(&criterion.num));
        criteria
    }

    /// The techniques whose rules cite the given success criterion,
    /// ordered by numeric suffix and then prefix.
    #[must_use]
    pub fn techniques_for_criterion(&self, id: &str) -> Vec<&'a Technique> {
        let Some(&index) = self.indices.get(id) else {
            return Vec::new();
        };

        let mut techniques: Vec<&Technique> = self
            .citations
            .neighbors_directed(index, Direction::Incoming)
            .filter_map(|neighbor| {
                self.techniques
                    .get(self.nodes[neighbor].as_str())
                    .map(|&(_, technique)| technique)
            })
            .collect();

        techniques
            .sort_by_key(|technique| (technique.id.number(), technique.id.prefix().to_string()));
        techniques
    }

    /// The number of citations dropped during resolution.
    #[must_use]
    pub const fn dropped_citations(&self) -> usize {
        self.dropped
    }
}

/// Sort key for positional codes: `"1.10.2"` orders after `"1.2.1"`.
fn num_key(num: &str) -> Vec<u32> {
    num.split('.')
        .map(|part| part.parse().unwrap_or_default())
        .collect()
}

impl SiteGraph {
    /// Resolves cross-references against an injected rule table.
    #[must_use]
    pub fn resolve<'a>(&'a self, rules: &'a [Rule]) -> CrossRefs<'a> {
        CrossRefs::resolve(self, rules)
    }
}
