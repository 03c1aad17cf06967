//! Primary pattern engine interface.
//!
//! [`PatternEngine`] compiles [`CycleDeclaration`]s into ready-to-evaluate
//! filters and groupings and applies them to batches of tag identifiers.
//! It holds no state across calls apart from its configuration, so one
//! engine and one compiled cycle can be shared by any number of threads.

use crate::config::EngineConfig;
use crate::declaration::{CycleDeclaration, FilterDeclaration, GroupDeclaration};
use crate::error::{AleError, Result};
use crate::pattern::{PatternUsage, TagPattern};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Compiled include/exclude filter.
#[derive(Debug, Clone, Default)]
pub struct CompiledFilter {
    include: Vec<TagPattern>,
    exclude: Vec<TagPattern>,
}

impl CompiledFilter {
    pub fn compile(declaration: &FilterDeclaration) -> Result<Self> {
        Ok(Self {
            include: parse_all(&declaration.include, PatternUsage::Filter)?,
            exclude: parse_all(&declaration.exclude, PatternUsage::Filter)?,
        })
    }

    pub fn include_patterns(&self) -> &[TagPattern] {
        &self.include
    }

    pub fn exclude_patterns(&self) -> &[TagPattern] {
        &self.exclude
    }

    /// True if the tag identifier survives this filter.
    pub fn accepts(&self, tag_uri: &str) -> bool {
        self.accepts_tag(parse_read(tag_uri).as_ref())
    }

    /// [`CompiledFilter::accepts`] for a read parsed once up front. `None`
    /// stands for a read that is not a valid tag identifier and therefore
    /// matches no pattern.
    pub fn accepts_tag(&self, tag: Option<&TagPattern>) -> bool {
        let matches = |pattern: &TagPattern| tag.is_some_and(|tag| pattern.matches_tag(tag));

        let included = self.include.is_empty() || self.include.iter().any(matches);
        included && !self.exclude.iter().any(matches)
    }
}

/// Compiled group patterns.
#[derive(Debug, Clone, Default)]
pub struct CompiledGrouping {
    patterns: Vec<TagPattern>,
}

impl CompiledGrouping {
    pub fn compile(declaration: &GroupDeclaration, config: &EngineConfig) -> Result<Self> {
        let patterns = parse_all(&declaration.patterns, PatternUsage::Group)?;

        for (i, first) in patterns.iter().enumerate() {
            for second in &patterns[i + 1..] {
                if first.is_disjoint(second) {
                    continue;
                }
                if config.validation.require_disjoint_groups {
                    return Err(AleError::OverlappingGroups {
                        first: first.to_string(),
                        second: second.to_string(),
                    });
                }
                warn!(
                    first = %first,
                    second = %second,
                    "group patterns overlap, first match wins"
                );
            }
        }

        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[TagPattern] {
        &self.patterns
    }

    /// Group name of the first group pattern claiming the tag. `None` means
    /// the default group.
    pub fn group_name(&self, tag_uri: &str) -> Option<String> {
        parse_read(tag_uri).and_then(|tag| self.group_name_for(&tag))
    }

    pub fn group_name_for(&self, tag: &TagPattern) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.group_name_for(tag))
    }
}

/// Outcome of evaluating one read against a compiled cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Classification {
    Rejected,
    /// `group` is `None` for the default group.
    Accepted { group: Option<String> },
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedTag {
    pub tag: String,
    #[serde(flatten)]
    pub classification: Classification,
}

/// Reads of a batch bucketed by group name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedTags {
    pub groups: BTreeMap<String, Vec<String>>,
    pub default_group: Vec<String>,
    pub rejected: usize,
}

impl GroupedTags {
    pub fn accepted(&self) -> usize {
        self.default_group.len() + self.groups.values().map(Vec::len).sum::<usize>()
    }
}

/// A compiled filter plus grouping, ready for evaluation.
#[derive(Debug, Clone, Default)]
pub struct CompiledCycle {
    name: String,
    filter: CompiledFilter,
    grouping: CompiledGrouping,
}

impl CompiledCycle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> &CompiledFilter {
        &self.filter
    }

    pub fn grouping(&self) -> &CompiledGrouping {
        &self.grouping
    }

    /// Filter and group a single read. The read is parsed once.
    pub fn classify(&self, tag_uri: &str) -> Classification {
        let tag = parse_read(tag_uri);

        if !self.filter.accepts_tag(tag.as_ref()) {
            return Classification::Rejected;
        }

        Classification::Accepted {
            group: tag.and_then(|tag| self.grouping.group_name_for(&tag)),
        }
    }
}

/// Stateless facade over pattern parsing and evaluation.
///
/// # Examples
///
/// ```rust
/// use ale_engine::{CycleDeclaration, PatternEngine};
///
/// let engine = PatternEngine::new();
/// let cycle = engine.compile(
///     &CycleDeclaration::new("dock-door")
///         .include("urn:epc:pat:sgtin-96:*.*.50.*")
///         .group("urn:epc:pat:sgtin-96:*.X.*.*"),
/// )?;
///
/// let reads = [
///     "urn:epc:tag:sgtin-96:3.0614141.50.1",
///     "urn:epc:tag:sgtin-96:3.0614141.51.2",
/// ];
/// let grouped = engine.group_batch(&cycle, &reads);
/// assert_eq!(grouped.rejected, 1);
/// assert_eq!(grouped.groups["urn:epc:pat:sgtin-96:*.0614141.*.*"].len(), 1);
/// # Ok::<(), ale_engine::AleError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternEngine {
    config: EngineConfig,
}

impl PatternEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn parse_pattern(&self, pattern: &str, usage: PatternUsage) -> Result<TagPattern> {
        TagPattern::parse(pattern, usage)
    }

    /// Parse and validate every pattern of a declaration.
    ///
    /// The first invalid pattern aborts compilation. Group patterns must be
    /// pairwise disjoint unless the configuration waives it.
    pub fn compile(&self, declaration: &CycleDeclaration) -> Result<CompiledCycle> {
        let filter = CompiledFilter::compile(&declaration.filter)?;
        let grouping = CompiledGrouping::compile(&declaration.group, &self.config)?;

        debug!(
            name = %declaration.name,
            include = filter.include.len(),
            exclude = filter.exclude.len(),
            groups = grouping.patterns.len(),
            "compiled cycle declaration"
        );

        Ok(CompiledCycle {
            name: declaration.name.clone(),
            filter,
            grouping,
        })
    }

    /// Reads that are members of `filter`, in input order.
    pub fn filter_reads<'a, S>(&self, filter: &TagPattern, reads: &'a [S]) -> Vec<&'a str>
    where
        S: AsRef<str> + Sync,
    {
        self.map_batch(reads, |read| filter.is_member(read).then_some(read))
            .into_iter()
            .flatten()
            .collect()
    }

    /// Classify every read of a batch, in input order.
    pub fn classify_batch<S>(&self, cycle: &CompiledCycle, reads: &[S]) -> Vec<ClassifiedTag>
    where
        S: AsRef<str> + Sync,
    {
        self.map_batch(reads, |read| ClassifiedTag {
            tag: read.to_string(),
            classification: cycle.classify(read),
        })
    }

    /// Classify a batch and bucket the accepted reads by group name.
    pub fn group_batch<S>(&self, cycle: &CompiledCycle, reads: &[S]) -> GroupedTags
    where
        S: AsRef<str> + Sync,
    {
        let mut grouped = GroupedTags::default();

        for classified in self.classify_batch(cycle, reads) {
            match classified.classification {
                Classification::Rejected => grouped.rejected += 1,
                Classification::Accepted { group: Some(name) } => {
                    grouped.groups.entry(name).or_default().push(classified.tag)
                }
                Classification::Accepted { group: None } => {
                    grouped.default_group.push(classified.tag)
                }
            }
        }

        grouped
    }

    fn map_batch<'a, S, T, F>(&self, reads: &'a [S], f: F) -> Vec<T>
    where
        S: AsRef<str> + Sync,
        T: Send,
        F: Fn(&'a str) -> T + Sync + Send,
    {
        if self.config.should_parallelize(reads.len()) {
            trace!(reads = reads.len(), "evaluating batch in parallel");
            reads.par_iter().map(|read| f(read.as_ref())).collect()
        } else {
            trace!(reads = reads.len(), "evaluating batch sequentially");
            reads.iter().map(|read| f(read.as_ref())).collect()
        }
    }
}

fn parse_all(patterns: &[String], usage: PatternUsage) -> Result<Vec<TagPattern>> {
    patterns
        .iter()
        .map(|pattern| TagPattern::parse(pattern, usage))
        .collect()
}

fn parse_read(tag_uri: &str) -> Option<TagPattern> {
    match TagPattern::parse(tag_uri, PatternUsage::Tag) {
        Ok(tag) => Some(tag),
        Err(err) => {
            debug!(tag = tag_uri, error = %err, "read is not a valid tag identifier");
            None
        }
    }
}
