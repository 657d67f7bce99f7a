use crate::drivers::{DriverDescriptor, DriverDetail, DriverValueSet, GeneticDriver};
use crate::types::TraitValue;
use log::{error, warn};
use std::fmt;

/// One class of a summary and how many values fell into it
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub description: String,
    pub total: usize,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.description, self.total)
    }
}

/// Counts per named class, indexed by the floor of the value
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteSummary {
    pub classes: Vec<Classification>,
    pub invalid_classifications: usize,
}

impl DiscreteSummary {
    pub fn new<S: Into<String>>(descriptions: impl IntoIterator<Item = S>) -> Self {
        Self {
            classes: descriptions
                .into_iter()
                .map(|description| Classification {
                    description: description.into(),
                    total: 0,
                })
                .collect(),
            invalid_classifications: 0,
        }
    }

    pub fn classify(&mut self, value: f32) {
        let index = value.floor();
        if index < 0.0 || !index.is_finite() || index as usize >= self.classes.len() {
            error!("value {} is outside of initialized range of values", value);
            self.invalid_classifications += 1;
            return;
        }
        self.classes[index as usize].total += 1;
    }

    /// Merge classes sharing a description, in order of first appearance
    pub fn deduped_classes(&self) -> Vec<Classification> {
        let mut merged: Vec<Classification> = Vec::new();
        for class in &self.classes {
            match merged.iter_mut().find(|m| m.description == class.description) {
                Some(existing) => existing.total += class.total,
                None => merged.push(class.clone()),
            }
        }
        merged
    }
}

impl fmt::Display for DiscreteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            write!(f, "{}, ", class)?;
        }
        write!(f, "(unknown {})", self.invalid_classifications)
    }
}

pub const MAX_SUMMARY_BUCKETS: usize = 1024;

/// Counts over equal-width buckets spanning `[min_value, max_value]`
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousSummary {
    pub min_value: f32,
    pub max_value: f32,
    pub bucket_size: f32,
    pub buckets: Vec<usize>,
    pub invalid_classifications: usize,
}

impl ContinuousSummary {
    /// A `bucket_count` of 0 picks one bucket per whole unit of range.
    ///
    /// At most [`MAX_SUMMARY_BUCKETS`] buckets are kept. An unbounded or
    /// inverted range gets a single bucket.
    pub fn new(min_value: f32, max_value: f32, bucket_count: usize) -> Self {
        let width = max_value - min_value;
        if !width.is_finite() || width < 0.0 {
            warn!("cannot bucket the range [{}, {}], using a single bucket", min_value, max_value);
            return Self {
                min_value,
                max_value,
                bucket_size: 0.0,
                buckets: vec![0],
                invalid_classifications: 0,
            };
        }

        let bucket_count = match bucket_count {
            0 => (width.floor() as usize).max(1),
            count => count,
        }
        .min(MAX_SUMMARY_BUCKETS);
        Self {
            min_value,
            max_value,
            bucket_size: (max_value - min_value) / bucket_count as f32,
            buckets: vec![0; bucket_count],
            invalid_classifications: 0,
        }
    }

    pub fn classify(&mut self, value: f32) {
        if !(value >= self.min_value && value <= self.max_value) {
            self.invalid_classifications += 1;
            return;
        }
        let last = self.buckets.len() - 1;
        let index = if self.bucket_size > 0.0 {
            (((value - self.min_value) / self.bucket_size).floor() as usize).min(last)
        } else {
            0
        };
        self.buckets[index] += 1;
    }

    /// Lower edge of bucket `index`
    pub fn bucket_start(&self, index: usize) -> f32 {
        self.min_value + self.bucket_size * index as f32
    }
}

impl fmt::Display for ContinuousSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, count) in self.buckets.iter().enumerate() {
            write!(f, "([{:.2}..) {}), ", self.bucket_start(index), count)?;
        }
        write!(f, "(unknown {})", self.invalid_classifications)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Discrete(DiscreteSummary),
    Continuous(ContinuousSummary),
}

impl Summary {
    /// The summarizer suited to a driver, if its values can be summarized
    pub fn for_descriptor(descriptor: &DriverDescriptor) -> Option<Summary> {
        match &descriptor.detail {
            DriverDetail::Boolean {
                outcome_when_true,
                outcome_when_false,
            } => Some(Summary::Discrete(DiscreteSummary::new([
                outcome_when_false.clone(),
                outcome_when_true.clone(),
            ]))),
            DriverDetail::Discrete { possible_states } => {
                Some(Summary::Discrete(DiscreteSummary::new(possible_states.iter().cloned())))
            }
            DriverDetail::Continuous {
                min_value,
                max_value,
                summary_bucket_count,
            } => Some(Summary::Continuous(ContinuousSummary::new(
                *min_value,
                *max_value,
                *summary_bucket_count,
            ))),
            DriverDetail::Text => None,
        }
    }

    pub fn classify(&mut self, value: Option<&TraitValue>) {
        match (self, value) {
            (Summary::Discrete(summary), Some(TraitValue::Bool(value))) => {
                summary.classify(if *value { 1.0 } else { 0.0 })
            }
            (Summary::Discrete(summary), Some(TraitValue::Float(value))) => summary.classify(*value),
            (Summary::Continuous(summary), Some(TraitValue::Float(value))) => summary.classify(*value),
            (summary, _) => summary.record_invalid(),
        }
    }

    fn record_invalid(&mut self) {
        match self {
            Summary::Discrete(summary) => summary.invalid_classifications += 1,
            Summary::Continuous(summary) => summary.invalid_classifications += 1,
        }
    }

    pub fn invalid_classifications(&self) -> usize {
        match self {
            Summary::Discrete(summary) => summary.invalid_classifications,
            Summary::Continuous(summary) => summary.invalid_classifications,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Discrete(summary) => write!(f, "{}", summary),
            Summary::Continuous(summary) => write!(f, "{}", summary),
        }
    }
}

/// Per-driver class counts over many compiled genomes
#[derive(Debug, Clone, Default)]
pub struct SummarySet {
    summaries: Vec<(GeneticDriver, Summary)>,
}

impl SummarySet {
    /// Summarize `value_sets`, where `None` stands for an infertile genome.
    ///
    /// Drivers whose kind has no summarizer are skipped with a warning.
    pub fn new<'v>(
        descriptors: &[DriverDescriptor],
        value_sets: impl IntoIterator<Item = Option<&'v DriverValueSet>>,
    ) -> Self {
        let mut summaries: Vec<(GeneticDriver, Summary)> = descriptors
            .iter()
            .filter_map(|descriptor| match Summary::for_descriptor(descriptor) {
                Some(summary) => Some((descriptor.driver.clone(), summary)),
                None => {
                    warn!("no summarizer for genetic driver {}", descriptor.driver);
                    None
                }
            })
            .collect();

        for values in value_sets {
            for (driver, summary) in &mut summaries {
                summary.classify(values.and_then(|v| v.try_get_value(driver)));
            }
        }

        Self { summaries }
    }

    pub fn get(&self, driver: &GeneticDriver) -> Option<&Summary> {
        self.summaries
            .iter()
            .find(|(d, _)| d == driver)
            .map(|(_, summary)| summary)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GeneticDriver, &Summary)> {
        self.summaries.iter().map(|(driver, summary)| (driver, summary))
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl fmt::Display for SummarySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (driver, summary) in &self.summaries {
            writeln!(f, "{}: {}", driver, summary)?;
        }
        Ok(())
    }
}
