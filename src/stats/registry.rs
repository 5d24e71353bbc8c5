//! Routing of records to the statistics accumulator for their read group.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use noodles::sam::alignment::Record;
use noodles::sam::record::data::field::Tag;
use serde::Serialize;

use crate::stats::read_group::ReadGroupMetrics;
use crate::utils::read_groups::UNKNOWN_READ_GROUP;

/// Registry of all read groups observed during an aggregation pass.
///
/// The registry exclusively owns one [`ReadGroupMetrics`] per distinct read
/// group identifier, creating accumulators on first sight of a new
/// identifier. Identifiers are taken verbatim from each record's `RG` tag;
/// records without one are attributed to the reserved
/// [`UNKNOWN_READ_GROUP`] name, so no record is ever rejected.
///
/// One registry is created per aggregation pass and grows monotonically as
/// new read groups are observed. Read groups are reported in insertion
/// order, which is deterministic within a run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct StatsRegistry {
    read_groups: IndexMap<String, ReadGroupMetrics>,
}

impl StatsRegistry {
    /// Processes a single record by resolving its read group and forwarding
    /// the record to that read group's accumulator.
    pub fn process(&mut self, record: &Record) {
        let read_group = record
            .data()
            .get(Tag::ReadGroup)
            .and_then(|value| value.as_str())
            .unwrap_or(UNKNOWN_READ_GROUP.as_str())
            .to_string();

        let metrics = match self.read_groups.entry(read_group) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let name = entry.key().clone();
                entry.insert(ReadGroupMetrics::new(name))
            }
        };

        metrics.process(record);
    }

    /// Gets the accumulated statistics for a particular read group, if that
    /// read group has been observed.
    pub fn get(&self, name: &str) -> Option<&ReadGroupMetrics> {
        self.read_groups.get(name)
    }

    /// Iterates over the accumulated statistics for all observed read groups
    /// in insertion order.
    pub fn read_groups(&self) -> impl Iterator<Item = &ReadGroupMetrics> {
        self.read_groups.values()
    }

    /// Iterates over the names of all observed read groups in insertion
    /// order.
    pub fn read_group_names(&self) -> impl Iterator<Item = &str> {
        self.read_groups.keys().map(|name| name.as_str())
    }

    /// Gets the number of read groups observed so far.
    pub fn len(&self) -> usize {
        self.read_groups.len()
    }

    /// Indicates whether any read groups have been observed yet.
    pub fn is_empty(&self) -> bool {
        self.read_groups.is_empty()
    }
}

impl fmt::Display for StatsRegistry {
    /// Renders the textual report: the per-read-group report blocks,
    /// concatenated in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for metrics in self.read_groups.values() {
            writeln!(f, "{}", metrics)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use noodles::sam::alignment::Record;
    use noodles::sam::record::data::field::Tag;
    use noodles::sam::record::data::field::Value;
    use noodles::sam::record::Flags;
    use noodles::sam::record::MappingQuality;

    use super::*;

    fn record_with_read_group(read_group: &str) -> Record {
        let mut record = Record::default();
        record
            .data_mut()
            .insert(Tag::ReadGroup, Value::String(read_group.to_string()));
        record
    }

    #[test]
    fn test_routing_to_read_groups() {
        let mut registry = StatsRegistry::default();
        assert!(registry.is_empty());

        registry.process(&record_with_read_group("RG1"));
        registry.process(&record_with_read_group("RG1"));
        registry.process(&Record::default());

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("RG1").unwrap().counts().total, 2);
        assert_eq!(
            registry
                .get(UNKNOWN_READ_GROUP.as_str())
                .unwrap()
                .counts()
                .total,
            1
        );
    }

    #[test]
    fn test_mixed_flag_scenario() {
        let mut registry = StatsRegistry::default();

        let mut record = record_with_read_group("RGX");
        *record.flags_mut() = Flags::empty();
        *record.mapping_quality_mut() = MappingQuality::new(30);
        registry.process(&record);

        let mut record = record_with_read_group("RGX");
        *record.flags_mut() = Flags::UNMAPPED | Flags::DUPLICATE;
        *record.mapping_quality_mut() = MappingQuality::new(0);
        registry.process(&record);

        let mut record = record_with_read_group("RGX");
        *record.flags_mut() = Flags::DUPLICATE;
        *record.mapping_quality_mut() = MappingQuality::new(40);
        registry.process(&record);

        let metrics = registry.get("RGX").unwrap();
        assert_eq!(metrics.counts().total, 3);
        assert_eq!(metrics.counts().unmapped, 1);
        assert_eq!(metrics.counts().duplicate, 2);

        assert_eq!(metrics.mapping_quality().get(30), 1);
        assert_eq!(metrics.mapping_quality().get(0), 1);
        assert_eq!(metrics.mapping_quality().get(40), 1);
        assert_eq!(metrics.mapping_quality().sum(), 3);
    }

    #[test]
    fn test_identifiers_are_taken_verbatim() {
        let mut registry = StatsRegistry::default();

        registry.process(&record_with_read_group("rg1"));
        registry.process(&record_with_read_group("RG1 "));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("rg1").is_some());
        assert!(registry.get("RG1 ").is_some());
    }

    #[test]
    fn test_report_order_is_deterministic() {
        let mut registry = StatsRegistry::default();

        registry.process(&record_with_read_group("rg2"));
        registry.process(&record_with_read_group("rg1"));
        registry.process(&record_with_read_group("rg2"));

        let names: Vec<&str> = registry.read_group_names().collect();
        assert_eq!(names, ["rg2", "rg1"]);

        // Rendering without intervening processing is idempotent.
        assert_eq!(registry.to_string(), registry.to_string());
    }
}
