//! Statistics accumulated for a single read group.

use std::fmt;

use noodles::sam::alignment::Record;
use noodles::sam::record::data::field::Tag;
use noodles::sam::record::mapping_quality;
use serde::Serialize;

use crate::utils::alignment::mean_quality_score;
use crate::utils::alignment::total_soft_clipped_bases;
use crate::utils::histogram::Histogram;

/// Tallies of record classifications within a single read group.
///
/// The classification checks are independent and non-exclusive: a single
/// record may contribute to several of these tallies at once (for example, a
/// record that is both unmapped and marked as duplicate). `total` is always
/// greater than or equal to every other tally.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RecordCounts {
    /// The total number of records observed for this read group.
    pub total: usize,

    /// The number of records marked as supplementary (`0x800`).
    pub supplementary: usize,

    /// The number of records marked as unmapped (`0x4`).
    pub unmapped: usize,

    /// The number of records marked as having failed quality control checks
    /// (`0x200`).
    pub qc_fail: usize,

    /// The number of records marked as duplicate (`0x400`).
    pub duplicate: usize,

    /// The number of records whose mate is marked as unmapped (`0x8`).
    pub mate_unmapped: usize,
}

/// Statistics accumulated for a single read group: record classification
/// tallies plus the distributions of mapping quality, edit distance, template
/// length, soft-clipped bases, mean quality score, and read length.
///
/// Rendering is decoupled from the internal state: the [`fmt::Display`]
/// implementation produces the textual report block for this read group, and
/// the [`Serialize`] implementation produces the structured form. Both are
/// read-only and reflect the current state whenever they are invoked.
#[derive(Clone, Debug, Serialize)]
pub struct ReadGroupMetrics {
    name: String,

    counts: RecordCounts,

    mapping_quality: Histogram,
    edit_distance: Histogram,
    template_length: Histogram,
    soft_clips: Histogram,
    mean_quality_score: Histogram,
    read_length: Histogram,
}

impl ReadGroupMetrics {
    /// Creates an empty [`ReadGroupMetrics`] for the specified read group.
    pub fn new(name: String) -> Self {
        Self {
            name,
            counts: RecordCounts::default(),
            mapping_quality: Histogram::default(),
            edit_distance: Histogram::default(),
            template_length: Histogram::default(),
            soft_clips: Histogram::default(),
            mean_quality_score: Histogram::default(),
            read_length: Histogram::default(),
        }
    }

    /// Gets the name of the read group this struct accumulates statistics
    /// for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the record classification tallies for this read group.
    pub fn counts(&self) -> &RecordCounts {
        &self.counts
    }

    /// Gets the mapping quality distribution for this read group.
    pub fn mapping_quality(&self) -> &Histogram {
        &self.mapping_quality
    }

    /// Gets the edit distance (`NM`) distribution for this read group.
    pub fn edit_distance(&self) -> &Histogram {
        &self.edit_distance
    }

    /// Gets the template length distribution for this read group.
    pub fn template_length(&self) -> &Histogram {
        &self.template_length
    }

    /// Gets the distribution of soft-clipped base totals for this read group.
    pub fn soft_clips(&self) -> &Histogram {
        &self.soft_clips
    }

    /// Gets the mean quality score distribution for this read group.
    pub fn mean_quality_score(&self) -> &Histogram {
        &self.mean_quality_score
    }

    /// Gets the read length distribution for this read group.
    pub fn read_length(&self) -> &Histogram {
        &self.read_length
    }

    /// Processes a single record, updating the tallies and distributions for
    /// this read group.
    ///
    /// Every record is measured regardless of its classification: unmapped
    /// and duplicate reads contribute to the distributions just like any
    /// other read, as excluding them would silently alter the reported
    /// distributions. Optional per-record fields degrade gracefully—a record
    /// without an `NM` tag or without quality scores simply contributes no
    /// observation to the affected distribution.
    pub fn process(&mut self, record: &Record) {
        // (1) Count the record and tally each classification flag that is
        // set. These checks are intentionally independent if statements, not
        // a designation cascade.
        self.counts.total += 1;

        let flags = record.flags();

        if flags.is_supplementary() {
            self.counts.supplementary += 1;
        }

        if flags.is_unmapped() {
            self.counts.unmapped += 1;
        }

        if flags.is_qc_fail() {
            self.counts.qc_fail += 1;
        }

        if flags.is_duplicate() {
            self.counts.duplicate += 1;
        }

        if flags.is_mate_unmapped() {
            self.counts.mate_unmapped += 1;
        }

        // (2) Mapping quality is recorded as observed, even for unmapped
        // reads (which typically report a mapping quality of zero). A missing
        // mapping quality is stored as the sentinel 255, exactly as it
        // appears in the file.
        let mapq = record
            .mapping_quality()
            .map(u8::from)
            .unwrap_or(mapping_quality::MISSING);
        self.mapping_quality.increment(mapq as i64);

        // (3) Edit distance, if the record carries an integral NM tag.
        if let Some(nm) = record
            .data()
            .get(Tag::EditDistance)
            .and_then(|value| value.as_int())
        {
            self.edit_distance.increment(nm);
        }

        // (4) Template length is stored verbatim: negative and zero values
        // are valid bins, not errors.
        self.template_length.increment(record.template_length() as i64);

        // (5) Total soft-clipped bases, where zero is a valid and common
        // observation.
        self.soft_clips
            .increment(total_soft_clipped_bases(record.cigar()) as i64);

        // (6) Mean quality score, if the record carries quality scores.
        if let Some(mean) = mean_quality_score(record.quality_scores()) {
            self.mean_quality_score.increment(mean);
        }

        // (7) Read length.
        self.read_length.increment(record.sequence().len() as i64);
    }
}

impl fmt::Display for ReadGroupMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Read group: {}", self.name)?;

        writeln!(f, "  total: {}", self.counts.total)?;
        writeln!(f, "  supplementary: {}", self.counts.supplementary)?;
        writeln!(f, "  unmapped: {}", self.counts.unmapped)?;
        writeln!(f, "  qc fail: {}", self.counts.qc_fail)?;
        writeln!(f, "  duplicate: {}", self.counts.duplicate)?;
        writeln!(f, "  mate unmapped: {}", self.counts.mate_unmapped)?;

        writeln!(f, "  mapping quality: {}", self.mapping_quality)?;
        writeln!(f, "  edit distance: {}", self.edit_distance)?;
        writeln!(f, "  template length: {}", self.template_length)?;
        writeln!(f, "  soft clips: {}", self.soft_clips)?;
        writeln!(f, "  mean quality score: {}", self.mean_quality_score)?;
        writeln!(f, "  read length: {}", self.read_length)?;

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
    use noodles::sam::record::QualityScores;

    use super::*;

    #[test]
    fn test_every_record_is_counted_once() {
        let mut metrics = ReadGroupMetrics::new("rg0".to_string());

        for _ in 0..5 {
            let record = Record::default();
            metrics.process(&record);
        }

        assert_eq!(metrics.counts().total, 5);
    }

    #[test]
    fn test_classification_tallies_are_not_exclusive() {
        let mut metrics = ReadGroupMetrics::new("rg0".to_string());

        let mut record = Record::default();
        *record.flags_mut() = Flags::UNMAPPED | Flags::DUPLICATE | Flags::QC_FAIL;
        metrics.process(&record);

        let counts = metrics.counts();
        assert_eq!(counts.total, 1);
        assert_eq!(counts.unmapped, 1);
        assert_eq!(counts.duplicate, 1);
        assert_eq!(counts.qc_fail, 1);
        assert_eq!(counts.supplementary, 0);
        assert_eq!(counts.mate_unmapped, 0);
    }

    #[test]
    fn test_unmapped_records_still_contribute_observations() {
        let mut metrics = ReadGroupMetrics::new("rg0".to_string());

        let mut record = Record::default();
        *record.flags_mut() = Flags::UNMAPPED;
        *record.mapping_quality_mut() = MappingQuality::new(0);
        metrics.process(&record);

        assert_eq!(metrics.mapping_quality().get(0), 1);
        assert_eq!(metrics.template_length().get(0), 1);
        assert_eq!(metrics.soft_clips().get(0), 1);
        assert_eq!(metrics.read_length().get(0), 1);
    }

    #[test]
    fn test_missing_optional_fields_skip_only_their_distribution() {
        let mut metrics = ReadGroupMetrics::new("rg0".to_string());

        // No NM tag and no quality scores.
        let record = Record::default();
        metrics.process(&record);

        assert_eq!(metrics.edit_distance().sum(), 0);
        assert_eq!(metrics.mean_quality_score().sum(), 0);

        // The other distributions each gained exactly one observation.
        assert_eq!(metrics.mapping_quality().sum(), 1);
        assert_eq!(metrics.template_length().sum(), 1);
        assert_eq!(metrics.soft_clips().sum(), 1);
        assert_eq!(metrics.read_length().sum(), 1);
    }

    #[test]
    fn test_derived_observations() {
        let mut metrics = ReadGroupMetrics::new("rg0".to_string());

        let mut record = Record::default();
        *record.flags_mut() = Flags::empty();
        *record.mapping_quality_mut() = MappingQuality::new(60);
        *record.cigar_mut() = "2S6M".parse().unwrap();
        *record.sequence_mut() = "ACGTACGT".parse().unwrap();
        *record.quality_scores_mut() = QualityScores::try_from(vec![30u8; 8]).unwrap();
        *record.template_length_mut() = -190;
        record.data_mut().insert(Tag::EditDistance, Value::UInt8(3));
        metrics.process(&record);

        assert_eq!(metrics.mapping_quality().get(60), 1);
        assert_eq!(metrics.edit_distance().get(3), 1);
        assert_eq!(metrics.template_length().get(-190), 1);
        assert_eq!(metrics.soft_clips().get(2), 1);
        assert_eq!(metrics.mean_quality_score().get(30), 1);
        assert_eq!(metrics.read_length().get(8), 1);
    }

    #[test]
    fn test_missing_mapping_quality_is_recorded_as_sentinel() {
        let mut metrics = ReadGroupMetrics::new("rg0".to_string());

        let record = Record::default();
        metrics.process(&record);

        assert_eq!(metrics.mapping_quality().get(255), 1);
    }

    #[test]
    fn test_display_is_idempotent() {
        let mut metrics = ReadGroupMetrics::new("rg0".to_string());

        let mut record = Record::default();
        *record.template_length_mut() = 42;
        metrics.process(&record);

        assert_eq!(metrics.to_string(), metrics.to_string());
    }
}
