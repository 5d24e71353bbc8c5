//! Utilities related to alignment records.

use noodles::sam::record::cigar::op::Kind;
use noodles::sam::record::Cigar;
use noodles::sam::record::QualityScores;

/// Computes the total number of soft-clipped bases in a record from its CIGAR
/// string. Records without any soft clip operations (including unmapped
/// records, which carry no CIGAR at all) total zero, which is a valid and
/// common observation.
pub fn total_soft_clipped_bases(cigar: &Cigar) -> usize {
    cigar
        .iter()
        .filter(|op| op.kind() == Kind::SoftClip)
        .map(|op| op.len())
        .sum()
}

/// Computes the mean of the per-base quality scores for a record, rounded to
/// the nearest integral Phred score. Returns [`None`] for records that carry
/// no quality scores (a missing QUAL field).
pub fn mean_quality_score(quality_scores: &QualityScores) -> Option<i64> {
    let scores = quality_scores.as_ref();
    if scores.is_empty() {
        return None;
    }

    let sum: u64 = scores.iter().map(|score| u8::from(*score) as u64).sum();
    let mean = sum as f64 / scores.len() as f64;

    Some(mean.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_soft_clipped_bases() {
        let cigar: Cigar = "5S90M5S".parse().unwrap();
        assert_eq!(total_soft_clipped_bases(&cigar), 10);

        let cigar: Cigar = "100M".parse().unwrap();
        assert_eq!(total_soft_clipped_bases(&cigar), 0);

        // Hard clips retain no bases in the record and must not be counted.
        let cigar: Cigar = "10H3S87M".parse().unwrap();
        assert_eq!(total_soft_clipped_bases(&cigar), 3);
    }

    #[test]
    fn test_mean_quality_score() {
        let scores = QualityScores::try_from(vec![30u8, 40u8]).unwrap();
        assert_eq!(mean_quality_score(&scores), Some(35));

        // Rounds to the nearest integral score.
        let scores = QualityScores::try_from(vec![30u8, 30u8, 31u8]).unwrap();
        assert_eq!(mean_quality_score(&scores), Some(30));

        let scores = QualityScores::default();
        assert_eq!(mean_quality_score(&scores), None);
    }
}
