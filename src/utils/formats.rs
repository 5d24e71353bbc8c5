//! Utilities related to bioinformatics file formats.

use std::fmt;
use std::path::Path;

pub mod bam;
pub mod sam;

/// The file formats that tools in this crate know how to distinguish between.
#[derive(Debug, PartialEq, Eq)]
pub enum BioinformaticsFileFormat {
    /// A Sequence Alignment Map (SAM) file.
    SAM,

    /// A Binary Alignment Map (BAM) file.
    BAM,
}

impl fmt::Display for BioinformaticsFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SAM => write!(f, "SAM"),
            Self::BAM => write!(f, "BAM"),
        }
    }
}

impl BioinformaticsFileFormat {
    /// Attempts to detect the file format of a path from its extension.
    pub fn try_detect(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;

        match ext.to_ascii_lowercase().as_str() {
            "sam" => Some(Self::SAM),
            "bam" => Some(Self::BAM),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_detect() {
        assert_eq!(
            BioinformaticsFileFormat::try_detect("sample.bam"),
            Some(BioinformaticsFileFormat::BAM)
        );
        assert_eq!(
            BioinformaticsFileFormat::try_detect("sample.SAM"),
            Some(BioinformaticsFileFormat::SAM)
        );
        assert_eq!(BioinformaticsFileFormat::try_detect("sample.vcf"), None);
        assert_eq!(BioinformaticsFileFormat::try_detect("sample"), None);
    }
}
