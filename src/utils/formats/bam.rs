//! Utilities related to opening and manipulating Binary Alignment Map (BAM)
//! files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::bail;
use anyhow::Context;
use indexmap::IndexMap;
use noodles::bam;
use noodles::bgzf;
use noodles::sam::header::record::value::map::reference_sequence::Name as ReferenceSequenceName;
use noodles::sam::header::record::value::map::Map;
use noodles::sam::header::record::value::map::ReferenceSequence;
use tracing::debug;

use super::sam::parse_header;
use super::BioinformaticsFileFormat;

/// Attempts to open a BAM file from a given source. Note that this function
/// is private because it should never be called by an external module (use
/// [`open_and_parse`] instead).
fn open<P>(src: P) -> anyhow::Result<bam::Reader<bgzf::Reader<BufReader<File>>>>
where
    P: AsRef<Path>,
{
    let path = src.as_ref();
    let file = File::open(path);

    match BioinformaticsFileFormat::try_detect(path) {
        Some(BioinformaticsFileFormat::BAM) => {
            let reader = file
                .map(BufReader::new)
                .with_context(|| "opening src BAM file")?;
            Ok(bam::Reader::new(reader))
        }
        Some(format) => bail!("incompatible formats: required BAM, found {}", format),
        None => bail!(
            "not able to determine the filetype for path: {}",
            path.display()
        ),
    }
}

/// Contains the BAM file reader, the parsed header from the BAM file, and the
/// reference sequences read from the BAM file.
pub struct ParsedBAMFile {
    /// A reader for the BAM file.
    pub reader: bam::Reader<bgzf::Reader<BufReader<File>>>,

    /// The parsed header from the BAM file.
    pub header: noodles::sam::Header,

    /// The reference sequences read from the BAM file.
    pub reference_sequences: IndexMap<ReferenceSequenceName, Map<ReferenceSequence>>,
}

/// Opens and subsequently parses a BAM file's header. This is useful when
/// opening BAM files when you want the corrections applied by
/// [`super::sam::correct_common_header_mistakes`] to apply.
pub fn open_and_parse<P>(src: P) -> anyhow::Result<ParsedBAMFile>
where
    P: AsRef<Path>,
{
    // (1) Construct the reader.
    debug!("reading BAM file from disk");
    let mut reader = open(&src)?;

    // (2) Parse the header and reference sequences.
    debug!("parsing the header and reference sequences");
    let header = parse_header(reader.read_header()?)?;
    let reference_sequences = reader.read_reference_sequences()?;

    Ok(ParsedBAMFile {
        reader,
        header,
        reference_sequences,
    })
}
