//! `bamstats` is a command line tool that collects per-read-group statistics
//! from next-generation sequencing data. This package is composed of both a
//! library crate, as well as a binary crate.
//!
//! For each read group encountered in a BAM file, `bamstats` tallies record
//! classifications (supplementary, unmapped, QC-failed, duplicate, and
//! mate-unmapped reads) and accumulates distributions of mapping quality,
//! edit distance, template length, soft-clipped bases, mean quality score,
//! and read length.
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod stats;
pub mod utils;
