//! Utilities related to the `bamstats` command line tool.

pub mod alignment;
pub mod formats;
pub mod histogram;
pub mod read_groups;
pub mod records;
