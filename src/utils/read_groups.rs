//! Utilities related to read group handling.

use lazy_static::lazy_static;
use noodles::sam::Header;
use tracing::warn;

lazy_static! {
    /// Reserved read group name that records lacking an `RG` tag are
    /// attributed to. Using a reserved name means "no read group" is itself a
    /// trackable category rather than an error.
    pub static ref UNKNOWN_READ_GROUP: String = String::from("unknown_read_group");
}

/// Compares the read group tags found in the records and the read groups
/// declared in the header, warning about read groups that appear on only one
/// side. Returns the read group names that were declared in the header but
/// never seen in the records.
pub fn validate_read_group_info<'a>(
    found_rgs: impl IntoIterator<Item = &'a str>,
    header: &Header,
) -> Vec<String> {
    let mut rgs_in_records_not_header = Vec::new();

    let mut rgs_in_header_not_records: Vec<String> =
        header.read_groups().keys().cloned().collect();

    for rg_id in found_rgs {
        rgs_in_header_not_records.retain(|id| id != rg_id);

        if rg_id != UNKNOWN_READ_GROUP.as_str() && !header.read_groups().contains_key(rg_id) {
            rgs_in_records_not_header.push(rg_id.to_string());
        }
    }

    if !rgs_in_header_not_records.is_empty() {
        warn!(
            "The following read groups were not found in the file: {:?}",
            rgs_in_header_not_records
        );
    }

    if !rgs_in_records_not_header.is_empty() {
        warn!(
            "The following read groups were not found in the header: {:?}",
            rgs_in_records_not_header
        );
    }

    rgs_in_header_not_records
}
