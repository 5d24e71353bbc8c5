//! Utilities related to Sequence Alignment Map (SAM) headers.

use noodles::sam;
use regex::Captures;
use regex::Regex;

/// Corrects common header mistakes. See the inline comments for the things
/// that are automatically corrected.
pub fn correct_common_header_mistakes(header: String) -> String {
    // (1) Corrects any lowercase platform units in the read group to be all
    // uppercase. This is especially important for data that contains
    // 'illumina' instead of the correct 'ILLUMINA'.
    let pattern = Regex::new("(\tPL:)(.+)").unwrap();
    let replaced = pattern.replace_all(&header, |c: &Captures<'_>| {
        format!("{}{}", &c[1], c[2].to_uppercase())
    });

    replaced.to_string()
}

/// Parses a SAM/BAM header from a string while also correcting common header
/// mistakes.
pub fn parse_header(header: String) -> anyhow::Result<sam::Header> {
    correct_common_header_mistakes(header)
        .parse()
        .map_err(|e| anyhow::anyhow!("could not parse the file's header: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illumina_lowercase_fix() {
        let data = "@RG\tID:rg0\tPL:illumina\n";
        let expected = "@RG\tID:rg0\tPL:ILLUMINA\n";

        let result = correct_common_header_mistakes(data.to_string());
        assert_eq!(result, expected);
    }
}
