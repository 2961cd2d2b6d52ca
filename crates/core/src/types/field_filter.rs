use std::collections::HashSet;

/// Whitelist of record fields to keep in the output. Built from a text file
/// with one field name per line; blank lines are ignored.
#[derive(Debug, Clone, Default)]
pub struct FieldFilter {
    fields: HashSet<String>,
}

impl FieldFilter {
    pub fn from_lines(contents: &str) -> Self {
        let fields = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        FieldFilter { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn allows(&self, key: &str) -> bool {
        self.fields.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldFilter;

    #[test]
    fn from_lines_skips_blanks_and_trims() {
        let filter = FieldFilter::from_lines("title\n\n  score  \n");
        assert!(filter.allows("title"));
        assert!(filter.allows("score"));
        assert!(!filter.allows("author"));
    }

    #[test]
    fn empty_filter_allows_nothing() {
        let filter = FieldFilter::from_lines("\n\n");
        assert!(filter.is_empty());
        assert!(!filter.allows("title"));
    }
}
