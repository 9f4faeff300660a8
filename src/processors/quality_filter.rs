use std::collections::HashSet;

/// Allow-list filter over ARGOS location-class codes
///
/// Location classes ("3", "2", "1", "0", "A", "B", "Z") grade the positional
/// accuracy of a fix. The filter is a plain membership test: an empty
/// allow-list therefore rejects every record. That matches the upstream
/// tooling this replaces; callers wanting "accept everything" should run the
/// pipeline with no filter at all rather than an empty one.
#[derive(Debug, Clone)]
pub struct LocationClassFilter {
    allowed: HashSet<String>,
}

impl LocationClassFilter {
    pub fn new(allowed: HashSet<String>) -> Self {
        Self { allowed }
    }

    /// Build from the CLI's semicolon-delimited form, e.g. `"1;2;3"`
    pub fn from_delimited(list: &str) -> Self {
        let allowed = list
            .split(';')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed }
    }

    pub fn accepts(&self, location_class: &str) -> bool {
        self.allowed.contains(location_class)
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
