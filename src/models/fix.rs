/// Raw fix extracted from one header/location line pair
///
/// Field values are verbatim tokens from the source file. Quality filtering
/// and coordinate conversion happen downstream; the parser produces one
/// candidate per header line regardless of whether it will survive either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixCandidate {
    pub tag_id: String,
    pub date: String,
    pub time: String,
    pub location_class: String,
    pub lat_raw: String,
    pub lon_raw: String,
}

impl FixCandidate {
    /// Timestamp string in `DD/MM/YY HH:MM:SS` form
    ///
    /// The date token arrives dot-separated (`12.03.99`); the separators are
    /// rewritten to `/` and the time token appended.
    pub fn timestamp(&self) -> String {
        format!("{} {}", self.date.replace('.', "/"), self.time)
    }
}
