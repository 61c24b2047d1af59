use strum::{AsRefStr, EnumIter, EnumString};

/// Index types with a dedicated query throughput gauge.
///
/// Parsing is exact and case-sensitive: `"IVF"` and `"IDMap"` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
pub enum QueryIndexType {
    #[strum(serialize = "IVF")]
    Ivf,
    #[strum(serialize = "IDMap")]
    IdMap,
}

impl QueryIndexType {
    /// Parse a query type label, `None` for labels without a gauge
    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl std::fmt::Display for QueryIndexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}
