/// Per-owner entry counts, one bucket per media type plus the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnerStats {
    pub total: i64,
    pub movies: i64,
    pub books: i64,
    pub music: i64,
}
