/// Configuration options for a parse.
///
/// # Examples
///
/// ```rust
/// use jsonblocks::ParseOptions;
///
/// let options = ParseOptions {
///     index_names: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Whether to recognize the non-standard block extension
    /// `( header-array, record-array... )`.
    ///
    /// When `false`, a `(` in value position is rejected as
    /// [`ErrorKind::BadInput`](crate::ErrorKind::BadInput) and no block
    /// node kinds are ever emitted.
    ///
    /// # Default
    ///
    /// `true`
    pub blocks: bool,

    /// Whether to report array elements with their 1-based ordinal
    /// position, as decimal text, in the event's name field.
    ///
    /// Lets a sink reconstruct index-addressable structure without keeping
    /// its own counters. When `false`, plain array elements carry no name.
    /// Record arrays inside blocks are unaffected: their fields are always
    /// named from the block header.
    ///
    /// # Default
    ///
    /// `true`
    pub index_names: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            blocks: true,
            index_names: true,
        }
    }
}
