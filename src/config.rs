use crate::dom::Attr;

/// Tuning knobs for a merge run.
///
/// The defaults mark insertions in pale green, deletions struck through in
/// pink, and pure formatting changes in blue, which renders legibly in any
/// browser without a stylesheet.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of matching characters allowed between two text edits
    /// before they are reported separately. With the default of 0 every edit
    /// is reported exactly; a small positive value trades precision for
    /// fewer, larger markers.
    pub granularity: usize,
    /// Attributes of the `<span>` wrapped around inserted content.
    pub inserted_span: Vec<Attr>,
    /// Attributes of the `<span>` wrapped around deleted content.
    pub deleted_span: Vec<Attr>,
    /// Attributes of the `<span>` wrapped around text whose characters are
    /// unchanged but whose surrounding markup is not.
    pub reformatted_span: Vec<Attr>,
    /// Tag names whose whole subtrees are stripped from every version before
    /// diffing, for editor artifacts that should never count as changes.
    pub clean_tags: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            granularity: 0,
            inserted_span: vec![Attr::new(
                "style",
                "background-color: palegreen; text-decoration: underline;",
            )],
            deleted_span: vec![Attr::new(
                "style",
                "background-color: lightpink; text-decoration: line-through;",
            )],
            reformatted_span: vec![Attr::new(
                "style",
                "background-color: lightskyblue; text-decoration: overline;",
            )],
            clean_tags: Vec::new(),
        }
    }
}
