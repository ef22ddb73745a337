use std::io;

use thiserror::Error;

/// Error type for a failed merge run.
#[derive(Error, Debug)]
pub enum DiffError {
    /// Fewer than two versions were supplied, so there is nothing to compare
    #[error("at least two versions are required, got {got}")]
    NotEnoughVersions {
        /// The number of versions supplied
        got: usize,
    },
    /// A version could not be read as HTML
    #[error("version {index} could not be parsed")]
    Parse {
        /// Zero-based index of the offending version
        index: usize,
        /// The underlying parser failure
        source: io::Error,
    },
    /// A merged document rendered without the expected `<html>`/`<body>`
    /// wrapper, so the fragment could not be extracted
    #[error("merged document lost its document shell: {rendered}")]
    RenderContract {
        /// The full rendered markup, for diagnosis
        rendered: String,
    },
}
