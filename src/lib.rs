//! Track-changes style comparison of HTML fragments.
//!
//! [`redline`] takes a base fragment and any number of edited fragments,
//! aligns them structurally (markup included, not just text), and returns
//! each edit merged back into the base with `<span>` markers around
//! insertions, deletions and reformatted runs. The output is plain HTML that
//! renders the review view directly in a browser.
//!
//! ```
//! use redline_html::{Config, redline};
//!
//! # fn main() -> Result<(), redline_html::DiffError> {
//! let merged = redline(&["the cat", "the hat"], &Config::default())?;
//! assert_eq!(merged.len(), 1);
//! assert!(merged[0].starts_with("the <span"));
//! assert!(merged[0].contains(">c</span>"));
//! assert!(merged[0].contains(">h</span>"));
//! assert!(merged[0].ends_with("at"));
//! # Ok(())
//! # }
//! ```

mod alignment;
mod compare;
mod config;
mod dom;
mod error;
mod flatten;
mod position;
mod redline;
mod replay;

pub use config::Config;
pub use dom::Attr;
pub use error::DiffError;
pub use redline::redline;
