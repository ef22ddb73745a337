//! The top-level merge pipeline: parse, flatten, diff, replay, render.

use log::debug;
use rayon::prelude::*;

use crate::alignment::diff;
use crate::compare::{DiffSource, granular_pass};
use crate::config::Config;
use crate::dom::{Tree, parse_fragment, render};
use crate::error::DiffError;
use crate::flatten::{TreeRune, flatten};
use crate::replay::replay;

/// Shell the parser wraps every fragment in, and the renderer must reproduce
/// verbatim for the fragment to be extractable again.
const WRAPPER_PREFIX: &str = "<html><head></head><body>";
const WRAPPER_SUFFIX: &str = "</body></html>";

/// One parsed and flattened input, ready to be diffed against any other.
struct SourceVersion {
    tree: Tree,
    runes: Vec<TreeRune>,
}

/// Compare the base version (`versions[0]`) against every later version and
/// return one merged fragment per edit, in order, with change markers woven
/// in.
///
/// Versions are prepared and merged in parallel; the result order always
/// follows the input order.
///
/// # Errors
///
/// Fails when fewer than two versions are given, when a version cannot be
/// read as HTML, or when a merged document loses its document shell.
pub fn redline(versions: &[&str], config: &Config) -> Result<Vec<String>, DiffError> {
    if versions.len() < 2 {
        return Err(DiffError::NotEnoughVersions { got: versions.len() });
    }

    let sources: Vec<SourceVersion> = versions
        .par_iter()
        .enumerate()
        .map(|(index, raw)| {
            let tree =
                parse_fragment(raw, config).map_err(|source| DiffError::Parse { index, source })?;
            let runes = flatten(&tree);
            Ok(SourceVersion { tree, runes })
        })
        .collect::<Result<_, _>>()?;

    let base = &sources[0];
    sources[1..]
        .par_iter()
        .map(|edited| merge_pair(base, edited, config))
        .collect()
}

fn merge_pair(
    base: &SourceVersion,
    edited: &SourceVersion,
    config: &Config,
) -> Result<String, DiffError> {
    let source = DiffSource {
        base_tree: &base.tree,
        base: &base.runes,
        edited_tree: &edited.tree,
        edited: &edited.runes,
    };
    let changes = diff(base.runes.len(), edited.runes.len(), &source);
    debug!("{} change(s) between the versions", changes.len());
    let changes = granular_pass(config.granularity, &source, changes);

    let merged = replay(&source, &changes, config);
    let rendered = render(&merged);
    match rendered
        .strip_prefix(WRAPPER_PREFIX)
        .and_then(|r| r.strip_suffix(WRAPPER_SUFFIX))
    {
        Some(fragment) => Ok(fragment.to_owned()),
        None => Err(DiffError::RenderContract { rendered }),
    }
}
