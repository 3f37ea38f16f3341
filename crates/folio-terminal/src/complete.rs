//! Tab-completion for the input line.
//!
//! Completion reuses the execution parser, so what completes is exactly
//! what would run. Only a unique prefix match completes; zero or several
//! matches leave the input untouched (a known limitation, kept).

use folio_vfs::{FileTree, NodeId};

use crate::parse::{self, ParsePolicy, ParsedCommand};

/// Attempt to complete the target path of `input`.
///
/// Returns the replacement input line on a unique match: the completed
/// path gains a `/` when the match is a directory, a trailing space
/// otherwise, and the command keyword is kept if it was literally typed.
pub fn complete(
    input: &str,
    tree: &FileTree,
    cur_dir: NodeId,
    policy: ParsePolicy,
) -> Option<String> {
    let line = parse::parse(input, policy)?;
    let ParsedCommand::Known(keyword) = line.command else {
        return None;
    };

    // Complete the last path segment against its parent directory.
    let (dir_part, partial) = match line.target.rsplit_once('/') {
        Some((dir, partial)) => (dir, partial),
        None => ("", line.target.as_str()),
    };
    if partial.is_empty() {
        return None;
    }
    let dir_node = tree.resolve(dir_part, cur_dir)?;
    if !tree.node(dir_node).is_directory() {
        return None;
    }

    let mut matches = tree
        .children(dir_node)
        .filter(|&child| tree.node(child).name().starts_with(partial));
    let only = matches.next()?;
    if matches.next().is_some() {
        return None;
    }

    let matched = tree.node(only);
    let completed_name = if matched.is_directory() {
        format!("{}/", matched.name())
    } else {
        format!("{} ", matched.name())
    };
    let completed_path = if dir_part.is_empty() {
        completed_name
    } else {
        format!("{dir_part}/{completed_name}")
    };

    Some(if line.explicit {
        format!("{} {completed_path}", keyword.as_str())
    } else {
        completed_path
    })
}
