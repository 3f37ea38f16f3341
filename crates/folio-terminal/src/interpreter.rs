//! Dispatch and execution of parsed command lines.

use folio_types::output::{ListingEntry, OutputMessage};
use folio_vfs::{FileTree, NodeId};

use crate::parse::{self, Keyword, ParsePolicy, ParsedCommand, ParsedLine, available_commands};

/// Side effect requested by a command, to be performed by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Display the referenced content in the embedded viewer.
    Open { content_ref: String },
}

/// Outcome of interpreting one line.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandResult {
    /// Typed output lines, command echo first.
    pub output: Vec<OutputMessage>,
    /// The caller must discard prior output and re-show its welcome lines.
    pub clear: bool,
    /// New current directory, when the command changed location. The
    /// caller must adopt it; `None` leaves the session where it was.
    pub new_dir: Option<NodeId>,
    /// Side effect to perform, if any.
    pub action: Option<Action>,
}

impl CommandResult {
    fn echoing(input: &str) -> Self {
        Self {
            output: vec![OutputMessage::command(format!("> {input}"))],
            clear: false,
            new_dir: None,
            action: None,
        }
    }
}

/// The command interpreter.
///
/// Pure: never mutates the tree, holds no session state. Everything it
/// decides travels back through [`CommandResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter {
    policy: ParsePolicy,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    /// Interpret one input line against the tree and current directory.
    pub fn process(&self, input: &str, tree: &FileTree, cur_dir: NodeId) -> CommandResult {
        let mut result = CommandResult::echoing(input);

        let Some(line) = parse::parse(input, self.policy) else {
            return result;
        };
        log::debug!("dispatching {:?} (target {:?})", line.command, line.target);

        match line.command {
            ParsedCommand::Unknown => {
                result
                    .output
                    .push(OutputMessage::error(format!(
                        "Invalid command: '{}'",
                        input.trim()
                    )));
                result.output.push(help_line());
            },
            ParsedCommand::Known(Keyword::Help) => result.output.push(help_line()),
            ParsedCommand::Known(Keyword::Clear) => {
                // Everything goes, the echo included; the caller restores
                // its welcome lines.
                result.output.clear();
                result.clear = true;
            },
            ParsedCommand::Known(Keyword::Ls) => self.run_ls(&line, tree, cur_dir, &mut result),
            ParsedCommand::Known(Keyword::Cd) => self.run_cd(&line, tree, cur_dir, &mut result),
            ParsedCommand::Known(Keyword::Open) => {
                self.run_open(&line, tree, cur_dir, &mut result);
            },
        }
        result
    }

    fn run_ls(
        &self,
        line: &ParsedLine,
        tree: &FileTree,
        cur_dir: NodeId,
        result: &mut CommandResult,
    ) {
        let Some(target) = tree.resolve(&line.target, cur_dir) else {
            result.output.push(OutputMessage::error(format!(
                "ls: no such file or directory: {}",
                line.target
            )));
            return;
        };
        let node = tree.node(target);
        let mut items: Vec<ListingEntry> = if node.is_directory() {
            tree.children(target)
                .map(|child| {
                    let child = tree.node(child);
                    ListingEntry {
                        name: child.display_name(),
                        is_runnable: child.is_runnable(),
                    }
                })
                .collect()
        } else {
            vec![ListingEntry {
                name: node.name().to_string(),
                is_runnable: node.is_runnable(),
            }]
        };
        items.sort_by(|a, b| a.name.cmp(&b.name));
        result.output.push(OutputMessage::Listing { items });
    }

    fn run_cd(
        &self,
        line: &ParsedLine,
        tree: &FileTree,
        cur_dir: NodeId,
        result: &mut CommandResult,
    ) {
        // Bare `cd`, `/`, and `~` all go home, which here is the root.
        if line.target.is_empty() || line.target == "/" || line.target == "~" {
            result.new_dir = Some(tree.root());
            return;
        }
        match tree.resolve(&line.target, cur_dir) {
            Some(target) if tree.node(target).is_directory() => {
                result.new_dir = Some(target);
            },
            _ => {
                result.output.push(OutputMessage::error(format!(
                    "cd: no such directory: {}",
                    line.target
                )));
            },
        }
    }

    fn run_open(
        &self,
        line: &ParsedLine,
        tree: &FileTree,
        cur_dir: NodeId,
        result: &mut CommandResult,
    ) {
        if line.target.is_empty() {
            result
                .output
                .push(OutputMessage::warning("Usage: open <filename>"));
            return;
        }
        let Some(target) = tree.resolve(&line.target, cur_dir) else {
            result.output.push(OutputMessage::error(format!(
                "File or directory not found: {}",
                line.target
            )));
            return;
        };
        open_node(target, &line.extra_args, tree, result);
    }
}

/// Open a resolved node: runnable leaves yield an open action, a
/// directory with exactly one runnable child opens that child, anything
/// else is reported.
pub(crate) fn open_node(
    id: NodeId,
    extra_args: &[String],
    tree: &FileTree,
    result: &mut CommandResult,
) {
    let node = tree.node(id);
    if node.is_directory() {
        let children: Vec<NodeId> = tree.children(id).collect();
        if let [only] = children[..]
            && tree.node(only).is_runnable()
        {
            open_node(only, extra_args, tree, result);
            return;
        }
        result.output.push(OutputMessage::warning(format!(
            "Cannot open directory: {}. Use 'cd'.",
            node.name()
        )));
    } else if node.is_runnable() {
        result
            .output
            .push(OutputMessage::normal(format!("Opening {}...", node.name())));
        if let Some(content_ref) = node.content_ref() {
            result.action = Some(Action::Open {
                content_ref: with_args_query(content_ref, extra_args),
            });
        }
    } else {
        result.output.push(OutputMessage::error(format!(
            "Cannot open file: {}.",
            node.name()
        )));
    }
}

fn help_line() -> OutputMessage {
    OutputMessage::normal(format!("Available commands: {}", available_commands()))
}

// ---------------------------------------------------------------------------
// Content-ref args suffix
// ---------------------------------------------------------------------------

/// Append extra arguments to a content reference as an `args` query
/// value, so the viewer can forward them to the opened content.
pub(crate) fn with_args_query(content_ref: &str, args: &[String]) -> String {
    if args.is_empty() {
        return content_ref.to_string();
    }
    let separator = if content_ref.contains('?') { '&' } else { '?' };
    format!(
        "{content_ref}{separator}args={}",
        percent_encode(&args.join(" "))
    )
}

/// Minimal query-value percent-encoding: unreserved ASCII passes through,
/// every other byte becomes %XX.
fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for &byte in value.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            },
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::output::OutputMessage;
    use folio_vfs::TreeBuilder;

    /// root { about/ { resume.pdf* }, projects/ { demo* }, notes.txt }
    fn sample_tree() -> FileTree {
        let mut b = TreeBuilder::new("root").unwrap();
        let about = b.dir(b.root(), "about").unwrap();
        b.leaf(about, "resume.pdf", Some("about/resume.pdf"), true)
            .unwrap();
        let projects = b.dir(b.root(), "projects").unwrap();
        b.leaf(projects, "demo", Some("projects/demo/index.html"), true)
            .unwrap();
        b.leaf(b.root(), "notes.txt", None, false).unwrap();
        b.finish()
    }

    fn process(input: &str) -> (FileTree, CommandResult) {
        let tree = sample_tree();
        let result = Interpreter::new().process(input, &tree, tree.root());
        (tree, result)
    }

    fn error_text(result: &CommandResult) -> Option<&str> {
        result.output.iter().find_map(|m| match m {
            OutputMessage::Error { text } => Some(text.as_str()),
            _ => None,
        })
    }

    fn listing_names(result: &CommandResult) -> Vec<String> {
        result
            .output
            .iter()
            .find_map(|m| match m {
                OutputMessage::Listing { items } => {
                    Some(items.iter().map(|i| i.name.clone()).collect())
                },
                _ => None,
            })
            .unwrap_or_default()
    }

    #[test]
    fn every_command_echoes_the_raw_input() {
        let (_, result) = process("ls about");
        assert_eq!(
            result.output.first(),
            Some(&OutputMessage::command("> ls about"))
        );
    }

    #[test]
    fn empty_input_echoes_and_does_nothing_else() {
        let (_, result) = process("");
        assert_eq!(result.output, vec![OutputMessage::command("> ")]);
        assert!(!result.clear);
        assert_eq!(result.new_dir, None);
        assert_eq!(result.action, None);
    }

    #[test]
    fn help_lists_available_commands() {
        let (_, result) = process("help");
        assert_eq!(
            result.output.get(1).and_then(|m| m.text()),
            Some("Available commands: help, clear, ls, cd, open")
        );
    }

    #[test]
    fn clear_returns_empty_output_and_flag() {
        let (_, result) = process("clear");
        assert!(result.output.is_empty());
        assert!(result.clear);
        assert_eq!(result.action, None);
    }

    #[test]
    fn clear_ignores_arguments() {
        let (_, result) = process("clear about extra");
        assert!(result.output.is_empty());
        assert!(result.clear);
    }

    #[test]
    fn ls_lists_current_directory_sorted_with_dir_suffix() {
        let (_, result) = process("ls");
        assert_eq!(listing_names(&result), vec!["about/", "notes.txt", "projects/"]);
    }

    #[test]
    fn ls_carries_runnable_flags() {
        let (_, result) = process("ls about");
        let items = match &result.output[1] {
            OutputMessage::Listing { items } => items,
            other => panic!("expected listing, got {other:?}"),
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "resume.pdf");
        assert!(items[0].is_runnable);
    }

    #[test]
    fn ls_on_leaf_lists_just_that_node() {
        let (_, result) = process("ls notes.txt");
        assert_eq!(listing_names(&result), vec!["notes.txt"]);
    }

    #[test]
    fn ls_missing_path_reports_the_literal_argument() {
        let (_, result) = process("ls about/nope/deeper");
        assert_eq!(
            error_text(&result),
            Some("ls: no such file or directory: about/nope/deeper")
        );
    }

    #[test]
    fn cd_changes_directory() {
        let (tree, result) = process("cd about");
        let about = tree.resolve("about", tree.root()).unwrap();
        assert_eq!(result.new_dir, Some(about));
        assert_eq!(error_text(&result), None);
    }

    #[test]
    fn cd_without_argument_goes_to_root() {
        let tree = sample_tree();
        let about = tree.resolve("about", tree.root()).unwrap();
        for input in ["cd", "cd /", "cd ~"] {
            let result = Interpreter::new().process(input, &tree, about);
            assert_eq!(result.new_dir, Some(tree.root()), "input: {input}");
        }
    }

    #[test]
    fn cd_failure_leaves_directory_unchanged() {
        let (_, result) = process("cd nope");
        assert_eq!(result.new_dir, None);
        assert_eq!(error_text(&result), Some("cd: no such directory: nope"));
    }

    #[test]
    fn cd_to_leaf_is_an_error() {
        let (_, result) = process("cd notes.txt");
        assert_eq!(result.new_dir, None);
        assert_eq!(
            error_text(&result),
            Some("cd: no such directory: notes.txt")
        );
    }

    #[test]
    fn open_runnable_leaf_yields_action() {
        let (_, result) = process("open about/resume.pdf");
        assert_eq!(
            result.output.get(1).and_then(|m| m.text()),
            Some("Opening resume.pdf...")
        );
        assert_eq!(
            result.action,
            Some(Action::Open {
                content_ref: "about/resume.pdf".to_string()
            })
        );
    }

    #[test]
    fn open_without_argument_warns_usage() {
        let (_, result) = process("open");
        assert_eq!(
            result.output.get(1),
            Some(&OutputMessage::warning("Usage: open <filename>"))
        );
        assert_eq!(result.action, None);
    }

    #[test]
    fn open_missing_path_reports_the_literal_argument() {
        let (_, result) = process("open missing.txt");
        assert_eq!(
            error_text(&result),
            Some("File or directory not found: missing.txt")
        );
        assert_eq!(result.action, None);
    }

    #[test]
    fn open_directory_with_single_runnable_child_auto_opens() {
        let tree = sample_tree();
        let via_dir = Interpreter::new().process("open about", &tree, tree.root());
        let direct = Interpreter::new().process("open about/resume.pdf", &tree, tree.root());
        assert_eq!(via_dir.action, direct.action);
        assert_eq!(via_dir.output[1..], direct.output[1..]);
    }

    #[test]
    fn open_directory_with_many_children_warns() {
        let (_, result) = process("open .");
        assert_eq!(
            result.output.get(1),
            Some(&OutputMessage::warning(
                "Cannot open directory: root. Use 'cd'."
            ))
        );
        assert_eq!(result.action, None);
    }

    #[test]
    fn open_non_runnable_leaf_is_an_error() {
        let (_, result) = process("open notes.txt");
        assert_eq!(error_text(&result), Some("Cannot open file: notes.txt."));
        assert_eq!(result.action, None);
    }

    #[test]
    fn open_extra_args_append_query_string() {
        let (_, result) = process("open projects/demo -w 800");
        assert_eq!(
            result.action,
            Some(Action::Open {
                content_ref: "projects/demo/index.html?args=-w%20800".to_string()
            })
        );
    }

    #[test]
    fn implicit_open_from_bare_filename() {
        let tree = sample_tree();
        let about = tree.resolve("about", tree.root()).unwrap();
        let result = Interpreter::new().process("resume.pdf", &tree, about);
        assert_eq!(
            result.action,
            Some(Action::Open {
                content_ref: "about/resume.pdf".to_string()
            })
        );
    }

    #[test]
    fn strict_policy_reports_invalid_command_with_help() {
        let tree = sample_tree();
        let interp = Interpreter::with_policy(ParsePolicy::Strict);
        let result = interp.process("bogus", &tree, tree.root());
        assert_eq!(error_text(&result), Some("Invalid command: 'bogus'"));
        assert_eq!(
            result.output.last().and_then(|m| m.text()),
            Some("Available commands: help, clear, ls, cd, open")
        );
        assert_eq!(result.action, None);
    }

    #[test]
    fn process_never_touches_the_tree() {
        let tree = sample_tree();
        let before = tree.routable_paths();
        let _ = Interpreter::new().process("cd about", &tree, tree.root());
        let _ = Interpreter::new().process("open about/resume.pdf", &tree, tree.root());
        assert_eq!(tree.routable_paths(), before);
    }

    #[test]
    fn with_args_query_handles_existing_query() {
        assert_eq!(
            with_args_query("demo.html?embed=1", &["-w".into(), "800".into()]),
            "demo.html?embed=1&args=-w%20800"
        );
    }

    #[test]
    fn percent_encode_escapes_non_unreserved_bytes() {
        assert_eq!(percent_encode("a b/c"), "a%20b%2Fc");
        assert_eq!(percent_encode("safe-._~09AZ"), "safe-._~09AZ");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn process_is_total(input in ".{0,64}") {
                let tree = sample_tree();
                // Must never panic, whatever the input bytes.
                let result = Interpreter::new().process(&input, &tree, tree.root());
                prop_assert!(!result.output.is_empty() || result.clear);
            }

            #[test]
            fn process_is_deterministic(input in "[ -~]{0,32}") {
                let tree = sample_tree();
                let a = Interpreter::new().process(&input, &tree, tree.root());
                let b = Interpreter::new().process(&input, &tree, tree.root());
                prop_assert_eq!(a, b);
            }
        }
    }
}
