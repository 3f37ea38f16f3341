//! Caller-side session state.
//!
//! The interpreter is pure, so somebody has to hold the current
//! directory, the history, and the welcome lines between keypresses.
//! `Session` is that somebody: the web terminal keeps one per visitor,
//! the demo REPL keeps one per process. Nothing here survives the
//! session.

use folio_types::error::Result;
use folio_types::output::OutputMessage;
use folio_vfs::{FileTree, Manifest, NodeId};

use crate::complete;
use crate::history::History;
use crate::interpreter::{CommandResult, Interpreter};
use crate::route::{self, RouteChange};

pub struct Session {
    tree: FileTree,
    interpreter: Interpreter,
    history: History,
    cur_dir: NodeId,
    welcome: Vec<String>,
}

impl Session {
    /// Start a session at the root of `tree`, with no welcome lines.
    pub fn new(tree: FileTree) -> Self {
        let cur_dir = tree.root();
        Self {
            tree,
            interpreter: Interpreter::new(),
            history: History::new(),
            cur_dir,
            welcome: Vec::new(),
        }
    }

    /// Build tree and welcome lines from a site manifest.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let tree = manifest.build_tree()?;
        Ok(Self::new(tree).with_welcome(manifest.welcome.clone()))
    }

    /// Replace the interpreter (e.g. to change the parse policy).
    pub fn with_interpreter(mut self, interpreter: Interpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn with_welcome(mut self, welcome: Vec<String>) -> Self {
        self.welcome = welcome;
        self
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn current_dir(&self) -> NodeId {
        self.cur_dir
    }

    /// Path shown in the prompt: `~`, or `~/about`.
    pub fn prompt_path(&self) -> String {
        self.tree.display_path(self.cur_dir)
    }

    /// Welcome lines, shown at startup and after `clear`.
    pub fn welcome(&self) -> Vec<OutputMessage> {
        self.welcome
            .iter()
            .map(|line| OutputMessage::normal(line.clone()))
            .collect()
    }

    /// Execute one entered line: record history, interpret, adopt the new
    /// current directory if the command changed it.
    pub fn run(&mut self, input: &str) -> CommandResult {
        let input = input.trim();
        self.history.push(input);
        let result = self.interpreter.process(input, &self.tree, self.cur_dir);
        if let Some(new_dir) = result.new_dir {
            self.cur_dir = new_dir;
        }
        result
    }

    /// Tab-completion against the session's current directory.
    pub fn complete(&self, input: &str) -> Option<String> {
        complete::complete(input, &self.tree, self.cur_dir, self.interpreter.policy())
    }

    /// Apply an external route (URL navigation), adopting its directory.
    pub fn apply_route(&mut self, path: &str, query: &[(String, String)]) -> RouteChange {
        let change = route::route_change(&self.tree, path, query);
        self.cur_dir = change.new_dir;
        change
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Up-arrow recall.
    pub fn history_previous(&mut self) -> Option<&str> {
        self.history.previous()
    }

    /// Down-arrow recall; `None` means fresh empty input.
    pub fn history_next(&mut self) -> Option<&str> {
        self.history.next_entry()
    }

    /// The caller reports ordinary typing so recall starts over.
    pub fn notify_input_edited(&mut self) {
        self.history.reset_cursor();
    }
}
