//! Command-line parsing.
//!
//! One line becomes a command keyword, a target path, and extra
//! arguments. What happens to an unrecognized first token is an explicit
//! policy, not an accident of keyword lookup.

/// Recognized command keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Help,
    Clear,
    Ls,
    Cd,
    Open,
}

impl Keyword {
    /// All keywords, in `help` display order.
    pub const ALL: [Keyword; 5] = [
        Keyword::Help,
        Keyword::Clear,
        Keyword::Ls,
        Keyword::Cd,
        Keyword::Open,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Help => "help",
            Keyword::Clear => "clear",
            Keyword::Ls => "ls",
            Keyword::Cd => "cd",
            Keyword::Open => "open",
        }
    }

    /// Exact, case-sensitive keyword match.
    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kw| kw.as_str() == token)
    }
}

/// Comma-separated keyword list, as shown by `help`.
pub fn available_commands() -> String {
    let names: Vec<&str> = Keyword::ALL.iter().map(|kw| kw.as_str()).collect();
    names.join(", ")
}

/// What to do with an input whose first token is not a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Treat the whole line as an implicit `open`: a bare filename opens
    /// it. The default.
    #[default]
    ImplicitOpen,
    /// Report an invalid-command error.
    Strict,
}

/// The command slot of a parsed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedCommand {
    Known(Keyword),
    /// Unrecognized first token under [`ParsePolicy::Strict`].
    Unknown,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub command: ParsedCommand,
    /// Target path argument; empty when absent.
    pub target: String,
    /// Tokens after the target.
    pub extra_args: Vec<String>,
    /// Whether the keyword was literally typed. False for implicit open;
    /// completion uses this to rebuild the input faithfully.
    pub explicit: bool,
}

/// Tokenize on whitespace and classify the first token.
///
/// Returns `None` for blank input (nothing to dispatch; the interpreter
/// still echoes the line).
pub fn parse(input: &str, policy: ParsePolicy) -> Option<ParsedLine> {
    let mut tokens = input.split_whitespace();
    let first = tokens.next()?;

    if let Some(keyword) = Keyword::from_token(first) {
        let target = tokens.next().unwrap_or("").to_string();
        return Some(ParsedLine {
            command: ParsedCommand::Known(keyword),
            target,
            extra_args: tokens.map(str::to_string).collect(),
            explicit: true,
        });
    }

    match policy {
        ParsePolicy::ImplicitOpen => Some(ParsedLine {
            command: ParsedCommand::Known(Keyword::Open),
            target: first.to_string(),
            extra_args: tokens.map(str::to_string).collect(),
            explicit: false,
        }),
        ParsePolicy::Strict => Some(ParsedLine {
            command: ParsedCommand::Unknown,
            target: String::new(),
            extra_args: Vec::new(),
            explicit: false,
        }),
    }
}
