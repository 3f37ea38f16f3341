//! folio demo REPL.
//!
//! Drives the interpreter the way the web terminal does: one session,
//! one line per turn, structured output rendered as plain text. Opened
//! content is only announced here; there is no embedded viewer on stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use folio_terminal::{Action, Interpreter, ParsePolicy, Session};
use folio_types::output::OutputMessage;
use folio_vfs::Manifest;

/// Built-in demo site used when no manifest is given.
const DEMO_SITE: &str = include_str!("../site.toml");

#[derive(Debug, Parser)]
#[command(name = "folio", about = "Terminal-styled portfolio shell (demo REPL)")]
struct Cli {
    /// Path to a site manifest (.toml or .json).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Report unknown commands instead of implicitly opening them.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let manifest = match &cli.manifest {
        Some(path) => Manifest::from_path(path)
            .with_context(|| format!("loading manifest {}", path.display()))?,
        None => Manifest::from_toml_str(DEMO_SITE).context("built-in site manifest")?,
    };
    let policy = if cli.strict {
        ParsePolicy::Strict
    } else {
        ParsePolicy::ImplicitOpen
    };
    let mut session = Session::from_manifest(&manifest)
        .context("building content tree")?
        .with_interpreter(Interpreter::with_policy(policy));
    log::info!(
        "session ready: {} nodes, policy {policy:?}",
        session.tree().len()
    );

    print_welcome(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "{} > ", session.prompt_path())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let result = session.run(&line);
        if result.clear {
            // No screen control on a plain pipe; re-show the welcome
            // lines the way the page would after discarding its buffer.
            println!();
            print_welcome(&session);
            continue;
        }
        for message in &result.output {
            print_message(message);
        }
        if let Some(Action::Open { content_ref }) = &result.action {
            println!("[viewer] {content_ref}");
        }
    }

    Ok(())
}

fn print_welcome(session: &Session) {
    for message in session.welcome() {
        print_message(&message);
    }
}

fn print_message(message: &OutputMessage) {
    match message {
        OutputMessage::Listing { items } => {
            let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
            println!("{}", names.join("  "));
        },
        // The web page distinguishes kinds by color; a pipe just gets text.
        OutputMessage::Command { text }
        | OutputMessage::Normal { text }
        | OutputMessage::Error { text }
        | OutputMessage::Warning { text } => println!("{text}"),
    }
}
