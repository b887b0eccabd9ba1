//! Todo - slice-dispatch demo
//!
//! Reads one command per line from stdin, dispatches it through a sliced
//! reducer and prints the resulting state as JSON:
//!
//! - `add <text>`, `toggle <id>`, `remove <id>`, `input <text>`, `clear-done`
//! - `show` prints the state without dispatching, `quit` exits
//!
//! # Usage
//!
//! ```sh
//! printf 'add buy milk\ntoggle 1\n' | cargo run -p todo-demo
//!
//! # Resolve handlers once, when the table is built
//! cargo run -p todo-demo -- --resolution captured
//!
//! # Log only todo actions
//! cargo run -p todo-demo -- --verbose --log-include '*Todo'
//! ```

mod command;
mod reducer;
mod state;

use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use slice_dispatch::{DispatchLogConfig, Resolution, SliceConfig, SlicedReducer};
use tracing_subscriber::EnvFilter;

use crate::command::{parse_command, Command};
use crate::reducer::{reducer, Payload};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResolutionArg {
    /// Re-resolve handlers against the previous state on every dispatch
    Rebind,
    /// Use the handlers resolved when the table was built
    Captured,
}

impl From<ResolutionArg> for Resolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::Rebind => Resolution::Rebind,
            ResolutionArg::Captured => Resolution::Captured,
        }
    }
}

/// Todo list driven by commands on stdin
#[derive(Parser, Debug)]
#[command(name = "slice-todo")]
#[command(about = "A todo list demonstrating slice-dispatch")]
struct Args {
    /// How dispatchers find their handler
    #[arg(long, value_enum, default_value_t = ResolutionArg::Rebind)]
    resolution: ResolutionArg,

    /// Only log actions matching these comma-separated glob patterns
    #[arg(long)]
    log_include: Option<String>,

    /// Never log actions matching these comma-separated glob patterns
    #[arg(long)]
    log_exclude: Option<String>,

    /// Log dispatches to stderr (RUST_LOG overrides the level)
    #[arg(long, short)]
    verbose: bool,

    /// Pretty-print the state
    #[arg(long)]
    pretty: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_state(out: &mut impl Write, state: &AppState, pretty: bool) -> io::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(state)
    } else {
        serde_json::to_string(state)
    }
    .map_err(io::Error::other)?;
    writeln!(out, "{}", json)
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = SliceConfig::default()
        .with_resolution(args.resolution.into())
        .with_log(DispatchLogConfig::new(
            args.log_include.as_deref(),
            args.log_exclude.as_deref(),
        ));

    // Stable spec: the table is built on the first render and reused
    let spec = reducer();
    let mut slot: SlicedReducer<AppState, Payload> = SlicedReducer::with_config(config);
    let (mut state, mut dispatch) = slot.build(&spec, AppState::default());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Show => {}
            Command::Dispatch { action, payload } => {
                if let Err(e) = dispatch.dispatch(action, payload) {
                    eprintln!("error: {}", e);
                    continue;
                }
                // Render
                (state, dispatch) = slot.build(&spec, AppState::default());
            }
        }

        print_state(&mut stdout, &state, args.pretty)?;
    }

    Ok(())
}
