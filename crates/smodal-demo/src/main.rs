#![forbid(unsafe_code)]

//! Playground binary.
//!
//! ```text
//! smodal-demo                         # scripted tour
//! smodal-demo show-modal1 show-modal2 # press buttons in order
//! smodal-demo --stdin                 # JSON actions, one per line
//! ```
//!
//! The screen is re-rendered to stdout after every committed change.
//! Diagnostics go to stderr and follow `RUST_LOG`.

use std::io::{self, BufRead};
use std::process::ExitCode;

use smodal::prelude::*;
use smodal_demo::{Button, demo_store, press, render};
use tracing_subscriber::EnvFilter;

const TOUR: [Button; 6] = [
    Button::ShowModal1,
    Button::UpdateModal1,
    Button::ShowModal2,
    Button::ShowModal3,
    Button::CloseModal2,
    Button::CloseModal3,
];

enum Input {
    Tour,
    Buttons(Vec<Button>),
    Stdin,
}

fn parse_args(args: Vec<String>) -> Result<Input, String> {
    if args.is_empty() {
        return Ok(Input::Tour);
    }
    if args.iter().any(|a| a == "--stdin") {
        return if args.len() == 1 {
            Ok(Input::Stdin)
        } else {
            Err("--stdin takes no other arguments".into())
        };
    }
    args.iter()
        .map(|arg| Button::parse(arg).ok_or_else(|| format!("unknown button: {arg}")))
        .collect::<Result<_, _>>()
        .map(Input::Buttons)
}

/// Failures of a playground session.
#[derive(Debug)]
enum DemoError {
    Modal(ModalError),
    Stdin(io::Error),
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Modal(err) => write!(f, "{err}"),
            Self::Stdin(err) => write!(f, "reading stdin: {err}"),
        }
    }
}

impl std::error::Error for DemoError {}

impl From<ModalError> for DemoError {
    fn from(err: ModalError) -> Self {
        Self::Modal(err)
    }
}

fn run(input: Input) -> Result<(), DemoError> {
    let ctx = ModalContext::new();
    let provider = ctx.provide(demo_store()?);
    let modals = ctx.use_modal()?;

    let screen = modals.clone();
    let _redraw = provider.store().subscribe(move |_| match render(&screen) {
        Ok(frame) => println!("{frame}"),
        Err(err) => tracing::error!(%err, "render failed"),
    });

    println!("{}", render(&modals)?);
    match input {
        Input::Tour => Ok(TOUR.into_iter().try_for_each(|b| press(&modals, b))?),
        Input::Buttons(buttons) => Ok(buttons.into_iter().try_for_each(|b| press(&modals, b))?),
        Input::Stdin => {
            for line in io::stdin().lock().lines() {
                let line = line.map_err(DemoError::Stdin)?;
                if line.trim().is_empty() {
                    continue;
                }
                // Bad lines are logged by the store; keep reading.
                let _ = provider.store().dispatch_json(&line);
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let input = match parse_args(std::env::args().skip(1).collect()) {
        Ok(input) => input,
        Err(msg) => {
            eprintln!("smodal-demo: {msg}");
            return ExitCode::from(2);
        }
    };
    match run(input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("smodal-demo: {err}");
            ExitCode::FAILURE
        }
    }
}
