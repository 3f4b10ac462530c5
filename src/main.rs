use std::io::{self, Write};

use bstr::BStr;
use clap::Parser;

use bumprt::arena::Arena;
use bumprt::bytes::{Bytes, Text};
use bumprt::cli::Args;
use bumprt::concat::{bytes_to_text, try_concat, try_concat_bytes};
use bumprt::config::{Config, Mode};
use bumprt::error::Result;
use bumprt::{debug, input, output};

/// Set up SIGPIPE handling for Unix systems
/// This prevents "broken pipe" errors when output is piped to commands like `head`
#[cfg(unix)]
fn setup_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn setup_sigpipe() {
    // Windows doesn't have SIGPIPE
}

fn main() {
    setup_sigpipe();

    if let Err(e) = run() {
        eprintln!("bumprt: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_args(&args)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.default_log_filter()),
    )
    .init();

    // Same shape as a generated program: one fixed buffer, one scope
    // around the work.
    let capacity = if config.use_arena() { config.arena_capacity } else { 0 };
    let mut backing = bumprt::alloc::heap(capacity)?;
    let mut arena = Arena::new(&mut backing);
    let scope = arena.scope();
    let pool = config.use_arena().then_some(&*scope);
    log::debug!("arena of {} bytes, mode {:?}", capacity, config.mode);

    match config.mode {
        Mode::Bytes => {
            let bytes = concat_files(&config, pool)?;
            report(&config, &scope, "result", &bytes)?;
            let out = output::open_output(&config)?;
            output::write_bytes(out, &bytes)?;
        }
        Mode::Text => {
            let text = concat_texts(&config, pool)?;
            if let Some(text) = &text {
                report(&config, &scope, "result", text.span())?;
            }
            emit_text(&config, text.as_ref().map(Text::as_bstr))?;
        }
        Mode::Args => {
            let bytes = input::args()?;
            report(&config, &scope, "args", &bytes)?;
            let text = bytes_to_text(&bytes)?;
            emit_text(&config, Some(text.as_bstr()))?;
        }
    }

    Ok(())
}

/// Fold every input into one span, allocating each step through the arena
fn concat_files<'a>(config: &Config, arena: Option<&'a Arena<'_>>) -> Result<Bytes<'a>> {
    let mut acc = Bytes::Empty;
    for path in config.inputs() {
        let contents = input::read_bytes(path)?;
        acc = try_concat_bytes(arena, Some(acc.as_slice()), Some(contents.as_slice()))?;
    }
    Ok(acc)
}

/// Text counterpart of [`concat_files`]
fn concat_texts<'a>(config: &Config, arena: Option<&'a Arena<'_>>) -> Result<Option<Text<'a>>> {
    let mut acc: Option<Text<'a>> = None;
    for path in config.inputs() {
        let next = if path == "-" {
            input::read_text(io::stdin().lock())?
        } else {
            input::read_file(path)?
        };
        let joined = try_concat(arena, acc.as_ref().map(Text::as_bstr), Some(next.as_bstr()))?;
        acc = Some(joined);
    }
    Ok(acc)
}

fn emit_text(config: &Config, text: Option<&BStr>) -> Result<()> {
    match &config.output_file {
        Some(path) => output::write_file(path, text.unwrap_or_default())?,
        None => {
            let stdout = io::stdout().lock();
            if config.newline {
                output::println(stdout, text)?;
            } else {
                output::print(stdout, text)?;
            }
        }
    }
    Ok(())
}

/// Debug output: arena usage and result ownership on stderr
fn report(config: &Config, arena: &Arena<'_>, label: &str, bytes: &Bytes<'_>) -> Result<()> {
    if config.debug {
        let stderr = io::stderr();
        let mut stderr = stderr.lock();
        debug::debug_arena(&mut stderr, arena)?;
        debug::debug_span(&mut stderr, label, bytes)?;
        stderr.flush()?;
    }
    Ok(())
}
