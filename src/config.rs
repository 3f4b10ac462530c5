use crate::arena::DEFAULT_ARENA_CAPACITY;
use crate::cli::Args;
use crate::error::Result;

/// What the harness produces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Raw byte concatenation of the inputs
    Bytes,
    /// Terminated text concatenation of the inputs
    Text,
    /// Encoded process arguments
    Args,
}

/// Runtime configuration derived from CLI arguments
#[derive(Clone, Debug)]
pub struct Config {
    pub arena_capacity: usize,
    pub heap_only: bool,
    pub mode: Mode,
    pub newline: bool,
    pub debug: bool,
    pub output_file: Option<String>,
    pub input_files: Vec<String>,
}

impl Config {
    /// Build configuration from parsed CLI arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let mode = if args.args {
            Mode::Args
        } else if args.text {
            Mode::Text
        } else {
            Mode::Bytes
        };

        Ok(Config {
            arena_capacity: args.arena_capacity()?,
            heap_only: args.heap,
            mode,
            newline: args.newline,
            debug: args.debug,
            output_file: args.output.clone(),
            input_files: args.files.clone(),
        })
    }

    /// Input paths to read; stdin when none were given
    pub fn inputs(&self) -> Vec<&str> {
        if self.input_files.is_empty() {
            vec!["-"]
        } else {
            self.input_files.iter().map(String::as_str).collect()
        }
    }

    /// Whether results go through the arena at all
    pub fn use_arena(&self) -> bool {
        !self.heap_only && self.arena_capacity > 0
    }

    /// Log filter used when RUST_LOG is unset
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "warn" }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            heap_only: false,
            mode: Mode::Bytes,
            newline: false,
            debug: false,
            output_file: None,
            input_files: vec![],
        }
    }
}
