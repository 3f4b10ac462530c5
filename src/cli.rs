use clap::Parser;

use crate::arena::DEFAULT_ARENA_CAPACITY;
use crate::error::{Result, RuntimeError};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "bumprt",
    about = "Concatenate inputs through a scoped bump arena with heap fallback"
)]
pub struct Args {
    /// Arena size in bytes (accepts K and M suffixes)
    #[arg(short = 'c', long = "arena-capacity", value_name = "SIZE")]
    pub arena_capacity: Option<String>,

    /// Bypass the arena and allocate every result on the heap
    #[arg(long)]
    pub heap: bool,

    /// Concatenate inputs as terminated text instead of raw bytes
    #[arg(short = 't', long)]
    pub text: bool,

    /// Emit the encoded process arguments instead of reading files
    #[arg(long)]
    pub args: bool,

    /// Append a newline when printing text
    #[arg(short = 'n', long)]
    pub newline: bool,

    /// Write result to FILE instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<String>,

    /// Report arena usage and result ownership on stderr
    #[arg(long)]
    pub debug: bool,

    /// Input files
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

impl Args {
    /// Parse -c argument, handling K/M suffixes
    pub fn arena_capacity(&self) -> Result<usize> {
        match &self.arena_capacity {
            None => Ok(DEFAULT_ARENA_CAPACITY),
            Some(s) => parse_size(s),
        }
    }
}

fn parse_size(s: &str) -> Result<usize> {
    let invalid = || RuntimeError::InvalidCapacity(s.to_string());
    let (digits, scale) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024),
        Some(b'm' | b'M') => (&s[..s.len() - 1], 1024 * 1024),
        _ => (s, 1),
    };
    let value: usize = digits.parse().map_err(|_| invalid())?;
    value.checked_mul(scale).ok_or_else(invalid)
}
