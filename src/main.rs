//! pinyinof - Pinyin renderings of Han words from a sorted on-disk dictionary
//!
//! pinyinof provides:
//! - Conversion of a raw frequency dictionary into a sorted, framed data file
//! - Binary search over that file without loading it into memory
//! - Cartesian-product rendering of every pronunciation of a word

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod flows;
mod store;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
