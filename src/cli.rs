//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};
use crate::store::locator::StoreConfig;

/// pinyinof - every pinyin rendering of a Han word, from a sorted data file.
#[derive(Parser, Debug)]
#[command(name = "pinyinof")]
#[command(
    author,
    version,
    about,
    long_about = r#"pinyinof looks up Han words in a sorted, newline-framed pinyin data file
and prints every combination of the per-character pronunciations.

The data file is binary-searched directly on disk; nothing is loaded into memory.

Typical workflow:
    pinyinof convert --input raw-dict.txt --output pinyin.txt
    pinyinof max-line --input pinyin.txt
    pinyinof of --data pinyin.txt --max-line 32 你的 中国
"#
)]
pub struct Cli {
    /// Output format (text/jsonl).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format for query results.\n\n\
Supported values:\n\
- text (default): one line per word, renderings separated by spaces\n\
- jsonl: one JSON object per word\n\n\
Only the `of` command produces query results."
    )]
    pub format: String,

    /// Quiet mode (errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors to stderr. Query output on stdout is unaffected."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log debug diagnostics to stderr, including data file checks and\n\
binary search steps (set RUST_LOG=trace for every step)."
    )]
    pub verbose: bool,

    /// Pretty-print jsonl output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON objects with indentation for human readability.\n\n\
Has no effect on text output."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every pinyin rendering of each word.
    #[command(
        long_about = r#"Look up every character of each WORD in the data file and print all
combinations of their pronunciations on one line, separated by spaces.

If no WORD is given, words are read from stdin, one per line.

Any non-Han character, unknown character or malformed data file stops the run
with an error naming the word's source (arg N or line N).

Examples:
    pinyinof of --data pinyin.txt 你的
    echo 中国 | pinyinof of --data pinyin.txt
"#
    )]
    Of {
        /// Words to look up (read from stdin when omitted).
        #[arg(value_name = "WORD", num_args = 0..)]
        words: Vec<String>,

        /// Path to the pinyin data file.
        #[arg(
            long,
            env = "PINYINOF_DATA",
            value_name = "PATH",
            long_help = "Path to the sorted pinyin data file produced by `pinyinof convert`.\n\n\
The file must start and end with a newline."
        )]
        data: PathBuf,

        /// Maximum byte size of a line in the data file.
        #[arg(
            long,
            env = "PINYINOF_MAX_LINE",
            default_value_t = crate::store::locator::DEFAULT_MAX_LINE,
            value_name = "BYTES",
            long_help = "Maximum byte size of a line in the data file, newline included.\n\n\
Every read during the search is bounded by this value. If the data file has a\n\
longer line the lookup fails; use `pinyinof max-line` to find the right value."
        )]
        max_line: usize,
    },

    /// Convert a raw frequency dictionary into a pinyin data file.
    #[command(
        long_about = r#"Read a raw dictionary with lines like

    的 4886 de:99.9671% di:0.0329%

and write the sorted, newline-framed data file used by `of`:

    的de,di

Lines with fewer than three fields, or whose first field is not a single
character, are skipped. A pronunciation that is not lowercase a-z stops the
conversion with the offending line number.

Examples:
    pinyinof convert < raw-dict.txt > pinyin.txt
    pinyinof convert --input raw-dict.txt --output pinyin.txt
"#
    )]
    Convert {
        /// Raw dictionary to read (stdin when omitted).
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// Data file to write (stdout when omitted).
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Print the longest line size in bytes.
    #[command(
        long_about = "Print the size in bytes of the longest line, newline included.\n\n\
Run it on a converted data file to pick the --max-line value for `of`.\n\n\
Example:\n\
  pinyinof max-line --input pinyin.txt\n"
    )]
    MaxLine {
        /// File to measure (stdin when omitted).
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    crate::core::logging::init(cli.quiet, cli.verbose);

    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    match cli.command {
        Commands::Of {
            words,
            data,
            max_line,
        } => {
            let config = StoreConfig::new(data).with_max_line(max_line);
            crate::flows::query::run_query(&config, &words, render_config)
        }

        Commands::Convert { input, output } => {
            crate::flows::convert::run_convert(input.as_deref(), output.as_deref())
        }

        Commands::MaxLine { input } => crate::flows::max_line::run_max_line(input.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_of_with_defaults() {
        let cli = Cli::try_parse_from(["pinyinof", "of", "--data", "p.txt", "你的", "中国"]).unwrap();
        match cli.command {
            Commands::Of {
                words,
                data,
                max_line,
            } => {
                assert_eq!(words, vec!["你的", "中国"]);
                assert_eq!(data, PathBuf::from("p.txt"));
                assert_eq!(max_line, 32);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.format, "text");
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pinyinof", "max-line", "--format", "jsonl", "-q", "--input", "x.txt",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.format, "jsonl");
        assert!(matches!(cli.command, Commands::MaxLine { input: Some(_) }));
    }

    #[test]
    fn test_max_line_must_be_number() {
        assert!(
            Cli::try_parse_from(["pinyinof", "of", "--data", "p", "--max-line", "x"]).is_err()
        );
    }
}
