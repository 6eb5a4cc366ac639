//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::render::{OutputFormat, RenderConfig};
use crate::walker::filters::{FileFilters, TokenBudget};
use crate::walker::report::DEFAULT_TOP_N;
use crate::walker::WalkOptions;

/// codemerge - merge a source tree into one file and count its LLM tokens.
#[derive(Parser, Debug)]
#[command(name = "codemerge")]
#[command(
    author,
    version,
    about,
    long_about = r#"codemerge walks a directory tree, skips everything excluded by ignore rules,
and either concatenates the remaining files into one artifact (merge) or ranks
them by token count (tokens). Tokens are counted with the cl100k_base encoding.

Ignore rules, applied together as one gitignore-style rule set:
- the .git/ directory (always)
- patterns from ROOT/.gitignore (only the root file; nested .gitignore files
  are NOT read, although they are never merged either)
- patterns passed with --ignores

Examples:
    codemerge merge -o merged.txt
    codemerge merge -o merged.txt -i 'docs/' -i '*.lock'
    codemerge tokens --count 20
    codemerge tokens --match '*.rs' --format json
"#
)]
pub struct Cli {
    /// Root directory to walk.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to walk (defaults to the current directory).\n\n\
Paths written to the merge artifact and shown in reports are relative to this root.\n\
The root .gitignore is looked up here."
    )]
    pub root: PathBuf,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (overrides --verbose).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Suppress per-file progress and the merge summary, regardless of --verbose.\n\
The tokens report is still printed."
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every walking command
#[derive(clap::Args, Debug, Clone)]
pub struct WalkArgs {
    /// Extra ignore patterns (gitignore syntax).
    #[arg(
        short,
        long,
        value_name = "PATTERN",
        action = ArgAction::Append,
        value_delimiter = ',',
        long_help = "Extra ignore patterns using .gitignore syntax (`*`, trailing `/`, leading `!`).\n\n\
Applied after the root .gitignore, so a `!pattern` here can re-include a file the\n\
.gitignore excluded. Repeat the flag or separate patterns with commas."
    )]
    pub ignores: Vec<String>,

    /// Only process files matching these globs.
    #[arg(
        short,
        long = "match",
        value_name = "GLOB",
        action = ArgAction::Append,
        long_help = "Only process files matching at least one of these globs (gitignore glob\n\
syntax, e.g. `*.rs`, `src/**`). Ignore rules still apply first."
    )]
    pub matches: Vec<String>,

    /// Print each processed file (default: true).
    #[arg(
        short,
        long,
        value_name = "BOOL",
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set,
        long_help = "Print `File: <path> Tokens: <n>` to stderr for every processed file.\n\n\
Enabled by default; pass `--verbose=false` to turn it off."
    )]
    pub verbose: bool,

    /// Drop files with this many tokens or more.
    #[arg(
        long = "max-budget",
        value_name = "TOKENS",
        num_args = 0..=1,
        default_missing_value = DEFAULT_MAX_BUDGET_STR,
        long_help = "Drop files whose token count is at or above TOKENS (10000 when the value is\n\
omitted). Dropped files are neither merged nor counted."
    )]
    pub max_budget: Option<usize>,

    /// Drop files with fewer tokens than this.
    #[arg(long = "min-budget", value_name = "TOKENS")]
    pub min_budget: Option<usize>,

    /// Drop empty files.
    #[arg(long)]
    pub skip_empty: bool,
}

const DEFAULT_MAX_BUDGET_STR: &str = "10000";

impl WalkArgs {
    fn into_options(self, quiet: bool) -> WalkOptions {
        WalkOptions {
            ignores: self.ignores,
            matches: self.matches,
            verbose: self.verbose && !quiet,
            filters: FileFilters {
                budget: TokenBudget::new(self.min_budget, self.max_budget),
                skip_empty: self.skip_empty,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge every included file into one output file.
    #[command(
        visible_alias = "m",
        long_about = "Concatenate every included file under ROOT into OUTPUT.\n\n\
Each file is written as a `File: <relative path>` header line, the raw file\n\
content, and a trailing newline, in lexical depth-first order.\n\n\
Examples:\n\
  codemerge merge -o merged.txt\n\
  OUTPUT_FILE=merged.txt codemerge merge --ignores 'tests/'\n"
    )]
    Merge {
        /// Output file.
        #[arg(
            short,
            long,
            env = "OUTPUT_FILE",
            value_name = "FILE",
            long_help = "Output file, relative to the current working directory.\n\n\
Created or truncated before the walk. If it lies inside ROOT it is never merged\n\
into itself."
        )]
        output: PathBuf,

        #[command(flatten)]
        walk: WalkArgs,
    },

    /// Rank files by token count.
    #[command(
        visible_alias = "t",
        long_about = "Count tokens for every included file under ROOT and print the largest\n\
files followed by the grand total. Nothing is written to disk.\n\n\
Examples:\n\
  codemerge tokens\n\
  codemerge tokens -c 25 -i 'fixtures/'\n\
  codemerge tokens --format json --pretty\n"
    )]
    Tokens {
        /// Number of files to list.
        #[arg(short, long, value_name = "N", default_value_t = DEFAULT_TOP_N)]
        count: usize,

        #[command(flatten)]
        walk: WalkArgs,

        /// Report format (text/json).
        #[arg(
            long,
            default_value = "text",
            value_parser = ["text", "json"],
            value_name = "FORMAT"
        )]
        format: String,

        /// Pretty-print JSON output with indentation.
        #[arg(long)]
        pretty: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let root = cli.root;

    match cli.command {
        Commands::Merge { output, walk } => {
            crate::flows::merge::run_merge(&root, &output, walk.into_options(cli.quiet))
        }

        Commands::Tokens {
            count,
            walk,
            format,
            pretty,
        } => {
            let format: OutputFormat = format.parse().map_err(anyhow::Error::msg)?;
            let config = RenderConfig::with_pretty(format, pretty);
            crate::flows::tokens::run_tokens(&root, count, walk.into_options(cli.quiet), config)
        }
    }
}
