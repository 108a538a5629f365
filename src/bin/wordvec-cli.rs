//! wordvec CLI
//!
//! Interactive nearest-neighbour and analogy queries against a local vector
//! file.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use wordvec::format::{load_with, DecoderConfig};
use wordvec::{analogy, distance, VectorTable, WordDistance};

/// wordvec CLI - Interactive Queries
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Binary vector file
    #[arg(short, long, default_value = "vectors.bin")]
    vectors: PathBuf,

    /// Number of results per query
    #[arg(short, long, default_value_t = 10)]
    limit: usize,

    /// Fail to load if any vector has zero norm
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("wordvec=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let table = load_with(
        &args.vectors,
        DecoderConfig::default().with_reject_degenerate(args.strict),
    )?;

    println!(
        "Loaded {} words ({} dimensions). Type 'help' for usage, 'quit' to exit.\n",
        table.len(),
        table.dimension()
    );

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("wordvec> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        if input.eq_ignore_ascii_case("help") {
            print_help();
            continue;
        }

        match run_query(&table, input, args.limit) {
            Ok(results) => print_results(&results),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

fn run_query(table: &VectorTable, input: &str, limit: usize) -> anyhow::Result<Vec<WordDistance>> {
    let words: Vec<&str> = input.split_whitespace().collect();

    match words.as_slice() {
        [word] => Ok(distance(table, word, limit)?),
        [word1, word2, word3] => Ok(analogy(table, word1, word2, word3, limit)?),
        _ => anyhow::bail!("Expected one word or three words, got {}", words.len()),
    }
}

fn print_results(results: &[WordDistance]) {
    for result in results {
        println!("{} {}", result.word, result.score);
    }
}

fn print_help() {
    println!(
        r#"
Usage:

  <word>                  - Words closest to <word>
  <word1> <word2> <word3> - Words closest to word2 - word1 + word3

  help                    - Show this help
  quit / exit             - Exit the CLI

Examples:
  paris
  man king woman          (king - man + woman)
"#
    );
}
