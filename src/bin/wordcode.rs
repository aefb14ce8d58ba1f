//! Command-line front end.
//!
//! ```bash
//! wordcode encode o that this too too solid flesh would melt
//! wordcode decode informatizing cragginess heterokont flattener
//! ```
//!
//! The coded or decoded sentence goes to stdout; diagnostics go to stderr and
//! follow `RUST_LOG`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use wordcode::{vocab, FrequencyTable, SentenceCodec};

/// Re-spell English sentences as dense dictionary words, and back.
#[derive(Parser, Debug)]
#[command(name = "wordcode", version)]
struct Args {
    /// Word frequency CSV with `word` and `frequency` columns
    #[arg(long, env = "WORDCODE_FREQUENCIES", default_value = "word_freqs.csv")]
    frequencies: PathBuf,

    /// Dictionary word list, one word per line
    #[arg(long, env = "WORDCODE_DICTIONARY", default_value = "dictionary.txt")]
    dictionary: PathBuf,

    /// Bits spelled by each dictionary word
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u32).range(1..=24))]
    group_bits: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a sentence into dictionary words
    Encode {
        /// Words of the sentence
        #[arg(trailing_var_arg = true)]
        words: Vec<String>,
    },
    /// Decode dictionary words back into a sentence
    Decode {
        /// Return every decoded word even if the end marker is missing
        #[arg(long)]
        lossy: bool,

        /// Dictionary words produced by `encode`
        #[arg(trailing_var_arg = true)]
        words: Vec<String>,
    },
}

fn run(args: Args) -> wordcode::Result<String> {
    let counts = vocab::load_frequencies(&args.frequencies)?;
    let table = FrequencyTable::builder()
        .max_entries((1usize << args.group_bits) - 1)
        .build(counts)?;
    let dictionary = vocab::load_dictionary(&args.dictionary, args.group_bits)?;
    let codec = SentenceCodec::new(&table, &dictionary)?;

    info!(
        frequencies = %args.frequencies.display(),
        dictionary = %args.dictionary.display(),
        entries = codec.table().len(),
        group_bits = codec.dictionary().group_bits(),
        "loaded vocabulary"
    );

    let words: Vec<String> = match &args.command {
        Command::Encode { words } | Command::Decode { words, .. } => words
            .iter()
            .flat_map(|w| w.split_whitespace())
            .map(str::to_string)
            .collect(),
    };

    let output = match args.command {
        Command::Encode { .. } => codec.encode(&words)?,
        Command::Decode { lossy: false, .. } => codec.decode(&words)?,
        Command::Decode { lossy: true, .. } => codec.decode_lossy(&words)?,
    };
    Ok(output.join(" "))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(sentence) => {
            println!("{sentence}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "wordcode failed");
            eprintln!("wordcode: {e}");
            ExitCode::FAILURE
        }
    }
}
