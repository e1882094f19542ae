use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexibloom::sizing::expected_fpr;
use lexibloom::{hash, wordlist, BloomFilter, FilterConfig};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn, Level};

/// Build, query and inspect word-list Bloom filters.
#[derive(Parser, Debug)]
#[command(name = "wordbloom", version, about)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log level (error, warn, info, debug, trace); overrides -v
    #[arg(long, env = "WORDBLOOM_LOG", global = true)]
    log_level: Option<Level>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a filter from a UTF-8 word list, one word per line
    Build {
        /// Word list to load
        #[arg(long)]
        words: PathBuf,
        /// Target false-positive rate
        #[arg(long, env = "WORDBLOOM_FPR", default_value_t = 0.01)]
        fpr: f64,
        /// Comma separated hash function names, in selection order
        #[arg(long, value_delimiter = ',')]
        hashes: Vec<String>,
        /// Where to write the encoded filter
        #[arg(long)]
        out: PathBuf,
    },
    /// Test words against an encoded filter
    Query {
        /// Encoded filter
        #[arg(long)]
        filter: PathBuf,
        /// Words to test
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print statistics of an encoded filter
    Info {
        /// Encoded filter
        #[arg(long)]
        filter: PathBuf,
    },
    /// Measure insert/query rates and observed false positives
    Measure {
        /// Largest element count to test
        #[arg(long, default_value_t = 100_000)]
        max_elements: usize,
        /// Number of element counts between 0 and the maximum
        #[arg(long, default_value_t = 4)]
        steps: usize,
        /// Target false-positive rate
        #[arg(long, env = "WORDBLOOM_FPR", default_value_t = 0.01)]
        fpr: f64,
    },
    /// List the registered hash functions in selection order
    Hashes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.unwrap_or(match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    });
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Build {
            words,
            fpr,
            hashes,
            out,
        } => build(&words, fpr, &hashes, &out),
        Command::Query { filter, words } => query(&filter, &words),
        Command::Info { filter } => {
            let filter = read_filter(&filter)?;
            println!("{}", filter.stats());
            Ok(())
        }
        Command::Measure {
            max_elements,
            steps,
            fpr,
        } => measure(max_elements, steps, fpr),
        Command::Hashes => {
            for hash_fn in hash::reference_family() {
                println!("{}", hash_fn.name());
            }
            Ok(())
        }
    }
}

fn build(words: &Path, fpr: f64, hashes: &[String], out: &Path) -> Result<()> {
    let seed_data = wordlist::load_words(words)
        .with_context(|| format!("failed to load word list {}", words.display()))?;
    anyhow::ensure!(!seed_data.is_empty(), "word list {} is empty", words.display());

    let mut config = FilterConfig {
        false_positive_rate: fpr,
        seed_data,
        ..FilterConfig::default()
    };
    if !hashes.is_empty() {
        config.hash_functions = hash::resolve_all(hashes)?;
    }

    let items = config.seed_data.len();
    let filter = BloomFilter::new(config).context("failed to build filter")?;
    info!(
        items,
        size = filter.size(),
        hash_functions = ?filter.hash_names(),
        "built filter"
    );

    std::fs::write(out, filter.to_bytes()?)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!(
        "{} words -> {} bits, {} hash functions ({})",
        items,
        filter.size(),
        filter.num_hash_functions(),
        filter.hash_names().join(", ")
    );
    Ok(())
}

fn read_filter(path: &Path) -> Result<BloomFilter> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    BloomFilter::from_bytes(&bytes).map_err(|err| {
        warn!(path = %path.display(), error = %err, "rejected filter blob");
        anyhow::Error::new(err).context(format!("{} is not a valid filter", path.display()))
    })
}

fn query(path: &Path, words: &[String]) -> Result<()> {
    let filter = read_filter(path)?;
    let stdout = std::io::stdout();
    write_verdicts(&filter, words, &mut stdout.lock())?;
    Ok(())
}

fn write_verdicts<W: Write>(filter: &BloomFilter, words: &[String], out: &mut W) -> io::Result<()> {
    for word in words {
        let verdict = if filter.contains(word) {
            "possibly present"
        } else {
            "definitely absent"
        };
        writeln!(out, "{}\t{}", word, verdict)?;
    }
    Ok(())
}

fn measure(max_elements: usize, steps: usize, fpr: f64) -> Result<()> {
    anyhow::ensure!(steps > 0, "steps must be > 0");
    let element_counts: Vec<usize> = (1..=steps).map(|i| max_elements * i / steps).collect();

    println!("elements,bits,hashes,insert_rate,query_rate,observed_fpr,expected_fpr");
    for n_elements in element_counts.into_iter().filter(|&n| n > 0) {
        let keys: Vec<String> = (0..n_elements).map(|i| format!("member-{}", i)).collect();
        let probes: Vec<String> = (0..n_elements).map(|i| format!("absent-{}", i)).collect();

        let start = Instant::now();
        let filter = BloomFilter::from_items(keys.iter().cloned(), fpr)?;
        let insert_time = start.elapsed().as_secs_f64();

        let start = Instant::now();
        let false_positives = probes.iter().filter(|p| filter.contains(p)).count();
        let query_time = start.elapsed().as_secs_f64();

        let missed = keys.iter().filter(|k| !filter.contains(k)).count();
        anyhow::ensure!(missed == 0, "{} inserted keys were not found", missed);

        println!(
            "{},{},{},{:.0},{:.0},{:.6},{:.6}",
            n_elements,
            filter.size(),
            filter.num_hash_functions(),
            n_elements as f64 / insert_time.max(f64::EPSILON),
            probes.len() as f64 / query_time.max(f64::EPSILON),
            false_positives as f64 / probes.len() as f64,
            expected_fpr(filter.size(), n_elements, filter.num_hash_functions())
        );
    }
    Ok(())
}
