//! Command-line interface to vocabstudy.

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context as _};
use clap::Parser;
use dotenv::dotenv;
use log::{debug, warn};
use vocabstudy::{
    assessment::Assessment,
    extract::{TokenExtractor, DEFAULT_MAX_CHARS, DEFAULT_MIN_CHARS},
    report::render_report,
    sample::{sample, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED},
    score::{Scorer, DEFAULT_Z},
    tokens::TokenSet,
    ui::Ui,
    Result,
};

#[derive(Debug, Parser)]
/// Vocabulary-size estimation for students of Tamil. Extract word types from
/// OCR'd textbook pages, sample them into a self-assessment, and score the
/// completed assessment.
#[command(name = "vocabstudy", version)]
enum Args {
    /// Extract unique Tamil tokens from OCR text, one file per page.
    #[command(name = "extract")]
    Extract {
        /// Where to write the unique tokens (one per line).
        out_tokens: PathBuf,

        /// OCR text files, one per page, in page order.
        #[arg(required = true)]
        pages: Vec<PathBuf>,

        /// Drop tokens shorter than this many characters.
        #[arg(long, default_value_t = DEFAULT_MIN_CHARS)]
        min_chars: usize,

        /// Drop tokens longer than this many characters.
        #[arg(long, default_value_t = DEFAULT_MAX_CHARS)]
        max_chars: usize,
    },

    /// Sample tokens and build an assessment CSV (plus a .meta.txt file).
    #[command(name = "sample")]
    Sample {
        /// Path to the token list.
        tokens: PathBuf,

        /// Where to write the assessment CSV.
        out_csv: PathBuf,

        /// Sample size. Capped at the number of unique tokens.
        #[arg(long = "n", env = "VOCABSTUDY_SAMPLE_SIZE", default_value_t = DEFAULT_SAMPLE_SIZE)]
        n: usize,

        /// Random seed, so that the same sample can be drawn again.
        #[arg(long, env = "VOCABSTUDY_SEED", default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Score a completed assessment and estimate vocabulary size.
    #[command(name = "score")]
    Score {
        /// The filled-in assessment CSV.
        csv: PathBuf,

        /// Size of an external word list to extrapolate to.
        #[arg(long)]
        external: Option<u64>,

        /// Metadata file to use instead of the one next to the CSV.
        #[arg(long)]
        meta: Option<PathBuf>,

        /// z-score for the Wilson interval (1.96 is 95%).
        #[arg(long, env = "VOCABSTUDY_Z", default_value_t = DEFAULT_Z)]
        z: f64,
    },
}

// Choose and run the appropriate command.
fn main() -> Result<()> {
    dotenv().ok();
    let ui = Ui::init();

    let args: Args = Args::parse();
    match args {
        Args::Extract {
            out_tokens,
            pages,
            min_chars,
            max_chars,
        } => cmd_extract(&ui, &out_tokens, &pages, min_chars, max_chars),
        Args::Sample {
            tokens,
            out_csv,
            n,
            seed,
        } => cmd_sample(&tokens, &out_csv, n, seed),
        Args::Score {
            csv,
            external,
            meta,
            z,
        } => cmd_score(&csv, external, meta.as_deref(), z),
    }
}

fn cmd_extract(
    ui: &Ui,
    out_tokens: &Path,
    pages: &[PathBuf],
    min_chars: usize,
    max_chars: usize,
) -> Result<()> {
    if min_chars > max_chars {
        bail!(
            "--min-chars ({}) cannot be larger than --max-chars ({})",
            min_chars,
            max_chars
        );
    }

    let mut extractor = TokenExtractor::new(min_chars, max_chars);
    let pb = ui.new_progress_bar(pages.len() as u64);
    for (i, page) in pages.iter().enumerate() {
        let text = read_to_string(page)
            .with_context(|| format!("could not read OCR text from {}", page.display()))?;
        let accepted = extractor.add_page(&text);
        debug!(
            "[{}/{}] {}: {} tokens, {} unique so far",
            i + 1,
            pages.len(),
            page.display(),
            accepted,
            extractor.unique_count()
        );
        pb.set_message(format!("{} unique tokens", extractor.unique_count()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let tokens = extractor.into_token_set();
    if tokens.is_empty() {
        warn!("no Tamil tokens found in {} page(s)", pages.len());
    }
    tokens.write_to_path(out_tokens)?;
    println!(
        "Wrote {} unique tokens to {}",
        tokens.len(),
        out_tokens.display()
    );
    Ok(())
}

fn cmd_sample(tokens_path: &Path, out_csv: &Path, n: usize, seed: u64) -> Result<()> {
    let tokens = TokenSet::from_path(tokens_path)?;
    let (sample, _) = sample(&tokens, n, seed)
        .with_context(|| format!("cannot build an assessment from {}", tokens_path.display()))?;
    let meta_path = Assessment::create(out_csv, &sample)?;
    println!(
        "Wrote assessment with {} of {} tokens to {} (metadata in {})",
        sample.len(),
        sample.population,
        out_csv.display(),
        meta_path.display()
    );
    Ok(())
}

fn cmd_score(
    csv: &Path,
    external: Option<u64>,
    meta_path: Option<&Path>,
    z: f64,
) -> Result<()> {
    let scorer = Scorer::new(z)?;
    let assessment = Assessment::load(csv, meta_path)?;
    if let Some(sample_size) = assessment.meta.and_then(|m| m.sample_size) {
        if sample_size != assessment.records.len() {
            warn!(
                "metadata says {} words were sampled but {} has {} rows",
                sample_size,
                csv.display(),
                assessment.records.len()
            );
        }
    }
    let result = scorer.score(&assessment.records, assessment.meta.as_ref(), external);
    print!("{}", render_report(&result));
    Ok(())
}
