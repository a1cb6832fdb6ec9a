use clap::Parser;
use linkrec::{pipeline, Config};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Content-similarity link recommendations with a cached embedding store
#[derive(Parser, Debug)]
#[command(name = "linkrec")]
#[command(about = "Compute content-similarity link recommendations", long_about = None)]
struct Args {
    /// Path to the crawler's article metadata table (CSV)
    #[arg(short, long, default_value = "articles_metadata.csv")]
    input: PathBuf,

    /// Path for the recommendation table (CSV)
    #[arg(short, long, default_value = "internal_link_recommendations.csv")]
    output: PathBuf,

    /// Path for the persisted embedding store
    #[arg(long, default_value = "embeddings.bin")]
    cache: PathBuf,

    /// Number of recommended neighbors per document
    #[arg(short = 'k', long, default_value_t = 8)]
    top_k: usize,

    /// Embedding dimension
    #[arg(long, default_value_t = linkrec::DEFAULT_DIM)]
    dim: usize,

    /// Limit the corpus to the first N documents (testing)
    #[arg(long)]
    max_rows: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting linkrec v{}", env!("CARGO_PKG_VERSION"));
    info!("Input table: {:?}", args.input);
    info!("Embedding store: {:?}", args.cache);

    let config = Config {
        input: args.input,
        output: args.output,
        cache: args.cache,
        dim: args.dim,
        top_k: args.top_k,
        max_rows: args.max_rows,
    };

    pipeline::run(&config)?;

    info!("Done");
    Ok(())
}
