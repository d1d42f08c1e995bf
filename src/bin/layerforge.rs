use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "layerforge", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a collection from a catalog JSON.
    Generate(GenerateArgs),
    /// Report realized trait distribution of a generated collection.
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input catalog JSON (`layers` + optional `traits`).
    #[arg(long)]
    catalog: PathBuf,

    /// Generation options JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Collection size.
    #[arg(long)]
    size: Option<u64>,

    /// PRNG seed (negative 32-bit values wrap to u32).
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Sample traits uniformly, ignoring rarity.
    #[arg(long)]
    no_rarity: bool,

    /// Allow repeated trait-sets.
    #[arg(long)]
    allow_duplicates: bool,

    /// Clamp oversized duplicate-free requests instead of failing.
    #[arg(long)]
    clamp: bool,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Generated collection JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Include a rarest-first ranking.
    #[arg(long)]
    rank: bool,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Analyze(args) => cmd_analyze(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let source = layerforge::CatalogSource::from_path(&args.catalog)?;

    let mut opts = match &args.config {
        Some(path) => layerforge::GenerateOpts::from_path(path)?,
        None => layerforge::GenerateOpts::default(),
    };
    if let Some(size) = args.size {
        opts.size = size;
    }
    if let Some(seed) = args.seed {
        opts.seed = layerforge::Seed::from_signed(seed)?;
    }
    if args.no_rarity {
        opts.respect_rarity = false;
    }
    if args.allow_duplicates {
        opts.avoid_duplicates = false;
    }
    if args.clamp {
        opts.overflow = layerforge::OverflowPolicy::Clamp;
    }

    let catalog = layerforge::Catalog::from_source(&source, opts.respect_rarity);
    let set = layerforge::generate(&catalog, &opts)?;

    write_json(args.out.as_deref(), &set)?;

    eprintln!(
        "generated {} of {} (seed {}, {:?}) fingerprint {}",
        set.len(),
        set.requested,
        set.seed,
        set.outcome,
        layerforge::fingerprint_set(&set)
    );
    Ok(())
}

#[derive(serde::Serialize)]
struct AnalyzeOutput {
    report: layerforge::DistributionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranking: Option<Vec<layerforge::RankedItem>>,
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open collection '{}'", args.in_path.display()))?;
    let set: layerforge::GeneratedSet =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse collection JSON")?;

    let report = layerforge::analyze(&set.items);
    let ranking = args
        .rank
        .then(|| layerforge::rank_by_rarity(&set.items, &report));

    write_json(args.out.as_deref(), &AnalyzeOutput { report, ranking })
}

fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value)
                .with_context(|| format!("write json '{}'", path.display()))?;
            w.flush()?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write json to stdout")?;
            writeln!(w)?;
        }
    }
    Ok(())
}
