use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tierlens_catalog::{load_catalog, MemoryCatalog, SourceCatalog};
use tierlens_engine::{merge, project, DetailLevel, UnifiedTaxonomy, ViewFilter};
use tierlens_model::Selection;

use crate::profile::ComparisonProfile;
use crate::render::ViewOutput;

mod profile;
mod render;

#[derive(Parser)]
#[command(name = "tierlens")]
#[command(about = "Compare licensing tiers across source documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List loaded source documents and their tiers
    Sources(SourcesArgs),

    /// Merge selected tiers into one unified comparison
    Merge(MergeArgs),

    /// Merge, then filter the comparison into a view
    View(ViewArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Source document JSON file (repeatable, load order preserved)
    #[arg(long = "doc", value_name = "FILE")]
    docs: Vec<PathBuf>,

    /// Tier to compare, as "SOURCE:TIER" (repeatable, order = column order)
    #[arg(long = "select", value_name = "SOURCE:TIER")]
    select: Vec<String>,

    /// Comparison profile (TOML) supplying documents, selection and view
    /// defaults; --doc/--select add on top of it
    #[arg(long)]
    profile: Option<PathBuf>,
}

#[derive(Args)]
struct SourcesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON format
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct MergeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON format
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ViewArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Case-insensitive substring matched against names and descriptions
    #[arg(long, default_value = "")]
    query: String,

    /// Category to keep (repeatable; default keeps all)
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Keep only rows where the selected tiers disagree
    #[arg(long)]
    diff_only: bool,

    /// Cell detail (defaults to the profile's, then to full)
    #[arg(long, value_enum)]
    detail: Option<DetailArg>,

    /// Output JSON format
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DetailArg {
    /// Exact status per column
    Full,
    /// Granted / not granted only
    Presence,
}

impl DetailArg {
    const fn as_domain(self) -> DetailLevel {
        match self {
            Self::Full => DetailLevel::Full,
            Self::Presence => DetailLevel::Presence,
        }
    }
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Auto-enable quiet mode when --json is used (stdout must stay parseable).
    let json_output = match &cli.command {
        Commands::Sources(args) => args.json,
        Commands::Merge(args) => args.json,
        Commands::View(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Sources(args) => run_sources(args),
        Commands::Merge(args) => run_merge(args),
        Commands::View(args) => run_view(args),
    }
}

struct Inputs {
    catalog: MemoryCatalog,
    selection: Selection,
    filter: ViewFilter,
    detail: DetailLevel,
}

fn load_inputs(args: &InputArgs) -> Result<Inputs> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut selection = Selection::new();
    let mut filter = ViewFilter::new();
    let mut detail = DetailLevel::Full;

    if let Some(profile_path) = &args.profile {
        let profile = ComparisonProfile::load(profile_path)?;
        paths.extend(profile.sources);
        for entry in &profile.selection {
            selection.toggle(&entry.source, &entry.tier);
        }
        filter = profile.view;
        detail = profile.detail;
    }
    paths.extend(args.docs.iter().cloned());

    if paths.is_empty() {
        anyhow::bail!("No source documents: pass --doc or --profile");
    }

    let catalog = load_catalog(&paths).context("Failed to load source documents")?;

    for spec in &args.select {
        let (source, tier) = spec
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("--select expects SOURCE:TIER, got '{spec}'"))?;
        if !selection.is_selected(source, tier) {
            selection.toggle(source, tier);
        }
    }

    for entry in selection.iter() {
        if let Some(document) = catalog.resolve(&entry.source_id) {
            if !document.taxonomy.has_tier(&entry.tier) {
                log::warn!(
                    "Source '{}' does not declare tier '{}'; its column will be all-excluded",
                    entry.source_id,
                    entry.tier
                );
            }
        }
    }

    Ok(Inputs {
        catalog,
        selection,
        filter,
        detail,
    })
}

fn run_sources(args: SourcesArgs) -> Result<()> {
    let inputs = load_inputs(&args.input)?;

    if args.json {
        let summaries: Vec<render::SourceSummary> = inputs
            .catalog
            .documents()
            .iter()
            .map(render::SourceSummary::from_document)
            .collect();
        emit_json(&summaries, args.pretty)
    } else {
        for document in inputs.catalog.documents() {
            println!(
                "{}  {} (tiers: {}; {} features)",
                document.id,
                document.title,
                document.taxonomy.tiers.join(", "),
                document.taxonomy.feature_count()
            );
        }
        Ok(())
    }
}

fn run_merge(args: MergeArgs) -> Result<()> {
    let inputs = load_inputs(&args.input)?;
    if inputs.selection.is_empty() {
        log::warn!("Nothing selected; the comparison will be empty");
    }

    let unified = merge(&inputs.selection, &inputs.catalog);

    if args.json {
        emit_json(&unified, args.pretty)
    } else {
        print_unified(&unified);
        Ok(())
    }
}

fn run_view(args: ViewArgs) -> Result<()> {
    let inputs = load_inputs(&args.input)?;

    let mut filter = inputs.filter;
    if !args.query.is_empty() {
        filter.query = args.query.clone();
    }
    filter.categories.extend(args.categories.iter().cloned());
    if args.diff_only {
        filter.diff_only = true;
    }
    let detail = args.detail.map_or(inputs.detail, DetailArg::as_domain);

    if inputs.selection.is_empty() {
        log::warn!("Nothing selected; the view will be empty");
    }
    let unified = merge(&inputs.selection, &inputs.catalog);
    let view = project(&unified, &filter);
    let output = render::view_output(&unified.columns, &view, detail);

    if args.json {
        emit_json(&output, args.pretty)
    } else {
        print_view(&output);
        Ok(())
    }
}

fn emit_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn print_unified(unified: &UnifiedTaxonomy) {
    if unified.columns.is_empty() {
        println!("(empty comparison)");
        return;
    }

    println!("Columns:");
    for column in &unified.columns {
        println!("  {} [{}]", column.label, column.key);
    }

    for category in &unified.categories {
        println!();
        println!("# {}", category.name);
        for row in &category.features {
            let marker = if row.is_diff { "*" } else { " " };
            let cells: Vec<String> = unified
                .columns
                .iter()
                .map(|column| row.status_for(&column.key).to_string())
                .collect();
            println!("{} {} ({})", marker, row.name, cells.join(" / "));
        }
    }
}

fn print_view(output: &ViewOutput) {
    if output.categories.is_empty() {
        println!("(no rows match the current view)");
        return;
    }

    println!("{}", output.columns.join(" | "));
    for category in &output.categories {
        println!();
        println!("# {}", category.name);
        for row in &category.features {
            let marker = if row.is_diff { "*" } else { " " };
            let cells: Vec<String> = row.cells.iter().map(ToString::to_string).collect();
            println!("{} {} ({})", marker, row.name, cells.join(" / "));
        }
    }
}
