//! Stackbrush: the data pipeline and brush selection core of waterfall and
//! stacked bar charts.
//!
//! Loose tabular rows are adapted into a canonical [`Dataset`](model::Dataset)
//! of labelled entries, each holding signed, colored segments. Pure transform
//! operators reshape a dataset without touching the original, and the
//! [`SelectionEngine`](selection::SelectionEngine) turns pixel-space brush
//! gestures into the subset of entries they cover, with summary statistics.
//!
//! # Modules
//!
//! - [`model`]: canonical dataset types and JSON/CSV/YAML readers
//! - [`validation`]: structural validation with first-violation errors
//! - [`adapter`]: loose rows to canonical entries
//! - [`transform`]: sort, aggregate, normalize, percentages and friends
//! - [`sample`]: seeded synthetic datasets
//! - [`processor`]: the operators bundled behind one handle
//! - [`scale`]: the scale capabilities the selection engine consumes
//! - [`selection`]: brush state, entry mapping, summaries and highlighting
//! - [`error`]: error types for stackbrush operations

pub mod adapter;
pub mod error;
pub mod model;
pub mod processor;
pub mod sample;
pub mod scale;
pub mod selection;
pub mod transform;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::Level;

pub use error::StackError;

use model::io_rows::RowFormat;
use model::Dataset;

/// The stackbrush CLI application.
#[derive(Parser)]
#[command(name = "stackbrush")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log pipeline and selection details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a canonical JSON dataset.
    Validate(ValidateArgs),
    /// Convert loose JSON, YAML or CSV rows into a canonical dataset.
    Convert(ConvertArgs),
    /// Apply a transform operator to a canonical dataset.
    Transform(TransformArgs),
    /// Generate a random dataset.
    Sample(SampleArgs),
    /// Brush a pixel range over a band layout and summarize the selection.
    Select(SelectArgs),
}

#[derive(clap::Args)]
struct ValidateArgs {
    /// Input file to validate.
    input: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Input file with rows.
    input: PathBuf,

    /// Input format ('json', 'yaml' or 'csv'). Guessed from the extension if omitted.
    #[arg(long)]
    from: Option<String>,

    /// Column holding the numeric value.
    #[arg(long, default_value = "value")]
    value_column: String,

    /// Column holding the category label.
    #[arg(long, default_value = "label")]
    label_column: String,

    /// Column holding the segment color.
    #[arg(long, default_value = "color")]
    color_column: String,

    /// Color for rows without one.
    #[arg(long, default_value = adapter::DEFAULT_COLOR)]
    default_color: String,

    /// Do not parse currency-formatted strings into numbers.
    #[arg(long)]
    no_parse_numbers: bool,

    /// Output file (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct TransformArgs {
    /// Input canonical JSON dataset.
    input: PathBuf,

    /// Operator ('sort', 'normalize', 'aggregate', 'percentages' or 'restore').
    #[arg(long)]
    op: String,

    /// Sort key ('label', 'total', 'max-stack' or 'stack-count').
    #[arg(long, default_value = "label")]
    key: String,

    /// Sort direction ('asc' or 'desc').
    #[arg(long, default_value = "asc")]
    direction: String,

    /// Largest absolute value after normalizing.
    #[arg(long, default_value_t = transform::DEFAULT_TARGET_MAX)]
    target_max: f64,

    /// Aggregation mode ('sum', 'average', 'max' or 'min').
    #[arg(long, default_value = "sum")]
    mode: String,

    /// Output file (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SampleArgs {
    /// Number of entries.
    #[arg(long, default_value_t = 8)]
    categories: usize,

    /// Maximum segments per entry.
    #[arg(long, default_value_t = 3)]
    max_stacks: usize,

    /// Smallest segment magnitude.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    min: f64,

    /// Largest segment magnitude.
    #[arg(long, default_value_t = 100.0, allow_negative_numbers = true)]
    max: f64,

    /// Random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct SelectArgs {
    /// Input canonical JSON dataset.
    input: PathBuf,

    /// Brush start in pixels.
    #[arg(long, allow_negative_numbers = true)]
    from: f64,

    /// Brush end in pixels.
    #[arg(long, allow_negative_numbers = true)]
    to: f64,

    /// Width of the band layout in pixels.
    #[arg(long, default_value_t = 600.0)]
    width: f64,

    /// Inner padding between bands, as a fraction of the step.
    #[arg(long, default_value_t = 0.1)]
    padding_inner: f64,

    /// Outer padding before the first and after the last band.
    #[arg(long, default_value_t = 0.1)]
    padding_outer: f64,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the stackbrush CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), StackError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Transform(args)) => run_transform(args),
        Some(Commands::Sample(args)) => run_sample(args),
        Some(Commands::Select(args)) => run_select(args),
        None => {
            println!("stackbrush {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Data pipeline and brush selection for waterfall and stacked charts.");
            println!();
            println!("Run 'stackbrush --help' for usage information.");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when embedded in a host.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), StackError> {
    let value = model::io_json::read_json_value(&args.input)?;
    let result = validation::validate_value(&value);

    match args.output.as_str() {
        "json" => {
            let report = match &result {
                Ok(dataset) => serde_json::json!({
                    "valid": true,
                    "entries": dataset.len(),
                }),
                Err(err) => serde_json::json!({
                    "valid": false,
                    "rule": format!("{:?}", err.rule),
                    "context": err.context.to_string(),
                    "entry": err.entry_index(),
                    "segment": err.segment_index(),
                    "message": err.message,
                }),
            };
            let text = serde_json::to_string_pretty(&report).map_err(|source| {
                StackError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", text);
        }
        "text" => match &result {
            Ok(dataset) => println!("Validation passed ({} entries)", dataset.len()),
            Err(err) => println!("Validation failed: {}", err),
        },
        other => {
            return Err(StackError::UnsupportedFormat(format!(
                "report output '{}' (supported: text, json)",
                other
            )));
        }
    }

    result.map(|_| ()).map_err(StackError::from)
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), StackError> {
    let format = match args.from.as_deref() {
        Some("json") => RowFormat::Json,
        Some("yaml") | Some("yml") => RowFormat::Yaml,
        Some("csv") => RowFormat::Csv,
        Some(other) => {
            return Err(StackError::UnsupportedFormat(format!(
                "'{}' (supported: json, yaml, csv)",
                other
            )));
        }
        None => RowFormat::from_path(&args.input).ok_or_else(|| {
            StackError::UnsupportedFormat(format!(
                "cannot infer format of {}; pass --from",
                args.input.display()
            ))
        })?,
    };

    let rows = model::io_rows::read_rows(&args.input, format)?;
    tracing::debug!(rows = rows.len(), format = format.name(), "read rows");

    let opts = adapter::FormatOptions {
        value_column: args.value_column,
        label_column: args.label_column,
        color_column: args.color_column,
        default_color: args.default_color,
        parse_numbers: !args.no_parse_numbers,
    };
    let dataset = adapter::to_canonical(&rows, &opts);

    write_output(&dataset, args.output.as_deref())
}

/// Execute the transform subcommand.
fn run_transform(args: TransformArgs) -> Result<(), StackError> {
    let dataset = model::io_json::read_dataset_json(&args.input)?;
    let processor = processor::create_data_processor();

    let result = match args.op.as_str() {
        "sort" => {
            let key = parse_sort_key(&args.key)?;
            let direction = parse_direction(&args.direction)?;
            processor.sort_data(&dataset, key, direction)?
        }
        "normalize" => processor.normalize_values(&dataset, args.target_max)?,
        "aggregate" => processor.aggregate_data(&dataset, parse_mode(&args.mode)?)?,
        "percentages" => processor.calculate_percentages(&dataset)?,
        "restore" => processor.restore_data(&dataset)?,
        other => {
            return Err(StackError::UnsupportedFormat(format!(
                "operator '{}' (supported: sort, normalize, aggregate, percentages, restore)",
                other
            )));
        }
    };

    write_output(&result, args.output.as_deref())
}

fn parse_sort_key(key: &str) -> Result<transform::SortKey, StackError> {
    use transform::SortKey;
    match key {
        "label" => Ok(SortKey::Label),
        "total" => Ok(SortKey::Total),
        "max-stack" => Ok(SortKey::MaxStack),
        "stack-count" => Ok(SortKey::StackCount),
        other => Err(StackError::Configuration {
            message: format!(
                "unknown sort key '{}' (supported: label, total, max-stack, stack-count)",
                other
            ),
        }),
    }
}

fn parse_direction(direction: &str) -> Result<transform::SortDirection, StackError> {
    match direction {
        "asc" | "ascending" => Ok(transform::SortDirection::Ascending),
        "desc" | "descending" => Ok(transform::SortDirection::Descending),
        other => Err(StackError::Configuration {
            message: format!("unknown sort direction '{}' (supported: asc, desc)", other),
        }),
    }
}

fn parse_mode(mode: &str) -> Result<transform::AggregateMode, StackError> {
    use transform::AggregateMode;
    match mode {
        "sum" => Ok(AggregateMode::Sum),
        "average" | "avg" => Ok(AggregateMode::Average),
        "max" => Ok(AggregateMode::Max),
        "min" => Ok(AggregateMode::Min),
        other => Err(StackError::Configuration {
            message: format!(
                "unknown aggregate mode '{}' (supported: sum, average, max, min)",
                other
            ),
        }),
    }
}

/// Execute the sample subcommand.
fn run_sample(args: SampleArgs) -> Result<(), StackError> {
    let opts = sample::SampleOptions {
        categories: args.categories,
        max_stacks: args.max_stacks,
        value_range: (args.min, args.max),
        seed: args.seed,
    };
    let dataset = sample::generate_sample(&opts)?;

    write_output(&dataset, args.output.as_deref())
}

/// Execute the select subcommand.
fn run_select(args: SelectArgs) -> Result<(), StackError> {
    use selection::{
        create_selection_engine, AxisField, BrushDimension, BrushOptions, Selection,
    };

    if !args.width.is_finite() || args.width <= 0.0 {
        return Err(StackError::Configuration {
            message: format!("--width must be a positive number, got {}", args.width),
        });
    }
    if !args.padding_inner.is_finite() || !args.padding_outer.is_finite() {
        return Err(StackError::Configuration {
            message: "band padding must be finite".to_string(),
        });
    }

    let dataset = model::io_json::read_dataset_json(&args.input)?;
    let domain = dataset.labels().into_iter().map(str::to_string).collect();
    let scale = scale::BandScale::try_new(domain)?
        .range((0.0, args.width))
        .padding_inner(args.padding_inner)
        .padding_outer(args.padding_outer);

    let options = BrushOptions::new(BrushDimension::X, [[0.0, 0.0], [args.width, 1.0]]);
    let mut engine =
        create_selection_engine(options).with_x_axis(Box::new(scale), AxisField::Label)?;
    let totals = transform::cumulative_totals(&dataset);
    engine.load_with_values(dataset, totals)?;

    let (lo, _) = options.clamp(args.from.min(args.to), 0.0);
    let (hi, _) = options.clamp(args.from.max(args.to), 0.0);
    engine.set_selection(Some(Selection::span(lo, hi)));

    let labels: Vec<&str> = engine.selected_entries().map(|e| e.label.as_str()).collect();

    match args.output.as_str() {
        "json" => {
            let report = serde_json::json!({
                "selection": engine.get_selection(),
                "indices": engine.selected_indices(),
                "labels": labels,
                "summary": engine.summary(),
            });
            let text = serde_json::to_string_pretty(&report).map_err(|source| {
                StackError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", text);
        }
        "text" => {
            println!(
                "Selected {} of {} entries",
                engine.selected_indices().len(),
                engine.dataset().len()
            );
            for (index, label) in engine.selected_indices().iter().zip(&labels) {
                println!("  [{}] {}", index, label);
            }
            print!("{}", engine.summary());
        }
        other => {
            return Err(StackError::UnsupportedFormat(format!(
                "report output '{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}

/// Writes a dataset as pretty JSON to `path`, or to stdout.
fn write_output(dataset: &Dataset, path: Option<&Path>) -> Result<(), StackError> {
    match path {
        Some(path) => {
            model::io_json::write_dataset_json(path, dataset)?;
            tracing::debug!(entries = dataset.len(), path = %path.display(), "wrote dataset");
            Ok(())
        }
        None => {
            let text =
                model::io_json::to_json_string(dataset).map_err(|source| StackError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
            println!("{}", text);
            Ok(())
        }
    }
}
