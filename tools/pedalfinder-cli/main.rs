use clap::{Parser, ValueEnum};
use pedalfinder::import;
use pedalfinder::logging;
use pedalfinder::prelude::*;
use pedalfinder::snapshot::CatalogSnapshot;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// Sort orders accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortCli {
    Relevance,
    Duty,
    Ip,
}

impl From<SortCli> for SortOrder {
    fn from(sort: SortCli) -> Self {
        match sort {
            SortCli::Relevance => SortOrder::Relevance,
            SortCli::Duty => SortOrder::Duty,
            SortCli::Ip => SortOrder::Ip,
        }
    }
}

/// Foot switch selection wizard over a raw, imported or bundled catalog
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON array of raw catalog rows
    rows_path: Option<String>,

    /// Import the catalog from a CSV export instead
    #[arg(long, conflicts_with_all = ["rows_path", "snapshot"])]
    csv: Option<String>,

    /// Load a previously saved catalog snapshot instead
    #[arg(long, conflicts_with = "rows_path")]
    snapshot: Option<String>,

    /// Write the loaded catalog to a snapshot file
    #[arg(long)]
    save_snapshot: Option<String>,

    /// Optional JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Share string to restore, e.g. "a=printing&t=electrical"
    #[arg(short, long)]
    share: Option<String>,

    /// Free-text search over series, description and part number
    #[arg(short, long, default_value = "")]
    query: String,

    #[arg(long, value_enum)]
    sort: Option<SortCli>,

    /// Keep one variant per series
    #[arg(long)]
    dedupe: bool,

    /// Run in interactive mode to be prompted for answers
    #[arg(short = 'i', long, help = "Run the questionnaire interactively")]
    human: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = WizardConfig::load(cli.config.as_deref().map(Path::new))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load configuration: {}", e)));
    if let Err(e) = logging::init(&config.log_level) {
        eprintln!("Logging disabled: {}", e);
    }

    let load_start = Instant::now();
    let (products, warning) = load_products(&cli, &config).await;
    let load_duration = load_start.elapsed();
    println!("Loaded {} products in {:?}", products.len(), load_duration);
    if let Some(warning) = &warning {
        println!("Warning: {}", warning);
    }

    if let Some(path) = &cli.save_snapshot {
        CatalogSnapshot::new(products.clone())
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save snapshot: {}", e)));
        println!("Snapshot written to '{}'", path);
    }

    let mut wizard = Wizard::new(products);
    if let Some(share) = &cli.share {
        wizard
            .restore_from_share(share)
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid share string: {}", e)));
    }
    if cli.human {
        run_interactive(&mut wizard);
    }

    let projector = ResultProjector::new(ProjectionOptions {
        query: cli.query.clone(),
        dedupe_series: cli.dedupe,
        sort: cli.sort.map(SortOrder::from).unwrap_or(config.default_sort),
        ..Default::default()
    });
    print_results(&wizard, &projector);
}

async fn load_products(cli: &Cli, config: &WizardConfig) -> (Vec<Product>, Option<String>) {
    if let Some(path) = &cli.csv {
        let report = import::import_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("CSV import failed: {}", e)));
        if report.dropped > 0 {
            println!("Skipped {} records without series or part number", report.dropped);
        }
        return (report.products, None);
    }

    if let Some(path) = &cli.snapshot {
        let snapshot = CatalogSnapshot::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load snapshot: {}", e)));
        return (snapshot.products, None);
    }

    let loader = CatalogLoader::from_config(config)
        .unwrap_or_else(|e| exit_with_error(&format!("Fallback catalog unusable: {}", e)));
    match &cli.rows_path {
        Some(path) => {
            let catalog = loader
                .load(&JsonRowsFile::new(path))
                .await
                .unwrap_or_else(|e| exit_with_error(&format!("Catalog load failed: {}", e)));
            let warning = catalog.warning();
            (catalog.products, warning)
        }
        None => {
            println!("No catalog provided. Using the offline catalog.");
            (loader.fallback_products().to_vec(), None)
        }
    }
}

/// Walks the questionnaire with prompts until the results or contact screen.
fn run_interactive(wizard: &mut Wizard) {
    println!("--- Pedalfinder Interactive Mode ---");
    println!("Enter a number to answer, 'b' to go back, 'r' to restart, empty to continue.");

    while wizard.current_step() != Step::Results && !wizard.is_contact_screen() {
        let step = wizard.current_step();
        println!(
            "\nStep {} of {}: {}",
            wizard.current_display_step(),
            wizard.total_visible_steps(),
            step.as_str()
        );
        let options = wizard.options();
        for (index, option) in options.iter().enumerate() {
            let count = wizard
                .candidate_count(step, option.id)
                .map_or(String::new(), |c| format!(" ({} products)", c));
            println!("  {}: {}{}", index + 1, option.label, count);
        }

        let choice = prompt_for_input("Choice", None);
        match choice.as_str() {
            "b" => wizard.back(),
            "r" => wizard.restart(),
            "" if step == Step::Features => wizard.proceed(),
            input => {
                let selected = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|n| options.get(n));
                match selected {
                    Some(option) => {
                        if let Err(e) = wizard.answer(option.id) {
                            println!("{}", e);
                        }
                    }
                    None => println!("Invalid choice."),
                }
            }
        }
    }

    if wizard.is_contact_screen() {
        println!("\nA custom build was requested. Please contact sales.");
    }
    println!("Share this selection with: ?{}", wizard.share_link());
}

fn print_results(wizard: &Wizard, projector: &ResultProjector) {
    let outcome = wizard.outcome();
    println!();
    match &outcome {
        SearchOutcome::Exact(products) => println!("{} exact matches", products.len()),
        SearchOutcome::Relaxed(result) => println!(
            "No exact match. Showing {} products without the {} constraint",
            result.products.len(),
            result.dropped
        ),
        SearchOutcome::Exhausted(_) => {
            println!("Nothing matches this application. A custom build may be available.");
            return;
        }
    }

    for product in projector.project(outcome.products()) {
        let duty = product.duty.map_or("-", |d| d.as_str());
        let marker = if product.flagship { "*" } else { " " };
        println!(
            "{} {:<24} {:<12} {:<10} {:<6} {}",
            marker,
            product.series,
            product.part_number.as_deref().unwrap_or("-"),
            product.technology.as_str(),
            product.ip.as_str(),
            duty
        );
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    if io::stdout().flush().is_err() || io::stdin().read_line(&mut line).is_err() {
        exit_with_error("Failed to read from the terminal");
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
