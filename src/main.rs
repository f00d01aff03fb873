//! cardgrid - Card grid detector for sprite-sheet images
//!
//! CLI entry point

use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

use cardgrid::{
    category_name, create_progress_bar, estimated_total_line, BatchOptions, Cli, CliOverrides,
    Commands, Config, ExitCode, MatchMode, ScanArgs, SheetBatch, SheetReport,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scan(args) => run_scan(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(code) => code.code(),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::GeneralError.code()
        }
    });
}

fn run_scan(args: &ScanArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load config file if specified, otherwise use the default search path
    let file_config = match &args.config {
        Some(config_path) => match Config::load_from_path(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Warning: Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    };

    let cli_overrides = create_cli_overrides(args);
    let options = file_config.merge_with_cli(&cli_overrides);

    if args.dry_run {
        print_execution_plan(&options);
        return Ok(ExitCode::Success);
    }

    // Bail out early when no configured sheet exists at all
    if !options
        .categories
        .iter()
        .any(|name| options.sheet_path(name).exists())
    {
        eprintln!("Error: No sheet image found at any configured path");
        for name in &options.categories {
            eprintln!("  {}: {}", name, options.sheet_path(name).display());
        }
        return Ok(ExitCode::InputNotFound);
    }

    let verbose = args.verbose > 0;
    let quiet = args.quiet;
    let batch = SheetBatch::new(options);

    let pb = if !quiet && batch.options().categories.len() > 1 {
        Some(create_progress_bar(batch.options().categories.len() as u64))
    } else {
        None
    };

    let summary = batch.run_with(|name, result| {
        if verbose {
            eprintln!("Scanned {}: {}", name, batch.options().sheet_path(name).display());
        }
        match result {
            Ok(scan) => {
                if !quiet {
                    println!();
                    print!("{}", SheetReport::new(name, scan));
                    println!("{}", estimated_total_line(name, scan));
                }
            }
            Err(e) => {
                eprintln!("Error scanning {}: {}", name, e);
            }
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if !quiet {
        summary.print_summary();
    }

    if summary.failures.is_empty() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ProcessingError)
    }
}

/// Create CLI overrides from ScanArgs
///
/// Positional sheet paths replace the configured category list: each path
/// becomes its own category named after the file stem.
fn create_cli_overrides(args: &ScanArgs) -> CliOverrides {
    let mut overrides = CliOverrides::new();

    overrides.threshold = args.threshold;
    overrides.tolerance = args.tolerance;
    overrides.path_template = args.template.clone();

    if !args.sheets.is_empty() {
        let mut categories = Vec::new();
        let mut paths = BTreeMap::new();
        for sheet in &args.sheets {
            let name = category_name(sheet);
            paths.insert(name.clone(), PathBuf::from(sheet));
            categories.push(name);
        }
        overrides.categories = Some(categories);
        overrides.paths = paths;
    }

    overrides
}

/// Print execution plan for dry-run mode
fn print_execution_plan(options: &BatchOptions) {
    println!("=== Dry Run - Execution Plan ===");
    println!();
    println!("Scan options:");
    println!("  Threshold: {}", options.scan.threshold);
    match options.scan.match_mode {
        MatchMode::Exact => println!("  Match mode: exact"),
        MatchMode::Tolerance => {
            println!(
                "  Match mode: tolerance (±{} per channel)",
                options.scan.tolerance
            );
        }
    }
    println!();
    println!("Sheets:");
    for (i, name) in options.categories.iter().enumerate() {
        let path = options.sheet_path(name);
        let marker = if path.exists() { "" } else { " (missing)" };
        println!("  {}. {}: {}{}", i + 1, name, path.display(), marker);
    }
}

fn run_info() -> Result<ExitCode, Box<dyn std::error::Error>> {
    println!("cardgrid v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);

    println!();
    println!("Defaults:");
    println!("  Categories: {}", cardgrid::DEFAULT_CATEGORIES.join(", "));
    println!("  Path template: {}", cardgrid::DEFAULT_PATH_TEMPLATE);
    println!("  Threshold: {}", cardgrid::DEFAULT_THRESHOLD);

    println!();
    println!("Config File Locations:");
    for path in Config::search_paths() {
        println!("  {}", path.display());
    }

    Ok(ExitCode::Success)
}
