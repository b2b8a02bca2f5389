use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tendon_biomech::analysis::AnalysisSettings;
use tendon_biomech::cli::{AnalyseArgs, Cli, Commands, PlotArgs, ReshapeArgs};
use tendon_biomech::ctx::{ColumnLayout, Ctx, LengthColumn, OutputPaths};
use tendon_biomech::io;
use tendon_biomech::metadata;
use tendon_biomech::pipeline::batch;
use tendon_biomech::plot;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Reshape(args) => handle_reshape(args)?,
        Commands::Analyse(args) => handle_analyse(args)?,
        Commands::Plot(args) => handle_plot(args)?,
    }
    Ok(())
}

fn handle_reshape(args: ReshapeArgs) -> Result<()> {
    let paths = OutputPaths::new(&args.root);
    let workbook_path = paths.resolve(&args.workbook);
    let out = match &args.out {
        Some(path) => paths.resolve(path),
        None => paths.metadata_path.clone(),
    };

    let workbook = io::xlsx::read_workbook(&workbook_path)?;
    let reshaped = metadata::reshape_workbook(&workbook, args.match_mode.into())?;
    io::metadata_csv::write_metadata_table(&out, &reshaped.table)?;
    tracing::info!(
        out = %out.display(),
        records = reshaped.table.len(),
        "metadata table written"
    );

    println!("tendon-biomech reshape ok");
    println!("records: {}", reshaped.table.len());
    println!("table: {}", out.display());
    print_warnings(&reshaped.warnings);
    Ok(())
}

fn handle_analyse(args: AnalyseArgs) -> Result<()> {
    let settings = AnalysisSettings {
        corrected_smoothed_hysteresis: args.corrected_smoothed_hysteresis,
        ..AnalysisSettings::default()
    };
    let mut columns = ColumnLayout::default();
    if let Some(name) = args.length_column {
        columns.sample_length = LengthColumn::Named(name);
    }

    let mut ctx = Ctx::new(args.root, settings, columns);
    ctx.write_json = args.json;
    let metadata_path = match &args.metadata {
        Some(path) => ctx.resolve(path),
        None => ctx.output.metadata_path.clone(),
    };

    batch::run_batch(&mut ctx, &metadata_path)?;

    print!("{}", io::summary::format_run_summary(&ctx));
    print_warnings(&ctx.warnings);
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<()> {
    let report = plot::plot_all(&args.root)?;
    println!("tendon-biomech plot ok");
    println!("written: {}", report.written.len());
    println!("skipped: {}", report.skipped.len());
    for (path, reason) in &report.skipped {
        println!("- {}: {}", path.display(), reason);
    }
    Ok(())
}

fn print_warnings(warnings: &[String]) {
    if !warnings.is_empty() {
        println!("warnings:");
        for warning in warnings {
            println!("- {}", warning);
        }
    }
}
