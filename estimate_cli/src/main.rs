//! # Renovo Estimate CLI
//!
//! Command-line front end for `estimate_core`: price single line items,
//! whole line-item estimates from JSON, and shed / utility building
//! quick estimates. Settings are read from a JSON file next to the
//! working directory unless `--settings` points elsewhere.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use estimate_core::calculations::shed::{DEFAULT_CONTINGENCY_PERCENT, DEFAULT_SALES_TAX_RATE};
use estimate_core::calculations::{
    calculate_line_item, compute_shed_estimate, validate_adjustments, validate_line_item, EstimateOutput,
    LineItemInput, QuickEstimateResult, RoofType, ShedInputs, SidingType,
};
use estimate_core::materials::ProjectCategory;
use estimate_core::settings::CalculationSettings;
use estimate_core::settings_store::{price_estimate, FileSettingsStore, SettingsSource};
use estimate_core::units::Unit;

#[derive(Parser, Debug)]
#[command(
    name = "estimate",
    about = "Price renovation line items and shed / utility building estimates",
    version
)]
struct Cli {
    /// Settings file used for markup, labor rate and permit fees
    #[arg(long, global = true, default_value = "estimate-settings.json")]
    settings: PathBuf,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a single line item
    LineItem(LineItemArgs),
    /// Price a line-item estimate read from a JSON file
    Estimate {
        /// JSON file with `project_type` and `line_items`
        input: PathBuf,
    },
    /// Quick estimate for a shed / utility building
    Shed(ShedArgs),
    /// Show or change the stored settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Args, Debug)]
struct LineItemArgs {
    /// Project category, e.g. "Kitchen" or "Roofing"
    #[arg(long)]
    category: String,
    /// Quantity in the given unit
    #[arg(long, allow_negative_numbers = true)]
    quantity: f64,
    /// One of: sqft, linear ft, each
    #[arg(long)]
    unit: String,
    #[arg(long, default_value = "Line item")]
    description: String,
}

#[derive(Args, Debug)]
struct ShedArgs {
    /// Width in feet (4-100)
    #[arg(long, default_value_t = 10.0)]
    width: f64,
    /// Length in feet (4-100)
    #[arg(long, default_value_t = 12.0)]
    length: f64,
    /// Wall height in feet (6-20)
    #[arg(long, default_value_t = 8.0)]
    height: f64,
    /// metal or shingle
    #[arg(long, default_value = "metal", value_parser = parse_roof)]
    roof: RoofType,
    /// vinyl, metal or wood
    #[arg(long, default_value = "vinyl", value_parser = parse_siding)]
    siding: SidingType,
    #[arg(long, default_value_t = 1)]
    windows: u32,
    #[arg(long, default_value_t = 1)]
    doors: u32,
    /// Add sales tax to the total
    #[arg(long)]
    tax: bool,
    /// Sales tax rate as a fraction, e.g. 0.07
    #[arg(long, default_value_t = DEFAULT_SALES_TAX_RATE, allow_negative_numbers = true)]
    tax_rate: f64,
    /// Contingency as a percentage of the subtotal
    #[arg(long, default_value_t = DEFAULT_CONTINGENCY_PERCENT, allow_negative_numbers = true)]
    contingency: f64,
}

impl ShedArgs {
    fn inputs(&self) -> ShedInputs {
        ShedInputs {
            width_ft: self.width,
            length_ft: self.length,
            height_ft: self.height,
            roof_type: self.roof,
            window_count: self.windows,
            door_count: self.doors,
            siding_type: self.siding,
        }
    }
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print the current settings
    Show,
    /// Update the stored settings; omitted values are kept
    Set {
        /// Markup as a percentage, e.g. 25 for 25%
        #[arg(long)]
        markup_percent: Option<f64>,
        /// Hourly labor rate ($/hr)
        #[arg(long)]
        labor_rate: Option<f64>,
        /// Whether permit fees apply (true/false)
        #[arg(long)]
        permit_fee: Option<bool>,
    },
}

/// JSON accepted by the `estimate` subcommand
#[derive(Debug, Deserialize)]
struct EstimateRequest {
    project_type: ProjectCategory,
    line_items: Vec<LineItemInput>,
}

#[derive(Debug, Serialize)]
struct ShedReport<'a> {
    inputs: &'a ShedInputs,
    summary: String,
    #[serde(flatten)]
    result: &'a QuickEstimateResult,
}

#[derive(Debug, Serialize)]
struct SettingsReport<'a> {
    path: String,
    markup_percent: f64,
    #[serde(flatten)]
    settings: &'a CalculationSettings,
}

fn parse_roof(value: &str) -> Result<RoofType, String> {
    RoofType::ALL
        .into_iter()
        .find(|roof| roof.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| format!("unknown roof type '{value}' (expected metal or shingle)"))
}

fn parse_siding(value: &str) -> Result<SidingType, String> {
    SidingType::ALL
        .into_iter()
        .find(|siding| siding.as_str().eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| format!("unknown siding type '{value}' (expected vinyl, metal or wood)"))
}

fn init_logging(level: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level/filter '{level}'"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let store = FileSettingsStore::new(&cli.settings);
    debug!(settings = %store.path().display(), "using settings file");

    match cli.command {
        Command::LineItem(args) => run_line_item(&store, args, cli.json),
        Command::Estimate { input } => run_estimate(&store, &input, cli.json),
        Command::Shed(args) => run_shed(&args, cli.json),
        Command::Settings { command } => run_settings(&store, command, cli.json),
    }
}

fn run_line_item(store: &FileSettingsStore, args: LineItemArgs, json: bool) -> Result<()> {
    let settings = store.load_settings()?;
    let category = ProjectCategory::from(args.category.as_str());
    let item = LineItemInput::new(args.description, args.quantity, Unit::from(args.unit));
    validate_line_item(&item).into_result()?;

    let result = calculate_line_item(&category, item.quantity, &item.unit, &settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{} - {} {} ({})", item.description, item.quantity, item.unit, category);
    if !category.is_rated() {
        println!("  (no rates for '{category}', using fallback rates)");
    }
    println!("  Labor:     {}", money(result.labor_cost));
    println!("  Materials: {}", money(result.material_cost));
    println!("  Permits:   {}", money(result.permit_cost));
    println!("  Disposal:  {}", money(result.disposal_cost));
    println!("  Subtotal:  {}", money(result.subtotal));
    Ok(())
}

fn run_estimate(store: &FileSettingsStore, input: &Path, json: bool) -> Result<()> {
    let contents = fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
    let request: EstimateRequest =
        serde_json::from_str(&contents).with_context(|| format!("invalid estimate JSON in {}", input.display()))?;

    let project_type = request.project_type.clone();
    let output = price_estimate(store, request.project_type, request.line_items)?;
    info!(project_type = %project_type, total = output.total_amount, "priced estimate");

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_estimate(&project_type, &output);
    }
    Ok(())
}

fn print_estimate(project_type: &ProjectCategory, output: &EstimateOutput) {
    println!("{project_type} estimate");
    println!("{}", "=".repeat(72));
    for item in &output.line_items {
        println!(
            "{:<32} {:>8} {:<10} {:>16}",
            item.input.description,
            item.input.quantity,
            item.input.unit.as_str(),
            money(item.costs.subtotal)
        );
        if let Some(notes) = &item.input.notes {
            println!("  {notes}");
        }
    }
    println!("{}", "-".repeat(72));
    println!("  Labor:     {:>14}", money(output.breakdown.total_labor));
    println!("  Materials: {:>14}", money(output.breakdown.total_materials));
    println!("  Permits:   {:>14}", money(output.breakdown.total_permits));
    println!("  Disposal:  {:>14}", money(output.breakdown.total_disposal));
    println!("{}", "=".repeat(72));
    println!("  TOTAL:     {:>14}", money(output.total_amount));
}

fn run_shed(args: &ShedArgs, json: bool) -> Result<()> {
    let inputs = args.inputs();
    inputs.validate()?;
    validate_adjustments(args.tax_rate, args.contingency)?;

    let result = compute_shed_estimate(&inputs).with_adjustments(args.tax, args.tax_rate, args.contingency);

    if json {
        let report = ShedReport {
            inputs: &inputs,
            summary: inputs.summary(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Utility Building / Shed: {}", inputs.summary());
    println!("{}", "=".repeat(72));
    for item in &result.line_items {
        println!(
            "{:<34} {:>7} {:<7} @ {:>9} {:>12}",
            item.description,
            item.quantity,
            item.unit,
            money(item.unit_cost),
            money(item.extended_cost)
        );
    }
    println!("{}", "-".repeat(72));
    println!("  Subtotal:          {:>14}", money(result.materials_subtotal));
    if result.sales_tax_enabled {
        println!(
            "  Sales tax ({:.2}%): {:>14}",
            result.sales_tax_rate * 100.0,
            money(result.sales_tax_amount)
        );
    }
    println!(
        "  Contingency ({}%): {:>13}",
        result.contingency_percent,
        money(result.contingency_amount)
    );
    println!("{}", "=".repeat(72));
    println!("  TOTAL:             {:>14}", money(result.total_amount));
    Ok(())
}

fn run_settings(store: &FileSettingsStore, command: SettingsCommand, json: bool) -> Result<()> {
    let settings = match command {
        SettingsCommand::Show => store.load_settings()?,
        SettingsCommand::Set {
            markup_percent,
            labor_rate,
            permit_fee,
        } => {
            let current = store.load_settings()?;
            let updated = CalculationSettings::from_form(
                markup_percent.unwrap_or_else(|| current.markup_percent()),
                labor_rate.unwrap_or(current.labor_rate),
                permit_fee.unwrap_or(current.permit_fee_enabled),
            )?;
            store.save_settings(&updated)?;
            updated
        }
    };

    if json {
        let report = SettingsReport {
            path: store.path().display().to_string(),
            markup_percent: settings.markup_percent(),
            settings: &settings,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Settings ({})", store.path().display());
    println!("  Markup:      {}%", settings.markup_percent());
    println!("  Labor rate:  {}/hr", money(settings.labor_rate));
    println!(
        "  Permit fees: {}",
        if settings.permit_fee_enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}
