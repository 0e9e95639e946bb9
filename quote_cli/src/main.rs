//! # Planter Quote CLI
//!
//! Terminal front end for the FRP planter quotation engine.
//!
//! ```text
//! planter-quote quote order.json --pin 1234 --pdf quote.pdf --whatsapp
//! planter-quote interactive --pin 1234
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use quote_core::export::format::{format_area, format_dimensions, format_inr, format_thickness};
use quote_core::export::render_quotation_pdf;
use quote_core::export::whatsapp::share_summary;
use quote_core::pricing::{CircumferenceConstant, Dimensions, PlanterShape, ThicknessTier};
use quote_core::quotation::{calculate, ItemRef, LineSummary, QuoteInput, QuoteSummary, DEFAULT_COMPANY_NAME};
use quote_core::{FormulaPolicy, QuoteConfig, Route};

/// Quotations for custom FRP planters.
#[derive(Parser, Debug)]
#[command(name = "planter-quote")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a quotation described in a JSON file
    Quote {
        /// Quotation input JSON
        input: PathBuf,

        /// Access PIN
        #[arg(long)]
        pin: String,

        /// Business configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Write a PDF quotation (file name chosen from the shape when omitted)
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        pdf: Option<PathBuf>,

        /// Print the WhatsApp message and share link
        #[arg(long)]
        whatsapp: bool,

        /// Use pi instead of 22/7 for round planters
        #[arg(long)]
        pi: bool,

        /// Price with the legacy sheet for the main planter's shape, rounding
        /// each intermediate figure the way that sheet did
        #[arg(long)]
        round_each_step: bool,
    },

    /// Prompt for a single planter and print its quotation
    Interactive {
        /// Access PIN
        #[arg(long)]
        pin: String,

        /// Business configuration JSON
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Quote {
            input,
            pin,
            config,
            json,
            pdf,
            whatsapp,
            pi,
            round_each_step,
        } => {
            let config = load_config(config.as_deref())?;
            let options = QuoteOptions {
                json,
                pdf,
                whatsapp,
                pi,
                legacy_sheet: round_each_step,
            };
            run_quote(&config, &pin, &input, options)
        }
        Command::Interactive { pin, config } => {
            let config = load_config(config.as_deref())?;
            run_interactive(&config, &pin)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<QuoteConfig> {
    match path {
        Some(path) => QuoteConfig::load(path).with_context(|| format!("Failed to load {}", path.display())),
        None => Ok(QuoteConfig::default()),
    }
}

/// Log in and open the planter page for `shape`.
fn open_session(config: &QuoteConfig, pin: &str, shape: PlanterShape) -> Result<()> {
    let mut gate = config.access_gate();
    let token = gate.login(pin).context("Login failed")?;
    gate.authorize(Route::for_shape(shape), Some(&token))
        .context("Planter pages require a session")?;
    Ok(())
}

/// Output and pricing switches for `planter-quote quote`
struct QuoteOptions {
    json: bool,
    pdf: Option<PathBuf>,
    whatsapp: bool,
    pi: bool,
    legacy_sheet: bool,
}

fn run_quote(config: &QuoteConfig, pin: &str, input_path: &Path, options: QuoteOptions) -> Result<()> {
    let text = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;
    let mut input = QuoteInput::from_json(&text)
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;
    if input.client.company_name == DEFAULT_COMPANY_NAME {
        input.client.company_name = config.company_name.clone();
    }

    let shape = input.primary.shape();
    open_session(config, pin, shape)?;

    let mut policy = if options.legacy_sheet {
        FormulaPolicy::legacy_sheet(shape)
    } else {
        config.policy
    };
    if options.pi {
        policy.circumference = CircumferenceConstant::Pi;
    }

    info!("Pricing {} item(s)", 1 + input.supplementary.len());
    let summary = calculate(&input, &policy)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_report(&summary);
    }

    if let Some(path) = options.pdf {
        let path = if path.as_os_str().is_empty() {
            PathBuf::from(summary.pdf_file_name())
        } else {
            path
        };
        write_pdf(&summary, &path)?;
    }

    if options.whatsapp {
        print_whatsapp(&summary);
    }

    Ok(())
}

fn write_pdf(summary: &QuoteSummary, path: &Path) -> Result<()> {
    let bytes = render_quotation_pdf(summary).context("Failed to render PDF")?;
    std::fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Generated: {}", path.display());
    Ok(())
}

fn print_whatsapp(summary: &QuoteSummary) {
    let (message, url) = share_summary(summary);
    println!();
    println!("{}", message);
    println!();
    println!("Share: {}", url);
}

// ============================================================================
// Interactive mode
// ============================================================================

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_text(prompt: &str) -> String {
    prompt_line(prompt).unwrap_or_default()
}

fn run_interactive(config: &QuoteConfig, pin: &str) -> Result<()> {
    println!("Planter Quote - FRP Planter Quotation");
    println!("=====================================");
    println!();

    let shape = match prompt_line("Shape, (s)quare or (r)ound [s]: ").as_deref() {
        Some("r") | Some("round") => PlanterShape::Round,
        _ => PlanterShape::Square,
    };
    open_session(config, pin, shape)?;

    let mut quote = config.new_quotation(shape);
    let unit = quote.unit;

    quote.client.customer_name = prompt_text("Customer name: ");
    quote.client.project_name = prompt_text("Project name: ");
    quote.client.phone_number = prompt_text("Phone number: ");

    let dims = match shape {
        PlanterShape::Square => Dimensions::square(
            prompt_f64(&format!("Length ({}) [24]: ", unit), 24.0),
            prompt_f64(&format!("Width ({}) [24]: ", unit), 24.0),
            prompt_f64(&format!("Height ({}) [12]: ", unit), 12.0),
        ),
        PlanterShape::Round => Dimensions::round(
            prompt_f64(&format!("Top diameter ({}) [18]: ", unit), 18.0),
            prompt_f64(&format!("Height ({}) [10]: ", unit), 10.0),
        ),
    };
    let quantity = prompt_f64("Quantity [1]: ", 1.0);
    let thickness = ThicknessTier::from_millimeters_or_base(prompt_f64("Thickness mm (1.5/2.5/3.5/5) [1.5]: ", 1.5));
    let tax = prompt_f64(&format!("GST % [{}]: ", quote.tax_percent), quote.tax_percent);

    quote.set_dimensions(ItemRef::Primary, dims)?;
    quote.set_quantity(ItemRef::Primary, quantity as i64)?;
    quote.set_selected_tier(ItemRef::Primary, thickness)?;
    quote.set_tax_percent(tax);
    quote.recalculate_all();

    let summary = quote.summary();
    println!();
    print_report(&summary);

    if !summary.client.phone_number.is_empty() {
        print_whatsapp(&summary);
    }

    Ok(())
}

// ============================================================================
// Report
// ============================================================================

fn print_report(summary: &QuoteSummary) {
    println!("═══════════════════════════════════════");
    println!("  {}", summary.shape.display_name().to_uppercase());
    println!("  {}", summary.client.company_name);
    println!("═══════════════════════════════════════");
    println!();
    if !summary.client.customer_name.is_empty() {
        println!("Customer: {}", summary.client.customer_name);
    }
    if !summary.client.project_name.is_empty() {
        println!("Project:  {}", summary.client.project_name);
    }
    println!("Date:     {}", summary.generated.format("%d/%m/%Y"));
    println!();

    print_line(summary, &summary.primary);
    for line in &summary.supplementary {
        print_line(summary, line);
    }

    println!("═══════════════════════════════════════");
    print_total("Main Planter:", summary.primary_total.raw);
    if summary.has_supplementary() {
        print_total("Additional:", summary.supplementary_total.raw);
    }
    print_total("Subtotal:", summary.subtotal.raw);
    print_total(&format!("GST ({}%):", summary.tax_percent), summary.tax_amount.raw);
    print_total("GRAND TOTAL:", summary.grand_total);
    println!("═══════════════════════════════════════");
}

fn print_line(summary: &QuoteSummary, line: &LineSummary) {
    println!("{}:", line.label);
    println!("  Size:      {}", format_dimensions(&line.dimensions, summary.unit));
    println!("  Qty:       {}", line.quantity);
    println!("  Area:      {} sqft", format_area(line.total_area.raw));
    for (tier, rate) in line.rates.iter() {
        let marker = if tier == line.thickness { " <" } else { "" };
        println!("  {:>9}: {:>12}{}", format_thickness(tier), format_inr(rate.raw), marker);
    }
    println!("  Amount:    {}", format_inr(line.total.raw));
    println!();
}

fn print_total(label: &str, amount: f64) {
    println!("  {:<14}{:>14}", label, format_inr(amount));
}
