//! CLI logic for the mezzanine configurator.
//!
//! Each subcommand decodes a configuration JSON file through the
//! [`Configurator`] and prints or writes the result.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command, QuoteArgs};

use std::{fs, path::Path};

use log::{info, warn};
use serde::Serialize;

use mezzanine::{
    Configurator, MezzanineError,
    format::{format_number, format_price},
    model::Configuration,
    pricing::{LeasingTerms, PriceBreakdown},
    quote::{Attachment, QuoteRequest},
};

/// Run the mezzanine CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MezzanineError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid configuration documents
/// - Export errors
/// - Rejected quote requests
pub fn run(args: &Args) -> Result<(), MezzanineError> {
    let input = args.command.input();
    info!(input_path = input; "Processing configuration");

    let app_config = config::load_config(args.config.as_ref())?;
    let configurator = Configurator::new(app_config);

    let source = fs::read_to_string(input)?;
    let configuration = configurator.decode(&source)?;

    match &args.command {
        Command::Price { json, .. } => {
            let pricing = configurator.price(&configuration);
            if *json {
                println!("{}", to_pretty_json(&pricing)?);
            } else {
                let leasing = configurator.config().pricing().leasing();
                print!("{}", render_price_table(&pricing, leasing));
            }
        }
        Command::Layout { .. } => {
            let placements = configurator.layout(&configuration);
            println!("{}", to_pretty_json(&placements)?);
        }
        Command::Export { format, output, .. } => {
            let rendered = configurator.export(&configuration, *format)?;
            let output = output
                .clone()
                .unwrap_or_else(|| format.default_file_name());
            fs::write(&output, rendered)?;
            info!(output_path = output, format:%; "Configuration exported");
        }
        Command::Quote(quote) => submit_quote(&configurator, configuration, quote)?,
    }

    Ok(())
}

fn submit_quote(
    configurator: &Configurator,
    configuration: Configuration,
    args: &QuoteArgs,
) -> Result<(), MezzanineError> {
    let mut request = QuoteRequest::new(&args.name, &args.email, &args.telephone, configuration)
        .with_company(&args.company)
        .with_postal_code(&args.postal_code)
        .with_message(&args.message)
        .with_installation(args.include_installation);

    for path in &args.attachments {
        let size_bytes = fs::metadata(path)?.len();
        let file_name = Path::new(path)
            .file_name()
            .map_or_else(|| path.clone(), |name| name.to_string_lossy().into_owned());
        if !request.add_attachment(Attachment::new(file_name, size_bytes)) {
            warn!(path; "Attachment skipped");
        }
    }

    let mut service = configurator.quote_service();
    let response = configurator.submit_quote(&mut service, &request)?;
    if !response.is_success() {
        return Err(MezzanineError::Quote(response.message().to_string()));
    }

    println!("{}", response.message());
    if let Some(request_id) = response.request_id() {
        println!("Reference: {request_id}");
    }
    Ok(())
}

/// Encode a command result for stdout. Failures here concern the output, so
/// they are reported as export errors rather than input decode errors.
fn to_pretty_json(value: &impl Serialize) -> Result<String, MezzanineError> {
    serde_json::to_string_pretty(value).map_err(|err| MezzanineError::Export(Box::new(err)))
}

/// Render `pricing` as an aligned, nb-NO formatted table.
fn render_price_table(pricing: &PriceBreakdown, leasing: &LeasingTerms) -> String {
    let kr = |amount: f64| format!("{} kr", format_price(amount));
    let rows = [
        ("Area".to_string(), format!("{} m²", format_number(pricing.square_meters(), 2))),
        ("Base price".to_string(), kr(pricing.base_price())),
        ("Dimension price".to_string(), kr(pricing.dimension_price())),
        ("Load multiplier".to_string(), format_number(pricing.load_multiplier(), 2)),
        ("Accessories".to_string(), kr(pricing.accessories_price())),
        ("Total".to_string(), kr(pricing.total_price())),
        ("Price per m²".to_string(), kr(pricing.price_per_square_meter())),
        (
            format!("Leasing {} months", leasing.three_year().months()),
            format!("{}/month", kr(pricing.leasing().three_year_monthly())),
        ),
        (
            format!("Leasing {} months", leasing.five_year().months()),
            format!("{}/month", kr(pricing.leasing().five_year_monthly())),
        ),
    ];

    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{label:<width$}  {value}\n"))
        .collect()
}
