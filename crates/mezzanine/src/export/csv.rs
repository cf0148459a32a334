//! Sectioned CSV summary of a priced configuration.

use log::debug;

use super::{Error, ExportFormat, Exporter, Report};
use crate::pricing::LeasingTerm;

/// Writes the configuration and its pricing as blank-line separated sections.
///
/// Square meters, the dimension price, the total, the price per square meter
/// and the leasing payments are written with two decimals; the remaining
/// numbers in their shortest form.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }
}

fn leasing_label(term: LeasingTerm) -> String {
    format!(
        "{} years ({}%)",
        term.months() / 12,
        term.annual_rate_percent()
    )
}

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, report: &Report<'_>) -> Result<String, Error> {
        let config = report.configuration();
        let pricing = report.pricing();
        let terms = report.leasing_terms();
        let mut lines: Vec<String> = Vec::new();

        lines.push("Mezzanine Configuration Export".to_string());
        lines.push(String::new());

        lines.push("Dimensions".to_string());
        lines.push(format!("Length (mm),{}", config.length()));
        lines.push(format!("Width (mm),{}", config.width()));
        lines.push(format!("Height (mm),{}", config.height()));
        lines.push(format!("Square meters,{:.2}", pricing.square_meters()));
        lines.push(String::new());

        lines.push("Load Capacity".to_string());
        lines.push(format!("kg/m²,{}", config.load_capacity()));
        lines.push(String::new());

        lines.push("Accessories".to_string());
        lines.push("Type,Details,Quantity".to_string());
        for accessory in config.accessories() {
            lines.push(format!(
                "{},{},{}",
                accessory.accessory_type(),
                accessory.kind().details(),
                accessory.quantity()
            ));
        }
        lines.push(String::new());

        lines.push("Pricing".to_string());
        lines.push(format!("Base price,{}", pricing.base_price()));
        lines.push(format!("Dimension price,{:.2}", pricing.dimension_price()));
        lines.push(format!("Load multiplier,{}", pricing.load_multiplier()));
        lines.push(format!("Accessories price,{}", pricing.accessories_price()));
        lines.push(format!("Total price,{:.2}", pricing.total_price()));
        lines.push(format!("Price per m²,{:.2}", pricing.price_per_square_meter()));
        lines.push(String::new());

        lines.push("Leasing Options (Monthly)".to_string());
        lines.push(format!(
            "{},{:.2}",
            leasing_label(terms.three_year()),
            pricing.leasing().three_year_monthly()
        ));
        lines.push(format!(
            "{},{:.2}",
            leasing_label(terms.five_year()),
            pricing.leasing().five_year_monthly()
        ));

        debug!(lines_len = lines.len(); "CSV report rendered");
        Ok(lines.join("\n"))
    }
}
