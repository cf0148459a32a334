//! Example: Building a configuration from the model types
//!
//! This example builds a configuration in code instead of decoding JSON,
//! then prices it, lays it out and renders the plan view.

use mezzanine::{
    Configurator,
    export::ExportFormat,
    format::format_price,
    model::{Accessory, AccessoryType, Configuration, LoadCapacity, PalletGateWidth, StairType},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building configuration from model types...\n");

    let mut config = Configuration::new(12000, 4000, 3500, LoadCapacity::Kg500)
        .with_accessory(Accessory::stairs("main-stairs", StairType::TwoMeters, 2))
        .with_accessory(Accessory::pallet_gate("loading", PalletGateWidth::Mm3000, 1))
        .with_accessory(Accessory::railing("perimeter", 12.0, 3));

    // Accessories added at runtime get generated ids and default sizing
    let extra = config.add_accessory(AccessoryType::Railing);
    println!("Added railing `{extra}`");

    let configurator = Configurator::default();
    configurator.validate(&config)?;

    let pricing = configurator.price(&config);
    println!("Total price: {} NOK", format_price(pricing.total_price()));
    println!(
        "Leasing: {} NOK/mo (3 years), {} NOK/mo (5 years)\n",
        format_price(pricing.leasing().three_year_monthly()),
        format_price(pricing.leasing().five_year_monthly())
    );

    for placement in configurator.layout(&config) {
        let position = placement.position();
        println!(
            "{:<12} #{} on {:<5} at ({:.2}, {:.2}, {:.2})",
            placement.accessory_id(),
            placement.instance(),
            placement.edge(),
            position.x(),
            position.y(),
            position.z()
        );
    }

    let svg = configurator.export(&config, ExportFormat::Svg)?;
    println!("\nRendered plan view ({} bytes)", svg.len());

    Ok(())
}
