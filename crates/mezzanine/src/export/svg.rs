//! Top-down SVG plan of a configuration and its layout.
//!
//! The plan looks down on the footprint with the back edge at the top and the
//! front edge, where stairs and gates sit, at the bottom. Stairs extend
//! outward from the front edge, so the margin must cover the longest run.

use log::{debug, info};
use svg::{
    Document,
    node::{
        Text as SvgText,
        element::{Group, Line, Rectangle, Text},
    },
};

use mezzanine_core::{color::Color, model::Configuration};

use super::{Error, ExportFormat, Exporter, Report};
use crate::{
    config::StyleConfig,
    format::format_number,
    layout::{Extent, Placement},
};

/// Thickness of a gate drawn across the front edge, in meters.
const GATE_DEPTH: f64 = 0.2;
/// Stroke width of a railing, in meters.
const RAILING_STROKE: f64 = 0.08;

/// Renders the plan view of a report.
#[derive(Debug, Clone)]
pub struct SvgPlanExporter {
    background: Option<Color>,
    platform: Color,
    stairs: Color,
    railing: Color,
    gate: Color,
    pixels_per_meter: f64,
    margin: f64,
}

impl Default for SvgPlanExporter {
    fn default() -> Self {
        Self::from_style(&StyleConfig::default()).unwrap_or_else(|_| Self {
            background: None,
            platform: Color::default(),
            stairs: Color::default(),
            railing: Color::default(),
            gate: Color::default(),
            pixels_per_meter: 40.0,
            margin: 2.5,
        })
    }
}

impl SvgPlanExporter {
    /// Create an exporter with colors and scale taken from `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a color does not parse or the scale is not
    /// a positive number.
    pub fn from_style(style: &StyleConfig) -> Result<Self, Error> {
        let pixels_per_meter = style.pixels_per_meter();
        if !(pixels_per_meter.is_finite() && pixels_per_meter > 0.0) {
            return Err(Error::Render(format!(
                "pixels_per_meter must be positive, got {pixels_per_meter}"
            )));
        }

        Ok(Self {
            background: style.background_color().map_err(Error::Render)?,
            platform: style.platform_color().map_err(Error::Render)?,
            stairs: style.stairs_color().map_err(Error::Render)?,
            railing: style.railing_color().map_err(Error::Render)?,
            gate: style.gate_color().map_err(Error::Render)?,
            pixels_per_meter,
            margin: style.margin_meters().max(0.0),
        })
    }

    fn render(&self, config: &Configuration, placements: &[Placement]) -> Document {
        let plan = PlanFrame {
            length: f64::from(config.length()) / 1000.0,
            width: f64::from(config.width()) / 1000.0,
            margin: self.margin,
            scale: self.pixels_per_meter,
        };
        let (canvas_width, canvas_height) = plan.canvas_size();
        debug!(canvas_width, canvas_height; "Plan canvas size");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {canvas_width} {canvas_height}"))
            .set("width", canvas_width)
            .set("height", canvas_height);

        if let Some(background) = self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", canvas_width)
                    .set("height", canvas_height)
                    .set("fill", background.to_string())
                    .set("fill-opacity", background.alpha()),
            );
        }

        let (left, top) = plan.to_canvas(-plan.length / 2.0, plan.width / 2.0);
        doc = doc.add(
            Group::new().set("id", "platform").add(
                Rectangle::new()
                    .set("x", left)
                    .set("y", top)
                    .set("width", plan.length * plan.scale)
                    .set("height", plan.width * plan.scale)
                    .set("fill", self.platform.to_string())
                    .set("fill-opacity", self.platform.alpha())
                    .set("stroke", "black")
                    .set("stroke-width", 1),
            ),
        );

        let mut accessories = Group::new().set("id", "accessories");
        for placement in placements {
            accessories = accessories.add(self.render_placement(&plan, placement));
        }
        doc = doc.add(accessories);

        let (center_x, _) = plan.to_canvas(0.0, 0.0);
        let (_, bottom) = plan.to_canvas(0.0, -plan.width / 2.0 - plan.margin / 2.0);
        doc.add(
            Text::new("")
                .set("x", center_x)
                .set("y", bottom)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", 14)
                .add(SvgText::new(format!(
                    "{} m × {} m",
                    format_number(plan.length, 3),
                    format_number(plan.width, 3)
                ))),
        )
    }

    fn render_placement(&self, plan: &PlanFrame, placement: &Placement) -> Group {
        let position = placement.position();
        let group = Group::new()
            .set("data-accessory-id", placement.accessory_id().as_str())
            .set("data-instance", placement.instance())
            .set("data-edge", placement.edge().to_string());

        match *placement.extent() {
            Extent::Stairs {
                width, run_depth, ..
            } => {
                // The run extends away from the footprint.
                let (x, y) = plan.to_canvas(position.x() - width / 2.0, position.z());
                group.add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", y)
                        .set("width", width * plan.scale)
                        .set("height", run_depth * plan.scale)
                        .set("fill", self.stairs.to_string())
                        .set("fill-opacity", self.stairs.alpha())
                        .set("stroke", "black")
                        .set("stroke-width", 0.5),
                )
            }
            Extent::PalletGate { width } => {
                let (x, y) = plan.to_canvas(
                    position.x() - width / 2.0,
                    position.z() + GATE_DEPTH / 2.0,
                );
                group.add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", y)
                        .set("width", width * plan.scale)
                        .set("height", GATE_DEPTH * plan.scale)
                        .set("fill", self.gate.to_string())
                        .set("fill-opacity", self.gate.alpha()),
                )
            }
            Extent::Railing { length } => {
                let angle = placement.rotation().radians();
                let half_x = angle.cos() * length / 2.0;
                let half_z = angle.sin() * length / 2.0;
                let (x1, y1) = plan.to_canvas(position.x() - half_x, position.z() - half_z);
                let (x2, y2) = plan.to_canvas(position.x() + half_x, position.z() + half_z);
                group.add(
                    Line::new()
                        .set("x1", x1)
                        .set("y1", y1)
                        .set("x2", x2)
                        .set("y2", y2)
                        .set("stroke", self.railing.to_string())
                        .set("stroke-opacity", self.railing.alpha())
                        .set("stroke-width", RAILING_STROKE * plan.scale)
                        .set("stroke-linecap", "round"),
                )
            }
        }
    }
}

/// Maps plan coordinates in meters onto the canvas in pixels.
struct PlanFrame {
    length: f64,
    width: f64,
    margin: f64,
    scale: f64,
}

impl PlanFrame {
    fn canvas_size(&self) -> (f64, f64) {
        (
            (self.length + 2.0 * self.margin) * self.scale,
            (self.width + 2.0 * self.margin) * self.scale,
        )
    }

    /// `z` grows towards the back edge, which is drawn at the top.
    fn to_canvas(&self, x: f64, z: f64) -> (f64, f64) {
        (
            (x + self.length / 2.0 + self.margin) * self.scale,
            (self.width / 2.0 - z + self.margin) * self.scale,
        )
    }
}

impl Exporter for SvgPlanExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Svg
    }

    fn export(&self, report: &Report<'_>) -> Result<String, Error> {
        info!(placements_len = report.placements().len(); "Rendering plan view");
        let doc = self.render(report.configuration(), report.placements());
        Ok(doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use mezzanine_core::model::{Accessory, LoadCapacity, PalletGateWidth, StairType};

    use super::*;
    use crate::{layout::compute_layout, pricing::compute_pricing};

    fn render(config: &Configuration, exporter: &SvgPlanExporter) -> String {
        let pricing = compute_pricing(config);
        let placements = compute_layout(config);
        exporter
            .export(&Report::new(config, &pricing).with_placements(&placements))
            .unwrap()
    }

    #[test]
    fn test_plan_frame_orientation() {
        let plan = PlanFrame {
            length: 6.0,
            width: 3.0,
            margin: 2.0,
            scale: 10.0,
        };
        assert_eq!(plan.canvas_size(), (100.0, 70.0));

        let (x, y) = plan.to_canvas(-3.0, 1.5);
        assert_approx_eq!(f64, x, 20.0);
        assert_approx_eq!(f64, y, 20.0);

        let (_, front) = plan.to_canvas(0.0, -1.5);
        assert_approx_eq!(f64, front, 50.0);
    }

    #[test]
    fn test_plan_contains_every_placement() {
        let config = Configuration::new(8000, 3000, 3000, LoadCapacity::Kg250)
            .with_accessory(Accessory::stairs("s", StairType::OneAndHalfMeters, 2))
            .with_accessory(Accessory::railing("r", 8.0, 3))
            .with_accessory(Accessory::pallet_gate("g", PalletGateWidth::Mm2500, 1));
        let svg = render(&config, &SvgPlanExporter::default());

        assert!(svg.contains("<svg"));
        assert!(svg.contains(r#"id="platform""#));
        assert_eq!(svg.matches(r#"data-accessory-id="s""#).count(), 2);
        assert_eq!(svg.matches(r#"data-accessory-id="r""#).count(), 3);
        assert_eq!(svg.matches(r#"data-accessory-id="g""#).count(), 1);
        assert_eq!(svg.matches("<line").count(), 3);
        assert!(svg.contains(r#"data-edge="left""#));
    }

    #[test]
    fn test_canvas_size_follows_style() {
        let style: StyleConfig = toml::from_str(
            r#"
            pixels_per_meter = 10.0
            margin_meters = 1.0
            "#,
        )
        .unwrap();
        let exporter = SvgPlanExporter::from_style(&style).unwrap();
        let svg = render(&Configuration::default(), &exporter);

        assert!(svg.contains(r#"viewBox="0 0 110 50""#), "{svg}");
    }

    #[test]
    fn test_background_only_when_configured() {
        let config = Configuration::default();
        let plain = render(&config, &SvgPlanExporter::default());
        assert_eq!(plain.matches("<rect").count(), 1);

        let style: StyleConfig = toml::from_str(r#"background_color = "white""#).unwrap();
        let exporter = SvgPlanExporter::from_style(&style).unwrap();
        let with_background = render(&config, &exporter);
        assert_eq!(with_background.matches("<rect").count(), 2);
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let style: StyleConfig = toml::from_str(r#"railing_color = "nope""#).unwrap();
        assert!(matches!(
            SvgPlanExporter::from_style(&style),
            Err(Error::Render(_))
        ));

        let style: StyleConfig = toml::from_str("pixels_per_meter = 0.0").unwrap();
        assert!(SvgPlanExporter::from_style(&style).is_err());
    }

    #[test]
    fn test_dimension_label() {
        let svg = render(&Configuration::default(), &SvgPlanExporter::default());
        assert!(svg.contains("9,000 m × 3,000 m"), "{svg}");
    }
}
