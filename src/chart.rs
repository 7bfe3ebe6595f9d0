//! Share-chart data model and the rendering collaborator seam.
//!
//! The engine prescribes the chart *data*: one wedge per bucket, wedge
//! value = bucket total, label = percentage to one decimal place, and a
//! title carrying the grand total. How wedges become pixels is a collaborator
//! concern behind [`ChartRenderer`]; the built-in [`SvgPieRenderer`] keeps
//! the crate self-contained.

use crate::error::ProcessResult;

/// One wedge of a share chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    /// Bucket label as grouped from the input.
    pub label: String,
    /// Total count for the bucket.
    pub value: u64,
    /// Share of the grand total, rounded to one decimal place.
    pub percent: f64,
}

/// Data handed to a [`ChartRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    /// Chart title, shows the grand total.
    pub title: String,
    /// One wedge per bucket, in first-appearance order.
    pub wedges: Vec<Wedge>,
}

/// Renders a [`PieChart`] into image bytes.
pub trait ChartRenderer: Send + Sync {
    /// Produce image bytes for the chart.
    fn render(&self, chart: &PieChart) -> ProcessResult<Vec<u8>>;

    /// File extension (without dot) for artifacts from this renderer.
    fn extension(&self) -> &'static str;
}

/// Built-in renderer producing a standalone SVG pie.
#[derive(Debug, Default)]
pub struct SvgPieRenderer;

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 360.0;
const CX: f64 = 240.0;
const CY: f64 = 200.0;
const RADIUS: f64 = 130.0;

const PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#9c755f",
];

impl ChartRenderer for SvgPieRenderer {
    fn render(&self, chart: &PieChart) -> ProcessResult<Vec<u8>> {
        let total: u64 = chart.wedges.iter().map(|w| w.value).sum();

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\">\n"
        ));
        svg.push_str(&format!(
            "  <text x=\"{CX}\" y=\"28\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"18\">{}</text>\n",
            xml_escape(&chart.title)
        ));

        let mut angle = -std::f64::consts::FRAC_PI_2;
        for (i, wedge) in chart.wedges.iter().enumerate() {
            if total == 0 || wedge.value == 0 {
                continue;
            }
            let fill = PALETTE[i % PALETTE.len()];
            let fraction = wedge.value as f64 / total as f64;
            let sweep = fraction * std::f64::consts::TAU;

            if wedge.value == total {
                svg.push_str(&format!(
                    "  <circle cx=\"{CX}\" cy=\"{CY}\" r=\"{RADIUS}\" fill=\"{fill}\"/>\n"
                ));
            } else {
                let (x0, y0) = point_on_rim(angle);
                let (x1, y1) = point_on_rim(angle + sweep);
                let large = i32::from(sweep > std::f64::consts::PI);
                svg.push_str(&format!(
                    "  <path d=\"M {CX:.2} {CY:.2} L {x0:.2} {y0:.2} A {RADIUS:.2} {RADIUS:.2} 0 {large} 1 {x1:.2} {y1:.2} Z\" fill=\"{fill}\"/>\n"
                ));
            }

            let mid = angle + sweep / 2.0;
            let lx = CX + RADIUS * 0.62 * mid.cos();
            let ly = CY + RADIUS * 0.62 * mid.sin();
            svg.push_str(&format!(
                "  <text x=\"{lx:.2}\" y=\"{ly:.2}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\">{} {:.1}%</text>\n",
                xml_escape(&wedge.label),
                wedge.percent
            ));

            angle += sweep;
        }

        svg.push_str("</svg>\n");
        Ok(svg.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

fn point_on_rim(angle: f64) -> (f64, f64) {
    (CX + RADIUS * angle.cos(), CY + RADIUS * angle.sin())
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{ChartRenderer, PieChart, SvgPieRenderer, Wedge};

    fn chart() -> PieChart {
        PieChart {
            title: "Total impressions: 1000".to_string(),
            wedges: vec![
                Wedge {
                    label: "M".to_string(),
                    value: 300,
                    percent: 30.0,
                },
                Wedge {
                    label: "F".to_string(),
                    value: 700,
                    percent: 70.0,
                },
            ],
        }
    }

    #[test]
    fn svg_contains_title_and_one_label_per_wedge() {
        let bytes = SvgPieRenderer.render(&chart()).unwrap();
        let svg = String::from_utf8(bytes).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Total impressions: 1000"));
        assert!(svg.contains("M 30.0%"));
        assert!(svg.contains("F 70.0%"));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn single_bucket_renders_a_full_circle() {
        let chart = PieChart {
            title: "Total impressions: 50".to_string(),
            wedges: vec![Wedge {
                label: "unknown".to_string(),
                value: 50,
                percent: 100.0,
            }],
        };
        let svg = String::from_utf8(SvgPieRenderer.render(&chart).unwrap()).unwrap();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("unknown 100.0%"));
    }

    #[test]
    fn labels_are_xml_escaped() {
        let chart = PieChart {
            title: "Total impressions: 1".to_string(),
            wedges: vec![Wedge {
                label: "<unknown>".to_string(),
                value: 1,
                percent: 100.0,
            }],
        };
        let svg = String::from_utf8(SvgPieRenderer.render(&chart).unwrap()).unwrap();
        assert!(svg.contains("&lt;unknown&gt;"));
        assert!(!svg.contains("<unknown>"));
    }
}
