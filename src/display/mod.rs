use std::fmt::{self, Display, Formatter};
use std::io;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::*;
use serde::Serialize;

use crate::{RateEstimate, SweepResults};

fn rate_cell(estimate: &RateEstimate) -> String {
    match estimate.rate() {
        Some(rate) => format!("{rate:.3}"),
        None => "n/a".to_string(),
    }
}

impl SweepResults {
    /// Render the results as a terminal table.
    pub fn render(&self) -> String {
        let mut title_table = Table::new();
        title_table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .add_row(vec![Cell::new(format!(
                "Empirical Type I error of the permutation t test (α = {})",
                self.alpha
            ))
            .set_alignment(CellAlignment::Center)]);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("n1").set_alignment(CellAlignment::Center),
                Cell::new("n2").set_alignment(CellAlignment::Center),
                Cell::new("scale1").set_alignment(CellAlignment::Center),
                Cell::new("scale2").set_alignment(CellAlignment::Center),
                Cell::new("family").set_alignment(CellAlignment::Center),
                Cell::new("pooled").set_alignment(CellAlignment::Center),
                Cell::new("welch").set_alignment(CellAlignment::Center),
                Cell::new("degenerate").set_alignment(CellAlignment::Center),
            ]);

        for row in &self.rows {
            let s = &row.scenario;
            table.add_row(vec![
                Cell::new(s.n1).set_alignment(CellAlignment::Right),
                Cell::new(s.n2).set_alignment(CellAlignment::Right),
                Cell::new(s.scale1).set_alignment(CellAlignment::Right),
                Cell::new(s.scale2).set_alignment(CellAlignment::Right),
                Cell::new(s.family).set_alignment(CellAlignment::Left),
                Cell::new(rate_cell(&row.equal)).set_alignment(CellAlignment::Right),
                Cell::new(rate_cell(&row.unequal)).set_alignment(CellAlignment::Right),
                Cell::new(row.equal.degenerate + row.unequal.degenerate)
                    .set_alignment(CellAlignment::Right),
            ]);
        }

        format!("{title_table}\n{table}")
    }

    /// Write the results as CSV, one record per scenario.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(CsvRow {
                n1: row.scenario.n1,
                n2: row.scenario.n2,
                scale1: row.scenario.scale1,
                scale2: row.scenario.scale2,
                family: row.scenario.family.to_string(),
                pooled_rate: row.equal.rate(),
                welch_rate: row.unequal.rate(),
                degenerate: row.equal.degenerate + row.unequal.degenerate,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Display for SweepResults {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Flat record shape for the CSV export.
#[derive(Serialize)]
struct CsvRow {
    n1: usize,
    n2: usize,
    scale1: f64,
    scale2: f64,
    family: String,
    pooled_rate: Option<f64>,
    welch_rate: Option<f64>,
    degenerate: usize,
}

#[cfg(test)]
mod tests {
    use crate::{Family, RateEstimate, Scenario, SweepResults, SweepRow};

    fn results() -> SweepResults {
        let scenario = Scenario::new(10, 25, 1.0, 2.0, Family::SkewNormal { shape: 5.0 }).unwrap();
        SweepResults {
            rows: vec![SweepRow {
                scenario,
                equal: RateEstimate {
                    rejections: 47,
                    completed: 1000,
                    degenerate: 0,
                },
                unequal: RateEstimate {
                    rejections: 52,
                    completed: 1000,
                    degenerate: 0,
                },
            }],
            alpha: 0.05,
        }
    }

    #[test]
    fn render_contains_rates_and_family() {
        let text = results().render();
        assert!(text.contains("0.047"));
        assert!(text.contains("0.052"));
        assert!(text.contains("skew-normal"));
        assert!(text.contains("pooled"));
        assert!(text.contains("welch"));
    }

    #[test]
    fn csv_has_a_header_and_one_record_per_row() {
        let mut buffer = Vec::new();
        results().write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.trim_end().lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("n1,n2,scale1,scale2,family"));
        assert!(lines[1].contains("0.047"));
    }
}
