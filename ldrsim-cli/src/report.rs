//! Text, CSV and JSON renderings for the one-shot subcommands.

use std::fmt::Write as _;

use clap::ValueEnum;
use ldrsim_engine::model::prelude::*;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Result of `ldrsim eval`.
#[derive(Debug, Serialize)]
pub struct EvalReport {
    pub supply_voltage: f64,
    pub inputs: CircuitInputs,
    pub thresholds: LogicThresholds,
    pub result: CircuitResult,
    pub threshold_resistances: ThresholdResistances,
}

impl EvalReport {
    /// # Errors
    /// Any model error for the given inputs.
    pub fn compute(supply_voltage: f64, inputs: CircuitInputs) -> ModelResult<Self> {
        Ok(Self {
            supply_voltage,
            inputs,
            thresholds: LogicThresholds::for_supply(supply_voltage),
            result: inputs.evaluate(supply_voltage)?,
            threshold_resistances: threshold_resistances(supply_voltage, inputs.pull_down_ohms)?,
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Vcc    : {:.1} V", self.supply_voltage);
        let _ = writeln!(out, "Rd     : {}", Ohms(self.inputs.pull_down_ohms));
        let _ = writeln!(out, "R_LDR  : {}", Ohms(self.inputs.ldr_ohms));
        let _ = writeln!(out, "Vpin   : {}", Volts(self.result.pin_voltage));
        let _ = writeln!(out, "State  : {}", self.result.digital_state);
        let _ = writeln!(
            out,
            "HIGH (>= {:.1} V) while R_LDR <= {}",
            self.thresholds.high_volts,
            Ohms(self.threshold_resistances.ldr_for_high)
        );
        let _ = writeln!(
            out,
            "LOW  (<= {:.1} V) while R_LDR >= {}",
            self.thresholds.low_volts,
            Ohms(self.threshold_resistances.ldr_for_low)
        );
        out
    }

    /// Header plus one data row.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(
            "supply_voltage,pull_down_ohms,ldr_ohms,pin_voltage,digital_state,ldr_for_high,ldr_for_low\n",
        );
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            self.supply_voltage,
            self.inputs.pull_down_ohms,
            self.inputs.ldr_ohms,
            self.result.pin_voltage,
            self.result.digital_state.label(),
            self.threshold_resistances.ldr_for_high,
            self.threshold_resistances.ldr_for_low,
        );
        out
    }

    /// # Errors
    /// JSON serialization failures.
    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Csv => Ok(self.to_csv()),
            OutputFormat::Json => serde_json::to_string_pretty(self).map(|mut s| {
                s.push('\n');
                s
            }),
        }
    }
}

/// Render a sweep as an aligned table, CSV, or a JSON array.
///
/// # Errors
/// JSON serialization failures.
pub fn sweep_output(samples: &[CurveSample], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(samples),
        OutputFormat::Csv => {
            let mut out = String::from("resistance_ohms,log_resistance,pin_voltage\n");
            for s in samples {
                let _ = writeln!(out, "{},{},{}", s.resistance_ohms, s.log_resistance, s.pin_voltage);
            }
            Ok(out)
        }
        OutputFormat::Text => {
            let mut out = format!("{:>4}  {:>12}  {:>8}  {:>8}\n", "#", "R_LDR", "log10 R", "Vpin");
            for (i, s) in samples.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>4}  {:>12}  {:>8.4}  {:>8.4}",
                    i,
                    Ohms(s.resistance_ohms).to_string(),
                    s.log_resistance,
                    s.pin_voltage
                );
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_text_reference_point() {
        let r = EvalReport::compute(5.0, CircuitInputs::new(30_000.0, 40_000.0)).unwrap();
        let text = r.to_text();
        assert!(text.contains("Vpin   : 2.143 V"), "{text}");
        assert!(text.contains("State  : INDETERMINATE"));
        assert!(text.contains("R_LDR <= 20.00 kΩ"));
        assert!(text.contains("R_LDR >= 70.00 kΩ"));
    }

    #[test]
    fn eval_json_fields() {
        let r = EvalReport::compute(5.0, CircuitInputs::new(30_000.0, 70_000.0)).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["result"]["digital_state"], "LOW");
        assert_eq!(v["thresholds"]["high_volts"], 3.0);
    }

    #[test]
    fn eval_csv_is_one_row() {
        let r = EvalReport::compute(5.0, CircuitInputs::new(30_000.0, 20_000.0)).unwrap();
        let csv = r.render(OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("supply_voltage,pull_down_ohms,ldr_ohms,pin_voltage,digital_state"));
        let row: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(row.len(), 7);
        assert_eq!(row[4], "HIGH");
        let num = |i: usize| row[i].parse::<f64>().unwrap();
        assert!((num(3) - 3.0).abs() < 1e-12);
        assert!((num(5) - 20_000.0).abs() < 1e-6);
        assert!((num(6) - 70_000.0).abs() < 1e-6);
        assert_ne!(csv, r.render(OutputFormat::Text).unwrap());
    }

    #[test]
    fn eval_rejects_invalid() {
        assert!(EvalReport::compute(5.0, CircuitInputs::new(0.0, 0.0)).is_err());
    }

    #[test]
    fn sweep_formats() {
        let pts: Vec<_> = sweep(5.0, 30_000.0, 1e3, 1e6, 4).unwrap().collect();

        let text = sweep_output(&pts, OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(1).unwrap().contains("1.00 kΩ"));
        assert!(text.lines().nth(1).unwrap().ends_with("4.8387"));

        let csv = sweep_output(&pts, OutputFormat::Csv).unwrap();
        assert!(csv.starts_with("resistance_ohms,log_resistance,pin_voltage\n"));
        assert_eq!(csv.lines().count(), 5);

        let json: serde_json::Value = serde_json::from_str(&sweep_output(&pts, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);
        assert_eq!(json[3]["pin_voltage"], 0.1456);
    }
}
