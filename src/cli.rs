use crate::adapters::fs::config::ConfigFileReader;
use crate::adapters::fs::layout::LayoutFileReader;
use crate::app::dto::{ComparisonReport, SimulateRequest, SimulationReport};
use crate::app::engine::SimulationEngine;
use anyhow::Result;
use std::f64::consts::PI;
use std::path::Path;

/// Parse an angle in radians, also accepting multiples of pi such as `2pi/3`,
/// `5*pi/6` or `π/2`.
pub fn parse_angle(input: &str) -> std::result::Result<f64, String> {
    let text: String = input
        .to_lowercase()
        .replace('π', "pi")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if text.is_empty() {
        return Err("empty angle".to_string());
    }

    let (numerator, denominator) = match text.split_once('/') {
        Some((n, d)) => (n, Some(d)),
        None => (text.as_str(), None),
    };

    let number = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| format!("invalid angle '{input}'"))
    };

    let mut value = match numerator.split_once("pi") {
        Some((coef, "")) => {
            let coef = coef.trim_end_matches('*');
            if coef.is_empty() { PI } else { number(coef)? * PI }
        }
        Some(_) => return Err(format!("invalid angle '{input}'")),
        None => number(numerator)?,
    };

    if let Some(d) = denominator {
        let d = number(d)?;
        if d == 0.0 {
            return Err(format!("division by zero in angle '{input}'"));
        }
        value /= d;
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("invalid angle '{input}'"))
    }
}

/// Build a request from optional config and layout files.
pub fn load_request(config: Option<&Path>, layout: Option<&Path>) -> Result<SimulateRequest> {
    Ok(SimulateRequest {
        config: match config {
            Some(path) => ConfigFileReader::new().read(path)?,
            None => Default::default(),
        },
        layout: layout
            .map(|path| LayoutFileReader::new().read(path))
            .transpose()?,
    })
}

pub fn run_simulation(request: SimulateRequest, json: bool) -> Result<()> {
    let report = SimulationEngine::simulate(request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }
    Ok(())
}

pub fn run_comparison(request: SimulateRequest, json: bool) -> Result<()> {
    let report = SimulationEngine::compare_suite(request)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_comparison(&report);
    }
    Ok(())
}

pub fn display_report(report: &SimulationReport) {
    let c = &report.config;
    println!("CBTC simulation");
    println!("{}", "=".repeat(60));
    println!(
        "  α = {:.4} rad ({:.1}°), shrink-back: {}, asymmetric mode: {:?}",
        c.cone_angle,
        c.cone_angle.to_degrees(),
        c.shrink_back,
        c.asymmetric_mode
    );
    println!("  Nodes: {}", report.metrics.node_count);

    println!("\nEdges per stage:");
    println!("  Candidates:  {:>6}", report.stages.candidate_edges);
    println!("  Built:       {:>6}", report.stages.built_edges);
    println!("  Shrunk back: {:>6}", report.stages.pruned_edges);
    println!("  Final:       {:>6}", report.stages.final_edges);

    let m = &report.metrics;
    println!("\nTopology:");
    println!(
        "  Connected: {} ({} component{}, largest {})",
        m.is_connected,
        m.component_count,
        if m.component_count == 1 { "" } else { "s" },
        m.largest_component
    );
    println!("  Degree:    avg {:.2}, max {}", m.avg_degree, m.max_degree);
    println!("  Radius:    avg {:.2}, max {:.2}", m.avg_radius, m.max_radius);
    println!("  Asymmetric edges: {}", m.asymmetric_edge_count);

    let p = &report.power;
    println!("\nPower:");
    println!("  Full graph: {:>12.2}", p.baseline_power);
    println!("  Topology:   {:>12.2}", p.topology_power);
    println!("  Savings:    {:>11.1}%", p.savings_ratio * 100.0);

    if !report.uncovered_nodes.is_empty() {
        println!("\nBoundary nodes: {:?}", report.uncovered_nodes);
    }
    if !report.isolated_nodes.is_empty() {
        println!("Isolated nodes: {:?}", report.isolated_nodes);
    }
    if !report.exceptions.is_empty() {
        println!("\nAsymmetric edges kept:");
        for e in &report.exceptions {
            println!("  {} -> {} ({:?})", e.source, e.target, e.reason);
        }
    }
}

pub fn display_comparison(report: &ComparisonReport) {
    println!(
        "Scenario comparison on {} nodes ({} candidate edges)",
        report.node_count, report.candidate_edges
    );
    println!("{}", "=".repeat(80));
    println!(
        "{:<48} {:>6} {:>7} {:>9} {:>7}",
        "Scenario", "Edges", "AvgDeg", "Connected", "Saved"
    );
    for s in &report.scenarios {
        println!(
            "{:<48} {:>6} {:>7.2} {:>9} {:>6.1}%",
            s.label,
            s.metrics.edge_count,
            s.metrics.avg_degree,
            s.metrics.is_connected,
            s.power.savings_ratio * 100.0
        );
    }
}
