//! Plan computation and export commands.

use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::json;
use tracing::{info, warn};

use plangen_core::labels::{level_label, pressure_label, SELF_TEST_QUESTIONS};
use plangen_core::{export as plan_export, GaugeReading, PlanEngine, PlanState, SelfTest, UserInput, UserLevel};

use super::load_config;

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Days until the exam (1-60)
    #[arg(long)]
    pub days: u32,
    /// Study hours per day (1-12)
    #[arg(long)]
    pub hours: u32,
    /// Current level: beginner, intermediate or sprint
    #[arg(long, default_value = "intermediate")]
    pub level: UserLevel,
    /// I can tell a List apart from a DataFrame
    #[arg(long)]
    pub knows_containers: bool,
    /// I can hand-write drop_duplicates
    #[arg(long)]
    pub knows_syntax: bool,
    /// I understand normalization
    #[arg(long)]
    pub knows_normalization: bool,
    /// Anchor date for the timeline (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

impl PlanArgs {
    fn input(&self) -> UserInput {
        UserInput::new(
            self.days,
            self.hours,
            self.level,
            SelfTest {
                knows_containers: self.knows_containers,
                knows_syntax: self.knows_syntax,
                knows_normalization: self.knows_normalization,
            },
        )
    }

    fn anchor(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

fn compute(args: &PlanArgs, config_path: Option<&Path>) -> Result<PlanState, Box<dyn std::error::Error>> {
    let engine = PlanEngine::with_config(load_config(config_path)?)?;
    let plan = engine.compute(&args.input(), args.anchor())?;
    info!(
        pressure = plan.pressure,
        tier = %plan.pressure_level,
        modules = plan.modules.len(),
        "plan computed"
    );
    if plan.requires_alert() {
        warn!("survival mode triggered: fewer days remain than the survival threshold");
    }
    Ok(plan)
}

pub fn run(args: &PlanArgs, json: bool, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let plan = compute(args, config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan_json(&plan)?)?);
        return Ok(());
    }

    print!("{}", render_plan(args, &plan));
    if plan.requires_alert() {
        // Terminal bell stands in for haptic feedback.
        eprint!("\x07");
    }
    Ok(())
}

pub fn export(args: &PlanArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let plan = compute(args, config_path)?;
    println!("{}", plan_export::render_text(&plan));
    Ok(())
}

/// The plan as JSON with a `gauge` object for display clients.
fn plan_json(plan: &PlanState) -> serde_json::Result<serde_json::Value> {
    let gauge = GaugeReading::from_plan(plan);
    let mut value = serde_json::to_value(plan)?;
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "gauge".to_string(),
            json!({
                "value": gauge.value,
                "overflow": gauge.overflow,
                "readout": gauge.readout(plan.pressure),
                "color": gauge.color(),
                "needle_degrees": gauge.needle_degrees(),
            }),
        );
    }
    Ok(value)
}

fn self_test_answers(args: &PlanArgs) -> [bool; 3] {
    [args.knows_containers, args.knows_syntax, args.knows_normalization]
}

fn render_plan(args: &PlanArgs, plan: &PlanState) -> String {
    let gauge = GaugeReading::from_plan(plan);
    let mut output = format!(
        "\nPlanGen: {} days x {}h ({})\n",
        args.days,
        args.hours,
        level_label(args.level)
    );
    output.push_str(&"─".repeat(50));
    output.push('\n');
    output.push_str(&format!("Pressure:     {}\n", gauge.render_ascii(plan.pressure)));
    output.push_str(&format!("Tier:         {} ({})\n", plan.pressure_level, pressure_label(plan.pressure_level)));
    output.push_str(&format!("Total energy: {}h\n", plan.total_energy));
    output.push_str(&format!("Advice:       {}\n", plan.recommendation));
    output.push_str("Self-test:\n");
    for ((_, prompt), passed) in SELF_TEST_QUESTIONS.iter().zip(self_test_answers(args)) {
        let mark = if passed { "x" } else { " " };
        output.push_str(&format!("  [{mark}] {prompt}\n"));
    }
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for (i, module) in plan.modules.iter().enumerate() {
        output.push_str(&format!("\n{}. {} | {}\n", i + 1, module.title, module.sub_title));
        output.push_str(&format!(
            "   {} · {} days · {}h ({}%)\n",
            module.date_range, module.day_span, module.hours_allocated, module.percentage
        ));
        for item in &module.items {
            output.push_str(&format!("   - {item}\n"));
        }
        if let Some(tools) = &module.tools {
            output.push_str(&format!("   Tools: {}\n", tools.join(", ")));
        }
        if let Some(notes) = &module.notes {
            output.push_str(&format!("   Note:  {notes}\n"));
        }
    }
    output
}
