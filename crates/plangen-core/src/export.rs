//! Plain-text export of a finished plan.
//!
//! Produces the block users paste into notes or chats. Reads the plan
//! only; nothing here feeds back into the engine.

use crate::labels::pressure_label;
use crate::plan::{PlanState, StudyPlanModule};

pub const EXPORT_HEADER: &str = "=== AI 备考指挥中枢 v3.0 ===";
pub const EXPORT_RULE: &str = "========================================";
pub const EXPORT_DISCLAIMER: &str = "注意：遇到报错请优先调用 Code Doctor，切勿手动排查超过 10 分钟。";

/// Lines of one module block. The tools line is left empty when the module
/// names no tools so every block keeps the same shape.
fn module_lines(module: &StudyPlanModule) -> Vec<String> {
    let mut lines = vec![
        format!("[{}]", module.title),
        format!("重点：{} ({})", module.sub_title, module.date_range),
        "任务：".to_string(),
    ];
    lines.extend(module.items.iter().map(|item| format!("  - {item}")));
    lines.push(match &module.tools {
        Some(tools) => format!("🛠 调用工具：{}", tools.join(", ")),
        None => String::new(),
    });
    lines
}

/// Render the export block for a plan.
///
/// Module blocks are each preceded by two blank lines and the closing rule
/// by one.
pub fn render_text(plan: &PlanState) -> String {
    let mut out = vec![
        EXPORT_HEADER.to_string(),
        format!("总精力池：{} 小时", plan.total_energy),
        format!("压力等级：{}", pressure_label(plan.pressure_level)),
        format!("指挥官建议：{}", plan.recommendation),
    ];
    for module in &plan.modules {
        out.push(String::new());
        out.push(String::new());
        out.extend(module_lines(module));
    }
    out.push(String::new());
    out.push(EXPORT_RULE.to_string());
    out.push(EXPORT_DISCLAIMER.to_string());
    out.join("\n")
}
