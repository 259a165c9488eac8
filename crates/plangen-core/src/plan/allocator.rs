//! Phase allocation and module construction.
//!
//! Turns resolved weights into hour budgets, contiguous day spans and the
//! module records shown to the learner. Day spans are laid out from
//! `today`; the sprint module always absorbs whatever days remain.

use chrono::{Days, NaiveDate};
use tracing::trace;

use super::types::{ModuleId, StudyPlanModule, UserInput, UserLevel};
use crate::error::ValidationError;
use super::weights::PhaseWeights;
use crate::labels::{sop, tools};

/// Hours a phase must exceed before the desensitization module is emitted.
pub const MIN_DESENSITIZATION_HOURS: f64 = 1.0;

/// Format a date the way the plan displays it, e.g. `10月19日`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m月%-d日").to_string()
}

pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}

fn offset_date(today: NaiveDate, days: u32) -> Result<NaiveDate, ValidationError> {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or(ValidationError::DateOutOfRange { today, days })
}

/// Day span proportional to a phase's share of the total hour budget.
fn proportional_span(hours: f64, total_energy: u64, days_remaining: u32) -> u32 {
    let span = (hours / total_energy as f64 * f64::from(days_remaining)).round();
    (span as u32).max(1)
}

/// Cap a span so later phases keep at least `reserve` days.
fn capped_span(span: u32, days_left: u32, reserve: u32) -> u32 {
    span.min(days_left.saturating_sub(reserve)).max(1)
}

fn percentage(weight: f64) -> u32 {
    (weight * 100.0).round() as u32
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The single all-in module used when too few days remain.
pub fn survival_module(
    input: &UserInput,
    today: NaiveDate,
    total_energy: u64,
) -> Result<StudyPlanModule, ValidationError> {
    let end = offset_date(today, input.days_remaining)?;
    Ok(StudyPlanModule {
        id: ModuleId::Survival,
        title: "🚨 极速求生模式".to_string(),
        sub_title: "全押真题".to_string(),
        date_range: format_date_range(today, end),
        starts_on: today,
        ends_on: end,
        day_span: input.days_remaining,
        hours_allocated: total_energy,
        percentage: 100,
        items: owned(&["放弃理论推导", "背诵 Top 50 代码片段", "仅做模式识别"]),
        tools: Some(owned(&[tools::ERROR_BOOK])),
        notes: Some(sop::SURVIVAL.to_string()),
    })
}

fn fortification_items(input: &UserInput) -> Vec<String> {
    let mut items = Vec::with_capacity(4);
    if input.level == UserLevel::Sprint {
        items.push("高频易错题自查 (启动项)".to_string());
    }
    let syntax = if input.self_test.knows_syntax { "快速过" } else { "重点" };
    items.push(format!("2.x Pandas/NumPy 攻坚 ({syntax})"));
    let modeling = if input.self_test.knows_normalization {
        "实战"
    } else {
        "原理+实战"
    };
    items.push(format!("3.x 模型训练与评估 ({modeling})"));
    items.push("🔸 每日混编：理论法规 (1.5h/天)".to_string());
    items
}

/// Build the normal-mode modules.
///
/// Expects `input.days_remaining >= 3`, which holds whenever the survival
/// threshold is at least 3. Module 1 is emitted only when its hour share
/// exceeds one hour. The theory reserve is always folded into module 2.
///
/// Fails with [`ValidationError::DateOutOfRange`] when the exam date lies
/// beyond the calendar chrono can represent.
pub fn build_modules(
    input: &UserInput,
    today: NaiveDate,
    total_energy: u64,
    weights: &PhaseWeights,
    theory_hours_total: u32,
) -> Result<Vec<StudyPlanModule>, ValidationError> {
    let days = input.days_remaining;
    let exam_day = offset_date(today, days)?;
    let theory_hours = f64::from(theory_hours_total);
    let net_energy = (total_energy as f64 - theory_hours).max(0.0);

    let h_desensitization = net_energy * weights.desensitization;
    let h_fortification = net_energy * weights.fortification;
    let h_sprint = net_energy * weights.sprint;

    let mut modules = Vec::with_capacity(3);
    let mut offset = 0u32;

    if h_desensitization > MIN_DESENSITIZATION_HOURS {
        let span = capped_span(
            proportional_span(h_desensitization, total_energy, days),
            days,
            2,
        );
        let start = offset_date(today, offset)?;
        let end = offset_date(today, offset + span)?;
        trace!(days = span, hours = h_desensitization, "desensitization module");
        modules.push(StudyPlanModule {
            id: ModuleId::Desensitization,
            title: "阶段 1：思维脱敏".to_string(),
            sub_title: "代码文本化".to_string(),
            date_range: format_date_range(start, end),
            starts_on: start,
            ends_on: end,
            day_span: span,
            hours_allocated: h_desensitization.round() as u64,
            percentage: percentage(weights.desensitization),
            items: owned(&["Python 容器逻辑", "Series vs DataFrame", "环境搭建"]),
            tools: Some(owned(&[tools::PANDAS_SIM])),
            notes: Some(sop::DESENSITIZATION.to_string()),
        });
        offset += span;
    }

    let fortification_hours = h_fortification + theory_hours;
    let span = capped_span(
        proportional_span(fortification_hours, total_energy, days),
        days.saturating_sub(offset),
        1,
    );
    let start = offset_date(today, offset)?;
    let end = offset_date(today, offset + span)?;
    trace!(days = span, hours = fortification_hours, "fortification module");
    modules.push(StudyPlanModule {
        id: ModuleId::Fortification,
        title: "阶段 2：混合攻坚".to_string(),
        sub_title: "理论实战双轨".to_string(),
        date_range: format_date_range(start, end),
        starts_on: start,
        ends_on: end,
        day_span: span,
        hours_allocated: fortification_hours.round() as u64,
        percentage: percentage(weights.fortification),
        items: fortification_items(input),
        tools: Some(owned(&[tools::CODE_DOCTOR, tools::MNIST_LAB])),
        notes: Some(sop::FORTIFICATION.to_string()),
    });
    offset += span;

    // The sprint phase takes the remainder so the spans cover every day.
    let span = days.saturating_sub(offset).max(1);
    let start = offset_date(today, offset)?;
    trace!(days = span, hours = h_sprint, "sprint module");
    modules.push(StudyPlanModule {
        id: ModuleId::Sprint,
        title: "阶段 3：全真模拟舱".to_string(),
        sub_title: "应激反应训练".to_string(),
        date_range: format_date_range(start, exam_day),
        starts_on: start,
        ends_on: exam_day,
        day_span: span,
        hours_allocated: h_sprint.round() as u64,
        percentage: percentage(weights.sprint),
        items: owned(&["全真模拟考 (3小时/次)", "错题本清零", "手速极限测试"]),
        tools: Some(owned(&[tools::ERROR_BOOK, tools::CODE_DOCTOR])),
        notes: Some(sop::SPRINT.to_string()),
    });

    Ok(modules)
}
