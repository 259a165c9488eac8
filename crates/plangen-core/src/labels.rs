//! Fixed display label tables.

use crate::plan::{PressureLevel, UserLevel};

/// Ecosystem tools referenced by plan modules.
pub mod tools {
    pub const CODE_DOCTOR: &str = "Code Doctor (报错诊断)";
    pub const MNIST_LAB: &str = "MNIST 维度实验室";
    pub const ERROR_BOOK: &str = "智能错题本";
    pub const PANDAS_SIM: &str = "Pandas 演练场";
}

/// Standard operating notes attached to each phase.
pub mod sop {
    pub const DESENSITIZATION: &str =
        "SOP 原则：‘比喻先行’。不要死记硬背语法，把 DataFrame 想象成增强版的 Excel。";
    pub const FORTIFICATION: &str =
        "攻坚策略：理论与实战必须混编。每天分配 1.5h 给法律/道德理论，其余时间全部写代码。";
    pub const SPRINT: &str =
        "肌肉记忆阶段：仅进行全真模拟。遇到报错直接调用 Code Doctor，不要浪费时间百度。";
    pub const SURVIVAL: &str = "生存模式已激活：放弃所有系统性学习。只专注于历年真题的模式识别。";
}

/// Self-test questions as `(field, prompt)` pairs.
pub const SELF_TEST_QUESTIONS: [(&str, &str); 3] = [
    ("knows_containers", "我能分清 List 和 DataFrame 的区别"),
    ("knows_syntax", "我能手写 drop_duplicates 的语法"),
    ("knows_normalization", "我理解什么是归一化 (Normalization)"),
];

pub fn pressure_label(level: PressureLevel) -> &'static str {
    match level {
        PressureLevel::Easy => "游刃有余",
        PressureLevel::Medium => "适中",
        PressureLevel::High => "极度高压",
        PressureLevel::Survival => "生存模式",
    }
}

pub fn level_label(level: UserLevel) -> &'static str {
    match level {
        UserLevel::Beginner => "小白",
        UserLevel::Intermediate => "有基础",
        UserLevel::Sprint => "高手/冲刺",
    }
}
