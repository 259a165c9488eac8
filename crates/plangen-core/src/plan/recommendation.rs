//! Tier to advisory string.

use super::types::PressureLevel;

pub fn recommendation_for(level: PressureLevel) -> &'static str {
    match level {
        PressureLevel::Easy => "时间充裕，建议在[MNIST 维度实验室]多做实验，深挖原理。",
        PressureLevel::Medium => "进度适中，请严格执行[Code Doctor]排错机制，保持节奏。",
        PressureLevel::High => "时间紧迫，启动[饱和攻击]策略，放弃低频考点。",
        PressureLevel::Survival => "🚨 红色警报：全押真题，背诵模式，放弃理解。",
    }
}
