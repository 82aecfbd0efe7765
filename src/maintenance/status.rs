//! 保养状态计算
//!
//! 根据描述文本中的保养间隔（格式 `Cada <min> - <max> km`）和里程差，
//! 判断某项保养是已完成、即将到期还是已逾期，并计算进度条比例。
//!
//! 两个函数都不会返回错误：描述中没有间隔信息时，一律视为“无需跟踪”，
//! 即状态为 [`MaintenanceStatus::Done`]、进度为 `0.0`。

use std::sync::OnceLock;

use regex::Regex;

use crate::models::MaintenanceStatus;

/// 保养间隔（自上次保养起的里程范围，单位 km）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueInterval {
    pub min_km: i64,
    pub max_km: i64,
}

/// 从描述文本中提取保养间隔
///
/// 只匹配第一次出现的 `Cada <min> - <max> km`，数字为 1-6 位，
/// 连字符两侧允许任意空白。
///
/// # 返回
/// - `Some(DueInterval)`: 找到并成功解析两个数字
/// - `None`: 未匹配或数字无法解析
pub fn extract_interval(description: &str) -> Option<DueInterval> {
    // 使用 OnceLock 缓存正则表达式对象
    static INTERVAL_PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = INTERVAL_PATTERN.get_or_init(|| {
        // [0-9] 而不是 \d：regex crate 的 \d 会匹配 Unicode 数字
        Regex::new(r"Cada ([0-9]{1,6})\s*-\s*([0-9]{1,6}) km").expect("保养间隔正则表达式无效")
    });

    let caps = re.captures(description)?;
    let min_km = caps.get(1)?.as_str().parse::<i64>().ok()?;
    let max_km = caps.get(2)?.as_str().parse::<i64>().ok()?;

    Some(DueInterval { min_km, max_km })
}

/// 计算保养状态
///
/// `delta = current_mileage - recorded_mileage`，可以为负数（数据不一致时），不做额外校验。
/// 溢出时取 i64 的边界值。
///
/// - `delta < min` → 已完成
/// - `min <= delta <= max` → 即将到期（两端都包含）
/// - `delta > max` → 已逾期
pub fn classify(current_mileage: i64, recorded_mileage: i64, description: &str) -> MaintenanceStatus {
    let Some(interval) = extract_interval(description) else {
        return MaintenanceStatus::Done;
    };

    let delta = current_mileage.saturating_sub(recorded_mileage);

    if delta < interval.min_km {
        MaintenanceStatus::Done
    } else if delta <= interval.max_km {
        MaintenanceStatus::Upcoming
    } else {
        MaintenanceStatus::Overdue
    }
}

/// 计算保养进度（0.0 - 1.0）
///
/// 只使用间隔上限：`delta / max`，结果截断到 `[0.0, 1.0]`。
/// 下限不参与计算，与 [`classify`] 不对称。
pub fn progress(current_mileage: i64, recorded_mileage: i64, description: &str) -> f32 {
    let Some(interval) = extract_interval(description) else {
        return 0.0;
    };

    let delta = current_mileage.saturating_sub(recorded_mileage);

    // 上限为 0 时不能做除法：已有行驶里程即视为走满
    if interval.max_km == 0 {
        return if delta > 0 { 1.0 } else { 0.0 };
    }

    let ratio = delta as f32 / interval.max_km as f32;
    ratio.clamp(0.0, 1.0)
}
