//! 日期格式工具
//!
//! 后端使用 ISO 格式 (YYYY-MM-DD) 保存日期，界面显示为 DD-MM-YYYY

use chrono::{Local, NaiveDate};

/// 后端日期格式
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// 显示用日期格式
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// 把 ISO 日期转换为显示格式
///
/// 无法解析时（例如 "Sin fecha"）原样返回
pub fn format_display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, ISO_DATE_FORMAT) {
        Ok(parsed) => parsed.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => date.to_string(),
    }
}

/// 解析 ISO 日期
pub fn parse_iso_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), ISO_DATE_FORMAT).ok()
}

/// 今天（本地时区）
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
