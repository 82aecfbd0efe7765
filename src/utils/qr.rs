//! 车辆二维码内容
//!
//! 只处理二维码中的文本内容，不负责生成图片或摄像头识别。
//! 支持两种格式：
//! 1. VEHICULO:<id>
//! 2. URL，最后一段为车辆 ID，例如 http://host/vehiculos/42

use crate::models::Vehicle;

/// 车辆二维码前缀
pub const VEHICLE_QR_PREFIX: &str = "VEHICULO:";

/// 从二维码内容中解析车辆 ID
///
/// # 返回
/// - `Some(id)`: 解析成功
/// - `None`: 内容不是车辆二维码
pub fn parse_vehicle_id(payload: &str) -> Option<i64> {
    let payload = payload.trim();

    if let Some(rest) = payload.strip_prefix(VEHICLE_QR_PREFIX) {
        return rest.parse::<i64>().ok();
    }

    payload.rsplit('/').next()?.parse::<i64>().ok()
}

/// 生成车辆二维码内容
///
/// 车辆自带 qr_code 时优先使用，否则根据 ID 生成；未保存的车辆返回 None
pub fn vehicle_payload(vehicle: &Vehicle) -> Option<String> {
    if let Some(code) = vehicle.qr_code.as_deref().filter(|c| !c.trim().is_empty()) {
        return Some(code.to_string());
    }
    vehicle.id.map(|id| format!("{}{}", VEHICLE_QR_PREFIX, id))
}
