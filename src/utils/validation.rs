//! 输入验证工具函数
//!
//! 提供表单和参数的验证功能，错误信息直接展示给用户（西班牙语）

use chrono::NaiveDate;

use super::date_format::parse_iso_date;
use crate::models::{Maintenance, MaintenanceForm, Vehicle, VehicleForm};

/// 表单字段缺失或无效时的提示
pub const MSG_INCOMPLETE_FORM: &str = "Por favor, completa todos los campos.";

/// 验证记录 ID 是否有效
///
/// # 参数
/// - `what`: 记录类型，用于错误信息
/// - `id`: 记录 ID
pub fn validate_id(what: &str, id: i64) -> Result<(), String> {
    if id <= 0 {
        return Err(format!("ID de {} inválido: {}", what, id));
    }
    Ok(())
}

/// 验证登录/注册的邮箱和密码
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Completa todos los campos".to_string());
    }
    Ok(())
}

/// 验证后端主机地址
///
/// 只接受主机名或 IP，不能带协议、路径或空白
pub fn validate_backend_host(host: &str) -> Result<String, String> {
    let host = host.trim();
    if host.is_empty() {
        return Err("La IP del backend no puede estar vacía".to_string());
    }
    if host.contains("://") || host.contains('/') || host.chars().any(char::is_whitespace) {
        return Err(format!("IP del backend inválida: {}", host));
    }
    Ok(host.to_string())
}

/// 验证车辆表单并生成车辆对象
///
/// 品牌和型号去除首尾空白；年份和里程必须是整数
///
/// # 参数
/// - `form`: 表单内容
/// - `owner_id`: 车主用户 ID
pub fn validate_vehicle_form(form: &VehicleForm, owner_id: i64) -> Result<Vehicle, String> {
    let brand = form.brand.trim();
    let model = form.model.trim();
    let year = form.year.trim().parse::<i32>().ok();
    let mileage = form.mileage.trim().parse::<i32>().ok();

    match (year, mileage) {
        (Some(year), Some(mileage)) if !brand.is_empty() && !model.is_empty() && mileage >= 0 => {
            Ok(Vehicle {
                id: None,
                brand: brand.to_string(),
                model: model.to_string(),
                year,
                mileage,
                owner_id: Some(owner_id),
                qr_code: None,
            })
        }
        _ => Err(MSG_INCOMPLETE_FORM.to_string()),
    }
}

/// 验证保养里程
///
/// # 参数
/// - `mileage_text`: 用户输入的里程
/// - `previous`: 同类型最近一次保养记录
///
/// # 返回
/// - `Ok(None)`: 输入为空（由必填检查处理）
/// - `Ok(Some(km))`: 验证通过
/// - `Err(String)`: 错误信息
pub fn validate_maintenance_mileage(
    mileage_text: &str,
    previous: Option<&Maintenance>,
) -> Result<Option<i32>, String> {
    let text = mileage_text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let mileage = text
        .parse::<i32>()
        .map_err(|_| "Debe ser un número.".to_string())?;

    if let Some(prev) = previous {
        if mileage < prev.mileage {
            return Err(format!("Debe ser >= a {} km", prev.mileage));
        }
    }

    Ok(Some(mileage))
}

/// 验证保养表单并生成保养记录
///
/// # 参数
/// - `form`: 表单内容
/// - `vehicle_id`: 所属车辆
/// - `previous`: 同类型最近一次保养记录（编辑时传 None）
/// - `today`: 今天的日期，保养日期不能晚于今天
pub fn validate_maintenance_form(
    form: &MaintenanceForm,
    vehicle_id: i64,
    previous: Option<&Maintenance>,
    today: NaiveDate,
) -> Result<Maintenance, String> {
    let mileage = validate_maintenance_mileage(&form.mileage, previous)?;

    let kind = form.kind.trim();
    let description = form.description.trim();
    let date_text = form.date.trim();

    let Some(mileage) = mileage else {
        return Err(MSG_INCOMPLETE_FORM.to_string());
    };
    if kind.is_empty() || description.is_empty() || date_text.is_empty() {
        return Err(MSG_INCOMPLETE_FORM.to_string());
    }

    let date = parse_iso_date(date_text)
        .ok_or_else(|| format!("Fecha inválida (use AAAA-MM-DD): {}", date_text))?;
    if date > today {
        return Err("La fecha no puede ser futura.".to_string());
    }

    Ok(Maintenance {
        id: None,
        kind: kind.to_string(),
        description: description.to_string(),
        date: Some(date.format(super::date_format::ISO_DATE_FORMAT).to_string()),
        mileage,
        status: Default::default(),
        vehicle_id,
    })
}
