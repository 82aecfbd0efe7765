//! 车辆命令
//!
//! 车辆的增删改查，以及二维码的生成和扫描

use crate::models::{Vehicle, VehicleForm};
use crate::utils::validate_id;
use crate::AppState;

/// 当前用户的车辆列表
pub async fn list_vehicles(state: &AppState) -> Result<Vec<Vehicle>, String> {
    state
        .garage_domain
        .list()
        .await
        .map_err(|e| e.to_string())
}

/// 获取车辆详情
pub async fn get_vehicle(state: &AppState, vehicle_id: i64) -> Result<Vehicle, String> {
    validate_id("vehículo", vehicle_id)?;
    state
        .garage_domain
        .find(vehicle_id)
        .await
        .map_err(|e| e.to_string())
}

/// 新增车辆
pub async fn add_vehicle(state: &AppState, form: VehicleForm) -> Result<Vehicle, String> {
    state
        .garage_domain
        .add(&form)
        .await
        .map_err(|e| e.to_string())
}

/// 编辑车辆
pub async fn update_vehicle(
    state: &AppState,
    vehicle_id: i64,
    form: VehicleForm,
) -> Result<Vehicle, String> {
    validate_id("vehículo", vehicle_id)?;
    state
        .garage_domain
        .edit(vehicle_id, &form)
        .await
        .map_err(|e| e.to_string())
}

/// 删除车辆
pub async fn delete_vehicle(state: &AppState, vehicle_id: i64) -> Result<(), String> {
    validate_id("vehículo", vehicle_id)?;
    state
        .garage_domain
        .delete(vehicle_id)
        .await
        .map_err(|e| e.to_string())
}

/// 车辆的二维码内容
pub async fn get_vehicle_qr(state: &AppState, vehicle_id: i64) -> Result<String, String> {
    validate_id("vehículo", vehicle_id)?;
    state
        .garage_domain
        .qr_payload(vehicle_id)
        .await
        .map_err(|e| e.to_string())
}

/// 根据扫描结果查找车辆
pub async fn scan_vehicle_qr(state: &AppState, payload: String) -> Result<Vehicle, String> {
    state
        .garage_domain
        .resolve_qr(&payload)
        .await
        .map_err(|e| e.to_string())
}
