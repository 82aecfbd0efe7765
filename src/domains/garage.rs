// 车辆领域管理器
//
// 负责当前用户车辆的增删改查和二维码解析

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;

use super::SessionDomain;
use crate::api::MaintenanceBackend;
use crate::models::{Vehicle, VehicleForm};
use crate::utils::{parse_vehicle_id, validate_vehicle_form, vehicle_payload};

/// 车辆不存在或不属于当前用户时的提示
pub const MSG_VEHICLE_NOT_FOUND: &str = "No se encontró el vehículo.";

/// 车辆领域管理器
#[derive(Clone)]
pub struct GarageDomain {
    backend: Arc<dyn MaintenanceBackend>,
    session: Arc<SessionDomain>,
}

impl GarageDomain {
    /// 创建新的车辆领域管理器
    pub fn new(backend: Arc<dyn MaintenanceBackend>, session: Arc<SessionDomain>) -> Self {
        Self { backend, session }
    }

    /// 当前用户的所有车辆
    pub async fn list(&self) -> Result<Vec<Vehicle>> {
        let user_id = self.session.current_user_id().await?;
        let vehicles = self.backend.list_vehicles(user_id).await?;
        Ok(vehicles)
    }

    /// 在当前用户的车辆中查找
    pub async fn find(&self, vehicle_id: i64) -> Result<Vehicle> {
        self.list()
            .await?
            .into_iter()
            .find(|v| v.id == Some(vehicle_id))
            .ok_or_else(|| anyhow!(MSG_VEHICLE_NOT_FOUND))
    }

    /// 新增车辆
    pub async fn add(&self, form: &VehicleForm) -> Result<Vehicle> {
        let user_id = self.session.current_user_id().await?;
        let vehicle = validate_vehicle_form(form, user_id).map_err(|e| anyhow!(e))?;

        let created = self
            .backend
            .create_vehicle(user_id, &vehicle)
            .await
            .map_err(|e| anyhow!("Error al guardar el vehículo: {}", e))?;

        info!("车辆已创建: {} (id={:?})", created.title(), created.id);
        Ok(created)
    }

    /// 编辑车辆
    ///
    /// 保留原有的 ID、车主和二维码
    pub async fn edit(&self, vehicle_id: i64, form: &VehicleForm) -> Result<Vehicle> {
        let existing = self.find(vehicle_id).await?;
        let owner_id = match existing.owner_id {
            Some(id) => id,
            None => self.session.current_user_id().await?,
        };

        let mut updated = validate_vehicle_form(form, owner_id).map_err(|e| anyhow!(e))?;
        updated.id = Some(vehicle_id);
        updated.qr_code = existing.qr_code;

        let saved = self
            .backend
            .update_vehicle(vehicle_id, &updated)
            .await
            .map_err(|e| anyhow!("Error al actualizar el vehículo: {}", e))?;

        info!("车辆已更新: id={}", vehicle_id);
        Ok(saved)
    }

    /// 删除车辆（只能删除当前用户的车辆）
    pub async fn delete(&self, vehicle_id: i64) -> Result<()> {
        self.find(vehicle_id).await?;
        self.backend
            .delete_vehicle(vehicle_id)
            .await
            .map_err(|e| anyhow!("Error: {}", e))?;
        info!("车辆已删除: id={}", vehicle_id);
        Ok(())
    }

    /// 车辆二维码内容
    pub async fn qr_payload(&self, vehicle_id: i64) -> Result<String> {
        let vehicle = self.find(vehicle_id).await?;
        vehicle_payload(&vehicle).ok_or_else(|| anyhow!("Este vehículo no tiene un QR asignado."))
    }

    /// 根据扫描到的二维码内容查找车辆
    ///
    /// 按 ID 直接向后端查询，属于其他用户的车辆视为不存在
    pub async fn resolve_qr(&self, payload: &str) -> Result<Vehicle> {
        let vehicle_id =
            parse_vehicle_id(payload).ok_or_else(|| anyhow!("Código QR no válido: {}", payload))?;
        let user_id = self.session.current_user_id().await?;

        let vehicle = match self.backend.get_vehicle(vehicle_id).await {
            Ok(vehicle) => vehicle,
            Err(e) if e.status() == Some(404) => return Err(anyhow!(MSG_VEHICLE_NOT_FOUND)),
            Err(e) => return Err(anyhow!("Error: {}", e)),
        };
        if vehicle.owner_id.is_some_and(|owner| owner != user_id) {
            return Err(anyhow!(MSG_VEHICLE_NOT_FOUND));
        }
        Ok(vehicle)
    }
}
