// 保养领域管理器
//
// 负责保养记录的增删改查，以及按当前里程生成保养总览

use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::info;

use super::GarageDomain;
use crate::api::{ApiError, MaintenanceBackend};
use crate::maintenance::{latest_of_kind, summarize, MaintenanceSummary};
use crate::models::{Maintenance, MaintenanceForm};
use crate::utils::validate_maintenance_form;

/// 保养领域管理器
#[derive(Clone)]
pub struct MaintenanceDomain {
    backend: Arc<dyn MaintenanceBackend>,
    garage: Arc<GarageDomain>,
}

impl MaintenanceDomain {
    /// 创建新的保养领域管理器
    pub fn new(backend: Arc<dyn MaintenanceBackend>, garage: Arc<GarageDomain>) -> Self {
        Self { backend, garage }
    }

    /// 车辆的所有保养记录
    pub async fn list(&self, vehicle_id: i64) -> Result<Vec<Maintenance>> {
        self.backend
            .list_maintenances(vehicle_id)
            .await
            .map_err(|e| anyhow!("No se pudieron cargar los mantenimientos: {}", e))
    }

    /// 按 ID 获取保养记录
    pub async fn get(&self, id: i64) -> Result<Maintenance> {
        self.backend
            .get_maintenance(id)
            .await
            .map_err(|e| anyhow!("Error al cargar los datos: {}", e))
    }

    /// 同类型最近一次的保养记录
    pub async fn latest_of_kind(&self, vehicle_id: i64, kind: &str) -> Result<Option<Maintenance>> {
        let history = self
            .backend
            .list_maintenances(vehicle_id)
            .await
            .map_err(|e| anyhow!("No se pudo cargar el historial: {}", e))?;
        Ok(latest_of_kind(&history, kind).cloned())
    }

    /// 新增保养记录
    ///
    /// 里程不能低于同类型的上一次保养，日期不能晚于 `today`
    pub async fn create(
        &self,
        vehicle_id: i64,
        form: &MaintenanceForm,
        today: NaiveDate,
    ) -> Result<Maintenance> {
        let previous = self.latest_of_kind(vehicle_id, form.kind.trim()).await?;
        let maintenance = validate_maintenance_form(form, vehicle_id, previous.as_ref(), today)
            .map_err(|e| anyhow!(e))?;

        let created = self
            .backend
            .create_maintenance(vehicle_id, &maintenance)
            .await
            .map_err(|e| anyhow!("Error al guardar: {}", e))?;

        info!(
            "保养记录已创建: 车辆 {} - {} @ {} km",
            vehicle_id, created.kind, created.mileage
        );
        Ok(created)
    }

    /// 编辑保养记录
    ///
    /// 保留原记录的车辆和状态；表单日期为空时沿用原日期
    pub async fn edit(&self, id: i64, form: &MaintenanceForm, today: NaiveDate) -> Result<Maintenance> {
        let existing = self.get(id).await?;

        let mut form = form.clone();
        if form.date.trim().is_empty() {
            form.date = existing.date.clone().unwrap_or_default();
        }

        let validated = validate_maintenance_form(&form, existing.vehicle_id, None, today)
            .map_err(|e| anyhow!(e))?;
        let updated = Maintenance {
            id: Some(id),
            status: existing.status,
            ..validated
        };

        self.backend
            .update_maintenance(id, &updated)
            .await
            .map_err(|e| anyhow!("Error al actualizar: {}", e))?;

        info!("保养记录已更新: id={}", id);
        Ok(updated)
    }

    /// 删除保养记录
    pub async fn delete(&self, id: i64) -> Result<()> {
        match self.backend.delete_maintenance(id).await {
            Ok(()) => {
                info!("保养记录已删除: id={}", id);
                Ok(())
            }
            Err(ApiError::Status { status, .. }) => Err(anyhow!("Error al eliminar: {}", status)),
            Err(e) => Err(anyhow!("Falló la conexión al eliminar: {}", e)),
        }
    }

    /// 车辆保养总览
    pub async fn summary(&self, vehicle_id: i64) -> Result<MaintenanceSummary> {
        let vehicle = self.garage.find(vehicle_id).await?;
        let records = self.list(vehicle_id).await?;
        Ok(summarize(vehicle, &records))
    }
}
