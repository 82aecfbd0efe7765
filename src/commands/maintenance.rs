//! 保养命令
//!
//! 保养记录的增删改查、保养总览，以及不依赖后端的状态计算

use serde::Serialize;

use crate::maintenance::{classify, extract_interval, progress, MaintenanceSummary};
use crate::models::{Maintenance, MaintenanceForm, MaintenanceStatus, MAINTENANCE_KINDS};
use crate::utils::{today, validate_id};
use crate::AppState;

/// 单次状态计算结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: MaintenanceStatus,
    pub progress: f32,
    pub percent: u8,
    /// 描述中解析出的保养间隔 (min, max)，没有时为 None
    pub interval: Option<(i64, i64)>,
}

/// 车辆的保养记录
pub async fn list_maintenances(state: &AppState, vehicle_id: i64) -> Result<Vec<Maintenance>, String> {
    validate_id("vehículo", vehicle_id)?;
    state
        .maintenance_domain
        .list(vehicle_id)
        .await
        .map_err(|e| e.to_string())
}

/// 车辆保养总览（按类型分组）
pub async fn get_maintenance_summary(
    state: &AppState,
    vehicle_id: i64,
) -> Result<MaintenanceSummary, String> {
    validate_id("vehículo", vehicle_id)?;
    state
        .maintenance_domain
        .summary(vehicle_id)
        .await
        .map_err(|e| e.to_string())
}

/// 新增保养记录
pub async fn add_maintenance(
    state: &AppState,
    vehicle_id: i64,
    form: MaintenanceForm,
) -> Result<Maintenance, String> {
    validate_id("vehículo", vehicle_id)?;
    state
        .maintenance_domain
        .create(vehicle_id, &form, today())
        .await
        .map_err(|e| e.to_string())
}

/// 编辑保养记录
pub async fn update_maintenance(
    state: &AppState,
    id: i64,
    form: MaintenanceForm,
) -> Result<Maintenance, String> {
    validate_id("mantenimiento", id)?;
    state
        .maintenance_domain
        .edit(id, &form, today())
        .await
        .map_err(|e| e.to_string())
}

/// 删除保养记录
pub async fn delete_maintenance(state: &AppState, id: i64) -> Result<(), String> {
    validate_id("mantenimiento", id)?;
    state
        .maintenance_domain
        .delete(id)
        .await
        .map_err(|e| e.to_string())
}

/// 可选的保养类型
pub fn get_maintenance_kinds() -> Vec<&'static str> {
    MAINTENANCE_KINDS.to_vec()
}

/// 计算单条保养的状态和进度
pub fn evaluate_status(current_mileage: i64, recorded_mileage: i64, description: &str) -> StatusReport {
    let progress = progress(current_mileage, recorded_mileage, description);
    StatusReport {
        status: classify(current_mileage, recorded_mileage, description),
        progress,
        percent: (progress * 100.0) as u8,
        interval: extract_interval(description).map(|i| (i.min_km, i.max_km)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::test_state;

    #[test]
    fn test_evaluate_status() {
        let report = evaluate_status(57000, 50000, "Cada 5000 - 10000 km");
        assert_eq!(report.status, MaintenanceStatus::Upcoming);
        assert_eq!(report.percent, 70);
        assert_eq!(report.interval, Some((5000, 10000)));

        let report = evaluate_status(100000, 10000, "Revisión general");
        assert_eq!(report.status, MaintenanceStatus::Done);
        assert_eq!(report.progress, 0.0);
        assert_eq!(report.interval, None);
    }

    #[test]
    fn test_kinds() {
        let kinds = get_maintenance_kinds();
        assert_eq!(kinds.len(), MAINTENANCE_KINDS.len());
        assert!(kinds.contains(&"Cambio de aceite"));
    }

    #[tokio::test]
    async fn test_cli_edit_without_date_keeps_stored_date() {
        use crate::cli::{Cli, Commands, MaintenanceCommand};
        use crate::commands::login;
        use clap::Parser;

        let (_dir, backend, state) = test_state().await;
        let user_id = backend.seed_user("a@b.cl", "123").await;
        login(&state, "a@b.cl".to_string(), "123".to_string())
            .await
            .unwrap();
        let vehicle_id = backend.seed_vehicle(user_id, "Toyota", 57000).await;
        let id = backend
            .seed_maintenance(vehicle_id, "Cambio de aceite", 50000, "Cada 5000 - 10000 km")
            .await;

        let id_arg = id.to_string();
        let cli = Cli::try_parse_from([
            "mantenciones",
            "maintenance",
            "edit",
            id_arg.as_str(),
            "--kind",
            "Cambio de aceite",
            "--description",
            "Cada 5000 - 10000 km",
            "--mileage",
            "51000",
        ])
        .unwrap();
        let Commands::Maintenance(MaintenanceCommand::Edit { fields, .. }) = cli.command else {
            panic!("expected maintenance edit");
        };

        update_maintenance(&state, id, fields.into_edit_form())
            .await
            .unwrap();

        let stored = backend.maintenance(id).await.unwrap();
        assert_eq!(stored.date.as_deref(), Some("2024-01-10"));
        assert_eq!(stored.mileage, 51000);
    }

    #[tokio::test]
    async fn test_delete_unknown_maintenance() {
        let (_dir, _backend, state) = test_state().await;
        let err = delete_maintenance(&state, 77).await.unwrap_err();
        assert_eq!(err, "Error al eliminar: 404");
    }
}
