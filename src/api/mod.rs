// 后端 API 模块
//
// 定义与后端交互的接口，生产环境使用 HTTP 实现（client），
// 测试中使用内存实现（memory）

pub mod client;
#[cfg(test)]
pub mod memory;

pub use client::HttpBackend;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Maintenance, User, Vehicle};

/// 后端调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 后端返回非 2xx 状态码
    #[error("el servidor respondió {status}: {body}")]
    Status { status: u16, body: String },

    /// 网络或解析错误
    #[error("falló la conexión con el servidor: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP 状态码（网络错误时为 None）
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// 后端接口 - 所有实现必须实现此 trait
#[async_trait]
pub trait MaintenanceBackend: Send + Sync {
    // ========== 车辆 ==========

    /// 获取用户的所有车辆
    async fn list_vehicles(&self, user_id: i64) -> ApiResult<Vec<Vehicle>>;

    /// 按 ID 获取车辆
    async fn get_vehicle(&self, vehicle_id: i64) -> ApiResult<Vehicle>;

    /// 为用户创建车辆
    async fn create_vehicle(&self, user_id: i64, vehicle: &Vehicle) -> ApiResult<Vehicle>;

    /// 更新车辆
    async fn update_vehicle(&self, vehicle_id: i64, vehicle: &Vehicle) -> ApiResult<Vehicle>;

    /// 删除车辆
    async fn delete_vehicle(&self, vehicle_id: i64) -> ApiResult<()>;

    // ========== 保养记录 ==========

    /// 获取车辆的所有保养记录
    async fn list_maintenances(&self, vehicle_id: i64) -> ApiResult<Vec<Maintenance>>;

    /// 为车辆创建保养记录
    async fn create_maintenance(
        &self,
        vehicle_id: i64,
        maintenance: &Maintenance,
    ) -> ApiResult<Maintenance>;

    /// 按 ID 获取保养记录
    async fn get_maintenance(&self, id: i64) -> ApiResult<Maintenance>;

    /// 更新保养记录（后端不返回内容）
    async fn update_maintenance(&self, id: i64, maintenance: &Maintenance) -> ApiResult<()>;

    /// 删除保养记录
    async fn delete_maintenance(&self, id: i64) -> ApiResult<()>;

    // ========== 用户 ==========

    /// 登录，成功时返回带 ID 的用户
    async fn login(&self, user: &User) -> ApiResult<User>;

    /// 注册
    async fn register(&self, user: &User) -> ApiResult<User>;
}
