// 车辆保养客户端 - 主库

// 声明模块
pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod domains;
pub mod logger;
pub mod maintenance;
pub mod models;
pub mod settings;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use api::MaintenanceBackend;
use domains::{GarageDomain, MaintenanceDomain, SessionDomain};
use settings::SettingsManager;
use storage::Database;

pub use app::run;

/// 应用状态（按领域分组）
///
/// - 会话领域：登录状态与本地用户缓存
/// - 车辆领域：车辆管理与二维码
/// - 保养领域：保养记录与状态计算
#[derive(Clone)]
pub struct AppState {
    /// 会话领域管理器
    pub session_domain: Arc<SessionDomain>,
    /// 车辆领域管理器
    pub garage_domain: Arc<GarageDomain>,
    /// 保养领域管理器
    pub maintenance_domain: Arc<MaintenanceDomain>,
}

impl AppState {
    /// 组装各领域管理器
    pub fn new(
        backend: Arc<dyn MaintenanceBackend>,
        settings: Arc<SettingsManager>,
        db: Arc<Database>,
    ) -> Self {
        let session_domain = Arc::new(SessionDomain::new(backend.clone(), settings, db));
        let garage_domain = Arc::new(GarageDomain::new(backend.clone(), session_domain.clone()));
        let maintenance_domain = Arc::new(MaintenanceDomain::new(backend, garage_domain.clone()));

        Self {
            session_domain,
            garage_domain,
            maintenance_domain,
        }
    }
}
