// 数据模型模块 - 定义所有的数据结构
//
// 字段名与后端 JSON 保持一致（西班牙语），Rust 侧使用英文命名

use serde::{Deserialize, Serialize};

// 重新导出其他模块的类型
pub use crate::maintenance::{MaintenanceCard, MaintenanceGroup};
pub use crate::storage::CachedUser;

/// 保养状态
///
/// 序列化名称必须与后端返回的完全一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MaintenanceStatus {
    /// 已完成（绿色）
    #[serde(rename = "REALIZADO")]
    Done,
    /// 即将到期（黄色）
    #[serde(rename = "PROXIMO")]
    #[default]
    Upcoming,
    /// 已逾期（红色）
    #[serde(rename = "ATRASADO")]
    Overdue,
}

impl MaintenanceStatus {
    /// 后端使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "REALIZADO",
            Self::Upcoming => "PROXIMO",
            Self::Overdue => "ATRASADO",
        }
    }

    /// 终端显示用的标记
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Done => "✔ REALIZADO",
            Self::Upcoming => "! PROXIMO",
            Self::Overdue => "✘ ATRASADO",
        }
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 车辆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// 数据库 ID，新建时为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// 品牌
    #[serde(rename = "marca")]
    pub brand: String,
    /// 型号
    #[serde(rename = "modelo")]
    pub model: String,
    /// 年份
    #[serde(rename = "anio")]
    pub year: i32,
    /// 当前里程
    #[serde(rename = "kilometraje")]
    pub mileage: i32,
    /// 车主用户 ID
    #[serde(rename = "propietarioId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    /// 二维码内容（文本或 URL）
    #[serde(rename = "qrCode", default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl Vehicle {
    /// 列表中显示的标题，例如 "Toyota Corolla (2020)"
    pub fn title(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}

/// 保养记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// 保养类型，例如 "Cambio de aceite"
    #[serde(rename = "tipo", default)]
    pub kind: String,
    /// 描述，可能包含保养间隔 "Cada 5000 - 10000 km"
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// 保养日期 (格式: YYYY-MM-DD)
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// 保养时的里程
    #[serde(rename = "kilometraje", default)]
    pub mileage: i32,
    #[serde(rename = "estado", default)]
    pub status: MaintenanceStatus,
    #[serde(rename = "vehiculoId", default)]
    pub vehicle_id: i64,
}

/// 用户（登录/注册请求与响应）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub email: String,
    /// 只发送给后端，不在本地保存
    #[serde(default)]
    pub password: String,
}

/// 可选的保养类型
pub const MAINTENANCE_KINDS: [&str; 8] = [
    "Cambio de aceite",
    "Revisión de frenos",
    "Cambio de batería",
    "Revisión de neumáticos",
    "Cambio de bujías",
    "Revisión de suspensión",
    "Cambio de filtro de aire",
    "Limpieza de inyectores",
];

/// 车辆表单（新增/编辑）
///
/// 年份和里程保留为字符串，提交前再解析
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleForm {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub mileage: String,
}

/// 保养表单（新增/编辑）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceForm {
    pub kind: String,
    pub description: String,
    /// 格式: YYYY-MM-DD
    pub date: String,
    pub mileage: String,
}

/// 本地偏好设置（更新用，None 表示不修改）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub user_id: Option<i64>,
    pub backend_host: Option<String>,
    pub backend_port: Option<u16>,
    pub last_email: Option<String>,
}

/// 持久化的本地偏好设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPreferences {
    /// 当前登录用户 ID
    #[serde(default)]
    pub user_id: Option<i64>,
    /// 后端主机（IP 或域名）
    #[serde(default)]
    pub backend_host: Option<String>,
    /// 后端端口
    #[serde(default = "default_backend_port")]
    pub backend_port: u16,
    /// 最近一次登录使用的邮箱
    #[serde(default)]
    pub last_email: Option<String>,
}

/// 未配置后端时使用的主机（配合 adb reverse 使用）
pub const DEFAULT_BACKEND_HOST: &str = "127.0.0.1";

fn default_backend_port() -> u16 {
    8080
}

impl Default for PersistedPreferences {
    fn default() -> Self {
        Self {
            user_id: None,
            backend_host: None,
            backend_port: default_backend_port(),
            last_email: None,
        }
    }
}

impl PersistedPreferences {
    /// 后端基础 URL，例如 `http://127.0.0.1:8080/`
    pub fn base_url(&self) -> String {
        let host = self
            .backend_host
            .as_deref()
            .unwrap_or(DEFAULT_BACKEND_HOST);
        format!("http://{}:{}/", host, self.backend_port)
    }
}
