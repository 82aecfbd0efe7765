//! 命令模块
//!
//! CLI 调用的所有命令接口，按功能分组：
//! - session: 登录、注册、退出
//! - config: 后端地址配置
//! - vehicle: 车辆管理与二维码
//! - maintenance: 保养记录、总览与状态计算
//!
//! 所有命令统一返回 `Result<T, String>`，错误信息可直接展示给用户

pub mod config;
pub mod maintenance;
pub mod session;
pub mod vehicle;

// 重新导出所有命令
pub use config::*;
pub use maintenance::*;
pub use session::*;
pub use vehicle::*;
