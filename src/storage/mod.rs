// 存储模块 - 本地用户缓存

// 子模块
pub mod database;
pub mod models;

// 重新导出主要类型
pub use database::Database;
pub use models::*;
