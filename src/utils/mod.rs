//! 工具函数模块
//!
//! 提供各类通用工具函数，包括：
//! - 输入验证
//! - 日期格式转换
//! - 车辆二维码内容解析
//! - 数据目录路径

pub mod date_format;
pub mod file_system;
pub mod qr;
pub mod validation;

// 重新导出常用函数
pub use date_format::*;
pub use file_system::*;
pub use qr::*;
pub use validation::*;
