//! 文件系统路径工具
//!
//! 提供跨平台的数据目录、日志目录和数据库路径

use std::path::{Path, PathBuf};

/// 应用目录名
pub const APP_DIR_NAME: &str = "mantenciones";

/// 覆盖数据目录的环境变量
pub const DATA_DIR_ENV: &str = "MANTENCIONES_HOME";

/// 获取默认数据目录
///
/// 优先使用 `MANTENCIONES_HOME`，否则根据操作系统选择：
/// - macOS: ~/Library/Application Support/mantenciones
/// - Windows: %APPDATA%\mantenciones
/// - Linux: ~/.local/share/mantenciones
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if cfg!(target_os = "macos") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_DIR_NAME)
    } else if cfg!(target_os = "windows") {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join(APP_DIR_NAME)
    } else {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".local/share").join(APP_DIR_NAME)
    }
}

/// 日志目录
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// 偏好设置文件
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

/// 本地用户缓存数据库
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join("mantenciones.db")
}
