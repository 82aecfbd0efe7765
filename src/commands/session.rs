//! 会话命令

use crate::storage::CachedUser;
use crate::AppState;

/// 登录
pub async fn login(state: &AppState, email: String, password: String) -> Result<CachedUser, String> {
    state
        .session_domain
        .login(&email, &password)
        .await
        .map_err(|e| e.to_string())
}

/// 注册并登录
pub async fn register(
    state: &AppState,
    email: String,
    password: String,
) -> Result<CachedUser, String> {
    state
        .session_domain
        .register(&email, &password)
        .await
        .map_err(|e| e.to_string())
}

/// 退出登录
pub async fn logout(state: &AppState) -> Result<(), String> {
    state
        .session_domain
        .logout()
        .await
        .map_err(|e| e.to_string())
}

/// 当前登录用户
pub async fn get_current_user(state: &AppState) -> Result<Option<CachedUser>, String> {
    state
        .session_domain
        .current_user()
        .await
        .map_err(|e| e.to_string())
}
