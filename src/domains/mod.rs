// 领域模块 - 用于组织应用的业务逻辑
//
// 按业务领域分组，实现单一职责原则
// 包含3个领域:会话、车辆、保养

pub mod garage;
pub mod maintenance;
pub mod session;

pub use garage::GarageDomain;
pub use maintenance::MaintenanceDomain;
pub use session::SessionDomain;
