// 保养模块 - 状态计算与显示数据整理
//
// status: 根据描述中的保养间隔计算状态和进度（纯函数）
// report: 保养卡片、分组与车辆总览

pub mod report;
pub mod status;

pub use report::{
    group_by_kind, latest_of_kind, summarize, MaintenanceCard, MaintenanceGroup,
    MaintenanceSummary, NO_DATE_LABEL,
};
pub use status::{classify, extract_interval, progress, DueInterval};
