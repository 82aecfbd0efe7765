// 保养卡片与分组 - 把后端返回的保养记录整理成可显示的结构

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::status::{classify, progress};
use crate::models::{Maintenance, MaintenanceStatus, Vehicle};
use crate::utils::format_display_date;

/// 没有日期时显示的文本
pub const NO_DATE_LABEL: &str = "Sin fecha";

/// 保养卡片（单条记录相对当前里程的评估结果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCard {
    pub id: Option<i64>,
    pub kind: String,
    /// 显示格式的日期 (DD-MM-YYYY)，没有日期时为 "Sin fecha"
    pub date: String,
    pub mileage: i32,
    pub status: MaintenanceStatus,
    /// 进度 (0.0 - 1.0)
    pub progress: f32,
    /// 进度百分比（向下取整）
    pub percent: u8,
    pub description: String,
}

impl MaintenanceCard {
    /// 用车辆当前里程评估一条保养记录
    pub fn evaluate(maintenance: &Maintenance, current_mileage: i32) -> Self {
        let current = i64::from(current_mileage);
        let recorded = i64::from(maintenance.mileage);

        let status = classify(current, recorded, &maintenance.description);
        let progress = progress(current, recorded, &maintenance.description);

        Self {
            id: maintenance.id,
            kind: maintenance.kind.clone(),
            date: maintenance
                .date
                .as_deref()
                .map(format_display_date)
                .unwrap_or_else(|| NO_DATE_LABEL.to_string()),
            mileage: maintenance.mileage,
            status,
            progress,
            percent: (progress * 100.0) as u8,
            description: maintenance.description.clone(),
        }
    }
}

/// 同类型保养记录的分组
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceGroup {
    /// 分组键（去空白、小写后的类型）
    pub key: String,
    /// 显示标题，多条记录时带数量，例如 "Cambio de aceite (3)"
    pub title: String,
    /// 按里程从高到低排序，第一条为最近一次
    pub cards: Vec<MaintenanceCard>,
}

impl MaintenanceGroup {
    /// 最近一次保养的状态
    pub fn latest_status(&self) -> Option<MaintenanceStatus> {
        self.cards.first().map(|c| c.status)
    }
}

/// 车辆保养总览
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSummary {
    pub vehicle: Vehicle,
    pub groups: Vec<MaintenanceGroup>,
    pub done: usize,
    pub upcoming: usize,
    pub overdue: usize,
}

/// 首字母大写
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 按类型分组并评估每条记录
pub fn group_by_kind(records: &[Maintenance], current_mileage: i32) -> Vec<MaintenanceGroup> {
    let mut buckets: BTreeMap<String, Vec<&Maintenance>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(record.kind.trim().to_lowercase())
            .or_default()
            .push(record);
    }

    buckets
        .into_iter()
        .map(|(key, mut items)| {
            items.sort_by(|a, b| b.mileage.cmp(&a.mileage));

            let mut title = capitalize(&key);
            if items.len() > 1 {
                title = format!("{} ({})", title, items.len());
            }

            MaintenanceGroup {
                key,
                title,
                cards: items
                    .into_iter()
                    .map(|m| MaintenanceCard::evaluate(m, current_mileage))
                    .collect(),
            }
        })
        .collect()
}

/// 生成车辆的保养总览
///
/// 计数只统计每个分组中最近一次保养的状态
pub fn summarize(vehicle: Vehicle, records: &[Maintenance]) -> MaintenanceSummary {
    let groups = group_by_kind(records, vehicle.mileage);

    let (mut done, mut upcoming, mut overdue) = (0, 0, 0);
    for status in groups.iter().filter_map(|g| g.latest_status()) {
        match status {
            MaintenanceStatus::Done => done += 1,
            MaintenanceStatus::Upcoming => upcoming += 1,
            MaintenanceStatus::Overdue => overdue += 1,
        }
    }

    MaintenanceSummary {
        vehicle,
        groups,
        done,
        upcoming,
        overdue,
    }
}

/// 同类型中最近一次的保养记录（里程最大）
///
/// 类型需要完全相同（区分大小写）
pub fn latest_of_kind<'a>(records: &'a [Maintenance], kind: &str) -> Option<&'a Maintenance> {
    records
        .iter()
        .filter(|m| m.kind == kind)
        .max_by_key(|m| m.mileage)
}
