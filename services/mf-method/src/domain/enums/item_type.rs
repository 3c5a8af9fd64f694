//! 物品类型与追溯方式枚举

use serde::{Deserialize, Serialize};

/// 物品类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ItemType {
    /// 未指定
    #[default]
    Unspecified,
    /// 零件
    Part,
    /// 原材料
    Material,
    /// 工装工具
    Tool,
    /// 耗材
    Consumable,
    /// 夹具
    Fixture,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Unspecified => "Unspecified",
            ItemType::Part => "Part",
            ItemType::Material => "Material",
            ItemType::Tool => "Tool",
            ItemType::Consumable => "Consumable",
            ItemType::Fixture => "Fixture",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Part" => ItemType::Part,
            "Material" => ItemType::Material,
            "Tool" => ItemType::Tool,
            "Consumable" => ItemType::Consumable,
            "Fixture" => ItemType::Fixture,
            _ => ItemType::Unspecified,
        }
    }
}

/// 追溯方式
///
/// 序列号追溯的实体数量恒为 1，批次追溯跟随级联数量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TrackingKind {
    /// 不追溯
    #[default]
    None,
    /// 序列号追溯
    Serial,
    /// 批次追溯
    Batch,
}

impl TrackingKind {
    pub fn is_serial(&self) -> bool {
        matches!(self, TrackingKind::Serial)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingKind::None => "None",
            TrackingKind::Serial => "Serial",
            TrackingKind::Batch => "Batch",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Serial" => TrackingKind::Serial,
            "Batch" => TrackingKind::Batch,
            _ => TrackingKind::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_parse() {
        assert_eq!(TrackingKind::parse("Serial"), TrackingKind::Serial);
        assert_eq!(TrackingKind::parse("Batch"), TrackingKind::Batch);
        assert_eq!(TrackingKind::parse(""), TrackingKind::None);
        assert!(TrackingKind::Serial.is_serial());
    }
}
