//! 物料供应方式枚举

use serde::{Deserialize, Serialize};

/// 物料供应方式
///
/// `Make` 型物料自带子制造方法，树在该节点继续向下延伸；
/// `Pick` / `Buy` 为叶子节点。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MethodType {
    /// 未指定
    #[default]
    Unspecified,
    /// 自制
    Make,
    /// 领料
    Pick,
    /// 采购
    Buy,
}

impl MethodType {
    /// 是否继续递归展开子方法
    pub fn is_make(&self) -> bool {
        matches!(self, MethodType::Make)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodType::Unspecified => "Unspecified",
            MethodType::Make => "Make",
            MethodType::Pick => "Pick",
            MethodType::Buy => "Buy",
        }
    }

    /// 从存储字符串解析，未知值回落到 Unspecified
    pub fn parse(value: &str) -> Self {
        match value {
            "Make" => MethodType::Make,
            "Pick" => MethodType::Pick,
            "Buy" => MethodType::Buy,
            _ => MethodType::Unspecified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for t in [MethodType::Make, MethodType::Pick, MethodType::Buy] {
            assert_eq!(MethodType::parse(t.as_str()), t);
        }
        assert_eq!(MethodType::parse("Phantom"), MethodType::Unspecified);
    }

    #[test]
    fn test_only_make_recurses() {
        assert!(MethodType::Make.is_make());
        assert!(!MethodType::Buy.is_make());
        assert!(!MethodType::Pick.is_make());
    }
}
