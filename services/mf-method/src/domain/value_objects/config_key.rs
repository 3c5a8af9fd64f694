//! 配置规则键
//!
//! 三种形态：
//! - `field:nodeId` — 针对单个工序/物料字段的覆盖
//! - `billOfMaterial:<makeMethodId>:<materialId|undefined>` — 整个物料清单的排序/筛选覆盖
//! - `billOfProcess:<makeMethodId>:<materialId|undefined>` — 整个工序清单的排序/筛选覆盖
//!
//! 第三段为 `undefined` 表示根方法（没有父物料）。

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::value_objects::{MakeMethodId, MaterialId};

const BILL_OF_MATERIAL: &str = "billOfMaterial";
const BILL_OF_PROCESS: &str = "billOfProcess";
const ROOT_SEGMENT: &str = "undefined";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// 单字段覆盖，`node_id` 为源工序或源物料的行 ID
    Field { field: String, node_id: Uuid },
    /// 物料清单整单覆盖
    BillOfMaterial {
        make_method_id: MakeMethodId,
        parent_material_id: Option<MaterialId>,
    },
    /// 工序清单整单覆盖
    BillOfProcess {
        make_method_id: MakeMethodId,
        parent_material_id: Option<MaterialId>,
    },
}

impl ConfigKey {
    pub fn field(field: impl Into<String>, node_id: Uuid) -> Self {
        Self::Field {
            field: field.into(),
            node_id,
        }
    }

    pub fn bill_of_material(
        make_method_id: MakeMethodId,
        parent_material_id: Option<MaterialId>,
    ) -> Self {
        Self::BillOfMaterial {
            make_method_id,
            parent_material_id,
        }
    }

    pub fn bill_of_process(
        make_method_id: MakeMethodId,
        parent_material_id: Option<MaterialId>,
    ) -> Self {
        Self::BillOfProcess {
            make_method_id,
            parent_material_id,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { field, node_id } => write!(f, "{}:{}", field, node_id),
            Self::BillOfMaterial {
                make_method_id,
                parent_material_id,
            } => write!(
                f,
                "{}:{}:{}",
                BILL_OF_MATERIAL,
                make_method_id,
                parent_material_id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| ROOT_SEGMENT.to_string())
            ),
            Self::BillOfProcess {
                make_method_id,
                parent_material_id,
            } => write!(
                f,
                "{}:{}:{}",
                BILL_OF_PROCESS,
                make_method_id,
                parent_material_id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| ROOT_SEGMENT.to_string())
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigKeyParseError(pub String);

impl fmt::Display for ConfigKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid config key: {}", self.0)
    }
}

impl std::error::Error for ConfigKeyParseError {}

impl FromStr for ConfigKey {
    type Err = ConfigKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [kind, method, material]
                if *kind == BILL_OF_MATERIAL || *kind == BILL_OF_PROCESS =>
            {
                let make_method_id = MakeMethodId::from_str(method)
                    .map_err(|_| ConfigKeyParseError(s.to_string()))?;
                let parent_material_id = if *material == ROOT_SEGMENT {
                    None
                } else {
                    Some(
                        MaterialId::from_str(material)
                            .map_err(|_| ConfigKeyParseError(s.to_string()))?,
                    )
                };
                if *kind == BILL_OF_MATERIAL {
                    Ok(Self::BillOfMaterial {
                        make_method_id,
                        parent_material_id,
                    })
                } else {
                    Ok(Self::BillOfProcess {
                        make_method_id,
                        parent_material_id,
                    })
                }
            }
            [field, node] if !field.is_empty() => {
                let node_id =
                    Uuid::parse_str(node).map_err(|_| ConfigKeyParseError(s.to_string()))?;
                Ok(Self::field(*field, node_id))
            }
            _ => Err(ConfigKeyParseError(s.to_string())),
        }
    }
}
