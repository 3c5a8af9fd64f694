//! 配置解析
//!
//! 把物品上登记的配置规则应用到克隆出的字段。变换是一张
//! 封闭的策略表（带标签 JSON），不执行任何脚本；任何一步
//! 失败都降级为"沿用默认值"并记 warn，绝不中断克隆。

use std::cell::Cell;
use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::domain::value_objects::{ConfigKey, ItemId};
use crate::domain::views::ConfigurationRule;

/// case 变换的一个分支
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseArm {
    /// 匹配字面量
    pub when: Value,
    /// 命中后的结果
    pub then: Value,
}

/// 变换规则
///
/// `configuration_rules.transform` 列里的带标签 JSON，
/// 如 `{"type": "scale", "key": "length", "factor": 0.001}`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RuleTransform {
    /// 常量
    Value { value: Value },
    /// 读取运行时配置载荷的某个键
    Input {
        key: String,
        #[serde(default)]
        default: Option<Value>,
    },
    /// 载荷数值乘以常量系数
    Scale { key: String, factor: f64 },
    /// 按载荷值匹配字面量分支
    Case {
        key: String,
        arms: Vec<CaseArm>,
        #[serde(default)]
        default: Option<Value>,
    },
}

impl RuleTransform {
    /// 对运行时载荷求值，失败返回空（调用方降级为默认值）
    pub fn evaluate(&self, payload: &serde_json::Map<String, Value>) -> Option<Value> {
        match self {
            RuleTransform::Value { value } => Some(value.clone()),
            RuleTransform::Input { key, default } => payload
                .get(key)
                .filter(|value| !value.is_null())
                .cloned()
                .or_else(|| default.clone()),
            RuleTransform::Scale { key, factor } => payload
                .get(key)
                .and_then(Value::as_f64)
                .map(|number| Value::from(number * factor)),
            RuleTransform::Case { key, arms, default } => payload
                .get(key)
                .and_then(|probe| {
                    arms.iter()
                        .find(|arm| &arm.when == probe)
                        .map(|arm| arm.then.clone())
                })
                .or_else(|| default.clone()),
        }
    }
}

/// 解析统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideStats {
    /// 成功套用的字段覆盖数
    pub applied: u64,
    /// 求值失败后降级为默认值的次数
    pub degraded: u64,
}

/// 配置解析器
///
/// 对一次克隆有效：持有该物品的规则表与请求里的运行时载荷。
/// 规则表为空或载荷缺失时所有解析走快速路径，原值返回。
#[derive(Debug, Default)]
pub struct ConfigurationResolver {
    rules: HashMap<ConfigKey, RuleTransform>,
    payload: serde_json::Map<String, Value>,
    applied: Cell<u64>,
    degraded: Cell<u64>,
}

impl ConfigurationResolver {
    /// 不做任何覆盖的空解析器
    pub fn empty() -> Self {
        Self::default()
    }

    /// 从规则行与运行时载荷构建
    ///
    /// 字段键或变换 JSON 解析失败的行记 warn 后跳过，
    /// 停用的行直接忽略。
    pub fn new(rules: Vec<ConfigurationRule>, payload: Option<Value>) -> Self {
        let payload = match payload {
            Some(Value::Object(map)) => map,
            Some(other) => {
                warn!(payload_type = %json_type_name(&other), "configuration payload is not an object, ignoring");
                serde_json::Map::new()
            }
            None => serde_json::Map::new(),
        };

        let mut parsed = HashMap::new();
        for rule in rules {
            if !rule.active() {
                continue;
            }
            let key = match ConfigKey::from_str(rule.field_key()) {
                Ok(key) => key,
                Err(err) => {
                    warn!(rule_id = %rule.id(), field_key = %rule.field_key(), error = %err, "skipping configuration rule with malformed field key");
                    continue;
                }
            };
            let transform: RuleTransform = match serde_json::from_value(rule.transform().clone()) {
                Ok(transform) => transform,
                Err(err) => {
                    warn!(rule_id = %rule.id(), field_key = %rule.field_key(), error = %err, "skipping configuration rule with malformed transform");
                    continue;
                }
            };
            parsed.insert(key, transform);
        }

        Self {
            rules: parsed,
            payload,
            applied: Cell::new(0),
            degraded: Cell::new(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn stats(&self) -> OverrideStats {
        OverrideStats {
            applied: self.applied.get(),
            degraded: self.degraded.get(),
        }
    }

    /// 规则可能把物料改绑到的物品 ID（供批量预载，不计入统计）
    pub fn item_override_ids(&self) -> Vec<ItemId> {
        let mut ids = Vec::new();
        for (key, transform) in &self.rules {
            let ConfigKey::Field { field, .. } = key else {
                continue;
            };
            if field != "itemId" {
                continue;
            }
            if let Some(Value::String(raw)) = transform.evaluate(&self.payload) {
                if let Ok(uuid) = raw.parse::<Uuid>() {
                    ids.push(ItemId::from_uuid(uuid));
                }
            }
        }
        ids
    }

    /// 解析一个键，无规则或求值失败返回空
    fn resolve(&self, key: &ConfigKey) -> Option<Value> {
        let transform = self.rules.get(key)?;
        match transform.evaluate(&self.payload) {
            Some(value) if !value.is_null() => {
                self.applied.set(self.applied.get() + 1);
                Some(value)
            }
            _ => {
                self.degraded.set(self.degraded.get() + 1);
                warn!(key = %key, "configuration rule produced no value, keeping default");
                None
            }
        }
    }

    /// 解析数值字段
    pub fn resolve_f64(&self, node_id: Uuid, field: &str, default: f64) -> f64 {
        if self.rules.is_empty() {
            return default;
        }
        let key = ConfigKey::field(field, node_id);
        match self.resolve(&key) {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(default),
            Some(other) => {
                self.degraded.set(self.degraded.get() + 1);
                warn!(key = %key, value = %other, "configuration override is not numeric, keeping default");
                default
            }
            None => default,
        }
    }

    /// 解析文本字段
    pub fn resolve_string(&self, node_id: Uuid, field: &str, default: &str) -> String {
        if self.rules.is_empty() {
            return default.to_string();
        }
        let key = ConfigKey::field(field, node_id);
        match self.resolve(&key) {
            Some(Value::String(text)) => text,
            Some(other) => {
                self.degraded.set(self.degraded.get() + 1);
                warn!(key = %key, value = %other, "configuration override is not a string, keeping default");
                default.to_string()
            }
            None => default.to_string(),
        }
    }

    /// 解析整表覆盖，返回有序的描述/ID 列表
    ///
    /// 键是 `billOfMaterial:...` 或 `billOfProcess:...`；
    /// 返回空表示没有覆盖，保持生成的行原样。
    pub fn resolve_list(&self, key: &ConfigKey) -> Option<Vec<String>> {
        if self.rules.is_empty() {
            return None;
        }
        match self.resolve(key)? {
            Value::Array(entries) => {
                let mut out = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry {
                        Value::String(text) => out.push(text),
                        other => {
                            warn!(key = %key, entry = %other, "list override entry is not a string, skipping entry");
                        }
                    }
                }
                Some(out)
            }
            other => {
                self.degraded.set(self.degraded.get() + 1);
                warn!(key = %key, value = %other, "list override is not an array, keeping generated rows");
                None
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
