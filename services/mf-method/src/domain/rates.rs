//! 费率解析
//!
//! 两个纯函数式解析器，闭包在一份已加载的参考表上：
//! 精确命中优先，其次对承接同一工艺过程的启用资源取均值，
//! 参考表为空时一律返回零，从不失败。

use crate::domain::value_objects::{ProcessId, SupplierProcessId, WorkCenterId};
use crate::domain::views::{SupplierProcess, WorkCenter};

/// 厂内费率
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LaborRates {
    pub labor_rate: f64,
    pub machine_rate: f64,
    pub overhead_rate: f64,
}

/// 外协费率
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutsideRates {
    pub minimum_cost: f64,
    pub lead_time: f64,
}

/// 费率簿
///
/// 一次克隆开始时加载公司全量工作中心与外协工艺，之后的
/// 解析全部在内存中完成。
#[derive(Debug, Default)]
pub struct RateBook {
    work_centers: Vec<WorkCenter>,
    supplier_processes: Vec<SupplierProcess>,
}

impl RateBook {
    pub fn new(work_centers: Vec<WorkCenter>, supplier_processes: Vec<SupplierProcess>) -> Self {
        Self {
            work_centers,
            supplier_processes,
        }
    }

    /// 解析厂内工序的人工/机器/制造费用率
    ///
    /// 指定工作中心且其启用时直接取其费率；否则对承接该工艺
    /// 过程的全部启用工作中心取均值；再无命中返回零。
    pub fn labor_and_overhead_rates(
        &self,
        process_id: &ProcessId,
        work_center_id: Option<&WorkCenterId>,
    ) -> LaborRates {
        if let Some(work_center_id) = work_center_id {
            let exact = self
                .work_centers
                .iter()
                .find(|wc| wc.id() == work_center_id && wc.active());
            if let Some(wc) = exact {
                return LaborRates {
                    labor_rate: wc.labor_rate(),
                    machine_rate: wc.machine_rate(),
                    overhead_rate: wc.overhead_rate(),
                };
            }
        }

        let candidates: Vec<&WorkCenter> = self
            .work_centers
            .iter()
            .filter(|wc| wc.active() && wc.serves_process(process_id))
            .collect();
        if candidates.is_empty() {
            return LaborRates::default();
        }

        let count = candidates.len() as f64;
        LaborRates {
            labor_rate: candidates.iter().map(|wc| wc.labor_rate()).sum::<f64>() / count,
            machine_rate: candidates.iter().map(|wc| wc.machine_rate()).sum::<f64>() / count,
            overhead_rate: candidates.iter().map(|wc| wc.overhead_rate()).sum::<f64>() / count,
        }
    }

    /// 解析外协工序的最低费用与交付周期
    pub fn outside_process_rates(
        &self,
        process_id: &ProcessId,
        supplier_process_id: Option<&SupplierProcessId>,
    ) -> OutsideRates {
        if let Some(supplier_process_id) = supplier_process_id {
            let exact = self
                .supplier_processes
                .iter()
                .find(|sp| sp.id() == supplier_process_id);
            if let Some(sp) = exact {
                return OutsideRates {
                    minimum_cost: sp.minimum_cost(),
                    lead_time: sp.lead_time(),
                };
            }
        }

        let candidates: Vec<&SupplierProcess> = self
            .supplier_processes
            .iter()
            .filter(|sp| sp.process_id() == process_id)
            .collect();
        if candidates.is_empty() {
            return OutsideRates::default();
        }

        let count = candidates.len() as f64;
        OutsideRates {
            minimum_cost: candidates.iter().map(|sp| sp.minimum_cost()).sum::<f64>() / count,
            lead_time: candidates.iter().map(|sp| sp.lead_time()).sum::<f64>() / count,
        }
    }
}
