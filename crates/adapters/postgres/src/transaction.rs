//! PostgreSQL 事务管理模块
//!
//! 提供事务管理器和事务级咨询锁

use errors::{AppError, AppResult};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// 事务管理器
#[derive(Clone)]
pub struct TransactionManager {
    pool: PgPool,
}

impl TransactionManager {
    /// 创建新的事务管理器
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取连接池引用
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 开始事务
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))
    }

    /// 提交事务
    pub async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {}", e)))
    }

    /// 回滚事务
    pub async fn rollback(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.rollback()
            .await
            .map_err(|e| AppError::database(format!("Failed to rollback transaction: {}", e)))
    }
}

/// 由 UUID 派生咨询锁键
///
/// PostgreSQL 咨询锁键是 bigint，将 UUID 的高低 64 位异或折叠。
/// 同一 UUID 永远得到同一键，不同 UUID 冲突概率可忽略。
pub fn advisory_lock_key(id: Uuid) -> i64 {
    let bytes = id.as_u128();
    let high = (bytes >> 64) as u64;
    let low = bytes as u64;
    (high ^ low) as i64
}

/// 在当前事务内获取事务级咨询锁
///
/// 锁在事务提交或回滚时自动释放。持有同一键的并发事务会在此处
/// 阻塞，直到前一个事务结束。
pub async fn advisory_xact_lock(
    tx: &mut Transaction<'static, Postgres>,
    key: i64,
) -> AppResult<()> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(key)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to acquire advisory lock: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_key_is_stable() {
        let id = Uuid::parse_str("0191f6a0-5e3c-7c7a-b1f0-6a4e1b2c3d4e").unwrap();
        assert_eq!(advisory_lock_key(id), advisory_lock_key(id));
    }

    #[test]
    fn test_lock_key_differs_for_distinct_ids() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        assert_ne!(advisory_lock_key(a), advisory_lock_key(b));
    }

    #[test]
    fn test_lock_key_nil_uuid() {
        assert_eq!(advisory_lock_key(Uuid::nil()), 0);
    }
}
