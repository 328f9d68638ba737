use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use domain_repair::repository::StaleWrite;
use sea_orm::{ConnectionTrait, DbErr, SqlErr, Statement, TransactionTrait};
use tokio::sync::Mutex;
use typed_builder::TypedBuilder;

use super::Database;

pub struct StagedStatement {
    pub stmt: Statement,
    /// Must touch at least one row, otherwise somebody else got there first.
    pub guarded: bool,
}

/// Unit of work, one per handled request. Writes are staged and run in one transaction.
#[derive(TypedBuilder)]
pub struct OrmRepo {
    pub db: Arc<Database>,
    #[builder(default)]
    pub statements: Arc<Mutex<Vec<StagedStatement>>>,
    #[builder(default = AtomicBool::new(true))]
    pub can_drop: AtomicBool,
}

impl OrmRepo {
    pub fn backend(&self) -> sea_orm::DbBackend {
        self.db.get_connection().get_database_backend()
    }

    pub async fn stage(&self, stmt: Statement) {
        self.push(StagedStatement {
            stmt,
            guarded: false,
        })
        .await
    }

    pub async fn stage_guarded(&self, stmt: Statement) {
        self.push(StagedStatement { stmt, guarded: true }).await
    }

    async fn push(&self, staged: StagedStatement) {
        let mut stmts = self.statements.lock().await;
        stmts.push(staged);
        self.can_drop.store(false, Ordering::Relaxed);
    }

    pub async fn save_changed(&self) -> anyhow::Result<bool> {
        if self.can_drop.load(Ordering::Relaxed) {
            return Ok(false);
        }
        let mut stmts = self.statements.lock().await;
        let staged = std::mem::take(&mut *stmts);
        self.can_drop.store(true, Ordering::Relaxed);
        drop(stmts);

        let trans = self.db.get_connection().begin().await?;
        for StagedStatement { stmt, guarded } in staged {
            let failure = match trans.execute(stmt.clone()).await {
                Ok(result) if guarded && result.rows_affected() == 0 => Some(
                    StaleWrite(format!("no row matched guarded statement: {stmt}")).into(),
                ),
                Ok(_) => None,
                Err(e) => Some(classify(e)),
            };
            if let Some(e) = failure {
                trans.rollback().await?;
                return Err(e);
            }
        }
        trans.commit().await?;
        Ok(true)
    }
}

fn classify(e: DbErr) -> anyhow::Error {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StaleWrite(detail).into(),
        _ => e.into(),
    }
}

impl Drop for OrmRepo {
    fn drop(&mut self) {
        if !self.can_drop.load(Ordering::Relaxed) {
            if let Ok(stmts) = self.statements.try_lock() {
                let sqls =
                    stmts.iter().map(|x| x.stmt.to_string()).collect::<Vec<String>>().join("\n");
                tracing::trace!("Unused sql statements:\n{sqls}")
            }
        }
    }
}
