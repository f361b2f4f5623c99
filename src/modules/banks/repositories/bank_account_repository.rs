use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::banks::models::BankAccount;

/// Directory of bank accounts available for paying installments
#[async_trait]
pub trait BankDirectory: Send + Sync {
    /// Active accounts, ordered by label
    async fn list_active(&self) -> Result<Vec<BankAccount>>;
}

pub struct MySqlBankAccountRepository {
    pool: MySqlPool,
}

impl MySqlBankAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BankDirectory for MySqlBankAccountRepository {
    async fn list_active(&self) -> Result<Vec<BankAccount>> {
        let accounts = sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT id, label, account_number, agency, active
            FROM bank_accounts
            WHERE active = TRUE
            ORDER BY label ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }
}
