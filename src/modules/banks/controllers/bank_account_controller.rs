use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::banks::models::BankAccount;
use crate::modules::banks::repositories::{BankDirectory, MySqlBankAccountRepository};

#[derive(Debug, Serialize)]
pub struct BankAccountResponse {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
}

impl From<BankAccount> for BankAccountResponse {
    fn from(account: BankAccount) -> Self {
        Self {
            id: account.id,
            label: account.label,
            account_number: account.account_number,
            agency: account.agency,
        }
    }
}

/// GET /bank-accounts
///
/// Active bank accounts, ordered by label, for the payment editor's
/// bank picker.
pub async fn list_bank_accounts(pool: web::Data<MySqlPool>) -> Result<HttpResponse> {
    let repository = MySqlBankAccountRepository::new(pool.get_ref().clone());
    let accounts = repository.list_active().await?;

    let response: Vec<BankAccountResponse> =
        accounts.into_iter().map(BankAccountResponse::from).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// Configure bank account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/bank-accounts", web::get().to(list_bank_accounts));
}
