use async_trait::async_trait;

use crate::{
    exception::RepairResult,
    model::vo::{LoginForm, LoginOutcome, UserInfo},
};

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, form: LoginForm) -> RepairResult<LoginOutcome>;

    /// Decodes a bearer token, failing on bad signature or expiry.
    fn verify(&self, token: &str) -> RepairResult<UserInfo>;
}
