use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domain_repair::{
    exception::{RepairException, RepairResult},
    model::vo::{LoginForm, LoginOutcome, UserInfo, UserProfile},
    repository::UserRepo,
    service::AuthService,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expires_in_secs: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: Uuid,
    email: String,
    role: String,
    iat: i64,
    exp: i64,
}

#[derive(TypedBuilder)]
pub struct AuthServiceImpl {
    user_repo: Arc<dyn UserRepo>,
    jwt: JwtSettings,
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, form: LoginForm) -> RepairResult<LoginOutcome> {
        form.validate()?;
        let email = form.email.trim().to_string();
        let user = match self.user_repo.get_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login failed, no user with email {email}.");
                return Err(RepairException::InvalidCredentials);
            }
        };

        let hash = user.password_hash.clone();
        let password = form.password;
        // Blocking on purpose, run it off the async workers.
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(anyhow::Error::from)?;
        match verified {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("Login failed, wrong password for {email}.");
                return Err(RepairException::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!("Password hash of user: {} is unreadable: {e}", user.id);
                return Err(RepairException::InvalidCredentials);
            }
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now + self.jwt.expires_in_secs,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )
        .map_err(anyhow::Error::from)?;
        tracing::info!("User: {} logged in.", user.id);
        Ok(LoginOutcome {
            token,
            user: UserProfile::from(&user),
        })
    }

    fn verify(&self, token: &str) -> RepairResult<UserInfo> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| RepairException::Unauthorized {
            reason: e.to_string(),
        })?;
        Ok(UserInfo {
            id: data.claims.id,
            email: data.claims.email,
            role: data.claims.role,
        })
    }
}
