use std::sync::Arc;

use chrono::FixedOffset;
use domain_repair::service::{
    AuthService, IdentifierService, RequestLifecycleService, StatsService, TrackingService,
    WorkLedgerService,
};
use service_repair::{
    AuthServiceImpl, JwtSettings, RandomIdentifierService, RequestLifecycleServiceImpl,
    StatsServiceImpl, TrackingServiceImpl, WorkLedgerServiceImpl,
};

use super::{config::ShopConfig, database::Database, OrmRepo};

/// Process wide singletons. Everything touching storage is built per handled request
/// through [`ServiceProvider::scoped`].
pub struct ServiceProvider {
    config: ShopConfig,
    database: Arc<Database>,
    identifier_service: Arc<dyn IdentifierService>,
    auth_service: Arc<dyn AuthService>,
    utc_offset: FixedOffset,
}

impl ServiceProvider {
    pub async fn build(config: ShopConfig) -> anyhow::Result<Self> {
        let utc_offset = config.utc_offset()?;
        let database = Arc::new(Database::new(config.common().db().url()).await?);
        let jwt = config.common().jwt();
        // Login only reads, the repo never stages anything.
        let auth_service = Arc::new(
            AuthServiceImpl::builder()
                .user_repo(Arc::new(OrmRepo::builder().db(database.clone()).build()))
                .jwt(JwtSettings {
                    secret: jwt.secret().clone(),
                    expires_in_secs: *jwt.expires_in_secs(),
                })
                .build(),
        );
        Ok(Self {
            config,
            database,
            identifier_service: Arc::new(RandomIdentifierService),
            auth_service,
            utc_offset,
        })
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    pub fn auth_service(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn scoped(&self) -> ServiceProviderScoped<'_> {
        ServiceProviderScoped {
            sp: self,
            repo: Arc::new(OrmRepo::builder().db(self.database.clone()).build()),
        }
    }
}

/// Services sharing one unit of work.
pub struct ServiceProviderScoped<'a> {
    sp: &'a ServiceProvider,
    repo: Arc<OrmRepo>,
}

impl ServiceProviderScoped<'_> {
    pub fn lifecycle_service(&self) -> Arc<dyn RequestLifecycleService> {
        Arc::new(
            RequestLifecycleServiceImpl::builder()
                .request_repo(self.repo.clone())
                .client_repo(self.repo.clone())
                .vehicle_repo(self.repo.clone())
                .work_item_repo(self.repo.clone())
                .history_repo(self.repo.clone())
                .user_repo(self.repo.clone())
                .identifier_service(self.sp.identifier_service.clone())
                .frontend_url(self.sp.config.frontend_url())
                .retry_limit(*self.sp.config.identifier_retry_limit())
                .build(),
        )
    }

    pub fn work_ledger_service(&self) -> Arc<dyn WorkLedgerService> {
        Arc::new(
            WorkLedgerServiceImpl::builder()
                .request_repo(self.repo.clone())
                .work_item_repo(self.repo.clone())
                .retry_limit(*self.sp.config.identifier_retry_limit())
                .build(),
        )
    }

    pub fn tracking_service(&self) -> Arc<dyn TrackingService> {
        Arc::new(
            TrackingServiceImpl::builder()
                .request_repo(self.repo.clone())
                .client_repo(self.repo.clone())
                .vehicle_repo(self.repo.clone())
                .work_item_repo(self.repo.clone())
                .history_repo(self.repo.clone())
                .build(),
        )
    }

    pub fn stats_service(&self) -> Arc<dyn StatsService> {
        Arc::new(
            StatsServiceImpl::builder()
                .request_repo(self.repo.clone())
                .client_repo(self.repo.clone())
                .vehicle_repo(self.repo.clone())
                .utc_offset(self.sp.utc_offset)
                .build(),
        )
    }
}
