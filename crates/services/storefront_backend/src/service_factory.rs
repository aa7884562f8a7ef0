// --- File: crates/services/storefront_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Builds the external service backends once at startup, according to the
//! compiled features and the runtime configuration.
use std::sync::Arc;
use storefront_common::services::{PaymentService, RealtimeStore, ServiceFactory};
use storefront_config::AppConfig;
#[allow(unused_imports)] // only used by certain features
use tracing::{error, info};

#[cfg(feature = "chat")]
use storefront_chat::RealtimeDatabaseClient;
#[cfg(feature = "payment")]
use storefront_payment::SimulatedPaymentService;

pub struct StorefrontServiceFactory {
    payment_service: Option<Arc<dyn PaymentService>>,
    realtime_store: Option<Arc<dyn RealtimeStore>>,
}

impl StorefrontServiceFactory {
    #[allow(unused_variables)] // config is unused when no service feature is compiled in
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            payment_service: None,
            realtime_store: None,
        };

        #[cfg(feature = "payment")]
        if storefront_common::is_payment_enabled(&config) {
            info!("[Services] Using simulated payment service");
            factory.payment_service = Some(Arc::new(SimulatedPaymentService::from_config(
                config.payment.as_ref(),
            )));
        }

        #[cfg(feature = "chat")]
        if storefront_common::is_chat_enabled(&config) {
            if let Some(chat_config) = config.chat.as_ref() {
                match RealtimeDatabaseClient::from_config(chat_config) {
                    Ok(client) => {
                        info!("[Services] Realtime database at {}", chat_config.database_url);
                        factory.realtime_store = Some(Arc::new(client));
                    }
                    Err(e) => error!("[Services] Realtime database client failed: {}", e),
                }
            }
        }

        factory
    }
}

impl ServiceFactory for StorefrontServiceFactory {
    fn payment_service(&self) -> Option<Arc<dyn PaymentService>> {
        self.payment_service.clone()
    }

    fn realtime_store(&self) -> Option<Arc<dyn RealtimeStore>> {
        self.realtime_store.clone()
    }
}
