// --- File: crates/storefront_appointments/src/catalog.rs ---
use serde::Serialize;
use storefront_config::{SchedulingConfig, ServiceTypeConfig};
use tracing::warn;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A named offering with a duration, chosen after a slot.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServiceType {
    #[cfg_attr(feature = "openapi", schema(example = "consulta-general"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Consulta general"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub duration_minutes: u32,
}

impl ServiceType {
    fn new(id: &str, name: &str, duration_minutes: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            duration_minutes,
        }
    }
}

impl From<&ServiceTypeConfig> for ServiceType {
    fn from(cfg: &ServiceTypeConfig) -> Self {
        Self::new(&cfg.id, &cfg.name, cfg.duration_minutes)
    }
}

/// The fixed list of services offered at pickup appointments.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ServiceCatalog {
    services: Vec<ServiceType>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self {
            services: vec![
                ServiceType::new("consulta-general", "Consulta general", 30),
                ServiceType::new("retiro-pedido", "Retiro de pedido", 15),
                ServiceType::new("asesoria-personalizada", "Asesoría personalizada", 60),
            ],
        }
    }
}

impl ServiceCatalog {
    /// Uses the configured services, or the defaults when none are listed.
    /// Entries with an empty id or a zero duration are skipped.
    pub fn from_config(config: Option<&SchedulingConfig>) -> Self {
        let configured: Vec<ServiceType> = config
            .map(|cfg| cfg.services.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|svc| {
                let valid = !svc.id.trim().is_empty() && svc.duration_minutes > 0;
                if !valid {
                    warn!("Skipping invalid service type '{}'", svc.id);
                }
                valid
            })
            .map(ServiceType::from)
            .collect();

        if configured.is_empty() {
            Self::default()
        } else {
            Self {
                services: configured,
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&ServiceType> {
        self.services.iter().find(|svc| svc.id == id)
    }

    pub fn all(&self) -> &[ServiceType] {
        &self.services
    }
}
