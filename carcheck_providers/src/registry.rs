use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use carcheck_config::{ProviderKind, ProvidersConfig};
use carcheck_core::{Resolver, VehicleProvider};
use tracing::{info, warn};

use crate::http::build_client;
use crate::{AutoRiaProvider, BazaGaiProvider, VinDecoderProvider};

/// Instantiates adapters in configured priority order. Adapters without
/// credentials are still created; they disable themselves.
pub fn build_providers(config: &ProvidersConfig) -> anyhow::Result<Vec<Arc<dyn VehicleProvider>>> {
    let client = build_client(Duration::from_secs(config.timeout_secs))?;
    let mut seen = HashSet::new();
    let mut providers: Vec<Arc<dyn VehicleProvider>> = Vec::with_capacity(config.order.len());

    for kind in &config.order {
        if !seen.insert(*kind) {
            warn!("Provider {kind:?} listed twice in providers.order, ignoring duplicate");
            continue;
        }

        let provider: Arc<dyn VehicleProvider> = match kind {
            ProviderKind::Autoria => Arc::new(AutoRiaProvider::new(client.clone(), &config.autoria)),
            ProviderKind::Bazagai => Arc::new(BazaGaiProvider::new(client.clone(), &config.bazagai)),
            ProviderKind::VinDecoder => {
                Arc::new(VinDecoderProvider::new(client.clone(), &config.vin_decoder))
            }
        };

        info!(
            "Registered provider {} ({})",
            provider.name(),
            if provider.is_configured() {
                "enabled"
            } else {
                "no credentials"
            }
        );
        providers.push(provider);
    }

    Ok(providers)
}

/// Resolver over [`build_providers`] with the configured per-provider deadline.
pub fn build_resolver(config: &ProvidersConfig) -> anyhow::Result<Resolver> {
    let providers = build_providers(config)?;
    if !providers.iter().any(|p| p.is_configured()) {
        warn!("No provider has credentials; every lookup will come back empty");
    }
    Ok(Resolver::new(providers).with_timeout(Duration::from_secs(config.timeout_secs)))
}
