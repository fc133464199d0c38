//! REST management client
//!
//! Thin HTTP client for vendor management endpoints. The endpoint speaks
//! the vendor's own API; this client only moves state in and out — it
//! implements no switch protocol of its own.
//!
//! Interface reads are cached briefly because enumerating interfaces on a
//! large chassis is slow. Scenarios that poll for convergence disable the
//! cache first, otherwise they would be reading their own stale snapshot.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

use super::{DeviceController, DeviceError, DeviceResult, Vendor};
use crate::models::{InterfaceChange, InterfaceState, VlanInfo};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug)]
struct CacheEntry {
    fetched: Instant,
    interfaces: Vec<InterfaceState>,
}

/// HTTP client for a switch management endpoint
#[derive(Debug)]
pub struct RestSwitchClient {
    client: Client,
    base: String,
    vendor: Vendor,
    cache: Mutex<Option<CacheEntry>>,
    cache_enabled: AtomicBool,
    cache_ttl: Duration,
}

impl RestSwitchClient {
    pub fn new(vendor: Vendor, endpoint: &str) -> DeviceResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DeviceError::Transport(e.to_string()))?;

        let base = format!("{}{}", endpoint.trim_end_matches('/'), vendor.api_prefix());

        Ok(Self {
            client,
            base,
            vendor,
            cache: Mutex::new(None),
            cache_enabled: AtomicBool::new(true),
            cache_ttl: CACHE_TTL,
        })
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn cached_interfaces(&self) -> Option<Vec<InterfaceState>> {
        if !self.cache_enabled.load(Ordering::SeqCst) {
            return None;
        }
        let cache = self.cache.lock().expect("cache lock poisoned");
        cache
            .as_ref()
            .filter(|entry| entry.fetched.elapsed() < self.cache_ttl)
            .map(|entry| entry.interfaces.clone())
    }

    fn store_interfaces(&self, interfaces: &[InterfaceState]) {
        if !self.cache_enabled.load(Ordering::SeqCst) {
            return;
        }
        let mut cache = self.cache.lock().expect("cache lock poisoned");
        *cache = Some(CacheEntry {
            fetched: Instant::now(),
            interfaces: interfaces.to_vec(),
        });
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> DeviceResult<T> {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DeviceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeviceError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DeviceError::Transport(e.to_string()))
    }
}

#[async_trait]
impl DeviceController for RestSwitchClient {
    async fn list_interfaces(&self) -> DeviceResult<Vec<InterfaceState>> {
        if let Some(interfaces) = self.cached_interfaces() {
            return Ok(interfaces);
        }

        let interfaces: Vec<InterfaceState> = self.get_json("/interfaces").await?;
        self.store_interfaces(&interfaces);
        Ok(interfaces)
    }

    async fn list_vlans(&self) -> DeviceResult<Vec<VlanInfo>> {
        self.get_json("/vlans").await
    }

    async fn read_interface(&self, key: &str) -> DeviceResult<InterfaceState> {
        if let Some(interfaces) = self.cached_interfaces() {
            if let Some(iface) = interfaces.into_iter().find(|i| i.key == key) {
                return Ok(iface);
            }
        }

        self.get_json(&format!("/interfaces/{key}")).await
    }

    async fn apply(&self, key: &str, changes: &[InterfaceChange]) -> DeviceResult<()> {
        let url = self.url(&format!("/interfaces/{key}/changes"));
        debug!("POST {url} ({} changes)", changes.len());

        let response = self
            .client
            .post(&url)
            .json(&changes)
            .send()
            .await
            .map_err(|e| DeviceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeviceError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        // A mutation invalidates whatever we read before it.
        self.cache.lock().expect("cache lock poisoned").take();
        Ok(())
    }

    fn set_caching(&self, enabled: bool) {
        self.cache_enabled.store(enabled, Ordering::SeqCst);
        if !enabled {
            self.cache.lock().expect("cache lock poisoned").take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminState;
    use crate::models::OperState;

    #[test]
    fn base_url_includes_vendor_prefix() {
        let client = RestSwitchClient::new(Vendor::CiscoNexus, "http://10.0.0.1:8080/").unwrap();
        assert_eq!(
            client.url("/interfaces"),
            "http://10.0.0.1:8080/api/nxos/v1/interfaces"
        );
    }

    #[test]
    fn cache_disabled_serves_nothing() {
        let client = RestSwitchClient::new(Vendor::AristaManager, "http://sw1").unwrap();
        let interfaces = vec![InterfaceState::new("1", "Ethernet1")
            .with_admin_state(AdminState::Up)
            .with_oper_state(OperState::Up)];

        client.store_interfaces(&interfaces);
        assert!(client.cached_interfaces().is_some());

        client.set_caching(false);
        assert!(client.cached_interfaces().is_none());

        // Disabling also drops the stored snapshot.
        client.set_caching(true);
        assert!(client.cached_interfaces().is_none());
    }

    #[test]
    fn store_is_a_noop_while_disabled() {
        let client = RestSwitchClient::new(Vendor::AperiChassis, "http://sw1").unwrap();
        client.set_caching(false);
        client.store_interfaces(&[InterfaceState::new("1", "Ethernet1")]);
        client.set_caching(true);
        assert!(client.cached_interfaces().is_none());
    }
}
