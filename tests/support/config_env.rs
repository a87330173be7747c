use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_HOME: &str = "FACTORY_QC_CONFIG_HOME";
const API_URL: &str = "FACTORY_QC_API_URL";

/// Points the app directory at a scratch folder and clears the API override
/// for the lifetime of the guard.
pub struct ConfigEnvGuard {
    previous_home: Option<String>,
    previous_api: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl ConfigEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME).ok();
        let previous_api = std::env::var(API_URL).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME, path);
            std::env::remove_var(API_URL);
        }
        Self {
            previous_home,
            previous_api,
            _lock: lock,
        }
    }

    pub fn set_api_url(&self, url: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(API_URL, url);
        }
    }
}

impl Drop for ConfigEnvGuard {
    fn drop(&mut self) {
        restore(CONFIG_HOME, self.previous_home.take());
        restore(API_URL, self.previous_api.take());
    }
}

fn restore(key: &str, value: Option<String>) {
    // SAFETY: called from the guard's Drop while the global env lock is held.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
