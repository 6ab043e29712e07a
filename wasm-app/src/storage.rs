use log::warn;
use pixelwar::{IdentityStore, MemoryIdentityStore, Uid};
use web_sys::{window, Storage};

/// UID kept in `localStorage` as plain text under one key.
///
/// When the page has no usable storage (private windows, sandboxed
/// frames) the value only lives in memory.
pub struct BrowserIdentityStore {
    key: String,
    fallback: MemoryIdentityStore,
}

impl BrowserIdentityStore {
    pub fn new(key: impl Into<String>) -> Self {
        BrowserIdentityStore {
            key: key.into(),
            fallback: MemoryIdentityStore::new(),
        }
    }

    fn storage() -> Option<Storage> {
        window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl IdentityStore for BrowserIdentityStore {
    fn load(&self) -> Option<String> {
        match Self::storage() {
            Some(storage) => storage.get_item(&self.key).ok().flatten(),
            None => self.fallback.load(),
        }
    }

    fn save(&self, uid: &Uid) {
        let stored = Self::storage().map(|storage| storage.set_item(&self.key, uid.as_str()));
        if !matches!(stored, Some(Ok(()))) {
            warn!("localStorage unavailable, keeping UID in memory");
            self.fallback.save(uid);
        }
    }
}
