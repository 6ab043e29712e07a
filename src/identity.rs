use std::cell::RefCell;

use crate::model::Uid;

/// Keeps the last accepted UID between sessions.
///
/// `load` does not validate; whatever was stored comes back and is
/// checked again on use.
pub trait IdentityStore {
    fn load(&self) -> Option<String>;
    fn save(&self, uid: &Uid);
}

/// Identity kept for the lifetime of the page only.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    uid: RefCell<Option<String>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        MemoryIdentityStore {
            uid: RefCell::new(Some(value.into())),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Option<String> {
        self.uid.borrow().clone()
    }

    fn save(&self, uid: &Uid) {
        *self.uid.borrow_mut() = Some(uid.as_str().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_returns_stored_value_unvalidated() {
        let store = MemoryIdentityStore::with_value("short");
        assert_eq!(store.load().as_deref(), Some("short"));
        store.save(&Uid::parse("abcdefgh").unwrap());
        assert_eq!(store.load().as_deref(), Some("abcdefgh"));
        assert_eq!(MemoryIdentityStore::new().load(), None);
    }
}
