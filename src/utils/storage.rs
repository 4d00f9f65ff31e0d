// ============================================================================
// STORAGE - Persistencia de la sesión (localStorage con gloo-storage)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};

use crate::errors::StorageError;
use crate::models::Session;

/// Almacén durable de la sesión. Los fallos de lectura equivalen a "sin sesión".
pub trait SessionStorage {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session) -> Result<(), StorageError>;
    fn clear(&self);
}

/// `window.localStorage` bajo una clave fija
#[derive(Clone)]
pub struct LocalSessionStorage {
    key: String,
}

impl LocalSessionStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SessionStorage for LocalSessionStorage {
    fn load(&self) -> Option<Session> {
        match LocalStorage::get::<Session>(&self.key) {
            Ok(session) => Some(session),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => None,
            Err(e) => {
                log::warn!("⚠️ [STORAGE] Sesión guardada ilegible, se descarta: {}", e);
                LocalStorage::delete(&self.key);
                None
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        LocalStorage::set(&self.key, session).map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
    }
}

/// Almacén en memoria (tests y navegadores sin localStorage). Guarda JSON
/// para pasar por la misma serialización que el almacén real.
#[derive(Clone, Default)]
pub struct MemorySessionStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contenido crudo, para simular datos corruptos
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.slot.borrow_mut() = Some(raw.into());
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Option<Session> {
        let raw = self.slot.borrow().clone()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("⚠️ [STORAGE] Sesión en memoria ilegible: {}", e);
                self.clear();
                None
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        let json = serde_json::to_string(session).map_err(|e| StorageError::Serialize(e.to_string()))?;
        *self.slot.borrow_mut() = Some(json);
        Ok(())
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}
