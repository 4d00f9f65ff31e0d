// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Identificador para cancelar una suscripción
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Estado reactivo con sistema de notificaciones.
///
/// Los clones comparten valor y subscribers. Antes de notificar se copia la
/// lista de callbacks y se suelta el borrow del valor, así un callback puede
/// leer el estado, suscribirse o desuscribirse sin pánico de `RefCell`.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(SubscriptionId, Callback<T>)>>>,
    next_id: Rc<Cell<u64>>,
}

impl<T: Clone + 'static> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Leer sin clonar
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&*self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Cancelar suscripción. Devuelve false si ya no existía.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Notificar a todos los subscribers
    fn notify(&self) {
        let snapshot = self.get();
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_new_value() {
        let state = ReactiveState::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        state.subscribe(move |v| sink.borrow_mut().push(*v));

        state.set(1);
        state.set(11);
        assert_eq!(*seen.borrow(), vec![1, 11]);
    }

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(String::from("a"));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        state.subscribe(move |_| counter.set(counter.get() + 1));

        let other = state.clone();
        other.set("b".into());
        assert_eq!(state.get(), "b");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let state = ReactiveState::new(0);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = state.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.set(5);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn callback_may_read_and_unsubscribe_during_notify() {
        let state = ReactiveState::new(1);
        let reader = state.clone();
        let observed = Rc::new(Cell::new(0));
        let sink = observed.clone();
        let own_id: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        let id_slot = own_id.clone();

        let id = state.subscribe(move |_| {
            sink.set(reader.get());
            if let Some(id) = id_slot.get() {
                reader.unsubscribe(id);
            }
        });
        own_id.set(Some(id));

        state.set(42);
        assert_eq!(observed.get(), 42);
        assert_eq!(state.subscriber_count(), 0);
    }
}
