//! Change notifications with explicit subscription handles.
//!
//! An [`EventHub`] is a single-threaded multicast channel. Subscribing returns a
//! [`Subscription`]; dropping it (or calling [`Subscription::unsubscribe`])
//! removes exactly that handler. Handlers run synchronously inside
//! [`EventHub::emit`] and receive a read-only [`NetworkView`] of the registries
//! as they are after the mutation that raised the event.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::antenna::Antenna;
use super::ids::TargetId;
use super::satellite::Satellite;
use super::NetworkView;

type Handler<E> = Box<dyn FnMut(&E, &NetworkView<'_>)>;

/// A body or satellite joined the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    Body(TargetId),
    Satellite(TargetId),
}

/// The hubs a [`Network`](super::Network) raises events on.
#[derive(Debug, Default)]
pub struct NetworkEvents {
    pub registered: EventHub<Registered>,
    pub satellite_unregistered: EventHub<Satellite>,
    pub antenna_unregistered: EventHub<Antenna>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Slots<E> {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler<E>)>,
    /// Handlers cancelled while they were taken out for an emit.
    cancelled: Vec<SubscriptionId>,
    emitting: usize,
}

impl<E> Slots<E> {
    fn remove(&mut self, id: SubscriptionId) {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        if self.handlers.len() == before && self.emitting > 0 {
            self.cancelled.push(id);
        }
    }
}

pub struct EventHub<E> {
    slots: Rc<RefCell<Slots<E>>>,
}

impl<E> Default for EventHub<E> {
    fn default() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
                cancelled: Vec::new(),
                emitting: 0,
            })),
        }
    }
}

impl<E: 'static> EventHub<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. It stays registered until the returned handle is dropped.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&E, &NetworkView<'_>) + 'static,
    {
        let mut slots = self.slots.borrow_mut();
        let id = SubscriptionId(slots.next_id);
        slots.next_id += 1;
        slots.handlers.push((id, Box::new(handler)));

        let weak = Rc::downgrade(&self.slots);
        Subscription {
            id,
            cancel: Some(Box::new(move || {
                if let Some(slots) = weak.upgrade() {
                    slots.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Deliver `event` to every live handler, in subscription order.
    ///
    /// Handlers may subscribe or unsubscribe while being called; changes take
    /// effect for the next emit, except that a cancelled handler is never
    /// called again.
    pub fn emit(&self, event: &E, view: &NetworkView<'_>) {
        let mut handlers = {
            let mut slots = self.slots.borrow_mut();
            slots.emitting += 1;
            std::mem::take(&mut slots.handlers)
        };

        tracing::trace!(handlers = handlers.len(), "Emitting event");

        for (id, handler) in handlers.iter_mut() {
            if self.slots.borrow().cancelled.contains(id) {
                continue;
            }
            handler(event, view);
        }

        let mut slots = self.slots.borrow_mut();
        slots.emitting -= 1;
        handlers.retain(|(id, _)| !slots.cancelled.contains(id));
        handlers.append(&mut slots.handlers);
        slots.handlers = handlers;
        if slots.emitting == 0 {
            slots.cancelled.clear();
        }
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }
}

impl<E> fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.borrow();
        f.debug_struct("EventHub")
            .field("handlers", &slots.handlers.len())
            .finish()
    }
}

/// Handle to a registered event handler. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    id: SubscriptionId,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
