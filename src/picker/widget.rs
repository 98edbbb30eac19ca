//! The antenna target picker widget.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use super::builder::TreeBuilder;
use super::node::Tree;
use super::view::{PickerStyle, RowSurface, TreeView};
use crate::error::{PickerError, Result};
use crate::network::{AntennaId, Network, NetworkView, Subscription, TargetId};

struct PickerState {
    tree: Tree,
    builder: TreeBuilder,
    closed: bool,
    rebuilds: u64,
    on_quit: Option<Box<dyn FnOnce()>>,
}

impl PickerState {
    fn rebuild(&mut self, antenna: AntennaId, view: &NetworkView<'_>) {
        if self.closed {
            return;
        }
        self.tree = self
            .builder
            .build(view.bodies, view.satellites, view.target_of(antenna));
        self.rebuilds += 1;
    }
}

/// Lets an operator pick the target of one antenna.
///
/// The picker subscribes to the network when it is created and rebuilds its
/// tree synchronously on every registration change. Dropping the picker drops
/// its three subscriptions.
pub struct AntennaPicker {
    antenna: AntennaId,
    view: TreeView,
    state: Rc<RefCell<PickerState>>,
    _subscriptions: [Subscription; 3],
}

impl AntennaPicker {
    pub fn new(
        network: &Network,
        antenna: AntennaId,
        style: PickerStyle,
        builder: TreeBuilder,
    ) -> Self {
        let view = network.view();
        let tree = builder.build(view.bodies, view.satellites, view.target_of(antenna));
        let state = Rc::new(RefCell::new(PickerState {
            tree,
            builder,
            closed: false,
            rebuilds: 1,
            on_quit: None,
        }));

        let events = network.events();
        let registered = {
            let state = Rc::downgrade(&state);
            events
                .registered
                .subscribe(move |_, view| refresh(&state, antenna, view))
        };
        let satellite_unregistered = {
            let state = Rc::downgrade(&state);
            events
                .satellite_unregistered
                .subscribe(move |_, view| refresh(&state, antenna, view))
        };
        let antenna_unregistered = {
            let state = Rc::downgrade(&state);
            events.antenna_unregistered.subscribe(move |removed, _| {
                if removed.id == antenna {
                    close(&state, antenna);
                }
            })
        };

        Self {
            antenna,
            view: TreeView::new(style),
            state,
            _subscriptions: [registered, satellite_unregistered, antenna_unregistered],
        }
    }

    /// Called once when this picker's antenna is unregistered.
    pub fn on_quit(self, quit: impl FnOnce() + 'static) -> Self {
        self.state.borrow_mut().on_quit = Some(Box::new(quit));
        self
    }

    pub fn antenna(&self) -> AntennaId {
        self.antenna
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }

    /// How many trees have been built, the initial one included.
    pub fn rebuild_count(&self) -> u64 {
        self.state.borrow().rebuilds
    }

    pub fn tree(&self) -> Ref<'_, Tree> {
        Ref::map(self.state.borrow(), |state| &state.tree)
    }

    pub fn selection(&self) -> TargetId {
        self.state.borrow().tree.selection()
    }

    /// Rebuild from the current network state.
    pub fn refresh(&self, network: &Network) {
        self.state.borrow_mut().rebuild(self.antenna, &network.view());
    }

    /// Render one frame. A clicked node is written to the antenna's target.
    pub fn draw<S: RowSurface + ?Sized>(
        &mut self,
        network: &mut Network,
        surface: &mut S,
    ) -> Result<Option<TargetId>> {
        let request = {
            let mut state = self.state.borrow_mut();
            if state.closed {
                return Err(PickerError::PickerClosed(self.antenna));
            }
            self.view.render(&mut state.tree, surface)
        };

        if let Some(target) = request {
            network.set_target(self.antenna, target)?;
        }
        Ok(request)
    }
}

fn refresh(state: &Weak<RefCell<PickerState>>, antenna: AntennaId, view: &NetworkView<'_>) {
    if let Some(state) = state.upgrade() {
        state.borrow_mut().rebuild(antenna, view);
    }
}

fn close(state: &Weak<RefCell<PickerState>>, antenna: AntennaId) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let quit = {
        let mut state = state.borrow_mut();
        state.closed = true;
        state.on_quit.take()
    };
    tracing::info!(%antenna, "Antenna unregistered, closing picker");
    if let Some(quit) = quit {
        quit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Antenna, Body, Satellite};
    use crate::picker::view::{Ambient, Row, RowResponse};
    use std::cell::Cell;

    #[derive(Default)]
    struct Clicker {
        ambient: Ambient,
        click: Option<&'static str>,
        toggle: Option<&'static str>,
    }

    impl RowSurface for Clicker {
        fn ambient(&self) -> Ambient {
            self.ambient
        }

        fn set_ambient(&mut self, ambient: Ambient) {
            self.ambient = ambient;
        }

        fn row(&mut self, row: &Row<'_>) -> RowResponse {
            RowResponse {
                clicked: self.click.is_some_and(|label| label == row.label),
                toggled: self.toggle.is_some_and(|label| label == row.label),
            }
        }
    }

    fn id(name: &str) -> TargetId {
        TargetId::from_name(name)
    }

    fn network() -> (Network, AntennaId) {
        let mut network = Network::new();
        network.add_body(Body::new(id("Kerbin"), "Kerbin"));
        network.add_body(Body::new(id("Mun"), "Mun").orbiting(id("Kerbin"), 12.0e6));
        let antenna = network.register_antenna(Antenna::new(AntennaId::new(), "Dish"));
        (network, antenna)
    }

    fn picker(network: &Network, antenna: AntennaId) -> AntennaPicker {
        AntennaPicker::new(network, antenna, PickerStyle::default(), TreeBuilder::new())
    }

    #[test]
    fn test_registration_rebuilds() {
        let (mut network, antenna) = network();
        let picker = picker(&network, antenna);
        assert_eq!(picker.rebuild_count(), 1);

        network.register_satellite(Satellite::new(id("Relay"), "Relay", id("Mun")));
        assert_eq!(picker.rebuild_count(), 2);
        assert!(picker.tree().find(id("Relay")).is_some());

        network.unregister_satellite(id("Relay"));
        assert_eq!(picker.rebuild_count(), 3);
        assert!(picker.tree().find(id("Relay")).is_none());
    }

    #[test]
    fn test_click_writes_target() {
        let (mut network, antenna) = network();
        let mut picker = picker(&network, antenna);

        let mut surface = Clicker {
            click: Some("Mun"),
            ..Default::default()
        };
        let request = picker.draw(&mut network, &mut surface).unwrap();

        assert_eq!(request, Some(id("Mun")));
        assert_eq!(network.target_of(antenna), id("Mun"));
        assert_eq!(picker.selection(), id("Mun"));
        assert_eq!(picker.rebuild_count(), 1);
    }

    #[test]
    fn test_collapse_survives_draws_until_rebuild() {
        let (mut network, antenna) = network();
        let mut picker = picker(&network, antenna);

        let mut surface = Clicker {
            toggle: Some("Kerbin"),
            ..Default::default()
        };
        picker.draw(&mut network, &mut surface).unwrap();
        assert!(!picker.tree().find(id("Kerbin")).unwrap().expanded);
        assert_eq!(picker.rebuild_count(), 1);

        picker.draw(&mut network, &mut Clicker::default()).unwrap();
        assert!(!picker.tree().find(id("Kerbin")).unwrap().expanded);

        network.register_satellite(Satellite::new(id("Relay"), "Relay", id("Mun")));
        assert_eq!(picker.rebuild_count(), 2);
        assert!(picker.tree().find(id("Kerbin")).unwrap().expanded);
    }

    #[test]
    fn test_selection_follows_existing_target() {
        let (mut network, antenna) = network();
        network.set_target(antenna, id("Mun")).unwrap();
        let picker = picker(&network, antenna);
        assert_eq!(picker.selection(), id("Mun"));
    }

    #[test]
    fn test_refresh_picks_up_external_target_change() {
        let (mut network, antenna) = network();
        let picker = picker(&network, antenna);
        assert!(picker.selection().is_none());

        network.set_target(antenna, id("Kerbin")).unwrap();
        assert!(picker.selection().is_none());

        picker.refresh(&network);
        assert_eq!(picker.selection(), id("Kerbin"));
        assert_eq!(picker.rebuild_count(), 2);
    }

    #[test]
    fn test_other_antenna_removal_is_ignored() {
        let (mut network, antenna) = network();
        let other = network.register_antenna(Antenna::new(AntennaId::new(), "Omni"));
        let picker = picker(&network, antenna);

        network.unregister_antenna(other);
        assert!(!picker.is_closed());
    }

    #[test]
    fn test_own_antenna_removal_closes_once() {
        let (mut network, antenna) = network();
        let quits = Rc::new(Cell::new(0));
        let counter = quits.clone();
        let mut picker = picker(&network, antenna).on_quit(move || counter.set(counter.get() + 1));

        network.unregister_antenna(antenna);
        assert!(picker.is_closed());
        assert_eq!(quits.get(), 1);

        network.register_satellite(Satellite::new(id("Late"), "Late", id("Kerbin")));
        assert_eq!(picker.rebuild_count(), 1);

        let result = picker.draw(&mut network, &mut Clicker::default());
        assert!(matches!(result, Err(PickerError::PickerClosed(_))));
    }

    #[test]
    fn test_drop_releases_subscriptions() {
        let (network, antenna) = network();
        let events = network.events();
        let before = (
            events.registered.handler_count(),
            events.satellite_unregistered.handler_count(),
            events.antenna_unregistered.handler_count(),
        );

        let first = picker(&network, antenna);
        let second = picker(&network, antenna);
        assert_eq!(events.registered.handler_count(), before.0 + 2);

        drop(first);
        assert_eq!(events.registered.handler_count(), before.0 + 1);
        assert_eq!(events.satellite_unregistered.handler_count(), before.1 + 1);
        assert_eq!(events.antenna_unregistered.handler_count(), before.2 + 1);

        drop(second);
        assert_eq!(events.registered.handler_count(), before.0);
        assert_eq!(events.satellite_unregistered.handler_count(), before.1);
        assert_eq!(events.antenna_unregistered.handler_count(), before.2);
    }
}
