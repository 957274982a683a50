//! Boundary to the host's actor components.
//!
//! The core never creates or destroys components; it only reads and writes
//! animated property slots and notifies triggers through this trait.

use serde::{Deserialize, Serialize};

use crate::property::PropertyType;
use crate::value::KeyValue;

/// Index of a keyed component inside the host's component list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ComponentId(pub u16);

impl ComponentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Mutable scene object driven by keyframes.
pub trait ActorComponent {
    /// Current value of an animated property, used as the base when blending
    /// with `mix < 1`. `None` means the component has no such slot yet.
    fn property(&self, property: PropertyType) -> Option<KeyValue>;

    /// Assign an animated property.
    fn set_property(&mut self, property: PropertyType, value: KeyValue);

    /// Notify a trigger keyed at `time` on this component.
    fn fire_trigger(&mut self, property: PropertyType, time: f32);
}

impl<T: ActorComponent + ?Sized> ActorComponent for Box<T> {
    fn property(&self, property: PropertyType) -> Option<KeyValue> {
        (**self).property(property)
    }

    fn set_property(&mut self, property: PropertyType, value: KeyValue) {
        (**self).set_property(property, value)
    }

    fn fire_trigger(&mut self, property: PropertyType, time: f32) {
        (**self).fire_trigger(property, time)
    }
}
