#![allow(dead_code)]
//! Test double for actor components.

use actorkit_animation_core::{ActorComponent, KeyValue, PropertyType};
use hashbrown::HashMap;

/// Records every property write and trigger firing.
#[derive(Debug, Default, Clone)]
pub struct RecordingComponent {
    pub values: HashMap<PropertyType, KeyValue>,
    pub writes: usize,
    pub fired: Vec<(PropertyType, f32)>,
}

impl RecordingComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(property: PropertyType, value: KeyValue) -> Self {
        let mut c = Self::default();
        c.values.insert(property, value);
        c
    }

    pub fn scalar(&self, property: PropertyType) -> Option<f32> {
        self.values.get(&property).and_then(KeyValue::as_scalar)
    }

    pub fn fired_times(&self) -> Vec<f32> {
        self.fired.iter().map(|(_, t)| *t).collect()
    }
}

impl ActorComponent for RecordingComponent {
    fn property(&self, property: PropertyType) -> Option<KeyValue> {
        self.values.get(&property).cloned()
    }

    fn set_property(&mut self, property: PropertyType, value: KeyValue) {
        self.writes += 1;
        self.values.insert(property, value);
    }

    fn fire_trigger(&mut self, property: PropertyType, time: f32) {
        self.fired.push((property, time));
    }
}

pub fn components(n: usize) -> Vec<RecordingComponent> {
    vec![RecordingComponent::default(); n]
}

pub fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}
