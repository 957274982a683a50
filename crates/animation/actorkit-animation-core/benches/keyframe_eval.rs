use std::sync::Arc;

use actorkit_animation_core::{
    ActorComponent, Animation, AnimationInstance, Config, Events, KeyValue, PropertyType,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Default, Clone)]
struct Sink {
    slots: Vec<(PropertyType, KeyValue)>,
    fired: usize,
}

impl ActorComponent for Sink {
    fn property(&self, property: PropertyType) -> Option<KeyValue> {
        self.slots
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.clone())
    }

    fn set_property(&mut self, property: PropertyType, value: KeyValue) {
        match self.slots.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.slots.push((property, value)),
        }
    }

    fn fire_trigger(&mut self, _property: PropertyType, _time: f32) {
        self.fired += 1;
    }
}

fn load(name: &str) -> Arc<Animation> {
    let bytes = actorkit_test_fixtures::animations::bytes(name).expect("fixture bytes");
    Arc::new(Animation::from_bytes(&bytes, &Config::default()).expect("fixture should load"))
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyframe eval");

    let bytes = actorkit_test_fixtures::animations::bytes("blink").expect("fixture bytes");
    group.bench_function("load blink", |b| {
        b.iter(|| Animation::from_bytes(black_box(&bytes), &Config::default()))
    });

    for name in ["blink", "character-walk"] {
        let anim = load(name);
        let mut inst = AnimationInstance::new(anim, &Config::default());
        let mut comps = vec![Sink::default(); 3];
        let mut events = Events::default();
        group.bench_function(format!("advance {name} @60Hz"), |b| {
            b.iter(|| {
                events.clear();
                inst.advance(black_box(1.0 / 60.0), &mut comps, &mut events);
                black_box(events.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
