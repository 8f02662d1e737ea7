//! End-to-end scenarios driving [`HandlePoolRegistry`] the way a frame loop would:
//! category pools created at startup, handles cycled every frame, periodic shrinks,
//! teardown at shutdown.

#![allow(
    clippy::arithmetic_side_effects,
    missing_docs,
    reason = "we do not need to worry about these things when writing test code"
)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use handle_pool::{Error, HandleLifecycle, HandlePoolRegistry};

/// A toy scene graph: entities with an id and a visibility flag, owned outside the pools.
#[derive(Debug, Default)]
struct Scene {
    next_id: u64,
    entities: BTreeMap<u64, bool>,
}

/// Lifecycle over a shared [`Scene`], one instance per pooled category.
#[derive(Clone, Debug)]
struct SceneLifecycle {
    scene: Rc<RefCell<Scene>>,
}

impl SceneLifecycle {
    fn new(scene: &Rc<RefCell<Scene>>) -> Self {
        Self {
            scene: Rc::clone(scene),
        }
    }
}

impl HandleLifecycle for SceneLifecycle {
    type Handle = u64;

    fn create(&mut self) -> u64 {
        let mut scene = self.scene.borrow_mut();
        scene.next_id += 1;
        let id = scene.next_id;
        scene.entities.insert(id, true);
        id
    }

    fn activate(&mut self, handle: &u64) {
        *self
            .scene
            .borrow_mut()
            .entities
            .get_mut(handle)
            .expect("activated entity must exist") = true;
    }

    fn deactivate(&mut self, handle: &u64) {
        *self
            .scene
            .borrow_mut()
            .entities
            .get_mut(handle)
            .expect("deactivated entity must exist") = false;
    }

    fn destroy(&mut self, handle: u64) {
        self.scene.borrow_mut().entities.remove(&handle);
    }
}

fn visible_count(scene: &Rc<RefCell<Scene>>) -> usize {
    scene
        .borrow()
        .entities
        .values()
        .filter(|visible| **visible)
        .count()
}

#[test]
fn frame_loop_cycle() {
    let scene = Rc::new(RefCell::new(Scene::default()));
    let mut registry = HandlePoolRegistry::new();

    registry
        .create_pool("gem", SceneLifecycle::new(&scene), 8, 32)
        .unwrap();
    registry
        .create_pool("spark", SceneLifecycle::new(&scene), 4, 16)
        .unwrap();

    // Startup pre-created everything deactivated.
    assert_eq!(scene.borrow().entities.len(), 12);
    assert_eq!(visible_count(&scene), 0);

    // Simulated frames: spawn a varying number of effects, release them next frame.
    let mut live: Vec<(&str, u64)> = Vec::new();

    for frame in 0_usize..200 {
        for (key, handle) in live.drain(..) {
            registry.release(key, handle).unwrap();
        }

        let gems = frame % 5;
        let sparks = frame % 9;

        for _ in 0..gems {
            match registry.acquire("gem") {
                Ok(handle) => live.push(("gem", handle)),
                Err(Error::Exhausted { .. }) => {} // skip the effect this frame
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        for _ in 0..sparks {
            match registry.acquire("spark") {
                Ok(handle) => live.push(("spark", handle)),
                Err(Error::Exhausted { .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        // Exactly the live handles are visible in the scene.
        assert_eq!(visible_count(&scene), live.len());

        // Every pool stays within its cap.
        assert!(registry.get("gem").unwrap().len() <= 32);
        assert!(registry.get("spark").unwrap().len() <= 16);
    }

    for (key, handle) in live.drain(..) {
        registry.release(key, handle).unwrap();
    }

    // After the burst is over, shrinking restores the baseline entity count.
    let destroyed = registry.shrink_all();
    assert!(destroyed > 0);
    assert_eq!(scene.borrow().entities.len(), 12);
    assert_eq!(visible_count(&scene), 0);
}

#[test]
fn cross_pool_release_is_rejected_and_harmless() {
    let scene = Rc::new(RefCell::new(Scene::default()));
    let mut registry = HandlePoolRegistry::new();

    registry
        .create_pool("gem", SceneLifecycle::new(&scene), 1, 4)
        .unwrap();
    registry
        .create_pool("spark", SceneLifecycle::new(&scene), 1, 4)
        .unwrap();

    let gem = registry.acquire("gem").unwrap();

    // Releasing a gem into the spark pool is a reported no-op.
    assert!(matches!(
        registry.release("spark", gem),
        Err(Error::UnknownHandle)
    ));

    // The gem is still issued and can be released properly.
    assert_eq!(registry.get("gem").unwrap().spawned_len(), 1);
    registry.release("gem", gem).unwrap();
}

#[test]
fn shutdown_paths() {
    let scene = Rc::new(RefCell::new(Scene::default()));
    let mut registry = HandlePoolRegistry::new();

    registry
        .create_pool("gem", SceneLifecycle::new(&scene), 2, 8)
        .unwrap();
    registry
        .create_pool("spark", SceneLifecycle::new(&scene), 2, 8)
        .unwrap();

    // Explicit removal destroys that category's entities.
    registry.remove_pool("gem").unwrap();
    assert_eq!(scene.borrow().entities.len(), 2);

    // Wholesale teardown leaves the remaining entities to the host.
    registry.clear();
    assert_eq!(scene.borrow().entities.len(), 2);
    assert!(registry.is_empty());
}
