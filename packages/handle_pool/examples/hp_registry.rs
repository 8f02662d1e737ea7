//! Using [`HandlePoolRegistry`] to manage one pool per effect category, backed by a
//! custom lifecycle over host-owned state.

use std::cell::RefCell;
use std::rc::Rc;

use handle_pool::{HandleLifecycle, HandlePoolRegistry};

/// Host-side storage for sprites; the pools only ever see the indices.
#[derive(Debug, Default)]
struct Sprites {
    visible: Vec<bool>,
}

#[derive(Clone, Debug)]
struct SpriteLifecycle {
    sprites: Rc<RefCell<Sprites>>,
}

impl HandleLifecycle for SpriteLifecycle {
    type Handle = usize;

    fn create(&mut self) -> usize {
        let mut sprites = self.sprites.borrow_mut();
        sprites.visible.push(false);
        sprites.visible.len() - 1
    }

    fn activate(&mut self, handle: &usize) {
        if let Some(visible) = self.sprites.borrow_mut().visible.get_mut(*handle) {
            *visible = true;
        }
    }

    fn deactivate(&mut self, handle: &usize) {
        if let Some(visible) = self.sprites.borrow_mut().visible.get_mut(*handle) {
            *visible = false;
        }
    }

    fn destroy(&mut self, _handle: usize) {
        // This simple host never compacts its sprite storage.
    }
}

fn main() -> handle_pool::Result<()> {
    let sprites = Rc::new(RefCell::new(Sprites::default()));
    let lifecycle = SpriteLifecycle {
        sprites: Rc::clone(&sprites),
    };

    let mut registry = HandlePoolRegistry::new();
    registry.create_pool("gem", lifecycle.clone(), 4, 16)?;
    registry.create_pool("spark", lifecycle, 8, 64)?;

    // Spawn a few effects of each category.
    let gem = registry.acquire("gem")?;
    let spark_a = registry.acquire("spark")?;
    let spark_b = registry.acquire("spark")?;

    let visible = sprites.borrow().visible.iter().filter(|v| **v).count();
    println!("{visible} sprites visible after spawning");

    registry.release("gem", gem)?;
    registry.release("spark", spark_a)?;
    registry.release("spark", spark_b)?;

    // Between levels: trim every pool back to its baseline.
    let destroyed = registry.shrink_all();
    println!("Shrink destroyed {destroyed} handles across all pools");

    Ok(())
}
