//! Basic usage of the `handle_pool` crate:
//!
//! * Building a pre-warmed, capped pool.
//! * Acquiring and releasing handles.
//! * Reacting to saturation.
//! * Shrinking back to the baseline.

use handle_pool::{Error, HandlePool, IdLifecycle};

fn main() -> handle_pool::Result<()> {
    let mut pool = HandlePool::builder(IdLifecycle::new())
        .initial_size(2)
        .max_size(3)
        .build()?;

    println!(
        "Pool starts with {} free handles (cap {:?})",
        pool.free_len(),
        pool.max_size()
    );

    // The first two acquisitions reuse pre-created handles; the third grows the pool.
    let a = pool.acquire()?;
    let b = pool.acquire()?;
    let c = pool.acquire()?;
    println!("Issued handles: {a:?}, {b:?}, {c:?}");

    // A saturated pool denies further acquisitions - a normal, recoverable outcome.
    match pool.acquire() {
        Err(Error::Exhausted { max_size }) => {
            println!("Pool saturated at {max_size}; skipping this spawn");
        }
        other => println!("Unexpected outcome: {other:?}"),
    }

    // Released handles are reissued most-recently-released first.
    pool.release(b)?;
    let reused = pool.acquire()?;
    println!("Reissued handle: {reused:?} (same as {b:?})");

    // After the burst, shrink back to the baseline of two handles.
    pool.release(a)?;
    pool.release(c)?;
    pool.release(reused)?;
    let destroyed = pool.shrink();
    println!("Shrink destroyed {destroyed} handles; {} remain", pool.len());

    Ok(())
}
