mod top_k;

pub use top_k::*;

use std::time::Duration;
use instant::Instant;

/// Runs `f`, returning how long it took alongside its output
pub fn timed<R, F>(f: F) -> (Duration, R)
where
    F: FnOnce() -> R,
{
    let start_at = Instant::now();
    let out = f();
    let dur = start_at.elapsed();

    (dur, out)
}
