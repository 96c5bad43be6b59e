//! Deterministic frame clock standing in for a display refresh callback.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DEFAULT_FPS: f64 = 60.0;
const MAX_JITTER: f64 = 0.95;

/// Produces measured frame intervals around a nominal rate. With jitter the
/// intervals are irregular but reproducible per seed, matching how a real
/// animation callback delivers uneven deltas.
#[derive(Debug)]
pub struct FrameClock {
    frame_secs: f64,
    jitter: f64,
    rng: ChaCha8Rng,
}

impl FrameClock {
    #[must_use]
    pub fn new(fps: f64, jitter: f64, seed: u64) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            DEFAULT_FPS
        };
        Self {
            frame_secs: 1.0 / fps,
            jitter: jitter.clamp(0.0, MAX_JITTER),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Elapsed seconds for the next frame. Always positive.
    pub fn next_interval(&mut self) -> f64 {
        if self.jitter <= 0.0 {
            return self.frame_secs;
        }
        let lo = 1.0 - self.jitter;
        let hi = 1.0 + self.jitter;
        self.frame_secs * self.rng.gen_range(lo..hi)
    }
}
