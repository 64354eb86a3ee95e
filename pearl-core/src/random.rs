//! Randomness used for sound pitch, orb counts and orb spread.

/// A source of uniform random numbers.
pub trait PearlRandom {
    /// A value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// A value in `[0, 1)`.
    fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// A value in `[low, high]`. Returns `low` when the range is empty.
    fn next_int_inclusive(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = f64::from(high - low) + 1.0;
        (low + (self.next_f64() * span) as i32).min(high)
    }
}

/// Thread-local generator from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl PearlRandom for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    /// Creates a sequence. Values are clamped into `[0, 1)`; an empty list yields zeros.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// A sequence that always yields `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl PearlRandom for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        let Some(value) = self.values.get(self.cursor).copied() else {
            return 0.0;
        };
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}
