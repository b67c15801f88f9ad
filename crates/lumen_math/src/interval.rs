#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns the midpoint of the interval.
    pub fn center(&self) -> f32 {
        self.min + 0.5 * (self.max - self.min)
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns the lower or upper half of the interval.
    ///
    /// `idx` 0 selects [min, center], 1 selects [center, max]. The two
    /// halves share the center value, so a point sitting exactly on it
    /// is contained by both.
    pub fn half(&self, idx: usize) -> Interval {
        let half_size = 0.5 * self.size();
        let min = self.min + half_size * idx as f32;
        Interval::new(min, min + half_size)
    }

    /// Creates an interval that surrounds two other intervals.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };
}
