/// Evenly spaced sample times for the integrator output.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    pub const STANDARD_START: f64 = 0.0;
    pub const STANDARD_END: f64 = 60.0;
    pub const STANDARD_SAMPLES: usize = 200;

    /// `samples` points from `start` to `end`, both endpoints included exactly.
    pub fn linspace(start: f64, end: f64, samples: usize) -> Self {
        let points = match samples {
            0 => Vec::new(),
            1 => vec![start],
            n => {
                let step = (end - start) / (n - 1) as f64;
                let mut pts: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
                pts[n - 1] = end;
                pts
            }
        };
        Self { points }
    }

    /// 200 samples over [0, 60].
    pub fn standard() -> Self {
        Self::linspace(Self::STANDARD_START, Self::STANDARD_END, Self::STANDARD_SAMPLES)
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Spacing between samples; `None` with fewer than two points.
    pub fn step(&self) -> Option<f64> {
        match self.points.as_slice() {
            [first, second, ..] => Some(second - first),
            _ => None,
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.points
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::standard()
    }
}
