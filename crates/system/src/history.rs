/// Fixed-capacity rolling history of scalar samples, oldest first.
///
/// The window starts pre-filled, so its length always equals its capacity and
/// charts scroll from the right edge from the very first sample. Samples are
/// kept contiguous so the window can be read as a plain slice.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: Vec<f32>,
}

impl RollingWindow {
    /// Create a window of `capacity` entries all set to `fill`.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize, fill: f32) -> Self {
        Self {
            samples: vec![fill; capacity.max(1)],
        }
    }

    /// Window of `capacity` zeros.
    pub fn zeroed(capacity: usize) -> Self {
        Self::new(capacity, 0.0)
    }

    /// Append `value` and evict the oldest sample.
    ///
    /// Values are not range-checked; a percentage above 100 is kept as is.
    pub fn push(&mut self, value: f32) {
        self.samples.rotate_left(1);
        if let Some(last) = self.samples.last_mut() {
            *last = value;
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    pub fn latest(&self) -> f32 {
        self.samples.last().copied().unwrap_or_default()
    }

    /// The window, oldest first.
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full_of_fill_value() {
        let w = RollingWindow::new(4, 1.5);
        assert_eq!(w.as_slice(), vec![1.5; 4]);
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn pushes_shift_left() {
        let mut w = RollingWindow::zeroed(5);
        for v in [10.0, 20.0, 30.0] {
            w.push(v);
        }
        assert_eq!(w.as_slice(), vec![0.0, 0.0, 10.0, 20.0, 30.0]);
        assert_eq!(w.latest(), 30.0);
    }

    #[test]
    fn length_never_changes() {
        for capacity in 1..=8 {
            let mut w = RollingWindow::zeroed(capacity);
            for i in 0..(capacity * 3) {
                w.push(i as f32);
                assert_eq!(w.len(), capacity);
            }
        }
    }

    #[test]
    fn overflow_keeps_newest_in_order() {
        let mut w = RollingWindow::zeroed(3);
        for v in 1..=7 {
            w.push(v as f32);
        }
        assert_eq!(w.as_slice(), vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let mut w = RollingWindow::zeroed(2);
        w.push(250.0);
        w.push(-1.0);
        assert_eq!(w.as_slice(), vec![250.0, -1.0]);
    }

    #[test]
    fn zero_capacity_behaves_as_one() {
        let mut w = RollingWindow::zeroed(0);
        w.push(9.0);
        assert_eq!(w.as_slice(), vec![9.0]);
    }
}
