use std::time::Duration;

/// Wall-clock launch timer, independent of the tick rate.
#[derive(Debug)]
pub struct Spawner {
    interval: Duration,
    elapsed: Duration,
}

impl Spawner {
    /// A zero interval is treated as one nanosecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_nanos(1)),
            elapsed: Duration::ZERO,
        }
    }

    /// Feeds real elapsed time. Returns true when a launch is due.
    ///
    /// At most one launch per call: a stall longer than the interval is not
    /// made up for afterwards.
    pub fn advance(&mut self, frame_time: Duration) -> bool {
        self.elapsed += frame_time;
        if self.elapsed < self.interval {
            return false;
        }

        let leftover = self.elapsed.as_nanos() % self.interval.as_nanos();
        self.elapsed = Duration::from_nanos(leftover as u64);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_interval() {
        let mut spawner = Spawner::new(Duration::from_millis(800));
        let frame = Duration::from_millis(100);

        let fired: Vec<bool> = (0..16).map(|_| spawner.advance(frame)).collect();

        let launches: Vec<usize> = fired
            .iter()
            .enumerate()
            .filter_map(|(i, &f)| f.then_some(i))
            .collect();
        assert_eq!(launches, vec![7, 15]);
    }

    #[test]
    fn test_nothing_before_first_interval() {
        let mut spawner = Spawner::new(Duration::from_millis(800));
        assert!(!spawner.advance(Duration::from_millis(799)));
        assert!(spawner.advance(Duration::from_millis(1)));
    }

    #[test]
    fn test_stall_is_not_replayed() {
        let mut spawner = Spawner::new(Duration::from_millis(800));
        assert!(spawner.advance(Duration::from_millis(2500)));
        // 100ms carried over from the stall
        assert!(!spawner.advance(Duration::from_millis(600)));
        assert!(spawner.advance(Duration::from_millis(100)));
    }

    #[test]
    fn test_zero_interval_fires_every_frame() {
        let mut spawner = Spawner::new(Duration::ZERO);
        assert!(spawner.advance(Duration::from_millis(1)));
        assert!(spawner.advance(Duration::from_millis(1)));
    }
}
