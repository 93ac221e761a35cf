// Sample feed - Rotates through the sample set and publishes the current snapshot
use crate::domain::subject::{SampleSet, Snapshot};
use std::sync::Arc;
use tokio::sync::watch;

/// The snapshot currently on the board, with its position in the set.
#[derive(Debug, Clone)]
pub struct ActiveSample {
    pub index: usize,
    pub total: usize,
    pub snapshot: Arc<Snapshot>,
}

/// Tick-paced cyclic index. Advances on every `ticks_per_sample`-th tick, so a
/// sample stays up for exactly that many ticks. Zero behaves like one.
#[derive(Debug, Clone)]
pub struct SampleClock {
    ticks_per_sample: u32,
    delay: u32,
    index: usize,
    len: usize,
}

impl SampleClock {
    pub fn new(len: usize, ticks_per_sample: u32) -> Self {
        Self {
            ticks_per_sample,
            delay: 0,
            index: 0,
            len: len.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Count one tick. Returns true when the index moved.
    pub fn tick(&mut self) -> bool {
        self.delay += 1;
        if self.delay >= self.ticks_per_sample.max(1) {
            self.delay = 0;
            self.index = (self.index + 1) % self.len;
            true
        } else {
            false
        }
    }
}

/// Single writer of the active sample. Owned by the render task.
pub struct SampleFeed {
    set: SampleSet,
    clock: SampleClock,
    tx: watch::Sender<ActiveSample>,
}

impl SampleFeed {
    pub fn new(set: SampleSet, ticks_per_sample: u32) -> (Self, SampleReader) {
        let clock = SampleClock::new(set.len(), ticks_per_sample);
        let initial = ActiveSample {
            index: 0,
            total: set.len(),
            snapshot: set.get(0),
        };
        let (tx, rx) = watch::channel(initial);

        (Self { set, clock, tx }, SampleReader { rx })
    }

    pub fn subject_ids(&self) -> Vec<u32> {
        self.set.subject_ids()
    }

    /// Advance the pacing clock and return the sample to draw this tick.
    ///
    /// The returned value is the one published to readers, so the render pass
    /// and any concurrent poll see the same snapshot.
    pub fn tick(&mut self) -> ActiveSample {
        if self.clock.tick() {
            let index = self.clock.index();
            let next = ActiveSample {
                index,
                total: self.set.len(),
                snapshot: self.set.get(index),
            };
            tracing::debug!("Rotating to sample {}/{}", index + 1, self.set.len());
            self.tx.send_replace(next.clone());
            next
        } else {
            self.current()
        }
    }

    pub fn current(&self) -> ActiveSample {
        self.tx.borrow().clone()
    }
}

/// Read handle for the command server and anything else that polls.
#[derive(Debug, Clone)]
pub struct SampleReader {
    rx: watch::Receiver<ActiveSample>,
}

impl SampleReader {
    pub fn current(&self) -> ActiveSample {
        self.rx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subject::{Subject, Vitals};

    fn set_of(ammo: &[i64]) -> SampleSet {
        let vitals = Vitals {
            heart_rate: 80,
            spo2: 98,
            temperature: 98.5,
            respiration: 14,
        };
        SampleSet::new(
            ammo.iter()
                .map(|a| Snapshot::new(vec![Subject::new(1, *a, 3, vitals, 0)]))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_clock_waits_for_pacing() {
        let mut clock = SampleClock::new(3, 3);
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert_eq!(clock.index(), 0);
        assert!(clock.tick());
        assert_eq!(clock.index(), 1);
    }

    #[test]
    fn test_each_sample_is_shown_for_exactly_ticks_per_sample() {
        let mut clock = SampleClock::new(2, 300);
        let ticks_on_first = (1..).take_while(|_| !clock.tick()).count() + 1;
        assert_eq!(ticks_on_first, 300);

        let ticks_on_second = (1..).take_while(|_| !clock.tick()).count() + 1;
        assert_eq!(ticks_on_second, 300);
        assert_eq!(clock.index(), 0);
    }

    #[test]
    fn test_clock_wraps_modulo_len() {
        let mut clock = SampleClock::new(3, 0);
        let seen: Vec<usize> = (0..7)
            .map(|_| {
                clock.tick();
                clock.index()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_feed_publishes_what_it_returns() {
        let (mut feed, reader) = SampleFeed::new(set_of(&[10, 20, 30]), 2);

        assert_eq!(reader.current().index, 0);
        let first = feed.tick();
        assert_eq!(first.index, 0);

        let rotated = feed.tick();
        assert_eq!(rotated.index, 1);
        assert_eq!(rotated.snapshot.subjects[0].ammo, 20);

        let seen = reader.current();
        assert_eq!(seen.index, rotated.index);
        assert!(Arc::ptr_eq(&seen.snapshot, &rotated.snapshot));
        assert_eq!(seen.total, 3);
    }

    #[tokio::test]
    async fn test_concurrent_reads_during_a_tick_agree() {
        let (mut feed, reader) = SampleFeed::new(set_of(&[10, 20]), 0);
        let drawn = feed.tick();

        let a = reader.clone();
        let b = reader.clone();
        let (left, right) = tokio::join!(
            tokio::spawn(async move { a.current() }),
            tokio::spawn(async move { b.current() })
        );
        let (left, right) = (left.unwrap(), right.unwrap());

        assert_eq!(left.index, drawn.index);
        assert_eq!(right.index, drawn.index);
        assert_eq!(*left.snapshot, *right.snapshot);
    }
}
