// Subject, snapshot and sample set domain models
use super::threshold::ChannelKind;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Vitals {
    pub heart_rate: u32,
    pub spo2: u32,
    pub temperature: f64,
    pub respiration: u32,
}

/// One tracked entity and its five channel values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subject {
    pub id: u32,
    pub ammo: i64,
    pub water: i64,
    pub vitals: Vitals,
    pub weapon: i64,
}

impl Subject {
    pub fn new(id: u32, ammo: i64, water: i64, vitals: Vitals, weapon: i64) -> Self {
        Self {
            id,
            ammo,
            water,
            vitals,
            weapon,
        }
    }

    /// Raw reading for a channel, as fed to the classifier.
    pub fn reading(&self, kind: ChannelKind) -> f64 {
        match kind {
            ChannelKind::Ammo => self.ammo as f64,
            ChannelKind::Water => self.water as f64,
            ChannelKind::HeartRate => self.vitals.heart_rate as f64,
            ChannelKind::Spo2 => self.vitals.spo2 as f64,
            ChannelKind::Temperature => self.vitals.temperature,
            ChannelKind::Respiration => self.vitals.respiration as f64,
            ChannelKind::Weapon => self.weapon as f64,
        }
    }

    /// Reading formatted for a board cell.
    pub fn display_value(&self, kind: ChannelKind) -> String {
        match kind {
            ChannelKind::Temperature => format!("{:.1}", self.vitals.temperature),
            ChannelKind::Ammo => self.ammo.to_string(),
            ChannelKind::Water => self.water.to_string(),
            ChannelKind::HeartRate => self.vitals.heart_rate.to_string(),
            ChannelKind::Spo2 => self.vitals.spo2.to_string(),
            ChannelKind::Respiration => self.vitals.respiration.to_string(),
            ChannelKind::Weapon => self.weapon.to_string(),
        }
    }
}

// Wire order: id, ammo, water, [hr, spo2, temp, resp], weapon
impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, [{}, {}, {:.1}, {}], {}]",
            self.id,
            self.ammo,
            self.water,
            self.vitals.heart_rate,
            self.vitals.spo2,
            self.vitals.temperature,
            self.vitals.respiration,
            self.weapon
        )
    }
}

/// All subjects at one simulated instant. Position is identity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    pub subjects: Vec<Subject>,
}

impl Snapshot {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    pub fn subject_ids(&self) -> Vec<u32> {
        self.subjects.iter().map(|s| s.id).collect()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SampleSetError {
    #[error("sample set has no snapshots")]
    Empty,
    #[error("snapshot 0 has no subjects")]
    NoSubjects,
    #[error("snapshot {index} has {found} subjects, expected {expected}")]
    SubjectCount {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("snapshot {index} has subject {found} at position {position}, expected {expected}")]
    SubjectOrder {
        index: usize,
        position: usize,
        expected: u32,
        found: u32,
    },
}

/// Cyclic sequence of snapshots.
#[derive(Debug, Clone)]
pub struct SampleSet {
    snapshots: Vec<Arc<Snapshot>>,
}

impl SampleSet {
    pub fn new(snapshots: Vec<Snapshot>) -> Result<Self, SampleSetError> {
        let first = snapshots.first().ok_or(SampleSetError::Empty)?;
        if first.subjects.is_empty() {
            return Err(SampleSetError::NoSubjects);
        }
        let ids = first.subject_ids();

        for (index, snapshot) in snapshots.iter().enumerate().skip(1) {
            if snapshot.subjects.len() != ids.len() {
                return Err(SampleSetError::SubjectCount {
                    index,
                    expected: ids.len(),
                    found: snapshot.subjects.len(),
                });
            }
            for (position, (subject, expected)) in snapshot.subjects.iter().zip(&ids).enumerate() {
                if subject.id != *expected {
                    return Err(SampleSetError::SubjectOrder {
                        index,
                        position,
                        expected: *expected,
                        found: subject.id,
                    });
                }
            }
        }

        Ok(Self {
            snapshots: snapshots.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Snapshot at `index`, wrapping around the set.
    pub fn get(&self, index: usize) -> Arc<Snapshot> {
        self.snapshots[index % self.snapshots.len()].clone()
    }

    pub fn subject_ids(&self) -> Vec<u32> {
        self.snapshots[0].subject_ids()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Snapshot>> {
        self.snapshots.iter()
    }
}
