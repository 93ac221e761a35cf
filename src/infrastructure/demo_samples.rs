// Built-in reference sample set - Three pre-rotated snapshots of three warriors
use crate::application::sample_provider::SampleProvider;
use crate::domain::subject::{SampleSet, Snapshot, Subject, Vitals};
use async_trait::async_trait;

const IDS: [u32; 3] = [1, 2, 3];

// Per sample, per warrior
const AMMO: [[i64; 3]; 3] = [[265, 200, 20], [245, 185, 160], [200, 270, 200]];
const WATER: [[i64; 3]; 3] = [[3, 2, 1], [4, 1, 0], [2, 0, 1]];
const WEAPON: [[i64; 3]; 3] = [[0, 1, 12], [0, 1, 12], [0, 1, 12]];
// [hr, spo2, temp, resp]
const VITALS: [[(u32, u32, f64, u32); 3]; 3] = [
    [(84, 99, 98.6, 15), (90, 95, 99.2, 8), (120, 87, 90.1, 30)],
    [(82, 98, 98.4, 14), (92, 96, 99.4, 9), (135, 81, 87.8, 45)],
    [(80, 99, 98.5, 15), (108, 98, 99.3, 12), (160, 65, 83.4, 60)],
];

pub fn reference_snapshots() -> Vec<Snapshot> {
    (0..AMMO.len())
        .map(|sample| {
            let subjects = IDS
                .iter()
                .enumerate()
                .map(|(warrior, id)| {
                    let (heart_rate, spo2, temperature, respiration) = VITALS[sample][warrior];
                    Subject::new(
                        *id,
                        AMMO[sample][warrior],
                        WATER[sample][warrior],
                        Vitals {
                            heart_rate,
                            spo2,
                            temperature,
                            respiration,
                        },
                        WEAPON[sample][warrior],
                    )
                })
                .collect();
            Snapshot::new(subjects)
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceSamples;

#[async_trait]
impl SampleProvider for ReferenceSamples {
    fn describe(&self) -> String {
        "built-in reference samples".to_string()
    }

    async fn load_sample_set(&self) -> anyhow::Result<SampleSet> {
        Ok(SampleSet::new(reference_snapshots())?)
    }
}
