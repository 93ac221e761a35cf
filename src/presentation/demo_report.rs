// Demo run mode - Print the sample set as an indented tree
use crate::domain::subject::SampleSet;
use crate::domain::threshold::{ChannelKind, ThresholdProfiles};
use std::fmt::Write;

pub fn render_report(set: &SampleSet, profiles: &ThresholdProfiles) -> String {
    let mut out = String::new();
    for (index, snapshot) in set.iter().enumerate() {
        let _ = writeln!(out, "Sample {}", index);
        for subject in &snapshot.subjects {
            let _ = writeln!(out, " -Warrior {}", subject.id);
            for kind in ChannelKind::ALL {
                let tier = profiles.classify(kind, subject.reading(kind));
                let _ = writeln!(
                    out,
                    "   -{:<7} {:>6}  ({})",
                    format!("{}:", kind.label()),
                    subject.display_value(kind),
                    tier.color_name()
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::demo_samples::reference_snapshots;

    #[test]
    fn test_report_lists_every_reading() {
        let set = SampleSet::new(reference_snapshots()).unwrap();
        let report = render_report(&set, &ThresholdProfiles::default());

        assert_eq!(report.matches("Sample ").count(), 3);
        assert_eq!(report.matches(" -Warrior ").count(), 9);
        assert_eq!(report.lines().count(), 3 + 9 + 9 * 7);
        assert!(report.starts_with("Sample 0\n -Warrior 1\n   -Ammo:      265  (green)\n"));
        assert!(report.contains("   -Temp:     83.4  (red)"));
        assert!(report.contains("   -Resp:       60  (blue)"));
    }
}
