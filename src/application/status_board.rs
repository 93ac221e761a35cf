// Status board renderer - Static layout plus per-tick colored readings
use crate::application::layout::{
    self, BORDER_HEIGHT, BORDER_WIDTH, CHANNEL_LABEL_COL, DATA_FIELD_WIDTH, SAMPLE_COL, SAMPLE_ROW,
    SUBJECT_NAME_ROW, TITLE, TITLE_COL, TITLE_ROW,
};
use crate::application::sample_feed::{ActiveSample, SampleFeed};
use crate::application::screen::{PenColor, ScreenDriver};
use crate::domain::threshold::{ChannelKind, ThresholdProfiles};
use std::io;

pub struct StatusBoard {
    profiles: ThresholdProfiles,
    subject_ids: Vec<u32>,
    border_color: PenColor,
    title_color: PenColor,
    label_color: PenColor,
}

impl StatusBoard {
    pub fn new(profiles: ThresholdProfiles, subject_ids: Vec<u32>) -> Self {
        Self {
            profiles,
            subject_ids,
            border_color: PenColor::White,
            title_color: PenColor::Green,
            label_color: PenColor::White,
        }
    }

    /// One-time static layout: border, title, subject headers, channel labels.
    pub fn draw_structure(&self, screen: &mut dyn ScreenDriver) -> io::Result<()> {
        screen.clear()?;

        screen.set_color(self.border_color)?;
        let edge = "*".repeat(BORDER_WIDTH as usize);
        let side = format!("*{:width$}*", "", width = BORDER_WIDTH as usize - 2);
        screen.write_at(1, 1, &edge)?;
        for row in 2..BORDER_HEIGHT {
            screen.write_at(row, 1, &side)?;
        }
        screen.write_at(BORDER_HEIGHT, 1, &edge)?;

        screen.set_color(self.title_color)?;
        screen.write_at(TITLE_ROW, TITLE_COL, TITLE)?;

        screen.set_color(self.label_color)?;
        for (position, id) in self.subject_ids.iter().enumerate() {
            screen.write_at(
                SUBJECT_NAME_ROW,
                layout::subject_name_col(position),
                &format!("Warrior {}", id),
            )?;
        }

        for kind in ChannelKind::ALL {
            screen.write_at(
                layout::channel_row(kind),
                CHANNEL_LABEL_COL,
                &format!("{:<7}:", kind.label()),
            )?;
        }

        screen.flush()
    }

    /// Advance the feed and repaint every cell from the sample it hands back.
    pub fn refresh_tick(
        &self,
        screen: &mut dyn ScreenDriver,
        feed: &mut SampleFeed,
    ) -> io::Result<ActiveSample> {
        let active = feed.tick();
        self.render(screen, &active)?;
        Ok(active)
    }

    /// Paint one snapshot. Every cell in the pass comes from `active`.
    pub fn render(&self, screen: &mut dyn ScreenDriver, active: &ActiveSample) -> io::Result<()> {
        screen.set_color(self.label_color)?;
        screen.write_at(
            SAMPLE_ROW,
            SAMPLE_COL,
            &format!("Sample {}/{}", active.index + 1, active.total),
        )?;

        for kind in ChannelKind::ALL {
            let row = layout::channel_row(kind);
            for (position, subject) in active.snapshot.subjects.iter().enumerate() {
                let tier = self.profiles.classify(kind, subject.reading(kind));
                screen.set_color(tier.into())?;
                screen.write_at(
                    row,
                    layout::data_col(position),
                    &format!("{:<width$}", subject.display_value(kind), width = DATA_FIELD_WIDTH),
                )?;
            }
        }

        Ok(())
    }
}
