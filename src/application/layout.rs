// Fixed screen layout of the status board (1-based rows and columns)
use crate::domain::threshold::ChannelKind;

pub const BORDER_WIDTH: u16 = 53;
pub const BORDER_HEIGHT: u16 = 19;

pub const TITLE: &str = "AUGMENTED WARFIGHTER AWARENESS SYSTEM";
pub const TITLE_ROW: u16 = 3;
pub const TITLE_COL: u16 = 10;

pub const SAMPLE_ROW: u16 = TITLE_ROW + 1;
pub const SAMPLE_COL: u16 = 4;

pub const SUBJECT_NAME_ROW: u16 = TITLE_ROW + 2;
pub const SUBJECT_NAME_COL: u16 = 14;
pub const SUBJECT_SPACING: u16 = 13;

pub const CHANNEL_LABEL_COL: u16 = 4;
pub const DATA_COL: u16 = SUBJECT_NAME_COL + 3;
/// Cell width; wide enough to cover the longest previous value.
pub const DATA_FIELD_WIDTH: usize = 8;

pub const CONNECTION_STATUS_ROW: u16 = 3;
pub const CONNECTION_STATUS_COL: u16 = 4;

pub const MESSAGE_ROW: u16 = TITLE_ROW + 11;
pub const MESSAGE_COL: u16 = 3;
pub const MESSAGE_WIDTH: usize = 49;
pub const MESSAGE_LINES: usize = 5;

pub fn channel_row(kind: ChannelKind) -> u16 {
    let offset = match kind {
        ChannelKind::Ammo => 3,
        ChannelKind::Water => 4,
        ChannelKind::HeartRate => 5,
        ChannelKind::Spo2 => 6,
        ChannelKind::Temperature => 7,
        ChannelKind::Respiration => 8,
        ChannelKind::Weapon => 9,
    };
    TITLE_ROW + offset
}

pub fn subject_name_col(position: usize) -> u16 {
    SUBJECT_NAME_COL + SUBJECT_SPACING * position as u16
}

pub fn data_col(position: usize) -> u16 {
    DATA_COL + SUBJECT_SPACING * position as u16
}
