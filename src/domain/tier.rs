// Severity tier domain model

/// Classification result for one channel reading, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityTier {
    Normal,
    Caution,
    Warning,
    Critical,
}

impl SeverityTier {
    #[cfg(test)]
    pub const ALL: [SeverityTier; 4] = [
        SeverityTier::Normal,
        SeverityTier::Caution,
        SeverityTier::Warning,
        SeverityTier::Critical,
    ];

    /// Name of the display color used for this tier on the board.
    /// Critical is "black" on paper but black doesn't show up, so it draws blue.
    pub fn color_name(&self) -> &'static str {
        match self {
            SeverityTier::Normal => "green",
            SeverityTier::Caution => "amber",
            SeverityTier::Warning => "red",
            SeverityTier::Critical => "blue",
        }
    }
}
