// Display service - The render task; sole owner of the screen
use crate::application::connection_indicator::{ConnectionIndicator, ConnectionStatus};
use crate::application::event_log::EventReceiver;
use crate::application::message_pane::MessagePane;
use crate::application::sample_feed::SampleFeed;
use crate::application::screen::ScreenDriver;
use crate::application::status_board::StatusBoard;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub struct DisplayService<S: ScreenDriver> {
    screen: S,
    board: StatusBoard,
    feed: SampleFeed,
    pane: MessagePane,
    indicator: ConnectionIndicator,
    status: ConnectionStatus,
    events: EventReceiver,
    tick_interval: Duration,
    indicator_period_ticks: u64,
    ticks: u64,
}

impl<S: ScreenDriver> DisplayService<S> {
    pub fn new(
        screen: S,
        board: StatusBoard,
        feed: SampleFeed,
        status: ConnectionStatus,
        events: EventReceiver,
        tick_interval: Duration,
        indicator_period_ticks: u32,
    ) -> Self {
        Self {
            screen,
            board,
            feed,
            pane: MessagePane::default(),
            indicator: ConnectionIndicator::new(),
            status,
            events,
            tick_interval,
            indicator_period_ticks: u64::from(indicator_period_ticks.max(1)),
            ticks: 0,
        }
    }

    /// Draw the layout, then tick until `shutdown` resolves. Hands the screen
    /// back so the caller decides when the terminal is restored.
    pub async fn run<F>(mut self, shutdown: F) -> S
    where
        F: Future<Output = ()>,
    {
        if let Err(e) = self.board.draw_structure(&mut self.screen) {
            tracing::warn!("Failed to draw board structure: {}", e);
        }

        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Display service stopping after {} ticks", self.ticks);
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.tick() {
                        tracing::warn!("Render tick failed: {}", e);
                    }
                }
            }
        }

        self.screen
    }

    /// One refresh: drain queued events into the pane, repaint the board,
    /// step the indicator on its period, flush.
    pub fn tick(&mut self) -> io::Result<()> {
        let mut appended = false;
        while let Ok(message) = self.events.try_recv() {
            self.pane.append(&message);
            appended = true;
        }
        if appended {
            self.pane.render(&mut self.screen)?;
        }

        self.board.refresh_tick(&mut self.screen, &mut self.feed)?;

        if self.ticks % self.indicator_period_ticks == 0 {
            self.indicator.sync(self.status.get());
            self.indicator.tick(&mut self.screen)?;
        }
        self.ticks += 1;

        self.screen.flush()
    }

    #[cfg(test)]
    pub fn screen(&self) -> &S {
        &self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::connection_indicator::ConnectionState;
    use crate::application::event_log::EventLog;
    use crate::application::layout::{
        CONNECTION_STATUS_COL, CONNECTION_STATUS_ROW, MESSAGE_COL, MESSAGE_ROW,
    };
    use crate::application::screen::recording::{RecordingScreen, ScreenOp};
    use crate::domain::subject::{SampleSet, Snapshot, Subject, Vitals};
    use crate::domain::threshold::ThresholdProfiles;

    fn service(
        indicator_period: u32,
    ) -> (DisplayService<RecordingScreen>, EventLog, ConnectionStatus) {
        let vitals = Vitals {
            heart_rate: 84,
            spo2: 99,
            temperature: 98.6,
            respiration: 15,
        };
        let subject = Subject::new(1, 265, 3, vitals, 0);
        let set = SampleSet::new(vec![Snapshot::new(vec![subject])]).unwrap();
        let (feed, _reader) = SampleFeed::new(set, 100);
        let board = StatusBoard::new(ThresholdProfiles::default(), feed.subject_ids());
        let (log, events) = EventLog::channel();
        let status = ConnectionStatus::new();
        let service = DisplayService::new(
            RecordingScreen::new(),
            board,
            feed,
            status.clone(),
            events,
            Duration::from_millis(1),
            indicator_period,
        );
        (service, log, status)
    }

    #[test]
    fn test_tick_drains_events_into_pane() {
        let (mut service, log, _status) = service(10);
        log.log("Waiting for connection");

        service.tick().unwrap();

        let row = service.screen().text_at(MESSAGE_ROW, MESSAGE_COL, 49);
        assert!(row.contains("]: Waiting for connection"), "{}", row);
        assert_eq!(service.screen().ops.last(), Some(&ScreenOp::Flush));
    }

    #[test]
    fn test_indicator_follows_connection_state() {
        let (mut service, _log, status) = service(1);
        service.tick().unwrap();
        assert_eq!(
            service.screen().text_at(CONNECTION_STATUS_ROW, CONNECTION_STATUS_COL, 1),
            "/"
        );

        status.set(ConnectionState::Error);
        service.tick().unwrap();
        assert_eq!(
            service.screen().text_at(CONNECTION_STATUS_ROW, CONNECTION_STATUS_COL, 1),
            "0"
        );
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_and_returns_screen() {
        let (service, _log, _status) = service(1);
        let screen = service
            .run(tokio::time::sleep(Duration::from_millis(20)))
            .await;

        assert_eq!(screen.ops.first(), Some(&ScreenOp::Clear));
        assert!(screen.ops.iter().filter(|op| **op == ScreenOp::Flush).count() > 1);
    }
}
