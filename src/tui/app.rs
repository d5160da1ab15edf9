//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//! - Network calls via background workers

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{EmailRelayNotifier, HttpPredictionClient};
use crate::application::{FeedbackService, PredictionService};
use crate::config::Settings;
use crate::domain::{Domain, RiskAssessment};
use crate::ports::{
    BackendHealth, FeedbackError, FeedbackNotifier, PredictionBackend, PredictionFailed,
};

use super::ui::{
    about::render_about,
    feedback::{render_feedback, FeedbackViewState},
    form::{render_form, FormViewState},
    home::{render_home, BackendStatus, HomeState},
    render_disclaimer,
    result::{render_progress, render_result},
};
use super::worker::{Worker, WorkerHandle, WorkerProgress};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Form(Domain),
    Feedback,
    About,
}

/// One risk form and its in-flight request, if any.
struct FormSlot {
    view: FormViewState,
    worker: Option<WorkerHandle<crate::Result<RiskAssessment>>>,
    started_at: Option<Instant>,
}

impl FormSlot {
    fn new(domain: Domain) -> Self {
        Self {
            view: FormViewState::new(domain),
            worker: None,
            started_at: None,
        }
    }
}

fn slot_index(domain: Domain) -> usize {
    match domain {
        Domain::Chd => 0,
        Domain::Stroke => 1,
        Domain::Diabetes => 2,
    }
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,

    prediction: PredictionService<dyn PredictionBackend>,
    feedback: FeedbackService<dyn FeedbackNotifier>,

    home_state: HomeState,
    forms: Vec<FormSlot>,
    feedback_state: FeedbackViewState,
    about_scroll: u16,

    health_worker: Option<WorkerHandle<Result<BackendHealth, PredictionFailed>>>,
    feedback_worker: Option<WorkerHandle<Result<(), FeedbackError>>>,
}

impl App {
    /// Create the application with the HTTP adapters described by `settings`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = HttpPredictionClient::new(&settings.backend.base_url, settings.backend.timeout())?;
        let relay = EmailRelayNotifier::new(
            settings.feedback.relay_url.clone(),
            settings.feedback.service_id.clone(),
            settings.feedback.template_id.clone(),
            settings.feedback.public_key.clone(),
        );

        let home_state = HomeState {
            backend_url: client.base_url().to_string(),
            backend_status: BackendStatus::Unknown,
            feedback_configured: relay.is_configured(),
        };

        Ok(Self::with_dependencies(
            Arc::new(client),
            Arc::new(relay),
            home_state,
        ))
    }

    /// Create application with injected dependencies (Composition Root pattern).
    pub fn with_dependencies(
        backend: Arc<dyn PredictionBackend>,
        notifier: Arc<dyn FeedbackNotifier>,
        home_state: HomeState,
    ) -> Self {
        Self {
            screen: Screen::Home,
            should_quit: false,
            prediction: PredictionService::new(backend),
            feedback: FeedbackService::new(notifier),
            home_state,
            forms: Domain::ALL.iter().map(|d| FormSlot::new(*d)).collect(),
            feedback_state: FeedbackViewState::default(),
            about_scroll: 0,
            health_worker: None,
            feedback_worker: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.check_backend();

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();
            self.tick_progress();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                match self.screen {
                    Screen::Home => render_home(f, chunks[0], &self.home_state),
                    Screen::Form(domain) => {
                        let slot = &self.forms[slot_index(domain)];
                        let controller = &slot.view.controller;
                        if controller.is_in_flight() {
                            render_progress(f, chunks[0], domain, slot.view.progress);
                        } else if let Some(assessment) = controller.result() {
                            render_result(f, chunks[0], assessment);
                        } else {
                            render_form(f, chunks[0], &slot.view);
                        }
                    }
                    Screen::Feedback => render_feedback(f, chunks[0], &self.feedback_state),
                    Screen::About => render_about(f, chunks[0], self.about_scroll),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn slot_mut(&mut self, domain: Domain) -> &mut FormSlot {
        &mut self.forms[slot_index(domain)]
    }

    /// Drain every worker channel and hand finished outcomes to their owners.
    fn poll_workers(&mut self) {
        for slot in &mut self.forms {
            let Some(progress) = slot.worker.as_ref().and_then(WorkerHandle::try_recv) else {
                continue;
            };
            let outcome = match progress {
                WorkerProgress::Started => continue,
                WorkerProgress::Complete(outcome) => outcome,
                WorkerProgress::Lost => Err(PredictionFailed::transport("worker terminated").into()),
            };
            slot.view.controller.complete(outcome);
            slot.view.progress = 1.0;
            slot.worker = None;
            slot.started_at = None;
        }

        if let Some(progress) = self.health_worker.as_ref().and_then(WorkerHandle::try_recv) {
            let status = match progress {
                WorkerProgress::Started => None,
                WorkerProgress::Complete(Ok(health)) => Some(BackendStatus::Healthy(
                    health.message.unwrap_or(health.status),
                )),
                WorkerProgress::Complete(Err(_)) | WorkerProgress::Lost => {
                    Some(BackendStatus::Unreachable)
                }
            };
            if let Some(status) = status {
                self.home_state.backend_status = status;
                self.health_worker = None;
            }
        }

        if let Some(progress) = self.feedback_worker.as_ref().and_then(WorkerHandle::try_recv) {
            let outcome = match progress {
                WorkerProgress::Started => None,
                WorkerProgress::Complete(outcome) => Some(outcome),
                WorkerProgress::Lost => Some(Err(FeedbackError::Failed("worker terminated".into()))),
            };
            if let Some(outcome) = outcome {
                self.feedback_state.form.complete(outcome);
                self.feedback_worker = None;
            }
        }
    }

    /// Smooth, monotonic fake progress: asymptotically approaches 95%.
    fn tick_progress(&mut self) {
        const TARGET: f64 = 0.95;
        const TAU: f64 = 2.5;

        let now = Instant::now();
        for slot in &mut self.forms {
            let Some(started_at) = slot.started_at else {
                continue;
            };
            let elapsed = now.saturating_duration_since(started_at).as_secs_f64();
            let desired = TARGET * (1.0 - (-elapsed / TAU).exp());
            slot.view.progress = desired.max(slot.view.progress).min(TARGET);
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && matches!(key, KeyCode::Char('c' | 'q')) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Form(domain) => self.handle_form_key(domain, key),
            Screen::Feedback => self.handle_feedback_key(key),
            Screen::About => self.handle_about_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.screen = Screen::Form(Domain::ALL[index]);
            }
            KeyCode::Char('f' | 'F') => {
                self.screen = Screen::Feedback;
            }
            KeyCode::Char('a' | 'A') => {
                self.about_scroll = 0;
                self.screen = Screen::About;
            }
            KeyCode::Char('h' | 'H') => self.check_backend(),
            KeyCode::Char('q' | 'Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, domain: Domain, key: KeyCode) {
        let slot = self.slot_mut(domain);
        let controller = &slot.view.controller;

        if controller.is_in_flight() {
            // Nothing to do but wait; leaving keeps the request running.
            if key == KeyCode::Esc {
                self.screen = Screen::Home;
            }
            return;
        }

        if controller.result().is_some() {
            match key {
                KeyCode::Enter | KeyCode::Char('n' | 'N') => slot.view.reset(),
                KeyCode::Esc => {
                    slot.view.controller.clear_outcome();
                    self.screen = Screen::Home;
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => {
                if !slot.view.cancel_edit() {
                    slot.view.controller.clear_outcome();
                    self.screen = Screen::Home;
                }
            }
            KeyCode::Up | KeyCode::BackTab => slot.view.prev_field(),
            KeyCode::Down | KeyCode::Tab => slot.view.next_field(),
            KeyCode::Left => slot.view.step_selected(-1),
            KeyCode::Right => slot.view.step_selected(1),
            KeyCode::Backspace => slot.view.delete_char(),
            KeyCode::Char('r' | 'R') => slot.view.reset(),
            KeyCode::Char(c) => slot.view.input_char(c),
            KeyCode::Enter => self.submit_form(domain),
            _ => {}
        }
    }

    fn handle_feedback_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.feedback_state.form.clear_notice();
                self.screen = Screen::Home;
            }
            KeyCode::Up | KeyCode::BackTab => self.feedback_state.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.feedback_state.next_field(),
            KeyCode::Backspace => self.feedback_state.delete_char(),
            KeyCode::Enter if self.feedback_state.on_last_field() => self.submit_feedback(),
            KeyCode::Enter => self.feedback_state.next_field(),
            KeyCode::Char(c) => self.feedback_state.input_char(c),
            _ => {}
        }
    }

    fn handle_about_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => self.screen = Screen::Home,
            KeyCode::Up => self.about_scroll = self.about_scroll.saturating_sub(1),
            KeyCode::Down => self.about_scroll = self.about_scroll.saturating_add(1).min(40),
            _ => {}
        }
    }

    fn submit_form(&mut self, domain: Domain) {
        let service = self.prediction.clone();
        let slot = self.slot_mut(domain);
        let Some(snapshot) = slot.view.begin_submit() else {
            return;
        };

        tracing::debug!(%domain, "Spawning prediction worker");
        slot.worker = Some(Worker::spawn(move || service.assess(&snapshot)));
        slot.started_at = Some(Instant::now());
    }

    fn submit_feedback(&mut self) {
        let Some(feedback) = self.feedback_state.begin_submit() else {
            return;
        };
        let service = self.feedback.clone();
        self.feedback_worker = Some(Worker::spawn(move || service.send(&feedback)));
    }

    fn check_backend(&mut self) {
        if self.health_worker.is_some() {
            return;
        }
        let service = self.prediction.clone();
        self.home_state.backend_status = BackendStatus::Checking;
        self.health_worker = Some(Worker::spawn(move || service.health()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::FakeBackend;
    use crate::application::Notice;
    use crate::domain::{Feedback, FieldValue, RiskTier};

    struct AcceptingNotifier;

    impl FeedbackNotifier for AcceptingNotifier {
        fn send(&self, _feedback: &Feedback) -> Result<(), FeedbackError> {
            Ok(())
        }
    }

    fn app(backend: FakeBackend) -> App {
        App::with_dependencies(
            Arc::new(backend),
            Arc::new(AcceptingNotifier),
            HomeState::default(),
        )
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key, KeyModifiers::NONE);
        }
    }

    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.poll_workers();
            let busy = app.forms.iter().any(|s| s.worker.is_some())
                || app.health_worker.is_some()
                || app.feedback_worker.is_some();
            if !busy {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("workers did not finish");
    }

    #[test]
    fn test_navigation() {
        let mut app = app(FakeBackend::returning(0.1));
        press(&mut app, &[KeyCode::Char('2')]);
        assert_eq!(app.screen, Screen::Form(Domain::Stroke));
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, Screen::Home);
        press(&mut app, &[KeyCode::Char('f')]);
        assert_eq!(app.screen, Screen::Feedback);
        press(&mut app, &[KeyCode::Esc, KeyCode::Char('a'), KeyCode::Down]);
        assert_eq!(app.screen, Screen::About);
        assert_eq!(app.about_scroll, 1);
        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, Screen::Home);
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_submit_round_trip() {
        let mut app = app(FakeBackend::returning(0.75));
        press(
            &mut app,
            &[KeyCode::Char('1'), KeyCode::Down, KeyCode::Right, KeyCode::Enter],
        );
        assert!(!app.forms[0].view.controller.is_submit_enabled());

        settle(&mut app);
        let controller = &app.forms[0].view.controller;
        assert!(controller.is_submit_enabled());
        assert_eq!(controller.value("age"), Some(FieldValue::Number(46.0)));
        assert_eq!(controller.result().map(|r| r.tier), Some(RiskTier::High));

        press(&mut app, &[KeyCode::Enter]);
        let controller = &app.forms[0].view.controller;
        assert!(controller.result().is_none());
        assert_eq!(controller.value("age"), Some(FieldValue::Number(45.0)));
    }

    #[test]
    fn test_leaving_result_discards_it() {
        let mut app = app(FakeBackend::returning(0.2));
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Enter]);
        settle(&mut app);
        assert_eq!(
            app.forms[0].view.controller.result().map(|r| r.tier),
            Some(RiskTier::Low)
        );

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, Screen::Home);
        assert!(app.forms[0].view.controller.result().is_none());

        press(&mut app, &[KeyCode::Char('1')]);
        assert_eq!(app.screen, Screen::Form(Domain::Chd));
        let controller = &app.forms[0].view.controller;
        assert!(controller.result().is_none());
        assert!(controller.notice().is_none());
        assert!(controller.is_submit_enabled());
    }

    #[test]
    fn test_failed_submission_shows_notice() {
        let mut app = app(FakeBackend::failing(PredictionFailed::status(502)));
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Enter]);
        settle(&mut app);

        let controller = &app.forms[2].view.controller;
        assert!(controller.result().is_none());
        assert_eq!(controller.notice(), Some(&Notice::PREDICTION_FAILED));
    }

    #[test]
    fn test_health_check_updates_status() {
        let mut app = app(FakeBackend::returning(0.5));
        press(&mut app, &[KeyCode::Char('h')]);
        settle(&mut app);
        assert_eq!(
            app.home_state.backend_status,
            BackendStatus::Healthy("healthy".to_string())
        );
    }

    #[test]
    fn test_feedback_submission() {
        let mut app = app(FakeBackend::returning(0.5));
        press(&mut app, &[KeyCode::Char('f')]);
        for text in ["Ada", "Forms", "Add units"] {
            for c in text.chars() {
                press(&mut app, &[KeyCode::Char(c)]);
            }
            press(&mut app, &[KeyCode::Enter]);
        }
        settle(&mut app);

        assert_eq!(app.feedback_state.form.notice(), Some(&Notice::FEEDBACK_SUBMITTED));
        assert_eq!(app.feedback_state.form.feedback(), &Feedback::default());
    }
}
