//! Main TUI application state and logic

use crate::algorithms::{AlgorithmInfo, InputKind, Registry};
use crate::config::{CliOptions, Config, InputLimits};
use crate::error::{InputError, PlaybackError, TraceError};
use crate::input::{ArrayShape, InputGenerator, TraceInput};
use crate::materialize::Materializer;
use crate::playback::{PlaybackController, TickOutcome};
use crate::trace::StepData;
use crate::ui::panes::{self, DetailsRenderData, SourceScrollState, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Amount `[` and `]` change the input size by
const SIZE_STEP: usize = 5;

/// The main application state
pub struct App {
    registry: &'static Registry,
    materializer: Materializer<'static>,
    controller: PlaybackController,
    inputs: InputGenerator,

    algorithm: &'static AlgorithmInfo,
    shape: ArrayShape,
    size: usize,
    target: Option<i64>,
    start: usize,

    /// Raw input the current trace was generated from
    values: Vec<i64>,

    pub code_scroll: SourceScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_is_error: bool,

    /// Last time space was pressed (for debouncing)
    last_space_press: Instant,
}

impl App {
    /// Build the app from parsed options and load the first trace
    pub fn new(
        registry: &'static Registry,
        config: &Config,
        mut inputs: InputGenerator,
        options: &CliOptions,
    ) -> Result<Self, PlaybackError> {
        let algorithm = registry
            .get(&options.algorithm)
            .ok_or_else(|| InputError::UnknownAlgorithm(options.algorithm.clone()))
            .map_err(TraceError::from)?;
        let size = options.size.unwrap_or(config.input.default_size);
        let values = inputs
            .array(size, options.shape)
            .map_err(TraceError::from)?;

        let mut controller = PlaybackController::with_config(config);
        if let Some(speed_ms) = options.speed_ms {
            controller.set_speed(speed_ms)?;
        }

        let mut app = App {
            registry,
            materializer: Materializer::new(registry, config),
            controller,
            inputs,
            algorithm,
            shape: options.shape,
            size,
            target: options.target,
            start: options.start,
            values,
            code_scroll: SourceScrollState::default(),
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        };
        app.load()?;
        Ok(app)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Drive auto-advance from the event loop
            match self.controller.poll(Instant::now()) {
                TickOutcome::Advanced(_) => self.set_status("Playing..."),
                TickOutcome::Completed => self.set_status("Playback complete"),
                TickOutcome::Idle => {}
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn algorithm(&self) -> &'static AlgorithmInfo {
        self.algorithm
    }

    fn input_limits(&self) -> InputLimits {
        self.inputs.limits()
    }

    fn input_summary(&self) -> String {
        let values = format!("{} values, {}", self.values.len(), self.shape);
        match (self.algorithm.input_kind(), self.target) {
            (InputKind::Graph, _) => format!("sample graph, start node {}", self.start),
            (InputKind::Search, Some(target)) => format!("{}, target {}", values, target),
            (InputKind::Search, None) => format!("{}, middle target", values),
            (InputKind::Array, _) => values,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn report(&mut self, error: PlaybackError) {
        debug!(%error, "command failed");
        self.status_message = error.to_string();
        self.status_is_error = true;
    }

    // ========== Trace (re)generation ==========

    /// Materialize the selected algorithm over the current values
    fn load(&mut self) -> Result<(), PlaybackError> {
        let info = self.algorithm();
        let input = TraceInput::prepare(info.input_kind(), &self.values, self.target, self.start)
            .map_err(TraceError::from)?;
        self.controller.load(&self.materializer, info.id, &input)?;
        self.code_scroll = SourceScrollState::default();
        self.set_status(format!(
            "Loaded {} ({} steps)",
            info.name,
            self.controller.trace().len()
        ));
        Ok(())
    }

    fn reload(&mut self) {
        self.controller.invalidate();
        if let Err(e) = self.load() {
            self.report(e);
        }
    }

    fn regenerate_input(&mut self) {
        match self.inputs.array(self.size, self.shape) {
            Ok(values) => {
                self.values = values;
                self.reload();
            }
            Err(e) => self.report(TraceError::from(e).into()),
        }
    }

    fn select_algorithm(&mut self, forward: bool) {
        let count = self.registry.len();
        let position = self.registry.position(self.algorithm.id).unwrap_or(0);
        let next = if forward {
            (position + 1) % count
        } else {
            (position + count - 1) % count
        };
        if let Some(info) = self.registry.entry(next) {
            debug!(from = self.algorithm.id, to = info.id, "algorithm selected");
            self.algorithm = info;
            self.reload();
        }
    }

    fn resize_input(&mut self, grow: bool) {
        let limits = self.input_limits();
        let size = if grow {
            self.size.saturating_add(SIZE_STEP)
        } else {
            self.size.saturating_sub(SIZE_STEP)
        };
        self.size = size.clamp(limits.min_size, limits.max_size);
        self.regenerate_input();
    }

    fn change_speed(&mut self, faster: bool) {
        let limits = self.controller.speed_limits();
        let current = self.controller.speed_ms();
        let speed = if faster {
            current.saturating_sub(limits.step_ms)
        } else {
            current.saturating_add(limits.step_ms)
        }
        .clamp(limits.min_ms, limits.max_ms);

        match self.controller.set_speed(speed) {
            Ok(()) => self.set_status(format!("Speed: {} ms/step", speed)),
            Err(e) => self.report(e),
        }
    }

    // ========== Rendering ==========

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes above, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: visualization (top) | code (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        let info = self.algorithm();
        let step = self.controller.current_step();

        match step.map(|s| (&s.data, &s.highlights)) {
            Some((StepData::Array(values), highlights)) => {
                panes::render_array_pane(frame, left_rows[0], info.name, values, highlights);
            }
            Some((StepData::Graph(graph_frame), highlights)) => {
                panes::render_graph_pane(frame, left_rows[0], info.name, graph_frame, highlights);
            }
            None => {
                panes::render_array_pane(
                    frame,
                    left_rows[0],
                    info.name,
                    &[],
                    &Default::default(),
                );
            }
        }

        panes::render_source_pane(
            frame,
            left_rows[1],
            info.code,
            step.and_then(|s| s.line),
            true,
            &mut self.code_scroll,
        );

        let input_summary = self.input_summary();
        panes::render_details_pane(
            frame,
            columns[1],
            &DetailsRenderData {
                info,
                counters: self.controller.counters(),
                narration: step.and_then(|s| s.description.as_deref()),
                input_summary: &input_summary,
                speed_ms: self.controller.speed_ms(),
            },
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                is_error: self.status_is_error,
                current_index: self.controller.current_index(),
                total_steps: self.controller.trace().len(),
                phase: self.controller.phase(),
            },
        );
    }

    // ========== Input ==========

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Right => match self.controller.step_forward() {
                Ok(true) => self.set_status("Stepped forward"),
                Ok(false) => self.set_status("Already at the last step"),
                Err(e) => self.report(e),
            },
            KeyCode::Left => match self.controller.step_backward() {
                Ok(true) => self.set_status("Stepped backward"),
                Ok(false) => self.set_status("Already at the first step"),
                Err(e) => self.report(e),
            },
            KeyCode::Enter => {
                // Jump to the last step
                self.controller.pause();
                let last = self.controller.trace().last_index();
                match self.controller.seek(last) {
                    Ok(_) => self.set_status("Jumped to end"),
                    Err(e) => self.report(e),
                }
            }
            KeyCode::Backspace => {
                // Jump to the first step
                self.controller.pause();
                match self.controller.seek(0) {
                    Ok(_) => self.set_status("Jumped to start"),
                    Err(e) => self.report(e),
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(true),
            KeyCode::Char('-') => self.change_speed(false),
            KeyCode::Tab => self.select_algorithm(true),
            KeyCode::BackTab => self.select_algorithm(false),
            KeyCode::Char('g') => self.regenerate_input(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.shape = ArrayShape::ALL[index];
                self.regenerate_input();
            }
            KeyCode::Char('[') => self.resize_input(false),
            KeyCode::Char(']') => self.resize_input(true),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Up => {
                // Scrolling up makes the current line move down visually
                if let Some(row) = self.code_scroll.target_line_row {
                    self.code_scroll.target_line_row = Some(row.saturating_add(1));
                }
            }
            KeyCode::Down => {
                if let Some(row) = self.code_scroll.target_line_row {
                    self.code_scroll.target_line_row = Some(row.saturating_sub(1));
                }
            }
            _ => {}
        }
    }

    fn toggle_play(&mut self) {
        if self.controller.is_playing() {
            self.controller.pause();
            self.set_status("Paused");
        } else if self.controller.play() {
            self.set_status("Playing...");
        } else {
            self.set_status("Nothing to play");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::Phase;
    use crossterm::event::KeyModifiers;

    fn app(algorithm: &str) -> App {
        let config = Config::default();
        let options = CliOptions {
            algorithm: algorithm.to_string(),
            size: Some(8),
            seed: Some(3),
            ..CliOptions::default()
        };
        let inputs = InputGenerator::seeded(3, config.input);
        App::new(Registry::builtin(), &config, inputs, &options).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_loads_requested_algorithm() {
        let app = app("merge");
        assert_eq!(app.algorithm().id, "merge");
        assert_eq!(app.controller().phase(), Phase::Ready);
        assert!(app.controller().trace().len() > 1);
    }

    #[test]
    fn test_step_keys_move_the_index() {
        let mut app = app("bubble");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.controller().current_index(), 2);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.controller().current_index(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.controller().current_index(),
            app.controller().trace().last_index()
        );
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.controller().current_index(), 0);
    }

    #[test]
    fn test_stepping_while_playing_reports_error() {
        let mut app = app("bubble");
        press(&mut app, KeyCode::Char(' '));
        assert!(app.controller().is_playing());
        press(&mut app, KeyCode::Right);
        assert!(app.status_is_error);
        assert_eq!(app.controller().current_index(), 0);
    }

    #[test]
    fn test_tab_switches_algorithm_and_rewinds() {
        let mut app = app("merge");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.algorithm().id, "linear-search");
        assert_eq!(app.controller().current_index(), 0);
        assert_eq!(app.controller().phase(), Phase::Ready);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.algorithm().id, "merge");
    }

    #[test]
    fn test_size_keys_respect_limits() {
        let mut app = app("bubble");
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.values.len(), 5);
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.values.len(), 5);
    }
}
