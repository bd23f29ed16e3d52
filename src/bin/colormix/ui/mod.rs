//! TUI module for colormix
//!
//! Shows where the simulated print is, what mix the planner is asking for
//! and what the stepper thread actually delivered.

mod history;
pub mod state;
mod steppers;
mod transport;

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use history::{render_history, ShareHistory};
use state::{ControlMessage, PlannerUpdate, StepperUpdate};
use steppers::render_steppers;
use transport::render_transport;

/// One color per stepper, in stepper order
pub const STEPPER_COLORS: [Color; 4] = [Color::Cyan, Color::Magenta, Color::Yellow, Color::White];

pub struct UiApp {
    planner_rx: Consumer<PlannerUpdate>,
    stepper_rx: Consumer<StepperUpdate>,
    control_tx: Producer<ControlMessage>,
    planner: PlannerUpdate,
    stepper: StepperUpdate,
    /// Tally at the last history sample
    sampled: StepperUpdate,
    history: ShareHistory,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        planner_rx: Consumer<PlannerUpdate>,
        stepper_rx: Consumer<StepperUpdate>,
        control_tx: Producer<ControlMessage>,
        initial: PlannerUpdate,
    ) -> Self {
        Self {
            planner_rx,
            stepper_rx,
            control_tx,
            planner: initial,
            stepper: StepperUpdate::default(),
            sampled: StepperUpdate::default(),
            history: ShareHistory::new(),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_updates();

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn poll_updates(&mut self) {
        while let Ok(update) = self.planner_rx.pop() {
            self.planner = update;
        }
        while let Ok(update) = self.stepper_rx.pop() {
            self.stepper = update;
        }

        // sample delivered shares at most once per planned layer
        if self.history.last_z() != Some(self.planner.z) {
            if let Some(shares) = self.stepper.shares_since(&self.sampled) {
                self.history.push(self.planner.z, shares);
                self.sampled = self.stepper;
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                let _ = self.control_tx.push(ControlMessage::TogglePause);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let _ = self.control_tx.push(ControlMessage::ResetPalette);
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Transport bar
                Constraint::Length(10), // Stepper bars
                Constraint::Min(8),     // Share history
                Constraint::Length(1),  // Help bar
            ])
            .split(frame.area());

        render_transport(frame, chunks[0], &self.planner, &self.stepper);
        render_steppers(frame, chunks[1], &self.planner, &self.stepper);
        render_history(frame, chunks[2], &self.history, self.planner.height);

        let help = Paragraph::new(" [Q] Quit  [Space] Pause/Resume  [R] Reset palette")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
