//! Transport bar widget - height, layer, tool, mode and run state

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{ActiveMode, PlannerUpdate, StepperUpdate};

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    planner: &PlannerUpdate,
    stepper: &StepperUpdate,
) {
    let block = Block::default().title(" colormix ").borders(Borders::ALL);

    let (symbol, state, state_color) = if planner.finished {
        ("■", "Done", Color::DarkGray)
    } else if planner.paused {
        ("⏸", "Paused", Color::Yellow)
    } else {
        ("▶", "Printing", Color::Green)
    };

    let mode_color = match planner.mode {
        ActiveMode::Tool => Color::White,
        ActiveMode::Gradient => Color::Cyan,
        ActiveMode::Random => Color::Magenta,
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {symbol} {state}  "),
            Style::default().fg(state_color),
        ),
        Span::styled(
            format!("Z {:.2}/{:.2} mm  ", planner.z, planner.height),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Layer {}/{}  ", planner.layer.min(planner.layers), planner.layers),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("T{}  ", planner.tool),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Mode: {}  ", planner.mode.label()),
            Style::default().fg(mode_color),
        ),
        Span::styled(
            format!("Mix {}  ", planner.mix),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Segments {}/{}", stepper.segments, planner.planned),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
