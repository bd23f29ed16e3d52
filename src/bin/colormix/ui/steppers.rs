//! Stepper bars - requested vs delivered share per stepper

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

use super::{
    state::{PlannerUpdate, StepperUpdate},
    STEPPER_COLORS,
};
use crate::STEPPERS;

fn percent(share: f32) -> u64 {
    (share * 100.0).round().clamp(0.0, 100.0) as u64
}

pub fn render_steppers(
    frame: &mut Frame,
    area: Rect,
    planner: &PlannerUpdate,
    stepper: &StepperUpdate,
) {
    let block = Block::default()
        .title(" Steppers: requested | delivered (%) ")
        .borders(Borders::ALL);

    let delivered = stepper.shares();
    let groups: Vec<BarGroup> = (0..STEPPERS)
        .map(|i| {
            let color = STEPPER_COLORS[i % STEPPER_COLORS.len()];
            let bars = [
                Bar::default()
                    .value(percent(planner.requested[i]))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color)),
                Bar::default()
                    .value(percent(delivered[i]))
                    .style(Style::default().fg(Color::DarkGray))
                    .value_style(Style::default().fg(Color::Black).bg(Color::DarkGray)),
            ];
            BarGroup::default()
                .label(Line::from(format!("E{i}")))
                .bars(&bars)
        })
        .collect();

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(5)
        .bar_gap(1)
        .group_gap(3)
        .max(100);
    for group in groups {
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}
