//! Share history chart - delivered share per stepper over Z

use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use super::STEPPER_COLORS;
use crate::STEPPERS;

/// Samples kept for the chart
const HISTORY_LEN: usize = 512;

pub struct ShareHistory {
    samples: VecDeque<(f32, [f32; STEPPERS])>,
}

impl ShareHistory {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn last_z(&self) -> Option<f32> {
        self.samples.back().map(|&(z, _)| z)
    }

    pub fn push(&mut self, z: f32, shares: [f32; STEPPERS]) {
        if self.samples.len() == HISTORY_LEN {
            self.samples.pop_front();
        }
        self.samples.push_back((z, shares));
    }

    fn series(&self, stepper: usize) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|&(z, shares)| (z as f64, shares[stepper] as f64))
            .collect()
    }
}

pub fn render_history(frame: &mut Frame, area: Rect, history: &ShareHistory, height: f32) {
    let block = Block::default()
        .title(" Delivered share over Z ")
        .borders(Borders::ALL);

    let series: Vec<Vec<(f64, f64)>> = (0..STEPPERS).map(|i| history.series(i)).collect();
    let datasets = series
        .iter()
        .enumerate()
        .map(|(i, data)| {
            Dataset::default()
                .name(format!("E{i}"))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(STEPPER_COLORS[i % STEPPER_COLORS.len()]))
                .data(data)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Z mm")
                .bounds([0.0, height.max(f32::EPSILON) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
