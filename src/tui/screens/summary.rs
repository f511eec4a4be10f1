//! Summary chart shown once the scan is done

use crate::presenter::SummaryChart;
use crate::session::MonitorSession;
use crate::tui::theme::Styles;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Padding},
    Frame,
};

const BAR_WIDTH: u16 = 9;
const BAR_GAP: u16 = 3;

fn chart_bars(chart: &SummaryChart) -> Vec<Bar<'static>> {
    chart
        .slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let (r, g, b) = slice.color;
            Bar::default()
                .value(slice.value)
                .label(Line::from(format!("#{}", i + 1)))
                .style(Style::default().fg(Color::Rgb(r, g, b)))
        })
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, session: &MonitorSession) {
    let Some(chart) = session.view().chart else {
        return;
    };

    let bars = chart_bars(&chart);
    let barchart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border())
                .title("SUMMARY")
                .padding(Padding::horizontal(2)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .value_style(Styles::emphasis());

    f.render_widget(barchart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::SizeFormat;
    use crate::transport::TransportEvent;
    use crate::tui::screens::test_support::render_to_string;
    use crate::tui::AppState;

    #[test]
    fn test_bars_follow_slices() {
        let chart = SummaryChart {
            slices: vec![
                crate::presenter::ChartSlice { value: 1, color: (255, 0, 0) },
                crate::presenter::ChartSlice { value: 2, color: (0, 255, 0) },
            ],
        };
        assert_eq!(chart_bars(&chart).len(), 2);
    }

    #[test]
    fn test_summary_replaces_progress_when_done() {
        let mut session = MonitorSession::new(SizeFormat::Legacy);
        session.handle(TransportEvent::Frame(
            r#"{"MsgType":"progress","Done":false,"ItemCount":5,"TotalSize":50}"#.into(),
        ));
        session.handle(TransportEvent::Frame(
            r#"{"MsgType":"progress","Done":true,"ItemCount":6,"TotalSize":60}"#.into(),
        ));

        let text = render_to_string(&session, &AppState::new("ws://x"));
        assert!(text.contains("\"Done\""));
        assert!(text.contains("SUMMARY"));
        assert!(text.contains("#1"));
        assert!(text.contains("#3"));
        assert!(!text.contains("Total items"));
    }
}
