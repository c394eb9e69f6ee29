use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::SessionView;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ErrorBanner, LandingPage, MessageList, TitleBar};

/// Splits the frame into title, banner, conversation and input rows.
pub fn layout(area: Rect, banner_height: u16, input_height: u16) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([
        Length(1),
        Length(banner_height),
        Min(0),
        Length(input_height),
    ])
    .areas(area)
}

pub fn draw_ui(frame: &mut Frame, view: SessionView<'_>, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();

    let mut banner = view.last_error.map(ErrorBanner::new);
    let banner_height = banner
        .as_ref()
        .map(|b| b.calculate_height(area.width))
        .unwrap_or(0);
    let input_height = tui.input_box.calculate_height(area.width);

    let [title_area, banner_area, main_area, input_area] =
        layout(area, banner_height, input_height);

    let mut title_bar = TitleBar::new(
        view.status_message.to_string(),
        tui.endpoint.clone(),
        tui.message_list.has_unseen_content(),
    );
    title_bar.render(frame, title_area);

    if let Some(banner) = banner.as_mut() {
        banner.render(frame, banner_area);
    }

    if view.history.is_empty() && !view.is_waiting {
        LandingPage::new(tui.endpoint.as_str()).render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            view.history,
            view.is_waiting,
            spinner_frame,
        )
        .render(frame, main_area);
    }

    tui.input_box.waiting = view.is_waiting;
    tui.input_box.render(frame, input_area);
}
