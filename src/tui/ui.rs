use crate::core::state::{App, MainContent};
use crate::tui::component::Component;
use crate::tui::components::{
    CommentFormView, PostDetailsView, PostsList, SPINNER, TitleBar, UserSelector, comment_form,
};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Key hints for the footer, by focus.
pub fn key_hints(focus: Focus, selector_open: bool) -> &'static str {
    match focus {
        Focus::Users if selector_open => "↑↓ move · Enter choose · Esc close",
        Focus::Users => "Enter open list · x clear · Tab next · q quit",
        Focus::Posts => "↑↓ move · Enter open/close · Esc close post · Tab next · q quit",
        Focus::Comments => "↑↓ move · d delete · Esc close post · Tab next · q quit",
        Focus::Name | Focus::Email | Focus::Body => {
            "Enter add · Ctrl+L clear · Esc leave form · Tab next"
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min, Percentage};
    let [title_area, body_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar::new(
        tui.api_url.clone(),
        app.status_message.clone(),
        app.is_loading(),
        spinner_frame,
    )
    .render(frame, title_area);

    let details = app.selected_post.as_ref().zip(app.details.as_ref());
    let (left_area, right_area) = if details.is_some() {
        let [left, right] = Layout::horizontal([Percentage(45), Percentage(55)]).areas(body_area);
        (left, Some(right))
    } else {
        (body_area, None)
    };

    let [selector_area, main_area] = Layout::vertical([Length(3), Min(0)]).areas(left_area);
    draw_main_content(frame, main_area, app, tui, spinner_frame);

    match (details, right_area) {
        (Some((post, details)), Some(area)) => {
            let [details_area, form_area] =
                Layout::vertical([Min(0), Length(comment_form::FORM_HEIGHT)]).areas(area);
            let cursor = (tui.focus == Focus::Comments).then_some(tui.comment_cursor);
            PostDetailsView {
                post,
                details,
                cursor,
                follow_cursor: tui.follow_comment,
                scroll: &mut tui.details_scroll,
                spinner_frame,
            }
            .render(frame, details_area);
            tui.follow_comment = false;

            CommentFormView {
                form: &details.form,
                focused: tui.focus.field(),
                field_areas: &mut tui.form_areas,
                button_areas: &mut tui.form_buttons,
            }
            .render(frame, form_area);
        }
        _ => {
            tui.form_areas = [Rect::default(); 3];
            tui.form_buttons = [Rect::default(); 2];
        }
    }

    let hints = Paragraph::new(key_hints(tui.focus, tui.user_selector.is_open))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, footer_area);

    // Last, so the open menu draws over everything else
    UserSelector::new(
        &mut tui.user_selector,
        &app.users,
        app.selected_user.as_ref(),
        tui.focus == Focus::Users,
    )
    .render(frame, selector_area);
}

fn draw_main_content(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    let content = app.main_content();
    if content != MainContent::Posts {
        tui.posts_area = Rect::default();
    }

    let (text, color) = match content {
        MainContent::Posts => {
            let posts = app.posts.as_deref().unwrap_or_default();
            tui.posts_area = area;
            PostsList {
                posts,
                selected: app.selected_post_id(),
                state: &mut tui.posts_table,
                focused: tui.focus == Focus::Posts,
            }
            .render(frame, area);
            return;
        }
        MainContent::Loading => (
            format!("{} Loading...", SPINNER[spinner_frame % SPINNER.len()]),
            Color::Cyan,
        ),
        MainContent::Error => ("Something went wrong!".to_string(), Color::Red),
        MainContent::NoUserSelected => ("No user selected".to_string(), Color::Gray),
        MainContent::NoPosts => ("No posts yet".to_string(), Color::Yellow),
    };

    let mut lines = Vec::with_capacity(2);
    // With no user picked, loader and failure notices sit under the prompt
    if app.selected_user.is_none() && content != MainContent::NoUserSelected {
        lines.push(Line::styled("No user selected", Style::default().fg(Color::Gray)));
    }
    lines.push(Line::styled(text, Style::default().fg(color)));

    let notice = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(notice, area);
}
