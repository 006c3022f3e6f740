//! Drawing. The only module that touches the live surface: it reads the
//! panel descriptions and affordance state off [`App`] and renders them.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{
        Block, BorderType, Borders, Clear, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, PanelFocus};
use crate::panels::{Banner, PanelContent};
use crate::theme::{colors, spinner_frame, styles};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, frame.area());

    let has_banner = app.banner().is_some();
    let mut constraints = vec![Constraint::Length(3)]; // Input
    if has_banner {
        constraints.push(Constraint::Length(3)); // Banner
    }
    constraints.push(Constraint::Min(1)); // Panels
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(frame.area());

    draw_input(frame, app, chunks[0]);

    let mut next = 1;
    if let Some(banner) = app.banner() {
        draw_banner(frame, banner, chunks[next]);
        next += 1;
    }

    draw_panel_grid(frame, app, chunks[next]);
    draw_status_bar(frame, app, chunks[next + 1]);

    if app.notice().is_some() {
        draw_notice(frame, app);
    }
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let loading = app.is_loading();
    let border_style = if loading {
        Style::default().fg(colors::TEXT_MUTED)
    } else {
        Style::default().fg(colors::GREEN)
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled(" ❯ ", Style::default().fg(colors::PRIMARY)),
        Span::styled(
            app.input_text().to_string(),
            Style::default().fg(colors::TEXT_PRIMARY),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(Span::styled(" Task ", styles::panel_title()))),
    );

    frame.render_widget(input, area);

    // The draft stays editable while a request runs; only submit is locked.
    if app.notice().is_none() {
        let before_cursor: String = app
            .input_text()
            .chars()
            .take(app.input_cursor())
            .collect();
        let cursor_x = area.x + 4 + before_cursor.width() as u16;
        let cursor_y = area.y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_banner(frame: &mut Frame, banner: Banner, area: Rect) {
    let (text_style, border_color) = match banner {
        Banner::Proved => (styles::banner_proved(), colors::GREEN),
        Banner::NotProved => (styles::banner_not_proved(), colors::RED),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(banner.text(), text_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color)),
        );

    frame.render_widget(paragraph, area);
}

fn draw_panel_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Min(1)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    draw_panel(frame, app, top[0], " Formalization ", PanelFocus::Formalization);
    draw_panel(frame, app, top[1], " Engine Log ", PanelFocus::Log);
    draw_panel(frame, app, rows[1], " Explanation ", PanelFocus::Explanation);
}

fn panel_content<'a>(app: &'a App, panel: PanelFocus) -> &'a PanelContent {
    match panel {
        PanelFocus::Formalization => &app.panels().formalization,
        PanelFocus::Log => &app.panels().log,
        PanelFocus::Explanation => &app.panels().explanation,
    }
}

fn draw_panel(frame: &mut Frame, app: &mut App, area: Rect, title: &str, panel: PanelFocus) {
    let focused = app.focus() == panel;
    let border_style = if focused {
        Style::default().fg(colors::PRIMARY)
    } else {
        Style::default().fg(colors::TEXT_MUTED)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Line::from(Span::styled(
            title.to_string(),
            styles::panel_title(),
        )))
        .padding(Padding::horizontal(1));

    // Clone the description so scroll bookkeeping can borrow the app
    // mutably below.
    let content = panel_content(app, panel).clone();

    match content {
        PanelContent::Placeholder(text) => {
            app.update_scroll_max(panel, 0);
            let line = if app.is_loading() {
                Line::from(vec![
                    Span::styled(
                        spinner_frame(app.tick_count()),
                        Style::default().fg(colors::PRIMARY),
                    ),
                    Span::styled(format!(" {text}"), styles::placeholder()),
                ])
            } else {
                Line::from(Span::styled(text, styles::placeholder()))
            };
            let placeholder = Paragraph::new(vec![Line::from(""), line])
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(placeholder, area);
        }
        PanelContent::Body(text) => {
            let inner = block.inner(area);
            let total_lines = wrapped_line_count(&text.lines, inner.width);
            let visible_height = inner.height;

            let max_scroll = total_lines.saturating_sub(visible_height);
            app.update_scroll_max(panel, max_scroll);
            let scroll_offset = app.scroll_offset_from_top(panel);

            let paragraph = Paragraph::new(text)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((scroll_offset, 0));
            frame.render_widget(paragraph, area);

            if max_scroll > 0 {
                let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓"))
                    .track_symbol(Some("│"))
                    .thumb_symbol("█")
                    .style(Style::default().fg(colors::TEXT_MUTED));

                let mut scrollbar_state =
                    ScrollbarState::new(total_lines as usize).position(scroll_offset as usize);

                frame.render_stateful_widget(
                    scrollbar,
                    area.inner(Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut scrollbar_state,
                );
            }
        }
    }
}

fn wrapped_line_count(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let mut total: u16 = 0;

    for line in lines {
        let line_width = line.width();
        let rows = if line_width == 0 {
            1
        } else {
            ((line_width - 1) / width) + 1
        };
        total = total.saturating_add(rows as u16);
    }

    total
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left = if app.is_loading() {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{} Running the solver...", spinner_frame(app.tick_count())),
                Style::default().fg(colors::PRIMARY),
            ),
        ])
    } else {
        Line::from(vec![
            Span::raw(" "),
            Span::styled("Enter", styles::key_highlight()),
            Span::styled(" run  ", styles::key_hint()),
            Span::styled("Tab", styles::key_highlight()),
            Span::styled(" panels  ", styles::key_hint()),
            Span::styled("↑/↓", styles::key_highlight()),
            Span::styled(" scroll  ", styles::key_hint()),
            Span::styled("Esc", styles::key_highlight()),
            Span::styled(" quit ", styles::key_hint()),
        ])
    };

    let url = format!("{} ", app.server_url());
    let url_width = url.width() as u16;
    let left_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width.saturating_sub(url_width),
        height: area.height,
    };
    let url_area = Rect {
        x: area.x + area.width.saturating_sub(url_width),
        y: area.y,
        width: url_width,
        height: area.height,
    };

    frame.render_widget(Paragraph::new(left), left_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            url,
            Style::default().fg(colors::TEXT_MUTED),
        )))
        .alignment(Alignment::Right),
        url_area,
    );
}

fn draw_notice(frame: &mut Frame, app: &App) {
    let Some(message) = app.notice() else {
        return;
    };
    let area = frame.area();

    let popup_width = 56.min(area.width.saturating_sub(4)).max(20);
    let text_width = popup_width.saturating_sub(4).max(1);
    let message_lines: Vec<Line> = vec![Line::from(message.to_string())];
    let message_height = wrapped_line_count(&message_lines, text_width);
    let popup_height = (message_height + 4).min(area.height.saturating_sub(2));

    let popup_area = Rect {
        x: (area.width.saturating_sub(popup_width)) / 2,
        y: area.height / 3,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(colors::TEXT_PRIMARY),
    ))];
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "press any key",
        styles::key_hint(),
    )));

    let popup = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(colors::RED))
                .style(Style::default().bg(colors::BG_POPUP))
                .title(Line::from(Span::styled(
                    " Error ",
                    styles::banner_not_proved(),
                ))),
        );

    frame.render_widget(popup, popup_area);
}
