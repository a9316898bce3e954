use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use pokecache_core::utils::truncate_string;
use pokecache_core::{format_tenths, CatalogService, DetailRecord};

use crate::app::{App, AppState};

use super::styles;

/// Width of the name column in the list panel
const NAME_COLUMN_WIDTH: usize = 24;

pub fn render<S: CatalogService>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Search bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_search_bar(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  pokecache";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_search_bar<S: CatalogService>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let searching = matches!(app.state, AppState::Searching);

    let mut spans = vec![Span::styled(" / ", styles::highlight_style())];
    if app.search_input.is_empty() && !searching {
        spans.push(Span::styled("press / to search", styles::muted_style()));
    } else {
        spans.push(Span::styled(app.search_input.clone(), styles::search_style()));
        if searching {
            spans.push(Span::styled("_", styles::search_style()));
        }
    }
    if app.catalog.is_search_pending() {
        spans.push(Span::styled("  …", styles::muted_style()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(searching));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content<S: CatalogService>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_item_list(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn render_item_list<S: CatalogService>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let filtered = app.catalog.filtered_items();

    let items: Vec<ListItem> = filtered
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let id = item.item_id();
            let marker = if app.catalog.cached_detail(id).is_some() { "•" } else { " " };
            let line = Line::from(vec![
                Span::styled(format!("#{:<4}", id), styles::muted_style()),
                Span::raw(truncate_string(&item.display_name(), NAME_COLUMN_WIDTH)),
                Span::styled(format!(" {}", marker), styles::success_style()),
            ]);

            let style = if i == app.selection {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let title = if app.catalog.is_loading() {
        " Pokémon (loading…) ".to_string()
    } else if app.search_input.is_empty() {
        format!(" Pokémon ({}) ", filtered.len())
    } else {
        format!(" Pokémon ({}/{}) ", filtered.len(), app.catalog.items().len())
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let list = List::new(items).block(block);

    let mut state = ListState::default();
    if !filtered.is_empty() {
        state.select(Some(app.selection));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_detail<S: CatalogService>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (title, lines) = match app.selected_item() {
        Some(item) => {
            let id = item.item_id();
            let lines = match app.catalog.cached_detail(id) {
                Some(record) => detail_lines(record, app.catalog.detail_age(id)),
                None if app.catalog.is_detail_pending(id) => {
                    vec![Line::from(Span::styled("Loading…", styles::muted_style()))]
                }
                None => vec![Line::from(Span::styled(
                    "No details loaded. Press Enter to fetch.",
                    styles::muted_style(),
                ))],
            };
            (format!(" {} ", item.display_name()), lines)
        }
        None => (
            " Details ".to_string(),
            vec![Line::from(Span::styled("No matches", styles::muted_style()))],
        ),
    };

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_lines(record: &DetailRecord, age: Option<String>) -> Vec<Line<'static>> {
    let mut lines = vec![
        labeled("Number", format!("#{}", record.id)),
        labeled("Height", format!("{} m", format_tenths(record.height))),
        labeled("Weight", format!("{} kg", format_tenths(record.weight))),
        labeled("Types", record.types_display()),
    ];
    if let Some(xp) = record.base_experience {
        lines.push(labeled("Base XP", xp.to_string()));
    }
    if let Some(age) = age {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("Fetched {}", age), styles::muted_style())));
    }
    lines
}

fn labeled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", format!("{}:", label)), styles::highlight_style()),
        Span::raw(value),
    ])
}

fn render_status_bar<S: CatalogService>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let shortcuts = "[p]refetch | [q]uit";

    let (left_text, left_style) = match app.catalog.error_message() {
        Some(msg) => (format!(" {} [x] dismiss ", msg), styles::error_style()),
        None => (
            format!(" {} cached ", app.catalog.details().len()),
            styles::muted_style(),
        ),
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(status_line).style(styles::status_bar_style()), area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 17, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  pokecache", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("↑/↓", "Navigate list"),
        help_line("PgUp/PgDn", "Scroll a page"),
        help_line("Home/End", "First / last entry"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        help_line("/", "Search by name"),
        help_line("Enter", "Fetch selected details"),
        help_line("p", "Prefetch the next page"),
        help_line("x", "Dismiss error"),
        help_line("q", "Quit"),
        Line::from(""),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn help_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc.to_string(), styles::help_desc_style()),
    ])
}

fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
