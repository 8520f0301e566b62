// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use sukima_app::{
    DateCell, DetailView, NavEntry, Preference, RouterCommand, RouterEvent, RouterState, Screen,
    SortOption, date_strip, open_detail,
};
use sukima_catalog::Catalog;
use time::Date;

pub const DEFAULT_MAP_REFRESH_DELAY: Duration = Duration::from_millis(100);

const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const DATE_STRIP_VISIBLE: usize = 10;
const DETAIL_SCROLL_STEP: u16 = 2;
const CURSOR_MARK: &str = "➤";
const FAVORED_MARK: &str = "♥";
const UNFAVORED_MARK: &str = "♡";

// External map widget seam: the router only ever asks for a viewport
// recompute and a recenter. A missing widget is the null handle.
pub trait MapHandle {
    fn notify_resize(&mut self);
    fn set_center(&mut self, center: sukima_app::MapPoint);
}

pub struct NullMapHandle;

impl MapHandle for NullMapHandle {
    fn notify_resize(&mut self) {}

    fn set_center(&mut self, _center: sukima_app::MapPoint) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    pub map_refresh_delay: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            map_refresh_delay: DEFAULT_MAP_REFRESH_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InternalEvent {
    MapRefresh { token: u64 },
    ClearStatus { token: u64 },
}

#[derive(Debug, Default)]
struct ViewData {
    detail: Option<DetailView>,
    detail_scroll: u16,
    card_cursor: usize,
    sheet_cursor: usize,
    pref_cursor: usize,
    fav_cursor: usize,
    date_strip: Vec<DateCell>,
    map_token: u64,
    status_token: u64,
}

pub fn run_app<M: MapHandle>(
    state: &mut RouterState,
    catalog: &Catalog,
    map: &mut M,
    today: Date,
    options: &UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData {
        date_strip: date_strip(today, state.date_window),
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();

    // A configured start screen may already be the map; the refresh its
    // activation requested happened before the loop existed.
    if state.screen == Screen::Map {
        request_map_refresh(&mut view_data, &internal_tx, options.map_refresh_delay);
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, catalog, map, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, catalog, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, catalog, &mut view_data, &internal_tx, options, key)
                    {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events<M: MapHandle>(
    state: &mut RouterState,
    catalog: &Catalog,
    map: &mut M,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::MapRefresh { token } if token == view_data.map_token => {
                map.notify_resize();
                if let Some(center) = catalog.map_center() {
                    map.set_center(center);
                }
            }
            InternalEvent::MapRefresh { .. } => {}
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(RouterCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

// The map container has no settled geometry until the screen change has
// rendered, so the resize notification is deferred by a fixed delay. The
// token drops a refresh that a later navigation superseded.
fn request_map_refresh(view_data: &mut ViewData, tx: &Sender<InternalEvent>, delay: Duration) {
    view_data.map_token = view_data.map_token.wrapping_add(1);
    let token = view_data.map_token;
    let sender = tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(InternalEvent::MapRefresh { token });
    });
}

fn schedule_status_clear(tx: &Sender<InternalEvent>, token: u64) {
    let sender = tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn apply_router_events(
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    options: &UiOptions,
    events: &[RouterEvent],
) {
    for event in events {
        match event {
            RouterEvent::MapRefreshRequested => {
                request_map_refresh(view_data, tx, options.map_refresh_delay);
            }
            RouterEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.wrapping_add(1);
                schedule_status_clear(tx, view_data.status_token);
            }
            _ => {}
        }
    }
}

fn dispatch_with_effects(
    state: &mut RouterState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    options: &UiOptions,
    command: RouterCommand,
) {
    let events = state.dispatch(command);
    apply_router_events(view_data, tx, options, &events);
}

fn open_detail_at(
    state: &mut RouterState,
    catalog: &Catalog,
    view_data: &mut ViewData,
    index: usize,
) {
    if let Some(view) = open_detail(state, catalog.jobs(), index) {
        view_data.detail_scroll = 0;
        view_data.detail = Some(view);
    }
}

fn handle_key_event(
    state: &mut RouterState,
    catalog: &Catalog,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if state.sort_sheet_open {
        handle_sort_sheet_key(state, view_data, internal_tx, options, key);
        return false;
    }

    let handled = match state.screen {
        Screen::Home => handle_home_key(state, catalog, view_data, internal_tx, options, key),
        Screen::Detail => handle_detail_key(state, catalog, view_data, internal_tx, options, key),
        Screen::Favorites => handle_favorites_key(state, catalog, view_data, key),
        Screen::LocationPreference => {
            handle_preference_key(state, view_data, internal_tx, options, key)
        }
        Screen::Work
        | Screen::Messages
        | Screen::MyPage
        | Screen::Map
        | Screen::LocationConfirm => false,
    };
    if handled {
        return false;
    }

    match key.code {
        KeyCode::Char('q') => true,
        KeyCode::Char(digit @ '1'..='5') => {
            let position = digit as usize - '1' as usize;
            if let Some(entry) = NavEntry::ALL.get(position) {
                dispatch_with_effects(
                    state,
                    view_data,
                    internal_tx,
                    options,
                    RouterCommand::SwitchTab(entry.screen()),
                );
            }
            false
        }
        KeyCode::Char('m') => {
            dispatch_with_effects(
                state,
                view_data,
                internal_tx,
                options,
                RouterCommand::GoToScreen(Screen::Map),
            );
            false
        }
        KeyCode::Char('e') => {
            dispatch_with_effects(
                state,
                view_data,
                internal_tx,
                options,
                RouterCommand::GoToScreen(Screen::LocationPreference),
            );
            false
        }
        KeyCode::Esc => {
            let home = state.active_nav.screen();
            if state.screen != home {
                dispatch_with_effects(
                    state,
                    view_data,
                    internal_tx,
                    options,
                    RouterCommand::GoToScreen(home),
                );
            }
            false
        }
        _ => false,
    }
}

fn handle_home_key(
    state: &mut RouterState,
    catalog: &Catalog,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.card_cursor =
                (view_data.card_cursor + 1).min(catalog.len().saturating_sub(1));
            true
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.card_cursor = view_data.card_cursor.saturating_sub(1);
            true
        }
        KeyCode::Left | KeyCode::Char('h') => {
            let target = state.selected_date.saturating_sub(1);
            dispatch_with_effects(
                state,
                view_data,
                internal_tx,
                options,
                RouterCommand::SelectDate(target),
            );
            true
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let target = state.selected_date + 1;
            dispatch_with_effects(
                state,
                view_data,
                internal_tx,
                options,
                RouterCommand::SelectDate(target),
            );
            true
        }
        KeyCode::Enter => {
            open_detail_at(state, catalog, view_data, view_data.card_cursor);
            true
        }
        KeyCode::Char('f') => {
            if view_data.card_cursor < catalog.len() {
                dispatch_with_effects(
                    state,
                    view_data,
                    internal_tx,
                    options,
                    RouterCommand::ToggleFavorite(view_data.card_cursor),
                );
            }
            true
        }
        KeyCode::Char('s') => {
            view_data.sheet_cursor = SortOption::ALL
                .iter()
                .position(|option| *option == state.sort)
                .unwrap_or(0);
            dispatch_with_effects(
                state,
                view_data,
                internal_tx,
                options,
                RouterCommand::OpenSortSheet,
            );
            true
        }
        _ => false,
    }
}

fn handle_detail_key(
    state: &mut RouterState,
    catalog: &Catalog,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.detail_scroll = view_data.detail_scroll.saturating_add(DETAIL_SCROLL_STEP);
            true
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.detail_scroll = view_data.detail_scroll.saturating_sub(DETAIL_SCROLL_STEP);
            true
        }
        KeyCode::Char(digit @ '1'..='3') => {
            let position = digit as usize - '1' as usize;
            // Similar cards carry their own catalog index; chained detail
            // navigation re-resolves through the catalog, not the slice.
            if let Some(detail) = &view_data.detail
                && let Some(similar) = detail.similar.get(position)
            {
                let target = similar.index;
                open_detail_at(state, catalog, view_data, target);
            }
            true
        }
        KeyCode::Char('f') => {
            if let Some(detail) = &view_data.detail {
                let index = detail.index;
                dispatch_with_effects(
                    state,
                    view_data,
                    internal_tx,
                    options,
                    RouterCommand::ToggleFavorite(index),
                );
            }
            true
        }
        _ => false,
    }
}

fn handle_favorites_key(
    state: &mut RouterState,
    catalog: &Catalog,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> bool {
    let count = state.favorites.len();
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.fav_cursor = (view_data.fav_cursor + 1).min(count.saturating_sub(1));
            true
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.fav_cursor = view_data.fav_cursor.saturating_sub(1);
            true
        }
        KeyCode::Enter => {
            if let Some(index) = state.favorites.iter().nth(view_data.fav_cursor).copied() {
                open_detail_at(state, catalog, view_data, index);
            }
            true
        }
        _ => false,
    }
}

fn handle_preference_key(
    state: &mut RouterState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.pref_cursor = (view_data.pref_cursor + 1).min(Preference::ALL.len() - 1);
            true
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.pref_cursor = view_data.pref_cursor.saturating_sub(1);
            true
        }
        KeyCode::Enter => {
            let preference = Preference::ALL[view_data.pref_cursor];
            dispatch_with_effects(
                state,
                view_data,
                internal_tx,
                options,
                RouterCommand::SelectPreference(preference),
            );
            true
        }
        _ => false,
    }
}

fn handle_sort_sheet_key(
    state: &mut RouterState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.sheet_cursor = (view_data.sheet_cursor + 1).min(SortOption::ALL.len() - 1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.sheet_cursor = view_data.sheet_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            let option = SortOption::ALL[view_data.sheet_cursor];
            dispatch_with_effects(
                state,
                view_data,
                internal_tx,
                options,
                RouterCommand::SelectSort(option),
            );
        }
        KeyCode::Esc | KeyCode::Char('s') => {
            dispatch_with_effects(
                state,
                view_data,
                internal_tx,
                options,
                RouterCommand::CloseSortSheet,
            );
        }
        _ => {}
    }
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    state: &RouterState,
    catalog: &Catalog,
    view_data: &ViewData,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let header = Paragraph::new(state.screen.title())
        .block(Block::default().title("sukima").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    let body_text = match state.screen {
        Screen::Home => render_home_text(state, catalog, view_data),
        Screen::Favorites => render_favorites_text(state, catalog, view_data),
        Screen::Work => render_work_text(),
        Screen::Messages => render_messages_text(),
        Screen::MyPage => render_my_page_text(state),
        Screen::Map => render_map_text(catalog),
        Screen::LocationPreference => render_location_preference_text(state, view_data),
        Screen::LocationConfirm => render_location_confirm_text(state),
        Screen::Detail => render_detail_text(state, view_data),
    };
    let scroll = if state.screen == Screen::Detail {
        view_data.detail_scroll
    } else {
        0
    };
    let body = Paragraph::new(body_text)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, layout[1]);

    let selected = NavEntry::ALL
        .iter()
        .position(|entry| *entry == state.active_nav)
        .unwrap_or(0);
    let nav_titles: Vec<String> = NavEntry::ALL
        .iter()
        .map(|entry| entry.label().to_owned())
        .collect();
    let nav = Tabs::new(nav_titles)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(nav, layout[2]);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);

    if state.sort_sheet_open {
        let area = centered_rect(50, 40, frame.area());
        frame.render_widget(Clear, area);
        let sheet = Paragraph::new(render_sort_sheet_text(state, view_data)).block(
            Block::default()
                .title("並び替え")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(sheet, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_date_strip_text(state: &RouterState, view_data: &ViewData) -> String {
    // Keep the selected cell inside the visible slice of the strip.
    let start = state
        .selected_date
        .saturating_sub(DATE_STRIP_VISIBLE.saturating_sub(1));
    view_data
        .date_strip
        .iter()
        .enumerate()
        .skip(start)
        .take(DATE_STRIP_VISIBLE)
        .map(|(index, cell)| {
            if index == state.selected_date {
                format!("「{} {}」", cell.label, cell.day)
            } else {
                format!(" {} {} ", cell.label, cell.day)
            }
        })
        .collect::<Vec<String>>()
        .join("")
}

fn render_home_text(state: &RouterState, catalog: &Catalog, view_data: &ViewData) -> String {
    let mut lines = vec![
        render_date_strip_text(state, view_data),
        format!(
            "並び替え: {}    エリア: {}",
            state.sort.label(),
            state.preference_label()
        ),
        String::new(),
    ];

    if catalog.is_empty() {
        lines.push("該当する求人がありません。".to_owned());
        return lines.join("\n");
    }

    for (index, job) in catalog.jobs().iter().enumerate() {
        let cursor = if index == view_data.card_cursor {
            CURSOR_MARK
        } else {
            " "
        };
        let favored = if state.favorites.contains(&index) {
            FAVORED_MARK
        } else {
            UNFAVORED_MARK
        };
        let badge = if job.urgent { "【締切間近】" } else { "" };
        lines.push(format!("{cursor} {favored} {}{badge}", job.title));
        lines.push(format!(
            "     🕒 {}  📍 {}  {}",
            job.time, job.place, job.price
        ));
    }
    lines.join("\n")
}

fn render_detail_text(state: &RouterState, view_data: &ViewData) -> String {
    let Some(detail) = &view_data.detail else {
        return "求人が選択されていません。".to_owned();
    };

    let favored = if state.favorites.contains(&detail.index) {
        FAVORED_MARK
    } else {
        UNFAVORED_MARK
    };

    let mut lines = vec![
        format!("{favored} {}", detail.title),
        format!("{}  /  🕒 {}", detail.price, detail.display_time),
        String::new(),
        format!("店舗名: {}", detail.shop_name),
        format!("住所: {}", detail.address),
        String::new(),
        "▌仕事内容".to_owned(),
        detail.description.clone(),
        String::new(),
        "▌備考".to_owned(),
        detail.notes.clone(),
        String::new(),
        "▌持ち物".to_owned(),
    ];
    lines.extend(numbered_list(&detail.items));
    lines.push(String::new());
    lines.push("▌応募条件".to_owned());
    lines.extend(numbered_list(&detail.conditions));

    if let Some(slots) = &detail.alternate_slots {
        lines.push(String::new());
        lines.push("▌他の日程".to_owned());
        for slot in slots {
            lines.push(format!(
                "{}({}) {}  {}  👤 {}",
                slot.date, slot.weekday, slot.time, slot.price, slot.capacity
            ));
        }
    }

    lines.push(String::new());
    lines.push("▌レビュー".to_owned());
    if detail.reviews.is_empty() {
        lines.push(sukima_app::NO_REVIEWS_PLACEHOLDER.to_owned());
    } else {
        for review in &detail.reviews {
            lines.push(format!("{} ({})", review.user, review.date));
            lines.push(format!("  {}", review.text));
        }
    }

    lines.push(String::new());
    lines.push("▌類似の求人".to_owned());
    for (position, similar) in detail.similar.iter().enumerate() {
        lines.push(format!(
            "[{}] {}  🕒 {}  📍 {}  {}",
            position + 1,
            similar.title,
            similar.display_time,
            similar.place,
            similar.price
        ));
    }

    lines.join("\n")
}

// Absent lists render as empty lists, not as an error.
fn numbered_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| format!("{}. {item}", position + 1))
        .collect()
}

fn render_favorites_text(state: &RouterState, catalog: &Catalog, view_data: &ViewData) -> String {
    if state.favorites.is_empty() {
        return "お気に入りはまだありません。".to_owned();
    }

    // BTreeSet iteration keeps catalog order.
    state
        .favorites
        .iter()
        .enumerate()
        .filter_map(|(position, index)| {
            catalog.get(*index).map(|job| {
                let cursor = if position == view_data.fav_cursor {
                    CURSOR_MARK
                } else {
                    " "
                };
                format!(
                    "{cursor} {FAVORED_MARK} {}  🕒 {}  📍 {}  {}",
                    job.title, job.time, job.place, job.price
                )
            })
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn render_work_text() -> String {
    "予定されているお仕事はありません。\nさがす画面から応募すると、ここに表示されます。".to_owned()
}

fn render_messages_text() -> String {
    "メッセージはまだありません。".to_owned()
}

fn render_my_page_text(state: &RouterState) -> String {
    [
        format!("希望エリア: {}", state.preference_label()),
        format!("並び替え設定: {}", state.sort.label()),
        format!("お気に入り: {}件", state.favorites.len()),
    ]
    .join("\n")
}

fn render_map_text(catalog: &Catalog) -> String {
    let Some(center) = catalog.map_center() else {
        return "マップ情報がありません。".to_owned();
    };

    let mut lines = vec![format!("中心: ({:.4}, {:.4})", center.lat, center.lng)];
    for pin in catalog.map_pins() {
        lines.push(format!("📍 {} ({:.4}, {:.4})", pin.title, pin.lat, pin.lng));
    }
    lines.join("\n")
}

fn render_location_preference_text(state: &RouterState, view_data: &ViewData) -> String {
    let mut lines = vec!["はたらきたいエリアを選択してください。".to_owned(), String::new()];
    for (position, preference) in Preference::ALL.iter().enumerate() {
        let cursor = if position == view_data.pref_cursor {
            CURSOR_MARK
        } else {
            " "
        };
        let selected = if state.preference == Some(*preference) {
            "✓"
        } else {
            " "
        };
        lines.push(format!("{cursor} {selected} {}", preference.label()));
    }
    lines.join("\n")
}

fn render_location_confirm_text(state: &RouterState) -> String {
    format!(
        "エリアを設定しました: {}\n\nEsc で戻る",
        state.preference_label()
    )
}

fn render_sort_sheet_text(state: &RouterState, view_data: &ViewData) -> String {
    SortOption::ALL
        .iter()
        .enumerate()
        .map(|(position, option)| {
            let cursor = if position == view_data.sheet_cursor {
                CURSOR_MARK
            } else {
                " "
            };
            let selected = if *option == state.sort { "●" } else { "○" };
            format!("{cursor} {selected} {}", option.label())
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn status_text(state: &RouterState) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    key_hint(state).to_owned()
}

fn key_hint(state: &RouterState) -> &'static str {
    if state.sort_sheet_open {
        return "j/k: 選択  Enter: 決定  Esc: 閉じる";
    }
    match state.screen {
        Screen::Home => "j/k: 選択  Enter: 詳細  h/l: 日付  f: ♥  s: 並び替え  e: エリア  m: マップ  q: 終了",
        Screen::Detail => "j/k: スクロール  1-3: 類似の求人  f: ♥  Esc: 戻る",
        Screen::Favorites => "j/k: 選択  Enter: 詳細  1-5: タブ  q: 終了",
        Screen::LocationPreference => "j/k: 選択  Enter: 決定  Esc: 戻る",
        Screen::Map | Screen::LocationConfirm => "Esc: 戻る  1-5: タブ  q: 終了",
        Screen::Work | Screen::Messages | Screen::MyPage => "1-5: タブ  m: マップ  q: 終了",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        InternalEvent, MapHandle, UiOptions, ViewData, apply_router_events, handle_key_event,
        open_detail_at, process_internal_events, render_date_strip_text, render_detail_text,
        render_favorites_text, render_home_text, render_location_preference_text, render_map_text,
        render_my_page_text, render_sort_sheet_text, request_map_refresh, status_text,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc;
    use std::time::Duration;
    use sukima_app::{
        DATE_WINDOW, MapPoint, NavEntry, Preference, RouterCommand, RouterState, Screen,
        SortOption, date_strip,
    };
    use sukima_catalog::Catalog;
    use sukima_testkit::{catalog_without_map, sample_catalog};
    use time::{Date, Month};

    #[derive(Debug, Default)]
    struct TestMapHandle {
        resizes: usize,
        centers: Vec<MapPoint>,
    }

    impl MapHandle for TestMapHandle {
        fn notify_resize(&mut self) {
            self.resizes += 1;
        }

        fn set_center(&mut self, center: MapPoint) {
            self.centers.push(center);
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_data() -> ViewData {
        let today = Date::from_calendar_date(2026, Month::August, 3).expect("valid date");
        ViewData {
            date_strip: date_strip(today, DATE_WINDOW),
            ..ViewData::default()
        }
    }

    fn press(
        state: &mut RouterState,
        catalog: &Catalog,
        view: &mut ViewData,
        code: KeyCode,
    ) -> bool {
        let (tx, _rx) = mpsc::channel();
        handle_key_event(state, catalog, view, &tx, &UiOptions::default(), key(code))
    }

    #[test]
    fn ctrl_q_and_plain_q_quit() {
        let catalog = sample_catalog(3);
        let mut state = RouterState::default();
        let mut view = view_data();
        let (tx, _rx) = mpsc::channel();

        assert!(handle_key_event(
            &mut state,
            &catalog,
            &mut view,
            &tx,
            &UiOptions::default(),
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        ));
        assert!(press(&mut state, &catalog, &mut view, KeyCode::Char('q')));
    }

    #[test]
    fn digit_keys_switch_tabs_and_highlight() {
        let catalog = sample_catalog(3);
        let mut state = RouterState::default();
        let mut view = view_data();

        press(&mut state, &catalog, &mut view, KeyCode::Char('2'));
        assert_eq!(state.screen, Screen::Favorites);
        assert_eq!(state.active_nav, NavEntry::Favorites);

        press(&mut state, &catalog, &mut view, KeyCode::Char('5'));
        assert_eq!(state.screen, Screen::MyPage);
        assert_eq!(state.active_nav, NavEntry::MyPage);
    }

    #[test]
    fn enter_on_home_opens_the_cursor_card() {
        let catalog = sample_catalog(5);
        let mut state = RouterState::default();
        let mut view = view_data();

        press(&mut state, &catalog, &mut view, KeyCode::Char('j'));
        press(&mut state, &catalog, &mut view, KeyCode::Char('j'));
        press(&mut state, &catalog, &mut view, KeyCode::Enter);

        assert_eq!(state.screen, Screen::Detail);
        let detail = view.detail.as_ref().expect("detail assembled");
        assert_eq!(detail.index, 2);
        // Detail entry must not move the nav highlight.
        assert_eq!(state.active_nav, NavEntry::Home);
    }

    #[test]
    fn enter_on_empty_catalog_changes_nothing() {
        let catalog = Catalog::from_parts(Vec::new(), None, Vec::new());
        let mut state = RouterState::default();
        let mut view = view_data();

        press(&mut state, &catalog, &mut view, KeyCode::Enter);
        assert_eq!(state.screen, Screen::Home);
        assert!(view.detail.is_none());
    }

    #[test]
    fn similar_digit_reopens_by_catalog_index() {
        let catalog = sample_catalog(5);
        let mut state = RouterState::default();
        let mut view = view_data();

        view.card_cursor = 2;
        press(&mut state, &catalog, &mut view, KeyCode::Enter);
        press(&mut state, &catalog, &mut view, KeyCode::Char('2'));

        let detail = view.detail.as_ref().expect("detail assembled");
        assert_eq!(detail.index, 1);
        assert_eq!(state.screen, Screen::Detail);
    }

    #[test]
    fn esc_returns_to_the_highlighted_tab_screen() {
        let catalog = sample_catalog(3);
        let mut state = RouterState::default();
        let mut view = view_data();

        press(&mut state, &catalog, &mut view, KeyCode::Char('2'));
        open_detail_at(&mut state, &catalog, &mut view, 0);
        assert_eq!(state.screen, Screen::Detail);

        press(&mut state, &catalog, &mut view, KeyCode::Esc);
        assert_eq!(state.screen, Screen::Favorites);
        assert_eq!(state.active_nav, NavEntry::Favorites);
    }

    #[test]
    fn sort_sheet_flow_selects_and_closes_together() {
        let catalog = sample_catalog(3);
        let mut state = RouterState::default();
        let mut view = view_data();

        press(&mut state, &catalog, &mut view, KeyCode::Char('s'));
        assert!(state.sort_sheet_open);

        press(&mut state, &catalog, &mut view, KeyCode::Char('j'));
        press(&mut state, &catalog, &mut view, KeyCode::Enter);
        assert_eq!(state.sort, SortOption::HighWage);
        assert!(!state.sort_sheet_open);
    }

    #[test]
    fn preference_flow_lands_on_location_confirm() {
        let catalog = sample_catalog(3);
        let mut state = RouterState::default();
        let mut view = view_data();

        press(&mut state, &catalog, &mut view, KeyCode::Char('e'));
        assert_eq!(state.screen, Screen::LocationPreference);

        press(&mut state, &catalog, &mut view, KeyCode::Char('j'));
        press(&mut state, &catalog, &mut view, KeyCode::Enter);
        assert_eq!(state.preference, Some(Preference::Shinjuku));
        assert_eq!(state.screen, Screen::LocationConfirm);
        assert_eq!(state.preference_label(), "新宿");
    }

    #[test]
    fn favorites_screen_opens_the_selected_favorite() {
        let catalog = sample_catalog(5);
        let mut state = RouterState::default();
        let mut view = view_data();

        view.card_cursor = 3;
        press(&mut state, &catalog, &mut view, KeyCode::Char('f'));
        view.card_cursor = 1;
        press(&mut state, &catalog, &mut view, KeyCode::Char('f'));

        press(&mut state, &catalog, &mut view, KeyCode::Char('2'));
        press(&mut state, &catalog, &mut view, KeyCode::Char('j'));
        press(&mut state, &catalog, &mut view, KeyCode::Enter);

        // Favorites iterate in catalog order: {1, 3}, cursor 1 → index 3.
        let detail = view.detail.as_ref().expect("detail assembled");
        assert_eq!(detail.index, 3);
    }

    #[test]
    fn map_refresh_is_requested_and_delivered() {
        let catalog = sample_catalog(3);
        let mut state = RouterState::default();
        let mut view = view_data();
        let mut map = TestMapHandle::default();
        let (tx, rx) = mpsc::channel();
        let options = UiOptions {
            map_refresh_delay: Duration::ZERO,
        };

        let events = state.dispatch(RouterCommand::GoToScreen(Screen::Map));
        apply_router_events(&mut view, &tx, &options, &events);

        let event = rx
            .recv_timeout(Duration::from_secs(1))
            .expect("deferred refresh fires");
        assert_eq!(event, InternalEvent::MapRefresh { token: view.map_token });

        tx.send(event).expect("channel open");
        process_internal_events(&mut state, &catalog, &mut map, &mut view, &rx);
        assert_eq!(map.resizes, 1);
        assert_eq!(map.centers.len(), 1);
        assert!((map.centers[0].lat - 35.658).abs() < 1e-9);
    }

    #[test]
    fn superseded_map_refresh_is_dropped() {
        let catalog = sample_catalog(3);
        let mut state = RouterState::default();
        let mut view = view_data();
        let mut map = TestMapHandle::default();
        let (tx, rx) = mpsc::channel();

        // A long delay keeps the sleeper threads quiet for the test body.
        request_map_refresh(&mut view, &tx, Duration::from_secs(60));
        let stale = view.map_token;
        request_map_refresh(&mut view, &tx, Duration::from_secs(60));

        tx.send(InternalEvent::MapRefresh { token: stale })
            .expect("channel open");
        process_internal_events(&mut state, &catalog, &mut map, &mut view, &rx);
        assert_eq!(map.resizes, 0);
        assert!(map.centers.is_empty());
    }

    #[test]
    fn map_refresh_without_center_still_notifies_resize() {
        let catalog = catalog_without_map(2);
        let mut state = RouterState::default();
        let mut view = view_data();
        let mut map = TestMapHandle::default();
        let (tx, rx) = mpsc::channel();

        request_map_refresh(&mut view, &tx, Duration::from_secs(60));
        tx.send(InternalEvent::MapRefresh {
            token: view.map_token,
        })
        .expect("channel open");
        process_internal_events(&mut state, &catalog, &mut map, &mut view, &rx);
        assert_eq!(map.resizes, 1);
        assert!(map.centers.is_empty());
    }

    #[test]
    fn home_text_marks_cursor_selection_and_badges() {
        let catalog = sample_catalog(4);
        let state = RouterState::default();
        let mut view = view_data();
        view.card_cursor = 1;

        let text = render_home_text(&state, &catalog, &view);
        assert!(text.contains("「今日 3」"));
        assert!(text.contains("並び替え: おすすめ順"));
        assert!(text.contains("エリア: 未設定"));
        assert!(text.contains("➤ ♡ コンビニ品出し"));
        assert!(text.contains("【締切間近】"));
    }

    #[test]
    fn date_strip_text_moves_the_single_selection() {
        let mut state = RouterState::default();
        let view = view_data();

        state.dispatch(RouterCommand::SelectDate(2));
        let text = render_date_strip_text(&state, &view);
        assert!(!text.contains("「今日"));
        assert_eq!(text.matches('「').count(), 1);
    }

    #[test]
    fn detail_text_shows_fallbacks_and_sections() {
        let catalog = sample_catalog(5);
        let mut state = RouterState::default();
        let mut view = view_data();
        view.card_cursor = 1;

        let (tx, _rx) = mpsc::channel();
        handle_key_event(
            &mut state,
            &catalog,
            &mut view,
            &tx,
            &UiOptions::default(),
            key(KeyCode::Enter),
        );

        let text = render_detail_text(&state, &view);
        // Record 1 has no description and carries a review.
        assert!(text.contains("詳細情報なし"));
        assert!(text.contains("ワーカー1"));
        assert!(text.contains("[1]"));
        assert!(text.contains("[3]"));
    }

    #[test]
    fn detail_text_gates_alternate_slots_on_the_flag() {
        let catalog = sample_catalog(5);
        let mut state = RouterState::default();
        let mut view = view_data();

        // Record 0 is flagged; its price appears in the second slot.
        open_detail_at(&mut state, &catalog, &mut view, 0);
        let flagged = render_detail_text(&state, &view);
        assert!(flagged.contains("他の日程"));
        let price = catalog.get(0).expect("record 0").price.clone();
        assert!(flagged.matches(&price).count() >= 2);

        // Record 1 is not flagged.
        open_detail_at(&mut state, &catalog, &mut view, 1);
        let unflagged = render_detail_text(&state, &view);
        assert!(!unflagged.contains("他の日程"));
    }

    #[test]
    fn detail_text_uses_review_placeholder_when_empty() {
        let catalog = sample_catalog(1);
        let mut state = RouterState::default();
        let mut view = view_data();

        press(&mut state, &catalog, &mut view, KeyCode::Enter);
        let text = render_detail_text(&state, &view);
        assert!(text.contains("まだレビューはありません。"));
    }

    #[test]
    fn favorites_text_lists_in_catalog_order() {
        let catalog = sample_catalog(5);
        let mut state = RouterState::default();
        state.dispatch(RouterCommand::ToggleFavorite(4));
        state.dispatch(RouterCommand::ToggleFavorite(0));
        let view = view_data();

        let text = render_favorites_text(&state, &catalog, &view);
        let first = text
            .find(&catalog.get(0).expect("record 0").title)
            .expect("record 0 listed");
        let second = text
            .find(&catalog.get(4).expect("record 4").title)
            .expect("record 4 listed");
        assert!(first < second);
    }

    #[test]
    fn empty_state_texts_render_placeholders() {
        let state = RouterState::default();
        let view = view_data();
        let empty = Catalog::from_parts(Vec::new(), None, Vec::new());

        assert!(render_favorites_text(&state, &empty, &view).contains("お気に入りはまだ"));
        assert!(render_home_text(&state, &empty, &view).contains("該当する求人がありません"));
        assert!(render_map_text(&empty).contains("マップ情報がありません"));
    }

    #[test]
    fn map_text_lists_center_and_pins() {
        let catalog = sample_catalog(2);
        let text = render_map_text(&catalog);
        assert!(text.contains("中心: (35.6580, 139.7016)"));
        assert!(text.contains("📍 カフェホールスタッフ"));
    }

    #[test]
    fn my_page_text_reflects_preference_and_sort() {
        let mut state = RouterState::default();
        state.dispatch(RouterCommand::SelectPreference(Preference::Shibuya));
        state.dispatch(RouterCommand::SelectSort(SortOption::Newest));

        let text = render_my_page_text(&state);
        assert!(text.contains("希望エリア: 渋谷"));
        assert!(text.contains("並び替え設定: 新着順"));
    }

    #[test]
    fn sheet_and_preference_texts_mark_exactly_one_selection() {
        let mut state = RouterState::default();
        let view = view_data();

        state.dispatch(RouterCommand::SelectSort(SortOption::Nearby));
        let sheet = render_sort_sheet_text(&state, &view);
        assert_eq!(sheet.matches('●').count(), 1);
        assert_eq!(sheet.matches('○').count(), SortOption::ALL.len() - 1);

        state.dispatch(RouterCommand::SelectPreference(Preference::Meguro));
        let prefs = render_location_preference_text(&state, &view);
        assert_eq!(prefs.matches('✓').count(), 1);
    }

    #[test]
    fn status_text_prefers_the_status_line() {
        let mut state = RouterState::default();
        assert!(status_text(&state).contains("Enter: 詳細"));

        state.dispatch(RouterCommand::ToggleFavorite(0));
        assert_eq!(status_text(&state), "お気に入りに追加しました");
    }
}
