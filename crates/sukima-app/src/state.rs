// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::{NavEntry, Preference, Screen, SortOption};

pub const DATE_WINDOW: usize = 30;

pub const PREFERENCE_UNSET_LABEL: &str = "未設定";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterState {
    pub screen: Screen,
    pub active_nav: NavEntry,
    pub sort: SortOption,
    pub sort_sheet_open: bool,
    pub preference: Option<Preference>,
    pub selected_date: usize,
    pub date_window: usize,
    pub favorites: BTreeSet<usize>,
    pub status_line: Option<String>,
}

impl Default for RouterState {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            active_nav: NavEntry::Home,
            sort: SortOption::Recommended,
            sort_sheet_open: false,
            preference: None,
            selected_date: 0,
            date_window: DATE_WINDOW,
            favorites: BTreeSet::new(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterCommand {
    GoToScreen(Screen),
    SwitchTab(Screen),
    OpenSortSheet,
    CloseSortSheet,
    SelectSort(SortOption),
    SelectPreference(Preference),
    SelectDate(usize),
    ToggleFavorite(usize),
    ShowDetail,
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent {
    ScreenChanged(Screen),
    NavChanged(NavEntry),
    MapRefreshRequested,
    SortChanged(SortOption),
    SortSheetToggled(bool),
    PreferenceChanged(Preference),
    DateChanged(usize),
    FavoriteToggled { index: usize, favored: bool },
    StatusUpdated(String),
    StatusCleared,
}

impl RouterState {
    pub fn dispatch(&mut self, command: RouterCommand) -> Vec<RouterEvent> {
        match command {
            RouterCommand::GoToScreen(screen) => self.go_to(screen),
            RouterCommand::SwitchTab(screen) => {
                let mut events = self.go_to(screen);
                if let Some(entry) = screen.nav_entry()
                    && entry != self.active_nav
                {
                    self.active_nav = entry;
                    events.push(RouterEvent::NavChanged(entry));
                }
                events
            }
            RouterCommand::OpenSortSheet => self.set_sort_sheet(true),
            RouterCommand::CloseSortSheet => self.set_sort_sheet(false),
            RouterCommand::SelectSort(option) => {
                self.sort = option;
                let mut events = vec![RouterEvent::SortChanged(option)];
                events.extend(self.set_sort_sheet(false));
                events
            }
            RouterCommand::SelectPreference(preference) => {
                self.preference = Some(preference);
                let mut events = vec![RouterEvent::PreferenceChanged(preference)];
                events.extend(self.go_to(Screen::LocationConfirm));
                events
            }
            RouterCommand::SelectDate(index) => {
                if index >= self.date_window {
                    return Vec::new();
                }
                self.selected_date = index;
                vec![RouterEvent::DateChanged(index)]
            }
            RouterCommand::ToggleFavorite(index) => {
                let favored = self.favorites.insert(index);
                if !favored {
                    self.favorites.remove(&index);
                }
                let label = if favored {
                    "お気に入りに追加しました"
                } else {
                    "お気に入りから削除しました"
                };
                vec![
                    RouterEvent::FavoriteToggled { index, favored },
                    self.set_status(label),
                ]
            }
            RouterCommand::ShowDetail => self.go_to(Screen::Detail),
            RouterCommand::ClearStatus => {
                self.status_line = None;
                vec![RouterEvent::StatusCleared]
            }
        }
    }

    // String-addressed entry point for callers holding screen names
    // (config, menus). Unknown names leave everything untouched.
    pub fn go_to_screen_named(&mut self, name: &str) -> Vec<RouterEvent> {
        match Screen::parse(name) {
            Some(screen) => self.dispatch(RouterCommand::GoToScreen(screen)),
            None => Vec::new(),
        }
    }

    pub fn switch_tab_named(&mut self, name: &str) -> Vec<RouterEvent> {
        match Screen::parse(name) {
            Some(screen) => self.dispatch(RouterCommand::SwitchTab(screen)),
            None => Vec::new(),
        }
    }

    pub fn preference_label(&self) -> &'static str {
        self.preference
            .map(Preference::label)
            .unwrap_or(PREFERENCE_UNSET_LABEL)
    }

    fn go_to(&mut self, screen: Screen) -> Vec<RouterEvent> {
        self.screen = screen;
        let mut events = vec![RouterEvent::ScreenChanged(screen)];
        if screen == Screen::Map {
            // The map widget recomputes its viewport on resize, and the
            // container has no final geometry until the screen change has
            // rendered; the view layer owes it a deferred resize+recenter.
            events.push(RouterEvent::MapRefreshRequested);
        }
        events
    }

    fn set_sort_sheet(&mut self, open: bool) -> Vec<RouterEvent> {
        if self.sort_sheet_open == open {
            return Vec::new();
        }
        self.sort_sheet_open = open;
        vec![RouterEvent::SortSheetToggled(open)]
    }

    fn set_status(&mut self, message: &str) -> RouterEvent {
        self.status_line = Some(message.to_owned());
        RouterEvent::StatusUpdated(message.to_owned())
    }
}
