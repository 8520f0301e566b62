// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Home,
    Favorites,
    Work,
    Messages,
    MyPage,
    Map,
    LocationPreference,
    LocationConfirm,
    Detail,
}

impl Screen {
    pub const ALL: [Self; 9] = [
        Self::Home,
        Self::Favorites,
        Self::Work,
        Self::Messages,
        Self::MyPage,
        Self::Map,
        Self::LocationPreference,
        Self::LocationConfirm,
        Self::Detail,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Favorites => "favorites",
            Self::Work => "work",
            Self::Messages => "messages",
            Self::MyPage => "my-page",
            Self::Map => "map",
            Self::LocationPreference => "location-preference",
            Self::LocationConfirm => "location-confirm",
            Self::Detail => "detail",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "home" => Some(Self::Home),
            "favorites" => Some(Self::Favorites),
            "work" => Some(Self::Work),
            "messages" => Some(Self::Messages),
            "my-page" => Some(Self::MyPage),
            "map" => Some(Self::Map),
            "location-preference" => Some(Self::LocationPreference),
            "location-confirm" => Some(Self::LocationConfirm),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "さがす",
            Self::Favorites => "お気に入り",
            Self::Work => "はたらく",
            Self::Messages => "メッセージ",
            Self::MyPage => "マイページ",
            Self::Map => "マップ",
            Self::LocationPreference => "エリア設定",
            Self::LocationConfirm => "エリア確認",
            Self::Detail => "求人詳細",
        }
    }

    // Fixed screen→nav table. Screens reached outside the bottom nav
    // (detail, map, area screens) have no entry and must leave the
    // highlight untouched.
    pub const fn nav_entry(self) -> Option<NavEntry> {
        match self {
            Self::Home => Some(NavEntry::Home),
            Self::Favorites => Some(NavEntry::Favorites),
            Self::Work => Some(NavEntry::Work),
            Self::Messages => Some(NavEntry::Messages),
            Self::MyPage => Some(NavEntry::MyPage),
            Self::Map
            | Self::LocationPreference
            | Self::LocationConfirm
            | Self::Detail => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavEntry {
    Home,
    Favorites,
    Work,
    Messages,
    MyPage,
}

impl NavEntry {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Favorites,
        Self::Work,
        Self::Messages,
        Self::MyPage,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "さがす",
            Self::Favorites => "お気に入り",
            Self::Work => "はたらく",
            Self::Messages => "メッセージ",
            Self::MyPage => "マイページ",
        }
    }

    pub const fn screen(self) -> Screen {
        match self {
            Self::Home => Screen::Home,
            Self::Favorites => Screen::Favorites,
            Self::Work => Screen::Work,
            Self::Messages => Screen::Messages,
            Self::MyPage => Screen::MyPage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOption {
    Recommended,
    HighWage,
    Nearby,
    Newest,
}

impl SortOption {
    pub const ALL: [Self; 4] = [
        Self::Recommended,
        Self::HighWage,
        Self::Nearby,
        Self::Newest,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "おすすめ順",
            Self::HighWage => "時給が高い順",
            Self::Nearby => "近い順",
            Self::Newest => "新着順",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preference {
    Shibuya,
    Shinjuku,
    Ikebukuro,
    Shinagawa,
    Meguro,
}

impl Preference {
    pub const ALL: [Self; 5] = [
        Self::Shibuya,
        Self::Shinjuku,
        Self::Ikebukuro,
        Self::Shinagawa,
        Self::Meguro,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Shibuya => "渋谷",
            Self::Shinjuku => "新宿",
            Self::Ikebukuro => "池袋",
            Self::Shinagawa => "品川",
            Self::Meguro => "目黒",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    pub date: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub time: String,
    #[serde(default)]
    pub full_time: Option<String>,
    pub place: String,
    pub price: String,
    #[serde(default)]
    pub image_key: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub has_other_dates: bool,
    #[serde(default)]
    pub urgent: bool,
}

impl JobRecord {
    // The long-form label wins when present; cards keep the short window.
    pub fn display_time(&self) -> &str {
        self.full_time.as_deref().unwrap_or(&self.time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPin {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
}
