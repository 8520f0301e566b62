// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use sukima_app::MapPoint;
use sukima_tui::MapHandle;

// Stand-in for the externally-initialized map widget: it absorbs the
// resize/recenter protocol and remembers the last viewport request so a
// future embedding can read it back.
#[derive(Debug, Default)]
pub struct SessionMapHandle {
    resize_notifications: u64,
    center: Option<MapPoint>,
}

impl SessionMapHandle {
    pub fn resize_notifications(&self) -> u64 {
        self.resize_notifications
    }

    pub fn center(&self) -> Option<MapPoint> {
        self.center
    }
}

impl MapHandle for SessionMapHandle {
    fn notify_resize(&mut self) {
        self.resize_notifications = self.resize_notifications.saturating_add(1);
    }

    fn set_center(&mut self, center: MapPoint) {
        self.center = Some(center);
    }
}
