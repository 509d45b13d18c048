//! Navigation State
//!
//! Menu visibility, scroll-spy selection and keyboard focus cycling,
//! kept free of DOM calls.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub section_id: String,
    pub label: String,
}

impl NavLink {
    pub fn new(section_id: &str, label: &str) -> Self {
        Self {
            section_id: section_id.to_string(),
            label: label.to_string(),
        }
    }

    pub fn href(&self) -> String {
        format!("#{}", self.section_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    pub menu_open: bool,
    pub active: Option<String>,
    pub sticky: bool,
}

/// One observed section as reported by the intersection observer
#[derive(Debug, Clone, PartialEq)]
pub struct SpyEntry {
    pub section_id: String,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStep {
    Forward,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    CloseMenu,
    Focus(FocusStep),
}

impl NavState {
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Widths at or above the breakpoint force the mobile menu closed.
    /// Returns true when the menu was closed by this call.
    pub fn on_resize(&mut self, width: f64, breakpoint: f64) -> bool {
        if self.closes_on_resize(width, breakpoint) {
            self.menu_open = false;
            return true;
        }
        false
    }

    /// Read-only check for `on_resize`, so callers can skip the write
    pub fn closes_on_resize(&self, width: f64, breakpoint: f64) -> bool {
        self.menu_open && width >= breakpoint
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.menu_open {
            "true"
        } else {
            "false"
        }
    }

    /// Apply a batch of observer entries. Only a section crossing the
    /// trigger region changes the active link; leaving does not clear it.
    pub fn apply_spy(&mut self, entries: &[SpyEntry]) -> bool {
        match pick_active(entries) {
            Some(id) if self.active.as_deref() != Some(id) => {
                self.active = Some(id.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, section_id: &str) -> bool {
        self.active.as_deref() == Some(section_id)
    }
}

pub fn is_mobile(width: f64, breakpoint: f64) -> bool {
    width < breakpoint
}

/// The bar sticks once the page scrolled past its original position
pub fn is_sticky(scroll_y: f64, nav_offset_top: f64) -> bool {
    scroll_y > nav_offset_top
}

/// Last intersecting entry wins, matching observer delivery order
pub fn pick_active(entries: &[SpyEntry]) -> Option<&str> {
    entries
        .iter()
        .rev()
        .find(|entry| entry.is_intersecting)
        .map(|entry| entry.section_id.as_str())
}

/// Map a key to a menu action. Nothing acts while the menu is closed;
/// arrow keys additionally need focus inside the nav.
pub fn key_action(key: &str, menu_open: bool, focus_in_nav: bool) -> Option<KeyAction> {
    if !menu_open {
        return None;
    }
    match key {
        "Escape" => Some(KeyAction::CloseMenu),
        "ArrowRight" | "ArrowDown" if focus_in_nav => Some(KeyAction::Focus(FocusStep::Forward)),
        "ArrowLeft" | "ArrowUp" if focus_in_nav => Some(KeyAction::Focus(FocusStep::Back)),
        _ => None,
    }
}

/// Circular focus movement among `len` links. With nothing focused,
/// forward lands on the first link and back on the last.
pub fn cycle_focus(current: Option<usize>, len: usize, step: FocusStep) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match (current, step) {
        (None, FocusStep::Forward) => 0,
        (None, FocusStep::Back) => len - 1,
        (Some(i), FocusStep::Forward) => (i + 1) % len,
        (Some(i), FocusStep::Back) => (i + len - 1) % len,
    };
    Some(next)
}

/// Section id named by a location hash, if it is one of `links`
pub fn section_from_hash<'a>(hash: &str, links: &'a [NavLink]) -> Option<&'a NavLink> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    if id.is_empty() {
        return None;
    }
    links.iter().find(|link| link.section_id == id)
}
