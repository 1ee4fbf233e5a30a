// SPDX-License-Identifier: MPL-2.0
//! Pages reachable from the sidebar.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Gallery,
    Camera,
    Video,
    Music,
    Tools,
    Settings,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Gallery,
        Page::Camera,
        Page::Video,
        Page::Music,
        Page::Tools,
        Page::Settings,
    ];

    /// Fluent key of the sidebar label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            Page::Home => "nav-home",
            Page::Gallery => "nav-gallery",
            Page::Camera => "nav-camera",
            Page::Video => "nav-video",
            Page::Music => "nav-music",
            Page::Tools => "nav-tools",
            Page::Settings => "nav-settings",
        }
    }

    /// Whether leaving this page must release a device or player.
    #[must_use]
    pub fn holds_resources(self) -> bool {
        matches!(self, Page::Camera | Page::Video | Page::Music)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidebar_order_starts_with_home_and_ends_with_settings() {
        assert_eq!(Page::ALL.first(), Some(&Page::Home));
        assert_eq!(Page::ALL.last(), Some(&Page::Settings));
        assert_eq!(Page::default(), Page::Home);
    }

    #[test]
    fn label_keys_are_unique() {
        let mut keys: Vec<&str> = Page::ALL.iter().map(|p| p.label_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Page::ALL.len());
    }

    #[test]
    fn only_media_pages_hold_resources() {
        let holders: Vec<Page> = Page::ALL
            .into_iter()
            .filter(|p| p.holds_resources())
            .collect();
        assert_eq!(holders, [Page::Camera, Page::Video, Page::Music]);
    }
}
