//! System tray implementation
//!
//! Builds the menu bar item and its dropdown with the `tray-icon` crate and
//! mirrors a [`MenuState`] onto it. Item ids come from [`crate::menu`].

use anyhow::{Context, Result};
use tray_icon::{
    menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu},
    Icon, TrayIcon, TrayIconBuilder,
};

use crate::menu::{
    self, MENU_ID_FORMAT_STRING, MENU_ID_LAUNCH, MENU_ID_QUIT, MENU_ID_QUIT_PLAYER, MENU_ID_REPEAT,
    MENU_ID_SHUFFLE, MENU_ID_VERSION, TRANSPORT, VOLUME_STEPS,
};
use crate::presenter::MenuState;
use crate::property::Property;
use crate::TARGET_APP;

/// Menu bar item and the menu entries that change at runtime
pub struct TrayMenu {
    tray: TrayIcon,
    version: MenuItem,
    property_lines: Vec<(Property, MenuItem)>,
    shuffle: CheckMenuItem,
    repeat: CheckMenuItem,
    volume: Vec<(u8, CheckMenuItem)>,
}

impl TrayMenu {
    /// Create the menu bar item.
    ///
    /// On macOS this must run after the event loop has started.
    pub fn new() -> Result<Self> {
        let icon = Self::load_icon()?;
        let menu = Menu::new();

        // Spotify submenu: app controls and player properties
        let player_menu = Submenu::new(TARGET_APP, true);
        let version = MenuItem::with_id(MENU_ID_VERSION, "Version:", false, None);
        player_menu.append_items(&[
            &version,
            &MenuItem::with_id(MENU_ID_LAUNCH, "Launch", true, None),
            &MenuItem::with_id(MENU_ID_QUIT_PLAYER, "Quit", true, None),
            &PredefinedMenuItem::separator(),
        ])?;
        let mut property_lines = Vec::new();
        for property in Property::PLAYER {
            let item = Self::property_item(property);
            player_menu.append(&item)?;
            property_lines.push((property, item));
        }

        // Current track submenu
        let track_menu = Submenu::new("Current track", true);
        for property in Property::TRACK {
            let item = Self::property_item(property);
            track_menu.append(&item)?;
            property_lines.push((property, item));
        }

        let shuffle = CheckMenuItem::with_id(MENU_ID_SHUFFLE, "Shuffle", true, false, None);
        let repeat = CheckMenuItem::with_id(MENU_ID_REPEAT, "Repeat", true, false, None);

        let volume_menu = Submenu::new("Sound Volume", true);
        let mut volume = Vec::new();
        for level in VOLUME_STEPS {
            let item = CheckMenuItem::with_id(menu::volume_id(level), format!("{level}%"), true, false, None);
            volume_menu.append(&item)?;
            volume.push((level, item));
        }

        menu.append_items(&[
            &player_menu,
            &track_menu,
            &MenuItem::with_id(MENU_ID_FORMAT_STRING, "Format String…", true, None),
            &PredefinedMenuItem::separator(),
            &shuffle,
            &repeat,
            &volume_menu,
            &PredefinedMenuItem::separator(),
        ])?;
        for (id, label, _) in TRANSPORT {
            menu.append(&MenuItem::with_id(id, label, true, None))?;
        }
        menu.append_items(&[
            &PredefinedMenuItem::separator(),
            &MenuItem::with_id(MENU_ID_QUIT, "Quit Menu Bar", true, None),
        ])?;

        let tray = TrayIconBuilder::new()
            .with_icon(icon)
            .with_icon_as_template(true)
            .with_menu(Box::new(menu))
            .with_tooltip(TARGET_APP)
            .build()
            .context("Failed to create tray icon")?;

        Ok(Self {
            tray,
            version,
            property_lines,
            shuffle,
            repeat,
            volume,
        })
    }

    fn property_item(property: Property) -> MenuItem {
        MenuItem::with_id(menu::property_id(property.key()), format!("{property}:"), false, None)
    }

    /// Load the tray icon
    fn load_icon() -> Result<Icon> {
        let icon_bytes = include_bytes!("../assets/tray_icon.png");

        let image = image::load_from_memory(icon_bytes)
            .context("Failed to load tray icon image")?
            .into_rgba8();

        let (width, height) = image.dimensions();
        let rgba = image.into_raw();

        Icon::from_rgba(rgba, width, height).context("Failed to create icon from RGBA data")
    }

    /// Show `state` in the menu bar and dropdown.
    ///
    /// Check items toggle themselves when clicked, so every check state is
    /// written each time rather than only on change.
    pub fn apply(&self, state: &MenuState) {
        if let Some(title) = &state.title {
            self.tray.set_title(Some(title));
        }
        if let Some(version) = &state.version {
            self.version.set_text(format!("Version: {version}"));
        }

        for (property, text) in state.player_lines.iter().chain(&state.track_lines) {
            if let Some((_, item)) = self.property_lines.iter().find(|(p, _)| p == property) {
                item.set_text(text);
            }
        }

        self.shuffle.set_checked(state.shuffle);
        self.repeat.set_checked(state.repeat);

        let step = menu::nearest_volume_step(state.volume);
        for (level, item) in &self.volume {
            item.set_checked(*level == step);
        }
    }
}
