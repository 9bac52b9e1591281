//! Spotify menu bar application
//!
//! Runs as a menu bar item without a window or Dock icon.
//!
//! Everything happens on the main thread: the winit event loop wakes once per
//! refresh interval to tick the presenter, and menu clicks are forwarded into
//! the same loop as user events.

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    #[cfg(target_os = "macos")]
    if let Err(e) = macos::run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }

    #[cfg(not(target_os = "macos"))]
    log::error!(
        "{} talks to Spotify through AppleScript and only runs on macOS",
        spotify_menubar::APP_NAME
    );
}

#[cfg(target_os = "macos")]
mod macos {
    use anyhow::{Context, Result};
    use log::{error, info, warn};
    use spotify_menubar::applescript::{self, Osascript};
    use spotify_menubar::menu::MenuAction;
    use spotify_menubar::platform;
    use spotify_menubar::settings::SettingsStore;
    use spotify_menubar::source::PropertySource;
    use spotify_menubar::tray::TrayMenu;
    use spotify_menubar::{Presenter, Spotify, CACHE_TTL, DIALOG_TIMEOUT, REFRESH_INTERVAL};
    use std::time::Instant;
    use tray_icon::menu::MenuEvent;
    use winit::application::ApplicationHandler;
    use winit::event::{StartCause, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::platform::macos::{ActivationPolicy, EventLoopBuilderExtMacOS};
    use winit::window::WindowId;

    /// Events forwarded into the event loop
    #[derive(Debug)]
    enum UserEvent {
        /// Menu event from tray
        MenuEvent(MenuEvent),
    }

    /// Application state
    struct App {
        presenter: Presenter<Osascript>,
        tray: Option<TrayMenu>,
    }

    impl ApplicationHandler<UserEvent> for App {
        fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
            match cause {
                // The tray icon can only be created once the loop is running
                StartCause::Init => match TrayMenu::new() {
                    Ok(tray) => {
                        info!("✅ Menu bar item created");
                        self.tray = Some(tray);
                        self.tick(event_loop);
                    }
                    Err(e) => {
                        error!("Failed to create menu bar item: {e:#}");
                        event_loop.exit();
                    }
                },
                StartCause::ResumeTimeReached { .. } => self.tick(event_loop),
                _ => {}
            }
        }

        fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
            // Not used for menu bar only app
        }

        fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, _event: WindowEvent) {
            // No windows in menu bar only app
        }

        fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
            match event {
                UserEvent::MenuEvent(menu_event) => self.handle_menu(event_loop, &menu_event.id.0),
            }
        }
    }

    impl App {
        fn tick(&mut self, event_loop: &ActiveEventLoop) {
            let now = Instant::now();
            if self.presenter.tick(now) {
                self.render();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(now + REFRESH_INTERVAL));
        }

        fn render(&self) {
            if let Some(tray) = &self.tray {
                tray.apply(self.presenter.menu());
            }
        }

        fn handle_menu(&mut self, event_loop: &ActiveEventLoop, id: &str) {
            let Some(action) = MenuAction::from_id(id) else {
                return;
            };

            let result = match action {
                MenuAction::Player(command) => self.presenter.send(command),
                MenuAction::ToggleShuffle => self.presenter.toggle_shuffle().map(drop),
                MenuAction::ToggleRepeat => self.presenter.toggle_repeat().map(drop),
                MenuAction::SetVolume(volume) => self.presenter.set_volume(volume),
                MenuAction::EditFormatString => self.edit_format_string(),
                MenuAction::Quit => {
                    info!("Quit requested, shutting down...");
                    event_loop.exit();
                    return;
                }
            };

            if let Err(e) = result {
                warn!("{action:?} failed: {e:#}");
            }
            self.render();
        }

        /// Ask for a new format string; blocks the loop while the dialog is open
        fn edit_format_string(&mut self) -> Result<()> {
            let dialog = Osascript::new(DIALOG_TIMEOUT);
            let help = self.presenter.format_help();
            let current = self.presenter.template().source().to_string();

            match applescript::prompt(&dialog, "Format String", &help, &current)? {
                Some(text) => self.presenter.set_format_string(&text),
                None => Ok(()),
            }
        }
    }

    pub fn run() -> Result<()> {
        info!("🎵 Spotify menu bar starting on {}...", platform::name());

        if !platform::scripting_available() {
            warn!("osascript not found, Spotify will show as unavailable");
        }

        let settings = SettingsStore::locate().context("Failed to locate settings")?;
        info!("Settings file: {}", settings.path().display());

        // Create event loop with custom user events, hidden from the Dock
        let event_loop = EventLoop::<UserEvent>::with_user_event()
            .with_activation_policy(ActivationPolicy::Accessory)
            .build()
            .context("Failed to create event loop")?;

        event_loop.set_control_flow(ControlFlow::Wait);

        // Forward menu events to the event loop
        let menu_proxy = event_loop.create_proxy();
        MenuEvent::set_event_handler(Some(move |event| {
            let _ = menu_proxy.send_event(UserEvent::MenuEvent(event));
        }));

        let source = PropertySource::new(Spotify::new(Osascript::default()), CACHE_TTL);
        let mut app = App {
            presenter: Presenter::new(source, settings),
            tray: None,
        };

        info!("🔄 Running event loop...");
        event_loop.run_app(&mut app).context("Event loop failed")
    }
}
