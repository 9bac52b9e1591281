//! Spotify property dump
//!
//! Fetches one snapshot, prints it as JSON and shows the menu bar title the
//! stored format string would produce. Useful for checking the AppleScript
//! bridge without the menu bar app.

use anyhow::Result;
use spotify_menubar::applescript::Osascript;
use spotify_menubar::format::display_snapshot;
use spotify_menubar::settings::SettingsStore;
use spotify_menubar::{platform, Spotify, TARGET_APP};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    println!("🎵 {TARGET_APP} Property Snapshot");
    println!("==========================\n");

    if !platform::scripting_available() {
        eprintln!("❌ osascript is not available on {}.", platform::name());
        return Ok(());
    }

    let spotify = Spotify::new(Osascript::default());
    let Some(raw) = spotify.fetch()? else {
        println!("⚠️  {TARGET_APP} is not running.");
        return Ok(());
    };

    println!("📊 Raw properties:");
    println!("{}", serde_json::to_string_pretty(&raw)?);

    let display = display_snapshot(&raw);
    println!("\n📝 Display properties:");
    println!("{}", serde_json::to_string_pretty(&display)?);

    let store = SettingsStore::locate()?;
    let template = store.load().template();
    println!("\n🏷  Title ({}):", store.path().display());
    println!("   {}", template.render(&display));

    Ok(())
}
