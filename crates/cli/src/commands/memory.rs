//! `pincer memory` — Memory inspection and daily notes.

use chrono::Local;
use pincer_config::AppConfig;
use pincer_memory::MemoryStore;

pub fn show(config: &AppConfig, days: u32) -> pincer_core::Result<()> {
    let store = MemoryStore::new(&config.layout());

    println!("🧠 Long-term memory ({})", store.memory_file().display());
    println!("====================");
    let long_term = store.read_long_term();
    if long_term.trim().is_empty() {
        println!("  (empty)");
    } else {
        println!("{long_term}");
    }

    let notes = store.recent_daily_notes(Local::now().date_naive(), days);
    if !notes.is_empty() {
        println!();
        println!("📅 Recent notes ({days} days)");
        println!("====================");
        println!("{notes}");
    }
    Ok(())
}

pub fn note(config: &AppConfig, text: &str) -> pincer_core::Result<()> {
    let store = MemoryStore::new(&config.layout());
    let today = Local::now().date_naive();
    store.append_daily_note(today, text)?;
    println!("✅ Noted in {}", store.daily_note_path(today).display());
    Ok(())
}
