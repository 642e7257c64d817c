//! `kabeuchi calendar` — the date-indexed event planner.

use kabeuchi_calendar::{FileStore, group_by_date};
use kabeuchi_core::calendar::{CalendarEvent, EventStatus, EventStore};
use kabeuchi_security::sanitize_error;

pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::new(FileStore::default_path());
    let events = store
        .list_all()
        .await
        .map_err(|e| sanitize_error(&e.to_string()))?;

    if events.is_empty() {
        println!("  予定はありません。");
        return Ok(());
    }

    for (date, on_day) in group_by_date(&events) {
        println!("  {date}");
        for event in on_day {
            println!(
                "    [{}] {}  ({})  id={}",
                event.status.label(),
                event.title,
                if event.description.is_empty() {
                    "-"
                } else {
                    event.description.as_str()
                },
                event.id
            );
        }
    }
    Ok(())
}

pub async fn add(
    date: &str,
    title: &str,
    description: &str,
    confirmed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = if confirmed {
        EventStatus::Confirmed
    } else {
        EventStatus::Draft
    };
    let event = CalendarEvent::new(date, title, description, status);
    let id = event.id.clone();

    let store = FileStore::new(FileStore::default_path());
    store
        .upsert(event)
        .await
        .map_err(|e| sanitize_error(&e.to_string()))?;
    println!("  予定を保存しました  id={id}");
    Ok(())
}

pub async fn remove(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::new(FileStore::default_path());
    let removed = store
        .delete(id)
        .await
        .map_err(|e| sanitize_error(&e.to_string()))?;
    if removed {
        println!("  予定を削除しました");
    } else {
        println!("  id={id} の予定は見つかりませんでした");
    }
    Ok(())
}
