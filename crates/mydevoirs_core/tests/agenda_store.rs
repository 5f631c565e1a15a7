use chrono::NaiveDate;
use mydevoirs_core::db::open_db_in_memory;
use mydevoirs_core::{AgendaStore, Color, SqliteAgendaStore, StoreError};

fn nov(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 11, day).unwrap()
}

#[test]
fn get_or_create_day_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let first = store.get_or_create_day(nov(12)).unwrap();
    let second = store.get_or_create_day(nov(12)).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.date, nov(12));

    let other = store.get_or_create_day(nov(13)).unwrap();
    assert_ne!(other.id, first.id);
}

#[test]
fn items_for_day_is_empty_without_items() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    assert!(store.items_for_day(nov(12)).unwrap().is_empty());

    // A day row without items behaves the same.
    store.get_or_create_day(nov(12)).unwrap();
    assert!(store.items_for_day(nov(12)).unwrap().is_empty());
}

#[test]
fn items_come_back_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let a = store.create_item(nov(12), "Grammaire", "un").unwrap();
    let b = store.create_item(nov(12), "Grammaire", "deux").unwrap();
    let c = store.create_item(nov(12), "Français", "trois").unwrap();

    let items = store.items_for_day(nov(12)).unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].id, c.id);
    assert_eq!(items[1].id, b.id);
    assert_eq!(items[2].id, a.id);

    // Reload yields the identical order.
    let again = store.items_for_day(nov(12)).unwrap();
    assert_eq!(items, again);
}

#[test]
fn create_item_rejects_unknown_matiere() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let err = store.create_item(nov(12), "Alchimie", "x").unwrap_err();
    assert!(matches!(err, StoreError::MatiereNotFound(nom) if nom == "Alchimie"));

    // The failed call must not have created the day row either.
    let day_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM jours;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(day_count, 0);
}

#[test]
fn set_item_done_persists_and_reports_missing_items() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let item = store.create_item(nov(12), "Grammaire", "un").unwrap();
    assert!(!item.done);

    store.set_item_done(item.id, true).unwrap();
    let reloaded = store.items_for_day(nov(12)).unwrap();
    assert!(reloaded[0].done);

    let err = store.set_item_done(9999, true).unwrap_err();
    assert!(matches!(err, StoreError::ItemNotFound(9999)));
}

#[test]
fn content_and_matiere_updates_survive_reload() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let item = store.create_item(nov(12), "Grammaire", "").unwrap();
    store.update_item_content(item.id, "page 42").unwrap();
    store.set_item_matiere(item.id, "Français").unwrap();

    let reloaded = store.items_for_day(nov(12)).unwrap();
    assert_eq!(reloaded[0].content, "page 42");
    assert_eq!(reloaded[0].matiere, "Français");

    let err = store.set_item_matiere(item.id, "Alchimie").unwrap_err();
    assert!(matches!(err, StoreError::MatiereNotFound(_)));
}

#[test]
fn get_matiere_returns_seeded_subjects_and_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let grammaire = store.get_matiere("Grammaire").unwrap();
    assert_eq!(grammaire.nom, "Grammaire");
    assert_ne!(grammaire.color, Color::BLACK);

    let err = store.get_matiere("Alchimie").unwrap_err();
    assert!(matches!(err, StoreError::MatiereNotFound(nom) if nom == "Alchimie"));
}

#[test]
fn list_matieres_is_sorted_by_name() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let matieres = store.list_matieres().unwrap();
    assert!(!matieres.is_empty());

    let noms: Vec<&str> = matieres.iter().map(|m| m.nom.as_str()).collect();
    let mut sorted = noms.clone();
    sorted.sort();
    assert_eq!(noms, sorted);
}

#[test]
fn corrupt_stored_color_falls_back_to_black() {
    let conn = open_db_in_memory().unwrap();

    conn.execute("UPDATE matieres SET color = 'junk' WHERE nom = 'Divers';", [])
        .unwrap();

    let store = SqliteAgendaStore::new(&conn);
    let divers = store.get_matiere("Divers").unwrap();
    assert_eq!(divers.color, Color::BLACK);
}
