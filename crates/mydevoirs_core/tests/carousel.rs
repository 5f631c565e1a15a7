use chrono::NaiveDate;
use mydevoirs_core::db::open_db_in_memory;
use mydevoirs_core::{
    AgendaStore, AncestorWalk, CarouselGrid, PageDirection, PageOutcome, PagingState, Settings,
    SqliteAgendaStore,
};

fn nov(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 11, day).unwrap()
}

fn settings_with_days(shown_days: [bool; 7]) -> Settings {
    Settings {
        shown_days,
        ..Settings::default()
    }
}

#[test]
fn grid_builds_panels_only_for_shown_days() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    // Stubbed policy: Tuesday, Thursday, Saturday.
    let settings = settings_with_days([false, true, false, true, false, true, false]);
    let mut grid = CarouselGrid::new(nov(12), &settings);

    // Nothing is materialized before load.
    assert!(grid.panels().is_empty());

    grid.load(&store).unwrap();
    let dates: Vec<NaiveDate> = grid.panels().iter().map(|p| p.date()).collect();
    assert_eq!(dates, vec![nov(12), nov(14), nov(16)]);
}

#[test]
fn paging_shifts_the_window_by_one_week() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let settings = settings_with_days([true; 7]);
    let mut grid = CarouselGrid::new(nov(12), &settings);
    grid.load(&store).unwrap();

    assert_eq!(
        grid.page(PageDirection::Forward, &store).unwrap(),
        PageOutcome::Paged
    );
    assert_eq!(grid.anchor(), nov(19));
    let dates: Vec<NaiveDate> = grid.panels().iter().map(|p| p.date()).collect();
    assert_eq!(dates[0], nov(18));
    assert_eq!(dates[6], nov(24));
}

#[test]
fn paging_forward_then_back_restores_the_visible_dates() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let settings = settings_with_days([true, true, true, true, true, false, false]);
    let mut grid = CarouselGrid::new(nov(12), &settings);
    grid.load(&store).unwrap();
    let before = grid.visible_dates();

    grid.page(PageDirection::Forward, &store).unwrap();
    assert_ne!(grid.visible_dates(), before);

    grid.page(PageDirection::Back, &store).unwrap();
    assert_eq!(grid.visible_dates(), before);

    let panel_dates: Vec<NaiveDate> = grid.panels().iter().map(|p| p.date()).collect();
    assert_eq!(panel_dates, before);
    assert_eq!(grid.paging_state(), PagingState::Idle);
}

#[test]
fn a_page_request_while_paging_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let settings = settings_with_days([true; 7]);
    let mut grid = CarouselGrid::new(nov(12), &settings);
    grid.load(&store).unwrap();
    let anchor_before = grid.anchor();

    // Claim the state machine as an in-flight page would.
    assert!(grid.try_begin_page());
    assert_eq!(grid.paging_state(), PagingState::Paging);
    assert!(!grid.try_begin_page());

    // The concurrent request is a no-op: no rebuild, no anchor move.
    assert_eq!(
        grid.page(PageDirection::Forward, &store).unwrap(),
        PageOutcome::Rejected
    );
    assert_eq!(grid.anchor(), anchor_before);
    assert_eq!(grid.paging_state(), PagingState::Paging);

    // Once the first page completes, paging works again.
    grid.finish_page();
    assert_eq!(
        grid.page(PageDirection::Forward, &store).unwrap(),
        PageOutcome::Paged
    );
    assert_eq!(grid.paging_state(), PagingState::Idle);
}

#[test]
fn toggling_through_the_grid_updates_the_owning_panel() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let item = store.create_item(nov(12), "Grammaire", "un").unwrap();

    let settings = settings_with_days([true; 7]);
    let mut grid = CarouselGrid::new(nov(12), &settings);
    grid.load(&store).unwrap();

    assert!(grid.toggle_item(item.id, &store).unwrap());

    let panel = grid.panel(nov(12)).unwrap();
    assert_eq!(panel.progression(), (1, 1));
    assert!(store.items_for_day(nov(12)).unwrap()[0].done);
}

#[test]
fn the_grid_resolves_cell_owners_as_the_ancestor_walk() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let item = store.create_item(nov(14), "Français", "deux").unwrap();

    let settings = settings_with_days([true; 7]);
    let mut grid = CarouselGrid::new(nov(12), &settings);
    grid.load(&store).unwrap();

    assert_eq!(grid.find_owner(item.id), Some(nov(14)));
    assert_eq!(grid.find_owner(9999), None);
}

#[test]
fn adding_through_the_grid_targets_the_right_panel() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);

    let settings = settings_with_days([true; 7]);
    let mut grid = CarouselGrid::new(nov(12), &settings);
    grid.load(&store).unwrap();

    let outcome = grid.add_item(nov(13), &store).unwrap();
    assert!(!outcome.matiere_menu.is_empty());

    let panel = grid.panel(nov(13)).unwrap();
    assert_eq!(panel.items().cells()[0].entry(), outcome.entry);
    assert_eq!(panel.progression(), (0, 1));

    // Dates outside the window are never materialized speculatively.
    assert!(grid.add_item(nov(30), &store).is_err());
    assert!(grid.panel(nov(30)).is_none());
}
