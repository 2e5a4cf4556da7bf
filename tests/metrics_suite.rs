//! End-to-end checks of the derived metrics against the ledger and budget
//! invariants, driven through the session API.

use std::sync::Arc;

use chrono::NaiveDate;
use spendtrack::core::{metrics, FixedClock, Session, DEFAULT_WINDOW_DAYS};
use spendtrack::domain::{Category, CategoryFilter, FilterState};
use spendtrack::storage::JsonStateStore;
use tempfile::tempdir;

fn aug(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
}

fn session_at(root: &std::path::Path, date: NaiveDate) -> Session {
    let store = JsonStateStore::new(Some(root.to_path_buf())).unwrap();
    Session::open(Box::new(store), Arc::new(FixedClock(date)))
}

#[test]
fn totals_track_every_add_and_remove() {
    let temp = tempdir().unwrap();
    let mut session = session_at(temp.path(), aug(7));

    let amounts = [12.5, 90.0, 240.75, 3.25, 55.0];
    let mut ids = Vec::new();
    for amount in amounts {
        ids.push(session.add_expense(amount, Category::Other, "").unwrap().id);
    }
    let expected: f64 = amounts.iter().sum();
    assert_eq!(session.summary().total_spent, expected);

    session.remove_expense(ids[1]).unwrap();
    session.remove_expense(ids[1]).unwrap(); // second remove is a no-op
    let expected = expected - 90.0;
    assert_eq!(session.summary().total_spent, expected);
    assert_eq!(
        session.summary().remaining,
        session.budget().monthly_limit - expected
    );
}

#[test]
fn by_category_conserves_the_total() {
    let temp = tempdir().unwrap();
    let mut session = session_at(temp.path(), aug(7));
    session
        .add_expense(120.0, Category::FoodAndDrinks, "")
        .unwrap();
    session.add_expense(80.0, Category::Transport, "").unwrap();
    session
        .add_expense(300.0, Category::Custom("Mobile".into()), "recharge")
        .unwrap();

    let grouped: f64 = session.by_category().iter().map(|entry| entry.total).sum();
    assert_eq!(grouped, session.summary().total_spent);
}

#[test]
fn daily_series_window_conserves_in_window_spending() {
    let temp = tempdir().unwrap();

    // Log on three distinct days by reopening with a moved clock.
    for (day, amount) in [(1u32, 10.0), (4, 40.0), (7, 70.0)] {
        let mut session = session_at(temp.path(), aug(day));
        session.add_expense(amount, Category::Other, "").unwrap();
    }

    let session = session_at(temp.path(), aug(7));
    let series = session.daily_series(DEFAULT_WINDOW_DAYS);
    assert_eq!(series.len(), DEFAULT_WINDOW_DAYS);
    assert_eq!(series.first().unwrap().date, aug(1));
    assert_eq!(series.last().unwrap().date, aug(7));
    let windowed: f64 = series.iter().map(|point| point.total).sum();
    assert_eq!(windowed, 120.0);

    // Shift the anchor: the same ledger now contributes only what falls in
    // the new window.
    let later = session_at(temp.path(), aug(10));
    let shifted: f64 = later
        .daily_series(DEFAULT_WINDOW_DAYS)
        .iter()
        .map(|point| point.total)
        .sum();
    assert_eq!(shifted, 110.0);
}

#[test]
fn over_budget_is_a_signal_not_an_error() {
    let temp = tempdir().unwrap();
    let mut session = session_at(temp.path(), aug(7));
    session.set_budget(0.0).unwrap();
    session.add_expense(50.0, Category::Other, "").unwrap();

    let summary = session.summary();
    assert_eq!(summary.percent_used, 100.0);
    assert_eq!(summary.remaining, -50.0);
}

#[test]
fn filter_projection_never_mutates_the_ledger() {
    let temp = tempdir().unwrap();
    let mut session = session_at(temp.path(), aug(7));
    session
        .add_expense(120.0, Category::FoodAndDrinks, "Lunch")
        .unwrap();
    session
        .add_expense(45.0, Category::Transport, "Bus pass")
        .unwrap();
    let before = session.ledger().clone();

    let filter = FilterState {
        query: "bus".into(),
        category: CategoryFilter::All,
    };
    let matches = session.filtered(&filter);
    assert_eq!(matches.len(), 1);
    drop(matches);
    assert_eq!(session.ledger(), &before);
}

#[test]
fn pure_functions_agree_with_session_accessors() {
    let temp = tempdir().unwrap();
    let mut session = session_at(temp.path(), aug(7));
    session
        .add_expense(200.0, Category::FoodAndDrinks, "Lunch")
        .unwrap();

    let records = session.ledger().records();
    assert_eq!(metrics::total_spent(records), session.summary().total_spent);
    assert_eq!(
        metrics::percent_used(records, session.budget()),
        session.summary().percent_used
    );
    assert_eq!(metrics::by_category(records), session.by_category());
}
