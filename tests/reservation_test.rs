//! Integration tests for booking, searching, and cancelling reservations.

mod helpers;

use roomescape_core::error::ErrorKind;
use roomescape_core::types::{MemberId, ReservationId, ThemeId, TimeId};
use roomescape_service::reservation::{
    AdminReservationRequest, ReservationRequest, ReservationSearch, ReservationStatus,
};
use roomescape_service::waiting::WaitingRequest;

use helpers::{TestApp, at, date};

fn request(app: &TestApp, day: chrono::NaiveDate, time_id: TimeId) -> ReservationRequest {
    ReservationRequest {
        date: day,
        time_id,
        theme_id: app.theme.id,
    }
}

fn waiting(app: &TestApp, day: chrono::NaiveDate, time_id: TimeId) -> WaitingRequest {
    WaitingRequest {
        date: day,
        time_id,
        theme_id: app.theme.id,
    }
}

#[tokio::test]
async fn test_book_slot() {
    let app = TestApp::new().await;
    let a = app.member("A").await;

    let reservation = app
        .reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &a)
        .await
        .unwrap();

    assert_eq!(reservation.member.id, a.member_id);
    assert_eq!(reservation.time.id, app.ten.id);
    assert_eq!(reservation.theme.name, "theme-1");

    let all = app.reservations.find_reservations().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, reservation.id);
}

#[tokio::test]
async fn test_same_slot_twice_is_duplication() {
    let app = TestApp::new().await;
    let a = app.member("A").await;
    let b = app.member("B").await;

    app.reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &a)
        .await
        .unwrap();

    let err = app
        .reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &b)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Duplication);

    // Other times on the same day remain free.
    app.reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.noon.id), &b)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_concurrent_bookings_admit_one() {
    let app = TestApp::new().await;
    let a = app.member("A").await;
    let b = app.member("B").await;

    let (first, second) = tokio::join!(
        app.reservations
            .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &a),
        app.reservations
            .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &b),
    );

    let outcomes = [first, second];
    let booked = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(booked, 1);
    assert!(
        outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| e.kind == ErrorKind::Duplication)
    );
    assert_eq!(app.reservations.find_reservations().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_past_and_current_slots_rejected() {
    let app = TestApp::new().await;
    let a = app.member("A").await;

    let past = app
        .reservations
        .add_reservation(request(&app, date(2024, 12, 30), app.ten.id), &a)
        .await
        .unwrap_err();
    assert_eq!(past.kind, ErrorKind::Validation);

    app.clock.set(at(date(2025, 1, 1), 10, 0));
    let now = app
        .reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &a)
        .await
        .unwrap_err();
    assert_eq!(now.kind, ErrorKind::Validation);

    app.reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.noon.id), &a)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unknown_references_are_not_found() {
    let app = TestApp::new().await;
    let a = app.member("A").await;

    let no_time = app
        .reservations
        .add_reservation(request(&app, date(2025, 1, 1), TimeId::new()), &a)
        .await
        .unwrap_err();
    assert_eq!(no_time.kind, ErrorKind::NotFound);

    let no_theme = app
        .reservations
        .add_reservation(
            ReservationRequest {
                date: date(2025, 1, 1),
                time_id: app.ten.id,
                theme_id: ThemeId::new(),
            },
            &a,
        )
        .await
        .unwrap_err();
    assert_eq!(no_theme.kind, ErrorKind::NotFound);

    let no_member = app
        .reservations
        .add_reservation_by_admin(AdminReservationRequest {
            date: date(2025, 1, 1),
            time_id: app.ten.id,
            theme_id: app.theme.id,
            member_id: MemberId::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(no_member.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_admin_books_for_member() {
    let app = TestApp::new().await;
    let a = app.member("A").await;

    let reservation = app
        .reservations
        .add_reservation_by_admin(AdminReservationRequest {
            date: date(2025, 1, 1),
            time_id: app.ten.id,
            theme_id: app.theme.id,
            member_id: a.member_id,
        })
        .await
        .unwrap();
    assert_eq!(reservation.member.id, a.member_id);

    let mine = app.reservations.find_reservations_by_member(&a).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, ReservationStatus::Reserved);
}

#[tokio::test]
async fn test_cancel_with_empty_queue_frees_slot() {
    let app = TestApp::new().await;
    let a = app.member("A").await;
    let b = app.member("B").await;

    let reservation = app
        .reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &a)
        .await
        .unwrap();

    app.reservations
        .delete_reservation(reservation.id, &a)
        .await
        .unwrap();
    assert!(app.reservations.find_reservations().await.unwrap().is_empty());

    app.reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &b)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancel_promotes_earliest_waiting() {
    let app = TestApp::new().await;
    let a = app.member("A").await;
    let b = app.member("B").await;
    let c = app.member("C").await;

    let reservation = app
        .reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &a)
        .await
        .unwrap();
    let b_waiting = app
        .waitings
        .add_waiting(waiting(&app, date(2025, 1, 1), app.ten.id), &b)
        .await
        .unwrap();
    app.waitings
        .add_waiting(waiting(&app, date(2025, 1, 1), app.ten.id), &c)
        .await
        .unwrap();

    app.reservations
        .delete_reservation(reservation.id, &a)
        .await
        .unwrap();

    let all = app.reservations.find_reservations().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, reservation.id);
    assert_eq!(all[0].member.id, b.member_id);
    assert_eq!(all[0].slot(), reservation.slot());

    let remaining = app.waitings.find_waitings().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|w| w.id != b_waiting.id));

    let c_ranks = app.waitings.find_waitings_by_member(c.member_id).await.unwrap();
    assert_eq!(c_ranks.len(), 1);
    assert_eq!(c_ranks[0].rank, 0);
}

#[tokio::test]
async fn test_cancel_by_non_owner_is_ignored() {
    let app = TestApp::new().await;
    let a = app.member("A").await;
    let b = app.member("B").await;

    let reservation = app
        .reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &a)
        .await
        .unwrap();

    app.reservations
        .delete_reservation(reservation.id, &b)
        .await
        .unwrap();

    let all = app.reservations.find_reservations().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].member.id, a.member_id);
}

#[tokio::test]
async fn test_cancel_unknown_is_not_found() {
    let app = TestApp::new().await;
    let a = app.member("A").await;

    let err = app
        .reservations
        .delete_reservation(ReservationId::new(), &a)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_itinerary_sorted_by_date_then_time() {
    let app = TestApp::new().await;
    let a = app.member("A").await;
    let b = app.member("B").await;

    app.reservations
        .add_reservation(request(&app, date(2025, 1, 2), app.ten.id), &a)
        .await
        .unwrap();
    app.reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.noon.id), &a)
        .await
        .unwrap();
    app.reservations
        .add_reservation(request(&app, date(2025, 1, 1), app.ten.id), &b)
        .await
        .unwrap();
    app.waitings
        .add_waiting(waiting(&app, date(2025, 1, 1), app.ten.id), &a)
        .await
        .unwrap();

    let rows = app.reservations.find_reservations_by_member(&a).await.unwrap();
    let keys: Vec<_> = rows
        .iter()
        .map(|r| (r.date, r.start_at, r.status))
        .collect();

    assert_eq!(
        keys,
        vec![
            (
                date(2025, 1, 1),
                app.ten.start_at,
                ReservationStatus::Waiting { rank: 0 }
            ),
            (date(2025, 1, 1), app.noon.start_at, ReservationStatus::Reserved),
            (date(2025, 1, 2), app.ten.start_at, ReservationStatus::Reserved),
        ]
    );
}

#[tokio::test]
async fn test_search_bounds_are_inclusive_and_optional() {
    let app = TestApp::new().await;
    let a = app.member("A").await;
    let b = app.member("B").await;
    let other = app.other_theme("theme-2").await;

    for day in [date(2025, 1, 1), date(2025, 1, 2), date(2025, 1, 3)] {
        app.reservations
            .add_reservation(request(&app, day, app.ten.id), &a)
            .await
            .unwrap();
    }
    app.reservations
        .add_reservation(request(&app, date(2025, 1, 2), app.noon.id), &b)
        .await
        .unwrap();
    app.reservations
        .add_reservation(
            ReservationRequest {
                date: date(2025, 1, 2),
                time_id: app.noon.id,
                theme_id: other.id,
            },
            &a,
        )
        .await
        .unwrap();

    let search = |from, to| ReservationSearch {
        theme_id: app.theme.id,
        member_id: a.member_id,
        date_from: from,
        date_to: to,
    };

    let all = app.reservations.search_reservations(search(None, None)).await.unwrap();
    assert_eq!(all.len(), 3);

    let from = app
        .reservations
        .search_reservations(search(Some(date(2025, 1, 2)), None))
        .await
        .unwrap();
    assert_eq!(from.len(), 2);

    let until = app
        .reservations
        .search_reservations(search(None, Some(date(2025, 1, 2))))
        .await
        .unwrap();
    assert_eq!(until.len(), 2);

    let exact = app
        .reservations
        .search_reservations(search(Some(date(2025, 1, 2)), Some(date(2025, 1, 2))))
        .await
        .unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].date, date(2025, 1, 2));
    assert_eq!(exact[0].theme.id, app.theme.id);

    let unknown = app
        .reservations
        .search_reservations(ReservationSearch {
            theme_id: app.theme.id,
            member_id: MemberId::new(),
            date_from: None,
            date_to: None,
        })
        .await
        .unwrap_err();
    assert_eq!(unknown.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_handover_scenario() {
    let app = TestApp::new().await;
    let a = app.member("A").await;
    let b = app.member("B").await;
    let slot_day = date(2025, 1, 1);

    let reservation = app
        .reservations
        .add_reservation(request(&app, slot_day, app.ten.id), &a)
        .await
        .unwrap();

    let err = app
        .reservations
        .add_reservation(request(&app, slot_day, app.ten.id), &b)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Duplication);

    app.waitings
        .add_waiting(waiting(&app, slot_day, app.ten.id), &b)
        .await
        .unwrap();
    let queued = app.waitings.find_waitings_by_member(b.member_id).await.unwrap();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].rank, 0);

    app.reservations
        .delete_reservation(reservation.id, &a)
        .await
        .unwrap();

    let b_rows = app.reservations.find_reservations_by_member(&b).await.unwrap();
    assert_eq!(b_rows.len(), 1);
    assert_eq!(b_rows[0].status, ReservationStatus::Reserved);
    assert_eq!(b_rows[0].date, slot_day);
    assert_eq!(b_rows[0].start_at, app.ten.start_at);
    assert!(
        app.waitings
            .find_waitings_by_member(b.member_id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        app.reservations
            .find_reservations_by_member(&a)
            .await
            .unwrap()
            .is_empty()
    );
}
