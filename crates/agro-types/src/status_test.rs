use std::collections::HashSet;

use chrono::NaiveDate;

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_request_status_views_are_distinct_and_known() {
    let mut classes = HashSet::new();
    for status in RequestStatus::ALL {
        let view = status.view();
        assert_ne!(view, StatusView::UNKNOWN, "{status:?} fell back to unknown");
        assert!(classes.insert(view.css_class), "duplicate class for {status:?}");
    }
}

#[test]
fn test_workshop_status_views_are_distinct_and_known() {
    let mut classes = HashSet::new();
    for status in WorkshopStatus::ALL {
        let view = status.view();
        assert_ne!(view, StatusView::UNKNOWN);
        assert!(classes.insert(view.css_class));
    }
}

#[test]
fn test_mapping_is_stable_per_code() {
    for code in -3..12 {
        assert_eq!(RequestStatus::from(code).view(), RequestStatus::from(code).view());
        assert_eq!(WorkshopStatus::from(code).view(), WorkshopStatus::from(code).view());
        assert_eq!(TaskStatus::from(code), TaskStatus::from(code));
    }
}

#[test]
fn test_codes_round_trip() {
    for status in RequestStatus::ALL {
        assert_eq!(RequestStatus::from(status.code()), status);
    }
    for status in WorkshopStatus::ALL {
        assert_eq!(WorkshopStatus::from(status.code()), status);
    }
    assert_eq!(TaskStatus::from(TaskStatus::Completed.code()), TaskStatus::Completed);
}

#[test]
fn test_unknown_codes_fall_back() {
    assert_eq!(RequestStatus::from(0).view(), StatusView::UNKNOWN);
    assert_eq!(RequestStatus::from(99).view(), StatusView::UNKNOWN);
    assert_eq!(WorkshopStatus::from(7).view(), StatusView::UNKNOWN);
    assert_eq!(WorkshopStatus::from(-1).view(), StatusView::UNKNOWN);
    let task = TaskState::classify(TaskStatus::from(5), Some(day(2020, 1, 1)), day(2024, 1, 1));
    assert_eq!(task, TaskState::Unknown(5));
    assert_eq!(task.view(), StatusView::UNKNOWN);
}

#[test]
fn test_pending_task_before_today_is_overdue() {
    let state = TaskState::classify(TaskStatus::Pending, Some(day(2024, 1, 1)), day(2024, 2, 1));
    assert_eq!(state, TaskState::Overdue);
    assert_eq!(state.view().css_class, "tarea-vencida");
    assert_eq!(state.view().label_key, "status.task.overdue");
}

#[test]
fn test_pending_task_due_today_is_not_overdue() {
    let today = day(2024, 2, 1);
    assert_eq!(TaskState::classify(TaskStatus::Pending, Some(today), today), TaskState::Pending);
}

#[test]
fn test_pending_task_due_later_is_not_overdue() {
    let state = TaskState::classify(TaskStatus::Pending, Some(day(2024, 2, 2)), day(2024, 2, 1));
    assert_eq!(state, TaskState::Pending);
}

#[test]
fn test_completed_task_is_never_overdue() {
    let state = TaskState::classify(TaskStatus::Completed, Some(day(2023, 1, 1)), day(2024, 2, 1));
    assert_eq!(state, TaskState::Completed);
}

#[test]
fn test_pending_task_without_due_date() {
    assert_eq!(TaskState::classify(TaskStatus::Pending, None, day(2024, 2, 1)), TaskState::Pending);
}

#[test]
fn test_task_toggle() {
    assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
    assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
}
