#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use hrms_attendance::{AttendanceService, InMemoryAttendanceStore, InMemoryEmployeeDirectory};

pub struct Fixture {
    pub service: AttendanceService,
    pub store: Arc<InMemoryAttendanceStore>,
    pub directory: Arc<InMemoryEmployeeDirectory>,
}

/// Service over in-memory storage with the given employees registered.
pub fn fixture(employees: &[&str]) -> Fixture {
    let store = Arc::new(InMemoryAttendanceStore::new());
    let directory = Arc::new(InMemoryEmployeeDirectory::with_employees(
        employees.iter().copied(),
    ));
    let service = AttendanceService::new(store.clone(), directory.clone());

    Fixture {
        service,
        store,
        directory,
    }
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
