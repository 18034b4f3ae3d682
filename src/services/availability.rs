// ABOUTME: Availability engine: the fixed half-hour grid minus slots held by active appointments
// ABOUTME: Pure grid and set-difference helpers plus the store-backed query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 BeautyPro

use crate::constants::scheduling::{
    FIRST_SLOT_HOUR, LAST_SLOT_HOUR, SLOTS_PER_DAY, SLOT_INTERVAL_MINUTES,
};
use crate::database::AppointmentStore;
use crate::errors::AppResult;
use crate::models::{SlotTime, TenantId};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Every bookable slot of a day, ascending: 07:00, 07:30, ..., 19:30
///
/// The grid is the same for every professional and every date.
#[must_use]
pub fn slot_grid() -> Vec<SlotTime> {
    let mut grid = Vec::with_capacity(SLOTS_PER_DAY);
    for hour in FIRST_SLOT_HOUR..=LAST_SLOT_HOUR {
        for minute in (0..60).step_by(SLOT_INTERVAL_MINUTES as usize) {
            grid.extend(SlotTime::from_hm(hour, minute));
        }
    }
    grid
}

/// The grid minus `occupied`, keeping grid order
///
/// Occupied labels that are not on the grid are ignored.
#[must_use]
pub fn free_slots(occupied: &[SlotTime]) -> Vec<SlotTime> {
    let taken: HashSet<&SlotTime> = occupied.iter().collect();
    slot_grid()
        .into_iter()
        .filter(|slot| !taken.contains(slot))
        .collect()
}

/// Free slots for one professional on one date
///
/// Only `pending` and `confirmed` appointments hold a slot. Neither the
/// professional nor the date is validated: an unknown professional or a past
/// date simply yields the slots nobody holds.
///
/// # Errors
///
/// Returns an error if the store cannot be read
#[tracing::instrument(skip_all, fields(tenant_id = %owner, date = %date))]
pub async fn available_times(
    store: &dyn AppointmentStore,
    owner: TenantId,
    date: NaiveDate,
) -> AppResult<Vec<SlotTime>> {
    let occupied = store.occupied_times(owner, date).await?;
    Ok(free_slots(&occupied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn slot(label: &str) -> SlotTime {
        label.parse().unwrap()
    }

    struct FixedStore(Vec<SlotTime>);

    #[async_trait]
    impl AppointmentStore for FixedStore {
        async fn occupied_times(
            &self,
            _owner: TenantId,
            _date: NaiveDate,
        ) -> AppResult<Vec<SlotTime>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_grid_has_26_ascending_half_hour_slots() {
        let grid = slot_grid();
        assert_eq!(grid.len(), 26);
        assert_eq!(grid.first().unwrap().as_str(), "07:00");
        assert_eq!(grid[1].as_str(), "07:30");
        assert_eq!(grid.last().unwrap().as_str(), "19:30");
        assert!(grid.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!grid.contains(&slot("20:00")));
    }

    #[test]
    fn test_free_slots_removes_only_occupied_grid_slots() {
        let free = free_slots(&[slot("10:00"), slot("10:00"), slot("08:15")]);
        assert_eq!(free.len(), 25);
        assert!(!free.contains(&slot("10:00")));
        assert!(free.contains(&slot("10:30")));
    }

    #[test]
    fn test_free_slots_with_nothing_occupied_is_full_grid() {
        assert_eq!(free_slots(&[]), slot_grid());
    }

    #[tokio::test]
    async fn test_available_times_reads_through_store() {
        let store = FixedStore(vec![slot("07:00"), slot("19:30")]);
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let first = available_times(&store, TenantId::new(), date).await.unwrap();
        let second = available_times(&store, TenantId::new(), date).await.unwrap();

        assert_eq!(first.len(), 24);
        assert_eq!(first.first().unwrap().as_str(), "07:30");
        assert_eq!(first.last().unwrap().as_str(), "19:00");
        assert_eq!(first, second);
    }
}
