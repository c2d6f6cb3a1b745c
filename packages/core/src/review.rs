// ABOUTME: Ordering helpers for the admin application queue
// ABOUTME: Pending applications first, newest first within each group

use std::cmp::Ordering;

use crate::types::{ApplicationStatus, TeamApplication};

fn review_order(a: &TeamApplication, b: &TeamApplication) -> Ordering {
    let a_pending = a.status == ApplicationStatus::Pending;
    let b_pending = b.status == ApplicationStatus::Pending;

    b_pending
        .cmp(&a_pending)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sort applications the way the review queue shows them
pub fn sort_for_review(applications: &mut [TeamApplication]) {
    applications.sort_by(review_order);
}

pub fn pending_count(applications: &[TeamApplication]) -> usize {
    applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Pending)
        .count()
}
