//! Record ordering applied before records reach the tree model

use std::cmp::Reverse;

use crate::domain::Company;

/// Orders roles and companies by most recent application first.
///
/// Within a company, roles are sorted by applied date, newest first. Companies
/// are then sorted by their newest role; companies without roles go last. The
/// sort is stable, so ties keep their stored order.
pub fn sort_recent_first(companies: &mut [Company]) {
    for company in companies.iter_mut() {
        company.roles.sort_by_key(|r| Reverse(r.applied_date));
    }
    // None sorts below Some, so Reverse puts role-less companies last
    companies.sort_by_key(|c| Reverse(c.latest_applied()));
}
