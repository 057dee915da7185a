use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::category::LeaveCategory;
use crate::model::role::Role;

/// Allotted/used counter pair for one leave category.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryBalance {
    pub allotted: u32,
    pub used: u32,
}

impl CategoryBalance {
    /// `allotted - used`. Signed: a balance can go negative when racing
    /// submissions each passed the pre-check (accepted policy).
    pub fn remaining(&self) -> i64 {
        i64::from(self.allotted) - i64::from(self.used)
    }
}

/// Per-user leave balance ledger entry: one counter pair per category.
///
/// Mutated exclusively through the workflow service; `used` never drops
/// below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    categories: HashMap<LeaveCategory, CategoryBalance>,
}

impl LeaveBalance {
    /// Balance seeded with the standard allotment for every category.
    pub fn standard() -> Self {
        let categories = LeaveCategory::ALL
            .into_iter()
            .map(|c| {
                (
                    c,
                    CategoryBalance {
                        allotted: c.standard_allotment(),
                        used: 0,
                    },
                )
            })
            .collect();
        Self { categories }
    }

    /// Balance with an explicit allotment for one category and standard
    /// allotments for the rest.
    pub fn with_allotment(category: LeaveCategory, allotted: u32) -> Self {
        let mut balance = Self::standard();
        balance
            .categories
            .insert(category, CategoryBalance { allotted, used: 0 });
        balance
    }

    pub fn get(&self, category: LeaveCategory) -> CategoryBalance {
        self.categories
            .get(&category)
            .copied()
            .unwrap_or(CategoryBalance {
                allotted: 0,
                used: 0,
            })
    }

    pub fn set_used(&mut self, category: LeaveCategory, used: u32) {
        let entry = self
            .categories
            .entry(category)
            .or_insert(CategoryBalance {
                allotted: 0,
                used: 0,
            });
        entry.used = used;
    }
}

/// A member of the organization. One entity type for all roles; the
/// reporting chain is a pair of weak references resolved by lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub department: String,
    pub supervisor_id: Option<String>,
    pub hod_id: Option<String>,
    pub balance: LeaveBalance,
}

/// Authenticated identity tuple supplied by the session layer for every
/// workflow call. Trusted as-is; the core never re-derives the role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}
