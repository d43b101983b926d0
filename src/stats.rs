//! Collection-wide status counts.

use serde::{Deserialize, Serialize};

use crate::item::{CollectionItem, Status};

/// How many items sit in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub owned: usize,
    pub wishlist: usize,
    pub on_order: usize,
    pub not_interested: usize,
    pub neutral: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a CollectionItem>) -> Self {
        let mut counts = Self::default();
        for item in items {
            counts.record(item.status());
        }
        counts
    }

    pub fn record(&mut self, status: Status) {
        match status {
            Status::Owned => self.owned += 1,
            Status::Wishlist => self.wishlist += 1,
            Status::OnOrder => self.on_order += 1,
            Status::NotInterested => self.not_interested += 1,
            Status::Neutral => self.neutral += 1,
        }
        self.total += 1;
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Owned => self.owned,
            Status::Wishlist => self.wishlist,
            Status::OnOrder => self.on_order,
            Status::NotInterested => self.not_interested,
            Status::Neutral => self.neutral,
        }
    }
}
