// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{JobRecord, Review, RouterCommand, RouterState};

pub const SIMILAR_JOB_LIMIT: usize = 3;

// Fallback literals are part of the rendered contract, not placeholders.
pub const FALLBACK_DESCRIPTION: &str = "詳細情報なし";
pub const FALLBACK_NOTES: &str = "特になし";
pub const FALLBACK_ADDRESS: &str = "住所情報なし";
pub const FALLBACK_SHOP_NAME: &str = "店舗名なし";
pub const NO_REVIEWS_PLACEHOLDER: &str = "まだレビューはありません。";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateSlot {
    pub date: String,
    pub weekday: String,
    pub time: String,
    pub price: String,
    pub capacity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarJob {
    pub index: usize,
    pub title: String,
    pub display_time: String,
    pub place: String,
    pub price: String,
    pub image_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub index: usize,
    pub title: String,
    pub price: String,
    pub display_time: String,
    pub image_key: String,
    pub description: String,
    pub notes: String,
    pub address: String,
    pub shop_name: String,
    pub items: Vec<String>,
    pub conditions: Vec<String>,
    pub reviews: Vec<Review>,
    pub alternate_slots: Option<Vec<AlternateSlot>>,
    pub similar: Vec<SimilarJob>,
}

impl DetailView {
    // Total rebuild from the catalog: no incremental patching, so two
    // assemblies of the same index are identical.
    pub fn assemble(jobs: &[JobRecord], index: usize) -> Option<Self> {
        let job = jobs.get(index)?;

        let similar = jobs
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .take(SIMILAR_JOB_LIMIT)
            .map(|(other, record)| SimilarJob {
                index: other,
                title: record.title.clone(),
                display_time: record.display_time().to_owned(),
                place: record.place.clone(),
                price: record.price.clone(),
                image_key: record.image_key.clone(),
            })
            .collect();

        Some(Self {
            index,
            title: job.title.clone(),
            price: job.price.clone(),
            display_time: job.display_time().to_owned(),
            image_key: job.image_key.clone(),
            description: optional_text(&job.description, FALLBACK_DESCRIPTION),
            notes: optional_text(&job.notes, FALLBACK_NOTES),
            address: optional_text(&job.address, FALLBACK_ADDRESS),
            shop_name: optional_text(&job.shop_name, FALLBACK_SHOP_NAME),
            items: job.items.clone(),
            conditions: job.conditions.clone(),
            reviews: job.reviews.clone(),
            alternate_slots: job.has_other_dates.then(|| alternate_slots_for(job)),
            similar,
        })
    }
}

// Illustrative two-entry schedule; the second entry reuses the record's own
// price so the alternate listing never contradicts the item being viewed.
fn alternate_slots_for(job: &JobRecord) -> Vec<AlternateSlot> {
    vec![
        AlternateSlot {
            date: "12/2".to_owned(),
            weekday: "火".to_owned(),
            time: "22:00 〜 1:00".to_owned(),
            price: "¥4,279".to_owned(),
            capacity: "0 / 1".to_owned(),
        },
        AlternateSlot {
            date: "12/3".to_owned(),
            weekday: "水".to_owned(),
            time: "21:00 〜 1:00".to_owned(),
            price: job.price.clone(),
            capacity: "0 / 1".to_owned(),
        },
    ]
}

fn optional_text(value: &Option<String>, fallback: &str) -> String {
    value.clone().unwrap_or_else(|| fallback.to_owned())
}

// Assemble-then-route: the router is only told to activate the detail
// screen once assembly has succeeded, so a stale index changes nothing.
pub fn open_detail(
    state: &mut RouterState,
    jobs: &[JobRecord],
    index: usize,
) -> Option<DetailView> {
    let view = DetailView::assemble(jobs, index)?;
    state.dispatch(RouterCommand::ShowDetail);
    Some(view)
}
