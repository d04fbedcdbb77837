//! Flashcard validation and bulk-sync planning.
//!
//! A bulk sync makes a deck's stored cards match a client-submitted sequence.
//! Entries carrying an id update that card; entries without one are new.
//! Stored cards whose id was not submitted are deleted. This module parses
//! the submission and computes the plan; `recallr_db` executes it.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{parse_id_value, DbId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of entries accepted in one bulk sync.
pub const MAX_SYNC_ENTRIES: usize = 1000;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One validated entry of a bulk sync submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncEntry {
    /// Existing card id, or `None` for a new card.
    pub id: Option<DbId>,
    pub term: String,
    pub definition: String,
}

/// Overwrite of an existing card's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardUpdate {
    pub id: DbId,
    pub term: String,
    pub definition: String,
}

/// A card to insert under the target deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub term: String,
    pub definition: String,
}

/// The writes needed to reconcile a deck with a submission.
///
/// Execution order is deletes, then updates, then inserts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Stored ids absent from the submission, ascending.
    pub delete_ids: Vec<DbId>,
    /// Submitted entries whose id is stored under the deck.
    pub updates: Vec<CardUpdate>,
    /// Submitted ids that are not stored under the deck. Never written.
    pub foreign_ids: Vec<DbId>,
    /// Submitted entries without an id, in submission order.
    pub inserts: Vec<NewCard>,
}

impl SyncPlan {
    /// `true` when the plan performs no deletes, updates, or inserts.
    pub fn is_empty(&self) -> bool {
        self.delete_ids.is_empty() && self.updates.is_empty() && self.inserts.is_empty()
    }
}

/// Row counts produced by executing a [`SyncPlan`].
///
/// Deliberately carries no card ids; callers re-fetch the deck to see them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub deleted: u64,
    pub updated: u64,
    pub inserted: u64,
    /// Entries whose id did not belong to the deck.
    pub skipped: u64,
}

impl SyncSummary {
    /// Total number of rows written.
    pub fn rows_changed(&self) -> u64 {
        self.deleted + self.updated + self.inserted
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a card's term and definition. Both are required and non-blank.
pub fn validate_card_text(term: &str, definition: &str) -> Result<(), CoreError> {
    if term.trim().is_empty() || definition.trim().is_empty() {
        return Err(CoreError::Validation(
            "Term and definition required.".into(),
        ));
    }
    Ok(())
}

/// Parse the raw `flashcards` value of a bulk sync request.
///
/// The value must be a JSON array of objects with string `term` and
/// `definition`. `id` may be absent, `null`, `0`, or `""` for a new card;
/// otherwise it must be a positive integer or a string holding one.
/// The whole submission is rejected on the first invalid entry.
pub fn parse_sync_entries(value: &Value) -> Result<Vec<SyncEntry>, CoreError> {
    let items = value
        .as_array()
        .ok_or_else(|| CoreError::Validation("Flashcards array required.".into()))?;

    if items.len() > MAX_SYNC_ENTRIES {
        return Err(CoreError::Validation(format!(
            "Too many flashcards: {} submitted, at most {MAX_SYNC_ENTRIES} allowed.",
            items.len()
        )));
    }

    items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_entry(i, item))
        .collect()
}

fn parse_entry(index: usize, item: &Value) -> Result<SyncEntry, CoreError> {
    let position = index + 1;
    let obj = item.as_object().ok_or_else(|| {
        CoreError::Validation(format!("Flashcard {position}: entry must be an object."))
    })?;

    let text_field = |key: &str| -> Result<String, CoreError> {
        obj.get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Validation(format!("Flashcard {position}: {key} must be a string."))
            })
    };
    let term = text_field("term")?;
    let definition = text_field("definition")?;

    validate_card_text(&term, &definition).map_err(|_| {
        CoreError::Validation(format!(
            "Flashcard {position}: term and definition required."
        ))
    })?;

    let id = parse_id_value(obj.get("id")).ok_or_else(|| {
        CoreError::Validation(format!(
            "Flashcard {position}: id must be a positive integer."
        ))
    })?;

    Ok(SyncEntry {
        id,
        term,
        definition,
    })
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Compute the writes that make `existing_ids` match `entries`.
///
/// If the same id is submitted more than once, a single update is planned
/// carrying the last occurrence's text, so a resubmission stays a no-op.
pub fn plan_sync(existing_ids: &[DbId], entries: Vec<SyncEntry>) -> SyncPlan {
    let existing: HashSet<DbId> = existing_ids.iter().copied().collect();
    let submitted: HashSet<DbId> = entries.iter().filter_map(|e| e.id).collect();

    let mut delete_ids: Vec<DbId> = existing.difference(&submitted).copied().collect();
    delete_ids.sort_unstable();

    let mut plan = SyncPlan {
        delete_ids,
        ..SyncPlan::default()
    };

    let mut update_slots: HashMap<DbId, usize> = HashMap::new();

    for entry in entries {
        match entry.id {
            Some(id) if existing.contains(&id) => {
                let update = CardUpdate {
                    id,
                    term: entry.term,
                    definition: entry.definition,
                };
                match update_slots.get(&id) {
                    Some(&slot) => plan.updates[slot] = update,
                    None => {
                        update_slots.insert(id, plan.updates.len());
                        plan.updates.push(update);
                    }
                }
            }
            Some(id) => plan.foreign_ids.push(id),
            None => plan.inserts.push(NewCard {
                term: entry.term,
                definition: entry.definition,
            }),
        }
    }

    plan
}
