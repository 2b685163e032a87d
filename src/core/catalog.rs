//! Thread-safe aggregation of occurrences into template entries.
//!
//! Every occurrence is merged through [`Catalog::merge`], which performs an
//! atomic get-or-insert-or-update on the entry's key. The map is sharded, so
//! merges of different keys run in parallel while merges of the same key are
//! serialized by the shard lock.

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::{DashMap, mapref::entry::Entry};
use indexmap::IndexMap;
use serde::Serialize;

use super::extract::{Occurrence, ReferenceContext};

/// Separator between message context and message id in a key (gettext's EOT).
pub const CONTEXT_SEPARATOR: char = '\u{0004}';

/// The final scan artifact: key to entry, in first-seen order.
pub type TemplateCatalog = IndexMap<String, TemplateEntry>;

/// One canonical translatable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    pub key: String,
    /// Normalized message text.
    pub message_text: String,
    /// File name (first dot-segment) where the message was first seen.
    pub source_file_hint: String,
    pub references: Vec<ReferenceContext>,
    pub comments: Vec<String>,
}

/// Normalize line endings in a message id.
///
/// `\r\n` becomes `\n`; a remaining lone `\r` becomes the two-character
/// escape `\\n`, which stays distinct from a real line feed.
pub fn normalize_msgid(msgid: &str) -> String {
    if !msgid.contains('\r') {
        return msgid.to_string();
    }
    msgid.replace("\r\n", "\n").replace('\r', "\\n")
}

/// Derive the catalog key for a normalized message id.
///
/// The comment only takes part when `context_from_comment` is set.
pub fn make_template_key(
    msgid: &str,
    comment: Option<&str>,
    context_from_comment: bool,
) -> String {
    match comment {
        Some(context) if context_from_comment && !context.is_empty() => {
            format!("{}{}{}", context, CONTEXT_SEPARATOR, msgid)
        }
        _ => msgid.to_string(),
    }
}

#[derive(Debug)]
struct Slot {
    /// Insertion sequence number, used to restore first-seen order.
    seq: usize,
    entry: TemplateEntry,
}

/// Shared catalog that scan workers merge into.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: DashMap<String, Slot>,
    next_seq: AtomicUsize,
    disable_references: bool,
    context_from_comment: bool,
}

impl Catalog {
    pub fn new(disable_references: bool, context_from_comment: bool) -> Self {
        Self {
            entries: DashMap::new(),
            next_seq: AtomicUsize::new(0),
            disable_references,
            context_from_comment,
        }
    }

    /// Merge one occurrence. Safe to call from many threads at once.
    pub fn merge(&self, occurrence: Occurrence) {
        let Occurrence {
            msgid,
            comment,
            reference,
            file_name,
        } = occurrence;
        let comment = comment.filter(|c| !c.is_empty());

        let msgid = normalize_msgid(&msgid);
        let key = make_template_key(&msgid, comment.as_deref(), self.context_from_comment);

        match self.entries.entry(key) {
            Entry::Occupied(mut slot) => {
                let entry = &mut slot.get_mut().entry;
                if !self.disable_references {
                    entry.references.push(reference);
                }
                if let Some(comment) = comment {
                    if !entry.comments.contains(&comment) {
                        entry.comments.push(comment);
                    }
                }
            }
            Entry::Vacant(slot) => {
                let entry = TemplateEntry {
                    key: slot.key().clone(),
                    message_text: msgid,
                    source_file_hint: file_name,
                    references: if self.disable_references {
                        Vec::new()
                    } else {
                        vec![reference]
                    },
                    comments: comment.into_iter().collect(),
                };
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Slot { seq, entry });
            }
        }
    }

    /// Merge every occurrence of one file, in order.
    pub fn merge_all(&self, occurrences: impl IntoIterator<Item = Occurrence>) {
        for occurrence in occurrences {
            self.merge(occurrence);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of one entry.
    pub fn get(&self, key: &str) -> Option<TemplateEntry> {
        self.entries.get(key).map(|slot| slot.entry.clone())
    }

    /// Consume the catalog, returning entries in first-seen order.
    pub fn into_entries(self) -> TemplateCatalog {
        let mut slots: Vec<Slot> = self.entries.into_iter().map(|(_, slot)| slot).collect();
        slots.sort_by_key(|slot| slot.seq);
        slots
            .into_iter()
            .map(|slot| (slot.entry.key.clone(), slot.entry))
            .collect()
    }
}
