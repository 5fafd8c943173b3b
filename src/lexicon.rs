// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dense integer ids for document keys and terms.
//!
//! A lexicon is a bijection between strings and `[0, n)`, assigned greedily in
//! first-seen order. The counter lives in a [`LexiconBuilder`] owned by whoever
//! builds the index; [`LexiconBuilder::freeze`] hands back an immutable
//! [`Lexicon`] once construction is over.
//!
//! Same input, same order, same ids. Determinism of the whole index rests on this.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::Serialize;

use crate::types::{DocId, TermId};

/// Growing string → id mapping. Ids are handed out from a counter starting at 0.
#[derive(Debug, Clone)]
pub struct LexiconBuilder<Id> {
    ids: HashMap<String, u32>,
    keys: Vec<String>,
    _id: PhantomData<Id>,
}

impl<Id> Default for LexiconBuilder<Id> {
    fn default() -> Self {
        LexiconBuilder {
            ids: HashMap::new(),
            keys: Vec::new(),
            _id: PhantomData,
        }
    }
}

impl<Id: From<u32> + Copy> LexiconBuilder<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `key`, assigning the next one if `key` is new.
    pub fn intern(&mut self, key: &str) -> Id {
        if let Some(&id) = self.ids.get(key) {
            return Id::from(id);
        }
        let id = self.keys.len() as u32;
        self.ids.insert(key.to_string(), id);
        self.keys.push(key.to_string());
        Id::from(id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Stop growing. The result is read-only.
    pub fn freeze(self) -> Lexicon<Id> {
        Lexicon {
            ids: self.ids,
            keys: self.keys,
            _id: PhantomData,
        }
    }
}

/// Frozen string ↔ id bijection.
#[derive(Debug, Clone, Serialize)]
pub struct Lexicon<Id> {
    #[serde(skip)]
    ids: HashMap<String, u32>,
    /// `keys[id]` is the string with that id.
    keys: Vec<String>,
    #[serde(skip)]
    _id: PhantomData<Id>,
}

impl<Id: From<u32> + Copy> Lexicon<Id> {
    /// Assign ids to `keys` in order; duplicates collapse to their first id.
    pub fn from_keys<'k>(keys: impl IntoIterator<Item = &'k str>) -> Self {
        let mut builder = LexiconBuilder::new();
        for key in keys {
            builder.intern(key);
        }
        builder.freeze()
    }

    /// `None` for strings never seen during construction.
    pub fn get(&self, key: &str) -> Option<Id> {
        self.ids.get(key).map(|&id| Id::from(id))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(id, key)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &str)> {
        self.keys
            .iter()
            .enumerate()
            .map(|(id, key)| (Id::from(id as u32), key.as_str()))
    }
}

impl Lexicon<DocId> {
    pub fn key(&self, id: DocId) -> Option<&str> {
        self.keys.get(id.index()).map(String::as_str)
    }
}

impl Lexicon<TermId> {
    pub fn term(&self, id: TermId) -> Option<&str> {
        self.keys.get(id.index()).map(String::as_str)
    }
}

pub type DocLexicon = Lexicon<DocId>;
pub type TermLexicon = Lexicon<TermId>;
