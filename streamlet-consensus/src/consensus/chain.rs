use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use streamlet_common::env::block::Block;

/// Armazena a visão local da cadeia de um participante, em memória.
///
/// `chain` keeps acceptance order; `by_hash` indexes every accepted block.
/// The notarized set and the finalized sequence only ever grow.
#[derive(Debug, Clone)]
pub struct ChainStore {
    chain: Vec<Block>,
    by_hash: HashMap<String, Block>,
    notarized: HashSet<String>,
    finalized: Vec<Block>,
    finalized_hashes: HashSet<String>,
}

impl ChainStore {
    /// Creates the store with the genesis block already admitted and
    /// notarized by fiat.
    pub fn new() -> Self {
        let genesis = Block::genesis();
        let mut store = Self {
            chain: Vec::new(),
            by_hash: HashMap::new(),
            notarized: HashSet::new(),
            finalized: Vec::new(),
            finalized_hashes: HashSet::new(),
        };
        store.notarized.insert(genesis.hash.clone());
        store.by_hash.insert(genesis.hash.clone(), genesis.clone());
        store.chain.push(genesis);
        store
    }

    /// Admits a block the engine has already validated.
    pub fn insert(&mut self, block: Block) {
        self.by_hash.insert(block.hash.clone(), block.clone());
        self.chain.push(block);
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.by_hash.contains_key(hash)
    }

    pub fn get(&self, hash: &str) -> Option<&Block> {
        self.by_hash.get(hash)
    }

    pub fn is_notarized(&self, hash: &str) -> bool {
        self.notarized.contains(hash)
    }

    /// Marks a block as notarized. Returns false if it already was.
    pub fn mark_notarized(&mut self, hash: &str) -> bool {
        self.notarized.insert(hash.to_string())
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn finalized(&self) -> &[Block] {
        &self.finalized
    }

    pub fn notarized(&self) -> &HashSet<String> {
        &self.notarized
    }

    pub fn is_finalized(&self, hash: &str) -> bool {
        self.finalized_hashes.contains(hash)
    }

    /// The locally synthesized genesis block.
    pub fn genesis(&self) -> &Block {
        &self.chain[0]
    }

    /// Highest epoch among accepted blocks.
    pub fn latest_epoch(&self) -> u64 {
        self.chain.iter().map(|b| b.epoch).max().unwrap_or(0)
    }

    /// Tip of the longest chain of notarized blocks rooted at genesis.
    ///
    /// Ties break deterministically so every honest participant selects the
    /// same tip: longer chain first, then higher tip epoch, then lower
    /// proposer id.
    pub fn longest_notarized_tip(&self) -> &Block {
        let mut best: Option<(usize, &Block)> = None;

        for hash in &self.notarized {
            let Some(depth) = self.notarized_depth(hash) else {
                continue;
            };
            let Some(candidate) = self.by_hash.get(hash) else {
                continue;
            };

            let wins = match best {
                None => true,
                Some((best_depth, incumbent)) => match depth.cmp(&best_depth) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => match candidate.epoch.cmp(&incumbent.epoch) {
                        Ordering::Greater => true,
                        Ordering::Less => false,
                        Ordering::Equal => candidate.proposer < incumbent.proposer,
                    },
                },
            };
            if wins {
                best = Some((depth, candidate));
            }
        }

        match best {
            Some((_, tip)) => tip,
            // Genesis is notarized from construction, so the walk above
            // always yields at least one candidate.
            None => self.genesis(),
        }
    }

    /// Number of blocks on the notarized path from genesis to `hash`,
    /// inclusive. None when the path leaves the notarized set or a parent
    /// is missing.
    fn notarized_depth(&self, hash: &str) -> Option<usize> {
        if !self.notarized.contains(hash) {
            return None;
        }

        let mut current = self.by_hash.get(hash)?;
        let mut depth = 0usize;
        loop {
            depth += 1;
            if current.is_genesis() {
                return Some(depth);
            }
            let parent = self.by_hash.get(&current.parent_hash)?;
            if !self.notarized.contains(&parent.hash) {
                return None;
            }
            current = parent;
        }
    }

    /// The parent-linked path from genesis up to `tip`, inclusive.
    pub fn path_from_genesis(&self, tip: &Block) -> Vec<&Block> {
        let mut path = Vec::new();
        let mut current = match self.by_hash.get(&tip.hash) {
            Some(block) => block,
            None => return path,
        };

        loop {
            path.push(current);
            if current.is_genesis() {
                break;
            }
            match self.by_hash.get(&current.parent_hash) {
                Some(parent) => current = parent,
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// Appends `block` to the finalized sequence unless already present.
    pub fn append_finalized(&mut self, block: Block) -> bool {
        if self.finalized_hashes.contains(&block.hash) {
            return false;
        }
        self.finalized_hashes.insert(block.hash.clone());
        self.finalized.push(block);
        true
    }
}

impl Default for ChainStore {
    fn default() -> Self {
        Self::new()
    }
}
