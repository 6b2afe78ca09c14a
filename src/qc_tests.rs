use crate::{Alphabet, NodeLayout, Pattern, PatternSymbol, TrieConfig, TrieMap};

use std::collections::BTreeMap;

use quickcheck::{quickcheck, Arbitrary, Gen};
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};

const SYMBOLS: &[u8] = b"abc";

/// A short key over a three-letter alphabet, so generated keys share prefixes often.
#[derive(Clone, Debug)]
struct SmallKey(String);

impl Arbitrary for SmallKey {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 6;
        let key = (0..len)
            .map(|_| *g.choose(SYMBOLS).unwrap_or(&b'a') as char)
            .collect();
        SmallKey(key)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(SmallKey))
    }
}

#[derive(Clone, Debug)]
enum Op {
    Put(SmallKey, u8),
    Remove(SmallKey),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Put(SmallKey::arbitrary(g), u8::arbitrary(g))
        } else {
            Op::Remove(SmallKey::arbitrary(g))
        }
    }
}

fn apply(ops: &[Op], layout: NodeLayout) -> (TrieMap<u8>, BTreeMap<String, u8>) {
    let config = TrieConfig::default().layout(layout);
    let mut trie = TrieMap::with_config(config);
    let mut model = BTreeMap::new();
    for op in ops {
        match op {
            Op::Put(SmallKey(key), value) => {
                assert_eq!(trie.put(key, *value).unwrap(), model.insert(key.clone(), *value));
            }
            Op::Remove(SmallKey(key)) => {
                assert_eq!(trie.remove(key), model.remove(key));
            }
        }
    }
    (trie, model)
}

fn layout_for(dense: bool) -> NodeLayout {
    if dense {
        NodeLayout::Dense
    } else {
        NodeLayout::Sparse
    }
}

quickcheck! {
    fn put_then_get_round_trips(entries: Vec<(String, u32)>) -> bool {
        let mut trie = TrieMap::new();
        let mut model = BTreeMap::new();
        for (key, value) in &entries {
            trie.put(key, *value).unwrap();
            model.insert(key.clone(), *value);
        }
        trie.len() == model.len()
            && model.iter().all(|(key, value)| trie.get(key) == Some(value))
    }

    fn put_then_remove_restores_size(entries: Vec<SmallKey>, key: SmallKey) -> bool {
        let mut trie = TrieMap::new();
        for SmallKey(existing) in &entries {
            trie.put(existing, ()).unwrap();
        }
        trie.remove(&key.0);
        let before = trie.len();
        let shape = trie.root.audit();

        trie.put(&key.0, ()).unwrap();
        trie.remove(&key.0);

        !trie.contains_key(&key.0) && trie.len() == before && trie.root.audit() == shape
    }

    fn no_dangling_nodes_and_size_matches(ops: Vec<Op>, dense: bool) -> bool {
        let (trie, model) = apply(&ops, layout_for(dense));
        let audit = trie.root.audit();
        audit.dangling == 0 && audit.valued == trie.len() && trie.len() == model.len()
    }

    fn removing_absent_key_changes_nothing(ops: Vec<Op>, key: SmallKey) -> bool {
        let (mut trie, model) = apply(&ops, NodeLayout::Sparse);
        if model.contains_key(&key.0) {
            return true;
        }
        let shape = trie.root.audit();
        let len = trie.len();
        trie.remove(&key.0).is_none() && trie.len() == len && trie.root.audit() == shape
    }

    fn keys_come_out_sorted(ops: Vec<Op>, dense: bool) -> bool {
        let (trie, model) = apply(&ops, layout_for(dense));
        let expected: Vec<String> = model.keys().cloned().collect();
        trie.keys() == expected
            && trie.iter().map(|(key, _)| key).collect::<Vec<_>>() == expected
    }

    fn keys_with_prefix_matches_filter(ops: Vec<Op>, prefix: SmallKey) -> bool {
        let (trie, model) = apply(&ops, NodeLayout::Sparse);
        let expected: Vec<String> = model
            .keys()
            .filter(|key| key.starts_with(&prefix.0))
            .cloned()
            .collect();
        trie.has_key_with_prefix(&prefix.0) == !expected.is_empty()
            && trie.keys_with_prefix(&prefix.0) == expected
            && trie.view_prefix(&prefix.0).len() == expected.len()
    }

    fn prefix_of_query_matches_model(ops: Vec<Op>, query: SmallKey) -> bool {
        let (trie, model) = apply(&ops, NodeLayout::Sparse);
        let prefixes: Vec<&String> = model
            .keys()
            .filter(|key| query.0.starts_with(key.as_str()))
            .collect();
        let shortest = prefixes.iter().min_by_key(|key| key.len()).map(|key| (*key).clone());
        let longest = prefixes.iter().max_by_key(|key| key.len()).map(|key| (*key).clone());
        trie.shortest_prefix_of(&query.0) == shortest && trie.longest_prefix_of(&query.0) == longest
    }

    fn pattern_matches_model(ops: Vec<Op>, mask: Vec<bool>, dense: bool) -> bool {
        let (trie, model) = apply(&ops, layout_for(dense));
        // Build the pattern from one stored key, turning masked positions into wildcards
        let template = match model.keys().next() {
            Some(key) => key.clone(),
            None => return !trie.has_match(&Pattern::from_positions(Vec::new())),
        };
        let positions = template
            .bytes()
            .enumerate()
            .map(|(i, b)| if mask.get(i).copied().unwrap_or(false) {
                PatternSymbol::Any
            } else {
                PatternSymbol::Literal(b)
            })
            .collect();
        let pattern = Pattern::from_positions(positions);

        let expected: Vec<String> = model
            .keys()
            .filter(|key| pattern.matches(key.as_bytes()))
            .cloned()
            .collect();
        trie.has_match(&pattern) == !expected.is_empty() && trie.keys_matching(&pattern) == expected
    }
}

#[derive(Clone, Copy)]
enum Action {
    Insert,
    Overwrite,
    QueryExisting,
    QueryNonexistent,
    Prefix,
    RemoveExisting,
    RemoveNonexistent,
}

struct Simulation<R: Rng> {
    model: BTreeMap<String, u64>,
    trie: TrieMap<u64>,

    rng: R,
}

impl<R: Rng> Simulation<R> {
    fn new(rng: R, config: TrieConfig) -> Self {
        Self {
            model: BTreeMap::new(),
            trie: TrieMap::with_config(config),
            rng,
        }
    }

    fn sample(&mut self) -> Action {
        use Action::*;

        if self.model.is_empty() || self.rng.gen_bool(0.3) {
            Insert
        } else {
            let choices = &[
                Overwrite,
                QueryExisting,
                QueryNonexistent,
                Prefix,
                RemoveExisting,
                RemoveNonexistent,
            ];
            *choices.choose(&mut self.rng).unwrap_or(&Insert)
        }
    }

    fn random_key(&mut self) -> String {
        let len = self.rng.gen_range(0..8);
        (0..len)
            .map(|_| *SYMBOLS.choose(&mut self.rng).unwrap_or(&b'a') as char)
            .collect()
    }

    fn sample_key(&mut self) -> String {
        self.model
            .keys()
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    fn nonexistent_key(&mut self) -> String {
        loop {
            let key = self.random_key();
            if !self.model.contains_key(&key) {
                return key;
            }
        }
    }

    fn step(&mut self) {
        use Action::*;
        match self.sample() {
            Insert => {
                let key = self.nonexistent_key();
                let value = self.rng.gen();
                assert!(self.model.insert(key.clone(), value).is_none());
                assert_eq!(self.trie.put(&key, value), Ok(None));
            }
            Overwrite => {
                let key = self.sample_key();
                let value = self.rng.gen();
                let previous = self.model.insert(key.clone(), value);
                assert_eq!(self.trie.put(&key, value), Ok(previous));
            }
            QueryExisting => {
                let key = self.sample_key();
                assert_eq!(self.trie.get(&key), self.model.get(&key));
            }
            QueryNonexistent => {
                let key = self.nonexistent_key();
                assert_eq!(self.trie.get(&key), None);
            }
            Prefix => {
                let prefix = self.random_key();
                let expected: Vec<String> = self
                    .model
                    .keys()
                    .filter(|key| key.starts_with(&prefix))
                    .cloned()
                    .collect();
                assert_eq!(self.trie.keys_with_prefix(&prefix), expected);
            }
            RemoveExisting => {
                let key = self.sample_key();
                assert_eq!(self.trie.remove(&key), self.model.remove(&key));
            }
            RemoveNonexistent => {
                let key = self.nonexistent_key();
                assert_eq!(self.trie.remove(&key), None);
            }
        }

        let audit = self.trie.root.audit();
        assert_eq!(audit.dangling, 0);
        assert_eq!(audit.valued, self.model.len());
        assert_eq!(self.trie.len(), self.model.len());
    }
}

fn simulate(seed: u64, config: TrieConfig) {
    let mut sim = Simulation::new(StdRng::seed_from_u64(seed), config);
    for _ in 0..2000 {
        sim.step();
    }
    let keys: Vec<String> = sim.model.keys().cloned().collect();
    assert_eq!(sim.trie.keys(), keys);
}

#[test]
fn test_simulation_sparse() {
    for seed in 0..4 {
        simulate(seed, TrieConfig::default());
    }
}

#[test]
fn test_simulation_dense_small_alphabet() {
    let alphabet = Alphabet::from_symbols(SYMBOLS.iter().copied()).unwrap();
    for seed in 0..4 {
        simulate(seed, TrieConfig::default().alphabet(alphabet.clone()).layout(NodeLayout::Dense));
    }
}
