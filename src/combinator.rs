//! Combinatorial expansion
//!
//! Enumerates every upper/lower case assignment of a word's cased letters
//! and, in extended mode, every leetspeak substitution of the lowercase
//! letters of each case variant.
//!
//! Output size grows as `2^a` for `a` cased letters, and by a further
//! product over substitutable letters in extended mode. Long words are
//! expensive; nothing is truncated, a warning is logged instead.

use ahash::RandomState;
use hashbrown::{HashMap, HashTable};

/// Estimated variant count above which a warning is logged
pub const VARIANT_WARN_THRESHOLD: u128 = 1 << 20;

/// Common leetspeak substitutions, keyed by lowercase letter
pub const LEET_SUBSTITUTIONS: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['<', '(']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!']),
    ('l', &['1', '|']),
    ('o', &['0']),
    ('s', &['5', '$']),
    ('t', &['7', '+']),
    ('z', &['2']),
];

/// Mapping from a lowercase letter to its substitute characters
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    map: HashMap<char, Vec<char>, RandomState>,
}

impl SubstitutionTable {
    /// Build a table; substitutes for the same letter are merged in order
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: IntoIterator<Item = char>,
    {
        let mut map: HashMap<char, Vec<char>, RandomState> = HashMap::with_hasher(RandomState::new());
        for (letter, subs) in entries {
            let slot = map.entry(letter).or_default();
            for sub in subs {
                if sub != letter && !slot.contains(&sub) {
                    slot.push(sub);
                }
            }
        }
        Self { map }
    }

    /// The built-in leetspeak table
    pub fn leet() -> Self {
        Self::new(
            LEET_SUBSTITUTIONS
                .iter()
                .map(|(letter, subs)| (*letter, subs.iter().copied())),
        )
    }

    #[inline]
    pub fn get(&self, letter: char) -> Option<&[char]> {
        self.map.get(&letter).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self::leet()
    }
}

/// Case and substitution variant generator
#[derive(Debug, Clone)]
pub struct Expander {
    table: SubstitutionTable,
    extended: bool,
}

impl Expander {
    /// Create an expander using the built-in leetspeak table
    pub fn new(extended: bool) -> Self {
        Self::with_table(SubstitutionTable::leet(), extended)
    }

    pub fn with_table(table: SubstitutionTable, extended: bool) -> Self {
        Self { table, extended }
    }

    pub fn extended(&self) -> bool {
        self.extended
    }

    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Expand a word into all of its variants
    ///
    /// The result holds no duplicates and is ordered by generation: each
    /// case variant is followed by its substitution variants. A word without
    /// cased letters yields exactly itself.
    pub fn expand(&self, word: &str) -> Vec<String> {
        match self.estimate(word) {
            Some(count) if count <= VARIANT_WARN_THRESHOLD => {}
            Some(count) => log::warn!("'{}' expands to up to {} variants", word, count),
            None => log::warn!("'{}' expands to more than {} variants", word, u128::MAX),
        }

        let substitute = self.extended && !self.table.is_empty();
        let mut variants = VariantSet::default();

        for_each_case_variant(word, |variant| {
            if substitute {
                let chars: Vec<char> = variant.chars().collect();
                variants.insert(variant);
                self.push_substitutions(&chars, &mut variants);
            } else {
                variants.insert(variant);
            }
        });

        variants.into_vec()
    }

    /// Upper bound on the number of variants `expand` produces
    ///
    /// Returns `None` if the count does not fit in a `u128`.
    pub fn estimate(&self, word: &str) -> Option<u128> {
        word.chars().try_fold(1u128, |total, c| {
            let subs = if self.extended {
                c.to_lowercase()
                    .map(|lower| self.table.get(lower).map_or(0, <[char]>::len))
                    .sum::<usize>()
            } else {
                0
            };
            let choices = if has_case(c) { 2 + subs } else { 1 };
            total.checked_mul(choices as u128)
        })
    }

    /// Add every non-empty substitution of a single case variant
    fn push_substitutions(&self, chars: &[char], variants: &mut VariantSet) {
        let slots: Vec<(usize, &[char])> = chars
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_lowercase())
            .filter_map(|(i, &c)| self.table.get(c).map(|subs| (i, subs)))
            .filter(|(_, subs)| !subs.is_empty())
            .collect();

        if slots.is_empty() {
            return;
        }

        let radices: Vec<usize> = slots.iter().map(|(_, subs)| subs.len() + 1).collect();
        for_each_combination(&radices, |digits| {
            // all zeros is the case variant itself
            if digits.iter().all(|&d| d == 0) {
                return;
            }

            let mut substituted = chars.to_vec();
            for (&(pos, subs), &digit) in slots.iter().zip(digits) {
                if digit > 0 {
                    substituted[pos] = subs[digit - 1];
                }
            }
            variants.insert(substituted.into_iter().collect());
        });
    }
}

impl Default for Expander {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Expand a word with the built-in leetspeak table
pub fn expand(word: &str, extended: bool) -> Vec<String> {
    Expander::new(extended).expand(word)
}

/// Visit every case assignment of the cased letters in `word`
///
/// The all-lowercase variant comes first.
fn for_each_case_variant<F>(word: &str, mut visit: F)
where
    F: FnMut(String),
{
    let chars: Vec<char> = word.chars().collect();
    let cased: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| has_case(**c))
        .map(|(i, _)| i)
        .collect();

    for_each_combination(&vec![2; cased.len()], |digits| {
        let mut variant = String::with_capacity(word.len());
        let mut next = 0;

        for (i, &c) in chars.iter().enumerate() {
            if cased.get(next) == Some(&i) {
                if digits[next] == 1 {
                    variant.extend(c.to_uppercase());
                } else {
                    variant.extend(c.to_lowercase());
                }
                next += 1;
            } else {
                variant.push(c);
            }
        }

        visit(variant);
    });
}

/// True for letters whose upper and lower case forms differ
#[inline]
fn has_case(c: char) -> bool {
    c.is_alphabetic() && !c.to_lowercase().eq(c.to_uppercase())
}

/// Visit every digit vector of a mixed-radix counter, lowest position first
///
/// An empty radix list visits the single empty combination.
fn for_each_combination<F>(radices: &[usize], mut visit: F)
where
    F: FnMut(&[usize]),
{
    let mut digits = vec![0usize; radices.len()];

    loop {
        visit(&digits);

        let mut pos = 0;
        loop {
            if pos == digits.len() {
                return;
            }
            digits[pos] += 1;
            if digits[pos] < radices[pos] {
                break;
            }
            digits[pos] = 0;
            pos += 1;
        }
    }
}

/// Insertion-ordered string set
///
/// Each variant is owned once, by `ordered`; the table indexes into it.
#[derive(Default)]
struct VariantSet {
    hasher: RandomState,
    index: HashTable<usize>,
    ordered: Vec<String>,
}

impl VariantSet {
    fn insert(&mut self, variant: String) -> bool {
        let hash = self.hasher.hash_one(variant.as_str());
        let ordered = &self.ordered;
        if self.index.find(hash, |&i| ordered[i] == variant).is_some() {
            return false;
        }

        let hasher = &self.hasher;
        self.index
            .insert_unique(hash, ordered.len(), |&i| hasher.hash_one(ordered[i].as_str()));
        self.ordered.push(variant);
        true
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut words: Vec<String>) -> Vec<String> {
        words.sort();
        words
    }

    fn assert_unique(words: &[String]) {
        let unique: hashbrown::HashSet<&String> = words.iter().collect();
        assert_eq!(unique.len(), words.len(), "duplicates in {:?}", words);
    }

    #[test]
    fn test_case_permutations() {
        let variants = expand("ab", false);
        assert_eq!(variants, vec!["ab", "Ab", "aB", "AB"]);
    }

    #[test]
    fn test_non_alphabetic_positions_fixed() {
        let variants = expand("1a", false);
        assert_eq!(sorted(variants), vec!["1A", "1a"]);
    }

    #[test]
    fn test_no_letters_yields_word_itself() {
        assert_eq!(expand("1234!", false), vec!["1234!"]);
        assert_eq!(expand("1234", true), vec!["1234"]);
        assert_eq!(expand("", false), vec![""]);
    }

    #[test]
    fn test_power_of_two_count() {
        let variants = expand("Pass1", false);
        assert_eq!(variants.len(), 16);
        assert_unique(&variants);
        assert!(variants.contains(&"pass1".to_string()));
        assert!(variants.contains(&"PASS1".to_string()));
    }

    #[test]
    fn test_mixed_case_input_normalized() {
        let variants = expand("aB", false);
        assert_eq!(sorted(variants), sorted(expand("ab", false)));
    }

    #[test]
    fn test_extended_with_single_substitutes() {
        let table = SubstitutionTable::new([('a', vec!['@']), ('b', vec!['8'])]);
        let variants = Expander::with_table(table, true).expand("ab");

        // ab -> 4, Ab -> 2, aB -> 2, AB -> 1
        assert_eq!(variants.len(), 9);
        assert_unique(&variants);
        for expected in ["ab", "@b", "a8", "@8", "Ab", "A8", "aB", "@B", "AB"] {
            assert!(variants.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_extended_with_leet_table() {
        let variants = expand("a", true);
        assert_eq!(sorted(variants), vec!["4", "@", "A", "a"]);
    }

    #[test]
    fn test_extended_multi_substitute_product() {
        // a: {a,4,@} x b: {b,8} = 6 for "ab", plus Ab (2), aB (3), AB (1)
        let variants = expand("ab", true);
        assert_eq!(variants.len(), 12);
        assert_unique(&variants);
        assert!(variants.contains(&"@8".to_string()));
        assert!(variants.contains(&"48".to_string()));
    }

    #[test]
    fn test_uppercase_not_substituted() {
        let variants = expand("o", true);
        assert_eq!(sorted(variants), vec!["0", "O", "o"]);
    }

    #[test]
    fn test_extended_dedups_colliding_substitutes() {
        // 'i' and 'l' both map to '1'
        let variants = expand("il", true);
        assert_unique(&variants);
        assert!(variants.contains(&"11".to_string()));
    }

    #[test]
    fn test_non_extended_ignores_table() {
        let table = SubstitutionTable::new([('a', vec!['@'])]);
        let variants = Expander::with_table(table, false).expand("a");
        assert_eq!(variants, vec!["a", "A"]);
    }

    #[test]
    fn test_accented_letters_are_cased() {
        let variants = expand("ñ1", false);
        assert_eq!(sorted(variants), vec!["Ñ1", "ñ1"]);
    }

    #[test]
    fn test_estimate() {
        let plain = Expander::new(false);
        assert_eq!(plain.estimate("ab"), Some(4));
        assert_eq!(plain.estimate("a1"), Some(2));
        assert_eq!(plain.estimate(""), Some(1));

        let extended = Expander::new(true);
        assert_eq!(extended.estimate("ab"), Some(12));
        assert_eq!(extended.estimate("ab"), Some(expand("ab", true).len() as u128));
    }

    #[test]
    fn test_estimate_overflow() {
        let word = "a".repeat(200);
        assert_eq!(Expander::new(false).estimate(&word), None);
    }

    #[test]
    fn test_substitution_table_merges_entries() {
        let table = SubstitutionTable::new([('a', vec!['4']), ('a', vec!['@', '4']), ('e', vec!['e'])]);
        assert_eq!(table.get('a'), Some(&['4', '@'][..]));
        assert_eq!(table.get('e'), Some(&[][..]));
        assert_eq!(table.get('x'), None);
        assert_eq!(SubstitutionTable::leet().len(), LEET_SUBSTITUTIONS.len());
    }

    #[test]
    fn test_case_variants_stream_lowercase_first() {
        let mut seen = Vec::new();
        for_each_case_variant("Xy1", |variant| seen.push(variant));
        assert_eq!(seen, vec!["xy1", "Xy1", "xY1", "XY1"]);
    }

    #[test]
    fn test_variant_set_keeps_first_occurrence() {
        let mut set = VariantSet::default();
        assert!(set.insert("b".to_string()));
        assert!(set.insert("a".to_string()));
        assert!(!set.insert("b".to_string()));
        assert!(set.insert("c".to_string()));

        assert_eq!(set.into_vec(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_extended_with_empty_table_is_case_only() {
        let table = SubstitutionTable::new(Vec::<(char, Vec<char>)>::new());
        assert!(table.is_empty());
        let variants = Expander::with_table(table, true).expand("ab");
        assert_eq!(variants, vec!["ab", "Ab", "aB", "AB"]);
    }

    #[test]
    fn test_for_each_combination() {
        let mut seen = Vec::new();
        for_each_combination(&[2, 3], |digits| seen.push(digits.to_vec()));
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], vec![0, 0]);
        assert_eq!(seen[1], vec![1, 0]);
        assert_eq!(seen[5], vec![1, 2]);

        let mut count = 0;
        for_each_combination(&[], |_| count += 1);
        assert_eq!(count, 1);
    }
}
