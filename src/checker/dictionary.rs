use crate::error::Result;
use crate::parser::{is_break_char, markdown};
use fst::{Set, Streamer};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Corpus words seen at least this many times are treated as vocabulary.
pub const DEFAULT_MIN_FREQUENCY: u32 = 3;

/// Suffix rewrites from US to Commonwealth spelling. Longest suffixes first.
const SUFFIX_VARIANTS: &[(&str, &str)] = &[
    ("izations", "isations"),
    ("ization", "isation"),
    ("izing", "ising"),
    ("izers", "isers"),
    ("ized", "ised"),
    ("izer", "iser"),
    ("izes", "ises"),
    ("ize", "ise"),
    ("yzing", "ysing"),
    ("yzed", "ysed"),
    ("yzes", "yses"),
    ("yze", "yse"),
    ("elers", "ellers"),
    ("eling", "elling"),
    ("eled", "elled"),
    ("eler", "eller"),
];

/// Stems whose spelling differs anywhere in the word (`colorful` -> `colourful`).
const STEM_VARIANTS: &[(&str, &str)] = &[
    ("color", "colour"),
    ("honor", "honour"),
    ("favor", "favour"),
    ("flavor", "flavour"),
    ("humor", "humour"),
    ("labor", "labour"),
    ("neighbor", "neighbour"),
    ("behavior", "behaviour"),
    ("rumor", "rumour"),
    ("harbor", "harbour"),
    ("vapor", "vapour"),
    ("armor", "armour"),
    ("endeavor", "endeavour"),
    ("defense", "defence"),
    ("offense", "offence"),
    ("license", "licence"),
    ("pretense", "pretence"),
    ("catalog", "catalogue"),
    ("dialog", "dialogue"),
    ("analog", "analogue"),
    ("center", "centre"),
    ("theater", "theatre"),
    ("fiber", "fibre"),
];

/// Vocabulary shared read-only by every stage of a proofreading run.
pub struct Dictionary {
    case_sensitive: HashSet<String>,
    case_insensitive: Set<Vec<u8>>,
    corpus_frequency: HashMap<String, u32>,
}

impl Dictionary {
    /// Exact-case membership (acronyms, curated proper nouns).
    pub fn contains_exact(&self, word: &str) -> bool {
        self.case_sensitive.contains(word)
    }

    /// Membership after lowercasing the probe.
    pub fn contains_folded(&self, word: &str) -> bool {
        self.case_insensitive.contains(word.to_lowercase().as_bytes())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.contains_exact(word) || self.contains_folded(word)
    }

    /// How often the word occurred across the mined corpus.
    pub fn frequency(&self, word: &str) -> u32 {
        self.corpus_frequency
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Visit every case-insensitive word in byte-lexicographic order.
    pub fn for_each_folded<F: FnMut(&str)>(&self, mut visit: F) {
        let mut stream = self.case_insensitive.stream();
        while let Some(key) = stream.next() {
            if let Ok(word) = std::str::from_utf8(key) {
                visit(word);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.case_sensitive.len() + self.case_insensitive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.case_sensitive.is_empty() && self.case_insensitive.is_empty()
    }
}

/// Accumulates word sources, then freezes them into a [`Dictionary`].
#[derive(Debug)]
pub struct DictionaryBuilder {
    case_sensitive: HashSet<String>,
    case_insensitive: BTreeSet<String>,
    corpus_frequency: HashMap<String, u32>,
    min_frequency: u32,
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self {
            case_sensitive: HashSet::new(),
            case_insensitive: BTreeSet::new(),
            corpus_frequency: HashMap::new(),
            min_frequency: DEFAULT_MIN_FREQUENCY,
        }
    }

    pub fn min_frequency(mut self, min_frequency: u32) -> Self {
        self.min_frequency = min_frequency;
        self
    }

    /// Add one line of the bulk word list. Returns false when skipped.
    pub fn add_bulk_word(&mut self, line: &str) -> bool {
        let word = line.trim();
        let (Some(first), Some(last)) = (word.chars().next(), word.chars().next_back()) else {
            return false;
        };
        if !first.is_alphanumeric() || !last.is_alphanumeric() {
            return false;
        }

        if is_acronym(word) {
            self.case_sensitive.insert(word.to_string());
            return true;
        }

        let lower = word.to_lowercase();
        if lower.contains('-') {
            for segment in lower.split('-').filter(|s| !s.is_empty()) {
                self.case_insensitive.insert(segment.to_string());
            }
        }
        for variant in spelling_variants(&lower) {
            self.case_insensitive.insert(variant);
        }
        self.case_insensitive.insert(lower);
        true
    }

    pub fn add_bulk_words<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter(|line| self.add_bulk_word(line.as_ref()))
            .count()
    }

    /// Add one line of the curated additions list, expanding `stem/ending` shorthand.
    pub fn add_curated(&mut self, line: &str) -> usize {
        let words = expand_addition(line);
        for word in &words {
            if word.chars().any(char::is_uppercase) {
                self.case_sensitive.insert(word.clone());
            } else {
                self.case_insensitive.insert(word.clone());
            }
        }
        words.len()
    }

    pub fn add_curated_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.add_curated(line.as_ref()))
            .sum()
    }

    /// Count every word of a Markdown document towards the corpus frequency table.
    pub fn mine_document(&mut self, markdown_body: &str) {
        let text = markdown::plain_text(markdown_body);
        for raw in text.split(is_break_char) {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if !word.is_empty() {
                self.add_frequency(word, 1);
            }
        }
    }

    pub fn add_frequency(&mut self, word: &str, count: u32) {
        if word.is_empty() {
            return;
        }
        *self
            .corpus_frequency
            .entry(word.to_lowercase())
            .or_insert(0) += count;
    }

    /// Freeze the collected words. Frequent corpus words join the
    /// case-insensitive vocabulary here.
    pub fn build(mut self) -> Result<Dictionary> {
        let min_frequency = self.min_frequency;
        for (word, count) in &self.corpus_frequency {
            if *count >= min_frequency {
                self.case_insensitive.insert(word.clone());
            }
        }

        let case_insensitive = Set::from_iter(self.case_insensitive.iter())?;

        log::debug!(
            "dictionary built: {} case-sensitive, {} case-insensitive, {} corpus words",
            self.case_sensitive.len(),
            case_insensitive.len(),
            self.corpus_frequency.len()
        );

        Ok(Dictionary {
            case_sensitive: self.case_sensitive,
            case_insensitive,
            corpus_frequency: self.corpus_frequency,
        })
    }
}

/// All-uppercase entries are acronyms and keep their exact case.
fn is_acronym(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// Commonwealth spellings of a lowercase US word, not including the word itself.
pub fn spelling_variants(word: &str) -> Vec<String> {
    let mut variants = Vec::new();

    for (us, other) in SUFFIX_VARIANTS {
        if let Some(stem) = word.strip_suffix(us) {
            if stem.chars().count() >= 3 {
                variants.push(format!("{stem}{other}"));
            }
            break;
        }
    }

    for (us, other) in STEM_VARIANTS {
        if word.contains(us) && !word.contains(other) {
            variants.push(word.replacen(us, other, 1));
        }
    }

    variants
}

/// Expand a curated line. `flatlin/ed/ing` yields `flatlined` and
/// `flatlining`; blank, comment and malformed lines yield nothing.
pub fn expand_addition(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.chars().any(char::is_whitespace) {
        return Vec::new();
    }

    let mut parts = line.split('/');
    let stem = parts.next().unwrap_or_default();
    if stem.is_empty() {
        return Vec::new();
    }
    if !line.contains('/') {
        return vec![stem.to_string()];
    }

    parts.map(|ending| format!("{stem}{ending}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_words_and_variants() {
        let mut builder = DictionaryBuilder::new();
        builder.add_bulk_word("organize");
        builder.add_bulk_word("color");
        builder.add_bulk_word("traveled");
        let dict = builder.build().unwrap();

        assert!(dict.contains("organize"));
        assert!(dict.contains("organise"));
        assert!(dict.contains("colour"));
        assert!(dict.contains("Color"));
        assert!(dict.contains("travelled"));
    }

    #[test]
    fn test_short_stems_are_not_rewritten() {
        assert!(spelling_variants("size").is_empty());
        assert!(spelling_variants("prize").is_empty());
        assert_eq!(spelling_variants("analyze"), vec!["analyse".to_string()]);
    }

    #[test]
    fn test_acronyms_are_case_sensitive() {
        let mut builder = DictionaryBuilder::new();
        builder.add_bulk_word("NASA");
        let dict = builder.build().unwrap();

        assert!(dict.contains("NASA"));
        assert!(!dict.contains("nasa"));
        assert!(!dict.contains("Nasa"));
    }

    #[test]
    fn test_bulk_skips_punctuated_entries() {
        let mut builder = DictionaryBuilder::new();
        assert!(!builder.add_bulk_word("-ism"));
        assert!(!builder.add_bulk_word("etc."));
        assert!(!builder.add_bulk_word("   "));
        assert!(builder.add_bulk_word("well-known"));
        let dict = builder.build().unwrap();

        assert!(dict.contains("well-known"));
        assert!(dict.contains("well"));
        assert!(dict.contains("known"));
        assert!(!dict.contains("ism"));
    }

    #[test]
    fn test_expand_addition() {
        assert_eq!(
            expand_addition("flatlin/ed/ing"),
            vec!["flatlined".to_string(), "flatlining".to_string()]
        );
        assert_eq!(expand_addition("rustacean"), vec!["rustacean".to_string()]);
        assert_eq!(expand_addition("run//s"), vec!["run".to_string(), "runs".to_string()]);
        assert!(expand_addition("# comment").is_empty());
        assert!(expand_addition("").is_empty());
        assert!(expand_addition("/ed/ing").is_empty());
        assert!(expand_addition("two words").is_empty());
    }

    #[test]
    fn test_curated_case_routing() {
        let mut builder = DictionaryBuilder::new();
        builder.add_curated_lines(["GitHub", "flatlin/ed/ing", "# ignored", ""]);
        let dict = builder.build().unwrap();

        assert!(dict.contains("GitHub"));
        assert!(!dict.contains("github"));
        assert!(dict.contains("Flatlined"));
        assert!(dict.contains("flatlining"));
    }

    #[test]
    fn test_corpus_mining_threshold() {
        let mut builder = DictionaryBuilder::new();
        builder.mine_document("Kubernetes is great. **Kubernetes!** `kubectl` runs.");
        builder.mine_document("I like Kubernetes and tokio.");
        let dict = builder.build().unwrap();

        assert_eq!(dict.frequency("kubernetes"), 3);
        assert_eq!(dict.frequency("Kubernetes"), 3);
        assert!(dict.contains("kubernetes"));
        assert!(!dict.contains("tokio"));
        assert_eq!(dict.frequency("kubectl"), 0);
    }

    #[test]
    fn test_custom_min_frequency() {
        let mut builder = DictionaryBuilder::new().min_frequency(1);
        builder.mine_document("tokio");
        let dict = builder.build().unwrap();
        assert!(dict.contains("tokio"));
    }

    #[test]
    fn test_folded_iteration_is_sorted() {
        let mut builder = DictionaryBuilder::new();
        builder.add_bulk_words(["pear", "Apple", "fig"]);
        let dict = builder.build().unwrap();

        let mut words = Vec::new();
        dict.for_each_folded(|w| words.push(w.to_string()));
        assert_eq!(words, vec!["apple", "fig", "pear"]);
    }
}
