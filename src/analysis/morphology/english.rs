//! POS-aware English morphology.
//!
//! Lemmatizes English words tagged with Penn Treebank labels. Irregular
//! forms are resolved from tables; regular inflections are undone with
//! suffix rules chosen by tag family:
//!
//! | Tags              | Inflection            | Example              |
//! |-------------------|-----------------------|----------------------|
//! | `NNS`, `NNPS`     | plural                | cities → city        |
//! | `VBZ`             | third person singular | watches → watch      |
//! | `VBD`, `VBN`      | past / participle     | stopped → stop       |
//! | `VBG`             | gerund                | making → make        |
//! | `JJR`, `RBR`      | comparative           | bigger → big         |
//! | `JJS`, `RBS`      | superlative           | happiest → happy     |
//! | `MD`              | contracted modal      | 'll → will           |
//!
//! Results are lowercased unless the tag marks a proper noun (`NNP`,
//! `NNPS`). Words with a missing or unknown tag are only case-normalized.
//!
//! # Examples
//!
//! ```
//! use crowd_lemmatizer::analysis::morphology::{EnglishMorphology, Morphology};
//!
//! let morphology = EnglishMorphology::new();
//! assert_eq!(morphology.lemma("running", Some("VBG")).unwrap(), "run");
//! assert_eq!(morphology.lemma("Children", Some("NNS")).unwrap(), "child");
//! assert_eq!(morphology.lemma("went", Some("VBD")).unwrap(), "go");
//! ```

use std::sync::LazyLock;

use ahash::AHashMap;

use crate::analysis::morphology::Morphology;
use crate::error::Result;

/// Inflected verb forms that no suffix rule can undo.
const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("'s", "be"),
    ("'re", "be"),
    ("'m", "be"),
    ("has", "have"),
    ("had", "have"),
    ("'ve", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("began", "begin"),
    ("begun", "begin"),
    ("bent", "bend"),
    ("bit", "bite"),
    ("bitten", "bite"),
    ("bled", "bleed"),
    ("bred", "breed"),
    ("broke", "break"),
    ("broken", "break"),
    ("brought", "bring"),
    ("built", "build"),
    ("bought", "buy"),
    ("came", "come"),
    ("caught", "catch"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("dealt", "deal"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("drank", "drink"),
    ("drunk", "drink"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("dug", "dig"),
    ("fed", "feed"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("felt", "feel"),
    ("fought", "fight"),
    ("found", "find"),
    ("fled", "flee"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("got", "get"),
    ("gotten", "get"),
    ("gave", "give"),
    ("given", "give"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("heard", "hear"),
    ("held", "hold"),
    ("hid", "hide"),
    ("hidden", "hide"),
    ("hung", "hang"),
    ("kept", "keep"),
    ("knew", "know"),
    ("known", "know"),
    ("led", "lead"),
    ("left", "leave"),
    ("lent", "lend"),
    ("lost", "lose"),
    ("made", "make"),
    ("meant", "mean"),
    ("met", "meet"),
    ("paid", "pay"),
    ("ran", "run"),
    ("rode", "ride"),
    ("ridden", "ride"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("said", "say"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("sank", "sink"),
    ("sunk", "sink"),
    ("sat", "sit"),
    ("saw", "see"),
    ("seen", "see"),
    ("sought", "seek"),
    ("sold", "sell"),
    ("sent", "send"),
    ("shook", "shake"),
    ("shaken", "shake"),
    ("shot", "shoot"),
    ("slept", "sleep"),
    ("slid", "slide"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("spent", "spend"),
    ("spun", "spin"),
    ("stood", "stand"),
    ("stole", "steal"),
    ("stolen", "steal"),
    ("stuck", "stick"),
    ("struck", "strike"),
    ("swam", "swim"),
    ("swum", "swim"),
    ("swept", "sweep"),
    ("took", "take"),
    ("taken", "take"),
    ("taught", "teach"),
    ("told", "tell"),
    ("thought", "think"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("understood", "understand"),
    ("woke", "wake"),
    ("woken", "wake"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("wept", "weep"),
    ("won", "win"),
    ("wrote", "write"),
    ("written", "write"),
    ("became", "become"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("vying", "vie"),
];

/// Plural nouns that no suffix rule can undo.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("abuses", "abuse"),
    ("excuses", "excuse"),
    ("fuses", "fuse"),
    ("muses", "muse"),
    ("refuses", "refuse"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("selves", "self"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("thieves", "thief"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("series", "series"),
    ("species", "species"),
    ("news", "news"),
];

/// Comparative and superlative forms that no suffix rule can undo.
const IRREGULAR_GRADES: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("less", "little"),
    ("least", "little"),
    ("further", "far"),
    ("furthest", "far"),
    ("farther", "far"),
    ("farthest", "far"),
];

/// Contracted modals as split off by Penn Treebank tokenizers.
const CONTRACTED_MODALS: &[(&str, &str)] = &[
    ("'ll", "will"),
    ("'d", "would"),
    ("ca", "can"),
    ("wo", "will"),
    ("sha", "shall"),
];

/// Stems ending in a doubled consonant that belongs to the base form.
const KEEP_DOUBLED: &[&str] = &["add", "ebb", "egg", "err", "inn", "odd", "purr", "putt", "butt"];

/// Stems ending in `us` whose base form takes a final `e`.
const US_STEMS: &[&str] = &[
    "us", "caus", "abus", "accus", "refus", "excus", "amus", "confus", "fus", "misus", "reus",
    "diffus", "infus",
];

static VERB_TABLE: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_VERBS.iter().copied().collect());

static NOUN_TABLE: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_NOUNS.iter().copied().collect());

static GRADE_TABLE: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_GRADES.iter().copied().collect());

static MODAL_TABLE: LazyLock<AHashMap<&'static str, &'static str>> =
    LazyLock::new(|| CONTRACTED_MODALS.iter().copied().collect());

/// Rule- and table-based English analyzer.
#[derive(Debug, Clone, Default)]
pub struct EnglishMorphology;

impl EnglishMorphology {
    /// Create a new English analyzer.
    pub fn new() -> Self {
        EnglishMorphology
    }

    /// Lemmatize `word` for the given Penn Treebank tag.
    pub fn lemmatize(&self, word: &str, tag: Option<&str>) -> String {
        let tag = tag.map(str::trim).unwrap_or_default();

        if tag.starts_with("NNP") {
            // Proper nouns keep their casing.
            return if tag == "NNPS" {
                plural_noun(word)
            } else {
                word.to_string()
            };
        }

        let lower = word.to_lowercase();
        match tag {
            "NNS" => plural_noun(&lower),
            "VBZ" | "VBD" | "VBN" | "VBG" | "VBP" => {
                if let Some(base) = VERB_TABLE.get(lower.as_str()) {
                    return (*base).to_string();
                }
                match tag {
                    "VBZ" => third_person(&lower),
                    "VBD" | "VBN" => past(&lower),
                    "VBG" => gerund(&lower),
                    _ => lower,
                }
            }
            "MD" => MODAL_TABLE
                .get(lower.as_str())
                .map(|base| (*base).to_string())
                .unwrap_or(lower),
            "JJR" | "RBR" | "JJS" | "RBS" => {
                if tag.starts_with("RB") && (lower == "better" || lower == "best") {
                    return "well".to_string();
                }
                if let Some(base) = GRADE_TABLE.get(lower.as_str()) {
                    return (*base).to_string();
                }
                if tag.ends_with('R') {
                    comparative(&lower)
                } else {
                    superlative(&lower)
                }
            }
            "RB" if lower == "n't" => "not".to_string(),
            _ => lower,
        }
    }
}

impl Morphology for EnglishMorphology {
    fn lemma(&self, word: &str, pos: Option<&str>) -> Result<String> {
        Ok(self.lemmatize(word, pos))
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

fn plural_noun(word: &str) -> String {
    if let Some(base) = NOUN_TABLE.get(word.to_lowercase().as_str()) {
        return (*base).to_string();
    }
    let len = word.len();
    if word.ends_with("ies") && len > 4 {
        return format!("{}y", &word[..len - 3]);
    }
    if let Some(stem) = us_plural_stem(word) {
        return stem.to_string();
    }
    if ends_with_sibilant_es(word) || (word.ends_with("oes") && len > 5) {
        return word[..len - 2].to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) if has_letter(stem) => stem.to_string(),
        _ => word.to_string(),
    }
}

/// `buses` → `bus`, `viruses` → `virus`. A vowel before `us` (`houses`,
/// `causes`) keeps the silent `e`.
fn us_plural_stem(word: &str) -> Option<&str> {
    let stem = word.strip_suffix("es")?;
    let before = stem.strip_suffix("us")?.chars().last()?;
    (!matches!(before, 'a' | 'e' | 'i' | 'o' | 'u')).then_some(stem)
}

fn has_letter(stem: &str) -> bool {
    stem.chars().any(char::is_alphanumeric)
}

fn third_person(word: &str) -> String {
    let len = word.len();
    if word.ends_with("ies") {
        return if len > 4 {
            format!("{}y", &word[..len - 3])
        } else {
            word[..len - 1].to_string()
        };
    }
    if ends_with_sibilant_es(word) || word.ends_with("oes") {
        return word[..len - 2].to_string();
    }
    if word.ends_with("ss") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) if has_letter(stem) => stem.to_string(),
        _ => word.to_string(),
    }
}

fn past(word: &str) -> String {
    let len = word.len();
    if word.ends_with("ied") {
        return if len > 4 {
            format!("{}y", &word[..len - 3])
        } else {
            word[..len - 1].to_string()
        };
    }
    if word.ends_with("eed") && len > 4 {
        return word[..len - 1].to_string();
    }
    match word.strip_suffix("ed") {
        Some(stem) if has_vowel(stem) => restore_stem(stem),
        _ => word.to_string(),
    }
}

fn gerund(word: &str) -> String {
    match word.strip_suffix("ing") {
        Some(stem) if has_vowel(stem) => restore_stem(stem),
        _ => word.to_string(),
    }
}

fn comparative(word: &str) -> String {
    let len = word.len();
    if word.ends_with("ier") && len > 4 {
        return format!("{}y", &word[..len - 3]);
    }
    if word.ends_with("eer") {
        return word[..len - 1].to_string();
    }
    match word.strip_suffix("er") {
        Some(stem) if has_vowel(stem) => restore_stem(stem),
        _ => word.to_string(),
    }
}

fn superlative(word: &str) -> String {
    let len = word.len();
    if word.ends_with("iest") && len > 5 {
        return format!("{}y", &word[..len - 4]);
    }
    if word.ends_with("eest") {
        return word[..len - 2].to_string();
    }
    match word.strip_suffix("est") {
        Some(stem) if has_vowel(stem) => restore_stem(stem),
        _ => word.to_string(),
    }
}

fn ends_with_sibilant_es(word: &str) -> bool {
    ["sses", "shes", "ches", "xes", "zzes"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
}

/// Rebuild a base form from a stem whose inflectional suffix was removed.
///
/// Undoes consonant doubling (`stopp` → `stop`) and restores a dropped
/// final `e` (`mak` → `make`).
fn restore_stem(stem: &str) -> String {
    if KEEP_DOUBLED.contains(&stem) {
        return stem.to_string();
    }

    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    if n >= 3 && chars[n - 1] == chars[n - 2] && "bdgmnprt".contains(chars[n - 1]) {
        return chars[..n - 1].iter().collect();
    }

    if takes_final_e(&chars) || US_STEMS.contains(&stem) {
        return format!("{stem}e");
    }

    stem.to_string()
}

fn takes_final_e(chars: &[char]) -> bool {
    let n = chars.len();
    if n < 2 {
        return false;
    }
    let last = chars[n - 1];
    let prev = chars[n - 2];

    match last {
        'v' => return true,
        'c' if n >= 3 => return true,
        'z' if prev != 'z' => return true,
        'g' if prev == 'd' || prev == 'r' => return true,
        'l' if "bcdfgkptz".contains(prev) => return true,
        'r' if n >= 3 && matches!(prev, 'i' | 'u' | 'a') => {
            let before = chars[n - 3];
            if !is_vowel_at(chars, n - 3)
                || (prev == 'i' && before == 'u' && n >= 4 && chars[n - 4] == 'q')
            {
                return true;
            }
        }
        's' if n >= 3 && matches!(prev, 'a' | 'i' | 'o') => return true,
        _ => {}
    }

    // A single-syllable consonant-vowel-consonant stem that was not doubled
    // lost a silent `e`: lik → like, hop → hope.
    n >= 3
        && vowel_groups(chars) == 1
        && !is_vowel_at(chars, n - 3)
        && is_vowel_at(chars, n - 2)
        && !is_vowel_at(chars, n - 1)
        && !"wxy".contains(last)
}

fn is_vowel_at(chars: &[char], i: usize) -> bool {
    match chars[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => true,
        'y' => i > 0 && !is_vowel_at(chars, i - 1),
        _ => false,
    }
}

fn vowel_groups(chars: &[char]) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for i in 0..chars.len() {
        let vowel = is_vowel_at(chars, i);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    groups
}

fn has_vowel(stem: &str) -> bool {
    let chars: Vec<char> = stem.chars().collect();
    vowel_groups(&chars) > 0
}
