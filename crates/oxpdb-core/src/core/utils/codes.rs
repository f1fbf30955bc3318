use phf::{Map, Set, phf_map, phf_set};

static NUMERIC_BASE_CODES: Map<i64, &'static str> = phf_map! {
    0_i64 => "A",
    1_i64 => "G",
    2_i64 => "C",
    3_i64 => "T",
};

static RESIDUE_TO_BASE: Map<&'static str, &'static str> = phf_map! {
    "ADE" => "A",
    "CYT" => "C",
    "GUA" => "G",
    "THY" => "T",
    "URA" => "U",
};

static BASE_LETTERS: Set<&'static str> = phf_set! { "A", "T", "G", "C", "U" };

pub fn base_letter_for_numeric(code: i64) -> Option<&'static str> {
    NUMERIC_BASE_CODES.get(&code).copied()
}

pub fn base_letter_for_residue(residue_name: &str) -> Option<&'static str> {
    RESIDUE_TO_BASE.get(residue_name.trim()).copied()
}

pub fn is_base_letter(label: &str) -> bool {
    BASE_LETTERS.contains(label)
}

/// Derives the one-letter base label of a template residue from its name.
///
/// Three-letter names map through the residue table, single-letter base names
/// pass through unchanged, and prefixed names such as "DG" or "RU5" drop
/// their leading character.
pub fn fragment_base_label(residue_name: &str) -> String {
    let name = residue_name.trim();
    if let Some(letter) = base_letter_for_residue(name) {
        letter.to_string()
    } else if is_base_letter(name) {
        name.to_string()
    } else {
        name.chars().skip(1).collect()
    }
}
