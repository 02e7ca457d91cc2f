//! Greedy packing of units into bounded chunks.

/// Pack units into chunks, in order.
///
/// A unit joins the current chunk while `len(current) + len(unit) <
/// max_chunk_chars`; otherwise the current chunk is emitted and the unit
/// starts a new one. Lengths are counted in characters, and the running
/// chunk's length includes the single-space separators. A unit that alone
/// reaches the bound still becomes its own chunk.
pub(crate) fn pack_units<'a, I>(units: I, max_chunk_chars: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for unit in units {
        let unit = unit.trim();
        if unit.is_empty() {
            continue;
        }

        let unit_len = unit.chars().count();
        if current_len + unit_len < max_chunk_chars {
            current.push(' ');
            current.push_str(unit);
            current_len += 1 + unit_len;
        } else {
            flush(&mut chunks, &current);
            current = unit.to_string();
            current_len = unit_len;
        }
    }

    flush(&mut chunks, &current);
    chunks
}

fn flush(chunks: &mut Vec<String>, current: &str) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_fits_in_one_chunk() {
        let chunks = pack_units(["One.", "Two.", "Three."], 200);
        assert_eq!(chunks, vec!["One. Two. Three."]);
    }

    #[test]
    fn test_pack_rolls_over_at_bound() {
        // " aaaa" is 5 chars; adding "bbbb" would make 9, which is not < 9.
        let chunks = pack_units(["aaaa", "bbbb", "cc"], 9);
        assert_eq!(chunks, vec!["aaaa", "bbbb cc"]);
    }

    #[test]
    fn test_pack_oversized_unit_stands_alone() {
        let long = "x".repeat(50);
        let chunks = pack_units(["short", long.as_str(), "tail"], 10);
        assert_eq!(chunks, vec!["short".to_string(), long.clone(), "tail".to_string()]);
    }

    #[test]
    fn test_pack_drops_blank_units() {
        let chunks = pack_units(["  ", "\n", "word", "\t"], 20);
        assert_eq!(chunks, vec!["word"]);
    }

    #[test]
    fn test_pack_counts_chars_not_bytes() {
        // Four 2-byte chars each: byte counting would roll over, char counting does not.
        let chunks = pack_units(["ãõçé", "ãõçé"], 10);
        assert_eq!(chunks, vec!["ãõçé ãõçé"]);
    }
}
