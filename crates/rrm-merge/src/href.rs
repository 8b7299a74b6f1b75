use rrm_model::{Table, cell};

/// Compare two hrefs segment by segment, ignoring the segment at
/// `skip_segment` so an `active` href matches its `draft` counterpart.
///
/// Hrefs with different segment counts never match. The skip is positional,
/// not named: any reshaping of the href layout silently changes what gets
/// ignored.
pub fn hrefs_match(left: &str, right: &str, skip_segment: usize) -> bool {
    let left: Vec<&str> = left.split('/').collect();
    let right: Vec<&str> = right.split('/').collect();
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right.iter())
        .enumerate()
        .all(|(index, (a, b))| index == skip_segment || a == b)
}

/// Count groups of rule rows whose keys are equivalent under [`hrefs_match`].
///
/// First-match-wins joining silently prefers the earliest row of each group,
/// so callers surface a nonzero count as a warning. Empty keys are not
/// reported; they only ever match an empty report key.
pub fn duplicate_key_groups(rules: &Table, key_index: usize, skip_segment: usize) -> usize {
    let keys: Vec<&str> = rules.rows.iter().map(|row| cell(row, key_index)).collect();
    let mut grouped = vec![false; keys.len()];
    let mut groups = 0usize;
    for first in 0..keys.len() {
        if grouped[first] || keys[first].is_empty() {
            continue;
        }
        let mut size = 1usize;
        for other in (first + 1)..keys.len() {
            if !grouped[other] && hrefs_match(keys[first], keys[other], skip_segment) {
                grouped[other] = true;
                size += 1;
            }
        }
        if size > 1 {
            groups += 1;
        }
    }
    groups
}
