use colorgame_feed::models::Record;

/// Nombre d'occurrences de chaque chiffre 0-9.
pub fn digit_counts(records: &[Record]) -> [u32; 10] {
    let mut counts = [0u32; 10];
    for r in records {
        if let Some(c) = counts.get_mut(r.number as usize) {
            *c += 1;
        }
    }
    counts
}

/// Indice du maximum, le premier atteint en cas d'égalité (donc le plus petit chiffre).
/// None si tout est à zéro.
pub fn first_max(counts: &[u32]) -> Option<u8> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &c) in counts.iter().enumerate() {
        if c == 0 {
            continue;
        }
        match best {
            Some((_, b)) if c <= b => {}
            _ => best = Some((i, c)),
        }
    }
    best.map(|(i, _)| i as u8)
}
