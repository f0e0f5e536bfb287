#![no_main]

use arbitrary::Arbitrary;
use gig::gp::{canonicalize, equals_canonical, is_canonical, Partition};
use libfuzzer_sys::fuzz_target;

/// Raw group ids plus a relabeling offset.
#[derive(Arbitrary, Debug)]
struct CanonicalInput {
    genes: Vec<u16>,
    offset: u16,
}

fuzz_target!(|input: CanonicalInput| {
    let genes: Vec<usize> = input.genes.iter().take(512).map(|&g| g as usize).collect();

    let canonical = canonicalize(&genes);
    assert_eq!(canonical.len(), genes.len());
    assert!(is_canonical(&canonical));
    assert_eq!(canonicalize(&canonical), canonical);

    // Shifting every id is a bijection on groups.
    let shifted: Vec<usize> = genes.iter().map(|&g| g + input.offset as usize).collect();
    assert!(equals_canonical(&genes, &shifted));

    let partition = Partition::new(&genes);
    assert_eq!(partition.genes(), canonical.as_slice());
    assert!(partition.max_group_size() <= partition.len());
    assert!(partition.group_count() <= partition.len());
});
