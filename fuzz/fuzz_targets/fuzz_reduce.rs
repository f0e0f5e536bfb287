#![no_main]

use arbitrary::Arbitrary;
use gig::gp::{Mca, Partition, reduce};
use libfuzzer_sys::fuzz_target;

/// Positive words over a small alphabet and a genome to apply.
#[derive(Arbitrary, Debug)]
struct ReduceInput {
    words: Vec<Vec<u8>>,
    genes: Vec<u8>,
}

fuzz_target!(|input: ReduceInput| {
    // Cap inputs to keep the MCA small
    let positive: Vec<Vec<char>> = input
        .words
        .iter()
        .take(16)
        .map(|w| w.iter().take(16).map(|&b| char::from(b'a' + b % 3)).collect())
        .collect();

    let mca = match Mca::build(&positive, ['a', 'b', 'c']) {
        Ok(mca) => mca,
        Err(_) => {
            assert!(positive.is_empty());
            return;
        }
    };
    let n = mca.num_states();
    assert!(mca.acceptor().is_total());

    let genes: Vec<usize> = (0..n)
        .map(|i| input.genes.get(i).map_or(i, |&g| g as usize))
        .collect();
    let partition = Partition::new(&genes);
    let reduction = reduce(&mca, &partition).expect("genome matches the MCA");

    assert!(reduction.acceptor.is_total());
    assert_eq!(reduction.acceptor.num_states(), partition.group_count());
    if reduction.conflicts.is_empty() {
        for word in &positive {
            assert!(reduction.acceptor.accepts(word));
        }
    }

    // A genome of the wrong length is reported, not a panic.
    let wrong = Partition::identity(n + 1);
    assert!(reduce(&mca, &wrong).is_err());
});
