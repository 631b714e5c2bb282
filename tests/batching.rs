use streamline::chunk::{divide_in_chunks, get_chunk};
use streamline::testing::*;
use streamline::{ErrorKind, Stream};

#[test]
fn batch_of_three() -> anyhow::Result<()> {
    let batches = Stream::new(0..10).batch(3)?.to_vec()?;
    assert_eq!(batches, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9]]);
    Ok(())
}

#[test]
fn batches_concatenate_back_to_the_source() -> anyhow::Result<()> {
    let data = random_ints(23, 0..50, 97);
    for size in [1, 2, 10, 96, 97, 200] {
        let batches = Stream::new(data.clone()).batch(size)?.to_vec()?;
        assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= size));
        assert!(batches.iter().rev().skip(1).all(|b| b.len() == size));
        assert_collections_equal(&batches.concat(), &data);
    }
    Ok(())
}

#[test]
fn zero_batch_is_rejected() {
    let err = Stream::new(0..3).batch(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn empty_stream_has_no_batches() -> anyhow::Result<()> {
    assert!(Stream::<u8>::empty().batch(4)?.to_vec()?.is_empty());
    Ok(())
}

#[test]
fn chunk_helpers() -> anyhow::Result<()> {
    let mut it = 0..5;
    assert_eq!(get_chunk(&mut it, 2)?, vec![0, 1]);
    assert_eq!(get_chunk(&mut it, 10)?, vec![2, 3, 4]);
    assert!(get_chunk(&mut it, 1)?.is_empty());
    assert_eq!(get_chunk(&mut (0..3), 0).unwrap_err().kind(), ErrorKind::InvalidArgument);

    let chunks: Vec<_> = divide_in_chunks("abcde".chars(), 2)?.collect();
    assert_eq!(chunks, vec![vec!['a', 'b'], vec!['c', 'd'], vec!['e']]);
    Ok(())
}
