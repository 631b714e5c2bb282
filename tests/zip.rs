use streamline::Stream;

#[test]
fn zip_truncates_to_shortest() -> anyhow::Result<()> {
    let pairs = Stream::new(vec!['a', 'b', 'c']).zip(1..).to_vec()?;
    assert_eq!(pairs, vec![('a', 1), ('b', 2), ('c', 3)]);

    let flipped = Stream::new(0..10).zip_before(vec!["x", "y"]).to_vec()?;
    assert_eq!(flipped, vec![("x", 0), ("y", 1)]);
    Ok(())
}

#[test]
fn zip_many_places_self_by_flag() -> anyhow::Result<()> {
    let after = Stream::new(0..3).zip_many(vec![10..20, 20..30], true).to_vec()?;
    assert_eq!(after, vec![vec![0, 10, 20], vec![1, 11, 21], vec![2, 12, 22]]);

    let before = Stream::new(0..3).zip_many(vec![10..20, 20..30], false).to_vec()?;
    assert_eq!(before[0], vec![10, 20, 0]);
    Ok(())
}

#[test]
fn zip_many_with_no_others_wraps_each_element() -> anyhow::Result<()> {
    let rows = Stream::new(0..3).zip_many(Vec::<Vec<i32>>::new(), true).to_vec()?;
    assert_eq!(rows, vec![vec![0], vec![1], vec![2]]);
    Ok(())
}

#[test]
fn zip_longest_pads_either_side() -> anyhow::Result<()> {
    let short_self = Stream::new(0..2).zip_longest(10..14, true, -1).to_vec()?;
    assert_eq!(short_self, vec![(0, 10), (1, 11), (-1, 12), (-1, 13)]);

    let short_other = Stream::new(0..4).zip_longest(10..11, true, -1).to_vec()?;
    assert_eq!(short_other, vec![(0, 10), (1, -1), (2, -1), (3, -1)]);

    let empty = Stream::<i32>::empty().zip_longest(Vec::new(), true, 0).to_vec()?;
    assert!(empty.is_empty());
    Ok(())
}

#[test]
fn zip_longest_many_never_fails() -> anyhow::Result<()> {
    let rows = Stream::new(vec![1])
        .zip_longest_many(vec![vec![2, 3], vec![]], true, 0)
        .to_vec()?;
    assert_eq!(rows, vec![vec![1, 2, 0], vec![0, 3, 0]]);

    let rows = Stream::new(vec![1])
        .zip_longest_many(vec![vec![2, 3]], false, 9)
        .to_vec()?;
    assert_eq!(rows, vec![vec![2, 1], vec![3, 9]]);
    Ok(())
}

#[test]
fn cycle_repeats_the_other_sequence() -> anyhow::Result<()> {
    let tagged = Stream::new(vec!["a", "b", "c", "d", "e"]).cycle(vec![0, 1]).to_vec()?;
    assert_eq!(tagged, vec![("a", 0), ("b", 1), ("c", 0), ("d", 1), ("e", 0)]);

    let nothing = Stream::new(0..5).cycle(Vec::<i32>::new()).to_vec()?;
    assert!(nothing.is_empty());
    Ok(())
}
