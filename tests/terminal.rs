use streamline::comparator::{OrdF64, comparing};
use streamline::testing::*;
use streamline::{Optional, Stream};

#[test]
fn count_min_max() -> anyhow::Result<()> {
    let data = random_ints(5, -500..500, 200);

    assert_eq!(Stream::new(data.clone()).count()?, 200);
    assert_eq!(Stream::new(data.clone()).min()?, Optional::of(*data.iter().min().unwrap()));
    assert_eq!(Stream::new(data.clone()).max()?, Optional::of(*data.iter().max().unwrap()));
    assert!(Stream::<i64>::empty().min()?.is_empty());
    Ok(())
}

#[test]
fn ties_go_to_the_first_element() -> anyhow::Result<()> {
    let students = sample_students();

    let best = Stream::new(students.clone()).max_by_key(|s| s.score)?.into_value()?;
    assert_eq!(best.name, "bilal");

    let best = Stream::new(students.clone()).max_by(comparing(|s: &Student| s.score))?.into_value()?;
    assert_eq!(best.name, "bilal");

    let top_of_tenth = Stream::new(students.clone())
        .filter(|s| s.grade == 10)
        .min_by(comparing(|s: &Student| std::cmp::Reverse(s.score)))?
        .into_value()?;
    assert_eq!(top_of_tenth.name, "asha");

    let worst = Stream::new(students).min_by_key(|s| s.score)?.into_value()?;
    assert_eq!(worst.name, "eli");
    Ok(())
}

#[test]
fn float_keys_via_total_order() -> anyhow::Result<()> {
    let highest = Stream::new(vec![0.5_f64, 2.25, -3.0, 2.25]).max_by_key(|x| OrdF64(*x))?;
    assert_eq!(highest, Optional::of(2.25));
    Ok(())
}

#[test]
fn matches_on_empty_streams() -> anyhow::Result<()> {
    assert!(Stream::<i32>::empty().all(|_| false)?);
    assert!(!Stream::<i32>::empty().any(|_| true)?);
    assert!(Stream::<i32>::empty().none_match(|_| true)?);
    Ok(())
}

#[test]
fn matches_short_circuit_unbounded_sources() -> anyhow::Result<()> {
    let mut n = 0;
    assert!(Stream::from_supplier(move || { n += 1; n }).any(|x| *x > 100)?);

    let mut n = 0;
    assert!(!Stream::from_supplier(move || { n += 1; n }).all(|x| *x < 10)?);

    assert!(Stream::new(vec![1, 3, 5]).none_match(|x| x % 2 == 0)?);
    Ok(())
}

#[test]
fn find_first_after_filter() -> anyhow::Result<()> {
    let first = Stream::new(10..).filter(|x| x % 7 == 0).find_first()?;
    assert_eq!(first.into_value()?, 14);

    assert_eq!(Stream::new(0..5).filter(|x| *x > 10).find_first()?, Optional::EMPTY);
    Ok(())
}

#[test]
fn reduce_and_reduce_from_on_empty() -> anyhow::Result<()> {
    assert_eq!(Stream::<i32>::empty().reduce(|a, b| a + b)?, Optional::EMPTY);
    assert_eq!(Stream::<i32>::empty().reduce_from(10, |a, b| a + b)?, Optional::of(10));

    assert_eq!(Stream::new(1..=4).reduce(|a, b| a * b)?, Optional::of(24));
    let joined = Stream::new(vec!['a', 'b', 'c']).reduce_from(String::new(), |mut s, c| {
        s.push(c);
        s
    })?;
    assert_eq!(joined.into_value()?, "abc");
    Ok(())
}

#[test]
fn sum_starts_from_the_given_value() -> anyhow::Result<()> {
    assert_eq!(Stream::new(1..=10).sum(100)?, 155);
    assert_eq!(Stream::<f64>::empty().sum(1.5)?, 1.5);
    Ok(())
}

#[test]
fn for_each_visits_in_order() -> anyhow::Result<()> {
    let mut seen = Vec::new();
    Stream::new(vec!["x", "y", "z"]).for_each(|s| seen.push(s))?;
    assert_eq!(seen, vec!["x", "y", "z"]);
    Ok(())
}

#[test]
fn done_drains_for_side_effects() -> anyhow::Result<()> {
    let mut hits = 0;
    Stream::new(0..7).peek(|_| hits += 1).done()?;
    assert_eq!(hits, 7);
    Ok(())
}

#[test]
fn iter_yields_results() -> anyhow::Result<()> {
    let mut s = Stream::new(0..4).map(|x| x * x);
    let squares = s.iter()?.collect::<Result<Vec<_>, _>>()?;
    assert_eq!(squares, vec![0, 1, 4, 9]);
    Ok(())
}
