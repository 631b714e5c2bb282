use streamline::{ChainedCondition, ErrorKind, Stream, StreamError};

fn fizzbuzz<'c>() -> streamline::Result<ChainedCondition<'c, u32, String>> {
    ChainedCondition::new()
        .if_then(|x: &u32| x % 15 == 0, |_| "FizzBuzz".to_string())?
        .if_then(|x: &u32| x % 3 == 0, |_| "Fizz".to_string())?
        .if_then(|x: &u32| x % 5 == 0, |_| "Buzz".to_string())?
        .otherwise(|x| x.to_string())
}

#[test]
fn first_matching_clause_wins() -> anyhow::Result<()> {
    let out = Stream::new(1..=15).conditional(fizzbuzz()?)?.to_vec()?;

    assert_eq!(out[2], "Fizz");
    assert_eq!(out[4], "Buzz");
    assert_eq!(out[14], "FizzBuzz");
    assert_eq!(out[6], "7");
    Ok(())
}

#[test]
fn apply_on_a_single_value() -> anyhow::Result<()> {
    let cond = fizzbuzz()?;
    assert_eq!(cond.apply(30)?, "FizzBuzz");
    assert_eq!(cond.apply(11)?, "11");
    Ok(())
}

#[test]
fn unclosed_chain_is_rejected() -> anyhow::Result<()> {
    let open = ChainedCondition::new().if_then(|x: &i32| *x > 0, |x| x + 1)?;
    assert!(matches!(open.apply(1), Err(StreamError::ConditionNotClosed)));

    let err = Stream::new(0..3).conditional(open).unwrap_err();
    assert!(matches!(err, StreamError::ConditionNotClosed));
    Ok(())
}

#[test]
fn otherwise_needs_an_if_clause() {
    let err = ChainedCondition::<i32>::new().otherwise(|x| x).unwrap_err();
    assert!(matches!(err, StreamError::MissingIfClause));
    assert_eq!(err.kind(), ErrorKind::Lifecycle);
}

#[test]
fn closed_chain_refuses_more_clauses() -> anyhow::Result<()> {
    let closed = ChainedCondition::if_else(|x: &i32| *x < 0, |x| -x, |x| x);
    assert!(closed.is_closed());

    let err = closed.if_then(|x| *x == 0, |_| 42).unwrap_err();
    assert!(matches!(err, StreamError::ConditionClosed));
    Ok(())
}

#[test]
fn done_passes_unmatched_through() -> anyhow::Result<()> {
    let clamp = ChainedCondition::new()
        .if_then(|x: &i32| *x > 10, |_| 10)?
        .if_then(|x: &i32| *x < 0, |_| 0)?
        .done()?;

    let out = Stream::new(vec![-5, 3, 12, 10]).conditional(clamp)?.to_vec()?;
    assert_eq!(out, vec![0, 3, 10, 10]);
    Ok(())
}

#[test]
fn display_describes_the_shape() -> anyhow::Result<()> {
    let empty = ChainedCondition::<i32>::new();
    assert_eq!(empty.to_string(), "ChainedCondition has not defined any condition");

    let one = ChainedCondition::<i32>::new().if_then(|_| true, |x| x)?;
    assert_eq!(one.to_string(), "ChainedCondition defines 'if' condition");

    let pair = ChainedCondition::<i32>::if_else(|_| true, |x| x, |x| x);
    assert_eq!(pair.to_string(), "ChainedCondition defines 'if' and 'else' condition");

    let ladder = fizzbuzz()?;
    assert_eq!(
        ladder.to_string(),
        "ChainedCondition defines 'if' then 2 elif conditions and 'else' condition"
    );

    let open = ChainedCondition::<i32>::new()
        .if_then(|_| true, |x| x)?
        .if_then(|_| true, |x| x)?;
    assert_eq!(open.to_string(), "ChainedCondition defines 'if' then 1 elif condition");

    let named = ChainedCondition::<i32>::named("clamp");
    assert_eq!(named.to_string(), "clamp");
    Ok(())
}
