/// Same as `?` for an `Option<Result<..>>` returning iterator: unwraps
/// `Ok`, forwards the error as `Some(Err(..))`.
macro_rules! try_some {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => return Some(Err(From::from(e))),
        }
    };
}

/// Stages and commits a batch of fields with the same timestamp.
///
/// ```ignore
/// commit!(now; model.hdop => 2.7, model.vdop => 9.3);
/// ```
macro_rules! commit {
    ($now:expr; $($field:expr => $value:expr),+ $(,)?) => {{
        let now = $now;
        $( $field.update($value, now); )+
    }};
}
