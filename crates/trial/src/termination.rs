/// The return types a test body may have.
///
/// A body returns either `()` or a `Result` whose error converts into
/// `anyhow::Error`. An `Err` is recorded on the test as a fatal failure
/// carrying the error chain.
pub trait Termination: sealed::Sealed {
    /// The value a body returns when a fatal assertion (`require!` and
    /// friends) stops it. The failure is already on the test result, so the
    /// value itself must not add another one.
    fn stopped() -> Self;

    /// Turn the value returned by a body into the outcome recorded on the test.
    fn into_result(self) -> anyhow::Result<()>;
}

impl Termination for () {
    #[inline]
    fn stopped() {}

    #[inline]
    fn into_result(self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<E> Termination for Result<(), E>
where
    E: Into<anyhow::Error>,
{
    #[inline]
    fn stopped() -> Self {
        Ok(())
    }

    #[inline]
    fn into_result(self) -> anyhow::Result<()> {
        self.map_err(Into::into)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for () {}

    impl<E> Sealed for Result<(), E> where E: Into<anyhow::Error> {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_info::TestInfo, unit_test::testing::quiet_unit_test};

    #[test]
    fn stopped_body_adds_no_failure() {
        <() as Termination>::stopped();
        assert!(<Result<(), std::io::Error> as Termination>::stopped()
            .into_result()
            .is_ok());
    }

    #[test]
    fn errors_are_converted() {
        let err: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "broken pipe"));
        let converted = err.into_result().unwrap_err();
        assert_eq!(converted.to_string(), "broken pipe");
        assert!(().into_result().is_ok());
    }

    #[test]
    fn require_stops_the_body_with_one_failure() {
        fn body(_: &mut ()) -> anyhow::Result<()> {
            crate::require!(1 + 1 == 3);
            crate::add_failure!("not reached");
            Ok(())
        }

        let unit_test = quiet_unit_test();
        let test_info: std::sync::Arc<TestInfo> =
            crate::unit_test::testing::register_fn(&unit_test, "Stop", "early", body);
        assert!(!unit_test.run());

        let result = test_info.result();
        assert_eq!(result.total_part_count(), 1);
        assert!(result.has_fatal_failure());
    }
}
