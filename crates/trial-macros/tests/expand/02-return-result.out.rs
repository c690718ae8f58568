#[allow(non_upper_case_globals)]
const __trial_test_MyTest_returns_result: ::trial::_test_reexports::TestRegistration = {
    #[allow(unused_imports)]
    use ::trial::_test_reexports as __trial;

    fn returns_result() -> std::io::Result<()>
    where
        std::io::Result<()>: __trial::Termination
    {
        Ok(())
    }

    fn __trial_test_body(_: &mut ()) -> __trial::Result<(), __trial::Error> {
        __trial::Termination::into_result(returns_result())
    }

    __trial::TestRegistration {
        test_case_name: "MyTest",
        name: "returns_result",
        location: __trial::location!(),
        fixture: __trial::FixtureDesc::of::<()>(),
        factory: &__trial::FixtureFactory::<()>::new(__trial_test_body)
    }
};

::trial::__test_registration! {
    #[allow(non_upper_case_globals)]
    static __TRIAL_TEST_MyTest_returns_result: ::trial::_test_reexports::TestRegistration = __trial_test_MyTest_returns_result;
}
