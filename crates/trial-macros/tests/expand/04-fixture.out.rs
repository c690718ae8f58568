#[allow(non_upper_case_globals)]
const __trial_test_Counter_increments: ::trial::_test_reexports::TestRegistration = {
    #[allow(unused_imports)]
    use ::trial::_test_reexports as __trial;

    fn increments(counter: &mut fixtures::Counter) {
        counter.value += 1;
    }

    fn __trial_test_body(fixture: &mut fixtures::Counter) -> __trial::Result<(), __trial::Error> {
        __trial::Termination::into_result(increments(fixture))
    }

    __trial::TestRegistration {
        test_case_name: "Counter",
        name: "increments",
        location: __trial::location!(),
        fixture: __trial::FixtureDesc::of::<fixtures::Counter>(),
        factory: &__trial::FixtureFactory::<fixtures::Counter>::new(__trial_test_body)
    }
};

::trial::__test_registration! {
    #[allow(non_upper_case_globals)]
    static __TRIAL_TEST_Counter_increments: ::trial::_test_reexports::TestRegistration = __trial_test_Counter_increments;
}
