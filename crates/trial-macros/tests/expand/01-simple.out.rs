#[allow(non_upper_case_globals)]
const __trial_test_MyTest_hello: ::trial::_test_reexports::TestRegistration = {
    #[allow(unused_imports)]
    use ::trial::_test_reexports as __trial;

    fn hello() {
        trial::expect_eq!(1 + 1, 2);
    }

    fn __trial_test_body(_: &mut ()) -> __trial::Result<(), __trial::Error> {
        __trial::Termination::into_result(hello())
    }

    __trial::TestRegistration {
        test_case_name: "MyTest",
        name: "hello",
        location: __trial::location!(),
        fixture: __trial::FixtureDesc::of::<()>(),
        factory: &__trial::FixtureFactory::<()>::new(__trial_test_body)
    }
};

::trial::__test_registration! {
    #[allow(non_upper_case_globals)]
    static __TRIAL_TEST_MyTest_hello: ::trial::_test_reexports::TestRegistration = __trial_test_MyTest_hello;
}
