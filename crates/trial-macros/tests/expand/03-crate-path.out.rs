#[allow(non_upper_case_globals)]
const __trial_test_MyTest_with_attrs: crate::inner::_test_reexports::TestRegistration = {
    #[allow(unused_imports)]
    use crate::inner::_test_reexports as __trial;

    #[allow(clippy::eq_op)]
    fn with_attrs() {
        trial::expect!(1 == 1);
    }

    fn __trial_test_body(_: &mut ()) -> __trial::Result<(), __trial::Error> {
        __trial::Termination::into_result(with_attrs())
    }

    __trial::TestRegistration {
        test_case_name: "MyTest",
        name: "with_attrs",
        location: __trial::location!(),
        fixture: __trial::FixtureDesc::of::<()>(),
        factory: &__trial::FixtureFactory::<()>::new(__trial_test_body)
    }
};

crate::inner::__test_registration! {
    #[allow(non_upper_case_globals)]
    static __TRIAL_TEST_MyTest_with_attrs: crate::inner::_test_reexports::TestRegistration = __trial_test_MyTest_with_attrs;
}
