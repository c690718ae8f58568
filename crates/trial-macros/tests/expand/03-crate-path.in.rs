#[trial(crate = crate::inner)]
#[allow(clippy::eq_op)]
fn with_attrs() {
    trial::expect!(1 == 1);
}
