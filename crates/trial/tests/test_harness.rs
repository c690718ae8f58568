use trial::{expect_eq, require_eq, Fixture};

#[derive(Default)]
struct Counter {
    value: i32,
}

impl Fixture for Counter {
    fn set_up(&mut self) {
        self.value = 1;
    }
}

#[trial::test(Arithmetic)]
fn addition() {
    expect_eq!(1 + 1, 2);
}

#[trial::test(Arithmetic)]
fn comparison() {
    trial::expect_lt!(1, 2);
    trial::expect_ge!(2, 2, "two is {}", "two");
    trial::expect_false!(1 > 2);
}

#[trial::test(Io)]
fn returns_ok() -> std::io::Result<()> {
    std::fs::metadata(env!("CARGO_MANIFEST_DIR"))?;
    Ok(())
}

#[trial::test_f(Counter)]
fn starts_at_one(counter: &mut Counter) {
    require_eq!(counter.value, 1);
    counter.value += 1;
    expect_eq!(counter.value, 2);
}

#[trial::test_f(Counter)]
fn gets_a_fresh_fixture(counter: &mut Counter) {
    expect_eq!(counter.value, 1);
}

#[trial::test(Arithmetic)]
#[allow(non_snake_case)]
fn DISABLED_never_runs() {
    trial::fail!("disabled tests are not run");
}

trial::test_harness!();
