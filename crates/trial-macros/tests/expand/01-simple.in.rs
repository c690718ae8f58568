fn hello() {
    trial::expect_eq!(1 + 1, 2);
}
