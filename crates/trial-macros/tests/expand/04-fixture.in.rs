fn increments(counter: &mut fixtures::Counter) {
    counter.value += 1;
}
