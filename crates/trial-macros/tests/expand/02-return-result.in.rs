fn returns_result() -> std::io::Result<()> {
    Ok(())
}
