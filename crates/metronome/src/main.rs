fn main() {
    if let Err(e) = lib_metronome::init() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
