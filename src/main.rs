fn main() {
    if let Err(err) = localdata_remap::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
