fn main() {
    if let Err(err) = flowviz::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
