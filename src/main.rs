fn main() {
    if let Err(err) = pie_label_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
