fn main() {
    std::process::exit(check_mountpoints::cli::run());
}
