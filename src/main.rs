fn main() {
    drill::cli::run();
}
