fn main() {
    kubescribe::app::cli::run();
}
