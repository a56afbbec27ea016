use pathstore::cli;

fn main() {
    cli::run();
}
