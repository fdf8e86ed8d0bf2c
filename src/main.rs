fn main() -> std::process::ExitCode {
    adsheet_lib::run()
}
