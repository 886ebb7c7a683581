fn main() -> std::process::ExitCode {
    boasvindas_lib::run()
}
