fn main() -> std::process::ExitCode {
    mantenciones_lib::run()
}
