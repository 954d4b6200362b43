// Binary entry point for openbel_ws
// This is a thin wrapper that delegates to the library implementation

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match openbel_ws::shell::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("openbel_ws fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
