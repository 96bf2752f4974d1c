use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let silent = std::env::args().skip(1).any(|arg| arg == "--silent");

    match social_signin::run(silent).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "sign-in did not complete");
            ExitCode::FAILURE
        }
    }
}
