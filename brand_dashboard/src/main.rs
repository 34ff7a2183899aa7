use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    brand_dashboard::run().await
}
