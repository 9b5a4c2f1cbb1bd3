//! `adaadmin` binary entrypoint.

#[tokio::main]
async fn main() {
    std::process::exit(adaadmin_cli::run().await);
}
