//! Binary entrypoint for the nestlist tool

#[tokio::main]
async fn main() {
    nestlist::cli::run().await;
}
