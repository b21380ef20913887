use std::process;

#[tokio::main]
async fn main() {
    let exit_code = visor_cli::run().await;
    process::exit(exit_code);
}
