#[tokio::main]
async fn main() {
    menu::start_server().await;
}
