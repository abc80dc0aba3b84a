#[actix_web::main]
async fn main() -> std::io::Result<()> {
    matricula_server::run().await
}
