#![recursion_limit = "256"]

use items_api_lambda::handlers::router::Operation;
use lambda_runtime::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    items_api_lambda::runtime::serve(Some(Operation::GetItem)).await
}
