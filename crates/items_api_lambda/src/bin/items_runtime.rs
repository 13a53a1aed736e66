#![recursion_limit = "256"]

use lambda_runtime::Error;

/// Single-function deployment: every route of the items API is served here.
#[tokio::main]
async fn main() -> Result<(), Error> {
    items_api_lambda::runtime::serve(None).await
}
