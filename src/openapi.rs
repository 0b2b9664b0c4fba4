use crate::{
    api::routes::{candy_machine, health},
    models,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    tags((name = "Candy Machine Co-Signer API")),
    info(
        description = "Builds candy machine transactions for a wallet to co-sign, and mints from them",
        version = "0.1.0",
        title = "Candy Machine Co-Signer API"
    ),
    paths(
        candy_machine::create_candy_machine,
        candy_machine::mint_candy_machine,
        health::health_check,
    ),
    components(schemas(
        models::CandyMachineRequest,
        models::CreateCandyMachineResponse,
        models::MintCandyMachineResponse,
        models::MintedNft,
        models::ErrorResponse,
        models::ErrorKind,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for path in ["/create-candy-machine", "/mint-candy-machine", "/health"] {
            assert!(paths.iter().any(|p| p.as_str() == path), "{path} missing");
        }
    }
}
