//! HTTP routes for candy machine creation and minting.
use crate::{
    api::controllers::candy_machine,
    models::{
        CandyMachineRequest, CreateCandyMachineResponse, DefaultAppState, ErrorResponse,
        MintCandyMachineResponse,
    },
};
use actix_web::{post, web, Responder};

/// Builds a candy machine creation transaction for the wallet to co-sign.
///
/// The returned transaction is signed by the server and the generated
/// account keys; only the wallet's fee-payer signature is missing.
#[utoipa::path(
    post,
    path = "/create-candy-machine",
    tag = "Candy Machine",
    request_body = CandyMachineRequest,
    responses(
        (status = 200, description = "Partially signed creation transaction", body = CreateCandyMachineResponse),
        (status = 500, description = "Creation failed", body = ErrorResponse),
    )
)]
#[post("/create-candy-machine")]
async fn create_candy_machine(
    request: web::Json<CandyMachineRequest>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    candy_machine::create_candy_machine(request.into_inner(), &data.0).await
}

/// Mints one asset to the wallet from its most recently created machine.
#[utoipa::path(
    post,
    path = "/mint-candy-machine",
    tag = "Candy Machine",
    request_body = CandyMachineRequest,
    responses(
        (status = 200, description = "Asset minted", body = MintCandyMachineResponse),
        (status = 500, description = "Mint failed", body = ErrorResponse),
    )
)]
#[post("/mint-candy-machine")]
async fn mint_candy_machine(
    request: web::Json<CandyMachineRequest>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    candy_machine::mint_candy_machine(request.into_inner(), &data.0).await
}

/// Initializes the routes for the candy machine module.
pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(create_candy_machine);
    cfg.service(mint_candy_machine);
}
