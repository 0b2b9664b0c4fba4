//! # Candy Machine Controller
//!
//! Handles the create and mint requests. Pipeline errors are wrapped into
//! [`ApiError`] so every failure carries `kind` and `details`.

use actix_web::HttpResponse;
use log::info;

use crate::{
    domain::CandyMachineServiceTrait,
    models::{ApiError, AppState, CandyMachineRequest},
};

pub async fn create_candy_machine<S>(
    request: CandyMachineRequest,
    state: &AppState<S>,
) -> Result<HttpResponse, ApiError>
where
    S: CandyMachineServiceTrait,
{
    let response = state
        .candy_machine_service
        .create_candy_machine(request.user_pubkey)
        .await
        .map_err(ApiError::CreationFailed)?;

    info!(
        "Creation transaction for candy machine {} ready for co-signing",
        response.candy_machine
    );
    Ok(HttpResponse::Ok().json(response))
}

pub async fn mint_candy_machine<S>(
    request: CandyMachineRequest,
    state: &AppState<S>,
) -> Result<HttpResponse, ApiError>
where
    S: CandyMachineServiceTrait,
{
    let response = state
        .candy_machine_service
        .mint_candy_machine(request.user_pubkey)
        .await
        .map_err(ApiError::MintFailed)?;

    info!(
        "Minted {} in transaction {}",
        response.minted_nft.minted_nft_pubkey, response.transaction_signature
    );
    Ok(HttpResponse::Ok().json(response))
}
